use crate::indicator::series_math::finite;

/// 한 지점의 RSI 계산
///
/// 직전 `period`개의 봉 간 변화량에서 상승분/하락분의 단순 평균을 구합니다.
/// 하락이 전혀 없으면 100, 상승과 하락이 모두 없으면(가격 변화 없음) 중립값 50입니다.
fn calculate_rsi(closes: &[f64], period: usize, index: usize) -> Option<f64> {
    if period == 0 || index < period || index >= closes.len() {
        return None;
    }

    let (gains, losses) = (index + 1 - period..=index).fold((0.0, 0.0), |(gain, loss), j| {
        let change = closes[j] - closes[j - 1];
        if change > 0.0 {
            (gain + change, loss)
        } else {
            (gain, loss - change)
        }
    });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(if avg_gain > 0.0 { 100.0 } else { 50.0 });
    }

    let rs = avg_gain / avg_loss;
    finite(100.0 - 100.0 / (1.0 + rs))
}

/// 상대강도지수(RSI) 시계열
///
/// # Arguments
/// * `closes` - 종가 배열
/// * `period` - RSI 기간 (일반적으로 14)
///
/// # Returns
/// * `Vec<Option<f64>>` - `period + 1`개 봉이 쌓이기 전에는 `None`, 이후 0-100
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|index| calculate_rsi(closes, period, index))
        .collect()
}
