use crate::indicator::series_math::{self, finite, window};
use crate::model::Candle;

/// 램버트 상수
const CCI_CONSTANT: f64 = 0.015;

/// 상품채널지수(CCI) 시계열
///
/// `CCI = (TP - SMA(TP)) / (0.015 * MAD(TP))`, `TP = (H + L + C) / 3`.
/// 구간의 평균 절대 편차가 0이면 모든 TP가 같다는 뜻이므로 0을 반환합니다.
///
/// # Arguments
/// * `data` - 캔들 목록
/// * `period` - 계산 기간 (일반적으로 20)
pub fn cci<C: Candle>(data: &[C], period: usize) -> Vec<Option<f64>> {
    let typical: Vec<f64> = data.iter().map(|c| c.typical_price()).collect();

    (0..typical.len())
        .map(|index| {
            let values = window(&typical, period, index)?;
            let average = series_math::mean(values)?;
            let mad = series_math::mean_abs_deviation(values)?;
            if mad == 0.0 {
                return Some(0.0);
            }
            finite((typical[index] - average) / (CCI_CONSTANT * mad))
        })
        .collect()
}
