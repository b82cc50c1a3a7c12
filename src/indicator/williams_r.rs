use crate::indicator::series_math::{self, finite, window};

/// 윌리엄스 %R 시계열 (-100 ~ 0)
///
/// 구간 고가와 저가가 같으면 중간값 -50을 반환합니다.
pub fn williams_r(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    closes
        .iter()
        .enumerate()
        .map(|(index, &close)| {
            let highest = series_math::highest(window(highs, period, index)?)?;
            let lowest = series_math::lowest(window(lows, period, index)?)?;
            let range = highest - lowest;
            if range == 0.0 {
                return Some(-50.0);
            }
            finite(-100.0 * (highest - close) / range).map(|r| r.clamp(-100.0, 0.0))
        })
        .collect()
}
