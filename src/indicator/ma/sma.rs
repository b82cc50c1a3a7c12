use crate::indicator::series_math;

/// 단순이동평균 시계열
///
/// `i + 1 < period`인 지점은 `None`입니다.
pub fn sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    series_math::sma(closes, period)
}
