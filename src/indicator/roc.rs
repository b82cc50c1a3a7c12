use crate::indicator::series_math::finite;

/// 변화율(ROC) 시계열 (%)
///
/// 기간은 화면 표시 구간에 따라 정해지며(`TimeRange::roc_period`),
/// 여기서는 호출자가 결정한 값을 그대로 받습니다.
///
/// # Returns
/// * `Vec<Option<f64>>` - `i < period`이거나 기준 종가가 0이면 `None`
pub fn roc(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|index| {
            if period == 0 || index < period {
                return None;
            }
            let base = closes[index - period];
            if base == 0.0 {
                return None;
            }
            finite(100.0 * (closes[index] - base) / base)
        })
        .collect()
}
