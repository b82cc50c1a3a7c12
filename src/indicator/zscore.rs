use crate::indicator::series_math::{self, finite, window};

/// Z-Score 시계열
///
/// `(C - 평균) / 표준편차`를 직전 `period`개 종가로 계산합니다.
/// 표준편차가 0이면 정의되지 않으므로 `None`입니다.
pub fn zscore(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|index| {
            let values = window(closes, period, index)?;
            let average = series_math::mean(values)?;
            let std_dev = series_math::std_dev(values)?;
            if std_dev == 0.0 {
                return None;
            }
            finite((closes[index] - average) / std_dev)
        })
        .collect()
}
