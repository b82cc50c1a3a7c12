use crate::indicator::config::BollingerParams;
use crate::indicator::series_math::{self, finite, window};
use serde::Serialize;
use std::fmt::Display;

/// 볼린저 밴드 한 지점
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BollingerBands {
    /// 상단 밴드
    pub upper: f64,
    /// 중심선 (SMA)
    pub middle: f64,
    /// 하단 밴드
    pub lower: f64,
}

impl Display for BollingerBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BBand(upper: {:.2}, middle: {:.2}, lower: {:.2})",
            self.upper, self.middle, self.lower
        )
    }
}

/// 한 지점의 볼린저 밴드
fn calculate_bands(closes: &[f64], params: &BollingerParams, index: usize) -> Option<BollingerBands> {
    let values = window(closes, params.period, index)?;
    let middle = series_math::mean(values)?;
    // 기간이 1이면 표준편차가 정의되지 않으므로 밴드 폭 0
    let std_dev = series_math::std_dev(values).unwrap_or(0.0);
    let offset = std_dev * params.multiplier;
    Some(BollingerBands {
        upper: finite(middle + offset)?,
        middle,
        lower: finite(middle - offset)?,
    })
}

/// 볼린저 밴드 시계열
///
/// # Arguments
/// * `closes` - 종가 배열
/// * `params` - 기간과 표준편차 배수
///
/// # Returns
/// * `Vec<Option<BollingerBands>>` - `period`개 봉 이전에는 `None`
pub fn bollinger_bands(closes: &[f64], params: &BollingerParams) -> Vec<Option<BollingerBands>> {
    (0..closes.len())
        .map(|index| calculate_bands(closes, params, index))
        .collect()
}
