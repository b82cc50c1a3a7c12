use crate::indicator::config::StochasticParams;
use crate::indicator::series_math::{self, finite, window};
use serde::Serialize;

/// 스토캐스틱 %K/%D 시계열
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// 한 지점의 %K
///
/// 구간 고가와 저가가 같으면 0으로 나누는 대신 중립값 50을 반환합니다.
fn percent_k(highs: &[f64], lows: &[f64], close: f64, period: usize, index: usize) -> Option<f64> {
    let highest = series_math::highest(window(highs, period, index)?)?;
    let lowest = series_math::lowest(window(lows, period, index)?)?;
    let range = highest - lowest;
    if range == 0.0 {
        return Some(50.0);
    }
    finite(100.0 * (close - lowest) / range).map(|k| k.clamp(0.0, 100.0))
}

/// 스토캐스틱 계산
///
/// %D는 %K의 `d_period` 단순이동평균이며, 구간 안의 %K가 모두 정의된 뒤부터 값이 생깁니다.
///
/// # Arguments
/// * `highs`, `lows`, `closes` - 같은 길이의 가격 배열
/// * `params` - %K, %D 기간
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    params: &StochasticParams,
) -> StochasticSeries {
    let k: Vec<Option<f64>> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| percent_k(highs, lows, close, params.k_period, i))
        .collect();

    let d = (0..k.len())
        .map(|i| {
            if params.d_period == 0 || i + 1 < params.d_period {
                return None;
            }
            let values = k[i + 1 - params.d_period..=i]
                .iter()
                .copied()
                .collect::<Option<Vec<f64>>>()?;
            series_math::mean(&values)
        })
        .collect();

    StochasticSeries { k, d }
}
