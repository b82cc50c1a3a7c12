use crate::indicator::config::MACDParams;
use crate::indicator::series_math::ema;
use serde::Serialize;

/// MACD(Moving Average Convergence Divergence) 시계열
///
/// 세 벡터 모두 입력 종가 배열과 같은 길이입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MACDSeries {
    /// MACD 라인 (빠른 EMA - 느린 EMA)
    pub macd_line: Vec<f64>,
    /// 시그널 라인 (MACD 라인의 EMA)
    pub signal_line: Vec<f64>,
    /// 히스토그램 (MACD - 시그널)
    pub histogram: Vec<f64>,
}

impl MACDSeries {
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

/// MACD 계산
///
/// 시그널 라인은 가격이 아니라 과거 MACD 값들의 EMA이므로,
/// MACD 라인 전체를 먼저 만든 뒤 그 벡터를 다시 평활합니다.
///
/// # Arguments
/// * `closes` - 종가 배열
/// * `params` - 빠른/느린/시그널 기간
///
/// # Returns
/// * `MACDSeries` - MACD, 시그널, 히스토그램 벡터
pub fn macd(closes: &[f64], params: &MACDParams) -> MACDSeries {
    let fast = ema(closes, params.fast);
    let slow = ema(closes, params.slow);

    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, params.signal);
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MACDSeries {
        macd_line,
        signal_line,
        histogram,
    }
}
