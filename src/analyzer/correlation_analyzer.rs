use crate::error::{EngineError, EngineResult};
use crate::indicator::engine::IndicatorPoint;
use crate::indicator::series_math::pearson;
use crate::indicator::{closes, volumes};
use crate::model::Candle;
use log::{debug, warn};

/// 두 시계열 간 피어슨 상관관계 분석기
///
/// 외부에서 받은 보조 시계열(거래량, OBV, 통화량 등)과 가격의 상관관계를
/// 계산합니다. 한쪽 값이 없는 지점은 건너뜁니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    pub fn new() -> Self {
        CorrelationAnalyzer
    }

    /// 같은 길이의 두 시계열 상관계수
    ///
    /// # Arguments
    /// * `xs` - 첫 번째 시계열
    /// * `ys` - 두 번째 시계열 (`xs`와 인덱스가 정렬되어 있어야 함)
    ///
    /// # Returns
    /// * `EngineResult<Option<f64>>` - 길이가 다르면 오류, 유효한 쌍이 2개 미만이거나
    ///   한쪽 분산이 0이면 `Ok(None)`, 그 외에는 `[-1, 1]` 범위의 상관계수
    pub fn correlation(&self, xs: &[Option<f64>], ys: &[Option<f64>]) -> EngineResult<Option<f64>> {
        if xs.len() != ys.len() {
            warn!("상관관계 입력 길이 불일치: {} != {}", xs.len(), ys.len());
            return Err(EngineError::LengthMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }

        let (valid_x, valid_y): (Vec<f64>, Vec<f64>) = xs
            .iter()
            .zip(ys)
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
                _ => None,
            })
            .unzip();

        if valid_x.len() < 2 {
            debug!("유효한 쌍 부족: {}개", valid_x.len());
            return Ok(None);
        }

        Ok(pearson(&valid_x, &valid_y))
    }

    /// 종가와 거래량의 상관계수
    pub fn price_volume<C: Candle>(&self, candles: &[C]) -> EngineResult<Option<f64>> {
        let prices = close_series(candles);
        let volume_series: Vec<Option<f64>> = volumes(candles).into_iter().map(Some).collect();
        self.correlation(&prices, &volume_series)
    }

    /// 종가와 OBV의 상관계수
    ///
    /// # Arguments
    /// * `candles` - 캔들 목록
    /// * `points` - 같은 캔들로 계산한 지표 목록
    pub fn price_obv<C: Candle>(
        &self,
        candles: &[C],
        points: &[IndicatorPoint],
    ) -> EngineResult<Option<f64>> {
        let prices = close_series(candles);
        let obv: Vec<Option<f64>> = points.iter().map(|p| p.obv).collect();
        self.correlation(&prices, &obv)
    }

    /// 종가와 외부 보조 시계열의 상관계수
    ///
    /// # Arguments
    /// * `candles` - 캔들 목록
    /// * `other` - 캔들과 인덱스가 정렬된 보조 시계열 (예: M2 통화량)
    pub fn price_series<C: Candle>(
        &self,
        candles: &[C],
        other: &[Option<f64>],
    ) -> EngineResult<Option<f64>> {
        self.correlation(&close_series(candles), other)
    }
}

fn close_series<C: Candle>(candles: &[C]) -> Vec<Option<f64>> {
    closes(candles).into_iter().map(Some).collect()
}
