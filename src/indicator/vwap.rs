use crate::indicator::TABuilder;
use crate::indicator::config::VwapSession;
use crate::indicator::series_math::finite;
use crate::model::Candle;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::marker::PhantomData;

/// 표준편차 밴드 배수
pub const BAND_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 3.0];

/// VWAP(거래량가중평균가격)과 표준편차 밴드
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct VWAPBands {
    /// VWAP 값
    pub vwap: Option<f64>,
    /// VWAP + {1,2,3}σ
    pub upper: [Option<f64>; 3],
    /// VWAP - {1,2,3}σ
    pub lower: [Option<f64>; 3],
}

impl Display for VWAPBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.vwap {
            Some(value) => write!(f, "VWAP: {:.2}", value),
            None => write!(f, "VWAP: -"),
        }
    }
}

/// 거래량 가중 누적 통계
///
/// 가중 평균과 가중 분산을 한 번의 순회로 갱신합니다(West 방식).
/// `E[x²] - E[x]²` 공식은 가격 수준이 크고 분산이 작을 때 자릿수 손실이 생겨
/// 쓰지 않습니다.
#[derive(Clone, Copy, Debug, Default)]
struct WeightedAccumulator {
    total_volume: f64,
    mean: f64,
    /// Σ v·(x - mean)²
    squared_deviation: f64,
}

impl WeightedAccumulator {
    fn add(&mut self, price: f64, volume: f64) {
        if volume <= 0.0 {
            return;
        }
        self.total_volume += volume;
        let previous_mean = self.mean;
        self.mean += (volume / self.total_volume) * (price - previous_mean);
        self.squared_deviation += volume * (price - previous_mean) * (price - self.mean);
    }

    fn bands(&self) -> VWAPBands {
        if self.total_volume <= 0.0 {
            return VWAPBands::default();
        }
        let Some(vwap) = finite(self.mean) else {
            return VWAPBands::default();
        };
        let std_dev = (self.squared_deviation / self.total_volume).max(0.0).sqrt();

        VWAPBands {
            vwap: Some(vwap),
            upper: BAND_MULTIPLIERS.map(|m| finite(vwap + m * std_dev)),
            lower: BAND_MULTIPLIERS.map(|m| finite(vwap - m * std_dev)),
        }
    }
}

/// VWAP 빌더
///
/// 시계열 시작부터 누적하거나(`Cumulative`), UTC 날짜가 바뀔 때마다 누적을
/// 초기화합니다(`Daily`). 거래량 합이 0이면 값이 정의되지 않습니다.
#[derive(Debug)]
pub struct VWAPBuilder<C: Candle> {
    session: VwapSession,
    current_day: Option<NaiveDate>,
    accumulator: WeightedAccumulator,
    _phantom: PhantomData<C>,
}

impl<C: Candle> VWAPBuilder<C> {
    pub fn new(session: VwapSession) -> Self {
        VWAPBuilder {
            session,
            current_day: None,
            accumulator: WeightedAccumulator::default(),
            _phantom: PhantomData,
        }
    }
}

impl<C: Candle> TABuilder<VWAPBands, C> for VWAPBuilder<C> {
    fn next(&mut self, data: &C) -> VWAPBands {
        if self.session == VwapSession::Daily {
            let day = data.datetime().date_naive();
            if self.current_day != Some(day) {
                self.accumulator = WeightedAccumulator::default();
                self.current_day = Some(day);
            }
        }

        self.accumulator.add(data.typical_price(), data.volume());
        self.accumulator.bands()
    }

    fn reset(&mut self) {
        self.current_day = None;
        self.accumulator = WeightedAccumulator::default();
    }
}

/// 캔들 목록의 VWAP 시계열
pub fn vwap<C: Candle>(data: &[C], session: VwapSession) -> Vec<VWAPBands> {
    VWAPBuilder::<C>::new(session).build(data)
}
