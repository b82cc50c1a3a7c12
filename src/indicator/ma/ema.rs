use crate::indicator::TABuilder;
use crate::indicator::series_math::{self, EmaState};
use crate::model::Candle;
use std::marker::PhantomData;

/// 종가 배열의 지수이동평균
///
/// 첫 값으로 시드하므로 모든 지점에서 값이 정의됩니다.
pub fn ema(closes: &[f64], period: usize) -> Vec<f64> {
    series_math::ema(closes, period)
}

/// 지수이동평균(EMA) 계산 빌더
///
/// 종가를 한 봉씩 받아 EMA를 갱신합니다.
#[derive(Debug)]
pub struct EMABuilder<C: Candle> {
    /// EMA 계산 기간
    pub period: usize,
    state: EmaState,
    _phantom: PhantomData<C>,
}

impl<C: Candle> EMABuilder<C> {
    pub fn new(period: usize) -> Self {
        EMABuilder {
            period,
            state: EmaState::new(period),
            _phantom: PhantomData,
        }
    }

    /// 현재 EMA (아직 입력이 없으면 `None`)
    pub fn value(&self) -> Option<f64> {
        self.state.value()
    }
}

impl<C: Candle> TABuilder<f64, C> for EMABuilder<C> {
    fn next(&mut self, data: &C) -> f64 {
        self.state.next(data.close_price())
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}
