use crate::indicator::TABuilder;
use crate::indicator::series_math::{WilderState, finite};
use crate::model::Candle;
use serde::Serialize;
use std::fmt::Display;
use std::marker::PhantomData;

/// 방향성 지표 한 지점
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DirectionalIndex {
    /// +DI (상승 방향성)
    pub plus_di: Option<f64>,
    /// -DI (하락 방향성)
    pub minus_di: Option<f64>,
    /// 평균방향지수
    pub adx: Option<f64>,
}

impl Display for DirectionalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ADX(+DI: {:?}, -DI: {:?}, ADX: {:?})",
            self.plus_di, self.minus_di, self.adx
        )
    }
}

/// 직전 봉 가격
#[derive(Clone, Copy, Debug)]
struct PreviousBar {
    high: f64,
    low: f64,
    close: f64,
}

/// 평균방향지수(ADX) 빌더
///
/// 와일더 방식: 봉마다 TR, +DM, -DM을 구해 와일더 평활하고, 여기서 얻은 DX를
/// 다시 와일더 평활해 ADX를 만듭니다. 평활 상태를 봉에서 봉으로 넘기므로
/// 시계열 전체를 한 번만 순회합니다.
///
/// 첫 ADX는 `2 * period - 1`번째 인덱스에서 나옵니다.
#[derive(Debug)]
pub struct ADXBuilder<C: Candle> {
    period: usize,
    previous: Option<PreviousBar>,
    true_range: WilderState,
    plus_dm: WilderState,
    minus_dm: WilderState,
    dx: WilderState,
    _phantom: PhantomData<C>,
}

impl<C: Candle> ADXBuilder<C> {
    pub fn new(period: usize) -> Self {
        ADXBuilder {
            period,
            previous: None,
            true_range: WilderState::new(period),
            plus_dm: WilderState::new(period),
            minus_dm: WilderState::new(period),
            dx: WilderState::new(period),
            _phantom: PhantomData,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl<C: Candle> TABuilder<DirectionalIndex, C> for ADXBuilder<C> {
    fn next(&mut self, data: &C) -> DirectionalIndex {
        let (high, low, close) = (data.high_price(), data.low_price(), data.close_price());
        let previous = self.previous.replace(PreviousBar { high, low, close });

        let Some(prev) = previous else {
            return DirectionalIndex::default();
        };

        let true_range = (high - low)
            .max((high - prev.close).abs())
            .max((low - prev.close).abs());
        let up_move = high - prev.high;
        let down_move = prev.low - low;
        let plus_dm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus_dm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        let smoothed = (
            self.true_range.next(true_range),
            self.plus_dm.next(plus_dm),
            self.minus_dm.next(minus_dm),
        );
        let (Some(atr), Some(plus), Some(minus)) = smoothed else {
            return DirectionalIndex::default();
        };

        // 변동이 전혀 없으면 방향성도 0
        let (plus_di, minus_di) = if atr > 0.0 {
            (100.0 * plus / atr, 100.0 * minus / atr)
        } else {
            (0.0, 0.0)
        };
        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };

        DirectionalIndex {
            plus_di: finite(plus_di),
            minus_di: finite(minus_di),
            adx: self.dx.next(dx).and_then(finite),
        }
    }

    fn reset(&mut self) {
        *self = ADXBuilder::new(self.period);
    }
}

/// 캔들 목록의 ADX 시계열
pub fn adx<C: Candle>(data: &[C], period: usize) -> Vec<DirectionalIndex> {
    ADXBuilder::<C>::new(period).build(data)
}
