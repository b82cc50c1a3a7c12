use crate::indicator::TABuilder;
use crate::model::Candle;
use std::marker::PhantomData;

/// 온밸런스볼륨(OBV) 빌더
///
/// 시계열 시작점에서 0으로 시작해, 종가가 오르면 거래량을 더하고
/// 내리면 빼며 같으면 유지합니다.
#[derive(Debug)]
pub struct OBVBuilder<C: Candle> {
    previous_close: Option<f64>,
    value: f64,
    _phantom: PhantomData<C>,
}

impl<C: Candle> OBVBuilder<C> {
    pub fn new() -> Self {
        OBVBuilder {
            previous_close: None,
            value: 0.0,
            _phantom: PhantomData,
        }
    }
}

impl<C: Candle> Default for OBVBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Candle> TABuilder<f64, C> for OBVBuilder<C> {
    fn next(&mut self, data: &C) -> f64 {
        let close = data.close_price();
        if let Some(previous) = self.previous_close {
            if close > previous {
                self.value += data.volume();
            } else if close < previous {
                self.value -= data.volume();
            }
        }
        self.previous_close = Some(close);
        self.value
    }

    fn reset(&mut self) {
        self.previous_close = None;
        self.value = 0.0;
    }
}

/// 캔들 목록의 OBV 시계열
pub fn obv<C: Candle>(data: &[C]) -> Vec<f64> {
    OBVBuilder::<C>::new().build(data)
}
