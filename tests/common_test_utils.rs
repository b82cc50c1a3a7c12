#![allow(dead_code)]

use market_indicators::model::Candle;

/// 일봉 간격 (초)
pub const DAY: i64 = 86_400;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCandle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl std::fmt::Display for TestCandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TestCandle(t={}, o={}, h={}, l={}, c={}, v={})",
            self.timestamp, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

impl Candle for TestCandle {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
    fn open_price(&self) -> f64 {
        self.open
    }
    fn high_price(&self) -> f64 {
        self.high
    }
    fn low_price(&self) -> f64 {
        self.low
    }
    fn close_price(&self) -> f64 {
        self.close
    }
    fn volume(&self) -> f64 {
        self.volume
    }
}

impl TestCandle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        TestCandle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 시가=고가=저가=종가인 봉
    pub fn flat(timestamp: i64, price: f64, volume: f64) -> Self {
        TestCandle::new(timestamp, price, price, price, price, volume)
    }
}

pub fn create_uptrend_candles(count: usize, base_price: f64, step: f64) -> Vec<TestCandle> {
    let mut candles = Vec::with_capacity(count);
    for i in 0..count {
        let price = base_price + (i as f64 * step);
        candles.push(TestCandle {
            timestamp: i as i64 * DAY,
            open: price - step / 2.0,
            high: price + step,
            low: price - step,
            close: price + step / 2.0,
            volume: 1000.0,
        });
    }
    candles
}

pub fn create_downtrend_candles(count: usize, base_price: f64, step: f64) -> Vec<TestCandle> {
    let mut candles = Vec::with_capacity(count);
    for i in 0..count {
        let price = base_price - (i as f64 * step);
        candles.push(TestCandle {
            timestamp: i as i64 * DAY,
            open: price + step / 2.0,
            high: price + step,
            low: price - step,
            close: price - step / 2.0,
            volume: 1000.0,
        });
    }
    candles
}

pub fn create_sideways_candles(count: usize, base_price: f64, range: f64) -> Vec<TestCandle> {
    let mut candles = Vec::with_capacity(count);
    for i in 0..count {
        let oscillation = (i % 4) as f64 * range / 4.0 - range / 2.0;
        let price = base_price + oscillation;
        candles.push(TestCandle {
            timestamp: i as i64 * DAY,
            open: price,
            high: price + range / 8.0,
            low: price - range / 8.0,
            close: price,
            volume: 1000.0,
        });
    }
    candles
}

/// 종가가 `start`부터 1씩 오르는 봉 (고가/저가는 종가 ±1)
pub fn create_linear_candles(count: usize, start: f64) -> Vec<TestCandle> {
    (0..count)
        .map(|i| {
            let close = start + i as f64;
            TestCandle::new(i as i64 * DAY, close, close + 1.0, close - 1.0, close, 1000.0)
        })
        .collect()
}

/// 모든 값이 같은 봉
pub fn create_flat_candles(count: usize, price: f64) -> Vec<TestCandle> {
    (0..count)
        .map(|i| TestCandle::flat(i as i64 * DAY, price, 1000.0))
        .collect()
}

/// 주기 `period`의 사인파 종가
pub fn create_sine_candles(count: usize, base_price: f64, amplitude: f64, period: f64) -> Vec<TestCandle> {
    (0..count)
        .map(|i| {
            let close =
                base_price + amplitude * (2.0 * std::f64::consts::PI * i as f64 / period).sin();
            TestCandle::new(i as i64 * DAY, close, close + 0.5, close - 0.5, close, 1000.0)
        })
        .collect()
}
