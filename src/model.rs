use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

use crate::error::{EngineError, EngineResult};

/// 이 값보다 큰 타임스탬프는 밀리초 단위로 간주합니다.
const MILLIS_THRESHOLD: u64 = 100_000_000_000;

/// 엔진 입력으로 사용되는 캔들(OHLCV) 인터페이스
///
/// 업스트림 데이터 수집기가 만든 어떤 캔들 타입이든 이 트레이트만 구현하면
/// 지표 엔진과 사이클 분석기에 그대로 넘길 수 있습니다.
pub trait Candle: Display + Debug + Send + Sync {
    /// 에포크 기준 타임스탬프 (초 또는 밀리초)
    fn timestamp(&self) -> i64;

    /// 시가
    fn open_price(&self) -> f64;

    /// 고가
    fn high_price(&self) -> f64;

    /// 저가
    fn low_price(&self) -> f64;

    /// 종가
    fn close_price(&self) -> f64;

    /// 거래량
    fn volume(&self) -> f64;

    /// 대표 가격 (H+L+C)/3
    fn typical_price(&self) -> f64 {
        (self.high_price() + self.low_price() + self.close_price()) / 3.0
    }

    /// 타임스탬프를 UTC 시각으로 변환
    ///
    /// 초/밀리초 단위는 값의 크기로 판별합니다.
    fn datetime(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.timestamp())
    }
}

/// 타임스탬프(초 또는 밀리초)를 UTC 시각으로 변환
///
/// # Arguments
/// * `timestamp` - 에포크 기준 타임스탬프
///
/// # Returns
/// * `DateTime<Utc>` - 변환된 시각 (범위를 벗어나면 에포크 시작)
pub fn timestamp_to_datetime(timestamp: i64) -> DateTime<Utc> {
    if timestamp.unsigned_abs() >= MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(timestamp).unwrap_or_default()
    } else {
        DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
    }
}

/// 기본 OHLCV 캔들
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvCandle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvCandle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        OhlcvCandle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl Display for OhlcvCandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Candle(t={}, o={}, h={}, l={}, c={}, v={})",
            self.timestamp, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

impl Candle for OhlcvCandle {
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

/// 차트 표시 구간
///
/// 화면에서 선택한 구간에 따라 ROC 기간이 달라집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    #[default]
    Days30,
    #[serde(rename = "60d")]
    Days60,
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// 구간별 ROC 기간
    ///
    /// # Returns
    /// * `usize` - 7d → 7, 30d → 20, 60d → 30, 90d → 45, all → 90
    pub fn roc_period(&self) -> usize {
        match self {
            TimeRange::Days7 => 7,
            TimeRange::Days30 => 20,
            TimeRange::Days60 => 30,
            TimeRange::Days90 => 45,
            TimeRange::All => 90,
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Days7 => write!(f, "7d"),
            TimeRange::Days30 => write!(f, "30d"),
            TimeRange::Days60 => write!(f, "60d"),
            TimeRange::Days90 => write!(f, "90d"),
            TimeRange::All => write!(f, "all"),
        }
    }
}

/// 입력 시계열의 전제 조건 검사
///
/// 타임스탬프는 엄격하게 증가해야 하고, 가격과 거래량은 유한해야 하며
/// 거래량은 음수가 될 수 없습니다. 위반 시 잘못된 숫자를 만들어내는 대신
/// 즉시 오류를 반환합니다.
///
/// # Arguments
/// * `candles` - 시간 오름차순 캔들 목록
///
/// # Returns
/// * `EngineResult<()>` - 성공 또는 첫 번째 위반 위치의 오류
pub fn validate_series<C: Candle>(candles: &[C]) -> EngineResult<()> {
    for (index, candle) in candles.iter().enumerate() {
        let fields = [
            ("open", candle.open_price()),
            ("high", candle.high_price()),
            ("low", candle.low_price()),
            ("close", candle.close_price()),
            ("volume", candle.volume()),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteValue { index, field });
            }
        }
        if candle.volume() < 0.0 {
            return Err(EngineError::NegativeVolume { index });
        }
        if index > 0 {
            let previous = candles[index - 1].timestamp();
            let current = candle.timestamp();
            if current <= previous {
                return Err(EngineError::NonMonotonicTimestamp {
                    index,
                    previous,
                    current,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(timestamp: i64, close: f64) -> OhlcvCandle {
        OhlcvCandle::new(timestamp, close, close + 1.0, close - 1.0, close, 10.0)
    }

    #[test]
    fn test_roc_period_mapping() {
        assert_eq!(TimeRange::Days7.roc_period(), 7);
        assert_eq!(TimeRange::Days30.roc_period(), 20);
        assert_eq!(TimeRange::Days60.roc_period(), 30);
        assert_eq!(TimeRange::Days90.roc_period(), 45);
        assert_eq!(TimeRange::All.roc_period(), 90);
    }

    #[test]
    fn test_time_range_serde_names() {
        let range: TimeRange = serde_json::from_str("\"90d\"").unwrap();
        assert_eq!(range, TimeRange::Days90);
        assert_eq!(serde_json::to_string(&TimeRange::All).unwrap(), "\"all\"");
    }

    #[test]
    fn test_timestamp_units() {
        let secs = timestamp_to_datetime(1_700_000_000);
        let millis = timestamp_to_datetime(1_700_000_000_000);
        assert_eq!(secs, millis);
    }

    #[test]
    fn test_timestamp_extremes_do_not_panic() {
        assert_eq!(timestamp_to_datetime(i64::MIN), DateTime::<Utc>::default());
        assert_eq!(timestamp_to_datetime(i64::MAX), DateTime::<Utc>::default());
        let candle = OhlcvCandle::new(i64::MIN, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(candle.datetime(), DateTime::<Utc>::default());
    }

    #[test]
    fn test_validate_series_ok() {
        let candles = vec![candle(1, 10.0), candle(2, 11.0), candle(3, 12.0)];
        assert!(validate_series(&candles).is_ok());
        assert!(validate_series::<OhlcvCandle>(&[]).is_ok());
    }

    #[test]
    fn test_validate_series_rejects_duplicate_timestamp() {
        let candles = vec![candle(1, 10.0), candle(2, 11.0), candle(2, 12.0)];
        match validate_series(&candles) {
            Err(EngineError::NonMonotonicTimestamp { index, .. }) => assert_eq!(index, 2),
            other => panic!("타임스탬프 오류가 발생해야 함: {:?}", other),
        }
    }

    #[test]
    fn test_validate_series_rejects_nan() {
        let mut bad = candle(2, 11.0);
        bad.high = f64::NAN;
        let candles = vec![candle(1, 10.0), bad];
        match validate_series(&candles) {
            Err(EngineError::NonFiniteValue { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "high");
            }
            other => panic!("유한값 오류가 발생해야 함: {:?}", other),
        }
    }

    #[test]
    fn test_validate_series_rejects_negative_volume() {
        let mut bad = candle(1, 10.0);
        bad.volume = -1.0;
        assert!(matches!(
            validate_series(&[bad]),
            Err(EngineError::NegativeVolume { index: 0 })
        ));
    }
}
