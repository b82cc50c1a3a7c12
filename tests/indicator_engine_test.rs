mod common_test_utils;
use common_test_utils::*;

use market_indicators::config_loader::{ConfigFormat, ConfigLoader};
use market_indicators::error::EngineError;
use market_indicators::indicator::config::{EngineConfig, VwapSession};
use market_indicators::indicator::engine::IndicatorEngine;
use market_indicators::model::TimeRange;
use tempfile::TempDir;

const EPSILON: f64 = 1e-9;

#[test]
fn test_linear_series_scenario() {
    // 종가 100..129
    let candles = create_linear_candles(30, 100.0);
    let points = IndicatorEngine::default().compute(&candles).unwrap();
    let last = &points[29];

    assert!((last.sma20.unwrap() - 119.5).abs() < EPSILON);
    assert_eq!(last.rsi, Some(100.0));
    // 기본 30일 구간 → ROC 기간 20
    let roc = last.roc.unwrap();
    assert!((roc - 100.0 * 20.0 / 109.0).abs() < EPSILON);
    assert!((roc - 18.35).abs() < 0.01);
    assert!(last.sma50.is_none());
    assert!(points[18].sma20.is_none());
    assert!(points[19].sma20.is_some());
}

#[test]
fn test_flat_series_scenario() {
    let candles = create_flat_candles(60, 50.0);
    let points = IndicatorEngine::default().compute(&candles).unwrap();

    for point in &points {
        for (name, value) in point.fields() {
            if let Some(v) = value {
                assert!(v.is_finite(), "{} is not finite", name);
            }
        }
        assert!(point.z_score.is_none());
    }

    let last = points.last().unwrap();
    assert_eq!(last.bb_upper, Some(50.0));
    assert_eq!(last.bb_lower, Some(50.0));
    assert_eq!(last.rsi, Some(50.0));
    assert_eq!(last.stoch_k, Some(50.0));
    assert_eq!(last.cci, Some(0.0));
    assert_eq!(last.williams_r, Some(-50.0));
    assert_eq!(last.adx, Some(0.0));
    assert_eq!(last.macd_histogram, Some(0.0));
    assert_eq!(last.vwap, Some(50.0));
    assert_eq!(last.vwap_upper3, Some(50.0));
    assert_eq!(last.obv, Some(0.0));
}

#[test]
fn test_oscillators_stay_in_range() {
    let mut candles = create_uptrend_candles(80, 100.0, 1.5);
    let tail = create_downtrend_candles(80, 220.0, 2.0);
    candles.extend(tail.into_iter().map(|mut c| {
        c.timestamp += 80 * DAY;
        c
    }));
    candles.extend(
        create_sideways_candles(80, 60.0, 8.0)
            .into_iter()
            .map(|mut c| {
                c.timestamp += 160 * DAY;
                c
            }),
    );

    let points = IndicatorEngine::default().compute(&candles).unwrap();
    assert_eq!(points.len(), 240);

    for point in &points {
        if let Some(rsi) = point.rsi {
            assert!((0.0..=100.0).contains(&rsi));
        }
        if let Some(k) = point.stoch_k {
            assert!((0.0..=100.0).contains(&k));
        }
        if let Some(d) = point.stoch_d {
            assert!((0.0..=100.0).contains(&d));
        }
        if let Some(w) = point.williams_r {
            assert!((-100.0..=0.0).contains(&w));
        }
        if let Some(adx) = point.adx {
            assert!((0.0..=100.0).contains(&adx));
        }
        if let (Some(upper), Some(lower)) = (point.bb_upper, point.bb_lower) {
            assert!(upper >= lower);
        }
        if let (Some(vwap), Some(u1), Some(u2), Some(l1)) =
            (point.vwap, point.vwap_upper1, point.vwap_upper2, point.vwap_lower1)
        {
            assert!(u2 >= u1 && u1 >= vwap && vwap >= l1);
        }
    }
}

#[test]
fn test_macd_histogram_identity() {
    let candles = create_sine_candles(120, 100.0, 10.0, 17.0);
    let points = IndicatorEngine::default().compute(&candles).unwrap();
    for point in &points {
        let (macd, signal, histogram) = (
            point.macd.unwrap(),
            point.macd_signal.unwrap(),
            point.macd_histogram.unwrap(),
        );
        assert!((histogram - (macd - signal)).abs() < EPSILON);
    }
}

#[test]
fn test_no_lookahead() {
    // 앞부분만으로 계산한 값은 전체로 계산한 같은 지점의 값과 같아야 함
    let candles = create_sine_candles(150, 100.0, 5.0, 23.0);
    let engine = IndicatorEngine::default();
    let full = engine.compute(&candles).unwrap();
    let prefix = engine.compute(&candles[..90]).unwrap();
    for (a, b) in prefix.iter().zip(&full) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_time_range_changes_roc_period() {
    // 전체 구간의 ROC 기간은 90이므로 90봉으로는 값이 나오지 않음
    let candles = create_linear_candles(90, 100.0);
    let config = EngineConfig::default().with_time_range(TimeRange::Days7);
    let engine = IndicatorEngine::new(config).unwrap();
    let points = engine.compute(&candles).unwrap();
    assert!(points[6].roc.is_none());
    assert!(points[7].roc.is_some());

    let all = IndicatorEngine::new(EngineConfig::default().with_time_range(TimeRange::All))
        .unwrap()
        .compute(&candles)
        .unwrap();
    assert!(all.iter().all(|p| p.roc.is_none()));
}

#[test]
fn test_daily_vwap_session_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("engine.toml");
    std::fs::write(&path, "rsi_period = 7\nvwap_session = \"daily\"\n").unwrap();

    let config: EngineConfig = ConfigLoader::load_from_file(&path, ConfigFormat::Auto).unwrap();
    assert_eq!(config.rsi_period, 7);
    assert_eq!(config.vwap_session, VwapSession::Daily);

    let candles = vec![
        TestCandle::flat(0, 10.0, 1.0),
        TestCandle::flat(3_600, 20.0, 1.0),
        TestCandle::flat(DAY, 30.0, 1.0),
    ];
    let points = IndicatorEngine::new(config).unwrap().compute(&candles).unwrap();
    assert_eq!(points[1].vwap, Some(15.0));
    assert_eq!(points[2].vwap, Some(30.0));
}

#[test]
fn test_millisecond_timestamps() {
    let day_ms = DAY * 1_000;
    let base = 1_700_000_000_000 - 1_700_000_000_000 % day_ms;
    let candles = vec![
        TestCandle::flat(base, 10.0, 1.0),
        TestCandle::flat(base + 3_600_000, 20.0, 1.0),
        TestCandle::flat(base + day_ms, 30.0, 1.0),
    ];
    let config = EngineConfig {
        vwap_session: VwapSession::Daily,
        ..EngineConfig::default()
    };
    let points = IndicatorEngine::new(config).unwrap().compute(&candles).unwrap();
    assert_eq!(points[1].vwap, Some(15.0));
    assert_eq!(points[2].vwap, Some(30.0));
}

#[test]
fn test_malformed_input_rejected() {
    let engine = IndicatorEngine::default();

    let mut duplicated = create_linear_candles(5, 100.0);
    duplicated[3].timestamp = duplicated[2].timestamp;
    assert!(matches!(
        engine.compute(&duplicated),
        Err(EngineError::NonMonotonicTimestamp { index: 3, .. })
    ));

    let mut nan = create_linear_candles(5, 100.0);
    nan[2].close = f64::NAN;
    assert!(matches!(
        engine.compute(&nan),
        Err(EngineError::NonFiniteValue { index: 2, .. })
    ));

    let mut negative = create_linear_candles(5, 100.0);
    negative[4].volume = -1.0;
    assert!(matches!(
        engine.compute(&negative),
        Err(EngineError::NegativeVolume { index: 4 })
    ));
}

#[test]
fn test_latest_snapshot_omits_warmup_fields() {
    let candles = create_linear_candles(25, 100.0);
    let snapshot = IndicatorEngine::default().latest_snapshot(&candles).unwrap();
    assert!(snapshot.contains_key("sma20"));
    assert!(snapshot.contains_key("rsi"));
    assert!(!snapshot.contains_key("sma50"));
    assert!(!snapshot.contains_key("sma200"));
    assert!((snapshot["sma20"] - 114.5).abs() < EPSILON);
}
