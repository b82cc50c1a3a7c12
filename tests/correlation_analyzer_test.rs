mod common_test_utils;
use common_test_utils::*;

use market_indicators::analyzer::CorrelationAnalyzer;
use market_indicators::error::EngineError;
use market_indicators::indicator::engine::IndicatorEngine;

#[test]
fn test_price_obv_in_uptrend() {
    // 종가가 매번 오르면 OBV도 선형 증가
    let candles = create_linear_candles(40, 100.0);
    let points = IndicatorEngine::default().compute(&candles).unwrap();
    let r = CorrelationAnalyzer::new()
        .price_obv(&candles, &points)
        .unwrap()
        .unwrap();
    assert!((r - 1.0).abs() < 1e-9);
}

#[test]
fn test_price_volume_constant_volume_is_undefined() {
    let candles = create_uptrend_candles(30, 100.0, 1.0);
    assert_eq!(CorrelationAnalyzer::new().price_volume(&candles).unwrap(), None);
}

#[test]
fn test_price_volume_relationship() {
    let mut candles = create_sideways_candles(40, 100.0, 8.0);
    for candle in &mut candles {
        candle.volume = candle.close * 10.0;
    }
    let r = CorrelationAnalyzer::new()
        .price_volume(&candles)
        .unwrap()
        .unwrap();
    assert!((r - 1.0).abs() < 1e-9);
}

#[test]
fn test_price_series_with_gaps() {
    let candles = create_downtrend_candles(10, 200.0, 3.0);
    // 일부 지점에 값이 없는 외부 시계열 (예: 월간 통화량)
    let other: Vec<Option<f64>> = (0..10)
        .map(|i| if i % 3 == 0 { Some(1000.0 + i as f64) } else { None })
        .collect();
    let r = CorrelationAnalyzer::new()
        .price_series(&candles, &other)
        .unwrap()
        .unwrap();
    assert!((r + 1.0).abs() < 1e-9);
}

#[test]
fn test_price_series_length_mismatch() {
    let candles = create_linear_candles(10, 100.0);
    let other = vec![Some(1.0); 9];
    assert!(matches!(
        CorrelationAnalyzer::new().price_series(&candles, &other),
        Err(EngineError::LengthMismatch { left: 10, right: 9 })
    ));
}
