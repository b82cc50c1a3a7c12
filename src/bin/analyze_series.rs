use log::{debug, error, info, warn};
use market_indicators::analyzer::{CorrelationAnalyzer, CycleAnalyzer};
use market_indicators::config_loader::{ConfigFormat, ConfigLoader};
use market_indicators::indicator::config::EngineConfig;
use market_indicators::indicator::engine::IndicatorEngine;
use market_indicators::model::OhlcvCandle;
use serde_json::json;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// 사용법 안내 문구 (argv가 비어 있으면 기본 실행 파일 이름 사용)
fn usage(args: &[String]) -> String {
    let program = args.first().map(String::as_str).unwrap_or("analyze_series");
    format!("사용법: {} <캔들_JSON_파일> [설정_파일_경로]", program)
}

fn main() -> ExitCode {
    // 로그 초기화
    env_logger::init();

    info!("시계열 분석기 시작");

    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    if args.len() < 2 {
        error!("인수가 충분하지 않습니다. 캔들 파일 경로가 필요합니다.");
        println!("{}", usage(&args));
        return ExitCode::FAILURE;
    }

    let candles_path = PathBuf::from(&args[1]);
    let content = match fs::read_to_string(&candles_path) {
        Ok(content) => content,
        Err(e) => {
            error!("캔들 파일 읽기 실패: {} - {}", candles_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let candles: Vec<OhlcvCandle> = match serde_json::from_str(&content) {
        Ok(candles) => candles,
        Err(e) => {
            error!("캔들 JSON 파싱 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("캔들 {}개 로드 완료", candles.len());

    // 설정 파일 (지정되지 않은 경우 기본 설정 사용)
    let config = if args.len() >= 3 {
        let config_path = PathBuf::from(&args[2]);
        debug!("사용자 지정 설정 파일 사용: {}", config_path.display());
        match ConfigLoader::load_from_file::<EngineConfig>(&config_path, ConfigFormat::Auto) {
            Ok(config) => config,
            Err(e) => {
                error!("설정 파일 로드 실패: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        debug!("기본 설정 사용");
        EngineConfig::default()
    };

    let engine = match IndicatorEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("엔진 생성 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let points = match engine.compute(&candles) {
        Ok(points) => points,
        Err(e) => {
            error!("지표 계산 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let cycles = match CycleAnalyzer::default().analyze(&candles) {
        Ok(cycles) => cycles,
        Err(e) => {
            error!("사이클 분석 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let correlation = CorrelationAnalyzer::new();
    let price_volume = correlation
        .price_volume(&candles)
        .inspect_err(|e| warn!("가격-거래량 상관관계 계산 실패: {}", e))
        .ok()
        .flatten();
    let price_obv = correlation
        .price_obv(&candles, &points)
        .inspect_err(|e| warn!("가격-OBV 상관관계 계산 실패: {}", e))
        .ok()
        .flatten();

    let report = json!({
        "indicators": points.last().map(|p| p.snapshot()).unwrap_or_default(),
        "cycles": cycles,
        "correlation": {
            "priceVolume": price_volume,
            "priceObv": price_obv,
        },
    });

    match serde_json::to_string_pretty(&report) {
        Ok(output) => {
            println!("{}", output);
            info!("분석 완료");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("결과 직렬화 실패: {}", e);
            ExitCode::FAILURE
        }
    }
}
