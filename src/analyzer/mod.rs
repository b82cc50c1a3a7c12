// 고차 분석기 모듈
pub mod correlation_analyzer;
pub mod cycle_analyzer;

pub use correlation_analyzer::CorrelationAnalyzer;
pub use cycle_analyzer::{CycleAnalysis, CycleAnalyzer, CyclePeak, CycleProjectionPoint};
