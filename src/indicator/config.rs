use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::model::TimeRange;
use serde::{Deserialize, Serialize};

/// MACD 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MACDParams {
    /// 빠른 EMA 기간
    pub fast: usize,
    /// 느린 EMA 기간
    pub slow: usize,
    /// 시그널 EMA 기간
    pub signal: usize,
}

impl Default for MACDParams {
    fn default() -> Self {
        MACDParams {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// 스토캐스틱 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    /// %K 기간
    pub k_period: usize,
    /// %D 평활 기간
    pub d_period: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        StochasticParams {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// 볼린저밴드 매개변수
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    /// 표준편차 배수
    pub multiplier: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        BollingerParams {
            period: 20,
            multiplier: 2.0,
        }
    }
}

/// 파라볼릭 SAR 가속 계수
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SARParams {
    /// 시작 가속 계수
    pub start: f64,
    /// 새 극값마다 증가하는 양
    pub step: f64,
    /// 가속 계수 상한
    pub max: f64,
}

impl Default for SARParams {
    fn default() -> Self {
        SARParams {
            start: 0.02,
            step: 0.02,
            max: 0.2,
        }
    }
}

/// VWAP 누적 구간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VwapSession {
    /// 시계열 시작부터 누적
    #[default]
    Cumulative,
    /// UTC 날짜가 바뀔 때마다 초기화
    Daily,
}

/// 지표 엔진 설정
///
/// 모든 기간과 배수는 대시보드 기본값으로 채워지며, 설정 파일에서는
/// 바꾸고 싶은 항목만 지정하면 됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rsi_period: usize,
    pub cci_period: usize,
    pub adx_period: usize,
    pub williams_period: usize,
    pub zscore_period: usize,
    /// ROC 기간을 결정하는 표시 구간
    pub time_range: TimeRange,
    /// 지정하면 `time_range` 대신 사용
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc_period: Option<usize>,
    pub vwap_session: VwapSession,
    pub macd: MACDParams,
    pub stochastic: StochasticParams,
    pub bollinger: BollingerParams,
    pub parabolic_sar: SARParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rsi_period: 14,
            cci_period: 20,
            adx_period: 14,
            williams_period: 10,
            zscore_period: 20,
            time_range: TimeRange::default(),
            roc_period: None,
            vwap_session: VwapSession::default(),
            macd: MACDParams::default(),
            stochastic: StochasticParams::default(),
            bollinger: BollingerParams::default(),
            parabolic_sar: SARParams::default(),
        }
    }
}

impl EngineConfig {
    /// 실제로 사용할 ROC 기간
    pub fn effective_roc_period(&self) -> usize {
        self.roc_period
            .unwrap_or_else(|| self.time_range.roc_period())
    }

    /// 표시 구간만 바꾼 설정 복사본
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }
}

fn require_positive(name: &str, value: usize) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{}은(는) 0보다 커야 합니다",
            name
        )));
    }
    Ok(())
}

impl ConfigValidation for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        require_positive("rsi_period", self.rsi_period)?;
        require_positive("cci_period", self.cci_period)?;
        require_positive("adx_period", self.adx_period)?;
        require_positive("williams_period", self.williams_period)?;
        require_positive("zscore_period", self.zscore_period)?;
        require_positive("roc_period", self.effective_roc_period())?;
        require_positive("macd.fast", self.macd.fast)?;
        require_positive("macd.slow", self.macd.slow)?;
        require_positive("macd.signal", self.macd.signal)?;
        require_positive("stochastic.k_period", self.stochastic.k_period)?;
        require_positive("stochastic.d_period", self.stochastic.d_period)?;
        require_positive("bollinger.period", self.bollinger.period)?;

        if self.macd.fast >= self.macd.slow {
            return Err(ConfigError::ValidationError(format!(
                "MACD 빠른 기간({})은 느린 기간({})보다 작아야 합니다",
                self.macd.fast, self.macd.slow
            )));
        }

        if !(self.bollinger.multiplier.is_finite() && self.bollinger.multiplier > 0.0) {
            return Err(ConfigError::ValidationError(
                "볼린저밴드 배수는 0보다 커야 합니다".to_string(),
            ));
        }

        let sar = &self.parabolic_sar;
        if !(sar.start > 0.0 && sar.step > 0.0 && sar.max >= sar.start && sar.max >= sar.step) {
            return Err(ConfigError::ValidationError(format!(
                "잘못된 파라볼릭 SAR 계수: start={}, step={}, max={}",
                sar.start, sar.step, sar.max
            )));
        }

        Ok(())
    }
}
