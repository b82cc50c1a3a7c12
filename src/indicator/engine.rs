use crate::candle_store::CandleStore;
use crate::config_loader::ConfigValidation;
use crate::error::EngineResult;
use crate::indicator::adx::adx;
use crate::indicator::bband::bollinger_bands;
use crate::indicator::cci::cci;
use crate::indicator::config::EngineConfig;
use crate::indicator::ma::ema::ema;
use crate::indicator::ma::sma::sma;
use crate::indicator::macd::macd;
use crate::indicator::obv::obv;
use crate::indicator::parabolic_sar::parabolic_sar;
use crate::indicator::roc::roc;
use crate::indicator::rsi::rsi;
use crate::indicator::series_math::finite;
use crate::indicator::stochastic::stochastic;
use crate::indicator::vwap::vwap;
use crate::indicator::williams_r::williams_r;
use crate::indicator::zscore::zscore;
use crate::indicator::{closes, highs, lows};
use crate::model::{Candle, validate_series};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 최신 지표값의 평탄한 키-값 표현
///
/// 값이 없는(워밍업 중인) 지표는 키 자체가 빠집니다.
pub type IndicatorSnapshot = BTreeMap<String, f64>;

/// 입력 봉 하나에 대응하는 지표값 묶음
///
/// 데이터가 부족한 지표는 `None`(JSON `null`)이며, 0으로 채우지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPoint {
    pub timestamp: i64,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub ema200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub cci: Option<f64>,
    pub adx: Option<f64>,
    pub obv: Option<f64>,
    pub williams_r: Option<f64>,
    #[serde(rename = "parabolicSAR")]
    pub parabolic_sar: Option<f64>,
    pub vwap: Option<f64>,
    pub vwap_upper1: Option<f64>,
    pub vwap_upper2: Option<f64>,
    pub vwap_upper3: Option<f64>,
    pub vwap_lower1: Option<f64>,
    pub vwap_lower2: Option<f64>,
    pub vwap_lower3: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub z_score: Option<f64>,
    pub roc: Option<f64>,
}

impl IndicatorPoint {
    /// 직렬화 이름과 값의 목록
    pub fn fields(&self) -> [(&'static str, Option<f64>); 28] {
        [
            ("sma20", self.sma20),
            ("sma50", self.sma50),
            ("sma200", self.sma200),
            ("ema20", self.ema20),
            ("ema50", self.ema50),
            ("ema200", self.ema200),
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("macdSignal", self.macd_signal),
            ("macdHistogram", self.macd_histogram),
            ("stochK", self.stoch_k),
            ("stochD", self.stoch_d),
            ("cci", self.cci),
            ("adx", self.adx),
            ("obv", self.obv),
            ("williamsR", self.williams_r),
            ("parabolicSAR", self.parabolic_sar),
            ("vwap", self.vwap),
            ("vwapUpper1", self.vwap_upper1),
            ("vwapUpper2", self.vwap_upper2),
            ("vwapUpper3", self.vwap_upper3),
            ("vwapLower1", self.vwap_lower1),
            ("vwapLower2", self.vwap_lower2),
            ("vwapLower3", self.vwap_lower3),
            ("bbUpper", self.bb_upper),
            ("bbLower", self.bb_lower),
            ("zScore", self.z_score),
            ("roc", self.roc),
        ]
    }

    /// 값이 있는 지표만 모은 스냅샷
    pub fn snapshot(&self) -> IndicatorSnapshot {
        self.fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect()
    }
}

/// 기술적 지표 계산 엔진
///
/// 설정만 보유하므로 복제하거나 여러 스레드에서 공유해도 안전합니다.
/// 호출마다 전체 시계열을 다시 계산합니다.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: EngineConfig,
}

impl IndicatorEngine {
    /// 설정을 검증하고 엔진 생성
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(IndicatorEngine { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 전체 시계열의 지표 계산
    ///
    /// 각 지표 벡터를 한 번씩만 만든 뒤 인덱스별로 묶습니다. 어떤 지점의 값도
    /// 그 지점 이후의 데이터를 사용하지 않습니다.
    ///
    /// # Arguments
    /// * `candles` - 시간 오름차순 캔들 목록
    ///
    /// # Returns
    /// * `EngineResult<Vec<IndicatorPoint>>` - 입력과 같은 길이의 지표 목록,
    ///   입력이 전제 조건을 어기면 오류
    pub fn compute<C: Candle>(&self, candles: &[C]) -> EngineResult<Vec<IndicatorPoint>> {
        validate_series(candles).inspect_err(|e| warn!("지표 계산 입력 거부: {}", e))?;

        if candles.is_empty() {
            return Ok(Vec::new());
        }

        let config = &self.config;
        let closes = closes(candles);
        let highs = highs(candles);
        let lows = lows(candles);

        let sma20 = sma(&closes, 20);
        let sma50 = sma(&closes, 50);
        let sma200 = sma(&closes, 200);
        let ema20 = ema(&closes, 20);
        let ema50 = ema(&closes, 50);
        let ema200 = ema(&closes, 200);
        let rsi = rsi(&closes, config.rsi_period);
        let macd = macd(&closes, &config.macd);
        let stoch = stochastic(&highs, &lows, &closes, &config.stochastic);
        let bbands = bollinger_bands(&closes, &config.bollinger);
        let cci = cci(candles, config.cci_period);
        let adx = adx(candles, config.adx_period);
        let obv = obv(candles);
        let williams = williams_r(&highs, &lows, &closes, config.williams_period);
        let sar = parabolic_sar(candles, &config.parabolic_sar);
        let vwap = vwap(candles, config.vwap_session);
        let zscore = zscore(&closes, config.zscore_period);
        let roc = roc(&closes, config.effective_roc_period());

        let points: Vec<IndicatorPoint> = candles
            .iter()
            .enumerate()
            .map(|(i, candle)| IndicatorPoint {
                timestamp: candle.timestamp(),
                sma20: sma20[i],
                sma50: sma50[i],
                sma200: sma200[i],
                ema20: finite(ema20[i]),
                ema50: finite(ema50[i]),
                ema200: finite(ema200[i]),
                rsi: rsi[i],
                macd: finite(macd.macd_line[i]),
                macd_signal: finite(macd.signal_line[i]),
                macd_histogram: finite(macd.histogram[i]),
                stoch_k: stoch.k[i],
                stoch_d: stoch.d[i],
                cci: cci[i],
                adx: adx[i].adx,
                obv: finite(obv[i]),
                williams_r: williams[i],
                parabolic_sar: sar[i],
                vwap: vwap[i].vwap,
                vwap_upper1: vwap[i].upper[0],
                vwap_upper2: vwap[i].upper[1],
                vwap_upper3: vwap[i].upper[2],
                vwap_lower1: vwap[i].lower[0],
                vwap_lower2: vwap[i].lower[1],
                vwap_lower3: vwap[i].lower[2],
                bb_upper: bbands[i].map(|b| b.upper),
                bb_lower: bbands[i].map(|b| b.lower),
                z_score: zscore[i],
                roc: roc[i],
            })
            .collect();

        debug!(
            "지표 계산 완료: {}개 봉, ROC 기간 {}",
            points.len(),
            config.effective_roc_period()
        );
        Ok(points)
    }

    /// 캔들 저장소 전체에 대한 지표 계산
    pub fn compute_store<C: Candle>(
        &self,
        store: &CandleStore<C>,
    ) -> EngineResult<Vec<IndicatorPoint>> {
        self.compute(store.items())
    }

    /// 마지막 봉의 지표 스냅샷
    ///
    /// 빈 입력이면 빈 맵을 반환합니다.
    pub fn latest_snapshot<C: Candle>(&self, candles: &[C]) -> EngineResult<IndicatorSnapshot> {
        let points = self.compute(candles)?;
        Ok(points.last().map(IndicatorPoint::snapshot).unwrap_or_default())
    }
}
