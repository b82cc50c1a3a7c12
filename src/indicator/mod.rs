// 기술적 지표 모듈
// 각 지표는 전체 시계열을 받아 입력과 같은 길이의 결과 벡터를 돌려줍니다.

pub mod adx;
pub mod bband;
pub mod cci;
pub mod config;
pub mod engine;
pub mod ma;
pub mod macd;
pub mod obv;
pub mod parabolic_sar;
pub mod roc;
pub mod rsi;
pub mod series_math;
pub mod stochastic;
pub mod vwap;
pub mod williams_r;
pub mod zscore;

use crate::model::Candle;
use std::fmt::Debug;

/// 상태를 가진 기술적 지표 인터페이스
///
/// 이전 봉의 상태(추세, 가속 계수, 누적 합 등)를 다음 봉으로 넘겨야 하는 지표는
/// 이 트레이트로 구현합니다. 배치 계산은 `build`로 전체 시계열을 한 번 순회하고,
/// 실시간 갱신이 필요하면 `next`에 봉을 하나씩 넣으면 됩니다.
pub trait TABuilder<T, C: Candle>: Send + Debug {
    /// 새 캔들 하나로 상태를 갱신하고 해당 봉의 지표값 반환
    ///
    /// # Arguments
    /// * `data` - 새 캔들 데이터
    ///
    /// # Returns
    /// * `T` - 해당 봉의 지표값
    fn next(&mut self, data: &C) -> T;

    /// 누적 상태 초기화
    fn reset(&mut self);

    /// 전체 시계열에서 지표 생성
    ///
    /// 상태를 초기화한 뒤 모든 캔들을 순서대로 반영합니다.
    ///
    /// # Arguments
    /// * `data` - 시간 오름차순 캔들 목록
    ///
    /// # Returns
    /// * `Vec<T>` - 입력과 같은 길이의 지표값 목록
    fn build(&mut self, data: &[C]) -> Vec<T> {
        self.reset();
        data.iter().map(|item| self.next(item)).collect()
    }
}

/// 캔들 목록에서 종가 배열 추출
pub fn closes<C: Candle>(data: &[C]) -> Vec<f64> {
    data.iter().map(|c| c.close_price()).collect()
}

/// 캔들 목록에서 고가 배열 추출
pub fn highs<C: Candle>(data: &[C]) -> Vec<f64> {
    data.iter().map(|c| c.high_price()).collect()
}

/// 캔들 목록에서 저가 배열 추출
pub fn lows<C: Candle>(data: &[C]) -> Vec<f64> {
    data.iter().map(|c| c.low_price()).collect()
}

/// 캔들 목록에서 거래량 배열 추출
pub fn volumes<C: Candle>(data: &[C]) -> Vec<f64> {
    data.iter().map(|c| c.volume()).collect()
}
