use crate::error::EngineResult;
use crate::indicator::closes;
use crate::indicator::series_math;
use crate::model::{Candle, validate_series};
use log::debug;
use serde::Serialize;
use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// 분석에 필요한 최소 데이터 수
pub const MIN_POINTS: usize = 8;
/// 반환하는 최대 사이클 수
pub const MAX_PEAKS: usize = 5;
/// 투영과 강도 계산에 쓰는 상위 사이클 수
pub const PROJECTED_CYCLES: usize = 3;
/// 최소 사이클 주기 (봉)
const MIN_PERIOD: f64 = 3.0;
/// 이 값 이하의 상대 강도는 잡음으로 간주
const MIN_STRENGTH: f64 = 0.1;
/// 투영 진폭 축소 계수
const PROJECTION_SCALE: f64 = 0.01;

/// 스펙트럼에서 찾은 주기 성분
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CyclePeak {
    /// FFT 빈 인덱스
    pub frequency: usize,
    /// 주기 (봉 단위)
    pub period: f64,
    /// 스펙트럼 크기
    pub magnitude: f64,
    /// 가장 큰 피크 대비 크기 (0-1)
    pub strength: f64,
    /// min(strength * 2, 1)
    pub confidence: f64,
}

/// 사이클 투영 지점
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleProjectionPoint {
    pub timestamp: i64,
    pub value: f64,
    /// 순위 기준 사이클 번호 (0이 가장 강한 사이클)
    pub cycle_id: usize,
}

/// 사이클 분석 결과 묶음
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleAnalysis {
    pub peaks: Vec<CyclePeak>,
    pub projections: Vec<CycleProjectionPoint>,
    /// 상위 사이클 평균 강도 (0-100)
    pub cycle_strength: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    fn norm(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, other: Complex) -> Complex {
        Complex::new(self.re - other.re, self.im - other.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }
}

/// 제자리 radix-2 FFT (반복형 Cooley-Tukey)
///
/// 버퍼 길이는 2의 거듭제곱이어야 합니다.
fn fft(buffer: &mut [Complex]) {
    let n = buffer.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());

    // 비트 역순 재배치
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buffer.swap(i, j);
        }
    }

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let angle = -2.0 * PI / size as f64;
        for start in (0..n).step_by(size) {
            for k in 0..half {
                let twiddle = Complex::new((angle * k as f64).cos(), (angle * k as f64).sin());
                let even = buffer[start + k];
                let odd = buffer[start + k + half] * twiddle;
                buffer[start + k] = even + odd;
                buffer[start + k + half] = even - odd;
            }
        }
        size *= 2;
    }
}

/// 실수 시계열의 크기 스펙트럼
///
/// 평균을 뺀 뒤 다음 2의 거듭제곱 길이까지 0으로 채워 FFT를 수행하고,
/// 빈 `0..=N/2`의 크기를 반환합니다. 패딩 경계에 가격 수준의 계단이 생기지 않아야
/// 합니다.
///
/// # Returns
/// * `(usize, Vec<f64>)` - 패딩된 길이 N과 크기 배열
fn magnitude_spectrum(prices: &[f64]) -> (usize, Vec<f64>) {
    let n = prices.len().next_power_of_two();
    let level = series_math::mean(prices).unwrap_or(0.0);
    let mut buffer: Vec<Complex> = prices
        .iter()
        .map(|&p| Complex::new(p - level, 0.0))
        .chain(std::iter::repeat(Complex::default()))
        .take(n)
        .collect();
    fft(&mut buffer);
    let magnitudes = buffer[..=n / 2].iter().map(Complex::norm).collect();
    (n, magnitudes)
}

/// 가격 시계열의 지배적 주기 탐지
///
/// 양쪽 이웃보다 크기가 큰 빈을 피크로 보고, 주기가 `[3, N/2]` 범위이면서
/// 상대 강도가 0.1을 넘는 것만 크기 내림차순으로 최대 5개 반환합니다.
///
/// # Arguments
/// * `prices` - 가격 배열
///
/// # Returns
/// * `Vec<CyclePeak>` - 8개 미만의 입력이나 피크가 없으면 빈 목록
pub fn analyze_cycles(prices: &[f64]) -> Vec<CyclePeak> {
    if prices.len() < MIN_POINTS || prices.iter().any(|p| !p.is_finite()) {
        return Vec::new();
    }

    let (n, magnitudes) = magnitude_spectrum(prices);
    let half = n / 2;

    let candidates: Vec<(usize, f64)> = (1..half)
        .filter(|&k| magnitudes[k] > magnitudes[k - 1] && magnitudes[k] > magnitudes[k + 1])
        .map(|k| (k, magnitudes[k]))
        .collect();

    let max_magnitude = candidates.iter().map(|&(_, m)| m).fold(0.0, f64::max);
    if max_magnitude <= 0.0 {
        return Vec::new();
    }

    let mut peaks: Vec<CyclePeak> = candidates
        .into_iter()
        .map(|(k, magnitude)| {
            let strength = magnitude / max_magnitude;
            CyclePeak {
                frequency: k,
                period: n as f64 / k as f64,
                magnitude,
                strength,
                confidence: (strength * 2.0).min(1.0),
            }
        })
        .filter(|peak| {
            peak.period >= MIN_PERIOD
                && peak.period <= half as f64
                && peak.strength > MIN_STRENGTH
        })
        .collect();

    peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    peaks.truncate(MAX_PEAKS);
    peaks
}

/// 상위 사이클을 미래로 연장한 시각화용 투영
///
/// `value = magnitude * 0.01 * sin(phase + i * 2π / period)`이며, 위상은 현재
/// 시계열 길이를 주기로 나눈 나머지에서 구합니다. 통계적 예측이 아니라
/// 차트 표시용 휴리스틱입니다.
///
/// # Arguments
/// * `peaks` - 순위순 사이클 목록 (상위 3개만 사용)
/// * `series_len` - 분석한 시계열 길이
/// * `last_timestamp` - 마지막 봉의 타임스탬프
/// * `bar_interval` - 봉 간격 (타임스탬프 단위)
/// * `projection_length` - 사이클당 투영할 봉 수
pub fn project_cycles(
    peaks: &[CyclePeak],
    series_len: usize,
    last_timestamp: i64,
    bar_interval: i64,
    projection_length: usize,
) -> Vec<CycleProjectionPoint> {
    peaks
        .iter()
        .take(PROJECTED_CYCLES)
        .enumerate()
        .flat_map(|(cycle_id, peak)| {
            let step = 2.0 * PI / peak.period;
            let phase = step * (series_len as f64 % peak.period);
            (1..=projection_length).map(move |i| CycleProjectionPoint {
                timestamp: last_timestamp + i as i64 * bar_interval,
                value: peak.magnitude * PROJECTION_SCALE * (phase + i as f64 * step).sin(),
                cycle_id,
            })
        })
        .collect()
}

/// 상위 3개 사이클의 평균 강도를 0-100 정수로
pub fn cycle_strength(peaks: &[CyclePeak]) -> u32 {
    let top: Vec<f64> = peaks
        .iter()
        .take(PROJECTED_CYCLES)
        .map(|p| p.strength)
        .collect();
    if top.is_empty() {
        return 0;
    }
    let average = top.iter().sum::<f64>() / top.len() as f64;
    (average * 100.0).round().clamp(0.0, 100.0) as u32
}

/// 캔들 시계열 사이클 분석기
#[derive(Debug, Clone, Copy)]
pub struct CycleAnalyzer {
    /// 사이클당 투영할 봉 수
    pub projection_length: usize,
}

impl Default for CycleAnalyzer {
    fn default() -> Self {
        CycleAnalyzer {
            projection_length: 30,
        }
    }
}

impl CycleAnalyzer {
    pub fn new(projection_length: usize) -> Self {
        CycleAnalyzer { projection_length }
    }

    /// 종가 기준 사이클 분석
    ///
    /// 봉 간격은 마지막 두 봉의 타임스탬프 차이로 추정합니다.
    ///
    /// # Returns
    /// * `EngineResult<CycleAnalysis>` - 입력이 전제 조건을 어기면 오류
    pub fn analyze<C: Candle>(&self, candles: &[C]) -> EngineResult<CycleAnalysis> {
        validate_series(candles)?;

        let peaks = analyze_cycles(&closes(candles));
        let (last_timestamp, bar_interval) = match candles {
            [.., previous, last] => (last.timestamp(), last.timestamp() - previous.timestamp()),
            [last] => (last.timestamp(), 0),
            [] => (0, 0),
        };
        let projections = project_cycles(
            &peaks,
            candles.len(),
            last_timestamp,
            bar_interval,
            self.projection_length,
        );
        let strength = cycle_strength(&peaks);

        debug!(
            "사이클 분석 완료: 피크 {}개, 강도 {}",
            peaks.len(),
            strength
        );

        Ok(CycleAnalysis {
            peaks,
            projections,
            cycle_strength: strength,
        })
    }
}
