//! 시계열 공통 수치 연산
//!
//! 모든 함수는 상태가 없는 순수 함수이며, 데이터가 부족하거나 길이가 맞지 않으면
//! 패닉 대신 `None`을 반환합니다.

/// 유한한 값만 통과시키는 가드
///
/// 지표 계산 결과가 NaN/무한대가 되면 호출자에게 노출하지 않고 `None`으로 바꿉니다.
pub fn finite(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}

/// `index`에서 끝나는 길이 `period`의 구간
///
/// # Returns
/// * `Option<&[f64]>` - `index + 1 < period`이거나 범위를 벗어나면 `None`
pub fn window(series: &[f64], period: usize, index: usize) -> Option<&[f64]> {
    if period == 0 || index >= series.len() || index + 1 < period {
        return None;
    }
    Some(&series[index + 1 - period..=index])
}

/// 산술 평균 (빈 입력은 `None`)
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    finite(values.iter().sum::<f64>() / values.len() as f64)
}

/// 단순이동평균 한 지점
///
/// # Arguments
/// * `series` - 값 배열
/// * `period` - 계산 기간
/// * `index` - 구간의 마지막 인덱스 (포함)
///
/// # Returns
/// * `Option<f64>` - `index + 1 < period`면 `None`
pub fn rolling_mean(series: &[f64], period: usize, index: usize) -> Option<f64> {
    window(series, period, index).and_then(mean)
}

/// 모든 인덱스에 대한 단순이동평균
pub fn sma(series: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..series.len())
        .map(|index| rolling_mean(series, period, index))
        .collect()
}

/// 지수이동평균(EMA) 평활 계수 `2 / (period + 1)`
pub fn ema_alpha(period: usize) -> f64 {
    2.0 / (period.max(1) + 1) as f64
}

/// EMA 누적 상태
///
/// 첫 입력값을 그대로 시드로 사용합니다. SMA 시드를 쓰는 교과서식 EMA와 달리
/// 초기 값들이 첫 관측치 쪽으로 치우치지만, 기존 차트와 같은 값을 내기 위해
/// 이 정책을 유지합니다.
#[derive(Debug, Clone, Copy)]
pub struct EmaState {
    alpha: f64,
    value: Option<f64>,
}

impl EmaState {
    pub fn new(period: usize) -> Self {
        EmaState {
            alpha: ema_alpha(period),
            value: None,
        }
    }

    /// 새 값을 반영한 EMA
    pub fn next(&mut self, input: f64) -> f64 {
        let next = match self.value {
            None => input,
            Some(previous) => input * self.alpha + previous * (1.0 - self.alpha),
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// 전체 시계열의 EMA
///
/// 출력 길이는 입력 길이와 같고 `out[0] == series[0]`입니다.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    let mut state = EmaState::new(period);
    series.iter().map(|&value| state.next(value)).collect()
}

/// 와일더 평활 상태 (alpha = 1/period)
///
/// 처음 `period`개 값의 평균으로 시드하고, 이후에는
/// `s = s + (x - s) / period`로 갱신합니다.
#[derive(Debug, Clone, Copy)]
pub struct WilderState {
    period: usize,
    count: usize,
    sum: f64,
    value: Option<f64>,
}

impl WilderState {
    pub fn new(period: usize) -> Self {
        WilderState {
            period: period.max(1),
            count: 0,
            sum: 0.0,
            value: None,
        }
    }

    /// 새 값을 반영한 평활값 (시드가 채워지기 전에는 `None`)
    pub fn next(&mut self, input: f64) -> Option<f64> {
        match self.value {
            Some(previous) => {
                self.value = Some(previous + (input - previous) / self.period as f64);
            }
            None => {
                self.count += 1;
                self.sum += input;
                if self.count == self.period {
                    self.value = Some(self.sum / self.period as f64);
                }
            }
        }
        self.value
    }

    pub fn reset(&mut self) {
        *self = WilderState::new(self.period);
    }
}

/// 모집단 표준편차
///
/// # Returns
/// * `Option<f64>` - 값이 2개 미만이면 `None`
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    finite(variance.sqrt())
}

/// 모집단 공분산
///
/// # Returns
/// * `Option<f64>` - 길이가 다르거나 2 미만이면 `None`
pub fn covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let sum = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>();
    finite(sum / xs.len() as f64)
}

/// 피어슨 상관계수
///
/// 어느 한쪽의 분산이 0이면 정의되지 않으므로 `None`을 반환합니다.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let cov = covariance(xs, ys)?;
    let sx = std_dev(xs)?;
    let sy = std_dev(ys)?;
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    finite(cov / (sx * sy)).map(|r| r.clamp(-1.0, 1.0))
}

/// 평균 절대 편차
pub fn mean_abs_deviation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    finite(values.iter().map(|v| (v - avg).abs()).sum::<f64>() / values.len() as f64)
}

/// 최대값 (빈 입력은 `None`)
pub fn highest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// 최소값 (빈 입력은 `None`)
pub fn lowest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}
