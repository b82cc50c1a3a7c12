use crate::indicator::TABuilder;
use crate::indicator::config::SARParams;
use crate::indicator::series_math::finite;
use crate::model::Candle;
use std::marker::PhantomData;

/// 추세 상태
#[derive(Clone, Copy, Debug, PartialEq)]
struct SARState {
    is_long: bool,
    sar: f64,
    /// 현재 추세의 극값 (롱이면 최고가, 숏이면 최저가)
    extreme: f64,
    acceleration: f64,
}

/// 파라볼릭 SAR 빌더
///
/// 각 SAR은 직전 SAR, 추세 방향, 가속 계수에 의존하므로 반드시 순서대로 계산합니다.
/// 첫 봉에서 롱 추세(SAR = 저가, 극값 = 고가)로 시드하고, 값은 두 번째 봉부터 나옵니다.
#[derive(Debug)]
pub struct ParabolicSARBuilder<C: Candle> {
    params: SARParams,
    state: Option<SARState>,
    /// 직전 두 봉의 (고가, 저가), 최신이 먼저
    recent: [Option<(f64, f64)>; 2],
    _phantom: PhantomData<C>,
}

impl<C: Candle> ParabolicSARBuilder<C> {
    pub fn new(params: SARParams) -> Self {
        ParabolicSARBuilder {
            params,
            state: None,
            recent: [None, None],
            _phantom: PhantomData,
        }
    }

    /// 현재 롱 추세 여부 (시드 전에는 `None`)
    pub fn is_long(&self) -> Option<bool> {
        self.state.map(|s| s.is_long)
    }

    fn remember(&mut self, high: f64, low: f64) {
        self.recent = [Some((high, low)), self.recent[0]];
    }
}

impl<C: Candle> TABuilder<Option<f64>, C> for ParabolicSARBuilder<C> {
    fn next(&mut self, data: &C) -> Option<f64> {
        let (high, low) = (data.high_price(), data.low_price());

        let Some(prev) = self.state else {
            self.state = Some(SARState {
                is_long: true,
                sar: low,
                extreme: high,
                acceleration: self.params.start,
            });
            self.remember(high, low);
            return None;
        };

        let mut next = prev;
        let mut sar = prev.sar + prev.acceleration * (prev.extreme - prev.sar);
        let recent = self.recent.iter().flatten();

        if prev.is_long {
            // SAR은 직전 두 봉의 저가를 넘을 수 없음
            sar = recent.fold(sar, |acc, &(_, l)| acc.min(l));
            if low < sar {
                next = SARState {
                    is_long: false,
                    sar: prev.extreme,
                    extreme: low,
                    acceleration: self.params.start,
                };
            } else {
                next.sar = sar;
                if high > prev.extreme {
                    next.extreme = high;
                    next.acceleration =
                        (prev.acceleration + self.params.step).min(self.params.max);
                }
            }
        } else {
            sar = recent.fold(sar, |acc, &(h, _)| acc.max(h));
            if high > sar {
                next = SARState {
                    is_long: true,
                    sar: prev.extreme,
                    extreme: high,
                    acceleration: self.params.start,
                };
            } else {
                next.sar = sar;
                if low < prev.extreme {
                    next.extreme = low;
                    next.acceleration =
                        (prev.acceleration + self.params.step).min(self.params.max);
                }
            }
        }

        self.state = Some(next);
        self.remember(high, low);
        finite(next.sar)
    }

    fn reset(&mut self) {
        self.state = None;
        self.recent = [None, None];
    }
}

/// 캔들 목록의 파라볼릭 SAR 시계열
pub fn parabolic_sar<C: Candle>(data: &[C], params: &SARParams) -> Vec<Option<f64>> {
    ParabolicSARBuilder::<C>::new(*params).build(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OhlcvCandle;

    fn bar(i: i64, high: f64, low: f64) -> OhlcvCandle {
        OhlcvCandle::new(i, (high + low) / 2.0, high, low, (high + low) / 2.0, 1.0)
    }

    #[test]
    fn test_sar_uptrend_stays_below_lows() {
        let data: Vec<OhlcvCandle> = (0..30)
            .map(|i| bar(i, 101.0 + i as f64, 99.0 + i as f64))
            .collect();
        let values = parabolic_sar(&data, &SARParams::default());
        assert_eq!(values[0], None);
        for (i, value) in values.iter().enumerate().skip(1) {
            let sar = value.unwrap();
            assert!(sar <= data[i].low, "index {}: sar {} > low {}", i, sar, data[i].low);
        }
        // 상승할수록 SAR도 올라감
        assert!(values[29].unwrap() > values[5].unwrap());
    }

    #[test]
    fn test_sar_acceleration_capped() {
        let mut builder = ParabolicSARBuilder::<OhlcvCandle>::new(SARParams::default());
        let data: Vec<OhlcvCandle> = (0..40)
            .map(|i| bar(i, 101.0 + i as f64, 99.0 + i as f64))
            .collect();
        builder.build(&data);
        let state = builder.state.unwrap();
        assert!(state.is_long);
        assert!((state.acceleration - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_sar_flips_on_reversal() {
        let mut data: Vec<OhlcvCandle> = (0..10)
            .map(|i| bar(i, 101.0 + i as f64, 99.0 + i as f64))
            .collect();
        // 급락
        data.push(bar(10, 95.0, 90.0));
        let mut builder = ParabolicSARBuilder::<OhlcvCandle>::new(SARParams::default());
        let values = builder.build(&data);
        assert_eq!(builder.is_long(), Some(false));
        // 반전 시 SAR은 직전 추세의 최고가
        assert_eq!(values[10], Some(110.0));
    }

    #[test]
    fn test_sar_empty_and_single() {
        assert!(parabolic_sar::<OhlcvCandle>(&[], &SARParams::default()).is_empty());
        assert_eq!(
            parabolic_sar(&[bar(0, 2.0, 1.0)], &SARParams::default()),
            vec![None]
        );
    }
}
