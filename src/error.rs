use crate::config_loader::ConfigError;

/// 엔진 전제 조건 위반 오류
///
/// 데이터 부족(워밍업)은 오류가 아니라 `None` 값으로 표현됩니다.
/// 여기에는 입력 자체가 잘못되어 계산을 진행할 수 없는 경우만 포함됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 타임스탬프가 엄격하게 증가하지 않음
    NonMonotonicTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },
    /// 가격 또는 거래량이 NaN/무한대
    NonFiniteValue { index: usize, field: &'static str },
    /// 음수 거래량
    NegativeVolume { index: usize },
    /// 짝지어진 시계열의 길이가 다름
    LengthMismatch { left: usize, right: usize },
    /// 잘못된 엔진 설정
    InvalidConfig(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NonMonotonicTimestamp {
                index,
                previous,
                current,
            } => write!(
                f,
                "타임스탬프가 증가하지 않습니다: index={}, 이전={}, 현재={}",
                index, previous, current
            ),
            EngineError::NonFiniteValue { index, field } => {
                write!(f, "유한하지 않은 값: index={}, 필드={}", index, field)
            }
            EngineError::NegativeVolume { index } => {
                write!(f, "음수 거래량: index={}", index)
            }
            EngineError::LengthMismatch { left, right } => {
                write!(f, "시계열 길이 불일치: {} != {}", left, right)
            }
            EngineError::InvalidConfig(msg) => write!(f, "잘못된 엔진 설정: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}

/// 엔진 연산 결과
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::LengthMismatch { left: 3, right: 4 };
        assert_eq!(err.to_string(), "시계열 길이 불일치: 3 != 4");

        let err = EngineError::NegativeVolume { index: 7 };
        assert!(err.to_string().contains("index=7"));
    }

    #[test]
    fn test_from_config_error() {
        let err: EngineError = ConfigError::ValidationError("rsi_period".to_string()).into();
        match err {
            EngineError::InvalidConfig(msg) => assert!(msg.contains("rsi_period")),
            _ => panic!("InvalidConfig로 변환되어야 함"),
        }
    }
}
