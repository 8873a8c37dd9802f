//! 온수 설비 수명주기 비용/배출 계산 모듈 모음.

pub mod comparison;
pub mod emissions;
pub mod energy;
pub mod loan;
pub mod projection;
pub mod scenario;

pub use comparison::*;
pub use emissions::*;
pub use energy::*;
pub use loan::*;
pub use projection::*;
pub use scenario::*;

use thiserror::Error;

/// 계산 엔진이 거부하는 입력을 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    /// 물리적으로 불가능한 파라미터(0 이하 효율, 0 이하 상환기간 등)
    #[error("잘못된 파라미터 {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl LifecycleError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        tracing::warn!(name, value, reason, "rejected parameter");
        LifecycleError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// 0보다 큰 유한값인지 확인한다.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, LifecycleError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LifecycleError::invalid(name, value, "0보다 커야 합니다"))
    }
}
