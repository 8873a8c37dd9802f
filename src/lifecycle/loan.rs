use serde::{Deserialize, Serialize};

use super::{require_positive, LifecycleError};

/// 대출 계산기 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanInputs {
    /// 대출 원금 [통화]
    pub principal: f64,
    /// 연이율(소수, 0.05 = 5 %)
    pub annual_rate: f64,
    /// 상환 기간 [년]
    pub term_years: f64,
}

impl Default for LoanInputs {
    fn default() -> Self {
        Self {
            principal: 10_000.0,
            annual_rate: 0.05,
            term_years: 10.0,
        }
    }
}

/// 대출 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanSummary {
    /// 월 상환액
    pub monthly_payment: f64,
    /// 총 상환액
    pub total_repaid: f64,
    /// 총 이자
    pub total_interest: f64,
}

/// 원리금 균등 상환 월 납입액을 계산한다.
///
/// 이율 0이면 `원금 / 개월 수`, 아니면 `P·r / (1 − (1+r)^-n)` (r = 연이율/12, n = 기간×12).
pub fn monthly_loan_payment(
    principal: f64,
    annual_rate: f64,
    term_years: f64,
) -> Result<f64, LifecycleError> {
    let term_years = require_positive("term_years", term_years)?;
    let months = term_years * 12.0;
    if annual_rate == 0.0 {
        return Ok(principal / months);
    }
    let monthly_rate = annual_rate / 12.0;
    Ok((principal * monthly_rate) / (1.0 - (1.0 + monthly_rate).powf(-months)))
}

/// 월 납입액과 총 상환액/이자를 함께 계산한다.
pub fn loan_summary(input: &LoanInputs) -> Result<LoanSummary, LifecycleError> {
    let monthly_payment = monthly_loan_payment(input.principal, input.annual_rate, input.term_years)?;
    let total_repaid = monthly_payment * input.term_years * 12.0;
    Ok(LoanSummary {
        monthly_payment,
        total_repaid,
        total_interest: total_repaid - input.principal,
    })
}
