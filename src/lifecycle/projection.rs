use serde::Serialize;

use super::{require_positive, LifecycleError};

/// 연차별 운전비 항목.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyCostEntry {
    /// 연차(1부터 시작)
    pub year: u32,
    /// 해당 연도 운전비 [통화]
    pub cost: f64,
}

/// 연료 단가 상승을 반영한 연차별 운전비와 합계를 계산한다.
///
/// 1년차는 상승 전 단가를 쓰고, 각 연도 비용을 기록한 뒤 단가를 `(1 + escalation_rate)`배 한다.
/// 음수 상승률(가격 하락)도 그대로 허용한다.
pub fn project_running_costs(
    annual_energy_kwh: f64,
    efficiency: f64,
    fuel_unit_price: f64,
    escalation_rate: f64,
    project_lifetime_years: u32,
) -> Result<(Vec<YearlyCostEntry>, f64), LifecycleError> {
    let efficiency = require_positive("efficiency", efficiency)?;
    let input_energy = annual_energy_kwh / efficiency;
    let mut yearly = Vec::with_capacity(project_lifetime_years as usize);
    let mut total = 0.0;
    let mut current_price = fuel_unit_price;
    for year in 1..=project_lifetime_years {
        let cost = input_energy * current_price;
        yearly.push(YearlyCostEntry { year, cost });
        total += cost;
        current_price *= 1.0 + escalation_rate;
    }
    Ok((yearly, total))
}

/// 설치비와 운전비 합계를 더한 수명주기 비용.
pub fn total_lifecycle_cost(install_cost: f64, total_running_cost: f64) -> f64 {
    install_cost + total_running_cost
}
