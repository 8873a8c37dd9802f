use serde::{Deserialize, Serialize};

use super::emissions::{lifetime_emissions, total_emissions, yearly_emissions, EmissionBasis, YearlyEmissionEntry};
use super::energy::{compute_required_energy_with, FormulaParams};
use super::projection::{project_running_costs, total_lifecycle_cost, YearlyCostEntry};
use super::LifecycleError;

/// 한 기술에 대한 계산 입력 전체. 매 계산마다 현재 입력으로 새로 만든다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatingScenario {
    /// 1회 가열 온수량(보통 탱크 용량) [L]
    pub demand_volume_litres: f64,
    /// 온도 상승폭 [°C]
    pub temperature_rise_celsius: f64,
    /// 효율(0~1) 또는 히트펌프 COP
    pub efficiency_or_cop: f64,
    /// 연료 단가 [통화/kWh 또는 통화/L]
    pub fuel_unit_price: f64,
    /// 연간 단가 상승률(소수)
    pub price_escalation_rate: f64,
    /// 연간 가열 일수
    pub annual_usage_days: f64,
    /// 사업 기간 [년]
    pub project_lifetime_years: u32,
    /// 배출계수 [kg CO2e / kWh]
    pub emission_factor: f64,
    /// 설치비 [통화]
    pub install_cost: f64,
}

/// 공통 온수 수요 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandInputs {
    /// 온수 수요/탱크 용량 [L]
    pub tank_litres: f64,
    /// 냉수 온도 [°C]
    pub cold_temp_c: f64,
    /// 온수 온도 [°C]
    pub hot_temp_c: f64,
    /// 연간 탱크 가열 일수
    pub heating_days: f64,
    /// 낮 시간 추가 가열이 필요한 일수
    pub topup_days: f64,
    /// 사업 기간 [년]
    pub project_lifetime_years: u32,
}

impl Default for DemandInputs {
    fn default() -> Self {
        Self {
            tank_litres: 400.0,
            cold_temp_c: 10.0,
            hot_temp_c: 65.0,
            heating_days: 270.0,
            topup_days: 20.0,
            project_lifetime_years: 15,
        }
    }
}

impl DemandInputs {
    pub fn temperature_rise(&self) -> f64 {
        self.hot_temp_c - self.cold_temp_c
    }

    /// 정규 가열일과 추가 가열일의 합.
    pub fn annual_usage_days(&self) -> f64 {
        self.heating_days + self.topup_days
    }
}

/// 수명주기 계산 결과. 저장하지 않고 입력이 바뀔 때마다 다시 계산한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleResult {
    /// 연차별 운전비(연도 순)
    pub yearly_costs: Vec<YearlyCostEntry>,
    /// 연차별 배출량(연도 순)
    pub yearly_emissions: Vec<YearlyEmissionEntry>,
    /// 연간 공급 열량 [kWh] (효율 적용 전)
    pub annual_energy_kwh: f64,
    pub install_cost: f64,
    /// 운전비 합계(설치비 제외)
    pub running_cost: f64,
    /// 설치비 + 운전비. 기술 간 순위 비교에 쓴다.
    pub total_cost: f64,
    /// 연간 배출량 [kg CO2e]
    pub annual_emissions: f64,
    /// 수명주기 배출량 [kg CO2e]
    pub lifetime_emissions: f64,
    /// `emission_basis`로 고른 표시용 배출량
    pub total_emissions: f64,
    pub emission_basis: EmissionBasis,
}

/// 시나리오 하나를 계산한다.
///
/// 연간 공급 열량은 효율 1.0으로 구하고, 효율(COP)은 운전비 계산에서 한 번만 나눈다.
/// 배출량은 공급 열량 기준이다.
pub fn evaluate_scenario(
    scenario: &HeatingScenario,
    params: &FormulaParams,
) -> Result<LifecycleResult, LifecycleError> {
    let per_fill_kwh = compute_required_energy_with(
        params,
        scenario.demand_volume_litres,
        scenario.temperature_rise_celsius,
        1.0,
    )?;
    let annual_energy_kwh = per_fill_kwh * scenario.annual_usage_days;
    let (yearly_costs, running_cost) = project_running_costs(
        annual_energy_kwh,
        scenario.efficiency_or_cop,
        scenario.fuel_unit_price,
        scenario.price_escalation_rate,
        scenario.project_lifetime_years,
    )?;
    let annual = total_emissions(annual_energy_kwh, scenario.emission_factor);
    let lifetime = lifetime_emissions(
        annual_energy_kwh,
        scenario.emission_factor,
        scenario.project_lifetime_years,
    );
    let shown = match params.emission_basis {
        EmissionBasis::Annual => annual,
        EmissionBasis::Lifetime => lifetime,
    };
    let total_cost = total_lifecycle_cost(scenario.install_cost, running_cost);
    tracing::debug!(
        annual_energy_kwh,
        running_cost,
        total_cost,
        emissions = shown,
        "scenario evaluated"
    );
    Ok(LifecycleResult {
        yearly_emissions: yearly_emissions(
            annual_energy_kwh,
            scenario.emission_factor,
            scenario.project_lifetime_years,
        ),
        yearly_costs,
        annual_energy_kwh,
        install_cost: scenario.install_cost,
        running_cost,
        total_cost,
        annual_emissions: annual,
        lifetime_emissions: lifetime,
        total_emissions: shown,
        emission_basis: params.emission_basis,
    })
}
