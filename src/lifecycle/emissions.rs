use serde::{Deserialize, Serialize};

/// 표시할 배출량 집계 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionBasis {
    /// 1년 배출량
    Annual,
    /// 연간 배출량 × 사업 기간
    Lifetime,
}

impl EmissionBasis {
    /// 결과 표에 붙일 짧은 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            EmissionBasis::Annual => "annual",
            EmissionBasis::Lifetime => "lifetime",
        }
    }
}

/// 연차별 배출량 항목.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyEmissionEntry {
    pub year: u32,
    /// 해당 연도 배출량 [kg CO2e]
    pub emissions: f64,
}

/// 연간 배출량 = 연간 에너지 × 배출계수.
pub fn total_emissions(annual_energy_kwh: f64, emission_factor: f64) -> f64 {
    annual_energy_kwh * emission_factor
}

/// 수명주기 배출량. 배출계수는 연도별로 복리 적용하지 않는다.
pub fn lifetime_emissions(
    annual_energy_kwh: f64,
    emission_factor: f64,
    project_lifetime_years: u32,
) -> f64 {
    total_emissions(annual_energy_kwh, emission_factor) * f64::from(project_lifetime_years)
}

/// 연차별 배출량 시계열(매년 동일).
pub fn yearly_emissions(
    annual_energy_kwh: f64,
    emission_factor: f64,
    project_lifetime_years: u32,
) -> Vec<YearlyEmissionEntry> {
    let annual = total_emissions(annual_energy_kwh, emission_factor);
    (1..=project_lifetime_years)
        .map(|year| YearlyEmissionEntry {
            year,
            emissions: annual,
        })
        .collect()
}
