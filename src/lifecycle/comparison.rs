use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::energy::FormulaParams;
use super::scenario::{evaluate_scenario, DemandInputs, HeatingScenario, LifecycleResult};
use super::LifecycleError;

/// 비교 대상 온수 가열 기술. 선언 순서가 비교 표의 기본 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    LpgBoiler,
    ElectricBoiler,
    HeatPump,
    HydrogenBoiler,
}

impl Technology {
    pub const ALL: [Technology; 4] = [
        Technology::LpgBoiler,
        Technology::ElectricBoiler,
        Technology::HeatPump,
        Technology::HydrogenBoiler,
    ];

    /// 표/CSV에 쓰는 표시 이름.
    pub fn name(&self) -> &'static str {
        match self {
            Technology::LpgBoiler => "LPG Boiler",
            Technology::ElectricBoiler => "Electric Boiler",
            Technology::HeatPump => "Heat Pump",
            Technology::HydrogenBoiler => "Hydrogen Boiler",
        }
    }

    /// 효율 대신 COP로 입력하는 기술인지 여부.
    pub fn uses_cop(&self) -> bool {
        matches!(self, Technology::HeatPump)
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 기술별 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnologyInputs {
    /// 설치비(보조금 반영 후) [통화]
    pub install_cost: f64,
    /// 효율(0~1) 또는 COP
    pub efficiency_or_cop: f64,
    /// 연료 단가
    pub fuel_unit_price: f64,
    /// 연간 단가 상승률(소수, 0.03 = 3 %)
    pub price_escalation_rate: f64,
    /// 배출계수 [kg CO2e / kWh]
    pub emission_factor: f64,
}

impl TechnologyInputs {
    /// 공통 수요와 합쳐 계산용 시나리오를 만든다.
    pub fn scenario(&self, demand: &DemandInputs) -> HeatingScenario {
        HeatingScenario {
            demand_volume_litres: demand.tank_litres,
            temperature_rise_celsius: demand.temperature_rise(),
            efficiency_or_cop: self.efficiency_or_cop,
            fuel_unit_price: self.fuel_unit_price,
            price_escalation_rate: self.price_escalation_rate,
            annual_usage_days: demand.annual_usage_days(),
            project_lifetime_years: demand.project_lifetime_years,
            emission_factor: self.emission_factor,
            install_cost: self.install_cost,
        }
    }
}

/// 최솟값이 여러 개일 때의 선택 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// 삽입 순서상 처음 만난 최솟값
    FirstMinimum,
    /// 삽입 순서상 마지막 최솟값
    LastMinimum,
}

/// 삽입 순서가 있는 맵에서 최솟값 항목을 고른다. NaN은 건너뛴다.
pub fn select_minimum<K>(values: &IndexMap<K, f64>, tie_break: TieBreak) -> Option<(&K, f64)> {
    let mut best: Option<(&K, f64)> = None;
    for (key, &value) in values {
        if value.is_nan() {
            continue;
        }
        let replace = match best {
            None => true,
            Some((_, current)) => match tie_break {
                TieBreak::FirstMinimum => value < current,
                TieBreak::LastMinimum => value <= current,
            },
        };
        if replace {
            best = Some((key, value));
        }
    }
    best
}

/// 값 오름차순으로 정렬한 목록. 동률은 삽입 순서를 유지한다.
pub fn ranked<K: Copy>(values: &IndexMap<K, f64>) -> Vec<(K, f64)> {
    let mut out: Vec<(K, f64)> = values.iter().map(|(k, v)| (*k, *v)).collect();
    out.sort_by(|a, b| a.1.total_cmp(&b.1));
    out
}

/// 여러 기술의 계산 결과 묶음.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub results: IndexMap<Technology, LifecycleResult>,
    pub tie_break: TieBreak,
    pub project_lifetime_years: u32,
}

impl Comparison {
    /// 기술 → 수명주기 비용(설치비 포함).
    pub fn total_costs(&self) -> IndexMap<Technology, f64> {
        self.results
            .iter()
            .map(|(tech, res)| (*tech, res.total_cost))
            .collect()
    }

    /// 기술 → 표시 기준 배출량.
    pub fn total_emissions(&self) -> IndexMap<Technology, f64> {
        self.results
            .iter()
            .map(|(tech, res)| (*tech, res.total_emissions))
            .collect()
    }

    pub fn cheapest(&self) -> Option<(Technology, f64)> {
        select_minimum(&self.total_costs(), self.tie_break).map(|(t, v)| (*t, v))
    }

    pub fn lowest_emission(&self) -> Option<(Technology, f64)> {
        select_minimum(&self.total_emissions(), self.tie_break).map(|(t, v)| (*t, v))
    }

    pub fn ranked_by_cost(&self) -> Vec<(Technology, f64)> {
        ranked(&self.total_costs())
    }

    pub fn ranked_by_emissions(&self) -> Vec<(Technology, f64)> {
        ranked(&self.total_emissions())
    }
}

/// 공통 수요에 대해 입력된 모든 기술을 입력 순서대로 계산한다.
pub fn compare_technologies(
    demand: &DemandInputs,
    technologies: &IndexMap<Technology, TechnologyInputs>,
    params: &FormulaParams,
) -> Result<Comparison, LifecycleError> {
    let mut results = IndexMap::with_capacity(technologies.len());
    for (tech, inputs) in technologies {
        let result = evaluate_scenario(&inputs.scenario(demand), params)?;
        results.insert(*tech, result);
    }
    Ok(Comparison {
        results,
        tie_break: params.tie_break,
        project_lifetime_years: demand.project_lifetime_years,
    })
}
