use serde::{Deserialize, Serialize};

use super::{require_positive, LifecycleError};
use super::comparison::TieBreak;
use super::emissions::EmissionBasis;

/// 물의 비열 [kJ/kg°C]. 물 1 L = 1 kg으로 본다.
pub const SPECIFIC_HEAT_WATER_KJ_PER_KG_C: f64 = 4.186;
/// kJ → kWh 환산 계수.
pub const KJ_TO_KWH: f64 = 1.0 / 3600.0;
/// 영국 LPG 1 L의 에너지 함량 [kWh/L].
pub const LPG_ENERGY_CONTENT_KWH_PER_LITRE: f64 = 7.08;

/// 계산식 버전을 고정하는 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaParams {
    /// 물의 비열 [kJ/kg°C]
    pub specific_heat_kj_per_kg_c: f64,
    /// 최저 비용이 동률일 때의 선택 규칙
    pub tie_break: TieBreak,
    /// 화면에 표시할 배출량 기준(연간/수명주기)
    pub emission_basis: EmissionBasis,
}

impl Default for FormulaParams {
    fn default() -> Self {
        Self {
            specific_heat_kj_per_kg_c: SPECIFIC_HEAT_WATER_KJ_PER_KG_C,
            tie_break: TieBreak::FirstMinimum,
            emission_basis: EmissionBasis::Lifetime,
        }
    }
}

/// 물을 데우는 데 필요한 투입 에너지 [kWh]를 기본 비열(4.186)로 계산한다.
pub fn compute_required_energy(
    volume_litres: f64,
    temp_rise_celsius: f64,
    efficiency: f64,
) -> Result<f64, LifecycleError> {
    compute_required_energy_with(
        &FormulaParams::default(),
        volume_litres,
        temp_rise_celsius,
        efficiency,
    )
}

/// 설정된 비열로 필요한 투입 에너지 [kWh]를 계산한다.
///
/// `energy = V × ΔT × c / 3600 / η`. 효율(COP)이 0 이하면 무한대를 돌려주지 않고 오류를 낸다.
pub fn compute_required_energy_with(
    params: &FormulaParams,
    volume_litres: f64,
    temp_rise_celsius: f64,
    efficiency: f64,
) -> Result<f64, LifecycleError> {
    let efficiency = require_positive("efficiency", efficiency)?;
    let delivered_kwh =
        volume_litres * temp_rise_celsius * params.specific_heat_kj_per_kg_c * KJ_TO_KWH;
    Ok(delivered_kwh / efficiency)
}

/// 연료 에너지 [kWh]를 LPG 부피 [L]로 환산한다.
pub fn lpg_litres_equivalent(energy_kwh: f64) -> f64 {
    energy_kwh / LPG_ENERGY_CONTENT_KWH_PER_LITRE
}

/// 온수 에너지 계산기 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotWaterEnergyReport {
    /// 온수 1 L당 투입 에너지 [kWh]
    pub energy_per_litre_kwh: f64,
    /// 온수 100 L당 투입 에너지 [kWh]
    pub energy_per_100_litres_kwh: f64,
    /// 100 L 가열에 해당하는 LPG 부피 [L]
    pub lpg_litres_per_100_litres: f64,
}

/// 냉수/온수 온도와 보일러 효율로 리터당 에너지를 계산한다.
pub fn hot_water_energy(
    params: &FormulaParams,
    cold_temp_c: f64,
    hot_temp_c: f64,
    efficiency: f64,
) -> Result<HotWaterEnergyReport, LifecycleError> {
    let per_litre = compute_required_energy_with(params, 1.0, hot_temp_c - cold_temp_c, efficiency)?;
    let per_100 = per_litre * 100.0;
    Ok(HotWaterEnergyReport {
        energy_per_litre_kwh: per_litre,
        energy_per_100_litres_kwh: per_100,
        lpg_litres_per_100_litres: lpg_litres_equivalent(per_100),
    })
}
