//! 에너지/운전비/배출량 계산 회귀 테스트.
use approx::assert_relative_eq;
use hot_water_lifecycle::lifecycle::{
    compute_required_energy, evaluate_scenario, hot_water_energy, lifetime_emissions,
    project_running_costs, total_emissions, total_lifecycle_cost, yearly_emissions,
    EmissionBasis, FormulaParams, HeatingScenario, LifecycleError,
};
use rstest::rstest;

fn reference_scenario() -> HeatingScenario {
    HeatingScenario {
        demand_volume_litres: 400.0,
        temperature_rise_celsius: 55.0,
        efficiency_or_cop: 1.0,
        fuel_unit_price: 0.18,
        price_escalation_rate: 0.015,
        annual_usage_days: 1.0,
        project_lifetime_years: 15,
        emission_factor: 0.25,
        install_cost: 3000.0,
    }
}

#[test]
fn tank_energy_matches_hand_calculation() {
    // 400 L × 55 °C × 4.186 / 3600 ≈ 25.58 kWh
    let kwh = compute_required_energy(400.0, 55.0, 1.0).expect("energy");
    assert_relative_eq!(kwh, 25.581, epsilon = 1e-3);
}

#[rstest]
#[case(0.0)]
#[case(-0.5)]
#[case(f64::NAN)]
fn non_positive_efficiency_is_rejected(#[case] efficiency: f64) {
    let err = compute_required_energy(400.0, 55.0, efficiency).unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidParameter { name: "efficiency", .. }
    ));
}

#[rstest]
#[case(0.85, 0.9)]
#[case(1.0, 2.5)]
#[case(0.5, 0.85)]
fn higher_efficiency_needs_less_energy(#[case] lower: f64, #[case] higher: f64) {
    let a = compute_required_energy(300.0, 50.0, lower).unwrap();
    let b = compute_required_energy(300.0, 50.0, higher).unwrap();
    assert!(b < a, "eff {higher} → {b}, eff {lower} → {a}");
}

#[test]
fn energy_scales_with_volume_and_rise() {
    let base = compute_required_energy(100.0, 20.0, 0.9).unwrap();
    assert_relative_eq!(compute_required_energy(200.0, 20.0, 0.9).unwrap(), base * 2.0, epsilon = 1e-12);
    assert_relative_eq!(compute_required_energy(100.0, 60.0, 0.9).unwrap(), base * 3.0, epsilon = 1e-12);
    assert_eq!(compute_required_energy(100.0, 0.0, 0.9).unwrap(), 0.0);
}

#[test]
fn running_costs_escalate_year_on_year() {
    let (yearly, total) = project_running_costs(25.581, 1.0, 0.18, 0.015, 15).unwrap();
    assert_eq!(yearly.len(), 15);
    assert_eq!(yearly[0].year, 1);
    assert_eq!(yearly[14].year, 15);
    assert_relative_eq!(yearly[0].cost, 4.60, epsilon = 5e-3);
    assert_relative_eq!(yearly[14].cost, 5.67, epsilon = 5e-3);
    assert_relative_eq!(yearly[14].cost, yearly[0].cost * 1.015_f64.powi(14), max_relative = 1e-12);
    assert_relative_eq!(total, 76.81, epsilon = 0.01);
}

#[test]
fn running_total_equals_sum_of_years() {
    let (yearly, total) = project_running_costs(7000.0, 0.85, 0.7, 0.03, 20).unwrap();
    let sum: f64 = yearly.iter().map(|e| e.cost).sum();
    assert_relative_eq!(total, sum, max_relative = 1e-12);
}

#[test]
fn zero_lifetime_has_no_running_cost() {
    let (yearly, total) = project_running_costs(7000.0, 0.85, 0.7, 0.03, 0).unwrap();
    assert!(yearly.is_empty());
    assert_eq!(total, 0.0);
}

#[test]
fn falling_prices_are_accepted() {
    let (yearly, _) = project_running_costs(1000.0, 1.0, 0.2, -0.1, 3).unwrap();
    assert!(yearly[1].cost < yearly[0].cost);
    assert_relative_eq!(yearly[2].cost, 200.0 * 0.81, max_relative = 1e-12);
}

#[test]
fn running_costs_divide_by_cop() {
    let (direct, _) = project_running_costs(1000.0, 1.0, 0.28, 0.0, 1).unwrap();
    let (hp, _) = project_running_costs(1000.0, 2.5, 0.28, 0.0, 1).unwrap();
    assert_relative_eq!(hp[0].cost, direct[0].cost / 2.5, max_relative = 1e-12);
    assert!(project_running_costs(1000.0, 0.0, 0.28, 0.0, 1).is_err());
}

#[test]
fn lifecycle_cost_adds_install() {
    assert_relative_eq!(total_lifecycle_cost(3000.0, 76.81), 3076.81, max_relative = 1e-12);
}

#[test]
fn emissions_use_delivered_energy() {
    assert_relative_eq!(total_emissions(1000.0, 0.21), 210.0, max_relative = 1e-12);
    assert_relative_eq!(lifetime_emissions(1000.0, 0.21, 15), 3150.0, max_relative = 1e-12);
    let yearly = yearly_emissions(1000.0, 0.21, 3);
    assert_eq!(yearly.len(), 3);
    assert!(yearly.iter().all(|e| (e.emissions - 210.0).abs() < 1e-9));
}

#[test]
fn reference_scenario_end_to_end() {
    let result = evaluate_scenario(&reference_scenario(), &FormulaParams::default()).unwrap();
    assert_relative_eq!(result.annual_energy_kwh, 25.58, epsilon = 5e-3);
    assert_relative_eq!(result.yearly_costs[0].cost, 4.60, epsilon = 5e-3);
    assert_relative_eq!(result.yearly_costs[14].cost, 5.67, epsilon = 5e-3);
    assert_relative_eq!(result.running_cost, 76.81, epsilon = 0.01);
    assert_relative_eq!(result.total_cost, 3076.81, epsilon = 0.01);
    assert_eq!(result.install_cost, 3000.0);
    assert_eq!(result.yearly_emissions.len(), 15);
}

#[test]
fn emission_basis_selects_shown_figure() {
    let scenario = reference_scenario();
    let annual = evaluate_scenario(
        &scenario,
        &FormulaParams {
            emission_basis: EmissionBasis::Annual,
            ..FormulaParams::default()
        },
    )
    .unwrap();
    let lifetime = evaluate_scenario(
        &scenario,
        &FormulaParams {
            emission_basis: EmissionBasis::Lifetime,
            ..FormulaParams::default()
        },
    )
    .unwrap();
    assert_relative_eq!(annual.total_emissions, annual.annual_emissions, max_relative = 1e-12);
    assert_relative_eq!(lifetime.total_emissions, lifetime.annual_emissions * 15.0, max_relative = 1e-12);
    assert_eq!(annual.total_cost, lifetime.total_cost);
}

#[test]
fn zero_lifetime_costs_only_installation() {
    let scenario = HeatingScenario {
        project_lifetime_years: 0,
        ..reference_scenario()
    };
    let result = evaluate_scenario(&scenario, &FormulaParams::default()).unwrap();
    assert!(result.yearly_costs.is_empty());
    assert!(result.yearly_emissions.is_empty());
    assert_eq!(result.running_cost, 0.0);
    assert_eq!(result.total_cost, result.install_cost);
    assert_eq!(result.lifetime_emissions, 0.0);
    assert_eq!(result.total_emissions, 0.0);
    assert!(result.annual_emissions > 0.0);
}

#[test]
fn evaluate_rejects_zero_efficiency() {
    let scenario = HeatingScenario {
        efficiency_or_cop: 0.0,
        ..reference_scenario()
    };
    assert!(evaluate_scenario(&scenario, &FormulaParams::default()).is_err());
}

#[test]
fn hot_water_energy_per_hundred_litres() {
    let report = hot_water_energy(&FormulaParams::default(), 10.0, 65.0, 0.9).unwrap();
    // 100 L × 55 °C × 4.186 / 3600 / 0.9
    assert_relative_eq!(report.energy_per_100_litres_kwh, 7.1059, epsilon = 1e-3);
    assert_relative_eq!(report.energy_per_litre_kwh * 100.0, report.energy_per_100_litres_kwh, max_relative = 1e-12);
    assert_relative_eq!(report.lpg_litres_per_100_litres, report.energy_per_100_litres_kwh / 7.08, max_relative = 1e-12);
}
