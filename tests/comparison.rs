//! 기술 비교/순위 및 CSV 내보내기 통합 테스트.
use hot_water_lifecycle::{
    config::{Config, PerTechnology},
    export::{write_yearly_costs_csv, write_yearly_emissions_csv},
    lifecycle::{
        compare_technologies, ranked, select_minimum, DemandInputs, FormulaParams, Technology,
        TechnologyInputs, TieBreak,
    },
};
use indexmap::IndexMap;

fn totals(pairs: &[(&'static str, f64)]) -> IndexMap<&'static str, f64> {
    pairs.iter().copied().collect()
}

#[test]
fn first_minimum_wins_ties() {
    let costs = totals(&[("A", 5000.0), ("B", 4800.0), ("C", 4800.0)]);
    let (name, value) = select_minimum(&costs, TieBreak::FirstMinimum).unwrap();
    assert_eq!(*name, "B");
    assert_eq!(value, 4800.0);
}

#[test]
fn last_minimum_is_selectable() {
    let costs = totals(&[("A", 5000.0), ("B", 4800.0), ("C", 4800.0)]);
    let (name, _) = select_minimum(&costs, TieBreak::LastMinimum).unwrap();
    assert_eq!(*name, "C");
}

#[test]
fn empty_and_nan_inputs() {
    let empty: IndexMap<&str, f64> = IndexMap::new();
    assert!(select_minimum(&empty, TieBreak::FirstMinimum).is_none());

    let costs = totals(&[("A", f64::NAN), ("B", 10.0)]);
    let (name, _) = select_minimum(&costs, TieBreak::FirstMinimum).unwrap();
    assert_eq!(*name, "B");
}

#[test]
fn ranking_is_stable_for_ties() {
    let costs = totals(&[("A", 5000.0), ("B", 4800.0), ("C", 4800.0), ("D", 100.0)]);
    let order: Vec<&str> = ranked(&costs).into_iter().map(|(k, _)| k).collect();
    assert_eq!(order, vec!["D", "B", "C", "A"]);
}

#[test]
fn default_comparison_covers_all_technologies() {
    let cfg = Config::default();
    let comparison =
        compare_technologies(&cfg.demand, &cfg.technologies.to_map(), &cfg.formula).unwrap();
    let order: Vec<Technology> = comparison.results.keys().copied().collect();
    assert_eq!(order, Technology::ALL.to_vec());
    assert_eq!(comparison.project_lifetime_years, 15);

    // 기본값에서는 히트펌프가 운전비/배출 모두 가장 낮다.
    let (cheapest, cost) = comparison.cheapest().unwrap();
    assert_eq!(cheapest, Technology::HeatPump);
    assert_eq!(cost, comparison.results[&Technology::HeatPump].total_cost);
    assert_eq!(comparison.lowest_emission().unwrap().0, Technology::HeatPump);

    let ranked_costs = comparison.ranked_by_cost();
    assert!(ranked_costs.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn all_technologies_share_delivered_energy() {
    let cfg = Config::default();
    let comparison =
        compare_technologies(&cfg.demand, &cfg.technologies.to_map(), &cfg.formula).unwrap();
    let energies: Vec<f64> = comparison.results.values().map(|r| r.annual_energy_kwh).collect();
    assert!(energies.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-9));
}

#[test]
fn identical_systems_follow_tie_break() {
    let inputs = TechnologyInputs {
        install_cost: 1000.0,
        efficiency_or_cop: 0.9,
        fuel_unit_price: 0.2,
        price_escalation_rate: 0.02,
        emission_factor: 0.1,
    };
    let techs = PerTechnology {
        lpg_boiler: inputs,
        electric_boiler: inputs,
        heat_pump: inputs,
        hydrogen_boiler: inputs,
    }
    .to_map();
    let demand = DemandInputs::default();
    let first = compare_technologies(&demand, &techs, &FormulaParams::default()).unwrap();
    assert_eq!(first.cheapest().unwrap().0, Technology::LpgBoiler);

    let params = FormulaParams {
        tie_break: TieBreak::LastMinimum,
        ..FormulaParams::default()
    };
    let last = compare_technologies(&demand, &techs, &params).unwrap();
    assert_eq!(last.cheapest().unwrap().0, Technology::HydrogenBoiler);
}

#[test]
fn invalid_input_aborts_comparison() {
    let cfg = Config::default();
    let mut techs = cfg.technologies;
    techs.electric_boiler.efficiency_or_cop = 0.0;
    assert!(compare_technologies(&cfg.demand, &techs.to_map(), &cfg.formula).is_err());
}

#[test]
fn csv_layout_is_long_format() {
    let cfg = Config::default();
    let demand = DemandInputs {
        project_lifetime_years: 2,
        ..cfg.demand
    };
    let comparison = compare_technologies(&demand, &cfg.technologies.to_map(), &cfg.formula).unwrap();
    let series: Vec<(&str, _)> = comparison
        .results
        .iter()
        .take(2)
        .map(|(t, r)| (t.name(), r))
        .collect();

    let mut buf = Vec::new();
    write_yearly_costs_csv(&mut buf, &series).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Year,Cost,System");
    assert_eq!(lines.len(), 1 + 2 * 2);
    assert!(lines[1].starts_with("1,") && lines[1].ends_with(",LPG Boiler"));
    assert!(lines[2].starts_with("2,") && lines[2].ends_with(",LPG Boiler"));
    assert!(lines[3].ends_with(",Electric Boiler"));

    let mut buf = Vec::new();
    write_yearly_emissions_csv(&mut buf, &series).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().next(), Some("Year,CO2 Emission,System"));
    assert_eq!(text.lines().count(), 5);
}
