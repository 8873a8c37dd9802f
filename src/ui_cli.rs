use std::io::{self, Write};
use std::path::Path;

use indexmap::IndexMap;

use crate::app::AppError;
use crate::config::{Config, Limit};
use crate::export;
use crate::i18n::{keys, Translator};
use crate::lifecycle::{
    self, compare_technologies, compute_required_energy_with, lpg_litres_equivalent,
    EmissionBasis, LoanInputs, Technology, TechnologyInputs, TieBreak,
};
use crate::report::{self, format_thousands, text_bar};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Lifecycle,
    HotWaterEnergy,
    Loan,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_LIFECYCLE,
        keys::MAIN_MENU_HOT_WATER,
        keys::MAIN_MENU_LOAN,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Lifecycle),
        "2" => Some(MenuChoice::HotWaterEnergy),
        "3" => Some(MenuChoice::Loan),
        "4" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 수명주기 비교 메뉴를 처리한다. 입력값은 이번 계산에만 쓰고 설정에 저장하지 않는다.
pub fn handle_lifecycle(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::LIFECYCLE_HEADING));
    println!("{} {}", tr.t(keys::LIFECYCLE_DEMAND_HEADING), tr.t(keys::NOTE_KEEP_DEFAULT));
    let limits = &cfg.limits;
    let mut demand = cfg.demand;
    demand.tank_litres = read_f64_or(tr, keys::PROMPT_TANK_LITRES, demand.tank_litres, limits.tank_litres)?;
    demand.cold_temp_c = read_f64_or(tr, keys::PROMPT_COLD_TEMP, demand.cold_temp_c, limits.temperature_c)?;
    demand.hot_temp_c = read_hot_temp(tr, demand.hot_temp_c, demand.cold_temp_c, cfg)?;
    demand.heating_days = read_f64_or(tr, keys::PROMPT_HEATING_DAYS, demand.heating_days, limits.days)?;
    demand.topup_days = read_f64_or(tr, keys::PROMPT_TOPUP_DAYS, demand.topup_days, limits.days)?;
    demand.project_lifetime_years = read_f64_or(
        tr,
        keys::PROMPT_LIFETIME,
        f64::from(demand.project_lifetime_years),
        limits.lifetime_years,
    )?
    .round() as u32;

    let mut technologies: IndexMap<Technology, TechnologyInputs> = IndexMap::new();
    for tech in Technology::ALL {
        println!("\n[{tech}]");
        let defaults = cfg.technologies.get(tech);
        let l = limits.technologies.get(tech);
        let install_cost = read_f64_or(tr, keys::PROMPT_INSTALL_COST, defaults.install_cost, l.install_cost)?;
        let efficiency_or_cop = if tech.uses_cop() {
            read_f64_or(tr, keys::PROMPT_COP, defaults.efficiency_or_cop, l.efficiency_or_cop)?
        } else {
            read_f64_or(
                tr,
                keys::PROMPT_EFFICIENCY_PCT,
                defaults.efficiency_or_cop * 100.0,
                percent(l.efficiency_or_cop),
            )? / 100.0
        };
        let fuel_unit_price = read_f64_or(tr, keys::PROMPT_FUEL_PRICE, defaults.fuel_unit_price, l.fuel_unit_price)?;
        let price_escalation_rate = read_f64_or(
            tr,
            keys::PROMPT_ESCALATION_PCT,
            defaults.price_escalation_rate * 100.0,
            percent(l.price_escalation_rate),
        )? / 100.0;
        let emission_factor = read_f64_or(tr, keys::PROMPT_EMISSION_FACTOR, defaults.emission_factor, l.emission_factor)?;
        technologies.insert(
            tech,
            TechnologyInputs {
                install_cost,
                efficiency_or_cop,
                fuel_unit_price,
                price_escalation_rate,
                emission_factor,
            },
        );
    }

    let per_fill = compute_required_energy_with(
        &cfg.formula,
        demand.tank_litres,
        demand.temperature_rise(),
        1.0,
    )?;
    println!(
        "\n{}",
        tr.tf(
            keys::RESULT_ENERGY_PER_FILL,
            &[
                ("kwh", format!("{per_fill:.4}")),
                ("lpg", format!("{:.4}", lpg_litres_equivalent(per_fill))),
            ],
        )
    );

    let comparison = compare_technologies(&demand, &technologies, &cfg.formula)?;
    println!("\n{}", tr.t(keys::RESULT_COST_TABLE));
    print_rows(&report::cost_rows(&comparison), "£");
    println!(
        "\n{}",
        tr.tf(
            keys::RESULT_EMISSION_TABLE,
            &[("basis", cfg.formula.emission_basis.label().to_string())],
        )
    );
    print_rows(&report::emission_rows(&comparison), "");

    if let Some((tech, cost)) = comparison.cheapest() {
        println!(
            "\n{}",
            tr.tf(
                keys::RESULT_RECOMMENDATION,
                &[
                    ("tech", tech.to_string()),
                    ("years", demand.project_lifetime_years.to_string()),
                ],
            )
        );
        println!(
            "{}",
            tr.tf(keys::RESULT_RECOMMENDATION_DETAIL, &[("cost", format_thousands(cost, 2))])
        );
    }
    if let Some((tech, _)) = comparison.lowest_emission() {
        println!("{}", tr.tf(keys::RESULT_LOWEST_EMISSION, &[("tech", tech.to_string())]));
    }

    let file = read_line(&tr.t(keys::PROMPT_EXPORT))?;
    let file = file.trim();
    if !file.is_empty() {
        let series: Vec<(&str, &lifecycle::LifecycleResult)> = comparison
            .results
            .iter()
            .map(|(tech, res)| (tech.name(), res))
            .collect();
        export::save_yearly_costs(Path::new(file), &series)?;
        let emissions_file = emissions_file_name(file);
        export::save_yearly_emissions(Path::new(&emissions_file), &series)?;
        println!("{}", tr.tf(keys::RESULT_EXPORTED, &[("path", file.to_string())]));
        println!("{}", tr.tf(keys::RESULT_EXPORTED, &[("path", emissions_file)]));
    }
    Ok(())
}

/// `out/costs.csv` → `out/costs_emissions.csv`. 디렉터리 부분은 건드리지 않는다.
fn emissions_file_name(cost_file: &str) -> String {
    let path = Path::new(cost_file);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_emissions.{}", ext.to_string_lossy()),
        None => format!("{stem}_emissions"),
    };
    path.with_file_name(name).display().to_string()
}

/// 온수 온도를 읽는다. 냉수 온도보다 낮으면 다시 묻는다.
fn read_hot_temp(tr: &Translator, default: f64, cold: f64, cfg: &Config) -> Result<f64, AppError> {
    loop {
        let hot = read_f64_or(tr, keys::PROMPT_HOT_TEMP, default.max(cold), cfg.limits.temperature_c)?;
        match hot_below_cold_message(tr, cold, hot) {
            Some(msg) => println!("{msg}"),
            None => return Ok(hot),
        }
    }
}

fn hot_below_cold_message(tr: &Translator, cold: f64, hot: f64) -> Option<String> {
    (hot < cold).then(|| tr.tf(keys::ERROR_HOT_BELOW_COLD, &[("cold", trim_float(cold))]))
}

fn percent(limit: Limit) -> Limit {
    Limit::new(limit.min * 100.0, limit.max * 100.0)
}

fn print_rows(rows: &[report::ReportRow], currency: &str) {
    for row in rows {
        println!(
            "  {:<16} {}{:>12}  {}",
            row.technology.name(),
            currency,
            format_thousands(row.value, 2),
            text_bar(row.share, 24)
        );
    }
}

/// 온수 에너지 계산기 메뉴를 처리한다.
pub fn handle_hot_water(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::HOT_WATER_HEADING));
    let limits = &cfg.limits;
    let cold = read_f64_or(tr, keys::PROMPT_COLD_TEMP, cfg.demand.cold_temp_c, limits.temperature_c)?;
    let hot = read_hot_temp(tr, cfg.demand.hot_temp_c, cold, cfg)?;
    let efficiency = read_f64_or(tr, keys::PROMPT_BOILER_EFFICIENCY, 0.9, limits.boiler_efficiency)?;
    let report = lifecycle::hot_water_energy(&cfg.formula, cold, hot, efficiency)?;
    println!(
        "{}",
        tr.tf(
            keys::RESULT_HOT_WATER,
            &[
                ("kwh", format!("{:.4}", report.energy_per_100_litres_kwh)),
                ("lpg", format!("{:.4}", report.lpg_litres_per_100_litres)),
            ],
        )
    );
    Ok(())
}

/// 대출 계산기 메뉴를 처리한다.
pub fn handle_loan(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::LOAN_HEADING));
    let limits = &cfg.limits;
    let principal = read_f64_or(tr, keys::PROMPT_LOAN_AMOUNT, cfg.loan.principal, limits.loan_principal)?;
    let rate_pct = read_f64_or(
        tr,
        keys::PROMPT_LOAN_RATE,
        cfg.loan.annual_rate * 100.0,
        percent(limits.loan_rate),
    )?;
    let term_years = read_f64_or(tr, keys::PROMPT_LOAN_TERM, cfg.loan.term_years, limits.loan_term_years)?;
    let summary = lifecycle::loan_summary(&LoanInputs {
        principal,
        annual_rate: rate_pct / 100.0,
        term_years,
    })?;
    println!(
        "{}",
        tr.tf(
            keys::RESULT_MONTHLY_PAYMENT,
            &[("payment", format_thousands(summary.monthly_payment, 2))],
        )
    );
    println!(
        "{}",
        tr.tf(
            keys::RESULT_LOAN_TOTALS,
            &[
                ("repaid", format_thousands(summary.total_repaid, 2)),
                ("interest", format_thousands(summary.total_interest, 2)),
            ],
        )
    );
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    loop {
        println!(
            "{}",
            tr.tf(
                keys::SETTINGS_CURRENT,
                &[
                    ("lang", cfg.language.clone()),
                    ("basis", cfg.formula.emission_basis.label().to_string()),
                    ("tie", format!("{:?}", cfg.formula.tie_break)),
                ],
            )
        );
        println!("{}", tr.t(keys::SETTINGS_OPTIONS));
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => {
                let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
                let lang = lang.trim();
                if !lang.is_empty() {
                    cfg.language = lang.to_string();
                }
            }
            "2" => {
                cfg.formula.emission_basis = match cfg.formula.emission_basis {
                    EmissionBasis::Annual => EmissionBasis::Lifetime,
                    EmissionBasis::Lifetime => EmissionBasis::Annual,
                };
            }
            "3" => {
                cfg.formula.tie_break = match cfg.formula.tie_break {
                    TieBreak::FirstMinimum => TieBreak::LastMinimum,
                    TieBreak::LastMinimum => TieBreak::FirstMinimum,
                };
            }
            "0" | "" => return Ok(()),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 숫자를 읽는다. 빈 입력은 기본값, 범위를 벗어나면 한계값으로 자른다.
fn read_f64_or(tr: &Translator, key: &str, default: f64, limit: Limit) -> Result<f64, AppError> {
    let prompt = format!("{} [{}]: ", tr.t(key), trim_float(default));
    loop {
        let s = read_line(&prompt)?;
        match parse_or_default(&s, default) {
            Some(v) => {
                let clamped = limit.clamp(v);
                if clamped != v {
                    println!(
                        "{}",
                        tr.tf(keys::NOTE_CLAMPED, &[("value", trim_float(clamped))])
                    );
                }
                return Ok(clamped);
            }
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn parse_or_default(input: &str, default: f64) -> Option<f64> {
    let t = input.trim();
    if t.is_empty() {
        return Some(default);
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn trim_float(v: f64) -> String {
    let s = format!("{v:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu(" 1\n"), Some(MenuChoice::Lifecycle));
        assert_eq!(parse_menu("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu("9"), None);
    }

    #[test]
    fn empty_input_keeps_default() {
        assert_eq!(parse_or_default("\n", 400.0), Some(400.0));
        assert_eq!(parse_or_default(" 250 ", 400.0), Some(250.0));
        assert_eq!(parse_or_default("abc", 400.0), None);
        assert_eq!(parse_or_default("inf", 400.0), None);
    }

    #[test]
    fn emissions_file_sits_next_to_cost_file() {
        assert_eq!(emissions_file_name("out/costs.csv"), "out/costs_emissions.csv");
        assert_eq!(emissions_file_name("costs"), "costs_emissions");
        assert_eq!(emissions_file_name("out.d/costs"), "out.d/costs_emissions");
    }

    #[test]
    fn hot_temperature_below_cold_is_refused() {
        let tr = Translator::new("en");
        let msg = hot_below_cold_message(&tr, 65.0, 10.0).expect("refused");
        assert!(msg.contains("65"));
        assert!(hot_below_cold_message(&tr, 10.0, 10.0).is_none());
        assert!(hot_below_cold_message(&tr, 10.0, 65.0).is_none());
    }

    #[test]
    fn float_prompt_trims_trailing_zeros() {
        assert_eq!(trim_float(0.85), "0.85");
        assert_eq!(trim_float(400.0), "400");
    }
}
