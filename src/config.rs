use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::lifecycle::{DemandInputs, FormulaParams, LoanInputs, Technology, TechnologyInputs};
use indexmap::IndexMap;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 기술별로 같은 형태의 값을 하나씩 담는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerTechnology<T> {
    pub lpg_boiler: T,
    pub electric_boiler: T,
    pub heat_pump: T,
    pub hydrogen_boiler: T,
}

impl<T> PerTechnology<T> {
    pub fn get(&self, tech: Technology) -> &T {
        match tech {
            Technology::LpgBoiler => &self.lpg_boiler,
            Technology::ElectricBoiler => &self.electric_boiler,
            Technology::HeatPump => &self.heat_pump,
            Technology::HydrogenBoiler => &self.hydrogen_boiler,
        }
    }

    pub fn get_mut(&mut self, tech: Technology) -> &mut T {
        match tech {
            Technology::LpgBoiler => &mut self.lpg_boiler,
            Technology::ElectricBoiler => &mut self.electric_boiler,
            Technology::HeatPump => &mut self.heat_pump,
            Technology::HydrogenBoiler => &mut self.hydrogen_boiler,
        }
    }
}

impl<T: Copy> PerTechnology<T> {
    /// `Technology::ALL` 순서의 맵으로 변환한다.
    pub fn to_map(&self) -> IndexMap<Technology, T> {
        Technology::ALL.iter().map(|t| (*t, *self.get(*t))).collect()
    }
}

impl Default for PerTechnology<TechnologyInputs> {
    fn default() -> Self {
        Self {
            lpg_boiler: TechnologyInputs {
                install_cost: 2000.0,
                efficiency_or_cop: 0.85,
                fuel_unit_price: 0.70,
                price_escalation_rate: 0.03,
                emission_factor: 0.21,
            },
            electric_boiler: TechnologyInputs {
                install_cost: 3000.0,
                efficiency_or_cop: 1.0,
                fuel_unit_price: 0.18,
                price_escalation_rate: 0.015,
                emission_factor: 0.25,
            },
            heat_pump: TechnologyInputs {
                install_cost: 2500.0,
                efficiency_or_cop: 2.5,
                fuel_unit_price: 0.28,
                price_escalation_rate: 0.025,
                emission_factor: 0.08,
            },
            hydrogen_boiler: TechnologyInputs {
                install_cost: 3500.0,
                efficiency_or_cop: 0.85,
                fuel_unit_price: 2.5,
                price_escalation_rate: 0.025,
                emission_factor: 0.15,
            },
        }
    }
}

/// 입력 위젯 최소/최대값. 읽을 때 `min <= max`를 검사한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LimitRepr")]
pub struct Limit {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
struct LimitRepr {
    min: f64,
    max: f64,
}

impl TryFrom<LimitRepr> for Limit {
    type Error = String;

    fn try_from(raw: LimitRepr) -> Result<Self, Self::Error> {
        if raw.min.is_finite() && raw.max.is_finite() && raw.min <= raw.max {
            Ok(Limit::new(raw.min, raw.max))
        } else {
            Err(format!("invalid limit: min={} max={}", raw.min, raw.max))
        }
    }
}

impl Limit {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// 기술별 입력 한계.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnologyLimits {
    pub install_cost: Limit,
    /// 효율(소수) 또는 COP
    pub efficiency_or_cop: Limit,
    pub fuel_unit_price: Limit,
    /// 상승률(소수)
    pub price_escalation_rate: Limit,
    pub emission_factor: Limit,
}

/// 전/후단에서 적용하는 입력 한계. 엔진은 범위를 다시 검사하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub technologies: PerTechnology<TechnologyLimits>,
    pub tank_litres: Limit,
    pub temperature_c: Limit,
    pub days: Limit,
    pub lifetime_years: Limit,
    pub loan_principal: Limit,
    pub loan_rate: Limit,
    pub loan_term_years: Limit,
    pub boiler_efficiency: Limit,
}

impl Default for InputLimits {
    fn default() -> Self {
        let boiler = |install: Limit, price: Limit, esc_max: f64, ef_max: f64| TechnologyLimits {
            install_cost: install,
            efficiency_or_cop: Limit::new(0.5, 1.0),
            fuel_unit_price: price,
            price_escalation_rate: Limit::new(0.0, esc_max),
            emission_factor: Limit::new(0.0, ef_max),
        };
        Self {
            technologies: PerTechnology {
                lpg_boiler: boiler(Limit::new(0.0, 5000.0), Limit::new(0.0, 10.0), 0.10, 0.3),
                electric_boiler: boiler(Limit::new(500.0, 10_000.0), Limit::new(0.0, 10.0), 0.10, 0.6),
                heat_pump: TechnologyLimits {
                    install_cost: Limit::new(2000.0, 12_000.0),
                    efficiency_or_cop: Limit::new(2.0, 5.0),
                    fuel_unit_price: Limit::new(0.0, 10.0),
                    price_escalation_rate: Limit::new(0.0, 0.10),
                    emission_factor: Limit::new(0.0, 0.6),
                },
                hydrogen_boiler: boiler(Limit::new(2000.0, 6000.0), Limit::new(0.5, 3.0), 0.15, 0.3),
            },
            tank_litres: Limit::new(0.0, 10_000.0),
            temperature_c: Limit::new(0.0, 80.0),
            days: Limit::new(0.0, 365.0),
            lifetime_years: Limit::new(0.0, 50.0),
            loan_principal: Limit::new(0.0, 10_000_000.0),
            loan_rate: Limit::new(0.0, 1.0),
            loan_term_years: Limit::new(1.0, 50.0),
            boiler_efficiency: Limit::new(0.1, 1.0),
        }
    }
}

impl InputLimits {
    /// 주어진 냉수 온도에서 허용되는 온수 온도 범위.
    pub fn hot_temp_limit(&self, cold_temp_c: f64) -> Limit {
        let min = cold_temp_c.clamp(self.temperature_c.min, self.temperature_c.max);
        Limit::new(min, self.temperature_c.max)
    }

    /// 기술 입력값을 한계 안으로 자른다.
    pub fn clamp_technology(&self, tech: Technology, inputs: &TechnologyInputs) -> TechnologyInputs {
        let l = self.technologies.get(tech);
        TechnologyInputs {
            install_cost: l.install_cost.clamp(inputs.install_cost),
            efficiency_or_cop: l.efficiency_or_cop.clamp(inputs.efficiency_or_cop),
            fuel_unit_price: l.fuel_unit_price.clamp(inputs.fuel_unit_price),
            price_escalation_rate: l.price_escalation_rate.clamp(inputs.price_escalation_rate),
            emission_factor: l.emission_factor.clamp(inputs.emission_factor),
        }
    }

    /// 수요 입력값을 한계 안으로 자른다. 온수 온도는 냉수 온도 아래로 내려가지 않는다.
    pub fn clamp_demand(&self, demand: &DemandInputs) -> DemandInputs {
        let cold_temp_c = self.temperature_c.clamp(demand.cold_temp_c);
        DemandInputs {
            tank_litres: self.tank_litres.clamp(demand.tank_litres),
            cold_temp_c,
            hot_temp_c: self.hot_temp_limit(cold_temp_c).clamp(demand.hot_temp_c),
            heating_days: self.days.clamp(demand.heating_days),
            topup_days: self.days.clamp(demand.topup_days),
            project_lifetime_years: self
                .lifetime_years
                .clamp(f64::from(demand.project_lifetime_years)) as u32,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en-us ...)
    pub language: String,
    /// 언어팩 TOML 디렉터리
    pub language_pack_dir: Option<String>,
    /// tracing 최대 레벨(trace/debug/info/warn/error)
    pub log_level: String,
    /// GUI 창 투명도
    pub window_alpha: f32,
    pub formula: FormulaParams,
    pub demand: DemandInputs,
    pub technologies: PerTechnology<TechnologyInputs>,
    pub loan: LoanInputs,
    /// 입력 위젯 한계
    pub limits: InputLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            log_level: "info".into(),
            window_alpha: 1.0,
            formula: FormulaParams::default(),
            demand: DemandInputs::default(),
            technologies: PerTechnology::default(),
            loan: LoanInputs::default(),
            limits: InputLimits::default(),
        }
    }
}

impl Config {
    /// 설정된 로그 레벨. 해석할 수 없으면 INFO.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .trim()
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장하고 돌려준다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

/// 설정을 지정 경로에 저장한다.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_to(self, Path::new(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{EmissionBasis, TieBreak};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hwl_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn missing_file_writes_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let cfg = load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.demand, DemandInputs::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_config_loads_back() {
        let path = temp_path("roundtrip");
        let mut cfg = Config::default();
        cfg.language = "ko".into();
        cfg.formula.emission_basis = EmissionBasis::Annual;
        cfg.formula.tie_break = TieBreak::LastMinimum;
        cfg.technologies.heat_pump.efficiency_or_cop = 3.5;
        save_to(&cfg, &path).unwrap();
        let back = load_from(&path).unwrap();
        assert_eq!(back.language, "ko");
        assert_eq!(back.formula, cfg.formula);
        assert_eq!(back.technologies, cfg.technologies);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_uses_defaults_for_missing_sections() {
        let cfg: Config = toml::from_str("language = \"en\"\n[demand]\ntank_litres = 250.0\n").unwrap();
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.demand.tank_litres, 250.0);
        assert_eq!(cfg.demand.hot_temp_c, 65.0);
        assert_eq!(cfg.technologies, PerTechnology::<TechnologyInputs>::default());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let cfg = Config {
            log_level: "chatty".into(),
            ..Config::default()
        };
        assert_eq!(cfg.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn inverted_temperatures_are_clamped_to_zero_rise() {
        let limits = InputLimits::default();
        let demand = DemandInputs {
            cold_temp_c: 65.0,
            hot_temp_c: 10.0,
            ..DemandInputs::default()
        };
        let clamped = limits.clamp_demand(&demand);
        assert_eq!(clamped.cold_temp_c, 65.0);
        assert_eq!(clamped.hot_temp_c, 65.0);
        assert_eq!(clamped.temperature_rise(), 0.0);

        let comparison = crate::lifecycle::compare_technologies(
            &clamped,
            &PerTechnology::<TechnologyInputs>::default().to_map(),
            &crate::lifecycle::FormulaParams::default(),
        )
        .unwrap();
        assert!(comparison.results.values().all(|r| r.running_cost >= 0.0));
        assert_eq!(comparison.cheapest().map(|(t, _)| t), Some(Technology::LpgBoiler));
    }

    #[test]
    fn limits_load_from_toml() {
        let cfg: Config = toml::from_str("[limits.tank_litres]\nmin = 50.0\nmax = 500.0\n").unwrap();
        assert_eq!(cfg.limits.tank_litres, Limit::new(50.0, 500.0));
        assert_eq!(cfg.limits.temperature_c, InputLimits::default().temperature_c);
    }

    #[test]
    fn inverted_limit_is_rejected() {
        let res: Result<Config, _> = toml::from_str("[limits.days]\nmin = 300.0\nmax = 10.0\n");
        assert!(res.is_err());
    }

    #[test]
    fn limits_clamp_heat_pump_cop() {
        let limits = InputLimits::default();
        let mut hp = PerTechnology::<TechnologyInputs>::default().heat_pump;
        hp.efficiency_or_cop = 9.0;
        let clamped = limits.clamp_technology(Technology::HeatPump, &hp);
        assert_eq!(clamped.efficiency_or_cop, 5.0);
    }
}
