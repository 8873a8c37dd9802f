#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use hot_water_lifecycle::{
    app, assets,
    config::{self, Limit, PerTechnology},
    export, i18n,
    lifecycle::{
        self, Comparison, DemandInputs, EmissionBasis, LifecycleError, LifecycleResult,
        LoanInputs, Technology, TechnologyInputs, TieBreak,
    },
    report::{self, format_thousands, ReportRow},
};
use indexmap::IndexMap;
use rfd::FileDialog;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

const RED_COLOR: egui::Color32 = egui::Color32::from_rgb(0xd2, 0x0a, 0x11);
const NAVY_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0x31, 0x3d);
const BEIGE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xd8, 0xd2, 0xc4);

/// 데스크톱 GUI 실행 인자.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct GuiArgs {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error: {e}");
            config::Config::default()
        }
    };
    app::init_tracing(app_cfg.tracing_level());
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 800.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    tracing::info!("gui started");
    eframe::run_native(
        "Hot Water Lifecycle Calculator",
        options,
        Box::new(move |cc| {
            let font_error = setup_fonts(&cc.egui_ctx).err();
            Box::new(GuiApp::new(app_cfg).with_font_error(font_error))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let logo = assets::load_logo(&assets::LOGO_SEARCH_PATHS).ok()?;
    Some(egui::IconData {
        rgba: logo.rgba,
        width: logo.width,
        height: logo.height,
    })
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 한계값 안에서만 움직이는 숫자 입력.
fn limited_drag(ui: &mut egui::Ui, value: &mut f64, limit: Limit, speed: f64) -> egui::Response {
    ui.add(
        egui::DragValue::new(value)
            .speed(speed)
            .clamp_range(limit.min..=limit.max),
    )
}

/// 소수로 저장된 값을 % 단위로 편집한다.
fn percent_drag(ui: &mut egui::Ui, value: &mut f64, limit: Limit, speed: f64) -> egui::Response {
    let mut pct = *value * 100.0;
    let resp = ui.add(
        egui::DragValue::new(&mut pct)
            .speed(speed)
            .clamp_range(limit.min * 100.0..=limit.max * 100.0)
            .max_decimals(2)
            .suffix(" %"),
    );
    if resp.changed() {
        *value = pct / 100.0;
    }
    resp
}

fn bar_table(
    ui: &mut egui::Ui,
    id: &str,
    rows: &[ReportRow],
    visible: &PerTechnology<bool>,
    color: egui::Color32,
    prefix: &str,
) {
    egui::Grid::new(id)
        .num_columns(3)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for row in rows.iter().filter(|r| *visible.get(r.technology)) {
                ui.label(row.technology.name());
                ui.label(format!("{prefix}{}", format_thousands(row.value, 2)));
                ui.add(
                    egui::ProgressBar::new(row.share as f32)
                        .desired_width(280.0)
                        .fill(color),
                );
                ui.end_row();
            }
        });
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 폰트 후보 경로. 프로젝트 폰트 → Windows → macOS → Linux 순서.
fn font_candidates(windir: Option<&OsStr>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = ["assets/fonts/malgun.ttf", "assets/fonts/NanumGothic.ttf"]
        .iter()
        .map(PathBuf::from)
        .collect();
    if let Some(windir) = windir {
        let fonts = Path::new(windir).join("Fonts");
        for cand in ["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"] {
            out.push(fonts.join(cand));
        }
    }
    for cand in [
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "/Library/Fonts/AppleGothic.ttf",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    ] {
        out.push(PathBuf::from(cand));
    }
    out
}

/// 한글과 오류 메시지를 표시하기 위해 시스템 폰트를 우선 적용한다.
/// 찾지 못하면 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let candidates = font_candidates(std::env::var_os("WINDIR").as_deref());
    let Some(path) = candidates.iter().find(|p| p.exists()) else {
        tracing::warn!("no hangul font found");
        return Err("Korean font not found. Please set a user font (.ttf/.ttc) in settings.".into());
    };
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read system font ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    tracing::info!(path = %path.display(), "hangul font applied");
    Ok(())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Main,
    HotWater,
    Loan,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    // 수명주기 비교 입력
    demand: DemandInputs,
    technologies: PerTechnology<TechnologyInputs>,
    show_in_charts: PerTechnology<bool>,
    export_status: Option<String>,
    // 온수 에너지
    hw_cold: f64,
    hw_hot: f64,
    hw_efficiency: f64,
    hw_result: Option<String>,
    // 대출
    loan: LoanInputs,
    // 로고
    logo: Option<egui::TextureHandle>,
    logo_error: Option<String>,
    logo_attempted: bool,
    // 설정
    base_style: Option<egui::Style>,
    window_alpha: f32,
    lang_input: String,
    settings_status: Option<String>,
    show_settings_modal: bool,
    show_formula_modal: bool,
    custom_font_path: String,
    font_load_error: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(
            lang = %lang_code,
            overrides_loaded = tr.lookup("gui.nav.app_title").is_some(),
            "gui language resolved"
        );
        Self {
            tr,
            tab: Tab::Main,
            demand: config.demand,
            technologies: config.technologies,
            show_in_charts: PerTechnology {
                lpg_boiler: true,
                electric_boiler: true,
                heat_pump: true,
                hydrogen_boiler: true,
            },
            export_status: None,
            hw_cold: config.demand.cold_temp_c,
            hw_hot: config.demand.hot_temp_c,
            hw_efficiency: 0.9,
            hw_result: None,
            loan: config.loan,
            logo: None,
            logo_error: None,
            logo_attempted: false,
            base_style: None,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            lang_input: config.language.clone(),
            settings_status: None,
            show_settings_modal: false,
            show_formula_modal: false,
            custom_font_path: String::new(),
            font_load_error: None,
            config,
        }
    }

    /// 시작 시 폰트 설정이 실패했으면 설정 창을 열어 사용자 폰트를 고르게 한다.
    fn with_font_error(mut self, error: Option<String>) -> Self {
        self.show_settings_modal = error.is_some();
        self.font_load_error = error;
        self
    }

    /// 현재 입력을 한계값으로 자른 뒤 네 기술을 모두 계산한다.
    fn comparison(&self) -> Result<Comparison, LifecycleError> {
        let limits = &self.config.limits;
        let demand = limits.clamp_demand(&self.demand);
        let techs: IndexMap<Technology, TechnologyInputs> = Technology::ALL
            .iter()
            .map(|t| (*t, limits.clamp_technology(*t, self.technologies.get(*t))))
            .collect();
        lifecycle::compare_technologies(&demand, &techs, &self.config.formula)
    }

    /// 탱크 1회 가열에 필요한 공급 열량 [kWh]. 가열 일수와 무관하다.
    fn energy_per_fill(&self) -> Result<f64, LifecycleError> {
        let demand = self.config.limits.clamp_demand(&self.demand);
        lifecycle::compute_required_energy_with(
            &self.config.formula,
            demand.tank_litres,
            demand.temperature_rise(),
            1.0,
        )
    }

    /// 차트 표시로 선택된 기술만 내보낸다.
    fn export_series<'a>(&self, comparison: &'a Comparison) -> Vec<(&'static str, &'a LifecycleResult)> {
        comparison
            .results
            .iter()
            .filter(|(tech, _)| *self.show_in_charts.get(**tech))
            .map(|(tech, res)| (tech.name(), res))
            .collect()
    }

    fn export_costs(&mut self, comparison: &Comparison) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("Annual_Costs.csv")
            .save_file()
        else {
            return;
        };
        let series = self.export_series(comparison);
        self.export_status = Some(match export::save_yearly_costs(&path, &series) {
            Ok(()) => format!("Saved: {}", path.display()),
            Err(e) => format!("Export error: {e}"),
        });
    }

    fn export_emissions(&mut self, comparison: &Comparison) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("CO2_Emissions.csv")
            .save_file()
        else {
            return;
        };
        let series = self.export_series(comparison);
        self.export_status = Some(match export::save_yearly_emissions(&path, &series) {
            Ok(()) => format!("Saved: {}", path.display()),
            Err(e) => format!("Export error: {e}"),
        });
    }

    /// 첫 프레임에 로고 텍스처를 올린다. 실패하면 경고 문구를 남긴다.
    fn ensure_logo(&mut self, ctx: &egui::Context) {
        if self.logo_attempted {
            return;
        }
        self.logo_attempted = true;
        match assets::load_logo(&assets::LOGO_SEARCH_PATHS) {
            Ok(img) => {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [img.width as usize, img.height as usize],
                    &img.rgba,
                );
                self.logo = Some(ctx.load_texture("logo", image, egui::TextureOptions::default()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "logo not available");
                self.logo_error = Some(e.to_string());
            }
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.text(key, default);
        if let Some(texture) = &self.logo {
            ui.add(
                egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                    .max_width(ui.available_width()),
            );
        } else if self.logo_error.is_some() {
            ui.colored_label(
                RED_COLOR,
                txt(
                    "gui.nav.logo_missing",
                    "❌ Logo not found. Please make sure logo.png is next to the program.",
                ),
            );
        }
        ui.separator();
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Navigation"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Main, txt("gui.tab.main", "🏠 Main Calculator")),
            (Tab::HotWater, txt("gui.tab.hot_water", "🔥 Hot Water Energy Calculator")),
            (Tab::Loan, txt("gui.tab.loan", "🏦 Loan Calculator")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_main(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.text(key, default);
        let limits = self.config.limits;

        heading_with_tip(
            ui,
            &txt("gui.main.heading", "Hot Water Technologies Lifecycle Sustainability Calculator"),
            &txt(
                "gui.main.tip",
                "Compare costs, fuel consumption and emissions of hot water heating systems.",
            ),
        );
        ui.label(txt(
            "gui.main.intro",
            "Update the numbers with your specific case or use the provided typical data.",
        ));
        ui.add_space(8.0);

        ui.strong(txt("gui.main.technical", "⚙️ Technology inputs (after grants)"));
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("tech_grid")
                .num_columns(6)
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong(txt("gui.main.col.system", "System"));
                    ui.strong(txt("gui.main.col.install", "Install (£)"));
                    ui.strong(txt("gui.main.col.efficiency", "Efficiency / CoP"));
                    ui.strong(txt("gui.main.col.price", "Price (£/kWh, £/L)"));
                    ui.strong(txt("gui.main.col.escalation", "Escalation (%/yr)"));
                    ui.strong(txt("gui.main.col.emission", "Emission factor"));
                    ui.end_row();
                    for tech in Technology::ALL {
                        let l = limits.technologies.get(tech);
                        let inputs = self.technologies.get_mut(tech);
                        ui.label(tech.name());
                        limited_drag(ui, &mut inputs.install_cost, l.install_cost, 50.0);
                        if tech.uses_cop() {
                            limited_drag(ui, &mut inputs.efficiency_or_cop, l.efficiency_or_cop, 0.1);
                        } else {
                            percent_drag(ui, &mut inputs.efficiency_or_cop, l.efficiency_or_cop, 1.0);
                        }
                        limited_drag(ui, &mut inputs.fuel_unit_price, l.fuel_unit_price, 0.01);
                        percent_drag(ui, &mut inputs.price_escalation_rate, l.price_escalation_rate, 0.1);
                        limited_drag(ui, &mut inputs.emission_factor, l.emission_factor, 0.01);
                        ui.end_row();
                    }
                });
        });

        ui.add_space(8.0);
        ui.strong(txt("gui.main.demand", "🛁 Estimated hot water demand"));
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("demand_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.main.tank", "Hot water demand/tank (litres)"));
                    limited_drag(ui, &mut self.demand.tank_litres, limits.tank_litres, 50.0);
                    ui.end_row();
                    ui.label(txt("gui.main.temps", "Cold → hot temperature (°C)"));
                    ui.horizontal(|ui| {
                        limited_drag(ui, &mut self.demand.cold_temp_c, limits.temperature_c, 1.0);
                        ui.label("→");
                        let hot_limit = limits.hot_temp_limit(self.demand.cold_temp_c);
                        self.demand.hot_temp_c = hot_limit.clamp(self.demand.hot_temp_c);
                        limited_drag(ui, &mut self.demand.hot_temp_c, hot_limit, 1.0);
                    });
                    ui.end_row();
                    ui.label(txt("gui.main.heating_days", "Days per year the tank is heated"));
                    limited_drag(ui, &mut self.demand.heating_days, limits.days, 5.0);
                    ui.end_row();
                    ui.label(txt("gui.main.topup_days", "Days per year needing a daytime top-up"));
                    limited_drag(ui, &mut self.demand.topup_days, limits.days, 1.0);
                    ui.end_row();
                    ui.label(txt("gui.main.lifetime", "🕰️ Project lifetime (years)"));
                    ui.add(
                        egui::DragValue::new(&mut self.demand.project_lifetime_years)
                            .speed(1.0)
                            .clamp_range(limits.lifetime_years.min..=limits.lifetime_years.max),
                    );
                    ui.end_row();
                });
        });

        ui.add_space(12.0);
        ui.separator();
        let comparison = match self.comparison() {
            Ok(c) => c,
            Err(e) => {
                ui.colored_label(RED_COLOR, format!("{}: {e}", self.tr.t(i18n::keys::ERROR_PREFIX)));
                return;
            }
        };

        if let Ok(per_fill) = self.energy_per_fill() {
            ui.label(format!(
                "⚡ {} {per_fill:.4} kWh ({:.4} L LPG)",
                txt("gui.main.energy_per_fill", "Energy needed to heat a full tank:"),
                lifecycle::lpg_litres_equivalent(per_fill)
            ));
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(txt("gui.main.select", "Systems to display:"));
            for tech in Technology::ALL {
                ui.checkbox(self.show_in_charts.get_mut(tech), tech.name());
            }
        });
        let any_visible = Technology::ALL.iter().any(|t| *self.show_in_charts.get(*t));

        ui.add_space(6.0);
        ui.heading(txt("gui.main.cost_heading", "Lifecycle Cost Comparison"));
        if any_visible {
            egui::Frame::none().fill(BEIGE_COLOR).inner_margin(8.0).show(ui, |ui| {
                bar_table(
                    ui,
                    "cost_bars",
                    &report::cost_rows(&comparison),
                    &self.show_in_charts,
                    RED_COLOR,
                    "£",
                );
            });
        } else {
            ui.colored_label(
                RED_COLOR,
                txt("gui.main.select_warning", "Please select at least one system to display the graph."),
            );
        }

        ui.add_space(6.0);
        let basis_label = match self.config.formula.emission_basis {
            EmissionBasis::Annual => txt("gui.main.basis.annual", "annual"),
            EmissionBasis::Lifetime => txt("gui.main.basis.lifetime", "lifetime"),
        };
        ui.heading(format!(
            "{} ({basis_label}, kg CO2e)",
            txt("gui.main.emission_heading", "Emission Comparison")
        ));
        if any_visible {
            egui::Frame::none().fill(BEIGE_COLOR).inner_margin(8.0).show(ui, |ui| {
                bar_table(
                    ui,
                    "emission_bars",
                    &report::emission_rows(&comparison),
                    &self.show_in_charts,
                    NAVY_COLOR,
                    "",
                );
            });
        }

        ui.add_space(6.0);
        ui.heading(txt("gui.main.final", "Final Recommendation"));
        if let Some((tech, cost)) = comparison.cheapest() {
            ui.strong(self.tr.tf(
                i18n::keys::RESULT_RECOMMENDATION,
                &[
                    ("tech", tech.to_string()),
                    ("years", comparison.project_lifetime_years.to_string()),
                ],
            ));
            ui.label(self.tr.tf(
                i18n::keys::RESULT_RECOMMENDATION_DETAIL,
                &[("cost", format_thousands(cost, 2))],
            ));
        }
        if let Some((tech, _)) = comparison.lowest_emission() {
            ui.label(self.tr.tf(i18n::keys::RESULT_LOWEST_EMISSION, &[("tech", tech.to_string())]));
        }

        ui.add_space(6.0);
        egui::CollapsingHeader::new(txt("gui.main.yearly", "💰 Annual running costs over time"))
            .default_open(false)
            .show(ui, |ui| {
                let visible: Vec<Technology> = Technology::ALL
                    .into_iter()
                    .filter(|t| *self.show_in_charts.get(*t))
                    .collect();
                egui::Grid::new("yearly_grid")
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong(txt("gui.main.year", "Year"));
                        for tech in &visible {
                            ui.strong(tech.name());
                        }
                        ui.end_row();
                        for year in 1..=comparison.project_lifetime_years {
                            ui.label(year.to_string());
                            for tech in &visible {
                                let cost = comparison
                                    .results
                                    .get(tech)
                                    .and_then(|r| r.yearly_costs.get((year - 1) as usize))
                                    .map(|e| e.cost)
                                    .unwrap_or(0.0);
                                ui.label(format!("£{}", format_thousands(cost, 2)));
                            }
                            ui.end_row();
                        }
                    });
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(any_visible, egui::Button::new(txt("gui.main.export_cost", "📥 Download Cost Data")))
                .clicked()
            {
                self.export_costs(&comparison);
            }
            if ui
                .add_enabled(
                    any_visible,
                    egui::Button::new(txt("gui.main.export_emission", "📥 Download Emission Data")),
                )
                .clicked()
            {
                self.export_emissions(&comparison);
            }
        });
        if let Some(msg) = &self.export_status {
            ui.label(msg);
        }
    }

    fn ui_hot_water(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.text(key, default);
        let limits = self.config.limits;
        heading_with_tip(
            ui,
            &txt("gui.hw.heading", "🔥 Hot Water Boiler Energy Calculator 💧"),
            &txt("gui.hw.tip", "Energy = litres × ΔT × c / 3600 / efficiency"),
        );
        ui.add_space(8.0);
        egui::Grid::new("hw_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(txt("gui.hw.cold", "🌡️ Cold water temperature (°C)"));
                limited_drag(ui, &mut self.hw_cold, limits.temperature_c, 0.5);
                ui.end_row();
                ui.label(txt("gui.hw.hot", "🔥 Hot water temperature (°C)"));
                let hot_limit = limits.hot_temp_limit(self.hw_cold);
                self.hw_hot = hot_limit.clamp(self.hw_hot);
                limited_drag(ui, &mut self.hw_hot, hot_limit, 0.5);
                ui.end_row();
                ui.label(txt("gui.hw.efficiency", "⚙️ Boiler efficiency (decimal)"));
                limited_drag(ui, &mut self.hw_efficiency, limits.boiler_efficiency, 0.01);
                ui.end_row();
            });
        if ui
            .button(txt("gui.hw.calculate", "🚀 Calculate energy per 100 litres"))
            .clicked()
        {
            self.hw_result = Some(
                match lifecycle::hot_water_energy(
                    &self.config.formula,
                    self.hw_cold,
                    self.hw_hot,
                    self.hw_efficiency,
                ) {
                    Ok(r) => self.tr.tf(
                        i18n::keys::RESULT_HOT_WATER,
                        &[
                            ("kwh", format!("{:.4}", r.energy_per_100_litres_kwh)),
                            ("lpg", format!("{:.4}", r.lpg_litres_per_100_litres)),
                        ],
                    ),
                    Err(e) => format!("{}: {e}", self.tr.t(i18n::keys::ERROR_PREFIX)),
                },
            );
        }
        if let Some(msg) = &self.hw_result {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(msg).strong());
        }
    }

    fn ui_loan(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.text(key, default);
        let limits = self.config.limits;
        ui.heading(txt("gui.loan.heading", "🏦 Loan Assessment"));
        ui.add_space(8.0);
        egui::Grid::new("loan_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(txt("gui.loan.amount", "💰 Loan amount (£)"));
                limited_drag(ui, &mut self.loan.principal, limits.loan_principal, 100.0);
                ui.end_row();
                ui.label(txt("gui.loan.rate", "📈 Annual interest rate (%)"));
                percent_drag(ui, &mut self.loan.annual_rate, limits.loan_rate, 0.1);
                ui.end_row();
                ui.label(txt("gui.loan.term", "📅 Loan term (years)"));
                limited_drag(ui, &mut self.loan.term_years, limits.loan_term_years, 1.0);
                ui.end_row();
            });
        ui.add_space(8.0);
        match lifecycle::loan_summary(&self.loan) {
            Ok(summary) => {
                ui.label(
                    egui::RichText::new(self.tr.tf(
                        i18n::keys::RESULT_MONTHLY_PAYMENT,
                        &[("payment", format_thousands(summary.monthly_payment, 2))],
                    ))
                    .size(20.0)
                    .strong(),
                );
                ui.label(self.tr.tf(
                    i18n::keys::RESULT_LOAN_TOTALS,
                    &[
                        ("repaid", format_thousands(summary.total_repaid, 2)),
                        ("interest", format_thousands(summary.total_interest, 2)),
                    ],
                ));
            }
            Err(e) => {
                ui.colored_label(RED_COLOR, format!("{}: {e}", self.tr.t(i18n::keys::ERROR_PREFIX)));
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.ensure_logo(ctx);

        // 투명도 적용. 매 프레임 누적되지 않도록 최초 스타일을 기준으로 한다.
        let base = self
            .base_style
            .get_or_insert_with(|| (*ctx.style()).clone())
            .clone();
        let mut style = base;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.text(key, default);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Hot Water Lifecycle Calculator"));
                ui.separator();
                if ui.button(txt("gui.formula.button", "Formula reference")).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut save_clicked = false;
            let mut browse_clicked = false;
            egui::Window::new(txt("gui.settings.title", "Program Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(self.lang_input.clone())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), txt("gui.settings.lang.auto", "System"));
                            ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        });
                    ui.separator();
                    ui.label(txt("gui.settings.basis", "Emission figure shown"));
                    ui.horizontal(|ui| {
                        ui.selectable_value(
                            &mut self.config.formula.emission_basis,
                            EmissionBasis::Lifetime,
                            txt("gui.main.basis.lifetime", "lifetime"),
                        );
                        ui.selectable_value(
                            &mut self.config.formula.emission_basis,
                            EmissionBasis::Annual,
                            txt("gui.main.basis.annual", "annual"),
                        );
                    });
                    ui.label(txt("gui.settings.tie", "Tie-break between equal totals"));
                    ui.horizontal(|ui| {
                        ui.selectable_value(
                            &mut self.config.formula.tie_break,
                            TieBreak::FirstMinimum,
                            txt("gui.settings.tie.first", "first listed"),
                        );
                        ui.selectable_value(
                            &mut self.config.formula.tie_break,
                            TieBreak::LastMinimum,
                            txt("gui.settings.tie.last", "last listed"),
                        );
                    });
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(txt("gui.settings.font", "User font (.ttf/.ttc)"));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.custom_font_path);
                        if ui.button(txt("gui.settings.browse", "Browse…")).clicked() {
                            browse_clicked = true;
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(RED_COLOR, err);
                    }
                    ui.separator();
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        save_clicked = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            if browse_clicked {
                if let Some(path) = FileDialog::new()
                    .add_filter("Font", &["ttf", "ttc", "otf"])
                    .pick_file()
                {
                    self.custom_font_path = path.display().to_string();
                    self.font_load_error = load_custom_font(ctx, &self.custom_font_path).err();
                }
            }
            if save_clicked {
                self.config.language = self.lang_input.clone();
                self.config.window_alpha = self.window_alpha;
                let resolved = i18n::resolve_language(&self.config.language, None);
                self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
                self.settings_status = Some(match self.config.save() {
                    Ok(()) => txt("gui.settings.saved", "Saved."),
                    Err(e) => format!("Save error: {e}"),
                });
            }
        }

        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.label(txt(
                        "gui.formula.energy",
                        "Energy (kWh) = litres × ΔT × 4.186 / 3600 / efficiency (or CoP).",
                    ));
                    ui.label(txt(
                        "gui.formula.annual",
                        "Annual energy = energy per tank × (heating days + top-up days).",
                    ));
                    ui.label(txt(
                        "gui.formula.running",
                        "Year n cost = annual energy / efficiency × price × (1 + escalation)^(n-1).",
                    ));
                    ui.label(txt(
                        "gui.formula.lifecycle",
                        "Lifecycle cost = installation + Σ yearly costs; cheapest = first minimum.",
                    ));
                    ui.label(txt(
                        "gui.formula.emission",
                        "Emissions = annual energy × emission factor (× lifetime for the lifetime figure).",
                    ));
                    ui.label(txt(
                        "gui.formula.loan",
                        "Loan: P·r / (1 − (1 + r)^−12n), r = annual rate / 12; P / 12n when r = 0.",
                    ));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(160.0)
            .default_width(220.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Main => self.ui_main(ui),
                    Tab::HotWater => self.ui_hot_water(ui),
                    Tab::Loan => self.ui_loan(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_from_config_defaults() {
        let cfg = config::Config::default();
        let app = GuiApp::new(cfg.clone());
        assert_eq!(app.tab, Tab::Main);
        assert_eq!(app.demand, cfg.demand);
        assert_eq!(app.technologies, cfg.technologies);
        assert_eq!(app.loan, cfg.loan);
    }

    #[test]
    fn comparison_clamps_out_of_range_inputs() {
        let mut app = GuiApp::new(config::Config::default());
        app.technologies.heat_pump.efficiency_or_cop = 50.0;
        let clamped = app.comparison().unwrap();
        let mut reference = app.technologies;
        reference.heat_pump.efficiency_or_cop = 5.0;
        let expected = lifecycle::compare_technologies(
            &app.demand,
            &reference.to_map(),
            &app.config.formula,
        )
        .unwrap();
        let got = clamped.results[&Technology::HeatPump].total_cost;
        let want = expected.results[&Technology::HeatPump].total_cost;
        assert!((got - want).abs() < 1e-9);
    }

    #[test]
    fn energy_per_fill_ignores_usage_days() {
        let mut app = GuiApp::new(config::Config::default());
        app.demand.heating_days = 0.0;
        app.demand.topup_days = 0.0;
        let kwh = app.energy_per_fill().unwrap();
        assert!((kwh - 400.0 * 55.0 * 4.186 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_temperatures_never_reach_the_engine() {
        let mut app = GuiApp::new(config::Config::default());
        app.demand.cold_temp_c = 65.0;
        app.demand.hot_temp_c = 10.0;
        assert_eq!(app.energy_per_fill().unwrap(), 0.0);
        let comparison = app.comparison().unwrap();
        assert!(comparison.results.values().all(|r| r.total_cost >= r.install_cost));
    }

    #[test]
    fn font_candidates_include_windows_fonts_dir() {
        let with_windir = font_candidates(Some(OsStr::new("C:/Windows")));
        assert!(with_windir.contains(&Path::new("C:/Windows").join("Fonts").join("malgun.ttf")));
        let without = font_candidates(None);
        assert!(without.len() < with_windir.len());
        assert_eq!(without[0], PathBuf::from("assets/fonts/malgun.ttf"));
    }

    #[test]
    fn missing_font_opens_settings() {
        let app = GuiApp::new(config::Config::default()).with_font_error(Some("no font".into()));
        assert!(app.show_settings_modal);
        assert_eq!(app.font_load_error.as_deref(), Some("no font"));
        let app = GuiApp::new(config::Config::default()).with_font_error(None);
        assert!(!app.show_settings_modal);
    }

    #[test]
    fn korean_language_uses_korean_labels() {
        let cfg = config::Config {
            language: "ko".into(),
            ..config::Config::default()
        };
        let app = GuiApp::new(cfg);
        assert_eq!(app.tr.text("gui.tab.loan", "🏦 Loan Calculator"), "🏦 대출 계산기");
    }

    #[test]
    fn export_series_skips_hidden_systems() {
        let mut app = GuiApp::new(config::Config::default());
        app.show_in_charts.hydrogen_boiler = false;
        let comparison = app.comparison().unwrap();
        let names: Vec<&str> = app.export_series(&comparison).iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["LPG Boiler", "Electric Boiler", "Heat Pump"]);
    }
}
