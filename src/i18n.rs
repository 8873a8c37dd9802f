use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_LIFECYCLE: &str = "main_menu.lifecycle";
    pub const MAIN_MENU_HOT_WATER: &str = "main_menu.hot_water";
    pub const MAIN_MENU_LOAN: &str = "main_menu.loan";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const NOTE_CLAMPED: &str = "note.clamped";
    pub const NOTE_KEEP_DEFAULT: &str = "note.keep_default";

    pub const LIFECYCLE_HEADING: &str = "lifecycle.heading";
    pub const LIFECYCLE_DEMAND_HEADING: &str = "lifecycle.demand_heading";
    pub const PROMPT_TANK_LITRES: &str = "prompt.tank_litres";
    pub const PROMPT_COLD_TEMP: &str = "prompt.cold_temp";
    pub const PROMPT_HOT_TEMP: &str = "prompt.hot_temp";
    pub const ERROR_HOT_BELOW_COLD: &str = "error.hot_below_cold";
    pub const PROMPT_HEATING_DAYS: &str = "prompt.heating_days";
    pub const PROMPT_TOPUP_DAYS: &str = "prompt.topup_days";
    pub const PROMPT_LIFETIME: &str = "prompt.lifetime";
    pub const PROMPT_INSTALL_COST: &str = "prompt.install_cost";
    pub const PROMPT_EFFICIENCY_PCT: &str = "prompt.efficiency_pct";
    pub const PROMPT_COP: &str = "prompt.cop";
    pub const PROMPT_FUEL_PRICE: &str = "prompt.fuel_price";
    pub const PROMPT_ESCALATION_PCT: &str = "prompt.escalation_pct";
    pub const PROMPT_EMISSION_FACTOR: &str = "prompt.emission_factor";
    pub const RESULT_ENERGY_PER_FILL: &str = "result.energy_per_fill";
    pub const RESULT_COST_TABLE: &str = "result.cost_table";
    pub const RESULT_EMISSION_TABLE: &str = "result.emission_table";
    pub const RESULT_RECOMMENDATION: &str = "result.recommendation";
    pub const RESULT_RECOMMENDATION_DETAIL: &str = "result.recommendation_detail";
    pub const RESULT_LOWEST_EMISSION: &str = "result.lowest_emission";
    pub const PROMPT_EXPORT: &str = "prompt.export";
    pub const RESULT_EXPORTED: &str = "result.exported";

    pub const HOT_WATER_HEADING: &str = "hot_water.heading";
    pub const PROMPT_BOILER_EFFICIENCY: &str = "prompt.boiler_efficiency";
    pub const RESULT_HOT_WATER: &str = "result.hot_water";

    pub const LOAN_HEADING: &str = "loan.heading";
    pub const PROMPT_LOAN_AMOUNT: &str = "prompt.loan_amount";
    pub const PROMPT_LOAN_RATE: &str = "prompt.loan_rate";
    pub const PROMPT_LOAN_TERM: &str = "prompt.loan_term";
    pub const RESULT_MONTHLY_PAYMENT: &str = "result.monthly_payment";
    pub const RESULT_LOAN_TOTALS: &str = "result.loan_totals";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 언어팩에서 키를 조회한다. 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 키 자체 순으로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        builtin.map(str::to_string).unwrap_or_else(|| key.to_string())
    }

    /// GUI 라벨용. 언어팩 → 한국어 내장 문자열(ko일 때) → 호출부 영문 기본값 순으로 고른다.
    pub fn text(&self, key: &str, default: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::Ko => ko_gui(key).unwrap_or(default).to_string(),
            Language::En => default.to_string(),
        }
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// 템플릿의 `{key}`를 값으로 바꾼다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-gb" | "en-uk" => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content)?;
    tracing::debug!(path = %path.display(), entries = map.len(), "language pack loaded");
    Some(map)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 온수 설비 수명주기 계산기 ===",
        MAIN_MENU_LIFECYCLE => "1) 수명주기 비용/배출 비교",
        MAIN_MENU_HOT_WATER => "2) 온수 에너지 계산기",
        MAIN_MENU_LOAN => "3) 대출 계산기",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        NOTE_CLAMPED => "입력 범위를 벗어나 {value}(으)로 조정했습니다.",
        NOTE_KEEP_DEFAULT => "(엔터 = 기본값 유지)",
        LIFECYCLE_HEADING => "\n-- 수명주기 비용/배출 비교 --",
        LIFECYCLE_DEMAND_HEADING => "온수 수요",
        PROMPT_TANK_LITRES => "온수 수요/탱크 용량 [L]",
        PROMPT_COLD_TEMP => "냉수 온도 [°C]",
        PROMPT_HOT_TEMP => "온수 온도 [°C]",
        ERROR_HOT_BELOW_COLD => "온수 온도는 냉수 온도({cold}°C) 이상이어야 합니다.",
        PROMPT_HEATING_DAYS => "연간 탱크 가열 일수",
        PROMPT_TOPUP_DAYS => "낮 시간 추가 가열 일수",
        PROMPT_LIFETIME => "사업 기간 [년]",
        PROMPT_INSTALL_COST => "설치비 [£]",
        PROMPT_EFFICIENCY_PCT => "효율 [%]",
        PROMPT_COP => "COP",
        PROMPT_FUEL_PRICE => "연료 단가 [£/kWh 또는 £/L]",
        PROMPT_ESCALATION_PCT => "단가 상승률 [%/년]",
        PROMPT_EMISSION_FACTOR => "배출계수 [kg CO2e/kWh]",
        RESULT_ENERGY_PER_FILL => "탱크 1회 가열 에너지: {kwh} kWh (LPG {lpg} L 상당)",
        RESULT_COST_TABLE => "수명주기 비용 비교 (설치비 포함)",
        RESULT_EMISSION_TABLE => "배출량 비교 ({basis}, kg CO2e)",
        RESULT_RECOMMENDATION => "{tech}이(가) {years}년 기준 가장 경제적인 선택입니다.",
        RESULT_RECOMMENDATION_DETAIL => "설치비와 에너지 비용을 포함한 총 예상 비용은 £{cost}입니다.",
        RESULT_LOWEST_EMISSION => "배출량이 가장 적은 기술: {tech}",
        PROMPT_EXPORT => "연차별 결과를 CSV로 저장할 파일명 (건너뛰려면 엔터): ",
        RESULT_EXPORTED => "저장 완료: {path}",
        HOT_WATER_HEADING => "\n-- 온수 에너지 계산기 --",
        PROMPT_BOILER_EFFICIENCY => "보일러 효율 (소수)",
        RESULT_HOT_WATER => "온수 100 L당 필요 에너지: {kwh} kWh (LPG {lpg} L 상당)",
        LOAN_HEADING => "\n-- 대출 계산기 --",
        PROMPT_LOAN_AMOUNT => "대출 원금 [£]",
        PROMPT_LOAN_RATE => "연이율 [%]",
        PROMPT_LOAN_TERM => "상환 기간 [년]",
        RESULT_MONTHLY_PAYMENT => "월 상환액: £{payment}",
        RESULT_LOAN_TOTALS => "총 상환액: £{repaid}, 총 이자: £{interest}",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "언어: {lang}, 배출량 기준: {basis}, 동률 규칙: {tie}",
        SETTINGS_OPTIONS => "1) 언어 변경  2) 배출량 기준 전환  3) 동률 규칙 전환  0) 돌아가기",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/ko/en): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Hot Water Lifecycle Calculator ===",
        MAIN_MENU_LIFECYCLE => "1) Lifecycle cost & emission comparison",
        MAIN_MENU_HOT_WATER => "2) Hot water energy calculator",
        MAIN_MENU_LOAN => "3) Loan calculator",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please select again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        NOTE_CLAMPED => "Out of range, adjusted to {value}.",
        NOTE_KEEP_DEFAULT => "(Enter = keep default)",
        LIFECYCLE_HEADING => "\n-- Lifecycle cost & emission comparison --",
        LIFECYCLE_DEMAND_HEADING => "Hot water demand",
        PROMPT_TANK_LITRES => "Hot water demand/tank [litres]",
        PROMPT_COLD_TEMP => "Cold water temperature [°C]",
        PROMPT_HOT_TEMP => "Hot water temperature [°C]",
        ERROR_HOT_BELOW_COLD => "Hot water temperature must be at least the cold temperature ({cold}°C).",
        PROMPT_HEATING_DAYS => "Days per year the tank is heated",
        PROMPT_TOPUP_DAYS => "Days per year needing a daytime top-up",
        PROMPT_LIFETIME => "Project lifetime [years]",
        PROMPT_INSTALL_COST => "Installation cost [£]",
        PROMPT_EFFICIENCY_PCT => "Efficiency [%]",
        PROMPT_COP => "Coefficient of performance (CoP)",
        PROMPT_FUEL_PRICE => "Fuel price [£/kWh or £/litre]",
        PROMPT_ESCALATION_PCT => "Price escalation [% per year]",
        PROMPT_EMISSION_FACTOR => "Emission factor [kg CO2e/kWh]",
        RESULT_ENERGY_PER_FILL => "Energy to heat a full tank: {kwh} kWh ({lpg} litres of LPG)",
        RESULT_COST_TABLE => "Lifecycle cost comparison (including installation)",
        RESULT_EMISSION_TABLE => "Emission comparison ({basis}, kg CO2e)",
        RESULT_RECOMMENDATION => "{tech} is the most cost-effective choice over {years} years.",
        RESULT_RECOMMENDATION_DETAIL => {
            "This is based on a total estimated cost of £{cost}, including installation and energy expenses."
        }
        RESULT_LOWEST_EMISSION => "Lowest emission technology: {tech}",
        PROMPT_EXPORT => "CSV file name for yearly results (Enter to skip): ",
        RESULT_EXPORTED => "Saved: {path}",
        HOT_WATER_HEADING => "\n-- Hot water energy calculator --",
        PROMPT_BOILER_EFFICIENCY => "Boiler efficiency (decimal)",
        RESULT_HOT_WATER => "Energy required per 100 litres of hot water: {kwh} kWh ({lpg} litres of LPG)",
        LOAN_HEADING => "\n-- Loan calculator --",
        PROMPT_LOAN_AMOUNT => "Loan amount [£]",
        PROMPT_LOAN_RATE => "Annual interest rate [%]",
        PROMPT_LOAN_TERM => "Loan term [years]",
        RESULT_MONTHLY_PAYMENT => "Monthly loan payment: £{payment}",
        RESULT_LOAN_TOTALS => "Total repaid: £{repaid}, total interest: £{interest}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Language: {lang}, emission basis: {basis}, tie-break: {tie}",
        SETTINGS_OPTIONS => "1) Language  2) Toggle emission basis  3) Toggle tie-break  0) Back",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en): ",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    };
    Some(s)
}

/// GUI 라벨 한국어 내장 문자열.
fn ko_gui(key: &str) -> Option<&'static str> {
    let s = match key {
        "gui.nav.app_title" => "온수 설비 수명주기 계산기",
        "gui.nav.heading" => "메뉴",
        "gui.nav.logo_missing" => "❌ 로고를 찾을 수 없습니다. logo.png를 프로그램 옆에 두세요.",
        "gui.tab.main" => "🏠 수명주기 비교",
        "gui.tab.hot_water" => "🔥 온수 에너지 계산기",
        "gui.tab.loan" => "🏦 대출 계산기",
        "gui.main.heading" => "온수 설비 수명주기 지속가능성 계산기",
        "gui.main.tip" => "온수 가열 설비의 비용, 연료 사용량, 배출량을 비교합니다.",
        "gui.main.intro" => "현장 값으로 수정하거나 제공된 대표값을 그대로 사용하세요.",
        "gui.main.technical" => "⚙️ 기술별 입력 (보조금 반영 후)",
        "gui.main.col.system" => "설비",
        "gui.main.col.install" => "설치비 (£)",
        "gui.main.col.efficiency" => "효율 / COP",
        "gui.main.col.price" => "단가 (£/kWh, £/L)",
        "gui.main.col.escalation" => "상승률 (%/년)",
        "gui.main.col.emission" => "배출계수",
        "gui.main.demand" => "🛁 예상 온수 수요",
        "gui.main.tank" => "온수 수요/탱크 용량 (L)",
        "gui.main.temps" => "냉수 → 온수 온도 (°C)",
        "gui.main.heating_days" => "연간 탱크 가열 일수",
        "gui.main.topup_days" => "낮 시간 추가 가열 일수",
        "gui.main.lifetime" => "🕰️ 사업 기간 (년)",
        "gui.main.energy_per_fill" => "탱크 1회 가열 에너지:",
        "gui.main.select" => "표시할 설비:",
        "gui.main.select_warning" => "그래프를 표시하려면 설비를 하나 이상 선택하세요.",
        "gui.main.cost_heading" => "수명주기 비용 비교",
        "gui.main.emission_heading" => "배출량 비교",
        "gui.main.basis.annual" => "연간",
        "gui.main.basis.lifetime" => "사업 기간",
        "gui.main.final" => "최종 추천",
        "gui.main.yearly" => "💰 연차별 운전비",
        "gui.main.year" => "연차",
        "gui.main.export_cost" => "📥 비용 데이터 저장",
        "gui.main.export_emission" => "📥 배출량 데이터 저장",
        "gui.hw.heading" => "🔥 온수 보일러 에너지 계산기 💧",
        "gui.hw.tip" => "에너지 = 리터 × ΔT × c / 3600 / 효율",
        "gui.hw.cold" => "🌡️ 냉수 온도 (°C)",
        "gui.hw.hot" => "🔥 온수 온도 (°C)",
        "gui.hw.efficiency" => "⚙️ 보일러 효율 (소수)",
        "gui.hw.calculate" => "🚀 100 L당 에너지 계산",
        "gui.loan.heading" => "🏦 대출 평가",
        "gui.loan.amount" => "💰 대출 원금 (£)",
        "gui.loan.rate" => "📈 연이율 (%)",
        "gui.loan.term" => "📅 상환 기간 (년)",
        "gui.formula.button" => "계산식 보기",
        "gui.formula.title" => "계산식",
        "gui.formula.energy" => "에너지(kWh) = 리터 × ΔT × 4.186 / 3600 / 효율(또는 COP)",
        "gui.formula.annual" => "연간 에너지 = 탱크 1회 에너지 × (가열 일수 + 추가 가열 일수)",
        "gui.formula.running" => "n년차 비용 = 연간 에너지 / 효율 × 단가 × (1 + 상승률)^(n-1)",
        "gui.formula.lifecycle" => "수명주기 비용 = 설치비 + Σ 연차별 비용, 최저가는 먼저 나온 최솟값",
        "gui.formula.emission" => "배출량 = 연간 에너지 × 배출계수 (사업 기간 기준이면 × 기간)",
        "gui.formula.loan" => "대출: P·r / (1 − (1 + r)^−12n), r = 연이율 / 12, r = 0이면 P / 12n",
        "gui.settings.title" => "프로그램 설정",
        "gui.settings.lang" => "언어",
        "gui.settings.lang.auto" => "시스템",
        "gui.settings.basis" => "표시할 배출량 기준",
        "gui.settings.tie" => "총액이 같을 때 선택 규칙",
        "gui.settings.tie.first" => "먼저 나온 항목",
        "gui.settings.tie.last" => "나중 항목",
        "gui.settings.alpha" => "창 투명도",
        "gui.settings.font" => "사용자 폰트 (.ttf/.ttc)",
        "gui.settings.browse" => "찾아보기…",
        "gui.settings.save" => "설정 저장",
        "gui.settings.saved" => "저장했습니다.",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_recommendation_fills_placeholders() {
        let tr = Translator::new("en");
        let msg = tr.tf(
            keys::RESULT_RECOMMENDATION,
            &[("tech", "Heat Pump".into()), ("years", "15".into())],
        );
        assert_eq!(msg, "Heat Pump is the most cost-effective choice over 15 years.");
    }

    #[test]
    fn unknown_key_returns_key() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn gui_text_uses_korean_builtin_or_default() {
        let ko = Translator::new("ko");
        assert_eq!(ko.text("gui.loan.heading", "🏦 Loan Assessment"), "🏦 대출 평가");
        assert_eq!(ko.text("gui.no.such", "Fallback"), "Fallback");
        let en = Translator::new("en");
        assert_eq!(en.text("gui.loan.heading", "🏦 Loan Assessment"), "🏦 Loan Assessment");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-kr", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-gb")), "en");
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[result]\nmonthly_payment = \"Pay £{payment}\"\n").unwrap();
        assert_eq!(map.get("result.monthly_payment").map(String::as_str), Some("Pay £{payment}"));
    }
}
