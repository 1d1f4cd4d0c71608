use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EVALUATE: &str = "main_menu.evaluate";
    pub const MAIN_MENU_SWEEP: &str = "main_menu.sweep";
    pub const MAIN_MENU_PRESETS: &str = "main_menu.presets";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_SELECTION: &str = "error.invalid_selection";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const EVALUATE_HEADING: &str = "evaluate.heading";
    pub const EVALUATE_KEEP_HINT: &str = "evaluate.keep_hint";
    pub const PROMPT_FIXED_PRICE: &str = "prompt.fixed_price";
    pub const PROMPT_FLOOR_AREA: &str = "prompt.floor_area";
    pub const PROMPT_PRICE_RENOVATED: &str = "prompt.price_renovated";
    pub const PROMPT_PRICE_UNRENOVATED: &str = "prompt.price_unrenovated";
    pub const PROMPT_SPECIAL_EXPENSES: &str = "prompt.special_expenses";
    pub const PROMPT_COMMISSION: &str = "prompt.commission";
    pub const PROMPT_BROKER: &str = "prompt.broker";
    pub const PROMPT_FINANCED: &str = "prompt.financed";
    pub const PROMPT_INTEREST: &str = "prompt.interest";
    pub const PROMPT_HOLDING_DAYS: &str = "prompt.holding_days";
    pub const PROMPT_TARGET_ROI: &str = "prompt.target_roi";
    pub const PROMPT_SHOW_DETAIL: &str = "prompt.show_detail";

    pub const RESULT_SUMMARY_HEADER: &str = "result.summary_header";
    pub const RESULT_DETAIL_HEADING: &str = "result.detail_heading";
    pub const RESULT_VIABLE: &str = "result.viable";
    pub const RESULT_NOT_VIABLE: &str = "result.not_viable";

    pub const SWEEP_HEADING: &str = "sweep.heading";
    pub const SWEEP_PARAMETER_OPTIONS: &str = "sweep.parameter_options";
    pub const SWEEP_METRIC_OPTIONS: &str = "sweep.metric_options";
    pub const SWEEP_TIER_OPTIONS: &str = "sweep.tier_options";
    pub const PROMPT_SWEEP_START: &str = "prompt.sweep_start";
    pub const PROMPT_SWEEP_END: &str = "prompt.sweep_end";
    pub const PROMPT_SWEEP_STEP: &str = "prompt.sweep_step";
    pub const SWEEP_RESULT_HEADER: &str = "sweep.result_header";

    pub const PRESET_HEADING: &str = "preset.heading";
    pub const PRESET_OPTIONS: &str = "preset.options";
    pub const PRESET_FIXED_PRICE_NOTE: &str = "preset.fixed_price_note";
    pub const PROMPT_LEVERAGED: &str = "prompt.leveraged";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_RESET_DONE: &str = "settings.reset_done";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const PROMPT_ESTIMATED_PRICE: &str = "prompt.estimated_price";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Es,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("es") {
            Language::Es
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ko => "ko",
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
    /// 언어 코드에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let mut tr = Self::new(lang_code);
        tr.overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        tr
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾고, 끝내 없으면 키를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let found = match self.lang {
            Language::En => en(key),
            Language::Es => es(key).or_else(|| en(key)),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        found.unwrap_or(key)
    }
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
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("es") => Some("es".into()),
        other if other.starts_with("ko") => Some("ko".into()),
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
        "en" | "es" | "ko" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 중첩 테이블은 점으로 이은 키가 된다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Table = toml::from_str(src).ok()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    walk(&format!("{prefix}.{k}"), v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in &value {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Goodbye.",
        MAIN_MENU_TITLE => "\n=== Property Feasibility Toolbox ===",
        MAIN_MENU_EVALUATE => "1) Evaluate scenario",
        MAIN_MENU_SWEEP => "2) Sensitivity sweep",
        MAIN_MENU_PRESETS => "3) Standard sensitivity charts",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        INVALID_SELECTION => "Invalid selection.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        EVALUATE_HEADING => "\n-- Evaluate scenario --",
        EVALUATE_KEEP_HINT => "Press Enter to keep the value in brackets.",
        PROMPT_FIXED_PRICE => "Fixed purchase price [EUR] (empty = solve from target ROI): ",
        PROMPT_FLOOR_AREA => "Floor area [m2]",
        PROMPT_PRICE_RENOVATED => "Sale price renovated [EUR/m2]",
        PROMPT_PRICE_UNRENOVATED => "Sale price unrenovated [EUR/m2]",
        PROMPT_SPECIAL_EXPENSES => "Special expenses [EUR]",
        PROMPT_COMMISSION => "Sale commission [%]",
        PROMPT_BROKER => "Broker fee [%]",
        PROMPT_FINANCED => "Financed [%]",
        PROMPT_INTEREST => "Annual interest [%]",
        PROMPT_HOLDING_DAYS => "Holding period [days]",
        PROMPT_TARGET_ROI => "Target annual ROI [%]",
        PROMPT_SHOW_DETAIL => "Show detail for tier (0-3, empty = skip): ",
        RESULT_SUMMARY_HEADER => "tier | purchase | investment | net profit | ROI unlev | ROI lev | viable",
        RESULT_DETAIL_HEADING => "\n-- Detail --",
        RESULT_VIABLE => "yes",
        RESULT_NOT_VIABLE => "no",
        SWEEP_HEADING => "\n-- Sensitivity sweep --",
        SWEEP_PARAMETER_OPTIONS => "Parameter: 1) sale price/m2  2) renovation cost/m2  3) holding days",
        SWEEP_METRIC_OPTIONS => {
            "Metric: 1) ROI unlev  2) ROI lev  3) gross profit  4) net profit  5) purchase price"
        }
        SWEEP_TIER_OPTIONS => "Tier: 0) none  1) light  2) budget full  3) standard full",
        PROMPT_SWEEP_START => "Start: ",
        PROMPT_SWEEP_END => "End: ",
        PROMPT_SWEEP_STEP => "Step: ",
        SWEEP_RESULT_HEADER => "value | metric",
        PRESET_HEADING => "\n-- Standard sensitivity charts --",
        PRESET_OPTIONS => "1) ROI vs sale price  2) profit vs renovation cost  3) profit vs holding days",
        PRESET_FIXED_PRICE_NOTE => "Charts hold the estimated purchase price fixed.",
        PROMPT_LEVERAGED => "Leveraged (75% financed)? (y/N): ",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Language  2) Edit defaults  3) Reset defaults",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/en/es/ko): ",
        SETTINGS_RESET_DONE => "Defaults restored.",
        SETTINGS_SAVED => "Settings saved.",
        PROMPT_ESTIMATED_PRICE => "Estimated purchase price [EUR]",
        _ => return None,
    };
    Some(s)
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Hasta luego.",
        MAIN_MENU_TITLE => "\n=== Calculadora de Oportunidades ===",
        MAIN_MENU_EVALUATE => "1) Evaluar escenario",
        MAIN_MENU_SWEEP => "2) Análisis de sensibilidad",
        MAIN_MENU_PRESETS => "3) Gráficos de sensibilidad estándar",
        MAIN_MENU_SETTINGS => "4) Configuración",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Seleccione menú: ",
        PROMPT_SELECT => "Seleccione: ",
        INVALID_SELECTION_RETRY => "Entrada no válida. Inténtelo de nuevo.",
        INVALID_SELECTION => "Selección no válida.",
        ERROR_INVALID_NUMBER => "Introduzca un número.",
        EVALUATE_HEADING => "\n-- Evaluar escenario --",
        EVALUATE_KEEP_HINT => "Pulse Intro para mantener el valor entre corchetes.",
        PROMPT_FIXED_PRICE => "Precio de compra fijo [EUR] (vacío = según ROI objetivo): ",
        PROMPT_FLOOR_AREA => "Metros cuadrados [m2]",
        PROMPT_PRICE_RENOVATED => "Precio venta reformado [EUR/m2]",
        PROMPT_PRICE_UNRENOVATED => "Precio venta sin reformar [EUR/m2]",
        PROMPT_SPECIAL_EXPENSES => "Gastos especiales [EUR]",
        PROMPT_COMMISSION => "Comisión de venta [%]",
        PROMPT_BROKER => "Broker fee [%]",
        PROMPT_FINANCED => "Porcentaje financiado [%]",
        PROMPT_INTEREST => "Interés anual [%]",
        PROMPT_HOLDING_DAYS => "Días en balance",
        PROMPT_TARGET_ROI => "ROI objetivo anual [%]",
        PROMPT_SHOW_DETAIL => "Ver detalle del escenario (0-3, vacío = omitir): ",
        RESULT_SUMMARY_HEADER => {
            "escenario | compra | inversión | ganancia neta | ROI sin apal. | ROI apal. | viable"
        }
        RESULT_DETAIL_HEADING => "\n-- Desglose --",
        RESULT_VIABLE => "sí",
        RESULT_NOT_VIABLE => "no",
        SWEEP_HEADING => "\n-- Análisis de sensibilidad --",
        SWEEP_PARAMETER_OPTIONS => "Variable: 1) precio venta/m2  2) coste reforma/m2  3) días",
        SWEEP_TIER_OPTIONS => {
            "Escenario: 0) sin reforma  1) lavado de cara  2) integral barata  3) integral normal"
        }
        PROMPT_SWEEP_START => "Inicio: ",
        PROMPT_SWEEP_END => "Fin: ",
        PROMPT_SWEEP_STEP => "Paso: ",
        SWEEP_RESULT_HEADER => "valor | métrica",
        PRESET_HEADING => "\n-- Gráficos de sensibilidad estándar --",
        PRESET_FIXED_PRICE_NOTE => "Los gráficos usan el precio de compra estimado como fijo.",
        PROMPT_LEVERAGED => "¿Apalancado (75% financiado)? (s/N): ",
        SETTINGS_HEADING => "\n-- Configuración --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma actual:",
        SETTINGS_OPTIONS => "1) Idioma  2) Editar valores por defecto  3) Reset parámetros",
        SETTINGS_PROMPT_LANGUAGE => "Idioma (auto/en/es/ko): ",
        SETTINGS_RESET_DONE => "Valores por defecto restaurados.",
        SETTINGS_SAVED => "Configuración guardada.",
        PROMPT_ESTIMATED_PRICE => "Precio de compra estimado [EUR]",
        _ => return None,
    };
    Some(s)
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 부동산 사업 타당성 계산기 ===",
        MAIN_MENU_EVALUATE => "1) 시나리오 평가",
        MAIN_MENU_SWEEP => "2) 민감도 분석",
        MAIN_MENU_PRESETS => "3) 기본 민감도 차트",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        INVALID_SELECTION => "잘못된 선택입니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        EVALUATE_HEADING => "\n-- 시나리오 평가 --",
        EVALUATE_KEEP_HINT => "엔터를 누르면 괄호 안의 값을 유지합니다.",
        PROMPT_FIXED_PRICE => "고정 매입가 [EUR] (비우면 목표 ROI로 역산): ",
        PROMPT_FLOOR_AREA => "면적 [m2]",
        PROMPT_TARGET_ROI => "목표 연 ROI [%]",
        PROMPT_HOLDING_DAYS => "보유 기간 [일]",
        RESULT_DETAIL_HEADING => "\n-- 상세 --",
        RESULT_VIABLE => "적합",
        RESULT_NOT_VIABLE => "부적합",
        SWEEP_HEADING => "\n-- 민감도 분석 --",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_RESET_DONE => "기본값으로 초기화했습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    };
    Some(s)
}
