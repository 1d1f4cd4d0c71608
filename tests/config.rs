//! 설정 파일과 언어 번들 테스트.
use feasibility_toolbox::config::{self, Config, ScenarioDefaults};
use feasibility_toolbox::i18n::{self, keys, Language, Translator};

#[test]
fn config_toml_roundtrip() {
    let cfg = Config::default();
    let text = toml::to_string_pretty(&cfg).expect("serialize");
    let back: Config = toml::from_str(&text).expect("parse");
    assert_eq!(back, cfg);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let src = "language = \"es\"\n[defaults]\nfloor_area_m2 = 100.0\n";
    let cfg: Config = toml::from_str(src).expect("parse");
    assert_eq!(cfg.language, "es");
    assert_eq!(cfg.defaults.floor_area_m2, 100.0);
    assert_eq!(cfg.defaults.holding_period_days, 200);
    assert_eq!(cfg.defaults.estimated_purchase_price, 200_000.0);
}

#[test]
fn load_or_create_writes_missing_file() {
    let dir = std::env::temp_dir().join(format!("feasibility_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("config.toml");
    let _ = std::fs::remove_file(&path);

    let mut cfg = config::load_or_create(&path).expect("create");
    assert!(path.exists());
    assert_eq!(cfg.defaults, ScenarioDefaults::default());

    cfg.defaults.financed_pct = 60.0;
    cfg.save().expect("save");
    let reloaded = config::load_or_create(&path).expect("reload");
    assert_eq!(reloaded.defaults.financed_pct, 60.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn defaults_build_target_roi_input() {
    let input = ScenarioDefaults::default().to_input();
    assert_eq!(input.fixed_purchase_price, None);
    assert_eq!(input.target_annual_roi_pct, 25.0);
    assert_eq!(input.sale_commission_pct, 3.0);
    assert!(input.validate().is_ok());
}

#[test]
fn translator_falls_back_to_english() {
    let es = Translator::new("es-ES");
    assert_eq!(es.language(), Language::Es);
    assert_eq!(es.t(keys::MAIN_MENU_EXIT), "0) Salir");
    let en = Translator::new("en");
    assert_eq!(es.t(keys::PRESET_OPTIONS), en.t(keys::PRESET_OPTIONS));

    let ko = Translator::new("ko");
    assert_eq!(ko.t(keys::PROMPT_BROKER), "Broker fee [%]");
    assert_eq!(ko.t("no.such.key"), "no.such.key");
}

#[test]
fn language_resolution_order() {
    assert_eq!(i18n::resolve_language("es-ES", Some("ko")), "es");
    assert_eq!(i18n::resolve_language("auto", Some("ko")), "ko");
    assert_eq!(i18n::resolve_language("", Some("en-GB")), "en");
}

#[test]
fn toml_pack_flattens_nested_tables() {
    let map = i18n::parse_toml_to_map("[main_menu]\nexit = \"0) Quit\"\n").expect("pack");
    assert_eq!(map.get(keys::MAIN_MENU_EXIT).map(String::as_str), Some("0) Quit"));
}

#[test]
fn missing_pack_uses_builtin_strings() {
    let packed = Translator::new_with_pack("es", Some("no-such-locales-dir"));
    let builtin = Translator::new("es");
    assert_eq!(packed.language(), Language::Es);
    assert_eq!(packed.t(keys::MAIN_MENU_EXIT), builtin.t(keys::MAIN_MENU_EXIT));
    assert_eq!(packed.t(keys::PRESET_OPTIONS), builtin.t(keys::PRESET_OPTIONS));
}
