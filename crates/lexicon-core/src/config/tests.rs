use super::*;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.lexicon.log_level, "info");
    assert_eq!(cfg.locale.language, "pt");
    assert_eq!(cfg.locale.default_language, "pt");
    assert_eq!(cfg.locale.missing_key, MissingKeyPolicy::KeyPath);
    assert!(cfg.bundles.paths.is_empty());
    assert!(!cfg.bundles.strict);
}

#[test]
fn test_full_config_from_toml() {
    let toml_str = r#"
        [lexicon]
        log_level = "debug"

        [locale]
        language = "ptBr"
        default_language = "en"
        missing_key = "marked"

        [bundles]
        paths = ["locales/en.json", "~/overrides.json"]
        strict = true
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.lexicon.log_level, "debug");
    assert_eq!(cfg.locale.language, "ptBr");
    assert_eq!(cfg.locale.default_language, "en");
    assert_eq!(cfg.locale.missing_key, MissingKeyPolicy::Marked);
    assert_eq!(cfg.bundles.paths.len(), 2);
    assert!(cfg.bundles.strict);
}

#[test]
fn test_partial_section_keeps_field_defaults() {
    let cfg: Config = toml::from_str("[locale]\nlanguage = \"es\"\n").unwrap();
    assert_eq!(cfg.locale.language, "es");
    assert_eq!(cfg.locale.default_language, "pt");
    assert_eq!(cfg.locale.missing_key, MissingKeyPolicy::KeyPath);
    assert_eq!(cfg.lexicon.log_level, "info");
}

#[test]
fn test_unknown_policy_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[locale]\nmissing_key = \"explode\"\n");
    assert!(result.is_err());
}

#[test]
fn test_missing_key_policy_fallback() {
    assert_eq!(MissingKeyPolicy::KeyPath.fallback("nope.nothere"), "nope.nothere");
    assert_eq!(
        MissingKeyPolicy::Marked.fallback("nope.nothere"),
        "MISSING: nope.nothere"
    );
    assert_eq!(MissingKeyPolicy::Marked.display_name(), "marked");
}

#[test]
fn test_blank_key_fallback_is_visible() {
    assert_eq!(MissingKeyPolicy::KeyPath.fallback(""), "MISSING: <empty>");
    assert_eq!(MissingKeyPolicy::KeyPath.fallback("  "), "MISSING: <empty>");
    assert_eq!(MissingKeyPolicy::Marked.fallback(""), "MISSING: <empty>");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__lexicon_test__.toml").unwrap();
    assert_eq!(cfg.locale.language, "pt");
}

#[test]
fn test_load_reads_file() {
    let tmp = std::env::temp_dir().join("__lexicon_test_config__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("lexicon.toml");
    std::fs::write(&path, "[locale]\nlanguage = \"en\"\n").unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.locale.language, "en");

    std::fs::write(&path, "[locale\nlanguage = ").unwrap();
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_shellexpand_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let expanded = shellexpand("~/x.json");
        assert_eq!(expanded, format!("{}/x.json", home.to_string_lossy()));
    }
    assert_eq!(shellexpand("/abs/x.json"), "/abs/x.json");
}
