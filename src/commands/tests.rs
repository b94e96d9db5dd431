use super::*;

fn catalog(json: &str) -> Catalog {
    Catalog::from_json(json).unwrap()
}

#[test]
fn test_parse_vars() {
    let args = parse_vars(&["name=Acme".to_string(), "days=3".to_string()]).unwrap();
    assert_eq!(args.get("name"), Some(&Arg::Text("Acme".into())));
    assert_eq!(args.get("days"), Some(&Arg::Int(3)));
}

#[test]
fn test_parse_vars_rejects_malformed() {
    assert!(parse_vars(&["novalue".to_string()]).is_err());
    assert!(parse_vars(&["=x".to_string()]).is_err());
}

#[test]
fn test_parse_vars_value_may_contain_equals() {
    let args = parse_vars(&["expr=a=b".to_string()]).unwrap();
    assert_eq!(args.get("expr"), Some(&Arg::Text("a=b".into())));
}

#[test]
fn test_parse_arg_keeps_text_that_would_change() {
    assert_eq!(parse_arg("42"), Arg::Int(42));
    assert_eq!(parse_arg("2.5"), Arg::Float(2.5));
    assert_eq!(parse_arg("007"), Arg::Text("007".into()));
    assert_eq!(parse_arg("3.0"), Arg::Text("3.0".into()));
    assert_eq!(parse_arg("+5511999887766"), Arg::Text("+5511999887766".into()));
    assert_eq!(parse_arg("NaN"), Arg::Text("NaN".into()));
}

#[test]
fn test_key_lines_with_prefix() {
    let catalog = catalog(
        r#"{"translations": {"pt": {"ticket": {"buttons": {"cancel": "Cancelar"}}, "tasks": {"dueIn": "Vence em {days} dias"}}}}"#,
    );
    let bundle = catalog.get(&Language::from("pt")).unwrap();
    assert_eq!(
        key_lines(bundle, None),
        vec![
            "tasks.dueIn\tVence em {{days}} dias".to_string(),
            "ticket.buttons.cancel\tCancelar".to_string(),
        ]
    );
    let prefix = KeyPath::parse("ticket").unwrap();
    assert_eq!(key_lines(bundle, Some(&prefix)).len(), 1);
}

#[test]
fn test_check_report_counts_issues() {
    let catalog = catalog(
        r#"{"translations": {"pt": {"taskSubjects": {"a": "x"}, "taskSubjects": {"b": "y"}, "n": 1}}}"#,
    );
    let report = check_report(&catalog, &Language::from("pt"));
    assert_eq!(report.issues, 2);
    assert!(report.lines[0].starts_with("issue: [pt] duplicate key 'taskSubjects'"));
}

#[test]
fn test_check_report_coverage_and_placeholder_mismatch() {
    let catalog = catalog(
        r#"{"translations": {
            "pt": {"a": "Olá {name}", "b": "Sair", "c": "{{count}} itens"},
            "en": {"a": "Hello {{user}}", "b": "Logout"}
        }}"#,
    );
    let report = check_report(&catalog, &Language::from("pt"));
    assert_eq!(report.issues, 0);
    assert!(report
        .lines
        .iter()
        .any(|l| l.starts_with("warning: [en] 'a' placeholders")));
    assert!(report
        .lines
        .contains(&"coverage: [en] 2/3 keys of [pt]".to_string()));
}

#[test]
fn test_check_report_without_default_bundle() {
    let catalog = catalog(r#"{"translations": {"en": {"a": "b"}}}"#);
    let report = check_report(&catalog, &Language::from("pt"));
    assert_eq!(report.issues, 0);
    assert_eq!(report.lines, vec!["note: default language 'pt' has no bundle"]);
}

#[test]
fn test_language_lines_mark_active_and_show_policy() {
    let catalog = catalog(r#"{"translations": {"en": {"a": "b"}, "pt": {"a": "c", "d": "e"}}}"#);
    let locale = LocaleConfig {
        language: "pt-BR".into(),
        default_language: "en".into(),
        missing_key: lexicon_core::config::MissingKeyPolicy::Marked,
    };
    assert_eq!(
        language_lines(&catalog, &locale),
        vec![
            "  en\t1 string(s)".to_string(),
            "* pt\t2 string(s)".to_string(),
            "fallback: en".to_string(),
            "missing keys: marked".to_string(),
        ]
    );
}

#[test]
fn test_normalized_document_keeps_key_order() {
    let (text, changed) = normalized_document(
        r#"{"translations": {"pt": {"tasks": {"daysOverdue": "Atrasada em {days} dias"}, "companies": {"title": "Empresas"}}}}"#,
    )
    .unwrap();
    assert_eq!(changed, 1);
    assert!(text.contains("Atrasada em {{days}} dias"));
    let tasks = text.find("\"tasks\"").unwrap();
    let companies = text.find("\"companies\"").unwrap();
    assert!(tasks < companies);
}
