use crate::config::default_site_config;
use crate::*;
use serde_json::json;

#[test]
fn default_site_config_exposes_document_defaults() {
    let cfg = default_site_config();
    assert_eq!(cfg.get_str("document.lang"), Some("ja"));
    assert_eq!(cfg.get_str("document.faviconGlyph"), Some("\u{1F4DD}"));
    assert_eq!(cfg.get_str("document.containerId"), Some("diff-container"));
    assert_eq!(cfg.get_str("diff.cleanup"), Some("semanticLossless"));
    assert_eq!(cfg.get_u64("diff.timeoutMs"), Some(0));
    assert_eq!(cfg.get_str("document.missing"), None);
}

#[test]
fn deep_merge_keeps_sibling_keys() {
    let mut cfg = default_site_config();
    cfg.deep_merge(&json!({ "document": { "lang": "en" } }));
    assert_eq!(cfg.get_str("document.lang"), Some("en"));
    assert_eq!(cfg.get_str("document.width"), Some("600px"));
}

#[test]
fn set_value_creates_and_coerces_intermediate_objects() {
    let mut cfg = DiffmarkConfig::from_value(json!(["not", "an", "object"]));
    cfg.set_value("document.lang", json!("de"));
    assert_eq!(cfg.as_value(), &json!({ "document": { "lang": "de" } }));

    cfg.set_value("document.lang.region", json!("AT"));
    assert_eq!(cfg.get_str("document.lang.region"), Some("AT"));
}

#[test]
fn from_json_str_requires_an_object() {
    let cfg = DiffmarkConfig::from_json_str(r#"{ "diff": { "algorithm": "patience" } }"#).unwrap();
    assert_eq!(cfg.get_str("diff.algorithm"), Some("patience"));

    let err = DiffmarkConfig::from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigJson { .. }));

    let err = DiffmarkConfig::from_json_str("{ nope").unwrap_err();
    assert!(err.to_string().starts_with("Invalid config JSON: "));
}

#[test]
fn require_str_rejects_non_strings() {
    let cfg = DiffmarkConfig::from_value(json!({ "document": { "lang": 42 } }));
    let err = cfg.require_str("document.lang").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid config value for `document.lang`: expected a string, got 42"
    );
    assert_eq!(cfg.require_str("document.width").unwrap(), None);
}

#[test]
fn diff_options_from_config() {
    let mut cfg = default_site_config();
    assert_eq!(
        DiffOptions::from_config(&cfg).unwrap(),
        DiffOptions::default()
    );

    cfg.deep_merge(&json!({
        "diff": { "algorithm": "Patience", "cleanup": "none", "timeoutMs": 250 }
    }));
    let options = DiffOptions::from_config(&cfg).unwrap();
    assert_eq!(options.algorithm, DiffAlgorithm::Patience);
    assert_eq!(options.cleanup, DiffCleanup::None);
    assert_eq!(options.timeout, Some(std::time::Duration::from_millis(250)));
}

#[test]
fn diff_options_reject_unknown_values() {
    let mut cfg = default_site_config();
    cfg.set_value("diff.algorithm", json!("histogram"));
    let err = DiffOptions::from_config(&cfg).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "diff.algorithm"));

    let mut cfg = default_site_config();
    cfg.set_value("diff.timeoutMs", json!(-5));
    let err = DiffOptions::from_config(&cfg).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "diff.timeoutMs"));
}
