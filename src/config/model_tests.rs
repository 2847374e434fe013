use super::*;
use crate::rules::Severity;

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(validate_config(&config).is_ok());
    assert!(config.scan.gitignore);
    assert_eq!(config.scan.fail_on, Severity::High);
    assert_eq!(config.runner.min_duration_ms, 40);
    assert_eq!(config.runner.max_duration_ms, 120);
}

#[test]
fn parses_a_full_toml_document() {
    let toml = r#"
[scan]
gitignore = false
exclude = ["**/vendor/**"]
extensions = ["tf", "Dockerfile"]
fail_on = "critical"

[policies]
disabled = ["iam-root"]

[runner]
min_duration_ms = 1
max_duration_ms = 2
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert!(!config.scan.gitignore);
    assert_eq!(config.scan.fail_on, Severity::Critical);
    assert_eq!(config.policies.disabled, vec!["iam-root".to_string()]);
    assert_eq!(config.runner.max_duration_ms, 2);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config: Config = toml::from_str("[scan]\nfail_on = \"low\"\n").unwrap();
    assert_eq!(config.scan.fail_on, Severity::Low);
    assert!(config.policies.disabled.is_empty());
    assert_eq!(config.runner.min_duration_ms, 40);
}

#[test]
fn inverted_duration_range_is_rejected() {
    let config: Config = toml::from_str("[runner]\nmin_duration_ms = 9\nmax_duration_ms = 3\n").unwrap();
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("inverted"));
}

#[test]
fn bad_exclude_glob_is_rejected() {
    let config: Config = toml::from_str("[scan]\nexclude = [\"[oops\"]\n").unwrap();
    assert!(validate_config(&config).is_err());
}

#[test]
fn unknown_disabled_policy_is_rejected() {
    let config: Config = toml::from_str("[policies]\ndisabled = [\"no-such-policy\"]\n").unwrap();
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("no-such-policy"));
}

#[test]
fn unknown_severity_fails_to_parse() {
    let result: std::result::Result<Config, _> = toml::from_str("[scan]\nfail_on = \"severe\"\n");
    assert!(result.is_err());
}
