//! Tests for the archscope configuration system.

use std::sync::Mutex;

use archscope_core::config::*;
use archscope_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all ARCHSCOPE_ env vars and point HOME at an empty directory so the
/// real user config never leaks into a test.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "ARCHSCOPE_EMPTY_SELECTION",
        "ARCHSCOPE_PARALLEL",
        "ARCHSCOPE_PARALLEL_THRESHOLD",
        "ARCHSCOPE_RECORD_CLONE_METHOD",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

/// T0-CFG-01: Missing files fall back to compiled defaults.
#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = ArchscopeConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.engine.effective_empty_selection(), EmptySelectionPolicy::Vacuous);
    assert!(config.engine.effective_parallel());
    assert_eq!(config.engine.effective_parallel_threshold(), 256);
    assert_eq!(config.conventions.effective_record_clone_method(), "<Clone>$");
    assert!(config.rules.is_empty());
}

/// T0-CFG-02: CLI > env > project > user resolution.
#[test]
fn test_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".archscope")).unwrap();
    std::fs::write(
        home.path().join(".archscope/config.toml"),
        r#"
[engine]
parallel_threshold = 10
parallel = false

[conventions]
record_clone_method = "CloneUser"
"#,
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("archscope.toml"),
        r#"
[engine]
parallel_threshold = 64
empty_selection = "strict"
"#,
    )
    .unwrap();

    std::env::set_var("ARCHSCOPE_PARALLEL_THRESHOLD", "128");

    let cli = CliOverrides {
        empty_selection: Some(EmptySelectionPolicy::Vacuous),
        ..Default::default()
    };
    let config = ArchscopeConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project
    assert_eq!(config.engine.effective_empty_selection(), EmptySelectionPolicy::Vacuous);
    // env beats project and user
    assert_eq!(config.engine.effective_parallel_threshold(), 128);
    // user value survives where nothing above overrides it
    assert_eq!(config.engine.parallel, Some(false));
    assert_eq!(config.conventions.effective_record_clone_method(), "CloneUser");

    std::env::remove_var("ARCHSCOPE_PARALLEL_THRESHOLD");
}

/// T0-CFG-03: Invalid TOML syntax is a ParseError.
#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("archscope.toml"), "this is not valid toml {{{{").unwrap();

    match ArchscopeConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

/// T0-CFG-04: Valid TOML with an invalid value fails validation.
#[test]
fn test_invalid_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("archscope.toml"),
        "[engine]\nparallel_threshold = 0\n",
    )
    .unwrap();

    match ArchscopeConfig::load(dir.path(), None) {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "engine.parallel_threshold");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

/// T0-CFG-05: Invalid env values are ignored rather than fatal.
#[test]
fn test_invalid_env_value_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("ARCHSCOPE_EMPTY_SELECTION", "sometimes");
    std::env::set_var("ARCHSCOPE_PARALLEL", "yes please");
    let dir = tempdir();
    let config = ArchscopeConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.engine.empty_selection, None);
    assert_eq!(config.engine.parallel, None);

    std::env::remove_var("ARCHSCOPE_EMPTY_SELECTION");
    std::env::remove_var("ARCHSCOPE_PARALLEL");
}

/// T0-CFG-06: Rules parse from [[rules]] tables and project rules replace
/// user rules with the same id.
#[test]
fn test_rules_tables_and_merge() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".archscope")).unwrap();
    std::fs::write(
        home.path().join(".archscope/config.toml"),
        r#"
[[rules]]
id = "repositories"
that = [{ implements_interface = "IRepository" }]
should = { resides_in_namespace_ending_with = "Data" }

[[rules]]
id = "user-only"
that = [{ has_name_ending_with = "Service" }]
should = { resides_in_namespace_starting_with = "App" }
"#,
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("archscope.toml"),
        r#"
[[rules]]
id = "repositories"
description = "Repositories live in infrastructure"
that = [{ implements_interface = "IRepository" }]
should = { resides_in_namespace_ending_with = "Infrastructure" }

[[rules]]
id = "domain-isolation"
enabled = false
that = [{ resides_in_namespace = "EShop.Domains" }]
should_not = { has_dependency_on = "EShop.Infrastructure" }
"#,
    )
    .unwrap();

    let config = ArchscopeConfig::load(dir.path(), None).unwrap();
    let ids: Vec<&str> = config.rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["repositories", "user-only", "domain-isolation"]);

    let repos = &config.rules[0];
    assert_eq!(
        repos.should,
        Some(AssertionSpec::ResidesInNamespaceEndingWith("Infrastructure".into()))
    );
    assert!(repos.enabled);
    assert!(!config.rules[2].enabled);
    assert_eq!(
        config.rules[2].should_not,
        Some(AssertionSpec::HasDependencyOn("EShop.Infrastructure".into()))
    );
}

/// T0-CFG-07: Config round-trips through to_toml/from_toml.
#[test]
fn test_to_toml_round_trip() {
    let config = ArchscopeConfig::from_toml(
        r#"
[engine]
empty_selection = "strict"

[[rules]]
id = "dto-records"
that = [{ has_name_ending_with = "Dto" }]
should = { meets_custom_rule = "is_record" }
"#,
    )
    .unwrap();

    let text = config.to_toml().unwrap();
    let again = ArchscopeConfig::from_toml(&text).unwrap();
    assert_eq!(again.engine.empty_selection, Some(EmptySelectionPolicy::Strict));
    assert_eq!(again.rules, config.rules);
}

/// T0-CFG-08: An empty rule id fails validation.
#[test]
fn test_empty_rule_id_rejected() {
    let result = ArchscopeConfig::from_toml(
        r#"
[[rules]]
id = "  "
should = { has_dependency_on = "X" }
"#,
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, "rules[0].id"),
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}
