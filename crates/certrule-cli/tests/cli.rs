//! End-to-end tests for the `certrule` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

const RULE_SET: &str = r#"[
  {
    "Identifier": "GR-EU-0001",
    "Type": "Acceptance",
    "Country": "EU",
    "Version": "1.0.0",
    "SchemaVersion": "1.0.0",
    "Engine": "CERTLOGIC",
    "EngineVersion": "0.7.5",
    "CertificateType": "General",
    "Description": [{"lang": "en", "desc": "Schema version must be supported"}],
    "ValidFrom": "2021-06-01T00:00:00Z",
    "ValidTo": "2030-06-01T00:00:00Z",
    "AffectedFields": ["ver"],
    "Logic": {}
  },
  {
    "Identifier": "GR-EU-0001",
    "Type": "Acceptance",
    "Country": "EU",
    "Version": "1.2.0",
    "SchemaVersion": "1.0.0",
    "Engine": "CERTLOGIC",
    "EngineVersion": "0.7.5",
    "CertificateType": "General",
    "Description": [{"lang": "en", "desc": "Schema version must be supported"}],
    "ValidFrom": "2021-06-01T00:00:00Z",
    "ValidTo": "2030-06-01T00:00:00Z",
    "AffectedFields": ["ver"],
    "Logic": {}
  },
  {
    "Identifier": "TR-EU-0001",
    "Type": "Acceptance",
    "Country": "EU",
    "Version": "1.0.0",
    "SchemaVersion": "1.0.0",
    "Engine": "CERTLOGIC",
    "EngineVersion": "0.7.5",
    "CertificateType": "Test",
    "Description": [],
    "ValidFrom": "2021-06-01T00:00:00Z",
    "ValidTo": "2030-06-01T00:00:00Z",
    "AffectedFields": [],
    "Logic": {}
  },
  {
    "Identifier": "IR-DE-0001",
    "Type": "Invalidation",
    "Country": "DE",
    "Version": "1.0.0",
    "SchemaVersion": "1.0.0",
    "Engine": "CERTLOGIC",
    "EngineVersion": "0.7.5",
    "CertificateType": "General",
    "Description": [{"lang": "en", "desc": "Certificate is not revoked"}],
    "ValidFrom": "2021-06-01T00:00:00Z",
    "ValidTo": "2030-06-01T00:00:00Z",
    "AffectedFields": [],
    "Logic": {}
  }
]"#;

fn run_certrule(args: &[&str]) -> Output {
    run_certrule_with_env(args, &[])
}

fn run_certrule_with_env(args: &[&str], envs: &[(&str, &Path)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_certrule"));
    command.args(args).env_remove("RUST_LOG");
    for (key, value) in envs {
        command.env(key, value);
    }
    command
        .output()
        .unwrap_or_else(|err| panic!("failed to execute certrule: {err}"))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write the shared rule set and an empty settings file into `dir`.
fn workspace(dir: &Path) -> (PathBuf, PathBuf) {
    let rules = dir.join("rules.json");
    fs::write(&rules, RULE_SET).unwrap();
    let config = dir.join("settings.toml");
    fs::write(&config, "").unwrap();
    (rules, config)
}

fn select_json(config: &Path, rules: &Path, extra: &[&str]) -> Value {
    let mut args = vec![
        "--config",
        path_str(config),
        "select",
        "--rules",
        path_str(rules),
        "--at",
        "2022-01-01T00:00:00Z",
        "--format",
        "json",
    ];
    args.extend_from_slice(extra);
    let output = run_certrule(&args);
    assert!(output.status.success(), "{}", stderr(&output));
    serde_json::from_str(&stdout(&output)).unwrap()
}

fn identifiers(value: &Value) -> Vec<String> {
    value["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|rule| rule["Identifier"].as_str().unwrap().to_string())
        .collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn compare_prints_ordering() {
    let output = run_certrule(&["compare", "1.9", "1.10"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1.9 < 1.10");

    let output = run_certrule(&["compare", "1.2.1", "1.2"]);
    assert_eq!(stdout(&output), "1.2.1 > 1.2");

    let output = run_certrule(&["compare", "1.01", "1.1"]);
    assert_eq!(stdout(&output), "1.01 = 1.1");
}

#[test]
fn select_emits_engine_json() {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(&rules, RULE_SET).unwrap();
    let config = dir.path().join("settings.toml");

    let output = run_certrule(&["--config", path_str(&config), "settings", "init"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = run_certrule(&[
        "--config",
        path_str(&config),
        "select",
        "--rules",
        path_str(&rules),
        "--category",
        "vaccination",
        "--at",
        "2022-01-01T00:00:00Z",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total"], 4);
    let selected = value["rules"].as_array().unwrap();
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0]["Identifier"], "GR-EU-0001");
    assert_eq!(selected[0]["Version"], "1.2.0");
    assert_eq!(selected[1]["Identifier"], "IR-DE-0001");
}

#[test]
fn select_uses_settings_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(&rules, RULE_SET).unwrap();
    let config = dir.path().join("settings.toml");
    fs::write(
        &config,
        format!(
            "[selection]\ndefault_category = \"Test\"\nrules_path = {:?}\n",
            path_str(&rules)
        ),
    )
    .unwrap();

    let output = run_certrule(&[
        "--config",
        path_str(&config),
        "select",
        "--at",
        "2022-01-01T00:00:00Z",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["category"], "Test");
    assert_eq!(
        identifiers(&value),
        vec!["GR-EU-0001", "TR-EU-0001", "IR-DE-0001"]
    );
}

#[test]
fn select_narrows_by_type_and_country() {
    let dir = tempfile::tempdir().unwrap();
    let (rules, config) = workspace(dir.path());

    let value = select_json(&config, &rules, &["--type", "invalidation"]);
    assert_eq!(identifiers(&value), vec!["IR-DE-0001"]);
    assert_eq!(value["rules"][0]["Type"], "Invalidation");

    let value = select_json(&config, &rules, &["--country", "de"]);
    assert_eq!(identifiers(&value), vec!["IR-DE-0001"]);

    let value = select_json(
        &config,
        &rules,
        &["--category", "test", "--type", "acceptance", "--country", "EU"],
    );
    assert_eq!(identifiers(&value), vec!["GR-EU-0001", "TR-EU-0001"]);
    assert_eq!(value["total"], 4);
}

#[test]
fn select_prints_table_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let (rules, config) = workspace(dir.path());

    let output = run_certrule(&[
        "--config",
        path_str(&config),
        "--color",
        "never",
        "select",
        "--rules",
        path_str(&rules),
        "--category",
        "Test",
        "--at",
        "2022-01-01T00:00:00Z",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Category: Test"));
    assert!(text.contains("GR-EU-0001"));
    assert!(text.contains("TR-EU-0001"));
    assert!(text.contains("IR-DE-0001"));
    assert!(text.contains("1.2.0"));
    assert!(text.ends_with("3 of 4 rules apply"));
}

#[test]
fn categories_lists_every_category() {
    let output = run_certrule(&["--color", "never", "categories"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["General", "Test", "Vaccination", "Recovery"] {
        assert!(text.contains(name), "missing {name} in:\n{text}");
    }
}

#[test]
fn settings_show_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.toml");
    fs::write(&config, "[selection]\ndefault_category = \"Recovery\"\n").unwrap();

    let output = run_certrule(&["--config", path_str(&config), "settings", "show"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("[selection]"));
    assert!(text.contains("default_category = \"Recovery\""));
    assert!(text.contains("language = \"en\""));

    let output = run_certrule(&["--config", path_str(&config), "settings", "path"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), path_str(&config));
}

#[test]
fn log_file_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let (rules, config) = workspace(dir.path());
    let log = dir.path().join("certrule.log");

    let output = run_certrule(&[
        "--config",
        path_str(&config),
        "--log-file",
        path_str(&log),
        "--log-level",
        "debug",
        "select",
        "--rules",
        path_str(&rules),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(log.exists());

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("loaded rule set"));
    let selection_line = content
        .lines()
        .find(|line| line.contains("selected applicable rules"))
        .unwrap_or_else(|| panic!("no selection event in:\n{content}"));
    assert!(selection_line.contains("input=4"));
    assert!(!selection_line.contains("now="));
    assert!(!stderr(&output).contains("loaded rule set"));
}

#[test]
fn logging_settings_add_targets_and_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let (rules, config) = workspace(dir.path());
    fs::write(
        &config,
        "[logging]\nlevel = \"info\"\ntimestamps = true\ntarget = true\n",
    )
    .unwrap();
    let log = dir.path().join("certrule.log");

    let output = run_certrule(&[
        "--config",
        path_str(&config),
        "--log-file",
        path_str(&log),
        "select",
        "--rules",
        path_str(&rules),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let content = fs::read_to_string(&log).unwrap();
    let line = content
        .lines()
        .find(|line| line.contains("loaded rule set"))
        .unwrap_or_else(|| panic!("no load event in:\n{content}"));
    assert!(line.contains("certrule_select::loader"));
    assert!(line.starts_with(|c: char| c.is_ascii_digit()), "{line}");
}

#[cfg(target_os = "linux")]
#[test]
fn malformed_default_settings_warn() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("certrule");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("settings.toml"), "[selection\n").unwrap();

    let output = run_certrule_with_env(
        &["compare", "1", "2"],
        &[("XDG_CONFIG_HOME", dir.path())],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1 < 2");
    assert!(stderr(&output).contains("ignoring settings file"));
}

#[test]
fn malformed_explicit_settings_fail() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.toml");
    fs::write(&config, "[selection\n").unwrap();

    let output = run_certrule(&["--config", path_str(&config), "compare", "1", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to parse settings"));
}

#[test]
fn settings_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("settings.toml");

    let first = run_certrule(&["--config", path_str(&config), "settings", "init"]);
    assert!(first.status.success());
    assert!(config.exists());

    let second = run_certrule(&["--config", path_str(&config), "settings", "init"]);
    assert!(!second.status.success());
    assert!(stderr(&second).contains("already exists"));
}

#[test]
fn missing_rule_set_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.toml");
    fs::write(&config, "").unwrap();
    let missing = dir.path().join("missing.json");

    let output = run_certrule(&[
        "--config",
        path_str(&config),
        "select",
        "--rules",
        path_str(&missing),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("rules file not found"));
}
