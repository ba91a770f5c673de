// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clintsim_config::ScenarioConfig;
use std::path::PathBuf;

fn write_scenario(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("clintsim-config-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scenario.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_a_full_scenario_file() {
    let path = write_scenario(
        "full",
        r#"
arm_ticks: 1000
poll_budget: 2000
counter_start: 0
echo_console: false
"#,
    );

    let config = ScenarioConfig::from_file(&path).unwrap();
    assert_eq!(config.arm_ticks, 1000);
    assert_eq!(config.poll_budget, 2000);
    assert!(!config.echo_console);
    assert_eq!(config.inject_cause, None);
}

#[test]
fn loads_an_injected_cause_scenario() {
    let path = write_scenario(
        "inject",
        r#"
inject_cause: 5
echo_console: false
"#,
    );

    let config = ScenarioConfig::from_file(&path).unwrap();
    assert_eq!(config.inject_cause, Some(5));
}

#[test]
fn invalid_budget_fails_at_load_time() {
    let path = write_scenario(
        "bad-budget",
        r#"
arm_ticks: 5000
poll_budget: 100
"#,
    );

    let err = ScenarioConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("poll_budget"));
}

#[test]
fn missing_file_reports_the_path() {
    let err = ScenarioConfig::from_file("/nonexistent/scenario.yaml").unwrap_err();
    assert!(err.to_string().contains("scenario"));
}
