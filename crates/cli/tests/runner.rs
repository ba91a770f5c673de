// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;

fn clintsim_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_clintsim"))
}

fn run_json(args: &[&str]) -> (Option<i32>, Value) {
    let output = Command::new(clintsim_bin())
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run clintsim");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let record: Value = serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "bad JSON record: {e}\nStdout: {stdout}\nStderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    });
    (output.status.code(), record)
}

#[test]
fn default_run_passes() {
    let (code, record) = run_json(&[]);

    assert_eq!(code, Some(0));
    assert_eq!(record["result_schema_version"], "1.0");
    assert_eq!(record["verdict"], "passed");
    assert_eq!(record["polls_used"], 1000);

    let console = record["console"].as_str().unwrap();
    assert!(console.contains("Hello world"));
    assert!(console.contains("Timer test success!!"));
    assert_eq!(record["machine"]["hostio"]["halted"], true);
}

#[test]
fn short_deadline_run_passes() {
    let (code, record) = run_json(&["--ticks", "50", "--max-steps", "200"]);

    assert_eq!(code, Some(0));
    assert_eq!(record["verdict"], "passed");
    assert_eq!(record["polls_used"], 50);
}

#[test]
fn injected_cause_fails_the_run() {
    let (code, record) = run_json(&["--inject-cause", "5"]);

    assert_eq!(code, Some(1));
    assert_eq!(record["verdict"], "failed");
    let console = record["console"].as_str().unwrap();
    assert!(console.contains("Illegal Exception : Stopping"));
    assert!(console.contains("Timer test failed!!"));
}

#[test]
fn injected_interrupt_cause_accepts_hex() {
    // Machine-external source 11 with the interrupt bit set.
    let (code, record) = run_json(&["--inject-cause", "0x8000000B"]);

    assert_eq!(code, Some(1));
    assert_eq!(record["verdict"], "failed");
}

#[test]
fn invalid_budget_is_a_config_error() {
    let output = Command::new(clintsim_bin())
        .args(["--ticks", "5000", "--max-steps", "100"])
        .output()
        .expect("failed to run clintsim");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn scenario_file_drives_the_run() {
    let dir = std::env::temp_dir().join("clintsim-cli-scenario");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scenario.yaml");
    std::fs::write(
        &path,
        "arm_ticks: 10\npoll_budget: 100\necho_console: false\n",
    )
    .unwrap();

    let (code, record) = run_json(&["--scenario", path.to_str().unwrap()]);

    assert_eq!(code, Some(0));
    assert_eq!(record["verdict"], "passed");
    assert_eq!(record["polls_used"], 10);
}
