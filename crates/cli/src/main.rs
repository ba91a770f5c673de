// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clap::Parser;
use clintsim_config::ScenarioConfig;
use clintsim_core::bringup::{BringupOptions, Verdict};
use clintsim_core::sim::SimMachine;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{error, info};

const EXIT_PASS: u8 = 0;
const EXIT_TEST_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

const RESULT_SCHEMA_VERSION: &str = "1.0";

fn parse_u32_value(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value '{s}': {e}"))
    } else {
        u32::from_str(trimmed).map_err(|e| format!("Invalid value '{s}': {e}"))
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ClintSim timer interrupt bring-up harness",
    long_about = None
)]
struct Cli {
    /// Path to a scenario YAML file
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Override the one-shot arm distance in timer ticks
    #[arg(long)]
    ticks: Option<u32>,

    /// Override the wait budget in simulation steps
    #[arg(long)]
    max_steps: Option<u32>,

    /// Inject a raw trap cause before arming (fatal-path testing)
    #[arg(long, value_parser = parse_u32_value)]
    inject_cause: Option<u32>,

    /// Disable console echo to stdout (output is still captured)
    #[arg(long)]
    no_console_stdout: bool,

    /// Emit a JSON result record on stdout (implies no console echo)
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunRecord {
    result_schema_version: &'static str,
    verdict: &'static str,
    polls_used: u32,
    total_steps: u64,
    console: String,
    machine: serde_json::Value,
}

fn load_config(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    let mut config = match &cli.scenario {
        Some(path) => ScenarioConfig::from_file(path)?,
        None => ScenarioConfig::default(),
    };

    if let Some(ticks) = cli.ticks {
        config.arm_ticks = ticks;
    }
    if let Some(max_steps) = cli.max_steps {
        config.poll_budget = max_steps;
    }
    if let Some(cause) = cli.inject_cause {
        config.inject_cause = Some(cause);
    }
    if cli.no_console_stdout || cli.json {
        config.echo_console = false;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid scenario: {err:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let machine = match SimMachine::from_config(&config) {
        Ok(machine) => machine,
        Err(err) => {
            error!("failed to build machine: {err:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    if let Some(cause) = config.inject_cause {
        info!(cause, "injecting trap cause");
        machine.deliver(cause);
    }

    let report = machine.bringup().run(
        &machine,
        BringupOptions {
            arm_ticks: config.arm_ticks,
            poll_budget: config.poll_budget,
        },
    );

    if cli.json {
        let record = RunRecord {
            result_schema_version: RESULT_SCHEMA_VERSION,
            verdict: match report.verdict {
                Verdict::Passed => "passed",
                Verdict::Failed => "failed",
            },
            polls_used: report.polls_used,
            total_steps: machine.total_steps(),
            console: machine.hostio().transcript(),
            machine: machine.snapshot(),
        };
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("failed to serialize result record: {err}");
                return ExitCode::from(EXIT_RUNTIME_ERROR);
            }
        }
    }

    info!(
        verdict = ?report.verdict,
        polls_used = report.polls_used,
        total_steps = machine.total_steps(),
        "run complete"
    );

    match report.verdict {
        Verdict::Passed => ExitCode::from(EXIT_PASS),
        Verdict::Failed => ExitCode::from(EXIT_TEST_FAIL),
    }
}
