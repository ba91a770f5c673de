// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_arm_ticks() -> u32 {
    1000
}

fn default_poll_budget() -> u32 {
    20000
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("arm_ticks must be non-zero")]
    ZeroArmTicks,
    #[error("poll_budget must be non-zero")]
    ZeroPollBudget,
    #[error("poll_budget ({budget}) must exceed arm_ticks ({ticks}) or the wait can time out before the deadline")]
    BudgetBelowDeadline { budget: u32, ticks: u32 },
}

/// One harness run, as described by a scenario YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// One-shot arm distance in timer ticks.
    #[serde(default = "default_arm_ticks")]
    pub arm_ticks: u32,

    /// Maximum wait iterations (simulation steps) for the interrupt.
    #[serde(default = "default_poll_budget")]
    pub poll_budget: u32,

    /// Initial value of the free-running counter.
    #[serde(default)]
    pub counter_start: u64,

    /// Echo console output to stdout while still capturing it.
    #[serde(default = "default_true")]
    pub echo_console: bool,

    /// Raw trap cause to inject before arming, for fatal-path scenarios.
    #[serde(default)]
    pub inject_cause: Option<u32>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            arm_ticks: default_arm_ticks(),
            poll_budget: default_poll_budget(),
            counter_start: 0,
            echo_console: true,
            inject_cause: None,
        }
    }
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {path:?}"))?;
        let config: Self =
            serde_yaml::from_str(&content).context("Failed to parse scenario YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a meaningful verdict.
    ///
    /// In the simulator one wait iteration is one counter tick, so a
    /// budget at or below the arm distance would report failure before
    /// the deadline could ever arrive.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.arm_ticks == 0 {
            return Err(ConfigError::ZeroArmTicks);
        }
        if self.poll_budget == 0 {
            return Err(ConfigError::ZeroPollBudget);
        }
        if self.poll_budget <= self.arm_ticks {
            return Err(ConfigError::BudgetBelowDeadline {
                budget: self.poll_budget,
                ticks: self.arm_ticks,
            });
        }
        Ok(())
    }
}
