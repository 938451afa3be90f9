use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::stretch::{StartPolicy, StretchThresholds};

/// Tunable session parameters. Defaults mirror the shipped experience:
/// 10 polls per second, 15-second countdowns, 3 stretches per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Polling cadence for the pose source.
    pub poll_interval_ms: u64,
    /// Budget for a single estimation call; slower calls are dropped and
    /// the frame counts as "no pose detected".
    pub poll_budget_ms: u64,
    pub countdown_secs: u32,
    /// Stretches to complete before the session is terminal.
    pub completion_target: u32,
    /// Overall frame confidence must exceed this before classification
    /// is attempted.
    pub min_pose_confidence: f32,
    pub start: StartPolicy,
    pub thresholds: StretchThresholds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            poll_budget_ms: 1000,
            countdown_secs: 15,
            completion_target: 3,
            min_pose_confidence: 0.5,
            start: StartPolicy::default(),
            thresholds: StretchThresholds::default(),
        }
    }
}

impl SessionConfig {
    /// Loads config from a JSON file; a missing or unparsable file falls
    /// back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
