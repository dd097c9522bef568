//! Plan file schema.

use serde::Deserialize;
use std::time::Duration;

use crate::fs::{Encoding, FsAction, DEFAULT_WATCH_INTERVAL};

/// A plan: settings plus an ordered list of steps.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlanConfig {
    /// Plan-wide settings.
    #[serde(default)]
    pub settings: Settings,

    /// Steps in run order.
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Plan-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Default encoding for `read` steps that name none.
    #[serde(default)]
    pub encoding: Encoding,

    /// Polling interval for `watch` steps, in milliseconds.
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            watch_interval_ms: default_watch_interval_ms(),
        }
    }
}

impl Settings {
    /// Watch polling interval.
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}

fn default_watch_interval_ms() -> u64 {
    DEFAULT_WATCH_INTERVAL.as_millis() as u64
}

fn default_true() -> bool {
    true
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepConfig {
    /// Unique step name.
    pub name: String,

    /// Description shown in output.
    #[serde(default)]
    pub description: Option<String>,

    /// Skip this step if the previous one failed.
    #[serde(default = "default_true")]
    pub depends_on_previous: bool,

    /// What the step does.
    #[serde(flatten)]
    pub action: FsAction,
}
