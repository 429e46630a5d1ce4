//! Navigator configuration

use serde::{Deserialize, Serialize};

/// Construction-time settings for a [`crate::Navigator`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Emit `tracing` debug records for every state transition
    pub log: bool,
}

impl NavigatorConfig {
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }
}

/// Per-call options accepted by navigation operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigateOptions {
    /// Suppress the change notification for this call only
    pub silent: bool,
}

impl NavigateOptions {
    pub fn silent() -> Self {
        Self { silent: true }
    }
}
