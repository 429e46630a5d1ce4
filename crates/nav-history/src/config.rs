//! Adapter configuration

use nav_core::NavigatorConfig;
use serde::{Deserialize, Serialize};

/// Which part of the host URL carries the segue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryMode {
    /// Segues live in the fragment and are prefixed with `#`
    #[default]
    #[serde(rename = "hash")]
    Hash,
    /// Segues are the URL path
    #[serde(rename = "default")]
    Path,
}

impl HistoryMode {
    /// Prefix added in front of formatted segues
    pub fn prefix(self) -> &'static str {
        match self {
            HistoryMode::Hash => "#",
            HistoryMode::Path => "",
        }
    }
}

/// Construction-time settings for a [`crate::BrowserNavigator`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserNavigatorConfig {
    pub mode: HistoryMode,

    /// Emit `tracing` debug records for adapter and engine transitions
    pub log: bool,
}

impl BrowserNavigatorConfig {
    pub fn with_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Settings for the wrapped engine
    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig::default().with_log(self.log)
    }
}
