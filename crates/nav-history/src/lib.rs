//! History adapter for the navigation core
//!
//! Mirrors a [`nav_core::Navigator`] into a host history mechanism and
//! reconciles moves the host makes on its own (back/forward buttons, link
//! clicks) with the navigator's index.

pub mod browser;
pub mod config;
pub mod host;
pub mod segue;
pub mod state;

use nav_core::NavigatorError;
use thiserror::Error;

// Re-exports
pub use browser::BrowserNavigator;
pub use config::{BrowserNavigatorConfig, HistoryMode};
pub use host::{HostHistory, MemoryHistory};
pub use segue::SegueCodec;
pub use state::HistoryState;

/// Errors raised by the history adapter
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error(transparent)]
    Navigator(#[from] NavigatorError),

    #[error("unable to extract location from segue {0:?}")]
    UnparsableSegue(String),

    #[error("unable to encode history state: {0}")]
    State(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
