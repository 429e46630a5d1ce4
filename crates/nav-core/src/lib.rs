//! Core navigation state for client-side routing
//!
//! This crate provides the location stack engine: an ordered history of
//! locations with a cursor, structural modifiers that decide how a new
//! location is merged into the stack, and skip-aware traversal.

pub mod config;
pub mod error;
pub mod events;
pub mod navigation;

// Re-export commonly used types
pub use config::{NavigateOptions, NavigatorConfig};
pub use error::{CorruptStackReason, NavigatorError};
pub use events::{listener_from_fn, EventKind, ListenerHandle, ListenerRegistry};
pub use navigation::{
    ChangeResult, Location, LocationListener, Modifier, ModifierSet,
    Navigator, NavigatorSnapshot, Params,
};
