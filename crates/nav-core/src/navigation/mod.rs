use serde::{Deserialize, Serialize};

mod engine;
mod location;
mod modifier;
mod subscriber;

pub use engine::Navigator;
pub use location::{Location, Params};
pub use modifier::{Modifier, ModifierSet};
pub use subscriber::LocationListener;

/// Outcome of a navigation operation
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeResult {
    /// Signed index movement actually applied. Zero for replaces and no-ops.
    pub delta: isize,
    /// The entry inserted, replaced or moved to
    pub location: Location,
}

/// Navigator state as mirrored into host-persisted storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorSnapshot {
    pub location_index: usize,
    pub locations_stack: Vec<Location>,
}
