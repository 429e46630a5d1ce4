use thiserror::Error;

use crate::navigation::Modifier;

/// Errors raised by navigator operations. State is never modified when one
/// is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("push received an empty location without modifiers")]
    InvalidRequest,

    #[error("\"root\" modifier is only allowed together with \"replace\" while the location index is zero")]
    IllegalModifier,

    #[error("index {index} is outside of a locations stack of length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("locations stack is corrupted: {0}")]
    CorruptStack(CorruptStackReason),
}

/// Why an externally supplied stack was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptStackReason {
    #[error("first location has no \"root\" modifier")]
    MissingRoot,

    #[error("root location carries forbidden modifier \"{0}\"")]
    ForbiddenRootModifier(Modifier),
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
