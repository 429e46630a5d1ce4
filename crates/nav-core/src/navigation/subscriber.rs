//! Location listener trait

use super::Location;

/// Trait for components that need to respond to location changes
pub trait LocationListener: Send + Sync {
    /// Called with the new current location after a navigation
    fn on_location_changed(&self, location: &Location);
}

impl<F> LocationListener for F
where
    F: Fn(&Location) + Send + Sync,
{
    fn on_location_changed(&self, location: &Location) {
        self(location)
    }
}
