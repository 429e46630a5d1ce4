//! Location <-> segue translation seam

use nav_core::Location;

/// Converts between locations and their URL-like string form.
///
/// Segues handed to `parse` never carry the mode prefix (`#` in hash mode).
pub trait SegueCodec {
    /// Extract a location, or `None` when the segue is not understood
    fn parse(&self, segue: &str) -> Option<Location>;

    /// Render a location as a segue without the mode prefix
    fn format(&self, location: &Location) -> String;
}

impl<C: SegueCodec + ?Sized> SegueCodec for Box<C> {
    fn parse(&self, segue: &str) -> Option<Location> {
        (**self).parse(segue)
    }

    fn format(&self, location: &Location) -> String {
        (**self).format(location)
    }
}
