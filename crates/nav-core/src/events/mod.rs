//! Listener registry for navigator events

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::navigation::LocationListener;

/// Events emitted by the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "location-changed")]
    LocationChanged,
}

/// Shared handle to a listener. Identity is the allocation it points to.
pub type ListenerHandle = Arc<dyn LocationListener>;

/// Wrap a closure into a listener handle
pub fn listener_from_fn<F>(f: F) -> ListenerHandle
where
    F: Fn(&crate::Location) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registered listeners, grouped by event kind in registration order
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: AHashMap<EventKind, Vec<ListenerHandle>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `event`
    pub fn add(&mut self, event: EventKind, listener: ListenerHandle) {
        self.listeners.entry(event).or_default().push(listener);
    }

    /// Remove every registration of `listener` for `event`
    pub fn remove(&mut self, event: EventKind, listener: &ListenerHandle) {
        if let Some(registered) = self.listeners.get_mut(&event) {
            registered.retain(|l| !same_listener(l, listener));
        }
    }

    /// Listeners for `event`, cloned so they can be called without holding
    /// any lock on the registry
    pub fn snapshot(&self, event: EventKind) -> Vec<ListenerHandle> {
        self.listeners.get(&event).cloned().unwrap_or_default()
    }

    pub fn count(&self, event: EventKind) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }
}

fn same_listener(a: &ListenerHandle, b: &ListenerHandle) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.listeners.iter().map(|(event, l)| (event, l.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_by_identity() {
        let mut registry = ListenerRegistry::new();
        let first = listener_from_fn(|_| {});
        let second = listener_from_fn(|_| {});

        registry.add(EventKind::LocationChanged, first.clone());
        registry.add(EventKind::LocationChanged, second.clone());
        registry.add(EventKind::LocationChanged, first.clone());
        assert_eq!(registry.count(EventKind::LocationChanged), 3);

        registry.remove(EventKind::LocationChanged, &first);
        let remaining = registry.snapshot(EventKind::LocationChanged);
        assert_eq!(remaining.len(), 1);
        assert!(same_listener(&remaining[0], &second));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = ListenerRegistry::new();
        registry.remove(EventKind::LocationChanged, &listener_from_fn(|_| {}));
        assert_eq!(registry.count(EventKind::LocationChanged), 0);
    }

    #[test]
    fn test_event_wire_name() {
        assert_eq!(
            serde_json::to_string(&EventKind::LocationChanged).unwrap(),
            r#""location-changed""#
        );
    }
}
