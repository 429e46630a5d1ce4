//! Location stack engine implementation

use super::{ChangeResult, Location, Modifier, NavigatorSnapshot};
use crate::config::{NavigateOptions, NavigatorConfig};
use crate::error::{CorruptStackReason, NavigatorError, Result};
use crate::events::{EventKind, ListenerHandle, ListenerRegistry};
use parking_lot::RwLock;
use std::sync::Arc;

macro_rules! nav_log {
    ($self:expr, $($arg:tt)*) => {
        if $self.config.log {
            tracing::debug!(target: "nav_core::navigator", $($arg)*);
        }
    };
}

/// Modifiers which select a resolution branch, highest precedence first
const RESOLUTION_ORDER: [Modifier; 4] = [
    Modifier::Root,
    Modifier::Replace,
    Modifier::Back,
    Modifier::Forward,
];

/// Request directives which never survive into a stored entry
const TRANSIENT: [Modifier; 3] = [Modifier::Replace, Modifier::Back, Modifier::Forward];

/// Stack state stored internally
#[derive(Debug, Clone)]
struct StackState {
    locations: Vec<Location>,
    index: usize,
}

impl StackState {
    fn current(&self) -> &Location {
        &self.locations[self.index]
    }

    /// Index `go(delta)` would land on, or `None` when it would not move
    fn resolve_target(&self, delta: isize) -> Option<usize> {
        let from = self.index;
        let last = self.locations.len() - 1;
        let next = (from as isize).saturating_add(delta).clamp(0, last as isize) as usize;

        if next == from {
            return None;
        }
        if !self.locations[next].is_skipped() {
            return Some(next);
        }

        // Slide past the skipped target first, then fall back towards the
        // starting point from the other side
        let compatible = |i: &usize| !self.locations[*i].is_skipped();
        if next > from {
            ((next + 1)..=last).chain(((from + 1)..next).rev()).find(compatible)
        } else {
            (0..next).rev().chain((next + 1)..from).find(compatible)
        }
    }
}

/// The navigation core: an ordered stack of locations and a cursor into it.
///
/// Clones share the same stack and listeners, so a listener may capture a
/// clone and navigate from inside its callback.
#[derive(Debug, Clone)]
pub struct Navigator {
    state: Arc<RwLock<StackState>>,
    listeners: Arc<RwLock<ListenerRegistry>>,
    config: NavigatorConfig,
}

impl Navigator {
    /// Create a navigator holding only the root location
    pub fn new(config: NavigatorConfig) -> Self {
        let navigator = Self {
            state: Arc::new(RwLock::new(StackState {
                locations: vec![Location::root()],
                index: 0,
            })),
            listeners: Arc::new(RwLock::new(ListenerRegistry::new())),
            config,
        };
        nav_log!(navigator, "instance created");
        navigator
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Introduce a navigation intent, resolving its modifiers
    pub fn push_location(&self, location: Location, options: NavigateOptions) -> Result<ChangeResult> {
        nav_log!(self, ?location, "pushing location");
        let location = location.normalized();
        let modifiers = location.modifiers;

        if location.is_technical() && modifiers.is_empty() {
            return Err(NavigatorError::InvalidRequest);
        }

        match modifiers.first_of(&RESOLUTION_ORDER) {
            Some(Modifier::Root) => {
                nav_log!(self, "location has \"root\" modifier");
                self.replace_root(location, options)
            }
            Some(Modifier::Replace) => {
                nav_log!(self, "location has \"replace\" modifier");
                Ok(self.replace_location(location, options))
            }
            Some(Modifier::Back) => {
                nav_log!(self, "location has \"back\" modifier");
                Ok(self.back(options))
            }
            Some(Modifier::Forward) => {
                nav_log!(self, "location has \"forward\" modifier");
                Ok(self.forward(options))
            }
            _ => {
                nav_log!(self, "location has no special modifiers");
                Ok(self.insert_location(location, options))
            }
        }
    }

    /// Truncate everything after the current entry and append `location`
    fn insert_location(&self, location: Location, options: NavigateOptions) -> ChangeResult {
        let mut state = self.state.write();
        let keep = state.index + 1;
        state.locations.truncate(keep);
        state.locations.push(location.clone());
        state.index = keep;
        nav_log!(self, ?location, stack_len = state.locations.len(), "pushed location to stack");
        drop(state);

        if !options.silent {
            self.emit_location_changed(&location);
        }

        ChangeResult { delta: 1, location }
    }

    /// Overwrite the current entry in place
    fn replace_location(&self, location: Location, options: NavigateOptions) -> ChangeResult {
        let mut state = self.state.write();
        let mut modifiers = location.modifiers.without(&TRANSIENT);
        if state.index == 0 {
            // The first entry stays the root whatever replaces it
            modifiers = modifiers.without(&Modifier::FORBIDDEN_ON_ROOT).with(Modifier::Root);
        }
        let entry = Location { modifiers, ..location };
        let index = state.index;
        state.locations[index] = entry.clone();
        nav_log!(self, index, location = ?entry, "replaced location");
        drop(state);

        if !options.silent {
            self.emit_location_changed(&entry);
        }

        ChangeResult { delta: 0, location: entry }
    }

    fn replace_root(&self, location: Location, options: NavigateOptions) -> Result<ChangeResult> {
        let mut state = self.state.write();
        if state.index != 0 || !location.modifiers.contains(Modifier::Replace) {
            nav_log!(self, index = state.index, "\"root\" modifier passed illegally");
            return Err(NavigatorError::IllegalModifier);
        }

        let entry = Location {
            modifiers: location.modifiers.without(&Modifier::FORBIDDEN_ON_ROOT),
            ..location
        };
        state.locations[0] = entry.clone();
        nav_log!(self, location = ?entry, "replaced root location");
        drop(state);

        if !options.silent {
            self.emit_location_changed(&entry);
        }

        Ok(ChangeResult { delta: 0, location: entry })
    }

    /// Move the cursor by `delta`, clamped to the stack and sliding past
    /// entries marked with "skip"
    pub fn go(&self, delta: isize, options: NavigateOptions) -> ChangeResult {
        nav_log!(self, delta, silent = options.silent, "go() called");
        let mut state = self.state.write();
        let from = state.index;

        match state.resolve_target(delta) {
            Some(to) if to != from => {
                state.index = to;
                let location = state.current().clone();
                drop(state);

                if !options.silent {
                    self.emit_location_changed(&location);
                }

                ChangeResult {
                    delta: to as isize - from as isize,
                    location,
                }
            }
            _ => {
                nav_log!(self, delta, "go() did not move");
                ChangeResult {
                    delta: 0,
                    location: state.current().clone(),
                }
            }
        }
    }

    /// Shortcut for `go(-1)`
    pub fn back(&self, options: NavigateOptions) -> ChangeResult {
        nav_log!(self, "back() called");
        self.go(-1, options)
    }

    /// Shortcut for `go(1)`
    pub fn forward(&self, options: NavigateOptions) -> ChangeResult {
        nav_log!(self, "forward() called");
        self.go(1, options)
    }

    /// Whether `back()` would move the cursor
    pub fn can_go_back(&self) -> bool {
        self.state.read().resolve_target(-1).is_some()
    }

    /// Whether `forward()` would move the cursor
    pub fn can_go_forward(&self) -> bool {
        self.state.read().resolve_target(1).is_some()
    }

    /// Replace the whole state, e.g. when resynchronizing from persisted
    /// host state. Does not notify listeners.
    pub fn init(&self, index: usize, locations_stack: Vec<Location>) -> Result<()> {
        validate_stack(index, &locations_stack)?;

        let mut state = self.state.write();
        state.locations = locations_stack;
        state.index = index;
        nav_log!(self, index, stack = ?state.locations, "initialization complete");
        Ok(())
    }

    /// `init` from a snapshot
    pub fn restore(&self, snapshot: NavigatorSnapshot) -> Result<()> {
        self.init(snapshot.location_index, snapshot.locations_stack)
    }

    /// Current location
    pub fn location(&self) -> Location {
        self.state.read().current().clone()
    }

    pub fn location_index(&self) -> usize {
        self.state.read().index
    }

    pub fn locations_stack(&self) -> Vec<Location> {
        self.state.read().locations.clone()
    }

    /// Number of entries in the stack, always at least one
    pub fn stack_len(&self) -> usize {
        self.state.read().locations.len()
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        let state = self.state.read();
        NavigatorSnapshot {
            location_index: state.index,
            locations_stack: state.locations.clone(),
        }
    }

    /// Add a listener for `event`
    pub fn on(&self, event: EventKind, listener: ListenerHandle) {
        let mut listeners = self.listeners.write();
        listeners.add(event, listener);
        nav_log!(self, ?event, count = listeners.count(event), "added event listener");
    }

    /// Remove every registration of `listener` for `event`
    pub fn off(&self, event: EventKind, listener: &ListenerHandle) {
        let mut listeners = self.listeners.write();
        listeners.remove(event, listener);
        nav_log!(self, ?event, count = listeners.count(event), "removed event listener");
    }

    /// Notify "location changed" listeners. No lock is held while they run.
    fn emit_location_changed(&self, location: &Location) {
        let listeners = self.listeners.read().snapshot(EventKind::LocationChanged);
        for listener in &listeners {
            listener.on_location_changed(location);
        }
        nav_log!(self, ?location, listeners = listeners.len(), "emitted location change");
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}

fn validate_stack(index: usize, stack: &[Location]) -> Result<()> {
    let Some(root) = stack.first().filter(|_| index < stack.len()) else {
        return Err(NavigatorError::InvalidIndex {
            index,
            len: stack.len(),
        });
    };

    if !root.is_root() {
        return Err(NavigatorError::CorruptStack(CorruptStackReason::MissingRoot));
    }
    if let Some(modifier) = root.modifiers.first_of(&Modifier::FORBIDDEN_ON_ROOT) {
        return Err(NavigatorError::CorruptStack(
            CorruptStackReason::ForbiddenRootModifier(modifier),
        ));
    }
    Ok(())
}
