//! Binds a [`Navigator`] to a host history mechanism

use nav_core::{
    ChangeResult, EventKind, ListenerHandle, Location, Modifier, NavigateOptions, Navigator,
};
use serde_json::Value;

use crate::config::{BrowserNavigatorConfig, HistoryMode};
use crate::host::HostHistory;
use crate::segue::SegueCodec;
use crate::state::HistoryState;
use crate::{HistoryError, Result};

macro_rules! browser_log {
    ($self:expr, $($arg:tt)*) => {
        if $self.config.log {
            tracing::debug!(target: "nav_history::browser", $($arg)*);
        }
    };
}

/// Modifiers that resolve to something other than inserting an entry
const STRUCTURAL: [Modifier; 4] = [
    Modifier::Root,
    Modifier::Replace,
    Modifier::Back,
    Modifier::Forward,
];

/// Keeps a navigator and a host history aligned.
///
/// While mounted, mutations routed through [`Self::intercept_push_state`]
/// and [`Self::intercept_replace_state`] go through the navigator first.
/// Before mounting and after unmounting they reach the host untouched.
pub struct BrowserNavigator<H, C> {
    navigator: Navigator,
    host: H,
    codec: C,
    config: BrowserNavigatorConfig,
    mounted: bool,
    last_pop_segue: Option<String>,
}

impl<H: HostHistory, C: SegueCodec> BrowserNavigator<H, C> {
    pub fn new(host: H, codec: C, config: BrowserNavigatorConfig) -> Self {
        let navigator = Navigator::new(config.navigator_config());
        let adapter = Self {
            navigator,
            host,
            codec,
            config,
            mounted: false,
            last_pop_segue: None,
        };
        browser_log!(adapter, mode = ?adapter.config.mode, "instance created");
        adapter
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn mode(&self) -> HistoryMode {
        self.config.mode
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start intercepting host mutations and derive the initial state from
    /// the host
    pub fn mount(&mut self) -> Result<()> {
        if let Some(state) = self.host.state().as_ref().and_then(HistoryState::from_value) {
            browser_log!(self, snapshot = ?state.navigator, "detected initial state while mounting");
            self.navigator.restore(state.navigator)?;
        } else if self.host.length() == 1 {
            // First host entry: make it the navigator's root
            browser_log!(self, "detected empty history, replacing with root location");
            self.replace_location(Location::root(), NavigateOptions::silent(), Value::Null)?;
        }

        browser_log!(
            self,
            stack = ?self.navigator.locations_stack(),
            location = ?self.navigator.location(),
            "mount completed"
        );
        self.mounted = true;
        Ok(())
    }

    /// Stop intercepting; host mutations pass straight through again
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.last_pop_segue = None;
        browser_log!(self, "unmounted");
    }

    /// Tear down and hand the host and navigator back
    pub fn into_parts(mut self) -> (H, Navigator) {
        self.unmount();
        (self.host, self.navigator)
    }

    /// Push through the navigator and mirror the outcome into the host
    pub fn push_location(
        &mut self,
        location: Location,
        options: NavigateOptions,
        data: Value,
    ) -> Result<ChangeResult> {
        // Only a plain push creates a new entry; the other branches reuse
        // entries the host already has
        let inserts = location.modifiers.first_of(&STRUCTURAL).is_none();
        let result = self.navigator.push_location(location, options)?;

        if inserts && result.delta > 0 {
            let state = self.history_state(data)?;
            let url = self.create_segue(&result.location);
            browser_log!(self, url = %url, "pushing host state");
            self.host.push_state(state, &url);
            self.last_pop_segue = None;
        } else if result.delta != 0 {
            browser_log!(self, delta = result.delta, "moving host");
            self.host.go(result.delta);
        }

        Ok(result)
    }

    /// Replace the current location and the current host entry
    pub fn replace_location(
        &mut self,
        location: Location,
        options: NavigateOptions,
        data: Value,
    ) -> Result<ChangeResult> {
        let url = self.create_segue(&location);
        let result = self
            .navigator
            .push_location(location.with_modifier(Modifier::Replace), options)?;

        let state = self.history_state(data)?;
        browser_log!(self, url = %url, "replacing host state");
        self.host.replace_state(state, &url);
        self.last_pop_segue = None;

        Ok(result)
    }

    /// Wrapped host `pushState(data, url)`
    pub fn intercept_push_state(&mut self, data: Value, url: &str) -> Result<()> {
        if !self.mounted {
            self.host.push_state(data, url);
            return Ok(());
        }
        let location = self.parse_segue(url).ok_or_else(|| HistoryError::UnparsableSegue(url.to_string()))?;
        self.push_location(location, NavigateOptions::default(), data)?;
        Ok(())
    }

    /// Wrapped host `replaceState(data, url)`
    pub fn intercept_replace_state(&mut self, data: Value, url: &str) -> Result<()> {
        if !self.mounted {
            self.host.replace_state(data, url);
            return Ok(());
        }
        let location = self.parse_segue(url).ok_or_else(|| HistoryError::UnparsableSegue(url.to_string()))?;
        self.replace_location(location, NavigateOptions::default(), data)?;
        Ok(())
    }

    /// Reconcile a host-originated move (back/forward button, link click).
    ///
    /// `state` is the state of the host entry that became current.
    pub fn pop_state(&mut self, state: Option<Value>) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }

        let segue = self.current_segue();
        let previous = self.last_pop_segue.replace(segue.clone());
        if previous.as_deref() == Some(segue.as_str()) {
            browser_log!(self, segue = %segue, "ignoring repeated pop of the same segue");
            return Ok(());
        }

        match state.as_ref().and_then(HistoryState::from_value) {
            Some(history_state) => {
                // Host state may be corrupted; saturate instead of overflowing
                let requested = isize::try_from(history_state.navigator.location_index)
                    .unwrap_or(isize::MAX)
                    .saturating_sub(self.navigator.location_index() as isize);
                let applied = self.navigator.go(requested, NavigateOptions::default()).delta;

                // Skips or clamping moved the navigator elsewhere; bring the
                // host along
                let correction = applied.saturating_sub(requested);
                if correction != 0 {
                    browser_log!(self, requested, applied, correction, "correcting host position");
                    self.host.go(correction);
                }
            }
            None => {
                let Some(location) = self.parse_segue(&segue) else {
                    self.host.go(-1);
                    return Err(HistoryError::UnparsableSegue(segue));
                };
                self.navigator.push_location(location.clone(), NavigateOptions::default())?;

                let data = self.history_state(state.unwrap_or(Value::Null))?;
                let url = self.create_segue(&location);
                browser_log!(self, url = %url, "adopting externally created entry");
                self.host.replace_state(data, &url);
            }
        }
        Ok(())
    }

    /// Ask the host to move; the host answers with [`Self::pop_state`]
    pub fn go(&mut self, delta: isize) {
        self.host.go(delta);
    }

    pub fn back(&mut self) {
        self.go(-1);
    }

    pub fn forward(&mut self) {
        self.go(1);
    }

    pub fn on(&self, event: EventKind, listener: ListenerHandle) {
        self.navigator.on(event, listener);
    }

    pub fn off(&self, event: EventKind, listener: &ListenerHandle) {
        self.navigator.off(event, listener);
    }

    /// Current location
    pub fn location(&self) -> Location {
        self.navigator.location()
    }

    /// The whole locations stack
    pub fn history(&self) -> Vec<Location> {
        self.navigator.locations_stack()
    }

    /// Segue with the mode prefix, as written into host URLs
    pub fn create_segue(&self, location: &Location) -> String {
        format!("{}{}", self.config.mode.prefix(), self.codec.format(location))
    }

    fn parse_segue(&self, raw: &str) -> Option<Location> {
        let segue = match self.config.mode {
            HistoryMode::Hash => raw.strip_prefix('#').unwrap_or(raw),
            HistoryMode::Path => raw,
        };
        self.codec.parse(segue)
    }

    fn current_segue(&self) -> String {
        match self.config.mode {
            HistoryMode::Hash => self.host.hash(),
            HistoryMode::Path => self.host.pathname(),
        }
    }

    fn history_state(&self, data: Value) -> Result<Value> {
        let state = HistoryState {
            state: data,
            navigator: self.navigator.snapshot(),
        };
        Ok(state.to_value()?)
    }
}
