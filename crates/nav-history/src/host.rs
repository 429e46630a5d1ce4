//! Host history seam and an in-memory host

use serde_json::Value;
use std::collections::VecDeque;

/// The host's history mechanism.
///
/// A browser binding forwards these to `window.history`; the adapter owns
/// the host for as long as it is bound to it.
pub trait HostHistory {
    /// Append an entry after the current one, dropping forward entries
    fn push_state(&mut self, state: Value, url: &str);

    /// Overwrite the current entry
    fn replace_state(&mut self, state: Value, url: &str);

    /// Move through host history. Hosts report the move back through
    /// [`crate::BrowserNavigator::pop_state`].
    fn go(&mut self, delta: isize);

    /// Number of host entries
    fn length(&self) -> usize;

    /// State stored on the current entry, `None` when there is none
    fn state(&self) -> Option<Value>;

    /// Path component of the current URL
    fn pathname(&self) -> String;

    /// Fragment of the current URL including the leading `#`, or empty
    fn hash(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
struct MemoryEntry {
    state: Value,
    pathname: String,
    hash: String,
}

/// In-memory host history.
///
/// Behaves like a browser session history: pushes truncate forward
/// entries, out-of-range moves are ignored, and every move queues a pop
/// event for the embedder to deliver.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<MemoryEntry>,
    index: usize,
    pending_pops: VecDeque<Option<Value>>,
}

impl MemoryHistory {
    /// History holding a single stateless entry at `url`
    pub fn new(url: &str) -> Self {
        let (pathname, hash) = split_url("/", url);
        Self {
            entries: vec![MemoryEntry {
                state: Value::Null,
                pathname,
                hash,
            }],
            index: 0,
            pending_pops: VecDeque::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Full URL of the current entry
    pub fn url(&self) -> String {
        let entry = &self.entries[self.index];
        format!("{}{}", entry.pathname, entry.hash)
    }

    /// Next queued pop event, carrying the state of the entry moved to
    pub fn take_pop_event(&mut self) -> Option<Option<Value>> {
        self.pending_pops.pop_front()
    }

    /// Simulate a user-initiated navigation that bypasses the adapter, such
    /// as following a link to a new fragment
    pub fn navigate_externally(&mut self, url: &str) {
        self.push_state(Value::Null, url);
        self.pending_pops.push_back(None);
    }

    fn entry_for(&self, state: Value, url: &str) -> MemoryEntry {
        let (pathname, hash) = split_url(&self.entries[self.index].pathname, url);
        MemoryEntry { state, pathname, hash }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HostHistory for MemoryHistory {
    fn push_state(&mut self, state: Value, url: &str) {
        let entry = self.entry_for(state, url);
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
        self.index += 1;
    }

    fn replace_state(&mut self, state: Value, url: &str) {
        let entry = self.entry_for(state, url);
        self.entries[self.index] = entry;
    }

    fn go(&mut self, delta: isize) {
        let Some(target) = (self.index as isize).checked_add(delta) else {
            return;
        };
        if delta == 0 || target < 0 || target as usize >= self.entries.len() {
            return;
        }
        self.index = target as usize;
        let state = &self.entries[self.index].state;
        self.pending_pops
            .push_back((!state.is_null()).then(|| state.clone()));
    }

    fn length(&self) -> usize {
        self.entries.len()
    }

    fn state(&self) -> Option<Value> {
        let state = &self.entries[self.index].state;
        (!state.is_null()).then(|| state.clone())
    }

    fn pathname(&self) -> String {
        self.entries[self.index].pathname.clone()
    }

    fn hash(&self) -> String {
        self.entries[self.index].hash.clone()
    }
}

/// Resolve `url` against `current_path` into (pathname, hash)
fn split_url(current_path: &str, url: &str) -> (String, String) {
    let (path, hash) = match url.find('#') {
        Some(at) => (&url[..at], url[at..].to_string()),
        None => (url, String::new()),
    };
    let path = path.split('?').next().unwrap_or_default();
    let pathname = if path.is_empty() {
        current_path.to_string()
    } else {
        path.to_string()
    };
    (pathname, hash)
}
