use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Modifier, ModifierSet};

/// Parameters attached to a location
pub type Params = BTreeMap<String, serde_json::Value>;

/// A node in the navigation stack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    /// Screen being navigated to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,

    /// Modal layered on the view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<String>,

    /// Popup layered on the view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,

    #[serde(default)]
    pub modifiers: ModifierSet,
}

impl Location {
    /// Location pointing at a view
    pub fn view(view: impl Into<String>) -> Self {
        Self {
            view: Some(view.into()),
            ..Self::default()
        }
    }

    /// Technical location carrying only modifiers
    pub fn technical(modifiers: impl Into<ModifierSet>) -> Self {
        Self {
            modifiers: modifiers.into(),
            ..Self::default()
        }
    }

    /// The entry every fresh stack starts with
    pub fn root() -> Self {
        Self::technical(ModifierSet::only(Modifier::Root))
    }

    pub fn with_modal(mut self, modal: impl Into<String>) -> Self {
        self.modal = Some(modal.into());
        self
    }

    pub fn with_popup(mut self, popup: impl Into<String>) -> Self {
        self.popup = Some(popup.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    /// Canonical form: empty identifiers count as absent
    pub fn normalized(mut self) -> Self {
        for slot in [&mut self.view, &mut self.modal, &mut self.popup] {
            if slot.as_deref().is_some_and(str::is_empty) {
                *slot = None;
            }
        }
        self
    }

    /// True when the location carries nothing but modifiers
    pub fn is_technical(&self) -> bool {
        self.view.is_none() && self.modal.is_none() && self.popup.is_none() && self.params.is_empty()
    }

    pub fn is_skipped(&self) -> bool {
        self.modifiers.contains(Modifier::Skip)
    }

    pub fn is_root(&self) -> bool {
        self.modifiers.contains(Modifier::Root)
    }
}
