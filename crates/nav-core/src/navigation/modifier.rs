//! Structural modifiers attached to push requests

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directive altering how a location is merged into the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Marks the first stack entry
    Root,
    /// Overwrite the current entry instead of inserting
    Replace,
    /// Move one entry back instead of inserting
    Back,
    /// Move one entry forward instead of inserting
    Forward,
    /// Entry is kept in the stack but never used as a resting point
    Skip,
}

impl Modifier {
    /// All modifiers in canonical order. Resolution precedence follows
    /// this order too (skip never triggers a resolution branch).
    pub const ALL: [Modifier; 5] = [
        Modifier::Root,
        Modifier::Replace,
        Modifier::Back,
        Modifier::Forward,
        Modifier::Skip,
    ];

    /// Modifiers which must never be stored on the root entry
    pub const FORBIDDEN_ON_ROOT: [Modifier; 4] = [
        Modifier::Skip,
        Modifier::Back,
        Modifier::Forward,
        Modifier::Replace,
    ];

    /// Wire name of the modifier
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Root => "root",
            Modifier::Replace => "replace",
            Modifier::Back => "back",
            Modifier::Forward => "forward",
            Modifier::Skip => "skip",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Modifier::Root => 1 << 0,
            Modifier::Replace => 1 << 1,
            Modifier::Back => 1 << 2,
            Modifier::Forward => 1 << 3,
            Modifier::Skip => 1 << 4,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size set of modifiers.
///
/// Iteration and serialization always use the canonical order of
/// [`Modifier::ALL`]; duplicates collapse.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(u8);

impl ModifierSet {
    /// An empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set containing a single modifier
    pub fn only(modifier: Modifier) -> Self {
        Self(modifier.bit())
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.0 &= !modifier.bit();
    }

    /// Builder-style insert
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    /// Copy of this set with every listed modifier removed
    pub fn without(mut self, modifiers: &[Modifier]) -> Self {
        for modifier in modifiers {
            self.remove(*modifier);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Modifier> {
        let set = *self;
        Modifier::ALL.into_iter().filter(move |m| set.contains(*m))
    }

    /// First modifier of `candidates` present in this set
    pub fn first_of(&self, candidates: &[Modifier]) -> Option<Modifier> {
        candidates.iter().copied().find(|m| self.contains(*m))
    }
}

impl fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::empty();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl<const N: usize> From<[Modifier; N]> for ModifierSet {
    fn from(modifiers: [Modifier; N]) -> Self {
        modifiers.into_iter().collect()
    }
}

impl Serialize for ModifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for modifier in self.iter() {
            seq.serialize_element(&modifier)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ModifierSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = ModifierSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of modifier names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ModifierSet, A::Error> {
                let mut set = ModifierSet::empty();
                while let Some(modifier) = seq.next_element::<Modifier>()? {
                    set.insert(modifier);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}
