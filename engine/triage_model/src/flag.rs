// Flag catalog for the triage engine.
// A registry is built once per protocol and is immutable afterwards.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::FlagState;

/// One clinical finding a user can mark present or absent.
///
/// The `id` is the only part the engine looks at; `label`, `group`,
/// and `hint` are opaque display strings owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flag {
    /// Unique key, stable for the lifetime of the registry.
    pub id: String,
    /// Human-readable description of the finding.
    pub label: String,
    /// Optional category used for display grouping only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: Option<String>,
    /// Optional supplementary text shown next to the checkbox.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hint: Option<String>,
}

impl Flag {
    /// Creates a flag with no group or hint.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Flag {
            id: id.into(),
            label: label.into(),
            group: None,
            hint: None,
        }
    }

    /// Sets the display group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the supplementary hint text.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// An error raised while building a [`FlagRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two flags share the same id.
    #[error("duplicate flag id `{0}`")]
    DuplicateId(String),

    /// A flag was declared with an empty id.
    #[error("flag id cannot be empty")]
    EmptyId,
}

/// The ordered, immutable catalog of flags for one protocol.
///
/// Declaration order is preserved and is the order used for the
/// "currently checked" display, regardless of toggle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRegistry {
    flags: Vec<Flag>,
}

impl FlagRegistry {
    /// Builds a registry, rejecting empty or duplicate ids.
    pub fn new(flags: Vec<Flag>) -> Result<Self, RegistryError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for flag in &flags {
            if flag.id.is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if !seen.insert(&flag.id) {
                return Err(RegistryError::DuplicateId(flag.id.clone()));
            }
        }
        Ok(FlagRegistry { flags })
    }

    /// Returns true if `id` names a flag in this registry.
    pub fn contains(&self, id: &str) -> bool {
        self.flags.iter().any(|f| f.id == id)
    }

    /// Looks up a flag by id.
    pub fn get(&self, id: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.id == id)
    }

    /// Iterates over the flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Returns the flags currently set in `state`, in declaration
    /// order (not in the order they were toggled).
    pub fn active<'r>(&'r self, state: &FlagState) -> Vec<&'r Flag> {
        self.flags.iter().filter(|f| state.is_set(&f.id)).collect()
    }
}
