// Per-session answer state.
// Only ids currently set to true are stored; an absent id reads as false.

use std::collections::HashSet;

/// The mutable answer set for one triage session.
///
/// Conceptually a map from flag id to bool with absent meaning false.
/// Storing only the true ids keeps `toggle` an exact involution:
/// toggling an id twice returns the state to structural equality with
/// the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagState {
    active: HashSet<String>,
}

impl FlagState {
    /// Creates an empty state (every flag reads as false).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value for `id`; absent ids are false.
    pub fn is_set(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    /// Flips the value for `id`. Total: never fails, for any id.
    pub fn toggle(&mut self, id: &str) {
        if !self.active.remove(id) {
            self.active.insert(id.to_string());
        }
    }

    /// Sets `id` to an explicit value.
    pub fn set(&mut self, id: &str, value: bool) {
        if value {
            self.active.insert(id.to_string());
        } else {
            self.active.remove(id);
        }
    }

    /// Resets every flag to false.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Returns true if at least one flag is set.
    pub fn any_set(&self) -> bool {
        !self.active.is_empty()
    }

    /// Number of flags currently set.
    pub fn count_set(&self) -> usize {
        self.active.len()
    }
}
