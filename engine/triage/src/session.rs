// Session facade: one user's answer set plus the cached disposition.

use log::warn;

use triage_metric::{MetricReading, WeightRecord, WindowMonths};
use triage_model::{Flag, FlagRegistry, FlagState, Outcome, RegistryError};
use triage_rules::{EvalContext, Ruleset, RulesetError};

/// A configuration defect found while assembling a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ruleset(#[from] RulesetError),
}

/// One triage session: the registry and ruleset fixed at
/// construction, the mutable answer state, and the disposition for
/// that state, recomputed synchronously after every mutation.
///
/// Single-threaded by design. Each mutation is one atomic
/// state-replacement; there is no I/O, no async work, and no shared
/// state across sessions.
#[derive(Debug, Clone)]
pub struct TriageSession {
    registry: FlagRegistry,
    ruleset: Ruleset,
    state: FlagState,
    weight: Option<WeightRecord>,
    current: Outcome,
}

impl TriageSession {
    /// Assembles a session without a weight metric. The ruleset is
    /// validated against the registry up front; metric predicates are
    /// rejected here.
    pub fn new(registry: FlagRegistry, ruleset: Ruleset) -> Result<Self, SessionError> {
        Self::build(registry, ruleset, None)
    }

    /// Assembles a session that tracks the weight-loss metric,
    /// starting from a default (empty) weight record.
    pub fn with_weight_metric(
        registry: FlagRegistry,
        ruleset: Ruleset,
    ) -> Result<Self, SessionError> {
        Self::build(registry, ruleset, Some(WeightRecord::default()))
    }

    fn build(
        registry: FlagRegistry,
        ruleset: Ruleset,
        weight: Option<WeightRecord>,
    ) -> Result<Self, SessionError> {
        ruleset.validate(&registry, weight.is_some())?;
        let state = FlagState::new();
        let metric = weight.map(|w| w.reading());
        let current = ruleset
            .evaluate(&EvalContext {
                state: &state,
                metric,
            })
            .clone();
        Ok(TriageSession {
            registry,
            ruleset,
            state,
            weight,
            current,
        })
    }

    /// Flips one flag and recomputes the disposition. Ids the
    /// registry does not know are ignored with a warning, keeping
    /// toggle total.
    pub fn toggle(&mut self, id: &str) {
        if !self.registry.contains(id) {
            warn!("ignoring toggle of unknown flag id `{id}`");
            return;
        }
        self.state.toggle(id);
        self.recompute();
    }

    /// Resets every flag to false and recomputes.
    pub fn clear(&mut self) {
        self.state.clear();
        self.recompute();
    }

    /// Updates the baseline weight reading. Ignored (with a warning)
    /// when the session has no weight metric.
    pub fn set_baseline(&mut self, kg: f64) {
        match &mut self.weight {
            Some(w) => {
                w.baseline_kg = Some(kg);
                self.recompute();
            }
            None => warn!("ignoring baseline weight for a session without a weight metric"),
        }
    }

    /// Updates the current weight reading.
    pub fn set_current(&mut self, kg: f64) {
        match &mut self.weight {
            Some(w) => {
                w.current_kg = Some(kg);
                self.recompute();
            }
            None => warn!("ignoring current weight for a session without a weight metric"),
        }
    }

    /// Selects the look-back window.
    pub fn set_window(&mut self, window: WindowMonths) {
        match &mut self.weight {
            Some(w) => {
                w.window = window;
                self.recompute();
            }
            None => warn!("ignoring window selection for a session without a weight metric"),
        }
    }

    /// The flag catalog this session was built with.
    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    /// Snapshot of the current answer state.
    pub fn state(&self) -> &FlagState {
        &self.state
    }

    /// The currently checked flags, in registry declaration order.
    pub fn active_flags(&self) -> Vec<&Flag> {
        self.registry.active(&self.state)
    }

    /// The current weight-metric reading, if the session tracks one.
    pub fn metric(&self) -> Option<MetricReading> {
        self.weight.map(|w| w.reading())
    }

    /// The disposition for the current state. Always present: the
    /// ruleset's terminal rule guarantees total coverage.
    pub fn disposition(&self) -> &Outcome {
        &self.current
    }

    fn recompute(&mut self) {
        let metric = self.weight.map(|w| w.reading());
        let next = self
            .ruleset
            .evaluate(&EvalContext {
                state: &self.state,
                metric,
            })
            .clone();
        self.current = next;
    }
}
