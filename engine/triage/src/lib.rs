//! Symptom-triage engine facade.
//!
//! Ties the flag catalog, the per-session answer state, the optional
//! weight metric, and a validated ruleset into a single synchronous
//! [`TriageSession`]: every mutation immediately recomputes the
//! current disposition, so a hosting UI can read the snapshot right
//! after each call with no subscription machinery.
//!
//! The [`protocol`] module defines the serde-backed protocol file
//! format the `triage` CLI consumes.

pub mod protocol;
pub mod session;

pub use protocol::{Protocol, ProtocolError};
pub use session::{SessionError, TriageSession};

// Re-export the building blocks so integrators need one crate.
pub use triage_metric::{
    classify, compute_percent_loss, meets_threshold, MetricReading, Severity, WeightRecord,
    WindowMonths, DEFAULT_LOSS_THRESHOLD,
};
pub use triage_model::{Flag, FlagRegistry, FlagState, Outcome, RegistryError, Tone};
pub use triage_rules::{DispositionRule, EvalContext, Predicate, Ruleset, RulesetError};
