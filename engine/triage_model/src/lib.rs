//! Data model for the symptom-triage engine.
//!
//! This crate defines the static catalog of clinical findings
//! ([`Flag`], [`FlagRegistry`]), the mutable per-session answer set
//! ([`FlagState`]), and the disposition payload the engine produces
//! ([`Outcome`], [`Tone`]). Everything here is plain data; the
//! evaluation logic lives in `triage_rules`.

pub mod flag;
pub mod outcome;
pub mod state;

// Re-export commonly used types
pub use flag::{Flag, FlagRegistry, RegistryError};
pub use outcome::{Outcome, Tone};
pub use state::FlagState;
