//! Disposition rules for the symptom-triage engine.
//!
//! A ruleset is an ordered list of (predicate, outcome) pairs
//! evaluated first-match-wins: declaration order encodes priority, so
//! danger tiers go first and the mandatory always-true fallback goes
//! last. Predicates are a small declarative AST rather than opaque
//! closures, which lets a ruleset be validated against a flag
//! registry at construction time and serialized as part of a protocol
//! file.

pub mod predicate;
pub mod ruleset;

pub use predicate::{EvalContext, Predicate};
pub use ruleset::{DispositionRule, Ruleset, RulesetError};
