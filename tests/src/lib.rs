//! Shared fixtures for the integration tests.

use triage_model::{Flag, FlagRegistry, Outcome, Tone};
use triage_rules::{DispositionRule, Predicate, Ruleset};

/// Seven-flag registry mirroring a typical red-flag checklist.
pub fn red_flag_registry() -> FlagRegistry {
    FlagRegistry::new(
        ["a", "b", "c", "d", "e", "f", "g"]
            .into_iter()
            .map(|id| Flag::new(id, format!("Finding {id}")).with_group("red flags"))
            .collect(),
    )
    .expect("fixture registry is valid")
}

/// Danger-first ruleset over [`red_flag_registry`].
pub fn red_flag_ruleset() -> Ruleset {
    Ruleset::new(vec![
        DispositionRule::new(
            "red_flags",
            Predicate::any_of(["a", "b", "c", "d", "e", "f", "g"]),
            Outcome::new(Tone::Danger, "Refer urgently"),
        ),
        DispositionRule::new(
            "fallback",
            Predicate::Always,
            Outcome::new(Tone::Neutral, "Insufficient data"),
        ),
    ])
    .expect("fixture ruleset is valid")
}
