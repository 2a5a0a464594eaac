// End-to-end session behavior across the facade.

use pretty_assertions::assert_eq;
use tests::{red_flag_registry, red_flag_ruleset};
use triage::{TriageSession, WindowMonths};
use triage_model::{Flag, FlagRegistry, Outcome, Tone};
use triage_rules::{DispositionRule, Predicate, Ruleset};

#[test]
fn any_single_red_flag_triggers_danger() {
    for id in ["a", "b", "c", "d", "e", "f", "g"] {
        let mut session = TriageSession::new(red_flag_registry(), red_flag_ruleset()).unwrap();
        assert_eq!(session.disposition().tone, Tone::Neutral);

        session.toggle(id);
        assert_eq!(session.disposition().tone, Tone::Danger, "flag `{id}`");

        session.clear();
        assert_eq!(session.disposition().tone, Tone::Neutral, "after clear");
    }
}

#[test]
fn disposition_is_always_present() {
    // Walk every single-flag state plus the empty state; the
    // fallback guarantees an outcome everywhere.
    let mut session = TriageSession::new(red_flag_registry(), red_flag_ruleset()).unwrap();
    assert!(!session.disposition().title.is_empty());
    for id in ["a", "b", "c", "d", "e", "f", "g"] {
        session.toggle(id);
        assert!(!session.disposition().title.is_empty());
        session.toggle(id);
    }
}

#[test]
fn weight_loss_tiers_follow_the_scenario_table() {
    let registry = FlagRegistry::new(vec![Flag::new("red", "Any red flag")]).unwrap();
    let ruleset = Ruleset::new(vec![
        DispositionRule::new(
            "red_flags",
            Predicate::flag("red"),
            Outcome::new(Tone::Danger, "Refer urgently"),
        ),
        DispositionRule::new(
            "significant_loss",
            Predicate::LossAtLeast(5.0),
            Outcome::new(Tone::Warn, "Significant loss"),
        ),
        DispositionRule::new(
            "fallback",
            Predicate::Always,
            Outcome::new(Tone::Neutral, "Insufficient data"),
        ),
    ])
    .unwrap();
    let mut session = TriageSession::with_weight_metric(registry, ruleset).unwrap();
    session.set_baseline(60.0);
    session.set_window(WindowMonths::Six);

    // 60 -> 56 kg: 6.7%, meets the 5% threshold.
    session.set_current(56.0);
    assert_eq!(session.metric().unwrap().percent_loss, 6.7);
    assert_eq!(session.disposition().title, "Significant loss");

    // 60 -> 57 kg: exactly 5.0%, boundary inclusive.
    session.set_current(57.0);
    assert_eq!(session.metric().unwrap().percent_loss, 5.0);
    assert_eq!(session.disposition().title, "Significant loss");

    // 60 -> 58 kg: 3.3%, below threshold.
    session.set_current(58.0);
    assert_eq!(session.metric().unwrap().percent_loss, 3.3);
    assert_eq!(session.disposition().title, "Insufficient data");

    // Weight gain never meets the loss threshold.
    session.set_current(70.0);
    assert_eq!(session.metric().unwrap().percent_loss, -16.7);
    assert_eq!(session.disposition().title, "Insufficient data");

    // Red flags outrank the metric tier regardless of the reading.
    session.set_current(40.0);
    session.toggle("red");
    assert_eq!(session.disposition().title, "Refer urgently");
}

#[test]
fn mutations_recompute_synchronously() {
    let mut session = TriageSession::new(red_flag_registry(), red_flag_ruleset()).unwrap();
    session.toggle("c");
    let after_toggle = session.disposition().clone();
    assert_eq!(after_toggle.tone, Tone::Danger);

    // Reading again without mutating returns the identical snapshot.
    assert_eq!(session.disposition(), &after_toggle);
}
