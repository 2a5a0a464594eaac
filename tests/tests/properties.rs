// Algebraic properties of state mutation and rule evaluation.

use proptest::prelude::*;
use tests::{red_flag_registry, red_flag_ruleset};
use triage_model::FlagState;
use triage_rules::EvalContext;

const IDS: [&str; 7] = ["a", "b", "c", "d", "e", "f", "g"];

fn state_from_toggles(toggles: &[usize]) -> FlagState {
    let mut state = FlagState::new();
    for &i in toggles {
        state.toggle(IDS[i % IDS.len()]);
    }
    state
}

proptest! {
    #[test]
    fn toggle_is_an_involution(toggles in prop::collection::vec(0usize..7, 0..32), extra in 0usize..7) {
        let original = state_from_toggles(&toggles);
        let mut state = original.clone();
        state.toggle(IDS[extra]);
        state.toggle(IDS[extra]);
        prop_assert_eq!(state, original);
    }

    #[test]
    fn clear_is_idempotent(toggles in prop::collection::vec(0usize..7, 0..32)) {
        let mut state = state_from_toggles(&toggles);
        state.clear();
        let once = state.clone();
        state.clear();
        prop_assert_eq!(&state, &once);
        prop_assert_eq!(state, FlagState::new());
    }

    #[test]
    fn evaluation_is_deterministic(toggles in prop::collection::vec(0usize..7, 0..32)) {
        let ruleset = red_flag_ruleset();
        let state = state_from_toggles(&toggles);
        let ctx = EvalContext { state: &state, metric: None };
        prop_assert_eq!(ruleset.evaluate(&ctx), ruleset.evaluate(&ctx));
    }

    #[test]
    fn red_flag_aggregation_matches_any_set(toggles in prop::collection::vec(0usize..7, 0..32)) {
        let registry = red_flag_registry();
        let ruleset = red_flag_ruleset();
        let state = state_from_toggles(&toggles);
        let ctx = EvalContext { state: &state, metric: None };

        let danger = ruleset.evaluate(&ctx).title == "Refer urgently";
        prop_assert_eq!(danger, state.any_set());
        prop_assert_eq!(registry.active(&state).len(), state.count_set());
    }
}
