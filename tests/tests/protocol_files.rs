// Protocol-document parsing, validation, and evaluation, including
// the demo file shipped with the repository.

use pretty_assertions::assert_eq;
use triage::{Protocol, ProtocolError, Severity, Tone, WindowMonths};
use triage_rules::RulesetError;

const DEMO: &str = include_str!("../../demos/weight_loss.json");

#[test]
fn demo_protocol_validates() {
    let protocol = Protocol::from_json(DEMO).unwrap();
    assert_eq!(protocol.name, "Unintentional weight loss");
    assert_eq!(protocol.flags.len(), 7);
    assert!(protocol.uses_weight_metric);
    assert!(protocol.into_session().is_ok());
}

#[test]
fn demo_protocol_round_trips() {
    let protocol = Protocol::from_json(DEMO).unwrap();
    let json = protocol.to_json().unwrap();
    assert_eq!(Protocol::from_json(&json).unwrap(), protocol);
}

#[test]
fn demo_red_flags_outrank_weight_loss() {
    let mut session = Protocol::from_json(DEMO).unwrap().into_session().unwrap();
    session.set_baseline(60.0);
    session.set_current(50.0);
    session.set_window(WindowMonths::Twelve);
    assert_eq!(session.disposition().tone, Tone::Warn);
    assert_eq!(session.metric().unwrap().severity, Severity::Severe);

    session.toggle("night_sweats");
    assert_eq!(session.disposition().tone, Tone::Danger);
    assert_eq!(session.disposition().title, "Refer urgently");
}

#[test]
fn demo_mild_loss_with_low_mood_tier() {
    let mut session = Protocol::from_json(DEMO).unwrap().into_session().unwrap();
    session.set_baseline(60.0);
    session.set_current(58.0); // 3.3%: mild
    assert_eq!(session.disposition().tone, Tone::Neutral);

    session.toggle("low_mood");
    assert_eq!(session.disposition().tone, Tone::Ok);
    assert_eq!(session.disposition().title, "Outpatient management");
}

#[test]
fn protocol_without_catch_all_is_rejected() {
    let text = r#"{
        "name": "Broken",
        "flags": [{ "id": "a", "label": "A" }],
        "rules": [
            { "name": "only", "when": { "flag": "a" },
              "outcome": { "tone": "danger", "title": "Refer" } }
        ]
    }"#;
    let err = Protocol::from_json(text).unwrap().into_session().unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Ruleset(RulesetError::MissingCatchAll(name)) if name == "only"
    ));
}

#[test]
fn protocol_with_unknown_flag_is_rejected() {
    let text = r#"{
        "name": "Broken",
        "flags": [{ "id": "a", "label": "A" }],
        "rules": [
            { "name": "danger", "when": { "any_of": ["a", "ghost"] },
              "outcome": { "tone": "danger", "title": "Refer" } },
            { "name": "fallback", "when": "always",
              "outcome": { "tone": "neutral", "title": "Insufficient data" } }
        ]
    }"#;
    let err = Protocol::from_json(text).unwrap().into_session().unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Ruleset(RulesetError::UnknownFlag { id, .. }) if id == "ghost"
    ));
}

#[test]
fn metric_rules_need_the_metric_enabled() {
    let text = r#"{
        "name": "Broken",
        "flags": [],
        "uses_weight_metric": false,
        "rules": [
            { "name": "loss", "when": { "loss_at_least": 5.0 },
              "outcome": { "tone": "warn", "title": "Loss" } },
            { "name": "fallback", "when": "always",
              "outcome": { "tone": "neutral", "title": "Insufficient data" } }
        ]
    }"#;
    let err = Protocol::from_json(text).unwrap().into_session().unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Ruleset(RulesetError::MetricNotConfigured(name)) if name == "loss"
    ));
}

#[test]
fn malformed_json_reports_a_parse_error() {
    let err = Protocol::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ProtocolError::Parse(_)));
}
