// Protocol file format: one symptom's flag catalog plus its rule
// table, as consumed by the CLI. The engine crates stay free of I/O;
// only this module and the binary touch JSON text.

use serde::{Deserialize, Serialize};

use crate::session::{SessionError, TriageSession};
use triage_model::{Flag, FlagRegistry, RegistryError};
use triage_rules::{DispositionRule, Ruleset, RulesetError};

/// A declarative triage protocol for one presenting symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    /// Display name of the protocol (e.g. the presenting symptom).
    pub name: String,
    /// Flag catalog, in display order.
    #[serde(default)]
    pub flags: Vec<Flag>,
    /// Whether sessions for this protocol track the weight-loss
    /// metric.
    #[serde(default)]
    pub uses_weight_metric: bool,
    /// Rule table in priority order; the last rule must be the
    /// unconditional fallback.
    pub rules: Vec<DispositionRule>,
}

/// A defect in a protocol document.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid protocol JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ruleset(#[from] RulesetError),
}

impl From<SessionError> for ProtocolError {
    // Session assembly re-raises registry and ruleset defects; keep
    // the taxonomy flat so callers match one variant per defect kind.
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Registry(e) => ProtocolError::Registry(e),
            SessionError::Ruleset(e) => ProtocolError::Ruleset(e),
        }
    }
}

impl Protocol {
    /// Parses a protocol from JSON text. Structural only; rule
    /// validation happens in [`Protocol::into_session`].
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the protocol as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a fresh session for this protocol, running every
    /// construction-time check (duplicate flag ids, missing
    /// catch-all, unknown flags, metric configuration).
    pub fn into_session(self) -> Result<TriageSession, ProtocolError> {
        let registry = FlagRegistry::new(self.flags)?;
        let ruleset = Ruleset::new(self.rules)?;
        let session = if self.uses_weight_metric {
            TriageSession::with_weight_metric(registry, ruleset)?
        } else {
            TriageSession::new(registry, ruleset)?
        };
        Ok(session)
    }
}
