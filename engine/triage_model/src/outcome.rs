// Disposition payload returned by the engine.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Urgency category of a disposition, consumed by the presentation
/// layer for color coding. A closed set; the engine attaches no
/// styling meaning to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tone {
    Neutral,
    Ok,
    Warn,
    Danger,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tone::Neutral => "neutral",
            Tone::Ok => "ok",
            Tone::Warn => "warn",
            Tone::Danger => "danger",
        };
        f.write_str(s)
    }
}

/// The recommended disposition for the current answer set: a tone, a
/// headline, and an ordered list of advice bullets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outcome {
    pub tone: Tone,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bullets: Vec<String>,
}

impl Outcome {
    /// Creates an outcome with no bullets.
    pub fn new(tone: Tone, title: impl Into<String>) -> Self {
        Outcome {
            tone,
            title: title.into(),
            bullets: Vec::new(),
        }
    }

    /// Replaces the bullet list.
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }
}
