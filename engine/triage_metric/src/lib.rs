//! Weight-loss threshold metric.
//!
//! Converts two weight readings and a look-back window into a signed
//! percent-loss figure and a severity bucket. Inputs are clamped into
//! a safe range rather than rejected: this metric feeds an advisory
//! tool that must always produce an answer, so numeric edge cases
//! (zero, negative, non-finite) normalize to defined outputs instead
//! of errors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Baselines at or below zero are clamped to this floor before the
/// division, so a percent is always computable.
pub const MIN_BASELINE_KG: f64 = 0.1;

/// Current-weight readings are clamped into [0, MAX_CURRENT_KG].
pub const MAX_CURRENT_KG: f64 = 500.0;

/// Percent loss at or above this figure counts as clinically
/// significant unintentional weight loss.
pub const DEFAULT_LOSS_THRESHOLD: f64 = 5.0;

/// Look-back window for the weight comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowMonths {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "6"))]
    Six,
    #[cfg_attr(feature = "serde", serde(rename = "12"))]
    Twelve,
}

impl WindowMonths {
    pub fn months(self) -> u8 {
        match self {
            WindowMonths::Six => 6,
            WindowMonths::Twelve => 12,
        }
    }
}

/// Severity bucket derived from the percent-loss figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// No loss, weight gain, or a non-finite input.
    Unknown,
    /// Loss in (0, 5) percent.
    Mild,
    /// Loss in [5, 10) percent.
    Moderate,
    /// Loss of 10 percent or more.
    Severe,
}

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Signed percent weight change between `baseline_kg` and
/// `current_kg`, rounded to one decimal place.
///
/// Negative results mean weight gain and never meet the loss
/// threshold. The baseline is floored at [`MIN_BASELINE_KG`] and the
/// current reading clamped into [0, [`MAX_CURRENT_KG`]]; nothing is
/// rejected.
pub fn compute_percent_loss(baseline_kg: f64, current_kg: f64) -> f64 {
    let baseline = baseline_kg.max(MIN_BASELINE_KG);
    let current = current_kg.clamp(0.0, MAX_CURRENT_KG);
    round1((baseline - current) / baseline * 100.0)
}

/// Buckets a percent-loss figure.
pub fn classify(percent: f64) -> Severity {
    if !percent.is_finite() || percent <= 0.0 {
        Severity::Unknown
    } else if percent < 5.0 {
        Severity::Mild
    } else if percent < 10.0 {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

/// Whether `percent` meets the loss threshold (boundary inclusive).
/// Non-finite percents never meet it.
pub fn meets_threshold(percent: f64, threshold: f64) -> bool {
    percent.is_finite() && percent >= threshold
}

/// The raw inputs a session keeps for the weight metric.
///
/// Readings start out unentered (`None`); the percent is only
/// computed once both are present. This keeps a fresh session on the
/// "not enough data yet" fallback instead of treating two missing
/// readings as a 100% loss against the clamped baseline floor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightRecord {
    pub baseline_kg: Option<f64>,
    pub current_kg: Option<f64>,
    pub window: WindowMonths,
}

impl WeightRecord {
    /// Whether both readings have been entered.
    pub fn is_complete(&self) -> bool {
        self.baseline_kg.is_some() && self.current_kg.is_some()
    }

    /// Derives the current reading. Deterministic in the inputs; no
    /// hidden state. With either reading missing the result is a zero
    /// percent, `Unknown` reading that meets no loss threshold.
    pub fn reading(&self) -> MetricReading {
        match (self.baseline_kg, self.current_kg) {
            (Some(baseline), Some(current)) => {
                let percent_loss = compute_percent_loss(baseline, current);
                MetricReading {
                    percent_loss,
                    severity: classify(percent_loss),
                    window: self.window,
                }
            }
            _ => MetricReading {
                percent_loss: 0.0,
                severity: Severity::Unknown,
                window: self.window,
            },
        }
    }
}

/// A derived metric snapshot: the rounded percent loss, its severity
/// bucket, and the window it was measured over.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricReading {
    pub percent_loss: f64,
    pub severity: Severity,
    pub window: WindowMonths,
}

impl MetricReading {
    /// Whether this reading meets the given loss threshold.
    pub fn meets(&self, threshold: f64) -> bool {
        meets_threshold(self.percent_loss, threshold)
    }
}
