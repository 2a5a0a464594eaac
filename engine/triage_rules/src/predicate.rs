// Predicate AST over the flag state and the optional weight metric.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use triage_metric::{MetricReading, Severity};
use triage_model::FlagState;

/// Everything a predicate may consult during evaluation.
///
/// `metric` is `None` for protocols that do not track weight; metric
/// predicates evaluate to false in that case, and ruleset validation
/// rejects them up front so the situation never arises at runtime.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub state: &'a FlagState,
    pub metric: Option<MetricReading>,
}

/// A pure boolean condition over an [`EvalContext`].
///
/// The composite forms cover the tiers seen in symptom cheat sheets:
/// `AnyOf` for "any red flag present", `AllOf`/`Not`/`All`/`Any` for
/// the occasional "flag A and not flag B" pattern, and the two
/// `Loss*` forms for the weight-loss threshold tiers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Predicate {
    /// Matches unconditionally. Required as the final rule of every
    /// ruleset.
    Always,
    /// True when the named flag is set.
    Flag(String),
    /// True when at least one of the named flags is set.
    AnyOf(Vec<String>),
    /// True when every named flag is set.
    AllOf(Vec<String>),
    /// Negation.
    Not(Box<Predicate>),
    /// Conjunction of sub-predicates.
    All(Vec<Predicate>),
    /// Disjunction of sub-predicates.
    Any(Vec<Predicate>),
    /// True when the percent weight loss meets the given threshold
    /// (boundary inclusive).
    LossAtLeast(f64),
    /// True when the weight-loss severity bucket equals the given one.
    LossSeverity(Severity),
}

impl Predicate {
    /// Convenience constructor for a single-flag predicate.
    pub fn flag(id: impl Into<String>) -> Self {
        Predicate::Flag(id.into())
    }

    /// Convenience constructor for the red-flag OR group.
    pub fn any_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::AnyOf(ids.into_iter().map(Into::into).collect())
    }

    /// Convenience constructor for an AND group of flags.
    pub fn all_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::AllOf(ids.into_iter().map(Into::into).collect())
    }

    /// Negates this predicate.
    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Evaluates the predicate. Pure: no side effects, deterministic
    /// in the context.
    pub fn eval(&self, ctx: &EvalContext<'_>) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Flag(id) => ctx.state.is_set(id),
            Predicate::AnyOf(ids) => ids.iter().any(|id| ctx.state.is_set(id)),
            Predicate::AllOf(ids) => ids.iter().all(|id| ctx.state.is_set(id)),
            Predicate::Not(inner) => !inner.eval(ctx),
            Predicate::All(preds) => preds.iter().all(|p| p.eval(ctx)),
            Predicate::Any(preds) => preds.iter().any(|p| p.eval(ctx)),
            Predicate::LossAtLeast(threshold) => {
                ctx.metric.map(|m| m.meets(*threshold)).unwrap_or(false)
            }
            Predicate::LossSeverity(severity) => {
                ctx.metric.map(|m| m.severity == *severity).unwrap_or(false)
            }
        }
    }

    /// Whether this predicate is the unconditional `Always`.
    ///
    /// Deliberately syntactic: a tautology spelled any other way
    /// (e.g. `Any([Always])`) does not count as a terminal rule.
    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Always)
    }

    /// Whether any part of this predicate consults the weight metric.
    pub fn references_metric(&self) -> bool {
        match self {
            Predicate::LossAtLeast(_) | Predicate::LossSeverity(_) => true,
            Predicate::Not(inner) => inner.references_metric(),
            Predicate::All(preds) | Predicate::Any(preds) => {
                preds.iter().any(Predicate::references_metric)
            }
            _ => false,
        }
    }

    /// Collects every flag id this predicate mentions, for
    /// registry validation.
    pub fn flag_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_flag_ids(&mut out);
        out
    }

    fn collect_flag_ids<'p>(&'p self, out: &mut Vec<&'p str>) {
        match self {
            Predicate::Flag(id) => out.push(id),
            Predicate::AnyOf(ids) | Predicate::AllOf(ids) => {
                out.extend(ids.iter().map(String::as_str));
            }
            Predicate::Not(inner) => inner.collect_flag_ids(out),
            Predicate::All(preds) | Predicate::Any(preds) => {
                for p in preds {
                    p.collect_flag_ids(out);
                }
            }
            _ => {}
        }
    }
}
