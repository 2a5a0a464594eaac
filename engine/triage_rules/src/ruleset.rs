// Ordered rule list with construction-time validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::debug;

use crate::predicate::{EvalContext, Predicate};
use triage_model::{FlagRegistry, Outcome};

/// One tier of a triage protocol: a named condition and the
/// disposition it selects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DispositionRule {
    /// Short identifier used in logs and validation errors.
    pub name: String,
    /// The condition this tier matches on.
    pub when: Predicate,
    /// The disposition returned when the condition holds.
    pub outcome: Outcome,
}

impl DispositionRule {
    pub fn new(name: impl Into<String>, when: Predicate, outcome: Outcome) -> Self {
        DispositionRule {
            name: name.into(),
            when,
            outcome,
        }
    }
}

/// A configuration defect in a rule list. All of these are integrator
/// errors surfaced at construction time; none can occur during
/// evaluation of a validated ruleset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesetError {
    /// The rule list is empty.
    #[error("rule list is empty")]
    Empty,

    /// The last rule is not the unconditional fallback.
    #[error("last rule `{0}` must have an always-true predicate")]
    MissingCatchAll(String),

    /// An always-true rule appears before the end, shadowing
    /// everything after it.
    #[error("rule `{rule}` is unreachable: rule `{blocker}` earlier in the list always matches")]
    UnreachableRule { rule: String, blocker: String },

    /// A predicate names a flag id the registry does not define.
    #[error("rule `{rule}` references unknown flag id `{id}`")]
    UnknownFlag { rule: String, id: String },

    /// A weight-loss predicate is used but the session tracks no
    /// weight metric.
    #[error("rule `{0}` uses a weight-loss predicate but no weight metric is configured")]
    MetricNotConfigured(String),
}

/// An ordered, first-match-wins rule list.
///
/// Construction splits off the mandatory terminal always-true rule,
/// so evaluation is total by type: there is always a fallback
/// disposition to return and "no disposition" cannot be expressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ruleset {
    tiers: Vec<DispositionRule>,
    fallback: DispositionRule,
}

impl Ruleset {
    /// Builds a ruleset from a declaration-ordered rule list.
    ///
    /// Fails fast on an empty list, a missing terminal always-true
    /// rule, or an early always-true rule that would shadow later
    /// tiers.
    pub fn new(mut rules: Vec<DispositionRule>) -> Result<Self, RulesetError> {
        let fallback = rules.pop().ok_or(RulesetError::Empty)?;
        if !fallback.when.is_always() {
            return Err(RulesetError::MissingCatchAll(fallback.name));
        }
        for window in rules.windows(2) {
            if window[0].when.is_always() {
                return Err(RulesetError::UnreachableRule {
                    rule: window[1].name.clone(),
                    blocker: window[0].name.clone(),
                });
            }
        }
        if let Some(last_tier) = rules.last() {
            if last_tier.when.is_always() {
                return Err(RulesetError::UnreachableRule {
                    rule: fallback.name.clone(),
                    blocker: last_tier.name.clone(),
                });
            }
        }
        Ok(Ruleset {
            tiers: rules,
            fallback,
        })
    }

    /// Checks every predicate against the registry and the metric
    /// configuration. Run once when a session is assembled.
    pub fn validate(&self, registry: &FlagRegistry, has_metric: bool) -> Result<(), RulesetError> {
        for rule in self.iter() {
            for id in rule.when.flag_ids() {
                if !registry.contains(id) {
                    return Err(RulesetError::UnknownFlag {
                        rule: rule.name.clone(),
                        id: id.to_string(),
                    });
                }
            }
            if !has_metric && rule.when.references_metric() {
                return Err(RulesetError::MetricNotConfigured(rule.name.clone()));
            }
        }
        Ok(())
    }

    /// Selects the disposition for the current context: the outcome
    /// of the first tier whose predicate holds, or the fallback.
    ///
    /// Pure and total; identical contexts yield identical outcomes.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> &Outcome {
        for rule in &self.tiers {
            if rule.when.eval(ctx) {
                debug!("rule `{}` matched", rule.name);
                return &rule.outcome;
            }
        }
        debug!("fallback rule `{}` selected", self.fallback.name);
        &self.fallback.outcome
    }

    /// Iterates over every rule in priority order, fallback last.
    pub fn iter(&self) -> impl Iterator<Item = &DispositionRule> {
        self.tiers.iter().chain(std::iter::once(&self.fallback))
    }

    /// Total number of rules, fallback included.
    pub fn len(&self) -> usize {
        self.tiers.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
