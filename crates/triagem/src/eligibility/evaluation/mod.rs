mod operators;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{CitizenProfile, EligibilityRule, RuleOperator};

/// Outcome of a single rule against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    Matched,
    Failed,
    Inconclusive,
}

/// Rule descriptions partitioned by outcome, in rule-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluation {
    pub matched: Vec<String>,
    pub failed: Vec<String>,
    pub inconclusive: Vec<String>,
}

impl RuleEvaluation {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn has_unknowns(&self) -> bool {
        !self.inconclusive.is_empty()
    }

    pub fn evaluated(&self) -> usize {
        self.matched.len() + self.failed.len() + self.inconclusive.len()
    }

    fn record(&mut self, outcome: RuleOutcome, description: &str) {
        let bucket = match outcome {
            RuleOutcome::Matched => &mut self.matched,
            RuleOutcome::Failed => &mut self.failed,
            RuleOutcome::Inconclusive => &mut self.inconclusive,
        };
        bucket.push(description.to_string());
    }
}

/// Evaluate a single rule. A missing answer is inconclusive rather than a failure:
/// the household may still qualify once the question is answered.
pub fn evaluate_rule(rule: &EligibilityRule, profile: &CitizenProfile) -> RuleOutcome {
    let Some(actual) = profile.get(&rule.field) else {
        return RuleOutcome::Inconclusive;
    };

    if let RuleOperator::Unknown(name) = &rule.operator {
        warn!(
            operator = %name,
            rule = %rule.description,
            "unsupported rule operator; treating rule as inconclusive"
        );
        return RuleOutcome::Inconclusive;
    }

    match operators::apply(&rule.operator, actual, &rule.value) {
        Some(true) => RuleOutcome::Matched,
        Some(false) => RuleOutcome::Failed,
        None => {
            debug!(
                field = %rule.field,
                operator = rule.operator.as_str(),
                "rule could not compare answer with expected value"
            );
            RuleOutcome::Inconclusive
        }
    }
}

/// Evaluate every rule of one benefit. Without a profile nothing is evaluated and
/// all three partitions stay empty.
pub fn evaluate_rules(
    rules: &[EligibilityRule],
    profile: Option<&CitizenProfile>,
) -> RuleEvaluation {
    let mut evaluation = RuleEvaluation::default();
    let Some(profile) = profile else {
        return evaluation;
    };

    let mut seen: HashSet<&str> = HashSet::with_capacity(rules.len());
    for rule in rules {
        if !seen.insert(rule.description.as_str()) {
            debug!(rule = %rule.description, "skipping repeated rule description");
            continue;
        }
        evaluation.record(evaluate_rule(rule, profile), &rule.description);
    }

    evaluation
}
