//! Checklist view over an evaluation result.
//!
//! Grouping only reads the partitions produced by the rule evaluator; it never
//! re-evaluates a rule on its own.

mod categories;

pub use categories::CriteriaCategory;

use std::collections::{BTreeMap, HashSet};
use std::ops::Add;

use serde::Serialize;

use super::domain::{EligibilityResult, EligibilityRule};

/// Per-rule checklist state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    Met,
    NotMet,
    Inconclusive,
    Pending,
}

impl CriterionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Met => "Atendido",
            Self::NotMet => "Não atendido",
            Self::Inconclusive => "Não foi possível verificar",
            Self::Pending => "Pendente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionView {
    pub rule: EligibilityRule,
    pub status: CriterionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaGroup {
    #[serde(rename = "groupKey")]
    pub key: CriteriaCategory,
    pub label: &'static str,
    pub rules: Vec<CriterionView>,
}

impl CriteriaGroup {
    pub fn progress(&self) -> CriteriaProgress {
        let mut progress = CriteriaProgress {
            total: self.rules.len(),
            ..CriteriaProgress::default()
        };
        for criterion in &self.rules {
            match criterion.status {
                CriterionStatus::Met => progress.met += 1,
                CriterionStatus::NotMet => progress.not_met += 1,
                CriterionStatus::Inconclusive => progress.inconclusive += 1,
                CriterionStatus::Pending => progress.pending += 1,
            }
        }
        progress
    }
}

/// Tally used by progress checklists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaProgress {
    pub met: usize,
    pub not_met: usize,
    pub inconclusive: usize,
    pub pending: usize,
    pub total: usize,
}

impl Add for CriteriaProgress {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            met: self.met + other.met,
            not_met: self.not_met + other.not_met,
            inconclusive: self.inconclusive + other.inconclusive,
            pending: self.pending + other.pending,
            total: self.total + other.total,
        }
    }
}

struct OutcomeIndex<'a> {
    matched: HashSet<&'a str>,
    failed: HashSet<&'a str>,
    inconclusive: HashSet<&'a str>,
}

impl<'a> OutcomeIndex<'a> {
    fn new(result: &'a EligibilityResult) -> Self {
        Self {
            matched: descriptions(&result.matched_rules),
            failed: descriptions(&result.failed_rules),
            inconclusive: descriptions(&result.inconclusive_rules),
        }
    }

    fn status(&self, description: &str) -> CriterionStatus {
        if self.matched.contains(description) {
            CriterionStatus::Met
        } else if self.failed.contains(description) {
            CriterionStatus::NotMet
        } else if self.inconclusive.contains(description) {
            CriterionStatus::Inconclusive
        } else {
            CriterionStatus::Pending
        }
    }
}

fn descriptions(rules: &[String]) -> HashSet<&str> {
    rules.iter().map(String::as_str).collect()
}

/// Group a benefit's rules into ordered checklist sections. Without a result every
/// rule is pending; a rule the result never mentions is pending as well.
pub fn group_criteria(
    rules: &[EligibilityRule],
    result: Option<&EligibilityResult>,
) -> Vec<CriteriaGroup> {
    let index = result.map(OutcomeIndex::new);
    let mut buckets: BTreeMap<CriteriaCategory, Vec<CriterionView>> = BTreeMap::new();

    for rule in rules {
        let status = index
            .as_ref()
            .map(|index| index.status(&rule.description))
            .unwrap_or(CriterionStatus::Pending);

        buckets
            .entry(CriteriaCategory::for_field(&rule.field))
            .or_default()
            .push(CriterionView {
                rule: rule.clone(),
                status,
            });
    }

    CriteriaCategory::ordered()
        .into_iter()
        .filter_map(|category| {
            buckets.remove(&category).map(|rules| CriteriaGroup {
                key: category,
                label: category.label(),
                rules,
            })
        })
        .collect()
}
