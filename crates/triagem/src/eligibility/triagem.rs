use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Benefit, BenefitId, CitizenProfile, EligibilityResult, EligibilityStatus};
use super::evaluation::{evaluate_rules, RuleEvaluation};

/// Display caps applied to the household summary lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriagemConfig {
    pub max_priority_steps: usize,
    pub max_documents: usize,
}

impl Default for TriagemConfig {
    fn default() -> Self {
        Self {
            max_priority_steps: 5,
            max_documents: 8,
        }
    }
}

/// Household-level screening summary across a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriagemResult {
    #[serde(rename = "beneficiosElegiveis")]
    pub eligible: Vec<EligibilityResult>,
    #[serde(rename = "beneficiosJaRecebe")]
    pub already_receiving: Vec<EligibilityResult>,
    #[serde(rename = "beneficiosInconclusivos")]
    pub inconclusive: Vec<EligibilityResult>,
    #[serde(rename = "valorPotencialMensal")]
    pub potential_monthly_value: f64,
    #[serde(rename = "proximosPassosPrioritarios")]
    pub priority_steps: Vec<String>,
    #[serde(rename = "documentosNecessarios")]
    pub required_documents: Vec<String>,
}

/// Stateless engine that screens a profile against a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct TriagemEngine {
    config: TriagemConfig,
}

impl TriagemEngine {
    pub fn new(config: TriagemConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriagemConfig {
        &self.config
    }

    /// Classify one benefit. Benefits the household already receives keep their
    /// rule breakdown but are never reported as eligible.
    pub fn classify(
        &self,
        benefit: &Benefit,
        profile: &CitizenProfile,
        already_receiving: &HashSet<BenefitId>,
    ) -> EligibilityResult {
        let evaluation = evaluate_rules(&benefit.rules, Some(profile));
        let status = if already_receiving.contains(&benefit.id) {
            EligibilityStatus::AlreadyReceiving
        } else {
            status_for(&evaluation)
        };

        debug!(benefit = %benefit.id, ?status, "benefit classified");

        let RuleEvaluation {
            matched,
            failed,
            inconclusive,
        } = evaluation;

        EligibilityResult {
            benefit: benefit.clone(),
            status,
            matched_rules: matched,
            failed_rules: failed,
            inconclusive_rules: inconclusive,
        }
    }

    /// Screen every benefit of the catalog. Benefits are evaluated in parallel and
    /// recombined in catalog order, so the summary does not depend on scheduling.
    pub fn run(
        &self,
        catalog: &[Benefit],
        profile: &CitizenProfile,
        already_receiving: &HashSet<BenefitId>,
    ) -> TriagemResult {
        let results: Vec<EligibilityResult> = catalog
            .par_iter()
            .map(|benefit| self.classify(benefit, profile, already_receiving))
            .collect();

        self.summarize(results)
    }

    fn summarize(&self, results: Vec<EligibilityResult>) -> TriagemResult {
        let mut summary = TriagemResult::default();

        for result in results {
            match result.status {
                EligibilityStatus::Eligible => summary.eligible.push(result),
                EligibilityStatus::AlreadyReceiving => summary.already_receiving.push(result),
                EligibilityStatus::Inconclusive => summary.inconclusive.push(result),
                EligibilityStatus::Ineligible => {}
            }
        }

        let total: f64 = summary
            .eligible
            .iter()
            .map(|result| result.benefit.monthly_value())
            .sum();
        summary.potential_monthly_value = (total * 100.0).round() / 100.0;

        summary.priority_steps = merge_capped(
            summary.eligible.iter().map(|result| &result.benefit.steps),
            self.config.max_priority_steps,
        );
        summary.required_documents = merge_capped(
            summary.eligible.iter().map(|result| &result.benefit.documents),
            self.config.max_documents,
        );

        summary
    }
}

/// Screen a catalog with the default display caps.
pub fn run_catalog(
    catalog: &[Benefit],
    profile: &CitizenProfile,
    already_receiving: &HashSet<BenefitId>,
) -> TriagemResult {
    TriagemEngine::default().run(catalog, profile, already_receiving)
}

fn status_for(evaluation: &RuleEvaluation) -> EligibilityStatus {
    if evaluation.has_failures() {
        EligibilityStatus::Ineligible
    } else if evaluation.has_unknowns() {
        EligibilityStatus::Inconclusive
    } else {
        EligibilityStatus::Eligible
    }
}

/// Concatenate lists in order, dropping repeats, then keep the first `cap` entries.
fn merge_capped<'a>(lists: impl Iterator<Item = &'a Vec<String>>, cap: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::new();
    for item in lists.flatten() {
        let trimmed = item.trim();
        if trimmed.is_empty() || !seen.insert(trimmed) {
            continue;
        }
        merged.push(trimmed.to_string());
    }
    merged.truncate(cap);
    merged
}
