use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::criteria::{group_criteria, CriteriaGroup, CriteriaProgress};
use super::domain::{Benefit, BenefitId, CitizenProfile, EligibilityStatus};
use super::fields::{MUNICIPIO, UF};
use super::triagem::{TriagemConfig, TriagemEngine, TriagemResult};
use super::wizard::catalog_questions;
use crate::catalog::CatalogSnapshot;

/// Screening request as posted by the questionnaire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreeningRequest {
    #[serde(default, rename = "perfil")]
    pub profile: CitizenProfile,
    #[serde(default, rename = "jaRecebe")]
    pub already_receiving: Vec<BenefitId>,
    #[serde(default, rename = "dataReferencia")]
    pub reference_date: Option<NaiveDate>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub municipio: Option<String>,
}

/// Checklist request for one benefit. Omitting the profile yields an all-pending
/// checklist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriteriaRequest {
    #[serde(default, rename = "perfil")]
    pub profile: Option<CitizenProfile>,
    #[serde(default, rename = "jaRecebe")]
    pub already_receiving: Vec<BenefitId>,
    #[serde(default, rename = "dataReferencia")]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitSummary {
    pub id: BenefitId,
    pub name: String,
    pub scope: &'static str,
    pub monthly_value: f64,
    pub rule_count: usize,
}

impl From<&Benefit> for BenefitSummary {
    fn from(benefit: &Benefit) -> Self {
        Self {
            id: benefit.id.clone(),
            name: benefit.name.clone(),
            scope: benefit.scope.label(),
            monthly_value: benefit.monthly_value(),
            rule_count: benefit.rules.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CriteriaResponse {
    #[serde(rename = "beneficio")]
    pub benefit: BenefitSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EligibilityStatus>,
    #[serde(rename = "grupos")]
    pub groups: Vec<CriteriaGroup>,
    #[serde(rename = "progresso")]
    pub progress: CriteriaProgress,
}

/// Facade binding a catalog snapshot to the screening engine.
pub struct TriagemService {
    catalog: CatalogSnapshot,
    engine: TriagemEngine,
}

impl TriagemService {
    pub fn new(catalog: CatalogSnapshot, config: TriagemConfig) -> Self {
        Self {
            catalog,
            engine: TriagemEngine::new(config),
        }
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn summaries(&self) -> Vec<BenefitSummary> {
        self.catalog
            .benefits()
            .iter()
            .map(BenefitSummary::from)
            .collect()
    }

    /// Screen the household against the benefits offered at its location.
    pub fn screen(&self, request: &ScreeningRequest, today: NaiveDate) -> TriagemResult {
        let reference_date = request.reference_date.unwrap_or(today);
        let profile = request.profile.with_derived_fields(reference_date);
        let uf = request
            .uf
            .as_deref()
            .or_else(|| profile.get(UF).and_then(|value| value.as_str()));
        let municipio = request
            .municipio
            .as_deref()
            .or_else(|| profile.get(MUNICIPIO).and_then(|value| value.as_str()));

        let catalog = self.catalog.for_location(uf, municipio);
        let already_receiving: HashSet<BenefitId> =
            request.already_receiving.iter().cloned().collect();

        let result = self
            .engine
            .run(catalog.benefits(), &profile, &already_receiving);

        info!(
            benefits = catalog.len(),
            eligible = result.eligible.len(),
            already_receiving = result.already_receiving.len(),
            inconclusive = result.inconclusive.len(),
            "triagem completed"
        );

        result
    }

    pub fn criteria(
        &self,
        id: &BenefitId,
        request: &CriteriaRequest,
        today: NaiveDate,
    ) -> Result<CriteriaResponse, ServiceError> {
        let benefit = self
            .catalog
            .get(id)
            .ok_or_else(|| ServiceError::BenefitNotFound(id.clone()))?;

        let result = request.profile.as_ref().map(|profile| {
            let profile = profile.with_derived_fields(request.reference_date.unwrap_or(today));
            let already_receiving: HashSet<BenefitId> =
                request.already_receiving.iter().cloned().collect();
            self.engine.classify(benefit, &profile, &already_receiving)
        });

        let groups = group_criteria(&benefit.rules, result.as_ref());
        let progress = groups
            .iter()
            .map(CriteriaGroup::progress)
            .fold(CriteriaProgress::default(), |total, group| total + group);

        Ok(CriteriaResponse {
            benefit: BenefitSummary::from(benefit),
            status: result.map(|result| result.status),
            groups,
            progress,
        })
    }

    /// Raw questions still unanswered for the whole catalog.
    pub fn questions(&self, profile: Option<&CitizenProfile>) -> Vec<String> {
        catalog_questions(self.catalog.benefits(), profile)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("benefit {0} not found in catalog")]
    BenefitNotFound(BenefitId),
}
