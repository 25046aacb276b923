//! Benefit catalog snapshots.
//!
//! The engine never fetches or caches catalogs; callers load a snapshot once (from
//! a JSON file or any reader) and hand its benefits to the engine.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::eligibility::domain::{Benefit, BenefitId, BenefitScope};

/// Validated, ordered list of benefits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    benefits: Vec<Benefit>,
}

#[derive(Deserialize)]
struct WrappedCatalog {
    beneficios: Vec<Benefit>,
}

impl CatalogSnapshot {
    pub fn from_benefits(benefits: Vec<Benefit>) -> Result<Self, CatalogError> {
        validate(&benefits)?;
        Ok(Self { benefits })
    }

    /// Accepts either a bare JSON array or `{ "beneficios": [...] }`.
    /// The document shape is picked from its first token so that a malformed
    /// benefit reports the offending field with its line and column.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw).map_err(CatalogError::Read)?;

        let benefits = if raw.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Benefit>>(&raw)?
        } else {
            serde_json::from_str::<WrappedCatalog>(&raw)?.beneficios
        };
        Self::from_benefits(benefits)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            benefits = snapshot.len(),
            rules = snapshot.rule_count(),
            "benefit catalog loaded"
        );
        Ok(snapshot)
    }

    pub fn benefits(&self) -> &[Benefit] {
        &self.benefits
    }

    pub fn get(&self, id: &BenefitId) -> Option<&Benefit> {
        self.benefits.iter().find(|benefit| &benefit.id == id)
    }

    pub fn len(&self) -> usize {
        self.benefits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benefits.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.benefits.iter().map(|benefit| benefit.rules.len()).sum()
    }

    /// Benefits available at the citizen's location. Federal and sectoral programs
    /// are always kept; an unknown state or municipality keeps every candidate.
    pub fn for_location(&self, uf: Option<&str>, municipio: Option<&str>) -> CatalogSnapshot {
        let benefits = self
            .benefits
            .iter()
            .filter(|benefit| available_at(&benefit.scope, uf, municipio))
            .cloned()
            .collect();
        CatalogSnapshot { benefits }
    }
}

fn available_at(scope: &BenefitScope, uf: Option<&str>, municipio: Option<&str>) -> bool {
    let same = |expected: &str, actual: Option<&str>| {
        actual
            .map(|actual| actual.trim().to_lowercase() == expected.trim().to_lowercase())
            .unwrap_or(true)
    };

    match scope {
        BenefitScope::Federal | BenefitScope::Sectoral { .. } => true,
        BenefitScope::State { uf: state } => same(state, uf),
        BenefitScope::Municipal {
            uf: state,
            municipality,
        } => same(state, uf) && same(municipality, municipio),
    }
}

fn validate(benefits: &[Benefit]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for benefit in benefits {
        if benefit.id.as_str().trim().is_empty() {
            return Err(CatalogError::MissingId {
                name: benefit.name.clone(),
            });
        }
        if !ids.insert(benefit.id.as_str()) {
            return Err(CatalogError::DuplicateBenefit(benefit.id.clone()));
        }

        let mut descriptions = HashSet::new();
        for rule in &benefit.rules {
            if !descriptions.insert(rule.description.as_str()) {
                return Err(CatalogError::DuplicateRule {
                    benefit: benefit.id.clone(),
                    description: rule.description.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Error raised while loading a catalog snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read catalog: {0}")]
    Read(#[source] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("benefit '{name}' has no id")]
    MissingId { name: String },
    #[error("benefit id {0} appears more than once")]
    DuplicateBenefit(BenefitId),
    #[error("benefit {benefit} repeats rule description '{description}'")]
    DuplicateRule {
        benefit: BenefitId,
        description: String,
    },
}
