//! Benefit eligibility engine.
//!
//! Leaves first: [`derived`] expands virtual profile fields, [`evaluation`] checks
//! one benefit's rules, [`triagem`] screens a whole catalog into a household
//! summary and [`criteria`] turns one result into an ordered checklist. All of it
//! is synchronous and pure; [`service`] and [`router`] only wire a catalog snapshot
//! to HTTP.

pub mod criteria;
pub mod derived;
pub mod domain;
pub mod evaluation;
pub mod fields;
pub mod router;
pub mod service;
pub mod triagem;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use criteria::{
    group_criteria, CriteriaCategory, CriteriaGroup, CriteriaProgress, CriterionStatus,
    CriterionView,
};
pub use derived::{expand_fields, is_derived, source_fields};
pub use domain::{
    Benefit, BenefitId, BenefitScope, CitizenProfile, EligibilityResult, EligibilityRule,
    EligibilityStatus, Periodicity, RuleOperator, ValueEstimate,
};
pub use evaluation::{evaluate_rule, evaluate_rules, RuleEvaluation, RuleOutcome};
pub use router::triagem_router;
pub use service::{
    BenefitSummary, CriteriaRequest, CriteriaResponse, ScreeningRequest, ServiceError,
    TriagemService,
};
pub use triagem::{run_catalog, TriagemConfig, TriagemEngine, TriagemResult};
pub use wizard::{catalog_questions, pending_questions};
