//! Eligibility screening for social benefit programs.
//!
//! The [`eligibility`] module holds the pure engine: rule evaluation, catalog-wide
//! triage, derived-field expansion and the grouped criteria checklist. Everything
//! else in the crate (catalog loading, configuration, telemetry, HTTP routing) is
//! the plumbing that feeds it snapshots and serves its output.

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
