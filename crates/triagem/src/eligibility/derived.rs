//! Virtual profile fields.
//!
//! Some answers are never asked directly: `rendaPerCapita` comes from the household
//! income and size, `idade` from the birth date. Rules may still reference them, so
//! the questionnaire needs to know which raw fields stand behind each one.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use super::domain::{numeric_value, CitizenProfile};
use super::fields::{
    DATA_NASCIMENTO, IDADE, PESSOAS_NA_CASA, RENDA_FAMILIAR_MENSAL, RENDA_PER_CAPITA,
};

const DERIVED_FIELDS: &[(&str, &[&str])] = &[
    (RENDA_PER_CAPITA, &[RENDA_FAMILIAR_MENSAL, PESSOAS_NA_CASA]),
    (IDADE, &[DATA_NASCIMENTO]),
];

/// Raw fields a virtual field is computed from, or `None` for raw fields.
pub fn source_fields(field: &str) -> Option<&'static [&'static str]> {
    DERIVED_FIELDS
        .iter()
        .find(|(derived, _)| *derived == field)
        .map(|(_, sources)| *sources)
}

pub fn is_derived(field: &str) -> bool {
    source_fields(field).is_some()
}

/// Replace every virtual field by its raw sources. Unknown fields pass through,
/// duplicates are dropped and first-seen order is kept.
pub fn expand_fields<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded: Vec<String> = Vec::new();
    let mut push = |field: &str| {
        if !expanded.iter().any(|existing| existing == field) {
            expanded.push(field.to_string());
        }
    };

    for field in fields {
        let field = field.as_ref();
        match source_fields(field) {
            Some(sources) => {
                for source in sources {
                    push(*source);
                }
            }
            None => push(field),
        }
    }

    expanded
}

impl CitizenProfile {
    /// Copy of the profile with missing virtual fields computed from the raw
    /// answers. Answers already present are never overwritten.
    pub fn with_derived_fields(&self, reference_date: NaiveDate) -> CitizenProfile {
        let mut derived = self.clone();

        if !self.answers(RENDA_PER_CAPITA) {
            if let Some(per_capita) = per_capita_income(self) {
                derived.insert(RENDA_PER_CAPITA, Value::from(per_capita));
            }
        }

        if !self.answers(IDADE) {
            if let Some(age) = age_on(self, reference_date) {
                derived.insert(IDADE, Value::from(age));
            }
        }

        derived
    }
}

fn per_capita_income(profile: &CitizenProfile) -> Option<f64> {
    let income = profile.get(RENDA_FAMILIAR_MENSAL).and_then(numeric_value)?;
    let people = profile.get(PESSOAS_NA_CASA).and_then(numeric_value)?;
    if people < 1.0 || income < 0.0 {
        return None;
    }

    Some((income / people * 100.0).round() / 100.0)
}

fn age_on(profile: &CitizenProfile, reference_date: NaiveDate) -> Option<u32> {
    let raw = profile.get(DATA_NASCIMENTO)?.as_str()?;
    let birth = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;
    if birth > reference_date {
        return None;
    }

    let mut years = reference_date.year() - birth.year();
    if (reference_date.month(), reference_date.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
