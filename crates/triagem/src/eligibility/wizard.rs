use super::derived::expand_fields;
use super::domain::{Benefit, CitizenProfile, EligibilityRule};

/// Raw questionnaire fields the rules still need, in first-seen order.
///
/// A virtual field answered directly needs nothing else; otherwise it is replaced
/// by its raw sources and each unanswered source becomes a question.
pub fn pending_questions(
    rules: &[EligibilityRule],
    profile: Option<&CitizenProfile>,
) -> Vec<String> {
    questions_for(rules.iter(), profile)
}

/// Same as [`pending_questions`] across every benefit of a catalog.
pub fn catalog_questions(catalog: &[Benefit], profile: Option<&CitizenProfile>) -> Vec<String> {
    questions_for(catalog.iter().flat_map(|benefit| benefit.rules.iter()), profile)
}

fn questions_for<'a>(
    rules: impl Iterator<Item = &'a EligibilityRule>,
    profile: Option<&CitizenProfile>,
) -> Vec<String> {
    let answered = |field: &str| profile.map(|profile| profile.answers(field)).unwrap_or(false);

    let unanswered = rules
        .map(|rule| rule.field.as_str())
        .filter(|field| !answered(*field));

    expand_fields(unanswered)
        .into_iter()
        .filter(|field| !answered(field.as_str()))
        .collect()
}
