use serde_json::Value;

use super::super::domain::{numeric_value, RuleOperator};

/// Apply `operator` to a profile answer. `None` means the comparison cannot be
/// decided: mismatched types, a malformed rule value or an unknown operator.
pub(crate) fn apply(operator: &RuleOperator, actual: &Value, expected: &Value) -> Option<bool> {
    match operator {
        RuleOperator::Eq => values_equal(actual, expected),
        RuleOperator::Neq => values_equal(actual, expected).map(|equal| !equal),
        RuleOperator::Gt => compare(actual, expected).map(|(a, b)| a > b),
        RuleOperator::Gte => compare(actual, expected).map(|(a, b)| a >= b),
        RuleOperator::Lt => compare(actual, expected).map(|(a, b)| a < b),
        RuleOperator::Lte => compare(actual, expected).map(|(a, b)| a <= b),
        RuleOperator::In => membership(actual, expected),
        RuleOperator::NotIn => membership(actual, expected).map(|found| !found),
        RuleOperator::Contains => contains(actual, expected),
        RuleOperator::Exists => match expected {
            Value::Null => Some(true),
            Value::Bool(flag) => Some(*flag),
            _ => None,
        },
        RuleOperator::Unknown(_) => None,
    }
}

fn values_equal(actual: &Value, expected: &Value) -> Option<bool> {
    match (actual, expected) {
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::String(a), Value::String(b)) => Some(normalize(a) == normalize(b)),
        (Value::Number(_), _) | (_, Value::Number(_)) => {
            compare(actual, expected).map(|(a, b)| (a - b).abs() < f64::EPSILON)
        }
        (Value::Null, Value::Null) => Some(true),
        _ => None,
    }
}

fn compare(actual: &Value, expected: &Value) -> Option<(f64, f64)> {
    Some((numeric_value(actual)?, numeric_value(expected)?))
}

/// `actual` in `expected`. A multi-select answer matches when any of its items
/// is in the list.
fn membership(actual: &Value, expected: &Value) -> Option<bool> {
    let options = expected.as_array()?;
    let candidates: Vec<&Value> = match actual {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    any_equal(
        candidates
            .iter()
            .flat_map(|candidate| options.iter().map(move |option| (*candidate, option))),
    )
    .or_else(|| (options.is_empty() || candidates.is_empty()).then_some(false))
}

fn contains(actual: &Value, expected: &Value) -> Option<bool> {
    match (actual, expected) {
        (Value::Array(items), needle) => any_equal(items.iter().map(|item| (item, needle)))
            .or_else(|| items.is_empty().then_some(false)),
        (Value::String(haystack), Value::String(needle)) => {
            Some(normalize(haystack).contains(&normalize(needle)))
        }
        _ => None,
    }
}

/// True if any pair is equal, false if at least one pair was comparable and none
/// matched, `None` when no pair could be compared at all.
fn any_equal<'a>(pairs: impl Iterator<Item = (&'a Value, &'a Value)>) -> Option<bool> {
    let mut decided = None;
    for (a, b) in pairs {
        match values_equal(a, b) {
            Some(true) => return Some(true),
            Some(false) => decided = Some(false),
            None => {}
        }
    }
    decided
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equality_is_case_insensitive_for_text() {
        assert_eq!(
            apply(&RuleOperator::Eq, &json!("Pescador Artesanal"), &json!("pescador artesanal")),
            Some(true)
        );
    }

    #[test]
    fn numeric_comparisons_accept_numeric_strings() {
        assert_eq!(apply(&RuleOperator::Lte, &json!("210.5"), &json!(218)), Some(true));
        assert_eq!(apply(&RuleOperator::Gt, &json!(64), &json!(65)), Some(false));
    }

    #[test]
    fn mismatched_types_are_undecided() {
        assert_eq!(apply(&RuleOperator::Eq, &json!(true), &json!("sim")), None);
        assert_eq!(apply(&RuleOperator::Gte, &json!("muitos"), &json!(3)), None);
        assert_eq!(apply(&RuleOperator::Lt, &json!([1, 2]), &json!(3)), None);
        assert_eq!(apply(&RuleOperator::Lte, &json!("NaN"), &json!(218)), None);
        assert_eq!(apply(&RuleOperator::Lte, &json!("-inf"), &json!(218)), None);
        assert_eq!(apply(&RuleOperator::Eq, &json!("inf"), &json!(0)), None);
    }

    #[test]
    fn membership_handles_multi_select_answers() {
        let options = json!(["pescador artesanal", "marisqueira"]);
        assert_eq!(apply(&RuleOperator::In, &json!("Marisqueira"), &options), Some(true));
        assert_eq!(
            apply(&RuleOperator::In, &json!(["agricultor", "pescador artesanal"]), &options),
            Some(true)
        );
        assert_eq!(
            apply(&RuleOperator::NotIn, &json!("agricultor"), &options),
            Some(true)
        );
        assert_eq!(apply(&RuleOperator::In, &json!("agricultor"), &json!([])), Some(false));
    }

    #[test]
    fn membership_requires_list_value() {
        assert_eq!(apply(&RuleOperator::In, &json!("SP"), &json!("SP")), None);
    }

    #[test]
    fn contains_checks_lists_and_text() {
        assert_eq!(
            apply(&RuleOperator::Contains, &json!(["gestante", "idoso"]), &json!("idoso")),
            Some(true)
        );
        assert_eq!(
            apply(&RuleOperator::Contains, &json!("Trabalhador rural"), &json!("rural")),
            Some(true)
        );
        assert_eq!(apply(&RuleOperator::Contains, &json!(3), &json!("3")), None);
    }

    #[test]
    fn exists_reads_expected_flag() {
        assert_eq!(apply(&RuleOperator::Exists, &json!("123"), &Value::Null), Some(true));
        assert_eq!(apply(&RuleOperator::Exists, &json!("123"), &json!(false)), Some(false));
        assert_eq!(apply(&RuleOperator::Exists, &json!("123"), &json!(1)), None);
    }

    #[test]
    fn unknown_operator_is_undecided() {
        let operator = RuleOperator::Unknown("between".to_string());
        assert_eq!(apply(&operator, &json!(10), &json!([0, 20])), None);
    }
}
