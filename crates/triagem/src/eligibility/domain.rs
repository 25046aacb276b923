use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for catalog benefits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BenefitId(pub String);

impl BenefitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BenefitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BenefitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Self-reported household answers collected by the questionnaire.
///
/// Keys are the questionnaire field names (`rendaFamiliarMensal`, `pessoasNaCasa`, ...).
/// A key holding JSON `null` is treated the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitizenProfile {
    fields: BTreeMap<String, Value>,
}

impl CitizenProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly used by fixtures and the CLI.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    pub fn answers(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for CitizenProfile {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

/// Comparison applied by a rule. Unrecognised operator names are kept verbatim so
/// the evaluator can report them without failing the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Contains,
    Exists,
    Unknown(String),
}

impl RuleOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::Exists => "exists",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for RuleOperator {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "eq" | "==" => Self::Eq,
            "neq" | "ne" | "!=" => Self::Neq,
            "gt" | ">" => Self::Gt,
            "gte" | ">=" => Self::Gte,
            "lt" | "<" => Self::Lt,
            "lte" | "<=" => Self::Lte,
            "in" => Self::In,
            "not_in" | "nin" => Self::NotIn,
            "contains" => Self::Contains,
            "exists" => Self::Exists,
            _ => Self::Unknown(value),
        }
    }
}

impl From<RuleOperator> for String {
    fn from(value: RuleOperator) -> Self {
        value.as_str().to_string()
    }
}

/// Declarative eligibility condition. `description` identifies the rule when
/// outcomes are reported back and must be unique within one benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRule {
    pub field: String,
    pub operator: RuleOperator,
    #[serde(default)]
    pub value: Value,
    pub description: String,
}

impl EligibilityRule {
    pub fn new(
        field: impl Into<String>,
        operator: RuleOperator,
        value: impl Into<Value>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            description: description.into(),
        }
    }
}

/// Government level (or sector) that runs a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BenefitScope {
    Federal,
    State { uf: String },
    Municipal { uf: String, municipality: String },
    Sectoral { sector: String },
}

impl BenefitScope {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::State { .. } => "Estadual",
            Self::Municipal { .. } => "Municipal",
            Self::Sectoral { .. } => "Setorial",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    #[default]
    Monthly,
    Annual,
    OneTime,
}

/// Published value range for a benefit, in BRL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueEstimate {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub periodicity: Periodicity,
}

impl ValueEstimate {
    /// Monthly equivalent used by the household summary. One-time payments and
    /// estimates without figures contribute nothing.
    pub fn monthly_value(&self) -> f64 {
        let amount = match self.max.or(self.min) {
            Some(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return 0.0,
        };

        match self.periodicity {
            Periodicity::Monthly => amount,
            Periodicity::Annual => amount / 12.0,
            Periodicity::OneTime => 0.0,
        }
    }
}

/// Catalog entry for a single program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: BenefitId,
    pub name: String,
    pub scope: BenefitScope,
    #[serde(default)]
    pub estimated_value: Option<ValueEstimate>,
    #[serde(default)]
    pub rules: Vec<EligibilityRule>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_to_apply: Option<String>,
}

impl Benefit {
    pub fn monthly_value(&self) -> f64 {
        self.estimated_value
            .as_ref()
            .map(ValueEstimate::monthly_value)
            .unwrap_or(0.0)
    }
}

/// Classification of one benefit for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    AlreadyReceiving,
    Ineligible,
    Inconclusive,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eligible => "Elegível",
            Self::AlreadyReceiving => "Já recebe",
            Self::Ineligible => "Não elegível",
            Self::Inconclusive => "Precisa de mais informações",
        }
    }
}

/// Per-benefit outcome. Rule descriptions missing from all three lists were
/// never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub benefit: Benefit,
    pub status: EligibilityStatus,
    pub matched_rules: Vec<String>,
    pub failed_rules: Vec<String>,
    pub inconclusive_rules: Vec<String>,
}

/// Numeric reading of an answer. Text such as `"NaN"` or `"inf"` is not a number.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().replace(',', ".").parse().ok(),
        _ => None,
    };
    number.filter(|number: &f64| number.is_finite())
}
