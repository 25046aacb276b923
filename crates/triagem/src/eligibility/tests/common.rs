use std::collections::HashSet;
use std::sync::Arc;

use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::catalog::CatalogSnapshot;
use crate::eligibility::{
    triagem_router, Benefit, BenefitId, BenefitScope, CitizenProfile, EligibilityRule,
    Periodicity, RuleOperator, TriagemConfig, TriagemService, ValueEstimate,
};

pub(super) const CADUNICO_RULE: &str = "Estar inscrito no CadÚnico";
pub(super) const RENDA_RULE: &str = "Renda por pessoa de até R$ 218";
pub(super) const IDADE_RULE: &str = "Ter 65 anos ou mais";

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn monthly(amount: f64) -> Option<ValueEstimate> {
    Some(ValueEstimate {
        min: Some(amount),
        max: Some(amount),
        periodicity: Periodicity::Monthly,
    })
}

pub(super) fn benefit(id: &str, rules: Vec<EligibilityRule>) -> Benefit {
    Benefit {
        id: BenefitId::from(id),
        name: id.replace('-', " "),
        scope: BenefitScope::Federal,
        estimated_value: None,
        rules,
        steps: Vec::new(),
        documents: Vec::new(),
        where_to_apply: None,
    }
}

pub(super) fn cadunico_rule() -> EligibilityRule {
    EligibilityRule::new("cadastradoCadunico", RuleOperator::Eq, true, CADUNICO_RULE)
}

pub(super) fn renda_rule() -> EligibilityRule {
    EligibilityRule::new("rendaPerCapita", RuleOperator::Lte, 218, RENDA_RULE)
}

pub(super) fn idade_rule() -> EligibilityRule {
    EligibilityRule::new("idade", RuleOperator::Gte, 65, IDADE_RULE)
}

pub(super) fn bolsa_familia() -> Benefit {
    Benefit {
        estimated_value: Some(ValueEstimate {
            min: Some(600.0),
            max: Some(900.0),
            periodicity: Periodicity::Monthly,
        }),
        steps: vec![
            "Atualizar o CadÚnico no CRAS".to_string(),
            "Acompanhar pelo app Bolsa Família".to_string(),
        ],
        documents: vec![
            "CPF de todos da família".to_string(),
            "Comprovante de residência".to_string(),
        ],
        ..benefit("bolsa-familia", vec![cadunico_rule(), renda_rule()])
    }
}

pub(super) fn bpc() -> Benefit {
    Benefit {
        estimated_value: monthly(1518.0),
        steps: vec![
            "Atualizar o CadÚnico no CRAS".to_string(),
            "Pedir o BPC pelo Meu INSS".to_string(),
        ],
        documents: vec![
            "CPF de todos da família".to_string(),
            "Documento de identidade com foto".to_string(),
        ],
        ..benefit(
            "bpc-idoso",
            vec![
                idade_rule(),
                EligibilityRule::new(
                    "rendaPerCapita",
                    RuleOperator::Lte,
                    379.5,
                    "Renda por pessoa de até 1/4 do salário mínimo",
                ),
            ],
        )
    }
}

pub(super) fn low_income_household() -> CitizenProfile {
    CitizenProfile::new()
        .with("cadastradoCadunico", true)
        .with("rendaFamiliarMensal", 600)
        .with("pessoasNaCasa", 4)
}

pub(super) fn nobody_receiving() -> HashSet<BenefitId> {
    HashSet::new()
}

pub(super) fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::from_benefits(vec![bolsa_familia(), bpc()]).expect("fixture catalog is valid")
}

pub(super) fn service() -> Arc<TriagemService> {
    Arc::new(TriagemService::new(catalog(), TriagemConfig::default()))
}

pub(super) fn router() -> Router {
    triagem_router(service())
}

pub(super) fn screening_payload() -> Value {
    json!({
        "perfil": {
            "cadastradoCadunico": true,
            "rendaFamiliarMensal": 600,
            "pessoasNaCasa": 4,
            "dataNascimento": "1990-03-02"
        },
        "dataReferencia": "2025-06-15"
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}
