use std::collections::HashSet;

use super::common::*;

use crate::eligibility::{
    run_catalog, Benefit, BenefitId, CitizenProfile, EligibilityStatus, Periodicity,
    TriagemConfig, TriagemEngine, ValueEstimate,
};

#[test]
fn low_income_household_is_eligible_for_bolsa_familia() {
    let profile = low_income_household().with_derived_fields(reference_date());

    let result = run_catalog(&[bolsa_familia()], &profile, &nobody_receiving());

    assert_eq!(result.eligible.len(), 1);
    let bolsa = &result.eligible[0];
    assert_eq!(bolsa.status, EligibilityStatus::Eligible);
    assert_eq!(bolsa.matched_rules, vec![CADUNICO_RULE, RENDA_RULE]);
    assert!(bolsa.failed_rules.is_empty());
    assert_eq!(result.potential_monthly_value, 900.0);
}

#[test]
fn missing_age_makes_bpc_inconclusive() {
    let profile = low_income_household().with_derived_fields(reference_date());

    let result = run_catalog(&[bpc()], &profile, &nobody_receiving());

    assert!(result.eligible.is_empty());
    assert_eq!(result.inconclusive.len(), 1);
    assert_eq!(result.inconclusive[0].inconclusive_rules, vec![IDADE_RULE]);
    assert_eq!(result.potential_monthly_value, 0.0);
}

#[test]
fn failing_rule_wins_over_unknowns() {
    let profile = CitizenProfile::new().with("rendaPerCapita", 1200);

    let result = run_catalog(&[bpc()], &profile, &nobody_receiving());

    assert!(result.eligible.is_empty());
    assert!(result.inconclusive.is_empty());
    assert!(result.already_receiving.is_empty());
}

#[test]
fn already_receiving_overrides_rules() {
    let profile = low_income_household().with_derived_fields(reference_date());
    let receiving: HashSet<BenefitId> = [BenefitId::from("bolsa-familia")].into_iter().collect();

    let result = run_catalog(&[bolsa_familia()], &profile, &receiving);

    assert!(result.eligible.is_empty());
    assert_eq!(result.already_receiving.len(), 1);
    assert_eq!(
        result.already_receiving[0].status,
        EligibilityStatus::AlreadyReceiving
    );
    assert_eq!(result.potential_monthly_value, 0.0);
    assert!(result.priority_steps.is_empty());
}

#[test]
fn benefit_without_rules_is_eligible() {
    let open = benefit("cesta-basica", Vec::new());
    let result = run_catalog(&[open], &CitizenProfile::new(), &nobody_receiving());
    assert_eq!(result.eligible.len(), 1);
}

#[test]
fn potential_value_sums_monthly_equivalents() {
    let auxilio_gas = Benefit {
        estimated_value: Some(ValueEstimate {
            min: None,
            max: Some(648.0),
            periodicity: Periodicity::Annual,
        }),
        ..benefit("auxilio-gas", Vec::new())
    };
    let moradia = Benefit {
        estimated_value: Some(ValueEstimate {
            min: Some(150_000.0),
            max: Some(190_000.0),
            periodicity: Periodicity::OneTime,
        }),
        ..benefit("minha-casa", Vec::new())
    };
    let tarifa = Benefit {
        estimated_value: monthly(80.0),
        ..benefit("tarifa-social", Vec::new())
    };

    let result = run_catalog(
        &[auxilio_gas, moradia, tarifa],
        &CitizenProfile::new(),
        &nobody_receiving(),
    );

    assert_eq!(result.eligible.len(), 3);
    assert_eq!(result.potential_monthly_value, 134.0);
}

#[test]
fn steps_and_documents_are_deduplicated_and_capped() {
    let profile = CitizenProfile::new()
        .with("cadastradoCadunico", true)
        .with("rendaPerCapita", 150)
        .with("idade", 70);
    let engine = TriagemEngine::new(TriagemConfig {
        max_priority_steps: 3,
        max_documents: 2,
    });

    let result = engine.run(&[bolsa_familia(), bpc()], &profile, &nobody_receiving());

    assert_eq!(result.eligible.len(), 2);
    assert_eq!(
        result.priority_steps,
        vec![
            "Atualizar o CadÚnico no CRAS",
            "Acompanhar pelo app Bolsa Família",
            "Pedir o BPC pelo Meu INSS",
        ]
    );
    assert_eq!(
        result.required_documents,
        vec!["CPF de todos da família", "Comprovante de residência"]
    );
    assert_eq!(result.potential_monthly_value, 2418.0);
}

#[test]
fn summary_keeps_catalog_order() {
    let catalog: Vec<Benefit> = (0..32)
        .map(|index| benefit(&format!("programa-{index:02}"), Vec::new()))
        .collect();

    let result = run_catalog(&catalog, &CitizenProfile::new(), &nobody_receiving());

    let ids: Vec<&str> = result
        .eligible
        .iter()
        .map(|result| result.benefit.id.as_str())
        .collect();
    let expected: Vec<&str> = catalog.iter().map(|benefit| benefit.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn summary_serializes_portuguese_keys() {
    let profile = low_income_household().with_derived_fields(reference_date());
    let result = run_catalog(&[bolsa_familia(), bpc()], &profile, &nobody_receiving());

    let value = serde_json::to_value(&result).expect("result serializes");
    assert_eq!(value["valorPotencialMensal"], 900.0);
    assert_eq!(value["beneficiosElegiveis"][0]["status"], "eligible");
    assert_eq!(
        value["beneficiosInconclusivos"][0]["inconclusiveRules"][0],
        IDADE_RULE
    );
    assert!(value["beneficiosJaRecebe"].as_array().expect("array").is_empty());
}

#[test]
fn single_registry_rule_with_answer_is_eligible() {
    let catalog = [benefit("cadunico", vec![cadunico_rule()])];
    let profile = CitizenProfile::new().with("cadastradoCadunico", true);

    let result = run_catalog(&catalog, &profile, &nobody_receiving());

    assert_eq!(result.eligible.len(), 1);
    assert!(result.eligible[0].failed_rules.is_empty());
    assert!(result.eligible[0].inconclusive_rules.is_empty());
}

#[test]
fn single_registry_rule_without_answer_is_inconclusive() {
    let catalog = [benefit("cadunico", vec![cadunico_rule()])];

    let result = run_catalog(&catalog, &CitizenProfile::new(), &nobody_receiving());

    assert!(result.eligible.is_empty());
    let outcome = &result.inconclusive[0];
    assert_eq!(outcome.status, EligibilityStatus::Inconclusive);
    assert_eq!(outcome.inconclusive_rules, vec![CADUNICO_RULE]);
    assert!(outcome.matched_rules.is_empty());
    assert!(outcome.failed_rules.is_empty());
}

#[test]
fn non_numeric_income_keeps_benefit_inconclusive() {
    let profile = CitizenProfile::new()
        .with("cadastradoCadunico", true)
        .with("rendaPerCapita", "-inf");

    let result = run_catalog(&[bolsa_familia()], &profile, &nobody_receiving());

    assert!(result.eligible.is_empty());
    assert_eq!(result.inconclusive.len(), 1);
    assert_eq!(result.inconclusive[0].inconclusive_rules, vec![RENDA_RULE]);
}
