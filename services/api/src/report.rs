use crate::infra::{load_catalog, load_profile};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use triagem::config::AppConfig;
use triagem::eligibility::{
    BenefitId, CriteriaRequest, CriteriaResponse, EligibilityResult, ScreeningRequest,
    TriagemResult, TriagemService,
};
use triagem::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ScreeningArgs {
    /// JSON file with the citizen answers
    #[arg(long)]
    pub(crate) perfil: PathBuf,
    /// Benefit catalog file (defaults to TRIAGEM_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalogo: Option<PathBuf>,
    /// Benefit ids the household already receives
    #[arg(long, value_delimiter = ',')]
    pub(crate) ja_recebe: Vec<String>,
    /// Date used to compute ages (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) data_referencia: Option<NaiveDate>,
    /// Print the raw JSON summary instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CriteriaArgs {
    /// Benefit id from the catalog
    #[arg(long)]
    pub(crate) beneficio: String,
    /// JSON file with the citizen answers; omit for an all-pending checklist
    #[arg(long)]
    pub(crate) perfil: Option<PathBuf>,
    /// Benefit catalog file (defaults to TRIAGEM_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalogo: Option<PathBuf>,
    /// Date used to compute ages (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) data_referencia: Option<NaiveDate>,
    /// Print the raw JSON checklist instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_screening_report(args: ScreeningArgs) -> Result<(), AppError> {
    let ScreeningArgs {
        perfil,
        catalogo,
        ja_recebe,
        data_referencia,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config, catalogo.as_deref())?;
    let service = TriagemService::new(catalog, config.triagem.engine_config());

    let request = ScreeningRequest {
        profile: load_profile(&perfil)?,
        already_receiving: ja_recebe.into_iter().map(BenefitId).collect(),
        reference_date: data_referencia,
        ..ScreeningRequest::default()
    };
    let result = service.screen(&request, Local::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_screening(&result));
    }
    Ok(())
}

pub(crate) fn run_criteria_report(args: CriteriaArgs) -> Result<(), AppError> {
    let CriteriaArgs {
        beneficio,
        perfil,
        catalogo,
        data_referencia,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config, catalogo.as_deref())?;
    let service = TriagemService::new(catalog, config.triagem.engine_config());

    let request = CriteriaRequest {
        profile: perfil.as_deref().map(load_profile).transpose()?,
        reference_date: data_referencia,
        ..CriteriaRequest::default()
    };
    let view = service.criteria(
        &BenefitId(beneficio),
        &request,
        Local::now().date_naive(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_criteria(&view));
    }
    Ok(())
}

fn render_screening(result: &TriagemResult) -> String {
    let mut out = String::from("Triagem de benefícios\n");

    render_section(&mut out, "Benefícios que você pode pedir", &result.eligible);
    render_section(&mut out, "Benefícios que você já recebe", &result.already_receiving);
    render_section(
        &mut out,
        "Benefícios que precisam de mais informações",
        &result.inconclusive,
    );

    out.push_str(&format!(
        "\nValor potencial por mês: {}\n",
        format_brl(result.potential_monthly_value)
    ));

    if !result.priority_steps.is_empty() {
        out.push_str("\nPróximos passos\n");
        for (position, step) in result.priority_steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", position + 1, step));
        }
    }

    if !result.required_documents.is_empty() {
        out.push_str("\nDocumentos necessários\n");
        for document in &result.required_documents {
            out.push_str(&format!("- {}\n", document));
        }
    }

    out
}

fn render_section(out: &mut String, title: &str, results: &[EligibilityResult]) {
    if results.is_empty() {
        out.push_str(&format!("\n{}: nenhum\n", title));
        return;
    }

    out.push_str(&format!("\n{}\n", title));
    for result in results {
        out.push_str(&format!(
            "- {} ({})\n",
            result.benefit.name,
            result.benefit.scope.label()
        ));
        for missing in &result.inconclusive_rules {
            out.push_str(&format!("    falta informar: {}\n", missing));
        }
    }
}

fn render_criteria(view: &CriteriaResponse) -> String {
    let mut out = format!("{}\n", view.benefit.name);
    if let Some(status) = view.status {
        out.push_str(&format!("Situação: {}\n", status.label()));
    }

    for group in &view.groups {
        out.push_str(&format!("\n{}\n", group.label));
        for criterion in &group.rules {
            out.push_str(&format!(
                "- [{}] {}\n",
                criterion.status.label(),
                criterion.rule.description
            ));
        }
    }

    out.push_str(&format!(
        "\n{}/{} critérios atendidos\n",
        view.progress.met, view.progress.total
    ));
    out
}

fn format_brl(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let reais = cents / 100;
    let mut digits = reais.abs().to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = format!(".{}{}", tail, grouped);
    }
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}R$ {}{},{:02}", sign, digits, grouped, (cents % 100).abs())
}
