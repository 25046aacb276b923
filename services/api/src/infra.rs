use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use triagem::catalog::CatalogSnapshot;
use triagem::config::AppConfig;
use triagem::eligibility::CitizenProfile;
use triagem::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Catalog from an explicit path, falling back to the configured one.
pub(crate) fn load_catalog(
    config: &AppConfig,
    override_path: Option<&Path>,
) -> Result<CatalogSnapshot, AppError> {
    let path = override_path.unwrap_or(config.triagem.catalog_path.as_path());
    Ok(CatalogSnapshot::from_path(path)?)
}

/// Citizen answers stored as a flat JSON object, or wrapped as `{ "perfil": {...} }`.
pub(crate) fn load_profile(path: &Path) -> Result<CitizenProfile, AppError> {
    let file = File::open(path)?;
    let mut document: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    let answers = match document.get_mut("perfil").map(serde_json::Value::take) {
        Some(inner) => inner,
        None => document,
    };
    Ok(serde_json::from_value(answers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(
            parse_date(" 2025-06-15 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"))
        );
        assert!(parse_date("15/06/2025").is_err());
    }

    #[test]
    fn load_profile_accepts_wrapped_answers() {
        let path = std::env::temp_dir().join(format!("triagem-perfil-{}.json", std::process::id()));
        let mut file = File::create(&path).expect("temp file");
        write!(file, r#"{{ "perfil": {{ "pessoasNaCasa": 3, "uf": "BA" }} }}"#).expect("write");

        let profile = load_profile(&path).expect("profile loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.get("uf"), Some(&serde_json::json!("BA")));
    }
}
