use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use triagem::config::AppConfig;
use triagem::eligibility::TriagemService;
use triagem::error::AppError;
use triagem::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog_path) = args.catalogo.take() {
        config.triagem.catalog_path = catalog_path;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(&config, None)?;
    let service = Arc::new(TriagemService::new(
        catalog,
        config.triagem.engine_config(),
    ));

    let app = with_operational_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        catalog = %config.triagem.catalog_path.display(),
        "benefit screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
