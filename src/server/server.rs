use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing::info;

use crate::config::settings::SettingsConfig;
use crate::credentials::Credentials;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::resolver::client::ResolverClient;
use crate::server::routes;

#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup. `None` means credential initialization
    /// failed and every request answers with the 500 precondition.
    pub credentials: Option<Arc<Credentials>>,
    pub resolver: ResolverClient,
    pub metrics_state: MetricsState,
}

impl AppState {
    pub fn new(metrics: &Metrics, credentials: Option<Credentials>) -> Self {
        Self {
            credentials: credentials.map(Arc::new),
            resolver: ResolverClient::new(),
            metrics_state: MetricsState::new(metrics.registry.clone()),
        }
    }
}

/// Start one Axum server carrying the resolution route and, when
/// enabled, the metrics route.
pub async fn start(
    settings_config: &SettingsConfig,
    credentials: Option<Credentials>,
) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, credentials);

    let app = Router::new()
        .merge(routes::router(&settings_config.resolve_path))
        .merge(state.metrics_state.router(&settings_config.metrics).await)
        .with_state(state);

    let bind_addr = &settings_config.server.host;
    let port = &settings_config.server.port;
    info!("address: {}, port: {}", bind_addr, port);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port)).await?;
    metrics.up.set(1);
    axum::serve(listener, app).await?;

    Ok(())
}
