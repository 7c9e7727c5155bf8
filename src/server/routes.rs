use std::collections::HashMap;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::Instant;
use tracing::{error, info};

use crate::credentials::Credentials;
use crate::observability::metrics::get_metrics;
use crate::resolver::fanout;
use crate::server::server::AppState;
use crate::transform;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub url: Option<String>,
}

/// The unit returned to the caller. `results` maps each of the five
/// fixed variant keys to a resolved URL or null, never an error object.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponse {
    pub status: bool,
    pub requested_url: String,
    pub processed_url: String,
    pub file_name: String,
    pub results: HashMap<String, Option<String>>,
}

/// Mount the resolution handler. Only GET is routed; axum answers 405
/// for other methods on the path.
pub fn router(resolve_path: &str) -> Router<AppState> {
    let path = if resolve_path.starts_with('/') {
        resolve_path.to_string()
    } else {
        format!("/{}", resolve_path)
    };
    Router::new().route(&path, get(resolve_links))
}

async fn resolve_links(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Response {
    let metrics = get_metrics().await;
    let start = Instant::now();
    metrics.resolve_requests.inc();

    // 1. Validate: the url parameter is required.
    let Some(url) = params.url else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'url' query parameter.");
    };

    // 2. Precondition: credentials must have been initialized at boot.
    let Some(credentials) = state.credentials.clone() else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server not initialized: missing credentials. Check server logs.",
        );
    };

    // 3.-4. Execute the pipeline and respond.
    let response = match run_resolution(&state, &credentials, url).await {
        Ok(body) => {
            info!(url = %body.requested_url, file = %body.file_name, "resolution completed");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("resolution failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    };

    metrics.resolve_duration.observe(start.elapsed().as_secs_f64());
    response
}

/// Transformer → fan-out → response assembly.
async fn run_resolution(
    state: &AppState,
    credentials: &Credentials,
    url: String,
) -> Result<ResolutionResponse> {
    let target = transform::transform(&url);
    let results = fanout::resolve_all(&state.resolver, credentials, &target, &url).await;

    Ok(ResolutionResponse {
        status: true,
        requested_url: url,
        processed_url: target.endpoint_url,
        file_name: target.file_name,
        results,
    })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": false, "error": message }))).into_response()
}
