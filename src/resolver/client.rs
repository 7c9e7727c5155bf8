use reqwest::header;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::observability::metrics::get_metrics;
use crate::utils::constants::{
    BROWSER_USER_AGENT, RESOLVED_LINK_KEYS, SEC_CH_UA, SEC_CH_UA_MOBILE, SEC_CH_UA_PLATFORM,
};

static REASON_REQUEST: &str = "request";
static REASON_STATUS: &str = "status";
static REASON_PARSE: &str = "parse";

/// Thin wrapper over one shared reqwest client. Issues exactly one
/// POST per variant and absorbs every failure into "no result", so a
/// bad variant never poisons the rest of the fan-out.
#[derive(Debug, Clone)]
pub struct ResolverClient {
    client: Client,
}

impl Default for ResolverClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// POST one variant payload to the transformed endpoint. The
    /// Referer carries the original (pre-transform) URL; the remaining
    /// headers impersonate a desktop browser.
    ///
    /// Returns the resolved link, or `None` when the request fails or
    /// the response carries neither known link key.
    pub async fn resolve_variant(
        &self,
        variant: &str,
        endpoint_url: &str,
        referer_url: &str,
        payload: &Map<String, Value>,
    ) -> Option<String> {
        let metrics = get_metrics().await;

        let request = self
            .client
            .post(endpoint_url)
            .header(header::REFERER, referer_url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header("sec-ch-ua", SEC_CH_UA)
            .header("sec-ch-ua-mobile", SEC_CH_UA_MOBILE)
            .header("sec-ch-ua-platform", SEC_CH_UA_PLATFORM)
            .json(payload);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(variant, error = %e, "resolver request failed");
                metrics
                    .variant_failures
                    .with_label_values(&[variant, REASON_REQUEST])
                    .inc();
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(variant, %status, body = %body, "resolver returned non-success status");
            metrics
                .variant_failures
                .with_label_values(&[variant, REASON_STATUS])
                .inc();
            return None;
        }

        let json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                warn!(variant, error = %e, "resolver response is not valid JSON");
                metrics
                    .variant_failures
                    .with_label_values(&[variant, REASON_PARSE])
                    .inc();
                return None;
            }
        };

        // The backend places the link under one of two keys; whichever
        // is present first wins. Neither present is a normal null
        // result, not an error.
        let resolved = RESOLVED_LINK_KEYS
            .iter()
            .find_map(|key| json[*key].as_str().map(str::to_owned));

        match &resolved {
            Some(_) => metrics.variant_resolved.with_label_values(&[variant]).inc(),
            None => debug!(variant, "no resolved link in response"),
        }

        resolved
    }
}
