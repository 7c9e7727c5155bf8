
// Full request-handler flow: injected credentials, a mock resolver
// backend spawned on an ephemeral port, and the relay's own router.

#[cfg(test)]
mod test {

    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::routing::post;
    use axum::{Json, Router};
    use http::StatusCode;
    use serde_json::{json, Value};
    use serial_test::serial;
    use tokio::task::JoinHandle;

    use crate::config::settings::MetricsConfig;
    use crate::credentials::Credentials;
    use crate::observability::metrics::get_metrics;
    use crate::server::routes;
    use crate::server::server::AppState;
    use crate::tests::common::{build_reqwest_client, spawn_axum};

    fn credentials() -> Credentials {
        Credentials {
            token: "tok-e2e".to_string(),
            u: "usr-e2e".to_string(),
            v: 4,
        }
    }

    /// Mock resolver backend: echoes the variant back as a fake CDN
    /// link and counts every hit.
    fn backend_router(hits: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/files/{name}",
            post(move |Json(body): Json<Value>| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let variant = if body["nc"].as_bool().unwrap_or(false) {
                        "nc"
                    } else if body["second"].as_bool().unwrap_or(false) {
                        "second"
                    } else if body["pix"].as_bool().unwrap_or(false) {
                        "pix"
                    } else if body["gdrive"].as_bool().unwrap_or(false) {
                        "gdrive"
                    } else {
                        "direct"
                    };
                    Json(json!({"url": format!("https://cdn.example/{}", variant)}))
                }
            }),
        )
    }

    async fn spawn_relay(credentials: Option<Credentials>) -> (JoinHandle<()>, SocketAddr) {
        let metrics = get_metrics().await;
        let state = AppState::new(metrics, credentials);
        let app = routes::router("/api/t").with_state(state);
        spawn_axum(app).await
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn resolves_all_variants_through_the_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (backend_h, backend_addr) = spawn_axum(backend_router(hits.clone())).await;
        let (relay_h, relay_addr) = spawn_relay(Some(credentials())).await;
        let client = build_reqwest_client();

        let source_url = format!("http://{}/files/movie.mp4", backend_addr);
        let response = client
            .get(format!("http://{}/api/t", relay_addr))
            .query(&[("url", source_url.as_str())])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], json!(true));
        assert_eq!(body["requestedUrl"], json!(source_url));
        assert_eq!(
            body["processedUrl"],
            json!(format!("http://{}/files/movie?ext=mp4", backend_addr))
        );
        assert_eq!(body["fileName"], "movie.mp4");

        let results = body["results"].as_object().unwrap();
        assert_eq!(results.len(), 5);
        for key in ["direct", "gdrive", "second", "pix", "nc"] {
            assert_eq!(results[key], json!(format!("https://cdn.example/{}", key)));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 5, "one backend call per variant");

        backend_h.abort();
        relay_h.abort();
    }

    #[tokio::test]
    async fn missing_url_parameter_is_a_client_error_without_outbound_calls() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (backend_h, _backend_addr) = spawn_axum(backend_router(hits.clone())).await;
        let (relay_h, relay_addr) = spawn_relay(Some(credentials())).await;
        let client = build_reqwest_client();

        let response = client
            .get(format!("http://{}/api/t", relay_addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], json!(false));
        assert_eq!(body["error"], "Missing 'url' query parameter.");
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        backend_h.abort();
        relay_h.abort();
    }

    #[tokio::test]
    async fn uninitialized_credentials_are_a_server_error_without_outbound_calls() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (backend_h, backend_addr) = spawn_axum(backend_router(hits.clone())).await;
        let (relay_h, relay_addr) = spawn_relay(None).await;
        let client = build_reqwest_client();

        let source_url = format!("http://{}/files/movie.mp4", backend_addr);
        let response = client
            .get(format!("http://{}/api/t", relay_addr))
            .query(&[("url", source_url.as_str())])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("not initialized"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        backend_h.abort();
        relay_h.abort();
    }

    #[tokio::test]
    async fn non_get_methods_are_rejected() {
        let (relay_h, relay_addr) = spawn_relay(Some(credentials())).await;
        let client = build_reqwest_client();

        let response = client
            .post(format!("http://{}/api/t", relay_addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        relay_h.abort();
    }

    #[tokio::test]
    #[serial]
    async fn metrics_route_exposes_registry() {
        let metrics = get_metrics().await;
        let state = AppState::new(metrics, None);
        let metrics_config = MetricsConfig {
            path: "/metrics".to_string(),
            is_enabled: true,
        };
        let app = Router::new()
            .merge(routes::router("/api/t"))
            .merge(state.metrics_state.router(&metrics_config).await)
            .with_state(state);
        let (handle, addr) = spawn_axum(app).await;
        let client = build_reqwest_client();

        let response = client
            .get(format!("http://{}/metrics", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = response.text().await.unwrap();
        assert!(text.contains("linkrelay_up"));

        handle.abort();
    }
}
