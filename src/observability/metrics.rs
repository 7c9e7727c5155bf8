use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Inbound resolution requests
    pub resolve_requests: IntCounter,
    pub resolve_duration: Histogram,

    // Outbound variant calls
    pub variant_resolved: IntCounterVec,
    pub variant_failures: IntCounterVec,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("linkrelay".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            resolve_requests: IntCounter::new("resolve_requests_total", "Total inbound resolution requests").unwrap(),
            resolve_duration: Histogram::with_opts(HistogramOpts::new("resolve_duration_seconds", "Resolution request duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])).unwrap(),

            variant_resolved: IntCounterVec::new(Opts::new("variant_resolved_total", "Resolved links by variant"), &["variant"]).unwrap(),
            variant_failures: IntCounterVec::new(Opts::new("variant_failures_total", "Variant lookup failures by reason"), &["variant", "reason"]).unwrap(),

            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup/config load").unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.resolve_requests.clone())).unwrap();
        reg.register(Box::new(metrics.resolve_duration.clone())).unwrap();
        reg.register(Box::new(metrics.variant_resolved.clone())).unwrap();
        reg.register(Box::new(metrics.variant_failures.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
