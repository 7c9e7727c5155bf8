use serde::Deserialize;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub credentials: CredentialsConfig,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Inbound route the resolution handler is mounted on.
    #[serde(default = "default_resolve_path")]
    pub resolve_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            is_enabled: false,
        }
    }
}

/// ================================
/// Credentials sourcing
/// ================================
///
/// Either pattern extraction from an external script artifact or
/// statically embedded values. The request handler is agnostic to
/// which one supplied the credentials.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CredentialsConfig {
    Script { script_path: String },
    Static { token: String, u: String, v: u64 },
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_resolve_path() -> String {
    "/api/t".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
