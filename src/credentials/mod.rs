//! Static payload credentials and their providers.
//!
//! The backend resolver expects every request to carry a token, a user
//! identifier and a version number. These are supplied once at process
//! start, either extracted from an external script artifact or embedded
//! in the service config, and never refreshed afterwards. An expired
//! token simply causes downstream lookups to fail.

pub mod script;

use anyhow::Result;

use crate::config::settings::CredentialsConfig;
use crate::credentials::script::ScriptCredentials;

/// Immutable request credentials, shared read-only for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub u: String,
    pub v: u64,
}

/// Supplies credentials at startup. The extraction strategy is
/// swappable without touching the resolution pipeline.
pub trait ProvideCredentials {
    fn credentials(&self) -> Result<Credentials>;
}

/// Credentials embedded directly in the service config.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl ProvideCredentials for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}

/// Build the provider configured for this service instance.
pub fn build_provider(cfg: &CredentialsConfig) -> Box<dyn ProvideCredentials + Send + Sync> {
    match cfg {
        CredentialsConfig::Script { script_path } => {
            Box::new(ScriptCredentials::new(script_path))
        }
        CredentialsConfig::Static { token, u, v } => Box::new(StaticCredentials(Credentials {
            token: token.clone(),
            u: u.clone(),
            v: *v,
        })),
    }
}
