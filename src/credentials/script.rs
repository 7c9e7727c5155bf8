use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::debug;

use crate::credentials::{Credentials, ProvideCredentials};

/// Extracts credentials from an external script artifact via fixed
/// text patterns. The artifact is the deobfuscated client script the
/// backend operator ships; pattern extraction is fragile by nature, so
/// a failed match surfaces as an error instead of a partial result.
#[derive(Debug, Clone)]
pub struct ScriptCredentials {
    path: PathBuf,
}

impl ScriptCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProvideCredentials for ScriptCredentials {
    fn credentials(&self) -> Result<Credentials> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| anyhow!("reading script artifact {}: {}", self.path.display(), e))?;
        extract_credentials(&content)
    }
}

/// Apply the three fixed patterns to the script text. All three must
/// match for the credentials to be usable.
pub fn extract_credentials(script: &str) -> Result<Credentials> {
    let token = capture(script, r#"token:\s*['"]([^'"]+)['"]"#)
        .ok_or_else(|| anyhow!("token pattern not found in script"))?;
    let u = capture(script, r#"u:\s*['"]([^'"]+)['"]"#)
        .ok_or_else(|| anyhow!("u pattern not found in script"))?;
    let v = capture(script, r"v:\s*(\d+)")
        .ok_or_else(|| anyhow!("v pattern not found in script"))?
        .parse::<u64>()?;

    debug!(v, "credentials extracted from script artifact");
    Ok(Credentials { token, u, v })
}

fn capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).unwrap();
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
