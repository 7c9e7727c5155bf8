use serde_json::{Map, Value};

use crate::credentials::Credentials;

/// The fixed variant set, in request order. Each entry is the result
/// key paired with the boolean flags the backend expects for it.
pub const VARIANTS: &[(&str, &[&str])] = &[
    ("direct", &["direct"]),
    ("gdrive", &["gdrive"]),
    ("second", &["gdrive", "second"]),
    ("pix", &["pix"]),
    ("nc", &["pix", "nc"]),
];

/// Build one variant request body: `v`, `u`, `file`, `token`, then the
/// variant flags. Flags merged last so they can overwrite earlier keys,
/// though in practice they only add booleans.
pub fn build_payload(
    credentials: &Credentials,
    file_name: &str,
    flags: &[&str],
) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("v".to_string(), Value::from(credentials.v));
    body.insert("u".to_string(), Value::String(credentials.u.clone()));
    body.insert("file".to_string(), Value::String(file_name.to_string()));
    body.insert("token".to_string(), Value::String(credentials.token.clone()));
    for flag in flags {
        body.insert((*flag).to_string(), Value::Bool(true));
    }
    body
}
