//! Shared constants and invariants

/// Fallback file name when extraction from the source URL fails.
pub const UNKNOWN_FILE: &str = "unknown_file";

// Browser impersonation headers sent with every resolver request.
// Static, never varied per request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";
pub const SEC_CH_UA: &str = r#""Not;A=Brand";v="99", "Google Chrome";v="139", "Chromium";v="139""#;
pub const SEC_CH_UA_MOBILE: &str = "?0";
pub const SEC_CH_UA_PLATFORM: &str = "\"Windows\"";

/// Keys the backend has been observed to place the resolved link under,
/// in priority order.
pub const RESOLVED_LINK_KEYS: &[&str] = &["url", "mega"];
