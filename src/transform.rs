//! Endpoint rewrite and file-name extraction.
//!
//! Pure functions mapping a client-supplied URL to the backend
//! resolver endpoint and the bare file name embedded in it.

use url::Url;

use crate::utils::constants::UNKNOWN_FILE;

/// Ordered server-path rewrites. The first source prefix found in the
/// URL wins and scanning stops; later entries are never applied on top.
/// Order matters: the serverN1/N2/N3 prefixes are distinct cases that
/// collapse onto one backend path.
const SERVER_REWRITES: &[(&str, &str)] = &[
    ("https://google.com/server5/1:/", "https://drive2.cscloud12.online/server5/"),
    ("https://google.com/server4/1:/", "https://drive2.cscloud12.online/server4/"),
    ("https://google.com/server3/1:/", "https://drive2.cscloud12.online/server3/"),
    ("https://google.com/server21/1:/", "https://drive2.cscloud12.online/server2/"),
    ("https://google.com/server22/1:/", "https://drive2.cscloud12.online/server2/"),
    ("https://google.com/server23/1:/", "https://drive2.cscloud12.online/server2/"),
    ("https://google.com/server11/1:/", "https://drive2.cscloud12.online/server1/"),
    ("https://google.com/server12/1:/", "https://drive2.cscloud12.online/server1/"),
    ("https://google.com/server13/1:/", "https://drive2.cscloud12.online/server1/"),
];

/// Ordered extension rewrites. Unlike the server table, every matching
/// entry applies, but an entry is skipped when its target form is
/// already present in the URL (guards against double-transformation).
const EXT_REWRITES: &[(&str, &str)] = &[
    (".mp4?bot=cscloud2bot&code=", "?ext=mp4&bot=cscloud2bot&code="),
    (".mp4", "?ext=mp4"),
    (".mkv?bot=cscloud2bot&code=", "?ext=mkv&bot=cscloud2bot&code="),
    (".mkv", "?ext=mkv"),
    (".zip", "?ext=zip"),
];

/// Backend endpoint plus the file name derived from one client URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedTarget {
    pub endpoint_url: String,
    pub file_name: String,
}

pub fn transform(original_url: &str) -> TransformedTarget {
    TransformedTarget {
        endpoint_url: rewrite_endpoint(original_url),
        // The file name always comes from the pre-rewrite URL.
        file_name: extract_file_name(original_url),
    }
}

/// Rewrite a client URL into the backend resolver endpoint. URLs with
/// no matching pattern pass through unchanged.
pub fn rewrite_endpoint(original_url: &str) -> String {
    let mut out = original_url.to_string();

    for (from, to) in SERVER_REWRITES {
        if out.contains(from) {
            out = out.replacen(from, to, 1);
            break;
        }
    }

    for (from, to) in EXT_REWRITES {
        if out.contains(from) && !out.contains(to) {
            out = out.replacen(from, to, 1);
        }
    }

    out
}

/// Extract the bare file name from a URL: final path segment, stripped
/// of anything from the first `?`, percent-decoded. Parse failures
/// yield the fixed sentinel instead of an error so the pipeline never
/// aborts on a malformed URL.
pub fn extract_file_name(raw_url: &str) -> String {
    file_name_from_url(raw_url).unwrap_or_else(|| UNKNOWN_FILE.to_string())
}

fn file_name_from_url(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    let name = segment.split('?').next().unwrap_or(segment);
    urlencoding::decode(name).ok().map(|decoded| decoded.into_owned())
}
