use std::collections::HashMap;

use futures::future::join_all;

use crate::credentials::Credentials;
use crate::resolver::client::ResolverClient;
use crate::resolver::payload::{build_payload, VARIANTS};
use crate::transform::TransformedTarget;

/// Issue all five variant lookups concurrently and merge them into a
/// keyed map. Every call runs to its own completion; a failed variant
/// settles as `None` inside the client, so the join never propagates a
/// single variant's failure.
///
/// The returned map always contains exactly the five fixed variant
/// keys.
pub async fn resolve_all(
    client: &ResolverClient,
    credentials: &Credentials,
    target: &TransformedTarget,
    original_url: &str,
) -> HashMap<String, Option<String>> {
    let lookups = VARIANTS.iter().map(|(key, flags)| {
        let payload = build_payload(credentials, &target.file_name, flags);
        async move {
            let resolved = client
                .resolve_variant(key, &target.endpoint_url, original_url, &payload)
                .await;
            ((*key).to_string(), resolved)
        }
    });

    join_all(lookups).await.into_iter().collect()
}
