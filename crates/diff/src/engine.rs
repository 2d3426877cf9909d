//! Re-import reconciliation
//!
//! Classifies each incoming endpoint and each stored snapshot into exactly
//! one of four buckets: new, changed, removed, or unchanged. This is what
//! lets a user re-import an updated spec without losing customizations.
//!
//! Identity is `"{METHOD} {path}"` with the method upper-cased. Only
//! snapshots carrying a request id are matchable; user-created snapshots
//! (no request id) always surface as removal candidates so the caller can
//! decide their fate.

use crate::snapshot::snapshot_from_endpoint;
use openapi_importer_common::{
    DiffResult, Endpoint, EndpointChange, EndpointSnapshot, SecurityScheme,
};
use std::collections::HashMap;

/// Reconcile incoming endpoints against stored snapshots. Never errors.
pub fn diff(
    incoming: &[Endpoint],
    existing: &[EndpointSnapshot],
    schemes: &[SecurityScheme],
) -> DiffResult {
    let mut by_identity: HashMap<String, usize> = HashMap::new();
    for (index, snapshot) in existing.iter().enumerate() {
        if snapshot.request_id.is_some() {
            by_identity.insert(normalize_identity(&snapshot.id), index);
        }
    }

    let mut result = DiffResult::default();
    let mut matched = vec![false; existing.len()];

    for endpoint in incoming {
        match by_identity.remove(&endpoint.identity()) {
            Some(index) => {
                matched[index] = true;
                let stored = &existing[index];
                let synthesized = snapshot_from_endpoint(endpoint, schemes);
                if differs(stored, &synthesized) {
                    result.changed_endpoints.push(EndpointChange {
                        id: stored.id.clone(),
                        existing: stored.clone(),
                        incoming: synthesized,
                    });
                } else {
                    result.unchanged_endpoints.push(stored.clone());
                }
            }
            None => result.new_endpoints.push(endpoint.clone()),
        }
    }

    for (index, snapshot) in existing.iter().enumerate() {
        if !matched[index] {
            result.removed_endpoints.push(snapshot.clone());
        }
    }

    result
}

/// Upper-case the method portion of a stored identity so matching is
/// case-insensitive on the method.
fn normalize_identity(id: &str) -> String {
    match id.split_once(' ') {
        Some((method, path)) => format!("{} {}", method.to_ascii_uppercase(), path),
        None => id.to_string(),
    }
}

/// Compare the derived content fields. `id` and `request_id` are identity
/// bookkeeping, not content.
fn differs(existing: &EndpointSnapshot, incoming: &EndpointSnapshot) -> bool {
    existing.name != incoming.name
        || existing.path != incoming.path
        || existing.headers != incoming.headers
        || existing.query_params != incoming.query_params
        || existing.body_type != incoming.body_type
        || existing.body_content_type != incoming.body_content_type
        || existing.auth_description != incoming.auth_description
        || existing.tags != incoming.tags
}
