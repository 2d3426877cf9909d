//! Endpoint reconciliation for spec re-imports
//!
//! This crate compares the endpoints parsed from an incoming OpenAPI
//! document against the snapshots of a previously imported state and
//! partitions them into new, changed, removed, and unchanged buckets.
//! Both halves are pure functions over immutable inputs; applying the
//! resulting decisions to storage is the persistence layer's job.

mod engine;
mod snapshot;

pub use engine::diff;
pub use snapshot::{scheme_label, snapshot_from_endpoint};
