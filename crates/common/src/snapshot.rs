//! Snapshot and reconciliation result types
//!
//! An [`EndpointSnapshot`] is the flattened, comparable view of an endpoint
//! shared by "what the spec implies" and "what is currently stored". The
//! persistence layer owns converting its durable records into this shape and
//! applying [`DiffResult`] decisions back to storage; this crate only defines
//! the shape.

use crate::model::{Endpoint, HttpMethod};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A name/value pair for headers and query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub name: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Coarse request body classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyType {
    /// No request body
    None,
    Json,
    Xml,
    UrlEncoded,
    FormData,
    /// Any content type not covered above
    Raw,
}

impl BodyType {
    /// Classify a content type key from a request body content map.
    pub fn from_content_type(content_type: &str) -> Self {
        match content_type {
            "application/json" => BodyType::Json,
            "application/xml" => BodyType::Xml,
            "application/x-www-form-urlencoded" => BodyType::UrlEncoded,
            "multipart/form-data" => BodyType::FormData,
            _ => BodyType::Raw,
        }
    }
}

/// Flattened, comparable view of one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSnapshot {
    /// Identity key, `"{METHOD} {path}"`
    pub id: String,

    /// Stable identifier assigned by the persistence layer.
    /// `None` marks a snapshot as user-created rather than spec-derived;
    /// such snapshots are never matched against incoming endpoints.
    #[serde(default)]
    pub request_id: Option<Uuid>,

    /// Display name
    pub name: String,

    /// HTTP method
    pub method: HttpMethod,

    /// Template-converted path
    pub path: String,

    /// Header parameters with their stored values
    #[serde(default)]
    pub headers: Vec<KeyValue>,

    /// Query parameters with their stored values
    #[serde(default)]
    pub query_params: Vec<KeyValue>,

    /// Coarse body classification
    pub body_type: BodyType,

    /// Exact content type key, when a body is present
    #[serde(default)]
    pub body_content_type: Option<String>,

    /// Human-readable label of the applied security scheme, if any
    #[serde(default)]
    pub auth_description: Option<String>,

    /// Endpoint tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One endpoint whose derived fields differ between the stored snapshot and
/// the incoming spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointChange {
    /// Shared identity key
    pub id: String,

    /// Snapshot currently stored
    pub existing: EndpointSnapshot,

    /// Snapshot the incoming spec would produce
    pub incoming: EndpointSnapshot,
}

/// Exhaustive partition of a reconciliation run
///
/// Every existing snapshot and every incoming endpoint lands in exactly one
/// of the four buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffResult {
    /// Incoming endpoints with no stored counterpart
    pub new_endpoints: Vec<Endpoint>,

    /// Matched endpoints whose derived fields differ
    pub changed_endpoints: Vec<EndpointChange>,

    /// Stored snapshots with no incoming counterpart, including every
    /// user-created snapshot (the caller decides their fate)
    pub removed_endpoints: Vec<EndpointSnapshot>,

    /// Matched endpoints with no field differences
    pub unchanged_endpoints: Vec<EndpointSnapshot>,
}

impl DiffResult {
    /// True when the incoming spec implies no create, update, or delete.
    pub fn is_clean(&self) -> bool {
        self.new_endpoints.is_empty()
            && self.changed_endpoints.is_empty()
            && self.removed_endpoints.is_empty()
    }
}
