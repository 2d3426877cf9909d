//! Common types and utilities for the OpenAPI importer
//!
//! This crate contains the shared data model produced by the spec parser and
//! consumed by the diff engine, plus the error taxonomy used across the
//! parser, diff, and CLI components.

mod model;
mod snapshot;

pub use model::{
    Endpoint, HttpMethod, Info, Parameter, RequestBody, SecurityScheme, SecuritySchemeType, Server,
    ServerVariable, Spec,
};
pub use snapshot::{BodyType, DiffResult, EndpointChange, EndpointSnapshot, KeyValue};

use thiserror::Error;

/// Errors that can occur while parsing an OpenAPI document
///
/// Parsing is fail-fast: the first violated precondition aborts with no
/// partial result. Diffing never errors.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input decodes as neither a JSON object nor a YAML mapping, or the
    /// decoded document has no recognizable `openapi` field.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The `openapi` field is present but not a 3.x version.
    #[error("Unsupported OpenAPI version `{0}` (only 3.x is supported)")]
    UnsupportedVersion(String),

    /// The document has no `info` object.
    #[error("Document is missing the `info` object")]
    MissingInfo,

    /// The `info` object has no title, or the title is empty.
    #[error("Document is missing `info.title`")]
    MissingTitle,
}

/// Result type for importer operations
pub type Result<T> = std::result::Result<T, ImportError>;
