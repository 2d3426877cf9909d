//! OpenAPI 3.x document parsing
//!
//! This crate turns a raw byte buffer holding a JSON or YAML serialization
//! of an OpenAPI 3.x document into a typed [`Spec`](openapi_importer_common::Spec).
//!
//! ## Pipeline
//!
//! Raw bytes flow one way through pure functions:
//! - `decode` — JSON-first, YAML-fallback decoding into a generic tree
//! - `merge` — path-level and operation-level parameter merging
//! - `template` — `{id}` to `{{id}}` path rewriting
//! - `security` — global vs operation-level security resolution
//! - `parser` — orchestration, validation, and deterministic ordering
//!
//! Nothing here performs I/O or retains state between calls; every function
//! is safe to call concurrently.

mod decode;
mod merge;
mod parser;
mod security;
mod template;

pub use decode::decode_document;
pub use merge::merge_parameters;
pub use parser::parse;
pub use security::{resolve_security, SecurityRequirement};
pub use template::convert_path;
