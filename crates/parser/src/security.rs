//! Effective security resolution
//!
//! OpenAPI security is an override, not a merge: an operation that declares
//! its own `security` field, even as an empty list, completely replaces the
//! document-level declaration for that operation. An explicit empty list
//! means "no authentication", distinct from inheriting the global default.

/// One acceptable way to authenticate an operation: an OR-set of scheme
/// names drawn from `components.securitySchemes`.
pub type SecurityRequirement = Vec<String>;

/// Compute the effective, ordered scheme names for one operation.
///
/// Returns `None` only when neither global nor operation security exists;
/// `Some(vec![])` for explicit "no auth". When several requirement objects
/// are listed, the first one carrying at least one scheme name wins.
pub fn resolve_security(
    global: Option<&[SecurityRequirement]>,
    operation: Option<&[SecurityRequirement]>,
) -> Option<Vec<String>> {
    let effective = operation.or(global)?;
    Some(
        effective
            .iter()
            .find(|requirement| !requirement.is_empty())
            .cloned()
            .unwrap_or_default(),
    )
}
