//! Snapshot synthesis
//!
//! Converts a parsed endpoint into the flattened [`EndpointSnapshot`] shape
//! the diff engine compares against stored state. The persistence layer owns
//! the reverse conversion from its durable records into the same shape.

use openapi_importer_common::{
    BodyType, Endpoint, EndpointSnapshot, KeyValue, SecurityScheme, SecuritySchemeType,
};

/// Derive the would-be snapshot for a parsed endpoint.
///
/// Header and query parameters become name/value pairs with empty default
/// values; `request_id` is left unset since assigning one is the persistence
/// layer's job.
pub fn snapshot_from_endpoint(
    endpoint: &Endpoint,
    schemes: &[SecurityScheme],
) -> EndpointSnapshot {
    let (body_type, body_content_type) = match &endpoint.request_body {
        Some(body) => (
            BodyType::from_content_type(&body.content_type),
            Some(body.content_type.clone()),
        ),
        None => (BodyType::None, None),
    };

    EndpointSnapshot {
        id: endpoint.identity(),
        request_id: None,
        name: endpoint.name.clone(),
        method: endpoint.method,
        path: endpoint.path.clone(),
        headers: parameter_pairs(endpoint, "header"),
        query_params: parameter_pairs(endpoint, "query"),
        body_type,
        body_content_type,
        auth_description: auth_description(endpoint, schemes),
        tags: endpoint.tags.clone(),
    }
}

fn parameter_pairs(endpoint: &Endpoint, location: &str) -> Vec<KeyValue> {
    endpoint
        .parameters
        .iter()
        .filter(|p| p.location == location)
        .map(|p| KeyValue::new(p.name.clone(), ""))
        .collect()
}

/// Label for the first scheme name applying to the endpoint, or `None` when
/// no security applies. A name with no declared scheme labels as itself.
fn auth_description(endpoint: &Endpoint, schemes: &[SecurityScheme]) -> Option<String> {
    let first = endpoint.security.as_ref()?.first()?;
    let label = match schemes.iter().find(|s| &s.name == first) {
        Some(scheme) => scheme_label(&scheme.scheme_type),
        None => first.clone(),
    };
    Some(label)
}

/// Human-readable label for a security scheme kind.
pub fn scheme_label(scheme_type: &SecuritySchemeType) -> String {
    match scheme_type {
        SecuritySchemeType::Http { scheme } => match scheme.as_str() {
            "bearer" => "Bearer Token".to_string(),
            "basic" => "Basic Auth".to_string(),
            other => format!("HTTP {other}"),
        },
        SecuritySchemeType::ApiKey { name, location } => {
            format!("API Key ({location}: {name})")
        }
        SecuritySchemeType::Unsupported { raw_type } => format!("{raw_type} (unsupported)"),
    }
}
