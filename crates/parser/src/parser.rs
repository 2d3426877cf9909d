//! OpenAPI 3.x spec parser
//!
//! Orchestrates decoding, parameter merging, path templating, and security
//! resolution over the document tree to produce a typed [`Spec`].
//!
//! Validation is fail-fast, in order: decodable document, `openapi` field
//! with a 3.x value, `info` object, non-empty `info.title`. Everything after
//! that is extraction; unresolved parameter references are counted rather
//! than failed on.

use crate::decode;
use crate::merge;
use crate::security::{self, SecurityRequirement};
use crate::template;
use openapi_importer_common::{
    Endpoint, HttpMethod, ImportError, Info, RequestBody, Result, SecurityScheme,
    SecuritySchemeType, Server, ServerVariable, Spec,
};
use serde_json::{Map, Value};

/// Content type keys tried in order when classifying a request body.
const CONTENT_TYPE_PRIORITY: [&str; 4] = [
    "application/json",
    "application/xml",
    "application/x-www-form-urlencoded",
    "multipart/form-data",
];

/// Parse an OpenAPI 3.x document (JSON or YAML) into a [`Spec`].
pub fn parse(bytes: &[u8]) -> Result<Spec> {
    let doc = decode::decode_document(bytes)?;

    let version = decode::openapi_version(&doc)
        .ok_or_else(|| ImportError::InvalidFormat("missing `openapi` field".to_string()))?;
    if !version.starts_with("3.") {
        return Err(ImportError::UnsupportedVersion(version));
    }

    let info = parse_info(&doc)?;
    let servers = parse_servers(&doc);
    let security_schemes = parse_security_schemes(&doc);
    let global_security = doc.get("security").map(security_requirements);

    let mut endpoints = Vec::new();
    let mut ref_skip_count = 0;

    if let Some(paths) = doc.get("paths").and_then(Value::as_object) {
        for (raw_path, path_item) in paths {
            let Some(path_item) = path_item.as_object() else {
                continue;
            };
            let path_parameters = parameter_entries(path_item.get("parameters"));

            // Only whitelisted method keys are operations; `summary`,
            // `parameters`, `$ref`, vendor extensions and the like are
            // structural siblings.
            for (key, value) in path_item {
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };
                let Some(operation) = value.as_object() else {
                    continue;
                };
                let (endpoint, skipped) = build_endpoint(
                    method,
                    raw_path,
                    operation,
                    path_parameters,
                    global_security.as_deref(),
                );
                ref_skip_count += skipped;
                endpoints.push(endpoint);
            }
        }
    }

    // Stable UI ordering and stable diff input ordering run-to-run.
    endpoints.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.method.as_str().cmp(b.method.as_str()))
    });

    Ok(Spec {
        info,
        servers,
        endpoints,
        security_schemes,
        ref_skip_count,
    })
}

fn parse_info(doc: &Value) -> Result<Info> {
    let info = doc
        .get("info")
        .and_then(Value::as_object)
        .ok_or(ImportError::MissingInfo)?;

    let title = info
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
        .ok_or(ImportError::MissingTitle)?;

    // `version: 1.0` in unquoted YAML decodes as a number; tolerate it.
    let version = info
        .get("version")
        .and_then(decode::stringish)
        .unwrap_or_default();

    Ok(Info {
        title: title.to_string(),
        version,
        description: string_field(info, "description"),
    })
}

fn parse_servers(doc: &Value) -> Vec<Server> {
    let Some(servers) = doc.get("servers").and_then(Value::as_array) else {
        return Vec::new();
    };

    servers
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|server| {
            let url = server.get("url").and_then(Value::as_str)?;
            Some(Server {
                url: url.to_string(),
                description: string_field(server, "description"),
                variables: parse_server_variables(server.get("variables")),
            })
        })
        .collect()
}

fn parse_server_variables(variables: Option<&Value>) -> Vec<ServerVariable> {
    let Some(variables) = variables.and_then(Value::as_object) else {
        return Vec::new();
    };

    variables
        .iter()
        .filter_map(|(name, entry)| {
            let entry = entry.as_object()?;
            Some(ServerVariable {
                name: name.clone(),
                default_value: entry
                    .get("default")
                    .and_then(decode::stringish)
                    .unwrap_or_default(),
                enum_values: entry.get("enum").and_then(Value::as_array).map(|values| {
                    values.iter().filter_map(decode::stringish).collect()
                }),
                description: string_field(entry, "description"),
            })
        })
        .collect()
}

fn parse_security_schemes(doc: &Value) -> Vec<SecurityScheme> {
    let Some(schemes) = doc
        .get("components")
        .and_then(|components| components.get("securitySchemes"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    schemes
        .iter()
        .filter_map(|(name, entry)| {
            let entry = entry.as_object()?;
            let raw_type = entry
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default();

            let scheme_type = match raw_type {
                "http" => SecuritySchemeType::Http {
                    scheme: string_field(entry, "scheme").unwrap_or_default(),
                },
                "apiKey" => SecuritySchemeType::ApiKey {
                    name: string_field(entry, "name").unwrap_or_default(),
                    location: string_field(entry, "in").unwrap_or_default(),
                },
                other => SecuritySchemeType::Unsupported {
                    raw_type: other.to_string(),
                },
            };

            Some(SecurityScheme {
                name: name.clone(),
                scheme_type,
            })
        })
        .collect()
}

fn build_endpoint(
    method: HttpMethod,
    raw_path: &str,
    operation: &Map<String, Value>,
    path_parameters: &[Value],
    global_security: Option<&[SecurityRequirement]>,
) -> (Endpoint, usize) {
    let operation_parameters = parameter_entries(operation.get("parameters"));
    let (parameters, skipped) = merge::merge_parameters(path_parameters, operation_parameters);

    let operation_id = string_field(operation, "operationId");
    let name = operation_id
        .clone()
        .or_else(|| string_field(operation, "summary"))
        .unwrap_or_default();

    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let request_body = operation
        .get("requestBody")
        .and_then(|body| body.get("content"))
        .and_then(Value::as_object)
        .and_then(select_content_type)
        .map(|content_type| RequestBody { content_type });

    // Field presence matters here: a declared empty list replaces the
    // global security, while an absent field inherits it.
    let operation_security = operation.get("security").map(security_requirements);
    let security = security::resolve_security(global_security, operation_security.as_deref());

    let endpoint = Endpoint {
        name,
        method,
        path: template::convert_path(raw_path),
        parameters,
        request_body,
        tags,
        operation_id,
        description: string_field(operation, "description"),
        security,
    };

    (endpoint, skipped)
}

/// Pick the request body content type key by coarse-type priority, falling
/// back to the first key for anything unrecognized.
fn select_content_type(content: &Map<String, Value>) -> Option<String> {
    for candidate in CONTENT_TYPE_PRIORITY {
        if content.contains_key(candidate) {
            return Some(candidate.to_string());
        }
    }
    content.keys().next().cloned()
}

/// Parse a `security` field value into requirement objects. Each object's
/// keys are the OR-alternative scheme names of one requirement.
fn security_requirements(value: &Value) -> Vec<SecurityRequirement> {
    let Some(requirements) = value.as_array() else {
        return Vec::new();
    };

    requirements
        .iter()
        .filter_map(Value::as_object)
        .map(|requirement| requirement.keys().cloned().collect())
        .collect()
}

fn parameter_entries(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_spec() {
        let spec = parse(
            br#"{"openapi": "3.0.0", "info": {"title": "Test API", "version": "1.0.0"}, "paths": {}}"#,
        )
        .unwrap();

        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.info.version, "1.0.0");
        assert!(spec.endpoints.is_empty());
        assert_eq!(spec.ref_skip_count, 0);
    }

    #[test]
    fn test_missing_openapi_field_is_invalid_format() {
        let err = parse(br#"{"info": {"title": "T", "version": "1"}}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat(_)));
    }

    #[test]
    fn test_swagger_2_is_unsupported_version() {
        let err = parse(br#"{"openapi": "2.0", "info": {"title": "T"}}"#).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_missing_info() {
        let err = parse(br#"{"openapi": "3.0.0"}"#).unwrap_err();
        assert!(matches!(err, ImportError::MissingInfo));
    }

    #[test]
    fn test_empty_title_is_missing_title() {
        let err = parse(br#"{"openapi": "3.0.0", "info": {"title": "", "version": "1"}}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingTitle));
    }

    #[test]
    fn test_select_content_type_priority() {
        let content: Map<String, Value> = serde_json::from_str(
            r#"{"text/plain": {}, "application/json": {}}"#,
        )
        .unwrap();
        assert_eq!(
            select_content_type(&content).as_deref(),
            Some("application/json")
        );

        let raw_only: Map<String, Value> =
            serde_json::from_str(r#"{"application/octet-stream": {}}"#).unwrap();
        assert_eq!(
            select_content_type(&raw_only).as_deref(),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn test_structural_path_keys_are_ignored() {
        let spec = parse(
            br#"{
                "openapi": "3.0.0",
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/users": {
                        "summary": "User collection",
                        "x-rate-limit": 10,
                        "parameters": [],
                        "get": {"operationId": "listUsers"}
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(spec.endpoints.len(), 1);
        assert_eq!(spec.endpoints[0].name, "listUsers");
    }

    #[test]
    fn test_name_falls_back_to_summary_then_empty() {
        let spec = parse(
            br#"{
                "openapi": "3.0.0",
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/a": {"get": {"summary": "Fetch A"}},
                    "/b": {"get": {}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(spec.endpoints[0].name, "Fetch A");
        assert_eq!(spec.endpoints[1].name, "");
    }
}
