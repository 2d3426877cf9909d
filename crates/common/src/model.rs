//! Typed representation of a parsed OpenAPI document
//!
//! Everything here is an immutable output of one parse call. None of these
//! types are mutated after construction; the persistence and presentation
//! layers only read them.

use serde::{Deserialize, Serialize};

/// HTTP methods recognized as operations under a path item.
///
/// Any other child key of a path entry (`summary`, `parameters`, `$ref`,
/// vendor extensions) is a structural sibling, not an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// Canonical short form, e.g. `GET`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Match a path-item child key against the operation whitelist,
    /// case-insensitively. Returns `None` for structural siblings.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully parsed, typed representation of one OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spec {
    /// API metadata
    pub info: Info,

    /// Declared servers
    pub servers: Vec<Server>,

    /// Extracted endpoints, sorted by `(path, method)`
    pub endpoints: Vec<Endpoint>,

    /// Declared security schemes from `components.securitySchemes`
    pub security_schemes: Vec<SecurityScheme>,

    /// Number of unresolved `$ref` parameter entries skipped during parsing.
    /// These are surfaced for the caller to warn about, not errors.
    pub ref_skip_count: usize,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title (always non-empty)
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL, possibly containing `{variable}` templates
    pub url: String,

    /// Server description
    #[serde(default)]
    pub description: Option<String>,

    /// Declared URL template variables
    #[serde(default)]
    pub variables: Vec<ServerVariable>,
}

impl Server {
    /// Server URL with each declared variable replaced by its default value.
    pub fn effective_url(&self) -> String {
        let mut url = self.url.clone();
        for var in &self.variables {
            url = url.replace(&format!("{{{}}}", var.name), &var.default_value);
        }
        url
    }
}

/// One server URL template variable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Variable name as it appears inside the URL template
    pub name: String,

    /// Default value substituted into the URL
    pub default_value: String,

    /// Allowed values, if the spec restricts them
    #[serde(default)]
    pub enum_values: Option<Vec<String>>,

    /// Variable description
    #[serde(default)]
    pub description: Option<String>,
}

/// A named security scheme declared under `components.securitySchemes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Scheme name (the key used by security requirements)
    pub name: String,

    /// Scheme kind
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,
}

/// Kind of a security scheme
///
/// OAuth2 and OpenID Connect are recognized but intentionally opaque; they
/// are carried through as [`SecuritySchemeType::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    /// HTTP authentication, e.g. "bearer" or "basic"
    Http { scheme: String },

    /// API key in a header or query parameter
    ApiKey { name: String, location: String },

    /// Anything else, e.g. "oauth2" or "openIdConnect"
    Unsupported { raw_type: String },
}

/// One inline operation parameter
///
/// Uniqueness key is `(name, location)`; an endpoint never carries two
/// parameters with the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Location: path, query, header, or cookie
    pub location: String,
}

/// Request body of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Selected content type key, e.g. "application/json"
    pub content_type: String,
}

/// One HTTP operation (method + path) extracted from a spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Display name: operationId, falling back to summary, else empty
    pub name: String,

    /// HTTP method
    pub method: HttpMethod,

    /// Path with parameters already converted to `{{name}}` form
    pub path: String,

    /// Merged path-level and operation-level parameters
    pub parameters: Vec<Parameter>,

    /// Request body, if the operation declares one
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    /// Operation tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Operation ID, if declared
    #[serde(default)]
    pub operation_id: Option<String>,

    /// Operation description
    #[serde(default)]
    pub description: Option<String>,

    /// Effective security scheme names for this operation.
    /// `None` means no security is declared anywhere; `Some(vec![])` means
    /// the operation explicitly opts out of authentication.
    #[serde(default)]
    pub security: Option<Vec<String>>,
}

impl Endpoint {
    /// Identity key used for re-import matching, e.g. `GET /users/{{id}}`.
    pub fn identity(&self) -> String {
        format!("{} {}", self.method.as_str(), self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_key_matching_is_case_insensitive() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("Patch"), Some(HttpMethod::Patch));
    }

    #[test]
    fn test_structural_siblings_are_not_methods() {
        for key in ["summary", "description", "parameters", "servers", "$ref", "x-internal"] {
            assert_eq!(HttpMethod::from_key(key), None, "{key} must not parse");
        }
    }

    #[test]
    fn test_endpoint_identity() {
        let endpoint = Endpoint {
            name: "getUser".to_string(),
            method: HttpMethod::Get,
            path: "/users/{{id}}".to_string(),
            parameters: vec![],
            request_body: None,
            tags: vec![],
            operation_id: Some("getUser".to_string()),
            description: None,
            security: None,
        };
        assert_eq!(endpoint.identity(), "GET /users/{{id}}");
    }

    #[test]
    fn test_effective_url_substitutes_defaults() {
        let server = Server {
            url: "https://{region}.api.example.com/{basePath}".to_string(),
            description: None,
            variables: vec![
                ServerVariable {
                    name: "region".to_string(),
                    default_value: "eu-west-1".to_string(),
                    enum_values: None,
                    description: None,
                },
                ServerVariable {
                    name: "basePath".to_string(),
                    default_value: "v2".to_string(),
                    enum_values: None,
                    description: None,
                },
            ],
        };
        assert_eq!(server.effective_url(), "https://eu-west-1.api.example.com/v2");
    }
}
