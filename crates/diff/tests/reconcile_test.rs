//! End-to-end reconciliation tests: parse a spec, snapshot its endpoints as
//! the "stored" state, then diff an updated spec against them.

use openapi_importer_diff::{diff, snapshot_from_endpoint};
use openapi_importer_parser::parse;
use uuid::Uuid;

const ORIGINAL: &str = r##"{
    "openapi": "3.0.0",
    "info": {"title": "Orders", "version": "1.0.0"},
    "components": {
        "securitySchemes": {
            "bearerAuth": {"type": "http", "scheme": "bearer"}
        }
    },
    "security": [{"bearerAuth": []}],
    "paths": {
        "/orders": {
            "get": {"operationId": "listOrders", "tags": ["orders"]},
            "post": {
                "operationId": "createOrder",
                "tags": ["orders"],
                "requestBody": {
                    "content": {"application/json": {"schema": {}}}
                }
            }
        },
        "/orders/{id}": {
            "parameters": [{"name": "id", "in": "path"}],
            "get": {"operationId": "getOrder", "tags": ["orders"]}
        }
    }
}"##;

const UPDATED: &str = r##"{
    "openapi": "3.0.0",
    "info": {"title": "Orders", "version": "1.1.0"},
    "components": {
        "securitySchemes": {
            "bearerAuth": {"type": "http", "scheme": "bearer"}
        }
    },
    "security": [{"bearerAuth": []}],
    "paths": {
        "/orders": {
            "get": {
                "operationId": "listOrders",
                "tags": ["orders"],
                "parameters": [{"name": "status", "in": "query"}]
            },
            "post": {
                "operationId": "createOrder",
                "tags": ["orders"],
                "requestBody": {
                    "content": {"application/json": {"schema": {}}}
                }
            }
        },
        "/orders/{id}/refund": {
            "parameters": [{"name": "id", "in": "path"}],
            "post": {"operationId": "refundOrder", "tags": ["orders"]}
        }
    }
}"##;

#[test]
fn test_reimport_partitions_endpoints() {
    let original = parse(ORIGINAL.as_bytes()).unwrap();
    let updated = parse(UPDATED.as_bytes()).unwrap();

    // Stand in for the persistence layer: snapshot the original import and
    // assign request ids.
    let stored: Vec<_> = original
        .endpoints
        .iter()
        .map(|e| {
            let mut snapshot = snapshot_from_endpoint(e, &original.security_schemes);
            snapshot.request_id = Some(Uuid::new_v4());
            snapshot
        })
        .collect();

    let result = diff(&updated.endpoints, &stored, &updated.security_schemes);

    // GET /orders gained a query parameter
    assert_eq!(result.changed_endpoints.len(), 1);
    assert_eq!(result.changed_endpoints[0].id, "GET /orders");

    // POST /orders is untouched
    assert_eq!(result.unchanged_endpoints.len(), 1);
    assert_eq!(result.unchanged_endpoints[0].id, "POST /orders");

    // GET /orders/{{id}} vanished from the updated spec
    assert_eq!(result.removed_endpoints.len(), 1);
    assert_eq!(result.removed_endpoints[0].id, "GET /orders/{{id}}");

    // POST /orders/{{id}}/refund is new
    assert_eq!(result.new_endpoints.len(), 1);
    assert_eq!(result.new_endpoints[0].identity(), "POST /orders/{{id}}/refund");
}

#[test]
fn test_reimport_of_same_spec_is_clean() {
    let spec = parse(ORIGINAL.as_bytes()).unwrap();
    let stored: Vec<_> = spec
        .endpoints
        .iter()
        .map(|e| {
            let mut snapshot = snapshot_from_endpoint(e, &spec.security_schemes);
            snapshot.request_id = Some(Uuid::new_v4());
            snapshot
        })
        .collect();

    let result = diff(&spec.endpoints, &stored, &spec.security_schemes);
    assert!(result.is_clean());
    assert_eq!(result.unchanged_endpoints.len(), spec.endpoints.len());
}

#[test]
fn test_auth_description_flows_into_snapshots() {
    let spec = parse(ORIGINAL.as_bytes()).unwrap();
    let snapshot = snapshot_from_endpoint(&spec.endpoints[0], &spec.security_schemes);
    assert_eq!(snapshot.auth_description.as_deref(), Some("Bearer Token"));
}
