//! Parameter list merging
//!
//! A path item and each of its operations may both declare parameter lists;
//! the lists merge under override-by-key semantics where the uniqueness key
//! is `(name, in)` and the operation level wins on collision. Entries that
//! are unresolved `$ref` pointers carry a reference marker instead of inline
//! fields; they are skipped and counted, never merged.

use openapi_importer_common::Parameter;
use serde_json::Value;

/// Merge path-level and operation-level raw parameter entries.
///
/// Returns the merged list and the number of skipped unresolved references.
pub fn merge_parameters(
    path_level: &[Value],
    operation_level: &[Value],
) -> (Vec<Parameter>, usize) {
    let mut merged: Vec<Parameter> = Vec::new();
    let mut skipped = 0;

    for raw in path_level.iter().chain(operation_level) {
        match inline_parameter(raw) {
            Some(param) => {
                let slot = merged
                    .iter_mut()
                    .find(|p| p.name == param.name && p.location == param.location);
                match slot {
                    Some(existing) => *existing = param,
                    None => merged.push(param),
                }
            }
            None => skipped += 1,
        }
    }

    (merged, skipped)
}

/// Extract an inline parameter. Returns `None` for entries lacking a
/// resolvable `name`/`in` pair, i.e. unresolved references.
fn inline_parameter(raw: &Value) -> Option<Parameter> {
    let obj = raw.as_object()?;
    let name = obj.get("name")?.as_str()?;
    let location = obj.get("in")?.as_str()?;
    Some(Parameter {
        name: name.to_string(),
        location: location.to_string(),
    })
}
