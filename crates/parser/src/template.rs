//! Path template conversion
//!
//! Rewrites brace-style OpenAPI path parameters (`/users/{id}`) into the
//! double-brace interpolation form used by stored requests
//! (`/users/{{id}}`). Total function: a path with no braces is returned
//! unchanged, and an already-converted path passes through untouched.

/// Convert every `{name}` segment to `{{name}}`.
pub fn convert_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];

        if let Some(inner) = after.strip_prefix("{{") {
            // Already converted, copy the whole segment through.
            if let Some(close) = inner.find("}}") {
                out.push_str(&after[..close + 4]);
                rest = &inner[close + 2..];
                continue;
            }
        } else if let Some(close) = after.find('}') {
            out.push_str("{{");
            out.push_str(&after[1..close]);
            out.push_str("}}");
            rest = &after[close + 1..];
            continue;
        }

        // Unbalanced brace, keep the remainder verbatim.
        out.push_str(after);
        return out;
    }

    out.push_str(rest);
    out
}
