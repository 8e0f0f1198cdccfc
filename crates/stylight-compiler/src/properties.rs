//! CSS property rendering.
//!
//! Turns flat property mappings into declaration text. Keys written in
//! camelCase become kebab-case; values are copied verbatim.

use crate::CompileError;
use stylight_descriptor::{Literal, StyleDescriptor, Value};

/// Convert a camelCase property key to its CSS name.
///
/// `msFoo` is the one prefix written without a leading capital, so it maps to
/// `-ms-foo` rather than `ms-foo`. Keys that are already kebab-case pass
/// through unchanged.
pub fn property_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);

    if is_ms_prefixed(key) {
        name.push('-');
    }

    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }

    name
}

fn is_ms_prefixed(key: &str) -> bool {
    key.strip_prefix("ms")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Render one `name:value` pair.
pub fn render_declaration(key: &str, value: &Literal) -> String {
    format!("{}:{}", property_name(key), value.to_css())
}

/// Render a whole mapping as `name:value` pairs joined with `;`.
///
/// Absent values are skipped. Nested mappings are rejected.
pub fn render_declarations(mapping: &StyleDescriptor) -> Result<String, CompileError> {
    let mut parts = Vec::with_capacity(mapping.len());

    for (key, value) in mapping.iter() {
        match value {
            Value::Absent => {}
            Value::Literal(lit) => parts.push(render_declaration(key, lit)),
            other => {
                return Err(CompileError::UnexpectedValue {
                    key: key.to_string(),
                    expected: "a literal property value",
                    found: other.shape(),
                })
            }
        }
    }

    Ok(parts.join(";"))
}
