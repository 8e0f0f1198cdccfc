//! WASM bindings for the stylight compiler.
//!
//! Exposes rendering, plan inspection and class picking to JavaScript via
//! wasm-bindgen. Style descriptors are passed as plain JS objects; key order
//! is taken from the object's own enumeration order.

use stylight_compiler::{CompileError, SeedSpec, StyleSheet};
use stylight_descriptor::StyleDescriptor;
use wasm_bindgen::prelude::*;

/// Render a style descriptor to a stylesheet string.
///
/// `seed` is an optional string prefix; without it rule names are used as-is.
/// Throws a JS error if the descriptor is malformed.
#[wasm_bindgen]
pub fn render(source: JsValue, seed: Option<String>) -> Result<String, JsError> {
    let descriptor = descriptor_from_js(source)?;
    render_descriptor(descriptor, seed).map_err(|e| JsError::new(&e.to_string()))
}

/// Build the plan for a style descriptor and return it as a JS object tree
/// `{ kind, fragment, declarations?, children? }`.
#[wasm_bindgen]
pub fn explain(source: JsValue, seed: Option<String>) -> Result<JsValue, JsError> {
    let descriptor = descriptor_from_js(source)?;
    let plan = StyleSheet::new(descriptor, SeedSpec::from(seed))
        .explain()
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&plan.view()).map_err(|e| JsError::new(&e.to_string()))
}

/// Class attribute value for `tokens`, seeded the same way `render` seeds
/// selectors. Non-string tokens (`null`, `undefined`, `false`) are dropped.
#[wasm_bindgen(js_name = styledClass)]
pub fn styled_class(
    source: JsValue,
    seed: Option<String>,
    tokens: js_sys::Array,
) -> Result<String, JsError> {
    let sheet = StyleSheet::new(descriptor_from_js(source)?, SeedSpec::from(seed));
    let tokens: Vec<Option<String>> = tokens.iter().map(|t| t.as_string()).collect();
    Ok(pick_classes(&sheet, &tokens))
}

/// The seeded identifier for a single rule name.
#[wasm_bindgen(js_name = seedClass)]
pub fn seed_class(seed: Option<String>, name: &str) -> String {
    stylight_compiler::resolve_seed(SeedSpec::from(seed)).apply(name)
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn descriptor_from_js(source: JsValue) -> Result<StyleDescriptor, JsError> {
    serde_wasm_bindgen::from_value(source)
        .map_err(|e| JsError::new(&format!("Invalid style descriptor: {e}")))
}

fn render_descriptor(
    descriptor: StyleDescriptor,
    seed: Option<String>,
) -> Result<String, CompileError> {
    StyleSheet::new(descriptor, SeedSpec::from(seed)).render()
}

fn pick_classes(sheet: &StyleSheet, tokens: &[Option<String>]) -> String {
    let tokens: Vec<Option<&str>> = tokens.iter().map(Option::as_deref).collect();
    sheet.styled_class(&tokens)
}
