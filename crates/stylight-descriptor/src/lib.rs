//! Stylight Descriptor
//!
//! The input model of the stylight compiler: a nested, ordered mapping from
//! rule names (top level) or property names (leaves) to literal values or
//! further mappings. Reserved keys (`media`, `mixins`, `overrides`, ...) are
//! plain entries here; their meaning is assigned by the compiler.
//!
//! Descriptors deserialize from any serde format and keep source key order,
//! which decides emission order later on.
//!
//! # Example
//!
//! ```
//! use stylight_descriptor::{StyleDescriptor, Value};
//!
//! let menu = StyleDescriptor::new().with("border", "1px solid #000");
//! let sheet = StyleDescriptor::new().with("menu", menu);
//! assert!(matches!(sheet.get("menu"), Some(Value::Block(_))));
//! ```

pub mod keyframes;
pub mod media;
pub mod value;

pub use keyframes::{KeyframesRule, KeyframesStep};
pub use media::MediaQuery;
pub use value::{Literal, StyleDescriptor, Value};

/// A directive payload that does not have the shape its directive needs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Descriptor error at `{path}`: {message}")]
pub struct DescriptorError {
    pub message: String,
    pub path: String,
}

impl DescriptorError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}
