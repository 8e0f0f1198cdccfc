//! Stylight Compiler
//!
//! Compiles a nested style descriptor into a flat stylesheet in two phases:
//! the builder classifies every key and grows a scope tree (the plan), the
//! emitter walks the finished tree and serializes it.
//!
//! ```text
//! StyleDescriptor → build_plan() → Plan → emit() → String
//! ```
//!
//! # Example
//!
//! ```
//! use stylight_compiler::{render_stylesheet, SeedSpec};
//! use stylight_descriptor::StyleDescriptor;
//!
//! let sheet = StyleDescriptor::new()
//!     .with("menu", StyleDescriptor::new().with("border", "1px solid #000"));
//! let css = render_stylesheet(&sheet, SeedSpec::Identity).unwrap();
//! assert_eq!(css, ".menu {border:1px solid #000}");
//! ```

pub mod directive;
pub mod emit;
pub mod keyframes;
pub mod plan;
pub mod properties;
pub mod seed;
pub mod sheet;

pub use emit::emit;
pub use plan::{build_plan, Plan, PlanView, Scope, ScopeId, ScopeKind};
pub use seed::{resolve_seed, SeedFn, SeedSpec};
pub use sheet::{styled_class, StyleSheet};

use stylight_descriptor::{DescriptorError, StyleDescriptor};

/// Errors raised while building a plan. Any of them aborts the compilation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// A hoisting directive found no ancestor scope of the kind it needs.
    #[error("`{directive}` has no enclosing {required} scope to attach to")]
    OrphanedScope {
        directive: &'static str,
        required: &'static str,
    },

    /// A `&` key without a selector suffix.
    #[error("Invalid nesting key `{key}`: expected a selector after `&`")]
    InvalidNesting { key: String },

    #[error("`{directive}` is not supported inside a media query payload")]
    UnsupportedNesting { directive: &'static str },

    #[error("Unexpected value for `{key}`: expected {expected}, found {found}")]
    UnexpectedValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Build the plan for a descriptor without serializing it.
pub fn explain_stylesheet(
    descriptor: &StyleDescriptor,
    seed: impl Into<SeedSpec>,
) -> Result<Plan, CompileError> {
    build_plan(descriptor, &resolve_seed(seed.into()))
}

/// Serialize a previously built plan.
pub fn render_explained(plan: &Plan) -> String {
    emit(plan)
}

/// Build and serialize in one go.
pub fn render_stylesheet(
    descriptor: &StyleDescriptor,
    seed: impl Into<SeedSpec>,
) -> Result<String, CompileError> {
    let plan = explain_stylesheet(descriptor, seed)?;
    Ok(emit(&plan))
}
