//! Isolated stylesheets and class picking.
//!
//! A [`StyleSheet`] binds a descriptor to one resolved seed, so the class
//! names handed out by [`StyleSheet::styled_class`] always match the
//! selectors produced by [`StyleSheet::render`].

use stylight_descriptor::StyleDescriptor;

use crate::directive::is_reserved_key;
use crate::plan::{build_plan, Plan};
use crate::seed::{resolve_seed, SeedFn, SeedSpec};
use crate::{emit, CompileError};

/// Join the present tokens with a space.
pub fn styled_class(tokens: &[Option<&str>]) -> String {
    tokens.iter().flatten().copied().collect::<Vec<_>>().join(" ")
}

/// A descriptor bound to its seed.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    descriptor: StyleDescriptor,
    seed: SeedFn,
}

impl StyleSheet {
    pub fn new(descriptor: StyleDescriptor, seed: impl Into<SeedSpec>) -> Self {
        Self {
            descriptor,
            seed: resolve_seed(seed.into()),
        }
    }

    pub fn descriptor(&self) -> &StyleDescriptor {
        &self.descriptor
    }

    pub fn seed(&self) -> &SeedFn {
        &self.seed
    }

    /// The class name for `token`: seeded when it names a top-level rule of
    /// this sheet, unchanged otherwise.
    pub fn class_name(&self, token: &str) -> String {
        if self.descriptor.contains_key(token) && !is_reserved_key(token) {
            self.seed.apply(token)
        } else {
            token.to_string()
        }
    }

    /// Class attribute value for a list of optional tokens.
    pub fn styled_class(&self, tokens: &[Option<&str>]) -> String {
        let names: Vec<String> = tokens.iter().flatten().map(|t| self.class_name(t)).collect();
        names.join(" ")
    }

    pub fn explain(&self) -> Result<Plan, CompileError> {
        build_plan(&self.descriptor, &self.seed)
    }

    pub fn render(&self) -> Result<String, CompileError> {
        Ok(emit(&self.explain()?))
    }

    /// A new sheet with `extension`'s entries added after this sheet's own.
    /// Keys present in both take the extension's value in their original
    /// position. The seed carries over.
    pub fn extend(&self, extension: StyleDescriptor) -> Self {
        let mut descriptor = self.descriptor.clone();
        descriptor.merge(extension);
        Self {
            descriptor,
            seed: self.seed.clone(),
        }
    }
}
