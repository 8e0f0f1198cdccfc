//! Classification of descriptor keys.
//!
//! Every entry of a descriptor is either one of the reserved directives or a
//! plain member: a top-level rule under the global scope, a declaration
//! everywhere else.

use crate::CompileError;
use stylight_descriptor::{KeyframesRule, MediaQuery, StyleDescriptor, Value};

/// Prefix of keys that nest a selector under the enclosing scope.
pub const NESTING_MARKER: char = '&';

/// Prefix added to top-level rule names.
pub const SELECTOR_QUALIFIER: char = '.';

pub const AT_RULES: &str = "atRules";
pub const KEYFRAMES: &str = "keyframes";
pub const MIXINS: &str = "mixins";
pub const MEDIA: &str = "media";
pub const OVERRIDES: &str = "overrides";

/// A classified descriptor entry.
#[derive(Debug)]
pub enum Directive<'a> {
    /// `atRules: ["@import ..."]`
    AtRules(Vec<String>),
    /// `keyframes: [{ name, steps }]`
    Keyframes(Vec<KeyframesRule>),
    /// `mixins: { body: {...} }`
    Mixins(&'a StyleDescriptor),
    /// `media: [{ "max-width": "...", css: {...} }]`
    Media(Vec<MediaQuery>),
    /// `overrides: [{...}, {...}]`
    Overrides(Vec<&'a StyleDescriptor>),
    /// `"& div": {...}`
    Nested {
        suffix: &'a str,
        body: &'a StyleDescriptor,
    },
    /// Anything else.
    Member { key: &'a str, value: &'a Value },
}

impl<'a> Directive<'a> {
    /// Classify one entry. `path` locates the entry for error messages.
    pub fn classify(key: &'a str, value: &'a Value, path: &str) -> Result<Self, CompileError> {
        let directive = match key {
            AT_RULES => Directive::AtRules(
                list(key, value)?
                    .iter()
                    .filter(|item| !item.is_absent())
                    .map(|item| {
                        item.as_literal()
                            .map(|lit| lit.to_css())
                            .ok_or_else(|| unexpected(key, "a list of at-rule strings", item))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            KEYFRAMES => Directive::Keyframes(KeyframesRule::list_from_value(value, path)?),
            MIXINS => Directive::Mixins(block(key, value, "a mapping of mixin names")?),
            MEDIA => Directive::Media(MediaQuery::list_from_value(value, path)?),
            OVERRIDES => Directive::Overrides(
                list(key, value)?
                    .iter()
                    .filter(|item| !item.is_absent())
                    .map(|item| block(key, item, "a list of property mappings"))
                    .collect::<Result<_, _>>()?,
            ),
            _ => match key.strip_prefix(NESTING_MARKER) {
                Some(suffix) => {
                    if suffix.trim().is_empty() {
                        return Err(CompileError::InvalidNesting { key: key.to_string() });
                    }
                    Directive::Nested {
                        suffix,
                        body: block(key, value, "a nested rule body")?,
                    }
                }
                None => Directive::Member { key, value },
            },
        };

        Ok(directive)
    }
}

/// True for keys that never name a top-level rule.
pub fn is_reserved_key(key: &str) -> bool {
    matches!(key, AT_RULES | KEYFRAMES | MIXINS | MEDIA | OVERRIDES)
        || key.starts_with(NESTING_MARKER)
}

fn list<'a>(key: &str, value: &'a Value) -> Result<&'a [Value], CompileError> {
    value.as_list().ok_or_else(|| unexpected(key, "a list", value))
}

fn block<'a>(
    key: &str,
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a StyleDescriptor, CompileError> {
    value.as_block().ok_or_else(|| unexpected(key, expected, value))
}

fn unexpected(key: &str, expected: &'static str, value: &Value) -> CompileError {
    CompileError::UnexpectedValue {
        key: key.to_string(),
        expected,
        found: value.shape(),
    }
}
