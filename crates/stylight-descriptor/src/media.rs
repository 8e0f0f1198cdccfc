//! Media query descriptors.
//!
//! A `media` entry is a list of mappings. Every key except `css` is a media
//! feature; an empty value marks a boolean feature such as `all` or `print`.

use crate::{DescriptorError, StyleDescriptor, Value};

/// The key holding the nested rule body of a media entry.
pub const CSS_PAYLOAD_KEY: &str = "css";

/// One parsed entry of a `media` list.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    /// Feature predicates in source order.
    pub features: Vec<(String, String)>,
    pub css: StyleDescriptor,
}

impl MediaQuery {
    /// Parse a whole `media` list.
    pub fn list_from_value(value: &Value, path: &str) -> Result<Vec<Self>, DescriptorError> {
        let items = value.as_list().ok_or_else(|| {
            DescriptorError::new(
                path,
                format!("expected a list of media queries, found {}", value.shape()),
            )
        })?;

        items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_absent())
            .map(|(i, item)| Self::from_value(item, &format!("{path}[{i}]")))
            .collect()
    }

    /// Parse one media query mapping.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, DescriptorError> {
        let entry = value.as_block().ok_or_else(|| {
            DescriptorError::new(
                path,
                format!("expected a media query mapping, found {}", value.shape()),
            )
        })?;

        let mut features = Vec::new();
        let mut css = None;

        for (key, value) in entry.iter() {
            if key == CSS_PAYLOAD_KEY {
                let block = value.as_block().ok_or_else(|| {
                    DescriptorError::new(
                        format!("{path}.{key}"),
                        format!("expected a rule body, found {}", value.shape()),
                    )
                })?;
                css = Some(block.clone());
                continue;
            }

            match value {
                Value::Absent => {}
                Value::Literal(lit) => features.push((key.to_string(), lit.to_css())),
                other => {
                    return Err(DescriptorError::new(
                        format!("{path}.{key}"),
                        format!("media feature value must be a literal, found {}", other.shape()),
                    ))
                }
            }
        }

        let css =
            css.ok_or_else(|| DescriptorError::new(path, "media query without a `css` payload"))?;

        Ok(Self { features, css })
    }

    /// Canonical `@media` prelude: features sorted by name, joined with `and`.
    ///
    /// Two queries with the same predicate set produce the same target
    /// regardless of the order their features were written in.
    pub fn target(&self) -> String {
        let mut features: Vec<&(String, String)> = self.features.iter().collect();
        features.sort_by(|a, b| a.0.cmp(&b.0));

        let predicates: Vec<String> = features
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    format!("({name})")
                } else {
                    format!("({name}:{value})")
                }
            })
            .collect();

        format!("@media {}", predicates.join(" and "))
    }
}
