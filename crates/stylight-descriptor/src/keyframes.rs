//! Keyframe animation rules.

use crate::{DescriptorError, StyleDescriptor, Value};

/// One step of a keyframes rule.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyframesStep {
    /// `{ from: {...}, to: {...} }`
    FromTo {
        from: StyleDescriptor,
        to: StyleDescriptor,
    },
    /// `{ percentage: "25", css: {...} }`
    Percentage {
        percentage: String,
        css: StyleDescriptor,
    },
}

/// A named `@keyframes` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesRule {
    pub name: String,
    pub steps: Vec<KeyframesStep>,
}

impl KeyframesRule {
    pub fn list_from_value(value: &Value, path: &str) -> Result<Vec<Self>, DescriptorError> {
        let items = value.as_list().ok_or_else(|| {
            DescriptorError::new(
                path,
                format!("expected a list of keyframes rules, found {}", value.shape()),
            )
        })?;

        items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_absent())
            .map(|(i, item)| Self::from_value(item, &format!("{path}[{i}]")))
            .collect()
    }

    pub fn from_value(value: &Value, path: &str) -> Result<Self, DescriptorError> {
        let rule = value.as_block().ok_or_else(|| {
            DescriptorError::new(
                path,
                format!("expected a keyframes rule, found {}", value.shape()),
            )
        })?;

        let name = rule
            .get("name")
            .and_then(Value::as_literal)
            .map(|lit| lit.to_css())
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| DescriptorError::new(path, "keyframes rule without a `name`"))?;

        let steps_path = format!("{path}.steps");
        let steps = rule
            .get("steps")
            .and_then(Value::as_list)
            .ok_or_else(|| {
                DescriptorError::new(&steps_path, "expected a list of keyframes steps")
            })?;

        let steps = steps
            .iter()
            .enumerate()
            .filter(|(_, step)| !step.is_absent())
            .map(|(i, step)| parse_step(step, &format!("{steps_path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, steps })
    }
}

fn parse_step(value: &Value, path: &str) -> Result<KeyframesStep, DescriptorError> {
    let step = value.as_block().ok_or_else(|| {
        DescriptorError::new(
            path,
            format!("expected a keyframes step, found {}", value.shape()),
        )
    })?;

    let block = |key: &str| -> Result<Option<StyleDescriptor>, DescriptorError> {
        match step.get(key) {
            None | Some(Value::Absent) => Ok(None),
            Some(Value::Block(b)) => Ok(Some(b.clone())),
            Some(other) => Err(DescriptorError::new(
                format!("{path}.{key}"),
                format!("expected a property mapping, found {}", other.shape()),
            )),
        }
    };

    if let Some(percentage) = step.get("percentage").and_then(Value::as_literal) {
        let css = block("css")?
            .ok_or_else(|| DescriptorError::new(path, "percentage step without a `css` mapping"))?;
        let percentage = percentage.to_css();
        let percentage = percentage.trim_end_matches('%').to_string();
        return Ok(KeyframesStep::Percentage { percentage, css });
    }

    match (block("from")?, block("to")?) {
        (Some(from), Some(to)) => Ok(KeyframesStep::FromTo { from, to }),
        _ => Err(DescriptorError::new(
            path,
            "keyframes step needs either `from` and `to` or `percentage` and `css`",
        )),
    }
}
