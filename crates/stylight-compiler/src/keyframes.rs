//! `@keyframes` rendering.

use crate::properties::render_declarations;
use crate::CompileError;
use stylight_descriptor::{KeyframesRule, KeyframesStep};

/// Render a keyframes rule as one complete at-rule.
///
/// ```text
/// @keyframes fade{from {opacity:0}to {opacity:1}}
/// @keyframes pulse{25% {opacity:.5}75% {opacity:1}}
/// ```
pub fn render_keyframes(rule: &KeyframesRule) -> Result<String, CompileError> {
    let mut out = format!("@keyframes {}{{", rule.name);

    for step in &rule.steps {
        match step {
            KeyframesStep::FromTo { from, to } => {
                out.push_str(&format!("from {{{}}}", render_declarations(from)?));
                out.push_str(&format!("to {{{}}}", render_declarations(to)?));
            }
            KeyframesStep::Percentage { percentage, css } => {
                out.push_str(&format!("{percentage}% {{{}}}", render_declarations(css)?));
            }
        }
    }

    out.push('}');
    Ok(out)
}
