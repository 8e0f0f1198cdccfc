//! Stylesheet emission.
//!
//! Walks a finished plan depth-first and writes one block per scope that has
//! declarations. Selectors accumulate along the path from the nearest global
//! or media boundary; media children already carry full selectors, so the
//! prefix restarts inside a media block.

use crate::plan::{Plan, ScopeId, ScopeKind};

/// Serialize a plan into stylesheet text.
pub fn emit(plan: &Plan) -> String {
    let mut out = String::new();
    emit_scope(plan, plan.root(), "", &mut out);
    log::debug!("emitted {} bytes from {} scopes", out.len(), plan.len());
    out
}

fn emit_scope(plan: &Plan, id: ScopeId, prefix: &str, out: &mut String) {
    let scope = plan.node(id);

    match scope.kind() {
        ScopeKind::Global => {
            for declaration in scope.declarations() {
                out.push_str(declaration);
            }
            for child in scope.children() {
                emit_scope(plan, *child, "", out);
            }
        }
        ScopeKind::Media => {
            out.push_str(scope.fragment());
            out.push('{');
            for child in scope.children() {
                emit_scope(plan, *child, "", out);
            }
            out.push('}');
        }
        ScopeKind::Element | ScopeKind::Nested | ScopeKind::Mixin => {
            let selector = format!("{prefix}{}", scope.fragment());

            if !scope.declarations().is_empty() {
                out.push_str(&selector);
                out.push_str(" {");
                out.push_str(&scope.declarations().join(";"));
                out.push('}');
            }

            for child in scope.children() {
                emit_scope(plan, *child, &selector, out);
            }
        }
    }
}
