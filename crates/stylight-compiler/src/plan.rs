//! Scope tree construction.
//!
//! The plan is an arena of scopes addressed by [`ScopeId`]. Children are
//! owned by the arena and listed by their parent in first-seen order; each
//! scope keeps its parent id for upward lookups only.
//!
//! Keys are processed strictly in the order they appear in the descriptor.
//! Hoisting directives (`atRules`, `keyframes`, `mixins`, `media`) attach
//! their output to an ancestor scope instead of the current one:
//!
//! ```text
//! Global
//! ├── Element ".menu"          { width:600px }
//! │   └── Nested " div"        { position:relative }
//! ├── Media "@media (max-width:1280px)"
//! │   ├── Element ".menu"      { width:400px }
//! │   └── Element ".menu div"  { position:absolute }
//! └── Mixin "body"             { margin:0 }
//! ```

use std::collections::HashMap;

use serde::Serialize;
use stylight_descriptor::{StyleDescriptor, Value};

use crate::directive::{Directive, AT_RULES, KEYFRAMES, MEDIA, MIXINS, SELECTOR_QUALIFIER};
use crate::keyframes::render_keyframes;
use crate::properties::{render_declaration, render_declarations};
use crate::seed::SeedFn;
use crate::CompileError;

/// Stable handle of a scope inside its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(usize);

/// What a scope contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// A top-level rule, or a rule hosted inside a media block.
    Element,
    /// A `&` selector appended to its parent's selector.
    Nested,
    /// An `@media` block.
    Media,
    /// A rule emitted without a selector qualifier.
    Mixin,
    /// The stylesheet root.
    Global,
}

/// One node of the plan.
#[derive(Debug, Clone)]
pub struct Scope {
    fragment: String,
    parent: Option<ScopeId>,
    kind: ScopeKind,
    children: Vec<ScopeId>,
    index: HashMap<String, ScopeId>,
    declarations: Vec<String>,
}

impl Scope {
    fn new(kind: ScopeKind, fragment: String, parent: Option<ScopeId>) -> Self {
        Self {
            fragment,
            parent,
            kind,
            children: Vec::new(),
            index: HashMap::new(),
            declarations: Vec::new(),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Children in first-seen order.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }
}

/// A built scope tree, ready to be emitted any number of times.
#[derive(Debug, Clone)]
pub struct Plan {
    scopes: Vec<Scope>,
    root: ScopeId,
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan {
    /// An empty plan rooted at the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global, String::new(), None)],
            root: ScopeId(0),
        }
    }

    /// An empty plan rooted at a single rule.
    ///
    /// Useful to compile one rule body on its own. Such a plan has no global
    /// scope, so hoisting directives inside it fail with
    /// [`CompileError::OrphanedScope`].
    pub fn scoped(fragment: impl Into<String>) -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Element, fragment.into(), None)],
            root: ScopeId(0),
        }
    }

    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// The scope behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this plan.
    pub fn node(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.len() == 1
            && self.scopes[0].children.is_empty()
            && self.scopes[0].declarations.is_empty()
    }

    /// The child of `id` keyed by `key`.
    pub fn child(&self, id: ScopeId, key: &str) -> Option<ScopeId> {
        self.node(id).index.get(key).copied()
    }

    /// Follow a path of child keys from the root.
    pub fn lookup(&self, path: &[&str]) -> Option<ScopeId> {
        path.iter()
            .try_fold(self.root, |id, key| self.child(id, key))
    }

    /// A borrowed, serializable snapshot of the whole tree.
    pub fn view(&self) -> PlanView<'_> {
        self.view_of(self.root)
    }

    fn view_of(&self, id: ScopeId) -> PlanView<'_> {
        let scope = self.node(id);
        PlanView {
            kind: scope.kind,
            fragment: &scope.fragment,
            declarations: &scope.declarations,
            children: scope.children.iter().map(|c| self.view_of(*c)).collect(),
        }
    }

    /// Build `descriptor` into the scope `target` of this plan.
    pub fn build_into(
        &mut self,
        target: ScopeId,
        descriptor: &StyleDescriptor,
        seed: &SeedFn,
    ) -> Result<(), CompileError> {
        let path = self.node(target).fragment.clone();
        self.build_scope(target, descriptor, seed, &path)
    }

    // =========================================================================
    // Builder
    // =========================================================================

    fn build_scope(
        &mut self,
        ctx: ScopeId,
        descriptor: &StyleDescriptor,
        seed: &SeedFn,
        path: &str,
    ) -> Result<(), CompileError> {
        for (key, value) in descriptor.iter() {
            if value.is_absent() {
                continue;
            }

            let key_path = join_path(path, key);

            match Directive::classify(key, value, &key_path)? {
                Directive::AtRules(rules) => {
                    let host = self.global_ancestor(ctx, AT_RULES)?;
                    for rule in rules {
                        self.push_declaration(host, terminate_statement(&rule));
                    }
                }
                Directive::Keyframes(rules) => {
                    let host = self.global_ancestor(ctx, KEYFRAMES)?;
                    for rule in &rules {
                        let rendered = render_keyframes(rule)?;
                        self.push_declaration(host, rendered);
                    }
                }
                Directive::Mixins(mixins) => {
                    let host = self.mixin_host(ctx)?;
                    for (name, body) in mixins.iter() {
                        if body.is_absent() {
                            continue;
                        }
                        let body = body.as_block().ok_or_else(|| CompileError::UnexpectedValue {
                            key: name.to_string(),
                            expected: "a mixin rule body",
                            found: body.shape(),
                        })?;
                        let scope = self.child_or_insert(host, ScopeKind::Mixin, name);
                        self.build_scope(scope, body, seed, &join_path(&key_path, name))?;
                    }
                }
                Directive::Media(queries) => {
                    if self.within_media(ctx) {
                        return Err(CompileError::UnsupportedNesting { directive: MEDIA });
                    }
                    if self.node(ctx).kind == ScopeKind::Global {
                        return Err(CompileError::OrphanedScope {
                            directive: MEDIA,
                            required: "rule",
                        });
                    }
                    let global = self.global_ancestor(ctx, MEDIA)?;
                    let selector = self.qualified_selector(ctx);
                    for (i, query) in queries.iter().enumerate() {
                        let media = self.child_or_insert(global, ScopeKind::Media, &query.target());
                        let scope = self.child_or_insert(media, ScopeKind::Element, &selector);
                        self.build_scope(scope, &query.css, seed, &format!("{key_path}[{i}].css"))?;
                    }
                }
                Directive::Overrides(entries) => {
                    for entry in entries {
                        let rendered = render_declarations(entry)?;
                        if !rendered.is_empty() {
                            self.push_declaration(ctx, rendered);
                        }
                    }
                }
                Directive::Nested { suffix, body } => {
                    let scope = self.child_or_insert(ctx, ScopeKind::Nested, suffix);
                    self.build_scope(scope, body, seed, &key_path)?;
                }
                Directive::Member { key, value } => {
                    self.build_member(ctx, key, value, seed, &key_path)?
                }
            }
        }

        Ok(())
    }

    /// A rule under the global scope, a declaration anywhere else.
    fn build_member(
        &mut self,
        ctx: ScopeId,
        key: &str,
        value: &Value,
        seed: &SeedFn,
        path: &str,
    ) -> Result<(), CompileError> {
        if self.node(ctx).kind == ScopeKind::Global {
            let body = value.as_block().ok_or_else(|| CompileError::UnexpectedValue {
                key: key.to_string(),
                expected: "a rule body",
                found: value.shape(),
            })?;
            let fragment = format!("{SELECTOR_QUALIFIER}{}", seed.apply(key));
            let scope = self.child_or_insert(ctx, ScopeKind::Element, &fragment);
            return self.build_scope(scope, body, seed, path);
        }

        let literal = value.as_literal().ok_or_else(|| CompileError::UnexpectedValue {
            key: key.to_string(),
            expected: "a literal property value",
            found: value.shape(),
        })?;
        self.push_declaration(ctx, render_declaration(key, literal));
        Ok(())
    }

    fn child_or_insert(&mut self, parent: ScopeId, kind: ScopeKind, fragment: &str) -> ScopeId {
        if let Some(id) = self.child(parent, fragment) {
            return id;
        }

        let id = ScopeId(self.scopes.len());
        log::trace!("new {kind:?} scope `{fragment}` under {parent:?}");
        self.scopes.push(Scope::new(kind, fragment.to_string(), Some(parent)));

        let parent = &mut self.scopes[parent.0];
        parent.children.push(id);
        parent.index.insert(fragment.to_string(), id);
        id
    }

    fn push_declaration(&mut self, id: ScopeId, declaration: String) {
        self.scopes[id.0].declarations.push(declaration);
    }

    fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id), |id| self.node(*id).parent)
    }

    fn global_ancestor(
        &self,
        ctx: ScopeId,
        directive: &'static str,
    ) -> Result<ScopeId, CompileError> {
        self.ancestors(ctx)
            .find(|id| self.node(*id).kind == ScopeKind::Global)
            .ok_or(CompileError::OrphanedScope {
                directive,
                required: "global",
            })
    }

    /// Global and mixin scopes host mixins themselves; anything else defers
    /// to the nearest global or media ancestor.
    fn mixin_host(&self, ctx: ScopeId) -> Result<ScopeId, CompileError> {
        if matches!(self.node(ctx).kind, ScopeKind::Global | ScopeKind::Mixin) {
            return Ok(ctx);
        }

        let host = self
            .ancestors(ctx)
            .skip(1)
            .find(|id| matches!(self.node(*id).kind, ScopeKind::Global | ScopeKind::Media));

        log::trace!("mixins from {ctx:?} hosted at {host:?}");

        host.ok_or(CompileError::OrphanedScope {
            directive: MIXINS,
            required: "global or media",
        })
    }

    fn within_media(&self, ctx: ScopeId) -> bool {
        self.ancestors(ctx).any(|id| self.node(id).kind == ScopeKind::Media)
    }

    /// The selector of `ctx` as the emitter writes it: its fragment prefixed
    /// by every nested ancestor's fragment, up to and including the first
    /// non-nested one. A mixin hosted by another mixin continues the walk.
    fn qualified_selector(&self, ctx: ScopeId) -> String {
        let mut fragments = Vec::new();

        for id in self.ancestors(ctx) {
            let scope = self.node(id);
            fragments.push(scope.fragment.as_str());
            let continues = match scope.kind {
                ScopeKind::Nested => true,
                ScopeKind::Mixin => scope
                    .parent
                    .is_some_and(|p| self.node(p).kind == ScopeKind::Mixin),
                _ => false,
            };
            if !continues {
                break;
            }
        }

        fragments.reverse();
        fragments.concat()
    }
}

/// Build a fresh plan for a descriptor.
pub fn build_plan(descriptor: &StyleDescriptor, seed: &SeedFn) -> Result<Plan, CompileError> {
    let mut plan = Plan::new();
    let root = plan.root();
    plan.build_into(root, descriptor, seed)?;
    log::debug!("built plan with {} scopes", plan.len());
    Ok(plan)
}

/// Statement at-rules such as `@import` need a terminator before the next rule.
fn terminate_statement(rule: &str) -> String {
    let rule = rule.trim_end();
    if rule.ends_with(';') || rule.ends_with('}') {
        rule.to_string()
    } else {
        format!("{rule};")
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Serializable snapshot of a plan, for inspection and `explain` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView<'a> {
    pub kind: ScopeKind,
    pub fragment: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub declarations: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlanView<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{resolve_seed, SeedSpec};
    use crate::test_support::descriptor;
    use pretty_assertions::assert_eq;

    fn plan(json: &str) -> Plan {
        build_plan(&descriptor(json), &SeedFn::identity()).unwrap()
    }

    fn build_err(json: &str) -> CompileError {
        build_plan(&descriptor(json), &SeedFn::identity()).unwrap_err()
    }

    fn scope<'a>(plan: &'a Plan, path: &[&str]) -> &'a Scope {
        let id = plan
            .lookup(path)
            .unwrap_or_else(|| panic!("Expected scope at {path:?}"));
        plan.node(id)
    }

    // =========================================================================
    // Rules and nesting
    // =========================================================================

    #[test]
    fn test_empty_plan() {
        let p = plan("{}");
        assert!(p.is_empty());
        assert_eq!(p.len(), 1);
        assert_eq!(p.node(p.root()).kind(), ScopeKind::Global);
    }

    #[test]
    fn test_simple_rule() {
        let p = plan(r##"{ "menu": { "border": "1px solid #000" } }"##);
        let menu = scope(&p, &[".menu"]);
        assert_eq!(menu.kind(), ScopeKind::Element);
        assert_eq!(menu.fragment(), ".menu");
        assert_eq!(menu.declarations(), &["border:1px solid #000".to_string()]);
        assert_eq!(menu.parent(), Some(p.root()));
    }

    #[test]
    fn test_nested_scopes() {
        let p = plan(
            r##"{ "menu": { "border": "1px solid #000", "& div": { "background": "red" }, "&.blue": { "background": "blue" } } }"##,
        );
        let div = scope(&p, &[".menu", " div"]);
        assert_eq!(div.kind(), ScopeKind::Nested);
        assert_eq!(div.fragment(), " div");
        assert_eq!(scope(&p, &[".menu", ".blue"]).fragment(), ".blue");
    }

    #[test]
    fn test_repeated_nesting_reuses_scope() {
        let mut p = plan(r#"{ "menu": { "& a": { "color": "red" } } }"#);
        let root = p.root();
        p.build_into(
            root,
            &descriptor(r#"{ "menu": { "& a": { "color": "blue" } } }"#),
            &SeedFn::identity(),
        )
        .unwrap();
        let a = scope(&p, &[".menu", " a"]);
        assert_eq!(a.declarations(), &["color:red".to_string(), "color:blue".to_string()]);
        assert_eq!(p.node(p.root()).children().len(), 1);
    }

    #[test]
    fn test_children_keep_first_seen_order() {
        let p = plan(r#"{ "zeta": { "a": "1" }, "alpha": { "a": "1" }, "mid": { "a": "1" } }"#);
        let fragments: Vec<&str> = p
            .node(p.root())
            .children()
            .iter()
            .map(|c| p.node(*c).fragment())
            .collect();
        assert_eq!(fragments, vec![".zeta", ".alpha", ".mid"]);
    }

    #[test]
    fn test_seeded_rule_fragment() {
        let seed = resolve_seed(SeedSpec::from("foo"));
        let p = build_plan(&descriptor(r#"{ "bar": { "margin": 0 } }"#), &seed).unwrap();
        assert!(p.lookup(&[".Zm9vYmFy"]).is_some());
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    #[test]
    fn test_overrides_are_separate_declarations() {
        let p = plan(
            r##"{ "menu": { "overrides": [{ "background": "#fff" }, { "background": "#000" }] } }"##,
        );
        assert_eq!(
            scope(&p, &[".menu"]).declarations(),
            &["background:#fff".to_string(), "background:#000".to_string()]
        );
    }

    #[test]
    fn test_override_entry_with_several_properties() {
        let p = plan(
            r#"{ "menu": { "overrides": [{ "background": "red", "WebkitBackgroundSize": "auto" }] } }"#,
        );
        assert_eq!(
            scope(&p, &[".menu"]).declarations(),
            &["background:red;-webkit-background-size:auto".to_string()]
        );
    }

    // =========================================================================
    // Mixins
    // =========================================================================

    #[test]
    fn test_mixins_at_global() {
        let p = plan(
            r#"{ "mixins": { "body": { "margin": "0" }, "a": { "textDecoration": "none" } } }"#,
        );
        assert_eq!(scope(&p, &["body"]).kind(), ScopeKind::Mixin);
        assert_eq!(scope(&p, &["a"]).kind(), ScopeKind::Mixin);
        assert_eq!(scope(&p, &["a"]).declarations(), &["text-decoration:none".to_string()]);
    }

    #[test]
    fn test_mixins_hoist_from_nested_scope() {
        let p = plan(r#"{ "menu": { "& a": { "mixins": { "a": { "color": "red" } } } } }"#);
        let a = scope(&p, &["a"]);
        assert_eq!(a.kind(), ScopeKind::Mixin);
        assert_eq!(a.parent(), Some(p.root()));
    }

    #[test]
    fn test_mixins_inside_mixin_stay_local() {
        let p = plan(r#"{ "mixins": { "a": { "mixins": { ":hover": { "color": "red" } } } } }"#);
        assert_eq!(scope(&p, &["a", ":hover"]).kind(), ScopeKind::Mixin);
    }

    #[test]
    fn test_mixins_inside_media_payload_hosted_by_media() {
        let p = plan(
            r#"{ "menu": { "media": [{ "print": "", "css": { "mixins": { "body": { "margin": 0 } } } }] } }"#,
        );
        assert_eq!(scope(&p, &["@media (print)", "body"]).kind(), ScopeKind::Mixin);
    }

    // =========================================================================
    // Media
    // =========================================================================

    #[test]
    fn test_media_scope() {
        let p = plan(
            r#"{ "menu": { "width": "600px", "media": [{ "max-width": "1280px", "css": { "width": "400px" } }] } }"#,
        );
        let media = scope(&p, &["@media (max-width:1280px)"]);
        assert_eq!(media.kind(), ScopeKind::Media);
        assert!(media.declarations().is_empty());
        assert_eq!(
            scope(&p, &["@media (max-width:1280px)", ".menu"]).declarations(),
            &["width:400px".to_string()]
        );
    }

    #[test]
    fn test_media_inside_nested_uses_qualified_selector() {
        let p = plan(
            r#"{ "menu": {
                "media": [{ "max-width": "1280px", "css": { "width": "400px" } }],
                "& div": { "media": [{ "max-width": "1280px", "css": { "position": "absolute" } }] }
            } }"#,
        );
        let media = p.lookup(&["@media (max-width:1280px)"]).unwrap();
        assert_eq!(p.node(media).children().len(), 2);
        assert_eq!(
            scope(&p, &["@media (max-width:1280px)", ".menu div"]).declarations(),
            &["position:absolute".to_string()]
        );
    }

    #[test]
    fn test_media_groups_regardless_of_key_order() {
        let p = plan(
            r#"{
                "foo": { "media": [{ "min-width": "600px", "max-width": "1280px", "css": { "a": "1" } }] },
                "bar": { "media": [{ "max-width": "1280px", "min-width": "600px", "css": { "a": "2" } }] }
            }"#,
        );
        let medias: Vec<ScopeId> = p
            .node(p.root())
            .children()
            .iter()
            .copied()
            .filter(|c| p.node(*c).kind() == ScopeKind::Media)
            .collect();
        assert_eq!(medias.len(), 1);
        assert_eq!(p.node(medias[0]).children().len(), 2);
    }

    #[test]
    fn test_media_in_mixin() {
        let p = plan(
            r#"{ "mixins": { "body": { "media": [{ "print": "", "css": { "margin": 0 } }] } } }"#,
        );
        assert_eq!(
            scope(&p, &["@media (print)", "body"]).declarations(),
            &["margin:0".to_string()]
        );
    }

    #[test]
    fn test_media_in_mixin_hosted_by_mixin() {
        let p = plan(
            r#"{ "mixins": { "a": { "mixins": {
                ":hover": { "color": "red", "media": [{ "print": "", "css": { "color": "black" } }] }
            } } } }"#,
        );
        assert_eq!(
            scope(&p, &["@media (print)", "a:hover"]).declarations(),
            &["color:black".to_string()]
        );
        assert!(p.lookup(&["@media (print)", ":hover"]).is_none());
    }

    #[test]
    fn test_media_inside_media_is_unsupported() {
        let err = build_err(
            r#"{ "menu": { "media": [{ "print": "", "css": { "media": [{ "all": "", "css": {} }] } }] } }"#,
        );
        assert_eq!(err, CompileError::UnsupportedNesting { directive: "media" });
    }

    #[test]
    fn test_media_at_global_is_orphaned() {
        let err = build_err(r#"{ "media": [{ "print": "", "css": {} }] }"#);
        assert!(matches!(err, CompileError::OrphanedScope { directive: "media", .. }));
    }

    // =========================================================================
    // Hoisting to the global scope
    // =========================================================================

    #[test]
    fn test_at_rules_hoist_to_global() {
        let p = plan(r#"{ "menu": { "& a": { "atRules": ["@import url(a.css)"] } } }"#);
        assert_eq!(p.node(p.root()).declarations(), &["@import url(a.css);".to_string()]);
        assert!(scope(&p, &[".menu", " a"]).declarations().is_empty());
    }

    #[test]
    fn test_keyframes_hoist_to_global() {
        let p = plan(
            r#"{ "foo": { "& div": { "keyframes": [{ "name": "spin", "steps": [{ "percentage": 100, "css": { "opacity": 1 } }] }] } } }"#,
        );
        assert_eq!(
            p.node(p.root()).declarations(),
            &["@keyframes spin{100% {opacity:1}}".to_string()]
        );
    }

    #[test]
    fn test_scoped_plan_rejects_hoisting() {
        let mut p = Plan::scoped(".card");
        let root = p.root();
        let err = p
            .build_into(root, &descriptor(r#"{ "atRules": ["@import x"] }"#), &SeedFn::identity())
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::OrphanedScope {
                directive: "atRules",
                required: "global",
            }
        );

        let err = p
            .build_into(root, &descriptor(r#"{ "mixins": { "body": {} } }"#), &SeedFn::identity())
            .unwrap_err();
        assert!(matches!(err, CompileError::OrphanedScope { directive: "mixins", .. }));
    }

    #[test]
    fn test_scoped_plan_declarations() {
        let mut p = Plan::scoped(".card");
        let root = p.root();
        p.build_into(
            root,
            &descriptor(r#"{ "margin": 0, "& p": { "color": "red" } }"#),
            &SeedFn::identity(),
        )
        .unwrap();
        assert_eq!(p.node(root).declarations(), &["margin:0".to_string()]);
        assert!(p.child(root, " p").is_some());
    }

    #[test]
    #[should_panic]
    fn test_node_rejects_id_from_other_plan() {
        let big = plan(r#"{ "menu": { "color": "red" } }"#);
        let foreign = big.lookup(&[".menu"]).unwrap();
        Plan::new().node(foreign);
    }

    // =========================================================================
    // Malformed descriptors
    // =========================================================================

    #[test]
    fn test_literal_at_global_is_rejected() {
        let err = build_err(r#"{ "color": "red" }"#);
        assert_eq!(
            err,
            CompileError::UnexpectedValue {
                key: "color".into(),
                expected: "a rule body",
                found: "a string",
            }
        );
    }

    #[test]
    fn test_block_under_plain_key_is_rejected() {
        let err = build_err(r#"{ "menu": { "div": { "color": "red" } } }"#);
        assert!(matches!(
            err,
            CompileError::UnexpectedValue {
                expected: "a literal property value",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_nesting_deep() {
        let err = build_err(r#"{ "menu": { "& a": { "&": {} } } }"#);
        assert_eq!(err, CompileError::InvalidNesting { key: "&".into() });
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let p = plan(r#"{ "menu": null, "bar": { "media": null, "mixins": null, "margin": 0 } }"#);
        assert!(p.lookup(&[".menu"]).is_none());
        assert_eq!(scope(&p, &[".bar"]).declarations(), &["margin:0".to_string()]);
    }

    #[test]
    fn test_error_path_points_into_media_payload() {
        let err = build_err(
            r#"{ "menu": { "media": [{ "print": "", "css": { "keyframes": [{ "steps": [] }] } }] } }"#,
        );
        match err {
            CompileError::Descriptor(e) => assert_eq!(e.path, "menu.media[0].css.keyframes[0]"),
            other => panic!("Expected Descriptor error, got {other:?}"),
        }
    }

    // =========================================================================
    // View
    // =========================================================================

    #[test]
    fn test_view_mirrors_tree() {
        let p = plan(r#"{ "menu": { "color": "red", "& a": { "color": "blue" } } }"#);
        let view = p.view();
        assert_eq!(view.kind, ScopeKind::Global);
        assert_eq!(view.children.len(), 1);
        assert_eq!(view.children[0].fragment, ".menu");
        assert_eq!(view.children[0].children[0].fragment, " a");
        assert_eq!(view.children[0].children[0].declarations, &["color:blue".to_string()]);
    }

    #[test]
    fn test_view_serializes() {
        let p = plan(r#"{ "menu": { "color": "red" } }"#);
        let json = serde_json::to_value(p.view()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "global",
                "fragment": "",
                "children": [{ "kind": "element", "fragment": ".menu", "declarations": ["color:red"] }]
            })
        );
    }
}
