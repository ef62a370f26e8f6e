//! AST walk that collects translation keys from one parsed file.

use swc_common::{SourceMap, SourceMapper, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, Lit, MemberProp, Module, Pat, Prop, PropName, PropOrSpread, Tpl,
    VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{CandidateCall, KeyMatch, KeyMatcher, NamespaceBindings, resolve_calls};

/// Member calls that take a key like the translator itself: `t.rich("k", {...})`.
const KEYED_METHODS: &[&str] = &["rich", "raw", "markup", "has"];

/// Namespace argument of a constructor call.
enum NamespaceArg {
    /// `useTranslations()`
    Root,
    /// `useTranslations("Products")` or `getTranslations({ namespace: "Products" })`
    Named(String),
    /// `useTranslations(ns)`: can't be bound statically.
    Dynamic,
}

/// Walks a module, recording namespace bindings and every call with a
/// literal first argument. Calls are resolved once the walk is done.
///
/// Bindings are file-scoped: a binding made inside one component applies to
/// every call in the file, including calls above it, and a later binding of
/// the same name replaces an earlier one.
pub struct KeyVisitor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    matcher: &'a KeyMatcher,
    bindings: NamespaceBindings,
    calls: Vec<CandidateCall>,
}

impl<'a> KeyVisitor<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap, matcher: &'a KeyMatcher) -> Self {
        Self {
            file_path,
            source_map,
            matcher,
            bindings: NamespaceBindings::new(),
            calls: Vec::new(),
        }
    }

    pub fn extract(mut self, module: &Module) -> Vec<KeyMatch> {
        self.visit_module(module);
        resolve_calls(&self.calls, &self.bindings, self.matcher, self.file_path)
    }

    fn line_of(&self, node: &impl Spanned) -> usize {
        self.source_map.lookup_char_pos(node.span().lo).line
    }

    /// `useTranslations(...)` or `await getTranslations(...)`.
    fn constructor_call<'e>(&self, init: &'e Expr) -> Option<&'e CallExpr> {
        let call = match init {
            Expr::Call(call) => call,
            Expr::Await(await_expr) => match &*await_expr.arg {
                Expr::Call(call) => call,
                _ => return None,
            },
            _ => return None,
        };

        if let Callee::Expr(callee) = &call.callee
            && let Expr::Ident(ident) = &**callee
            && self.matcher.is_namespace_constructor(ident.sym.as_str())
        {
            Some(call)
        } else {
            None
        }
    }

    /// Read the key of a call, rebuilding template literals so that
    /// `` t(`Status.${status}`) `` becomes `Status.${status}`.
    fn literal_key(&self, call: &CallExpr) -> Option<String> {
        let arg = call.args.first()?;
        if arg.spread.is_some() {
            return None;
        }

        match &*arg.expr {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
            Expr::Tpl(tpl) => self.template_key(tpl),
            _ => None,
        }
    }

    fn template_key(&self, tpl: &Tpl) -> Option<String> {
        let mut key = String::new();
        for (index, quasi) in tpl.quasis.iter().enumerate() {
            key.push_str(quasi.cooked.as_ref().and_then(|c| c.as_str())?);
            if let Some(expr) = tpl.exprs.get(index) {
                let source = self
                    .source_map
                    .span_to_snippet(expr.span())
                    .unwrap_or_else(|_| "...".to_string());
                key.push_str("${");
                key.push_str(&source);
                key.push('}');
            }
        }
        Some(key)
    }
}

fn callee_name(callee: &Callee) -> Option<&str> {
    let Callee::Expr(expr) = callee else {
        return None;
    };

    match &**expr {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Member(member) => {
            if let Expr::Ident(object) = &*member.obj
                && let MemberProp::Ident(prop) = &member.prop
                && KEYED_METHODS.contains(&prop.sym.as_str())
            {
                Some(object.sym.as_str())
            } else {
                None
            }
        }
        _ => None,
    }
}

fn namespace_arg(call: &CallExpr) -> NamespaceArg {
    let Some(arg) = call.args.first() else {
        return NamespaceArg::Root;
    };

    match &*arg.expr {
        Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
            Some(ns) => NamespaceArg::Named(ns.to_string()),
            None => NamespaceArg::Dynamic,
        },
        // getTranslations({ locale, namespace: "Products" })
        Expr::Object(object) => {
            for prop in &object.props {
                if let PropOrSpread::Prop(prop) = prop
                    && let Prop::KeyValue(kv) = &**prop
                    && prop_name_is(&kv.key, "namespace")
                {
                    return match &*kv.value {
                        Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                            Some(ns) => NamespaceArg::Named(ns.to_string()),
                            None => NamespaceArg::Dynamic,
                        },
                        _ => NamespaceArg::Dynamic,
                    };
                }
            }
            NamespaceArg::Root
        }
        _ => NamespaceArg::Dynamic,
    }
}

fn prop_name_is(name: &PropName, expected: &str) -> bool {
    match name {
        PropName::Ident(ident) => ident.sym.as_str() == expected,
        PropName::Str(s) => s.value.as_str() == Some(expected),
        _ => false,
    }
}

impl<'a> Visit for KeyVisitor<'a> {
    fn visit_var_decl(&mut self, node: &VarDecl) {
        for decl in &node.decls {
            if let Some(init) = &decl.init
                && let Pat::Ident(binding) = &decl.name
                && let Some(call) = self.constructor_call(init)
            {
                let name = binding.id.sym.to_string();
                match namespace_arg(call) {
                    NamespaceArg::Root => {
                        tracing::debug!(file = self.file_path, binding = %name, "root namespace binding");
                        self.bindings.bind(name, None);
                    }
                    NamespaceArg::Named(namespace) => {
                        tracing::debug!(
                            file = self.file_path,
                            binding = %name,
                            namespace = %namespace,
                            "namespace binding"
                        );
                        self.bindings.bind(name, Some(namespace));
                    }
                    NamespaceArg::Dynamic => {
                        tracing::debug!(
                            file = self.file_path,
                            binding = %name,
                            "dynamic namespace, binding ignored"
                        );
                    }
                }
            }
            decl.visit_children_with(self);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(callee) = callee_name(&node.callee)
            && let Some(key) = self.literal_key(node)
        {
            self.calls.push(CandidateCall {
                callee: callee.to_string(),
                key,
                line: self.line_of(node),
            });
        }
        node.visit_children_with(self);
    }
}
