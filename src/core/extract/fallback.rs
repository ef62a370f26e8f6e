//! Pattern scanner for files swc cannot parse.
//!
//! Applies the extraction rules to raw text: namespace bindings
//! (`const x = useTranslations('Ns')`) are collected for the whole file, then
//! `name('literal')` calls are resolved against them.
//!
//! Only names on the configured allow-lists or with a recorded binding are
//! accepted, so unrelated calls such as `format('x')` are ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::{CandidateCall, KeyMatch, KeyMatcher, NamespaceBindings, resolve_calls};

static BINDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:await\s+)?([A-Za-z_$][\w$]*)\s*\(\s*(?:['"`]([^'"`]*)['"`])?\s*\)"#,
    )
    .expect("binding pattern is valid")
});

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_$][\w$]*)(?:\.(?:rich|raw|markup|has))?\s*\(\s*['"`]([^'"`]+)['"`]"#)
        .expect("call pattern is valid")
});

/// Scan raw source text for translation keys.
pub fn extract(code: &str, file_path: &str, matcher: &KeyMatcher) -> Vec<KeyMatch> {
    let bindings = collect_bindings(code, file_path, matcher);
    resolve_calls(&collect_calls(code), &bindings, matcher, file_path)
}

fn collect_bindings(code: &str, file_path: &str, matcher: &KeyMatcher) -> NamespaceBindings {
    let mut bindings = NamespaceBindings::new();
    for caps in BINDING_RE.captures_iter(code) {
        let (Some(name), Some(constructor)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if !matcher.is_namespace_constructor(constructor.as_str()) {
            continue;
        }
        let namespace = caps.get(3).map(|m| m.as_str().to_string());
        tracing::debug!(
            file = file_path,
            binding = name.as_str(),
            namespace = ?namespace,
            "namespace binding (pattern scan)"
        );
        bindings.bind(name.as_str(), namespace);
    }
    bindings
}

/// All `name('literal')` calls that are not method calls on another object.
fn collect_calls(code: &str) -> Vec<CandidateCall> {
    let mut calls = Vec::new();
    for caps in CALL_RE.captures_iter(code) {
        let (Some(whole), Some(callee), Some(key)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if code[..whole.start()].ends_with('.') {
            continue;
        }
        calls.push(CandidateCall {
            callee: callee.as_str().to_string(),
            key: key.as_str().to_string(),
            line: line_at(code, whole.start()),
        });
    }
    calls
}

/// 1-based line number of a byte offset.
fn line_at(code: &str, offset: usize) -> usize {
    code[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::extract::MatchRule;

    fn keys(code: &str) -> Vec<String> {
        extract(code, "broken.tsx", &KeyMatcher::default())
            .into_iter()
            .map(|m| m.key)
            .collect()
    }

    #[test]
    fn test_namespace_scenario() {
        let code = r#"
const productT = useTranslations('Products');
productT('name');
t('Global.Greeting');
"#;
        assert_eq!(keys(code), vec!["Global.Greeting", "Products.name"]);
    }

    #[test]
    fn test_direct_calls_come_before_namespaced() {
        let code = r#"
const navT = useTranslations("Navigation");
navT("home");
t("Cart.title");
"#;
        let matches = extract(code, "a.tsx", &KeyMatcher::default());
        assert_eq!(matches[0].rule, MatchRule::Direct);
        assert_eq!(matches[0].line, 4);
        assert_eq!(matches[1].key, "Navigation.home");
        assert_eq!(matches[1].line, 3);
    }

    #[test]
    fn test_ignores_unbound_and_method_calls() {
        let code = r#"
format('yyyy-MM-dd');
date.t('nope');
alert('hi');
"#;
        assert!(keys(code).is_empty());
    }

    #[test]
    fn test_await_get_translations() {
        let code = r#"
const t = await getTranslations('Checkout');
t('pay');
"#;
        assert_eq!(keys(code), vec!["Checkout.pay"]);
    }

    #[test]
    fn test_template_key_is_kept() {
        let code = "t(`Status.${status}`); <div {";
        assert_eq!(keys(code), vec!["Status.${status}"]);
    }

    #[test]
    fn test_unknown_constructor_does_not_bind() {
        let code = r#"
const labelT = makeLabels('Labels');
labelT('x');
"#;
        assert!(keys(code).is_empty());
    }

    #[test]
    fn test_rich_call() {
        let code = "const t = useTranslations('Legal'); t.rich('terms', { b: (c) => c });";
        assert_eq!(keys(code), vec!["Legal.terms"]);
    }
}
