//! Translation key extraction.
//!
//! Finds the keys a source file passes to next-intl translation functions:
//!
//! ```ignore
//! const productT = useTranslations('Products'); // binding: productT -> Products
//! productT('name');                             // namespaced call -> Products.name
//! t('Global.Greeting');                         // direct call     -> Global.Greeting
//! ```
//!
//! Files are parsed with swc and walked by [`KeyVisitor`]. When a file does
//! not parse, the same rules run as regular expressions over the raw text
//! (see [`fallback`]) so a single syntax error does not hide its keys.
//!
//! Both paths gather the file's bindings and candidate calls first and then
//! hand them to [`resolve_calls`], so a file yields the same keys in the same
//! order whichever path scanned it: direct calls first, then namespaced
//! calls, each in source order.

pub mod bindings;
pub mod fallback;
pub mod visitor;


use std::collections::HashSet;

use serde::Serialize;

pub use bindings::NamespaceBindings;
pub use visitor::KeyVisitor;

use crate::core::parsers::parse_source;

/// Which names count as translation functions and namespace constructors.
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    translation_functions: Vec<String>,
    namespace_constructors: Vec<String>,
}

impl Default for KeyMatcher {
    fn default() -> Self {
        Self::new(
            vec!["t".to_string()],
            vec!["useTranslations".to_string(), "getTranslations".to_string()],
        )
    }
}

impl KeyMatcher {
    pub fn new(translation_functions: Vec<String>, namespace_constructors: Vec<String>) -> Self {
        Self {
            translation_functions,
            namespace_constructors,
        }
    }

    /// The unqualified translation function(s), `t` by default.
    pub fn is_translation_function(&self, name: &str) -> bool {
        self.translation_functions.iter().any(|f| f == name)
    }

    /// Calls that create a namespaced translator, `useTranslations` by default.
    pub fn is_namespace_constructor(&self, name: &str) -> bool {
        self.namespace_constructors.iter().any(|f| f == name)
    }

    pub fn translation_functions(&self) -> &[String] {
        &self.translation_functions
    }

    pub fn namespace_constructors(&self) -> &[String] {
        &self.namespace_constructors
    }

    /// Resolve a call of `callee` with a literal key.
    ///
    /// Bound names are qualified with their namespace. An unbound translation
    /// function keeps the key verbatim. Any other unbound name is not a
    /// translation call.
    pub fn resolve(
        &self,
        bindings: &NamespaceBindings,
        callee: &str,
        key: &str,
    ) -> Option<(String, MatchRule)> {
        let rule = if self.is_translation_function(callee) {
            MatchRule::Direct
        } else {
            MatchRule::Namespaced
        };

        match bindings.qualify(callee, key) {
            Some(full_key) => Some((full_key, rule)),
            None if rule == MatchRule::Direct => Some((key.to_string(), rule)),
            None => None,
        }
    }
}

/// A call with a literal first argument, before bindings are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCall {
    /// Called name; `t` for both `t('k')` and `t.rich('k')`.
    pub callee: String,
    pub key: String,
    /// 1-based line of the call.
    pub line: usize,
}

/// Resolve a file's candidate calls against its bindings.
///
/// Direct calls are emitted before namespaced calls; within each rule the
/// source order is kept.
pub fn resolve_calls(
    calls: &[CandidateCall],
    bindings: &NamespaceBindings,
    matcher: &KeyMatcher,
    file_path: &str,
) -> Vec<KeyMatch> {
    let mut matches = Vec::new();
    for pass in [MatchRule::Direct, MatchRule::Namespaced] {
        for call in calls {
            if call.key.is_empty() {
                continue;
            }
            let Some((key, rule)) = matcher.resolve(bindings, &call.callee, &call.key) else {
                continue;
            };
            if rule != pass {
                continue;
            }
            tracing::debug!(
                file = file_path,
                line = call.line,
                callee = %call.callee,
                key = %key,
                rule = ?rule,
                "found translation key"
            );
            matches.push(KeyMatch {
                key,
                rule,
                line: call.line,
            });
        }
    }
    matches
}

/// How a key was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchRule {
    /// `t('Global.Greeting')`
    Direct,
    /// `productT('name')` with `productT` bound to a namespace.
    Namespaced,
}

/// A key found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatch {
    pub key: String,
    pub rule: MatchRule,
    /// 1-based line of the call.
    pub line: usize,
}

/// How a file was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionMode {
    /// Parsed with swc.
    Syntax,
    /// swc failed; keys came from the pattern scanner.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct FileExtraction {
    pub matches: Vec<KeyMatch>,
    pub mode: ExtractionMode,
    /// Parser error that triggered the fallback.
    pub parse_error: Option<String>,
}

impl FileExtraction {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.key.as_str())
    }
}

/// Extract the keys of one file.
pub fn extract_file(code: &str, file_path: &str, matcher: &KeyMatcher) -> FileExtraction {
    match parse_source(code.to_string(), file_path) {
        Ok(parsed) => FileExtraction {
            matches: KeyVisitor::new(file_path, &parsed.source_map, matcher).extract(&parsed.module),
            mode: ExtractionMode::Syntax,
            parse_error: None,
        },
        Err(err) => {
            tracing::warn!(
                file = file_path,
                error = %err,
                "parse failed, falling back to pattern scan"
            );
            FileExtraction {
                matches: fallback::extract(code, file_path, matcher),
                mode: ExtractionMode::Fallback,
                parse_error: Some(err.to_string()),
            }
        }
    }
}

/// Extract the keys of one file into a running key set.
pub fn extract_into(
    code: &str,
    file_path: &str,
    matcher: &KeyMatcher,
    found: &mut FoundKeys,
) -> FileExtraction {
    let extraction = extract_file(code, file_path, matcher);
    found.extend(extraction.keys());
    extraction
}

/// Ordered set of found keys. Iteration follows first discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundKeys {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl FoundKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key; returns false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.order.push(key);
        true
    }

    pub fn extend<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.insert(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl<S: Into<String>> FromIterator<S> for FoundKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut keys = Self::new();
        for key in iter {
            keys.insert(key);
        }
        keys
    }
}
