//! Namespace bindings of a single file.
//!
//! `const productT = useTranslations("Products")` binds `productT` to the
//! `Products` namespace, so `productT("name")` resolves to `Products.name`.
//! Bindings cover the whole file and are dropped with it.

use std::collections::HashMap;

/// Variable name -> namespace. `None` is the root namespace (`useTranslations()`).
#[derive(Debug, Default, Clone)]
pub struct NamespaceBindings {
    bindings: HashMap<String, Option<String>>,
}

impl NamespaceBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any earlier binding of the same name.
    pub fn bind(&mut self, name: impl Into<String>, namespace: Option<String>) {
        self.bindings.insert(name.into(), namespace);
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Qualify a key with the namespace bound to `name`.
    ///
    /// Returns `None` if `name` has no binding.
    pub fn qualify(&self, name: &str, key: &str) -> Option<String> {
        self.bindings.get(name).map(|namespace| match namespace {
            Some(ns) => format!("{}.{}", ns, key),
            None => key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
