//! Nested locale dictionary.
//!
//! A locale file is a JSON object whose leaves are message strings and whose
//! inner objects are namespaces:
//!
//! ```json
//! { "Products": { "name": "Name", "price": "Price" } }
//! ```
//!
//! Keys are addressed with dot paths (`Products.name`). The backing map keeps
//! insertion order (`serde_json/preserve_order`), so a tree written back to
//! disk keeps the order it was read in, with new keys appended.

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Marker that identifies a key built from a template literal, e.g. `Status.${status}`.
pub const INTERPOLATION_MARKER: &str = "${";

/// Returns true if the key contains an interpolation placeholder.
///
/// Such keys can't be checked statically: they always count as present and
/// are never written into a tree.
pub fn is_interpolated(key: &str) -> bool {
    key.contains(INTERPOLATION_MARKER)
}

/// Returns true if any segment of the key is one of the ignored namespaces.
pub fn is_ignored(key: &str, ignored_namespaces: &[String]) -> bool {
    key.split('.')
        .any(|segment| ignored_namespaces.iter().any(|ns| ns == segment))
}

/// Last dot segment of a key (`Products.name` -> `name`).
pub fn last_segment(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTree {
    root: Map<String, Value>,
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a JSON value. Only objects are valid locale trees.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Failed to parse JSON")?;
        Self::from_value(value).context("Locale file must contain a JSON object")
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(&self.root).context("Failed to serialize JSON")?;
        content.push('\n');
        Ok(content)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Check whether a key is present.
    ///
    /// Interpolated keys always exist. In case-insensitive mode each segment is
    /// compared lowercased against its siblings; an exact-case sibling wins,
    /// otherwise the lexicographically smallest candidate is followed.
    pub fn exists(&self, key: &str, case_sensitive: bool) -> bool {
        if is_interpolated(key) {
            return true;
        }

        let segments: Vec<&str> = key.split('.').collect();
        let mut current = &self.root;

        for (index, segment) in segments.iter().enumerate() {
            let found = if case_sensitive {
                current.get(*segment)
            } else {
                find_case_insensitive(current, segment)
            };

            let Some(value) = found else {
                return false;
            };

            if index + 1 == segments.len() {
                return true;
            }

            match value.as_object() {
                Some(map) => current = map,
                None => return false,
            }
        }

        false
    }

    /// Case-sensitive lookup of a message string.
    pub fn get(&self, key: &str) -> Option<&str> {
        let segments: Vec<&str> = key.split('.').collect();
        let (last, parents) = segments.split_last()?;

        let mut current = &self.root;
        for segment in parents {
            current = current.get(*segment)?.as_object()?;
        }
        current.get(*last)?.as_str()
    }

    /// Insert a message at a dot path, creating namespaces on the way.
    ///
    /// Returns whether the tree changed. The insertion is skipped for
    /// interpolated keys, keys with an empty segment, and keys under an
    /// ignored namespace. A string found where a namespace is needed is
    /// replaced by an empty namespace. An existing namespace at the final
    /// segment is left alone.
    pub fn insert(&mut self, key: &str, value: &str, ignored_namespaces: &[String]) -> bool {
        if is_interpolated(key) || is_ignored(key, ignored_namespaces) {
            return false;
        }

        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return false;
        }
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };

        let mut changed = false;
        let mut current = &mut self.root;
        for segment in parents {
            let child = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
                changed = true;
            }
            let Some(map) = child.as_object_mut() else {
                return changed;
            };
            current = map;
        }

        match current.get(*last) {
            Some(Value::String(existing)) if existing == value => changed,
            Some(Value::Object(_)) => changed,
            _ => {
                current.insert(last.to_string(), Value::String(value.to_string()));
                true
            }
        }
    }

    /// All leaf keys as dot paths, in tree order.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(&self.root, "", &mut keys);
        keys
    }
}

fn find_case_insensitive<'a>(map: &'a Map<String, Value>, segment: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(segment) {
        return Some(value);
    }

    let wanted = segment.to_lowercase();
    map.iter()
        .filter(|(key, _)| key.to_lowercase() == wanted)
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, value)| value)
}

fn collect_leaf_keys(map: &Map<String, Value>, prefix: &str, keys: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(child) => collect_leaf_keys(child, &path, keys),
            _ => keys.push(path),
        }
    }
}
