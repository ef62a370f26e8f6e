//! Where locale trees and run artifacts live.
//!
//! The sync pipeline only talks to a [`LocaleStore`], so the same code runs
//! against the `messages/` directory on disk or against memory in tests.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;

use super::tree::LocaleTree;

pub trait LocaleStore {
    /// Load a locale tree. Missing or unreadable locales come back empty.
    fn load(&self, locale: &str) -> LocaleTree;

    /// Persist a locale tree, replacing the previous contents.
    fn save(&mut self, locale: &str, tree: &LocaleTree) -> Result<()>;

    /// Persist a JSON artifact (missing-key report, diagnostics).
    fn write_artifact(&mut self, name: &str, contents: &Value) -> Result<()>;

    /// Human-readable location of a locale, used in console output.
    fn describe(&self, locale: &str) -> String {
        format!("{}.json", locale)
    }

    /// Human-readable location of an artifact, used in console output.
    fn describe_artifact(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Load a locale file, falling back to an empty tree on any failure.
pub fn load_tree(path: &Path) -> LocaleTree {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not read locale file, starting with an empty tree"
            );
            return LocaleTree::new();
        }
    };

    match LocaleTree::from_json_str(&content) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %format!("{:#}", err),
                "could not parse locale file, starting with an empty tree"
            );
            LocaleTree::new()
        }
    }
}

/// Write a locale tree with two-space indentation, creating parent directories.
pub fn save_tree(path: &Path, tree: &LocaleTree) -> Result<()> {
    write_with_parents(path, &tree.to_json_string()?)
}

fn write_with_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Locale files under a messages directory (`<messages_root>/<locale>.json`).
#[derive(Debug, Clone)]
pub struct FsLocaleStore {
    messages_root: PathBuf,
    artifact_root: PathBuf,
}

impl FsLocaleStore {
    pub fn new(messages_root: impl Into<PathBuf>, artifact_root: impl Into<PathBuf>) -> Self {
        Self {
            messages_root: messages_root.into(),
            artifact_root: artifact_root.into(),
        }
    }

    pub fn locale_path(&self, locale: &str) -> PathBuf {
        self.messages_root.join(format!("{}.json", locale))
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.artifact_root.join(name)
    }
}

impl LocaleStore for FsLocaleStore {
    fn load(&self, locale: &str) -> LocaleTree {
        load_tree(&self.locale_path(locale))
    }

    fn save(&mut self, locale: &str, tree: &LocaleTree) -> Result<()> {
        let path = self.locale_path(locale);
        tracing::debug!(path = %path.display(), "writing locale file");
        save_tree(&path, tree)
    }

    fn write_artifact(&mut self, name: &str, contents: &Value) -> Result<()> {
        let path = self.artifact_path(name);
        let mut content =
            serde_json::to_string_pretty(contents).context("Failed to serialize JSON")?;
        content.push('\n');
        tracing::debug!(path = %path.display(), "writing artifact");
        write_with_parents(&path, &content)
    }

    fn describe(&self, locale: &str) -> String {
        self.locale_path(locale).display().to_string()
    }

    fn describe_artifact(&self, name: &str) -> String {
        self.artifact_path(name).display().to_string()
    }
}

/// In-memory store. Records every save so callers can tell what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocaleStore {
    locales: HashMap<String, LocaleTree>,
    artifacts: HashMap<String, Value>,
    saves: Vec<String>,
}

impl MemoryLocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: &str, tree: LocaleTree) -> Self {
        self.locales.insert(locale.to_string(), tree);
        self
    }

    pub fn tree(&self, locale: &str) -> Option<&LocaleTree> {
        self.locales.get(locale)
    }

    pub fn artifact(&self, name: &str) -> Option<&Value> {
        self.artifacts.get(name)
    }

    /// Locales in the order they were saved.
    pub fn saved_locales(&self) -> &[String] {
        &self.saves
    }
}

impl LocaleStore for MemoryLocaleStore {
    fn load(&self, locale: &str) -> LocaleTree {
        self.locales.get(locale).cloned().unwrap_or_default()
    }

    fn save(&mut self, locale: &str, tree: &LocaleTree) -> Result<()> {
        self.locales.insert(locale.to_string(), tree.clone());
        self.saves.push(locale.to_string());
        Ok(())
    }

    fn write_artifact(&mut self, name: &str, contents: &Value) -> Result<()> {
        self.artifacts.insert(name.to_string(), contents.clone());
        Ok(())
    }
}
