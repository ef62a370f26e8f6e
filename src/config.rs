use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::KeyMatcher;

pub const CONFIG_FILE_NAME: &str = ".i18nkeysrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_messages_root", alias = "messagesDir")]
    pub messages_root: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    #[serde(default = "default_secondary_locale")]
    pub secondary_locale: String,
    /// Top-level namespaces that are never written (managed elsewhere).
    #[serde(default = "default_ignored_namespaces")]
    pub ignored_namespaces: Vec<String>,
    #[serde(default = "default_translation_functions")]
    pub translation_functions: Vec<String>,
    #[serde(default = "default_namespace_constructors")]
    pub namespace_constructors: Vec<String>,
    /// Above this many missing keys, only a preview batch is translated unless forced.
    #[serde(default = "default_translation_threshold")]
    pub translation_threshold: usize,
    #[serde(default = "default_preview_batch_size")]
    pub preview_batch_size: usize,
    #[serde(default = "default_missing_report_path")]
    pub missing_report_path: String,
    #[serde(default = "default_diagnostic_path")]
    pub diagnostic_path: String,
    #[serde(default)]
    pub translator: TranslatorConfig,
}

/// Settings of the machine translation endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorConfig {
    /// OpenAI-compatible chat completions URL.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 500,
            timeout_secs: 60,
        }
    }
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    let root_dirs = ["", "src"];
    let sub_dirs = ["app", "components"];

    root_dirs
        .iter()
        .flat_map(|root| {
            sub_dirs.iter().map(move |sub| {
                if root.is_empty() {
                    sub.to_string()
                } else {
                    format!("{}/{}", root, sub)
                }
            })
        })
        .collect()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/.next/**", "**/dist/**", "**/build/**"]
        .map(String::from)
        .to_vec()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].map(String::from).to_vec()
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_secondary_locale() -> String {
    "no".to_string()
}

fn default_ignored_namespaces() -> Vec<String> {
    vec!["Admin".to_string()]
}

fn default_translation_functions() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_namespace_constructors() -> Vec<String> {
    vec!["useTranslations".to_string(), "getTranslations".to_string()]
}

fn default_translation_threshold() -> usize {
    50
}

fn default_preview_batch_size() -> usize {
    10
}

fn default_missing_report_path() -> String {
    "missing-translation-keys.json".to_string()
}

fn default_diagnostic_path() -> String {
    "translation-diagnostic.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            messages_root: default_messages_root(),
            primary_locale: default_primary_locale(),
            secondary_locale: default_secondary_locale(),
            ignored_namespaces: default_ignored_namespaces(),
            translation_functions: default_translation_functions(),
            namespace_constructors: default_namespace_constructors(),
            translation_threshold: default_translation_threshold(),
            preview_batch_size: default_preview_batch_size(),
            missing_report_path: default_missing_report_path(),
            diagnostic_path: default_diagnostic_path(),
            translator: TranslatorConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        // Patterns without wildcards are literal directory paths,
        // so [locale] (Next.js dynamic route) is valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.primary_locale.trim().is_empty() || self.secondary_locale.trim().is_empty() {
            bail!("'primaryLocale' and 'secondaryLocale' must not be empty");
        }
        if self.primary_locale == self.secondary_locale {
            bail!(
                "'primaryLocale' and 'secondaryLocale' must differ (both are \"{}\")",
                self.primary_locale
            );
        }
        if self.preview_batch_size == 0 {
            bail!("'previewBatchSize' must be at least 1");
        }
        if self.translation_functions.is_empty() {
            bail!("'translationFunctions' must name at least one function");
        }

        Ok(())
    }

    pub fn key_matcher(&self) -> KeyMatcher {
        KeyMatcher::new(
            self.translation_functions.clone(),
            self.namespace_constructors.clone(),
        )
    }

    pub fn source_root_path(&self) -> PathBuf {
        PathBuf::from(&self.source_root)
    }

    pub fn messages_root_path(&self) -> PathBuf {
        PathBuf::from(&self.messages_root)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file that was loaded, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
