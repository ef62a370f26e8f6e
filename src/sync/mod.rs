//! The `sync` run: diff found keys against both locales, fill the primary
//! locale with placeholders and machine-translate the secondary one.
//!
//! Steps, in order:
//!
//! 1. load both locale trees (missing files are empty trees)
//! 2. partition the found keys into "missing from primary" and "missing from secondary"
//! 3. write the missing-key report when either list is non-empty
//! 4. insert primary-missing keys with their last segment as placeholder, save if changed
//! 5. list, gate or translate the secondary-missing keys, save if changed
//! 6. write the diagnostic report when requested

mod artifacts;


use anyhow::{Context, Result};
use serde::Serialize;

pub use artifacts::{DiagnosticReport, MissingKeyReport};

use crate::{
    config::Config,
    core::{
        KeyCollection, LocaleStore, LocaleTree, ScanOptions, collect_keys,
        locale::{is_ignored, last_segment},
        scan_files,
    },
    translate::{TranslateError, Translator},
};

/// Command-line switches of a run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
    /// Translate every missing key even above the threshold.
    pub force: bool,
    /// Print the secondary-missing keys and stop before translating.
    pub list_missing: bool,
    pub verbose: bool,
    pub diagnostic: bool,
}

/// One key written to the secondary locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedKey {
    pub key: String,
    /// Primary-locale text that was sent for translation.
    pub source: String,
    pub value: String,
    /// Why the source text was used instead of a translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl TranslatedKey {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// What happened to the keys missing from the secondary locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TranslationPhase {
    /// The secondary locale already had every key.
    NothingMissing,
    /// `--list-missing`: the sorted keys, nothing translated.
    Listed { keys: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Translated {
        results: Vec<TranslatedKey>,
        /// Number of candidates before the preview cut, when the threshold applied.
        truncated_from: Option<usize>,
    },
}

/// Summary of a run, for reporting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub primary_locale: String,
    pub secondary_locale: String,
    pub primary_path: String,
    pub secondary_path: String,
    /// Where the missing-key report goes, as written by the store.
    pub report_path: String,
    pub diagnostic_path: String,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub parse_fallbacks: Vec<String>,
    pub found_keys: usize,
    pub missing_primary: Vec<String>,
    pub missing_secondary: Vec<String>,
    /// Keys inserted into the primary locale.
    pub primary_added: Vec<String>,
    pub translation: TranslationPhase,
    pub wrote_primary: bool,
    pub wrote_secondary: bool,
    pub wrote_report: bool,
    pub wrote_diagnostic: bool,
}

impl SyncOutcome {
    pub fn translated(&self) -> &[TranslatedKey] {
        match &self.translation {
            TranslationPhase::Translated { results, .. } => results,
            _ => &[],
        }
    }

    pub fn fallback_count(&self) -> usize {
        self.translated().iter().filter(|t| t.is_fallback()).count()
    }
}

/// Keys of `found` that `tree` does not have, in discovery order.
fn missing_from<'a>(found: impl Iterator<Item = &'a str>, tree: &LocaleTree) -> Vec<String> {
    found
        .filter(|key| !tree.exists(key, true))
        .map(String::from)
        .collect()
}

/// Run steps 1-6 over an already collected key set.
pub async fn synchronize<S, T>(
    config: &Config,
    options: SyncOptions,
    collection: &KeyCollection,
    store: &mut S,
    translator: &T,
) -> Result<SyncOutcome>
where
    S: LocaleStore,
    T: Translator,
{
    let primary_locale = config.primary_locale.as_str();
    let secondary_locale = config.secondary_locale.as_str();
    let ignored = config.ignored_namespaces.as_slice();

    let mut primary = store.load(primary_locale);
    let mut secondary = store.load(secondary_locale);

    let missing_primary = missing_from(collection.found.iter(), &primary);
    let missing_secondary = missing_from(collection.found.iter(), &secondary);
    tracing::info!(
        found = collection.found.len(),
        missing_primary = missing_primary.len(),
        missing_secondary = missing_secondary.len(),
        "partitioned found keys"
    );

    let wrote_report = if missing_primary.is_empty() && missing_secondary.is_empty() {
        false
    } else {
        let report = MissingKeyReport::new(
            primary_locale,
            secondary_locale,
            &missing_primary,
            &missing_secondary,
        );
        store
            .write_artifact(&config.missing_report_path, &report.to_value()?)
            .with_context(|| format!("Failed to write {}", config.missing_report_path))?;
        true
    };

    let mut primary_added = Vec::new();
    for key in &missing_primary {
        if primary.insert(key, last_segment(key), ignored) {
            primary_added.push(key.clone());
        }
    }
    let wrote_primary = !primary_added.is_empty();
    if wrote_primary {
        store
            .save(primary_locale, &primary)
            .with_context(|| format!("Failed to save {}", store.describe(primary_locale)))?;
    }

    let mut wrote_secondary = false;
    let translation = if missing_secondary.is_empty() {
        TranslationPhase::NothingMissing
    } else if options.list_missing {
        let mut keys = missing_secondary.clone();
        keys.sort();
        TranslationPhase::Listed { keys }
    } else {
        let mut candidates: Vec<&str> = missing_secondary
            .iter()
            .map(String::as_str)
            .filter(|key| {
                let skip = is_ignored(key, ignored);
                if skip {
                    tracing::debug!(key, "skipping key in ignored namespace");
                }
                !skip
            })
            .collect();

        let truncated_from = if candidates.len() > config.translation_threshold && !options.force
        {
            let total = candidates.len();
            candidates.truncate(config.preview_batch_size);
            tracing::info!(
                total,
                batch = candidates.len(),
                "too many missing keys, translating a preview batch"
            );
            Some(total)
        } else {
            None
        };

        let results = translate_keys(
            &candidates,
            &primary,
            primary_locale,
            secondary_locale,
            translator,
        )
        .await;

        let mut inserted = false;
        for result in &results {
            inserted |= secondary.insert(&result.key, &result.value, ignored);
        }
        if inserted {
            store
                .save(secondary_locale, &secondary)
                .with_context(|| format!("Failed to save {}", store.describe(secondary_locale)))?;
            wrote_secondary = true;
        }

        TranslationPhase::Translated {
            results,
            truncated_from,
        }
    };

    let mut outcome = SyncOutcome {
        primary_locale: primary_locale.to_string(),
        secondary_locale: secondary_locale.to_string(),
        primary_path: store.describe(primary_locale),
        secondary_path: store.describe(secondary_locale),
        report_path: store.describe_artifact(&config.missing_report_path),
        diagnostic_path: store.describe_artifact(&config.diagnostic_path),
        files_scanned: collection.files_scanned(),
        files_skipped: collection.skipped.len(),
        parse_fallbacks: collection.fallback_files().map(|f| f.path.clone()).collect(),
        found_keys: collection.found.len(),
        missing_primary,
        missing_secondary,
        primary_added,
        translation,
        wrote_primary,
        wrote_secondary,
        wrote_report,
        wrote_diagnostic: false,
    };

    if options.diagnostic {
        let report = DiagnosticReport::new(options, collection, &outcome);
        store
            .write_artifact(&config.diagnostic_path, &report.to_value()?)
            .with_context(|| format!("Failed to write {}", config.diagnostic_path))?;
        outcome.wrote_diagnostic = true;
    }

    Ok(outcome)
}

/// Translate `keys` one at a time. A failed key keeps its source text.
///
/// After an error that would repeat for every key (no or rejected API key)
/// the remaining keys fall back without further requests.
async fn translate_keys<T: Translator>(
    keys: &[&str],
    primary: &LocaleTree,
    source_lang: &str,
    target_lang: &str,
    translator: &T,
) -> Vec<TranslatedKey> {
    let mut results = Vec::with_capacity(keys.len());
    let mut persistent: Option<TranslateError> = None;

    for key in keys {
        let source = primary
            .get(key)
            .unwrap_or_else(|| last_segment(key))
            .to_string();

        let attempt = match &persistent {
            Some(err) => Err(err.clone()),
            None => translator.translate(&source, source_lang, target_lang).await,
        };

        let result = match attempt {
            Ok(value) => {
                tracing::debug!(key, value = %value, "translated");
                TranslatedKey {
                    key: key.to_string(),
                    source,
                    value,
                    fallback: None,
                }
            }
            Err(err) => {
                if persistent.is_none() {
                    tracing::warn!(key, error = %err, "translation failed, using source text");
                }
                if err.is_persistent() {
                    persistent = Some(err.clone());
                }
                TranslatedKey {
                    key: key.to_string(),
                    value: source.clone(),
                    source,
                    fallback: Some(err.to_string()),
                }
            }
        };
        results.push(result);
    }
    results
}

/// Discover, extract and synchronize in one go.
pub async fn run_sync<S, T>(
    config: &Config,
    options: SyncOptions,
    store: &mut S,
    translator: &T,
) -> Result<(KeyCollection, SyncOutcome)>
where
    S: LocaleStore,
    T: Translator,
{
    let source_root = config.source_root_path();
    let scan = scan_files(
        &source_root,
        ScanOptions {
            includes: &config.includes,
            ignores: &config.ignores,
            extensions: &config.extensions,
        },
    );
    tracing::info!(
        root = %source_root.display(),
        files = scan.files.len(),
        "discovered source files"
    );

    let mut collection = collect_keys(&scan.files, &config.key_matcher());
    collection.scan_errors = scan.skipped_count;

    let outcome = synchronize(config, options, &collection, store, translator).await?;
    Ok((collection, outcome))
}
