//! JSON artifacts written next to the project: the missing-key report and
//! the `--diagnostic` dump.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{SyncOptions, SyncOutcome, TranslationPhase};
use crate::core::{FileKeys, KeyCollection, SkippedFile};

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingKeyReport<'a> {
    pub generated_at: String,
    pub primary_locale: &'a str,
    pub secondary_locale: &'a str,
    pub missing_from_primary: &'a [String],
    pub missing_from_secondary: &'a [String],
}

impl<'a> MissingKeyReport<'a> {
    pub fn new(
        primary_locale: &'a str,
        secondary_locale: &'a str,
        missing_from_primary: &'a [String],
        missing_from_secondary: &'a [String],
    ) -> Self {
        Self {
            generated_at: timestamp(),
            primary_locale,
            secondary_locale,
            missing_from_primary,
            missing_from_secondary,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).context("Failed to serialize missing-key report")
    }
}

/// Full state of a run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport<'a> {
    pub generated_at: String,
    pub options: SyncOptions,
    pub primary_locale: &'a str,
    pub secondary_locale: &'a str,
    pub files_scanned: usize,
    pub scan_errors: usize,
    pub files: &'a [FileKeys],
    pub skipped: &'a [SkippedFile],
    pub parse_fallbacks: &'a [String],
    pub found_keys: &'a [String],
    pub missing_from_primary: &'a [String],
    pub missing_from_secondary: &'a [String],
    pub primary_added: &'a [String],
    pub translation: &'a TranslationPhase,
}

impl<'a> DiagnosticReport<'a> {
    pub fn new(options: SyncOptions, collection: &'a KeyCollection, outcome: &'a SyncOutcome) -> Self {
        Self {
            generated_at: timestamp(),
            options,
            primary_locale: &outcome.primary_locale,
            secondary_locale: &outcome.secondary_locale,
            files_scanned: collection.files_scanned(),
            scan_errors: collection.scan_errors,
            files: &collection.files,
            skipped: &collection.skipped,
            parse_fallbacks: &outcome.parse_fallbacks,
            found_keys: collection.found.as_slice(),
            missing_from_primary: &outcome.missing_primary,
            missing_from_secondary: &outcome.missing_secondary,
            primary_added: &outcome.primary_added,
            translation: &outcome.translation,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).context("Failed to serialize diagnostic report")
    }
}
