//! Read and extract every discovered file.
//!
//! Files are read and parsed in parallel with rayon; results are merged in
//! discovery order so the key order matches a sequential run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use rayon::prelude::*;
use serde::Serialize;

use super::extract::{ExtractionMode, FileExtraction, FoundKeys, KeyMatcher, extract_file};

/// Keys found in one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileKeys {
    pub path: String,
    pub mode: ExtractionMode,
    pub keys: Vec<String>,
}

/// A file that was discovered but could not be read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    pub path: String,
    pub error: String,
}

/// Everything the extraction phase produced.
#[derive(Debug, Clone, Default)]
pub struct KeyCollection {
    pub found: FoundKeys,
    pub files: Vec<FileKeys>,
    pub skipped: Vec<SkippedFile>,
    /// Directory entries the scanner could not access.
    pub scan_errors: usize,
}

impl KeyCollection {
    /// A collection with the given keys and no file information.
    pub fn from_keys<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            found: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn files_scanned(&self) -> usize {
        self.files.len()
    }

    pub fn fallback_files(&self) -> impl Iterator<Item = &FileKeys> {
        self.files
            .iter()
            .filter(|f| f.mode == ExtractionMode::Fallback)
    }
}

fn read_source(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        bail!("not a regular file");
    }
    Ok(fs::read_to_string(path)?)
}

/// Read and extract `files`, in the given order.
pub fn collect_keys(files: &[PathBuf], matcher: &KeyMatcher) -> KeyCollection {
    let results: Vec<(String, Result<FileExtraction>)> = files
        .par_iter()
        .map(|path| {
            let display = path.to_string_lossy().to_string();
            let result = read_source(path).map(|code| extract_file(&code, &display, matcher));
            (display, result)
        })
        .collect();

    let mut collection = KeyCollection::default();
    for (path, result) in results {
        match result {
            Ok(extraction) => {
                collection.found.extend(extraction.keys());
                collection.files.push(FileKeys {
                    path,
                    mode: extraction.mode,
                    keys: extraction.matches.into_iter().map(|m| m.key).collect(),
                });
            }
            Err(err) => {
                tracing::error!(file = %path, error = %err, "skipping unreadable file");
                collection.skipped.push(SkippedFile {
                    path,
                    error: err.to_string(),
                });
            }
        }
    }
    collection
}
