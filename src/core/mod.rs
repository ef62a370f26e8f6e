//! Extraction engine: file discovery, key extraction and locale trees.
//!
//! ## Module Structure
//!
//! - `scan`: find the source files to analyze
//! - `parsers`: swc parsing of JS/TS/JSX/TSX
//! - `extract`: translation keys of one file (AST walk, pattern fallback)
//! - `collect`: read and extract all files, in discovery order
//! - `locale`: nested locale trees and their stores

pub mod collect;
pub mod extract;
pub mod locale;
pub mod parsers;
pub mod scan;

pub use collect::{FileKeys, KeyCollection, SkippedFile, collect_keys};
pub use extract::{ExtractionMode, FoundKeys, KeyMatcher, MatchRule};
pub use locale::{FsLocaleStore, LocaleStore, LocaleTree, MemoryLocaleStore};
pub use scan::{ScanOptions, ScanResult, scan_files};
