//! i18n-keys - translation key sync for next-intl projects
//!
//! i18n-keys is a CLI tool and library that finds the translation keys a
//! Next.js project uses, adds the ones missing from the primary locale file,
//! and machine-translates the ones missing from the secondary locale file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, console report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (file discovery, key extraction, locale trees)
//! - `logging`: tracing subscriber setup
//! - `sync`: The sync run tying extraction, locale files and translation together
//! - `translate`: Machine translation client
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod sync;
pub mod translate;
pub mod utils;
