//! CLI argument definitions using clap.
//!
//! Running without a subcommand performs a sync:
//!
//! - `i18n-keys`: extract keys, fill the primary locale, translate the secondary locale
//! - `i18n-keys --list-missing`: print the keys the secondary locale lacks
//! - `i18n-keys init`: write a default `.i18nkeysrc.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sync::SyncOptions;
use crate::translate::API_KEY_ENV;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub sync: SyncArgs,
}

impl Arguments {
    pub fn verbose(&self) -> bool {
        self.sync.verbose || self.sync.diagnostic
    }
}

/// Overrides shared with the config file (CLI > config file > defaults).
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root: where the config file is searched and relative paths start
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Secondary locale to translate into (overrides config file)
    #[arg(long)]
    pub secondary_locale: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Translate every missing key, even above the translation threshold
    #[arg(long)]
    pub force: bool,

    /// Print the keys missing from the secondary locale and exit without translating
    #[arg(long)]
    pub list_missing: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write translation-diagnostic.json with the full state of the run
    #[arg(long)]
    pub diagnostic: bool,

    /// API key for the translation endpoint
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
}

impl SyncArgs {
    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            force: self.force,
            list_missing: self.list_missing,
            verbose: self.verbose,
            diagnostic: self.diagnostic,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .i18nkeysrc.json configuration file
    Init,
}
