use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use super::super::args::{CommonArgs, SyncArgs};
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::FsLocaleStore,
    sync::run_sync,
    translate::OpenAiTranslator,
};

/// Resolve a config path against the project root, keeping absolute paths.
fn resolve(root_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

/// Load the config and apply CLI overrides (CLI > config file > defaults).
///
/// Returns the config with every path resolved against the project root,
/// plus the project root itself.
pub fn load_effective_config(common: &CommonArgs, verbose: bool) -> Result<(Config, PathBuf)> {
    let root_dir = common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let loaded = load_config(&root_dir)?;
    match &loaded.path {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
        None if verbose => {
            eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME)
        }
        None => {}
    }

    let mut config = loaded.config;
    if let Some(ref primary_locale) = common.primary_locale {
        config.primary_locale = primary_locale.clone();
    }
    if let Some(ref secondary_locale) = common.secondary_locale {
        config.secondary_locale = secondary_locale.clone();
    }
    if let Some(ref messages_root) = common.messages_root {
        config.messages_root = messages_root.to_string_lossy().to_string();
    } else {
        config.messages_root = resolve(&root_dir, &config.messages_root)
            .to_string_lossy()
            .to_string();
    }
    config.source_root = resolve(&root_dir, &config.source_root)
        .to_string_lossy()
        .to_string();
    config.validate()?;

    Ok((config, root_dir))
}

pub fn sync(args: SyncArgs) -> Result<ExitStatus> {
    let (config, root_dir) = load_effective_config(&args.common, args.verbose)?;
    let options = args.options();

    let mut store = FsLocaleStore::new(config.messages_root_path(), &root_dir);
    let translator = OpenAiTranslator::new(config.translator.clone(), args.api_key.clone())
        .context("Failed to create the translation client")?;
    if !translator.has_api_key() && !options.list_missing {
        tracing::warn!("no API key configured, missing keys will copy the primary text");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let (_, outcome) =
        runtime.block_on(run_sync(&config, options, &mut store, &translator))?;

    report::print(&outcome, &config, args.verbose);
    Ok(ExitStatus::Success)
}
