//! Report formatting and printing utilities.
//!
//! Turns a [`SyncOutcome`] into console output. Separate from the sync run
//! so i18n-keys can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::sync::{SyncOutcome, TranslatedKey, TranslationPhase};
use crate::utils::pluralize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Widest key column before values wrap onto the next line.
const MAX_KEY_WIDTH: usize = 48;

/// Print the outcome of a sync run to stdout, warnings to stderr.
pub fn print(outcome: &SyncOutcome, config: &Config, verbose: bool) {
    print_to(outcome, config, &mut io::stdout().lock());
    print_warnings_to(outcome, verbose, &mut io::stderr().lock());
}

/// Print the outcome of a sync run to a custom writer.
pub fn print_to<W: Write>(outcome: &SyncOutcome, config: &Config, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Scanned {}, found {}",
        pluralize(outcome.files_scanned, "source file", "source files"),
        pluralize(outcome.found_keys, "translation key", "translation keys"),
    );

    print_primary(outcome, writer);

    match &outcome.translation {
        TranslationPhase::NothingMissing => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "{} has every key, nothing to translate",
                    outcome.secondary_path
                )
                .green()
            );
        }
        TranslationPhase::Listed { keys } => print_missing_list(outcome, keys, writer),
        TranslationPhase::Translated {
            results,
            truncated_from,
        } => {
            if let Some(total) = truncated_from {
                print_threshold_guidance(outcome, config, *total, results.len(), writer);
            }
            print_translated(outcome, results, writer);
        }
    }

    if outcome.wrote_report {
        let _ = writeln!(
            writer,
            "{}",
            format!("Missing keys written to {}", outcome.report_path).dimmed()
        );
    }
    if outcome.wrote_diagnostic {
        let _ = writeln!(
            writer,
            "{}",
            format!("Diagnostics written to {}", outcome.diagnostic_path).dimmed()
        );
    }
}

/// Print warnings about skipped files, parse fallbacks and translation fallbacks.
pub fn print_warnings_to<W: Write>(outcome: &SyncOutcome, verbose: bool, writer: &mut W) {
    if outcome.files_skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} could not be read",
            "warning:".bold().yellow(),
            pluralize(outcome.files_skipped, "file", "files"),
        );
    }

    if !outcome.parse_fallbacks.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} could not be parsed, keys were matched by pattern{}",
            "warning:".bold().yellow(),
            pluralize(outcome.parse_fallbacks.len(), "file", "files"),
            if verbose {
                String::new()
            } else {
                format!(" (use {} for details)", "-v".cyan())
            }
        );
        if verbose {
            for path in &outcome.parse_fallbacks {
                let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
            }
        }
    }

    let fallbacks = outcome.fallback_count();
    if fallbacks > 0 {
        let _ = writeln!(
            writer,
            "{} {} used the {} text because translation failed",
            "warning:".bold().yellow(),
            pluralize(fallbacks, "key", "keys"),
            outcome.primary_locale,
        );
    }
}

fn print_primary<W: Write>(outcome: &SyncOutcome, writer: &mut W) {
    if outcome.primary_added.is_empty() {
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Added {} to {}",
            pluralize(outcome.primary_added.len(), "key", "keys"),
            outcome.primary_path
        )
        .green()
    );
    for key in &outcome.primary_added {
        let _ = writeln!(writer, "  {} {}", "+".green(), key);
    }
}

fn print_missing_list<W: Write>(outcome: &SyncOutcome, keys: &[String], writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} missing from {}:",
        FAILURE_MARK.red(),
        pluralize(keys.len(), "key", "keys"),
        outcome.secondary_path
    );
    for key in keys {
        let _ = writeln!(writer, "  {}", key);
    }
}

fn print_threshold_guidance<W: Write>(
    outcome: &SyncOutcome,
    config: &Config,
    total: usize,
    batch: usize,
    writer: &mut W,
) {
    let _ = writeln!(
        writer,
        "{} {} are missing from {} (more than {}), translating the first {} only",
        "warning:".bold().yellow(),
        pluralize(total, "key", "keys"),
        outcome.secondary_locale,
        config.translation_threshold,
        batch
    );
    let _ = writeln!(
        writer,
        "Run with {} to translate all of them, or {} to review the list.",
        "--force".cyan(),
        "--list-missing".cyan()
    );
}

fn print_translated<W: Write>(outcome: &SyncOutcome, results: &[TranslatedKey], writer: &mut W) {
    if results.is_empty() {
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Translated {} into {}",
            pluralize(results.len(), "key", "keys"),
            outcome.secondary_path
        )
        .green()
    );

    let key_width = results
        .iter()
        .map(|r| UnicodeWidthStr::width(r.key.as_str()))
        .filter(|w| *w <= MAX_KEY_WIDTH)
        .max()
        .unwrap_or(0);

    for result in results {
        let width = UnicodeWidthStr::width(result.key.as_str());
        let padding = key_width.saturating_sub(width);
        let value = match &result.fallback {
            Some(reason) => format!(
                "{} {}",
                result.value,
                format!("(fallback: {})", reason).yellow()
            ),
            None => result.value.clone(),
        };
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {}",
            result.key.cyan(),
            "",
            value,
            padding = padding
        );
    }
}
