//! Diagnostic logging to stderr.
//!
//! `RUST_LOG` wins when set. Otherwise this crate logs at `warn`, or at
//! `debug` with `--verbose` / `--diagnostic`.

use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("warn,i18n_keys={}", level)
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let ansi = std::env::var_os("NO_COLOR").is_none();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn,i18n_keys=warn");
        assert_eq!(default_directive(true), "warn,i18n_keys=debug");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
