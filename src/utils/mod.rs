//! Utilities: logging setup (tracing to stderr, level from -v / -q).
//!
//! Key items:
//!   derive_level / init_logging

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Map CLI verbosity flags to a default level.
pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `level` when set.
///
/// Output goes to stderr: stdout belongs to the MCP protocol and to
/// machine-readable `--json` output.
pub fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // Ignore a second init (tests, embedding).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Truthy environment flag (`1`, `true`, `yes`, `on`; case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}
