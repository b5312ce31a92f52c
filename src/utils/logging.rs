//! Diagnostic logging. User-facing output goes through `ui::messages`;
//! this only controls what `tracing` emits on stderr.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PUNCHCLOCK_LOG";

/// Install the global subscriber. `verbose` forces `debug` for this crate,
/// otherwise `PUNCHCLOCK_LOG` is honoured (default `warn`).
pub fn enable_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME")))
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .with_env_var(LOG_ENV)
            .from_env_lossy()
    };

    // A second init (tests calling run() twice) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
