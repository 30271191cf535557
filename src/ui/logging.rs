//! ui::logging
//!
//! Tracing initialisation for the binary.
//!
//! Call [`init_tracing`] once at program start. `RUST_LOG` takes precedence
//! over the level derived from the verbosity flags. Logs go to stderr so
//! they never mix with the changelog echoed on stdout.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::output::Verbosity;

/// Default level for a verbosity setting.
pub fn level_for(verbosity: Verbosity) -> Level {
    match verbosity {
        Verbosity::Quiet => Level::ERROR,
        Verbosity::Normal => Level::WARN,
        Verbosity::Debug => Level::DEBUG,
    }
}

/// Initialise the global tracing subscriber.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init_tracing(verbosity: Verbosity) {
    let level = level_for(verbosity);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_verbosity_enables_debug_level() {
        assert_eq!(level_for(Verbosity::Debug), Level::DEBUG);
        assert_eq!(level_for(Verbosity::Normal), Level::WARN);
    }

    #[test]
    fn init_is_idempotent() {
        init_tracing(Verbosity::Normal);
        init_tracing(Verbosity::Debug);
    }
}
