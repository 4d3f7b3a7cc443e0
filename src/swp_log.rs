// Logging setup for the binary. The library only emits `tracing` events.

use std::env;
use std::io;

use tracing::Level;

pub const LOG_ENV: &str = "SWEEP_LOG";

/// Pick the log level: `SWEEP_LOG` first, then the settings value, then warn.
pub fn resolve_level(from_settings: &str) -> Level {
    pick_level(env::var(LOG_ENV).ok().as_deref(), from_settings)
}

/// First of `from_env` and `from_settings` that parses as a level.
pub fn pick_level(from_env: Option<&str>, from_settings: &str) -> Level {
    from_env
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| from_settings.trim().parse().ok())
        .unwrap_or(Level::WARN)
}

/// Install a fmt subscriber writing to stderr so it never mixes with the board.
pub fn init(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run `f` with a temporary warn-level stderr subscriber, for work that
/// happens before the configured level is known (loading settings).
pub fn during_startup<T>(f: impl FnOnce() -> T) -> T {
    let boot = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::with_default(boot, f)
}
