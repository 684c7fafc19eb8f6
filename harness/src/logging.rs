//! `env_logger` setup with an elapsed-time prefix.

use std::io::Write;
use std::time::Instant;

use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

/// Install the global logger. `RUST_LOG` wins when set; otherwise
/// `default_level` raised by `verbosity` steps (capped at `Trace`).
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger is already installed.
pub fn init_logger(default_level: LevelFilter, verbosity: usize) -> Result<(), SetLoggerError> {
    let start_time = Instant::now();
    let level = level_from_verbosity(default_level, verbosity);

    Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format(move |buf, record| {
            let elapsed = start_time.elapsed().as_millis();
            writeln!(
                buf,
                "{:>6}.{:<03} [{:<5}] {}",
                elapsed / 1000,
                elapsed % 1000,
                record.level(),
                record.args()
            )
        })
        .try_init()
}

fn level_from_verbosity(default_level: LevelFilter, verbosity: usize) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let start = LEVELS
        .iter()
        .position(|&l| l == default_level)
        .unwrap_or(0);
    LEVELS
        .get(start.saturating_add(verbosity))
        .copied()
        .unwrap_or(LevelFilter::Trace)
}
