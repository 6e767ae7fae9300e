//! Logging.
//!
//! All diagnostic output goes through the `log` facade. This module only
//! installs the backend, which writes one line per record to stdout.

use chrono::Local;
use log::LevelFilter;
use crate::error::Failed;


/// Installs the process logger with the given maximum level.
///
/// This should happen before anything else that might want to log. It can
/// only succeed once per process.
pub fn init(level: LevelFilter) -> Result<(), Failed> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
        .map_err(|err| {
            println!("Failed to initialize logger: {}", err);
            Failed
        })
}

/// Determines the log level from the number of `-v` and `-q` flags.
pub fn level_from_verbosity(verbose: u64, quiet: u64) -> LevelFilter {
    match verbose as i64 - quiet as i64 {
        i if i <= -2 => LevelFilter::Error,
        -1 => LevelFilter::Warn,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
