//! Log output for the `sp` binary.
//!
//! stdout carries command results, so console logging goes to stderr.

use crate::error::{AppError, Result as AppErrorResult};

use std::io::IsTerminal;
use std::path::Path;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, debug};

/// Targets that log every connection at debug level.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls"];

/// Install the global logger.
///
/// `log_file` replaces console output when set. `colored` only takes effect
/// when stderr is a terminal.
pub fn initialize(
    log_level: sp_config::LogLevel,
    log_file: Option<&Path>,
    colored: bool,
) -> AppErrorResult<()> {
    let output = match log_file {
        Some(path) => file_dispatch(path)?,
        None => console_dispatch(colored && std::io::stderr().is_terminal()),
    };

    let mut root = Dispatch::new().level(log_level.0);
    for target in QUIET_TARGETS {
        root = root.level_for(*target, log_level.0.min(LevelFilter::Warn));
    }

    root.chain(output).apply().map_err(|e| AppError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    debug!(
        "Logging at {} to {}",
        log_level.0,
        log_file.map_or_else(|| "stderr".to_string(), |p| p.display().to_string())
    );
    Ok(())
}

/// Plain lines with millisecond timestamps and the emitting module.
pub(crate) fn file_dispatch(path: &Path) -> AppErrorResult<Dispatch> {
    let file = fern::log_file(path).map_err(|e| AppError::Logger {
        message: format!("Failed to open log file {}: {e}", path.display()),
    })?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {} {}",
                humantime::format_rfc3339_millis(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(file))
}

pub(crate) fn console_dispatch(colored: bool) -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = humantime::format_rfc3339_seconds(SystemTime::now());
            if colored {
                out.finish(format_args!(
                    "[{timestamp} {}] {message}",
                    colors.color(record.level())
                ))
            } else {
                out.finish(format_args!("[{timestamp} {}] {message}", record.level()))
            }
        })
        .chain(std::io::stderr())
}
