//! fern log dispatch for the server binary

use crate::error::{Result as ServerErrorResult, ServerError};

use sso_config::LogLevel;

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

/// Crates whose debug output drowns out the login trail.
const NOISY_TARGETS: &[&str] = &["sqlx", "hyper", "tower_http"];

/// Route `log` records to a file, colored stdout, or plain stdout.
///
/// File output is never colored.
pub fn initialize(
    log_level: LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = *log_level;

    let mut dispatch = Dispatch::new().level(level_filter);
    for target in NOISY_TARGETS {
        dispatch = dispatch.level_for(*target, level_filter.min(LevelFilter::Warn));
    }

    let colors = (colored && log_file.is_none()).then(level_colors);
    dispatch = dispatch.format(move |out, message, record| {
        let date = humantime::format_rfc3339_seconds(SystemTime::now());
        match &colors {
            Some(colors) => out.finish(format_args!(
                "[{} - {}] {} [{}]",
                date,
                colors.color(record.level()),
                message,
                record.target()
            )),
            None => out.finish(format_args!(
                "[{} - {}] {} [{}]",
                date,
                record.level(),
                message,
                record.target()
            )),
        }
    });

    dispatch = match &log_file {
        Some(path) => dispatch.chain(fern::log_file(path).map_err(|e| ServerError::Logger {
            message: format!("Failed to open log file {}: {}", path.display(), e),
        })?),
        None => dispatch.chain(std::io::stdout()),
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    info!(
        "Logger initialized: level={}, output={}",
        level_filter,
        log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string())
    );

    Ok(())
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}
