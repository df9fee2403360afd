//! Logger initialization.
//!
//! Two output formats are supported. Plain output is colored for a terminal;
//! JSON output writes one object per line for log shippers. Access lines
//! (target `site_insight::access`) are rendered with a timestamp in both.

use std::io::Write;

use colored::*;
use env_logger::fmt::Formatter;
use log::{LevelFilter, Record};

use crate::config::{LogFormat, ACCESS_LOG_TARGET};
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # CLI level wins over RUST_LOG
/// RUST_LOG=debug site_insight --log-level info serve
///
/// # Machine-readable output
/// site_insight --log-format json serve
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("site_insight", level);

    match format {
        LogFormat::Json => {
            builder.format(write_json);
        }
        LogFormat::Plain => {
            builder.format(write_plain);
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn is_access_line(record: &Record) -> bool {
    record.target() == ACCESS_LOG_TARGET
}

fn write_json(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let kind = if is_access_line(record) { "access" } else { "app" };
    let line = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "kind": kind,
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{}", line)
}

fn write_plain(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    if is_access_line(record) {
        return writeln!(
            buf,
            "{} {} {}",
            chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.3f")
                .to_string()
                .dimmed(),
            "access".cyan(),
            record.args()
        );
    }

    let level = record.level();
    let (emoji, colored_level) = match level {
        log::Level::Error => ("❌", level.to_string().red()),
        log::Level::Warn => ("⚠️", level.to_string().yellow()),
        log::Level::Info => ("✔️", level.to_string().green()),
        log::Level::Debug => ("🔍", level.to_string().blue()),
        log::Level::Trace => ("🔬", level.to_string().purple()),
    };

    writeln!(
        buf,
        "{} {} [{}] {}",
        emoji,
        record.target().cyan(),
        colored_level,
        record.args()
    )
}
