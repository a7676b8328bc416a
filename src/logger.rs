use std::{str::FromStr, time::SystemTime};

use colored::Colorize;
use log::{Level, LevelFilter};

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

pub fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let level = match record.level() {
                Level::Error => "ERROR".red(),
                Level::Warn => "WARN".yellow(),
                Level::Info => "INFO".green(),
                Level::Debug => "DEBUG".blue(),
                Level::Trace => "TRACE".normal(),
            };
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                level,
                record.target(),
                message
            ))
        })
        .level(level)
        // hyper is chatty below warn
        .level_for("hyper", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
