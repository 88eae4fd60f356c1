use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::ENV_LOG_LEVEL;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// Maps `error|warn|info|debug|trace` to a filter; anything else is `Info`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Installs a stderr logger for the process. A second call is ignored.
///
/// # Errors
/// Returns an error if the log4rs configuration cannot be built.
pub fn init_console(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(appender)))
        .build(Root::builder().appender("console").build(parse_level(level)))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// [`init_console`] with the level read from `QUERYKIT_LOG_LEVEL`.
///
/// # Errors
/// Returns an error if the log4rs configuration cannot be built.
pub fn configure_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var(ENV_LOG_LEVEL).ok();
    init_console(level.as_deref())
}
