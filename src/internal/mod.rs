//! attrlog's own diagnostic logger, bootstrapped early so config problems and replay
//! failures are reported through the same console handler users see.
//!
//! Uses `OnceLock`, so the first `init*` call wins and later ones are no-ops.

use crate::config::Config;
use crate::handler::CliHandler;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Attr;
use std::sync::{Arc, OnceLock};

static INTERNAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Loads the config itself. Used when no caller provides one.
pub fn init() {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| {
        let config = Config::load().unwrap_or_default();
        build_internal_logger(&config)
    });
    if !was_init {
        debug("INTERNAL", "Internal logger ready");
    }
}

/// Reuses an already-loaded config.
pub fn init_with_config(config: &Config) {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| build_internal_logger(config));
    if !was_init {
        debug("INTERNAL", &format!("Log level: {}", config.parse_level()));
        debug("INTERNAL", "Internal logger ready");
    }
}

#[must_use]
pub fn is_initialized() -> bool {
    INTERNAL_LOGGER.get().is_some()
}

fn build_internal_logger(config: &Config) -> Logger {
    Logger::new(Arc::new(CliHandler::stderr(config.cli_handler_options())))
}

/// Pre-init calls vanish.
fn log(level: Level, scope: &str, msg: &str) {
    if let Some(logger) = INTERNAL_LOGGER.get() {
        logger.log(level, msg, [Attr::string("component", scope)]);
    }
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::TRACE, scope, msg);
}

/// Startup and teardown diagnostics.
pub fn debug(scope: &str, msg: &str) {
    log(Level::DEBUG, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::INFO, scope, msg);
}

/// Non-fatal anomalies such as an unknown config value.
pub fn warn(scope: &str, msg: &str) {
    log(Level::WARN, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::ERROR, scope, msg);
}
