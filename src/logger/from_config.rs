//! Console logger built from the attrlog config file.

use super::Logger;
use crate::config::Config;
use crate::handler::CliHandler;
use crate::internal;
use std::sync::Arc;

impl Logger {
    /// Console logger on stderr configured from the default config file. A missing or
    /// unreadable config falls back to defaults.
    #[must_use]
    pub fn from_config() -> Self {
        internal::debug("LOGGER", "Building logger from config");
        let config = Config::load().unwrap_or_else(|e| {
            internal::warn("LOGGER", &format!("Config not loaded, using defaults: {e}"));
            Config::default()
        });
        Self::from_config_with(&config)
    }

    /// Console logger on stderr configured from `config`.
    #[must_use]
    pub fn from_config_with(config: &Config) -> Self {
        internal::debug(
            "LOGGER",
            &format!(
                "Log level: {}, color: {}",
                config.parse_level(),
                config.parse_color()
            ),
        );
        Self::new(Arc::new(CliHandler::stderr(config.cli_handler_options())))
    }
}
