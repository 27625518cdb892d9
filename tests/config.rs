//! Tests for loading the TOML config and turning it into handler options.

mod common;

use attrlog::fmt::{Color, Style};
use attrlog::{Attr, CliHandler, ColorChoice, Config, Error, Level, Logger};
use common::SharedBuf;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn empty_config_is_default() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.parse_level(), Level::INFO);
    assert_eq!(config.parse_color(), ColorChoice::Auto);
    assert_eq!(config.prefix.padding, 2);
    assert_eq!(config.message.padding, 0);
    assert!(config.replace_attr().is_none());
}

#[test]
fn load_from_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("config.toml");
    fs::write(
        &path,
        r##"
[general]
level = "debug"
color = "never"

[prefix]
padding = 0
style = "ascii"
glyphs = { error = "E" }

[colors]
info = "bold #ff0000"

[message]
padding = 10
"##,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::DEBUG);
    assert_eq!(config.parse_color(), ColorChoice::Never);

    let glyphs = config.glyph_set();
    assert_eq!(glyphs.get(Level::INFO), "*");
    assert_eq!(glyphs.get(Level::ERROR), "E");

    let styles = config.level_styles();
    assert_eq!(
        styles.get(Level::INFO),
        Style::new().bold().fg(Color::Rgb(255, 0, 0))
    );
    assert_eq!(styles.get(Level::WARN), Style::new().fg(Color::Yellow));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let tmp_dir = TempDir::new().unwrap();
    let err = Config::load_from(&tmp_dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}

#[test]
fn malformed_toml_is_an_error() {
    let err = Config::from_toml_str("[general\nlevel = ").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn unknown_values_fall_back() {
    let config = Config::from_toml_str(
        r#"
[general]
level = "loud"
color = "sometimes"

[colors]
info = "sparkly"
"#,
    )
    .unwrap();
    assert_eq!(config.parse_level(), Level::INFO);
    assert_eq!(config.parse_color(), ColorChoice::Auto);
    assert_eq!(config.level_styles().get(Level::INFO), Style::new().fg(Color::Blue));
}

#[test]
fn redaction_replaces_or_drops() {
    let config = Config::from_toml_str(
        r#"
[redact]
keys = ["password"]
replacement = "***"
"#,
    )
    .unwrap();

    let buf = SharedBuf::new();
    let opts = config.cli_handler_options().message_padding(-1);
    let logger = Logger::new(Arc::new(CliHandler::new(buf.clone(), opts)));
    logger.info(
        "login",
        [
            Attr::string("user", "ann"),
            Attr::group("creds", [Attr::string("password", "hunter2")]),
        ],
    );
    assert_eq!(buf.contents(), "  • login user=ann creds.password=***\n");

    let config = Config::from_toml_str("[redact]\nkeys = [\"password\"]\n").unwrap();
    let buf = SharedBuf::new();
    let opts = config.cli_handler_options().message_padding(-1);
    let logger = Logger::new(Arc::new(CliHandler::new(buf.clone(), opts)));
    logger.info("login", [Attr::string("password", "hunter2")]);
    assert_eq!(buf.contents(), "  • login\n");
}

#[test]
fn handler_options_carry_level() {
    let config = Config::from_toml_str("[general]\nlevel = \"warn\"\n").unwrap();
    let buf = SharedBuf::new();
    let logger = Logger::new(Arc::new(CliHandler::new(
        buf.clone(),
        config.cli_handler_options(),
    )));
    logger.info("hidden", []);
    logger.error("shown", []);
    assert_eq!(buf.lines().len(), 1);
}

#[test]
fn logger_and_internal_logger_from_config() {
    let config = Config::from_toml_str("[general]\nlevel = \"error\"\ncolor = \"never\"\n").unwrap();
    let logger = Logger::from_config_with(&config);
    assert!(!logger.enabled(&attrlog::Context::background(), Level::WARN));

    attrlog::internal::init_with_config(&config);
    assert!(attrlog::internal::is_initialized());
    attrlog::internal::debug("TEST", "filtered by the configured level");
}
