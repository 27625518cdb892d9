//! Tests for styles and the color-stripping writer.

mod common;

use attrlog::ColorChoice;
use attrlog::fmt::{Color, LevelStyles, Style};
use attrlog::output::{ColorWriter, strip_ansi};
use attrlog::Level;
use common::SharedBuf;
use std::io::Write;

#[test]
fn color_from_hex() {
    assert_eq!(Color::from_hex("#ff8000"), Color::Rgb(255, 128, 0));
    assert_eq!(Color::from_hex("ff8000"), Color::Rgb(255, 128, 0));
    assert_eq!(Color::from_hex("#fff"), Color::White);
}

#[test]
fn color_from_name() {
    assert_eq!(Color::from_name("Red"), Some(Color::Red));
    assert_eq!(Color::from_name("purple"), Some(Color::Magenta));
    assert_eq!(Color::from_name("chartreuse"), None);
}

#[test]
fn style_parse_and_sgr() {
    let style = Style::parse("bold dim cyan").unwrap();
    assert_eq!(style.sgr(), "\x1b[1;2;36m");
    assert_eq!(Style::parse("#010203").unwrap().sgr(), "\x1b[38;2;1;2;3m");
    assert!(Style::parse("plain").unwrap().is_plain());
    assert!(Style::parse("bold nope").is_none());
}

#[test]
fn plain_style_paints_nothing() {
    let mut buf = String::new();
    Style::new().paint(&mut buf, "text");
    assert_eq!(buf, "text");
}

#[test]
fn default_level_styles() {
    let styles = LevelStyles::default();
    assert_eq!(styles.get(Level::ERROR), Style::new().fg(Color::Red));
    assert_eq!(styles.get(Level::DEBUG), Style::new().dim());
    assert!(LevelStyles::empty().get(Level::INFO).is_plain());
}

#[test]
fn color_choice_parsing() {
    assert_eq!("always".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
    assert_eq!("NEVER".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
    assert!("maybe".parse::<ColorChoice>().is_err());
}

#[test]
fn explicit_choices_ignore_terminal() {
    assert!(ColorChoice::Always.should_color(false));
    assert!(!ColorChoice::Never.should_color(true));
    assert!(!ColorChoice::Auto.should_color(false));
}

#[test]
fn writer_strips_when_not_colored() {
    let buf = SharedBuf::new();
    let mut writer = ColorWriter::new(buf.clone(), ColorChoice::Never, true);
    writer.write_all(b"\x1b[34m  \xe2\x80\xa2\x1b[0m msg\n").unwrap();
    assert_eq!(buf.contents(), "  • msg\n");
}

#[test]
fn writer_passes_through_when_colored() {
    let buf = SharedBuf::new();
    let mut writer = ColorWriter::new(buf.clone(), ColorChoice::Always, false);
    assert!(writer.is_colored());
    writer.write_all(b"\x1b[31mred\x1b[0m").unwrap();
    assert_eq!(buf.contents(), "\x1b[31mred\x1b[0m");
}

#[test]
fn strip_ansi_text() {
    assert_eq!(strip_ansi("\x1b[1;38;2;1;2;3mhi\x1b[0m there"), "hi there");
}
