//! Tests for the logfmt handler.

mod common;

use attrlog::context::Context;
use attrlog::record::{LEVEL_KEY, TIME_KEY};
use attrlog::{
    AnyValue, Attr, Handler, HandlerOptions, Level, LogValuer, Logger, Record, TextHandler,
    Value,
};
use common::SharedBuf;
use std::sync::Arc;

fn no_time() -> HandlerOptions {
    HandlerOptions::new()
        .level(Level::TRACE)
        .replace_attr(|groups, attr| (!groups.is_empty() || attr.key != TIME_KEY).then_some(attr))
}

fn logger(opts: HandlerOptions) -> (Logger, SharedBuf) {
    let buf = SharedBuf::new();
    (Logger::new(Arc::new(TextHandler::new(buf.clone(), opts))), buf)
}

#[test]
fn builtins_then_attrs() {
    let (logger, buf) = logger(no_time());
    logger.info("hello world", [Attr::string("user", "ann"), Attr::int("n", 2)]);
    assert_eq!(buf.contents(), "level=INFO msg=\"hello world\" user=ann n=2\n");
}

#[test]
fn time_is_written_when_present() {
    let handler = TextHandler::new(std::io::sink(), HandlerOptions::new());
    let line = handler.format_record(&Record::new(Level::WARN, "m"));
    assert!(line.starts_with("time="));
    assert!(line.contains(" level=WARN msg=m"));
}

#[test]
fn time_is_omitted_when_absent() {
    let handler = TextHandler::new(std::io::sink(), HandlerOptions::new());
    let line = handler.format_record(&Record::new(Level::INFO, "m").with_time(None));
    assert_eq!(line, "level=INFO msg=m\n");
}

#[test]
fn level_offsets_are_named() {
    let (logger, buf) = logger(no_time());
    logger.log(Level::new(2), "m", []);
    assert_eq!(buf.contents(), "level=INFO+2 msg=m\n");
}

#[test]
fn groups_and_scope() {
    let (logger, buf) = logger(no_time());
    logger
        .with([Attr::string("svc", "api")])
        .with_group("req")
        .info("done", [Attr::group("user", [Attr::int("id", 7)])]);
    assert_eq!(
        buf.contents(),
        "level=INFO msg=done svc=api req.user.id=7\n"
    );
}

#[test]
fn replace_can_rename_level_key() {
    let (logger, buf) = logger(HandlerOptions::new().replace_attr(|_, attr| match attr.key.as_str() {
        TIME_KEY => None,
        LEVEL_KEY => Some(Attr::new("severity", attr.value)),
        _ => Some(attr),
    }));
    logger.error("boom", []);
    assert_eq!(buf.contents(), "severity=ERROR msg=boom\n");
}

#[test]
fn special_values_are_quoted() {
    let (logger, buf) = logger(no_time());
    logger.info(
        "m",
        [
            Attr::string("eq", "a=b"),
            Attr::string("quote", "say \"hi\""),
            Attr::string("tab", "a\tb"),
            Attr::string("bell", "\u{7}"),
        ],
    );
    assert_eq!(
        buf.contents(),
        "level=INFO msg=m eq=\"a=b\" quote=\"say \\\"hi\\\"\" tab=\"a\\tb\" bell=\"\\u{7}\"\n"
    );
}

#[test]
fn lazy_values_are_resolved() {
    struct Point {
        x: i64,
        y: i64,
    }

    impl LogValuer for Point {
        fn log_value(&self) -> Value {
            Value::Group(vec![Attr::int("x", self.x), Attr::int("y", self.y)])
        }
    }

    let (logger, buf) = logger(no_time());
    logger.info("m", [Attr::new("p", Value::lazy(Point { x: 1, y: 2 }))]);
    assert_eq!(buf.contents(), "level=INFO msg=m p.x=1 p.y=2\n");
}

#[test]
fn runaway_lazy_value_becomes_error_text() {
    struct Forever;

    impl LogValuer for Forever {
        fn log_value(&self) -> Value {
            Value::lazy(Self)
        }
    }

    let value = Value::lazy(Forever).resolve();
    assert!(value.as_any().and_then(AnyValue::as_error).is_some());
}

#[test]
fn level_filtering() {
    let buf = SharedBuf::new();
    let handler = TextHandler::new(buf.clone(), HandlerOptions::new().level(Level::WARN));
    assert!(!handler.enabled(&Context::background(), Level::INFO));
    assert!(handler.enabled(&Context::background(), Level::ERROR));
}
