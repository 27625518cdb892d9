//! Tests for the trace-log adapter.

use attrlog::adapter::{TraceLevel, TraceLog, TraceLogAdapter};
use attrlog::adapter::tracelog::INVALID_LEVEL_KEY;
use attrlog::observer::{ObservedLogs, ObserverHandler};
use attrlog::{AnyValue, Attr, Context, Level, Logger, Value};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

fn observed() -> (Logger, Arc<ObservedLogs>) {
    let (handler, logs) = ObserverHandler::new(Level::TRACE);
    (Logger::new(Arc::new(handler)), logs)
}

fn data(pairs: Vec<(&str, Value)>) -> HashMap<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn keys(attrs: &[Attr]) -> Vec<&str> {
    attrs.iter().map(|a| a.key.as_str()).collect()
}

fn test_error(msg: &str) -> Value {
    Value::Any(AnyValue::error(io::Error::other(msg.to_string())))
}

#[test]
fn levels_map_to_named_levels() {
    let cases = [
        (TraceLevel::TRACE, Level::TRACE),
        (TraceLevel::DEBUG, Level::DEBUG),
        (TraceLevel::INFO, Level::INFO),
        (TraceLevel::WARN, Level::WARN),
        (TraceLevel::ERROR, Level::ERROR),
    ];
    for (trace_level, expected) in cases {
        let (logger, logs) = observed();
        TraceLogAdapter::new(logger).log(
            &Context::background(),
            trace_level,
            "Hey, it's a test",
            data(vec![("foo", Value::from("bar"))]),
        );

        let records = logs.take_all();
        assert_eq!(records.len(), 1, "{trace_level}");
        assert_eq!(records[0].level, expected);
        assert_eq!(records[0].message, "Hey, it's a test");
        assert_eq!(keys(&records[0].attrs), ["foo"]);
        assert_eq!(records[0].attrs[0].value.as_str(), Some("bar"));
    }
}

#[test]
fn error_is_logged_first() {
    let (logger, logs) = observed();
    TraceLogAdapter::new(logger).log(
        &Context::background(),
        TraceLevel::ERROR,
        "Hey, there was an error",
        data(vec![
            ("sql", Value::from("SELECT * FROM users")),
            ("err", test_error("test error")),
        ]),
    );

    let records = logs.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::ERROR);
    assert_eq!(keys(&records[0].attrs), ["err", "sql"]);
    assert_eq!(records[0].attrs[0].value.to_string(), "test error");
}

#[test]
fn matching_errors_are_ignored() {
    let (logger, logs) = observed();
    let adapter =
        TraceLogAdapter::new(logger).ignore_errors(|err| err.to_string() == "ignored error");

    adapter.log(
        &Context::background(),
        TraceLevel::ERROR,
        "Hey, there was an error",
        data(vec![
            ("err", test_error("ignored error")),
            ("sql", Value::from("SELECT * FROM users")),
        ]),
    );
    assert!(logs.is_empty());

    adapter.log(
        &Context::background(),
        TraceLevel::ERROR,
        "Hey, there was an error",
        data(vec![("err", test_error("other error"))]),
    );
    assert_eq!(logs.len(), 1);
}

#[test]
fn attributes_are_ordered() {
    let (logger, logs) = observed();
    TraceLogAdapter::new(logger).log(
        &Context::background(),
        TraceLevel::INFO,
        "Hey, it's a test",
        data(vec![
            ("sql", Value::from("SELECT * FROM users")),
            ("args", Value::Any(AnyValue::Json(serde_json::json!([1, 2, 3])))),
            ("pid", Value::from(123)),
            ("commandTag", Value::from("SELECT 0 1")),
            ("err", test_error("test error")),
        ]),
    );

    let records = logs.all();
    assert_eq!(
        keys(&records[0].attrs),
        ["err", "sql", "args", "commandTag", "pid"]
    );
}

#[test]
fn logger_scope_is_kept() {
    let (logger, logs) = observed();
    let logger = logger.with([Attr::string("component", "driver.sql")]);
    TraceLogAdapter::new(logger).log(
        &Context::background(),
        TraceLevel::INFO,
        "Hey, it's a test",
        data(vec![("foo", Value::from("bar"))]),
    );

    let records = logs.all();
    assert_eq!(keys(&records[0].attrs), ["foo", "component"]);
}

#[test]
fn levels_can_be_remapped() {
    let (logger, logs) = observed();
    TraceLogAdapter::new(logger)
        .remap_level(TraceLevel::INFO, Level::DEBUG)
        .log(
            &Context::background(),
            TraceLevel::INFO,
            "Hey, it's a test",
            data(vec![("foo", Value::from("bar"))]),
        );
    assert_eq!(logs.all()[0].level, Level::DEBUG);
}

#[test]
fn unknown_level_is_flagged() {
    let (logger, logs) = observed();
    TraceLogAdapter::new(logger).log(
        &Context::background(),
        TraceLevel(9),
        "odd",
        HashMap::new(),
    );

    let records = logs.all();
    assert_eq!(records[0].level, Level::ERROR);
    assert_eq!(keys(&records[0].attrs), [INVALID_LEVEL_KEY]);
    assert_eq!(records[0].attrs[0].value.to_string(), "invalid level 9");
}

#[test]
fn disabled_levels_are_skipped() {
    let (handler, logs) = ObserverHandler::new(Level::WARN);
    TraceLogAdapter::new(Logger::new(Arc::new(handler))).log(
        &Context::background(),
        TraceLevel::DEBUG,
        "quiet",
        HashMap::new(),
    );
    assert!(logs.is_empty());
}
