//! JSON line parsing and the pretty-print command.

use crate::context::Context;
use crate::handler::Handler;
use crate::internal;
use crate::level::Level;
use crate::record::{AnyValue, Attr, LEVEL_KEY, MESSAGE_KEY, Record, TIME_KEY, Value};
use chrono::{DateTime, Local};
use serde_json::Map;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::ExitCode;

/// Turns one JSON log line into a record.
///
/// `time`, `level` and `msg` fill the record's built-in fields. Every other key becomes
/// an attribute in document order; nested objects become groups and arrays are kept as
/// JSON values. A missing level means info, a missing message an empty one.
///
/// # Errors
/// Fails on invalid JSON, a non-object line, or an unparseable level.
pub fn parse_line(line: &str) -> Result<Record, crate::Error> {
    let serde_json::Value::Object(mut fields) = serde_json::from_str::<serde_json::Value>(line)? else {
        return Err(crate::Error::Format("log line is not a JSON object".to_string()));
    };

    let level = match fields.remove(LEVEL_KEY) {
        Some(serde_json::Value::String(s)) => s
            .parse::<Level>()
            .map_err(|_| crate::Error::InvalidLevel(s))?,
        Some(other) => return Err(crate::Error::InvalidLevel(other.to_string())),
        None => Level::INFO,
    };

    let message = match fields.remove(MESSAGE_KEY) {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let time = match fields.remove(TIME_KEY) {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|t| t.with_timezone(&Local)),
        _ => None,
    };

    Ok(Record::new(level, message)
        .with_time(time)
        .with_attrs(attrs_from_object(fields)))
}

fn attrs_from_object(fields: Map<String, serde_json::Value>) -> Vec<Attr> {
    fields
        .into_iter()
        .map(|(key, value)| Attr::new(key, value_from_json(value)))
        .collect()
}

fn value_from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Any(AnyValue::Nil),
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Int64)
            .or_else(|| n.as_u64().map(Value::Uint64))
            .or_else(|| n.as_f64().map(Value::Float64))
            .unwrap_or_else(|| Value::String(n.to_string())),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Object(fields) => Value::Group(attrs_from_object(fields)),
        array @ serde_json::Value::Array(_) => Value::Any(AnyValue::Json(array)),
    }
}

/// Handles `attrlog [<input>]`: every non-empty line is parsed and handed to `handler`.
/// Malformed lines are reported through the internal logger and skipped.
#[must_use]
pub fn cmd_pretty(input: Option<&Path>, handler: &dyn Handler) -> ExitCode {
    let reader: Box<dyn BufRead> = match input {
        None => Box::new(io::stdin().lock()),
        Some(path) if path.as_os_str() == "-" => Box::new(io::stdin().lock()),
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                internal::error("CLI", &format!("Cannot open {}: {e}", path.display()));
                return ExitCode::FAILURE;
            }
        },
    };

    let ctx = Context::background();
    let mut processed = 0u64;
    let mut failed = 0u64;
    for line in reader.lines() {
        let line = match line {
            Ok(l) if l.trim().is_empty() => continue,
            Ok(l) => l,
            Err(e) => {
                internal::error("CLI", &format!("Error reading input: {e}"));
                return ExitCode::FAILURE;
            }
        };
        let result = parse_line(&line).and_then(|record| {
            if handler.enabled(&ctx, record.level) {
                handler.handle(&ctx, &record)?;
            }
            Ok(())
        });
        match result {
            Ok(()) => processed += 1,
            Err(e) => {
                internal::warn("CLI", &format!("Skipping line: {e}"));
                failed += 1;
            }
        }
    }

    internal::debug(
        "CLI",
        &format!("Processed {processed} lines, {failed} failed"),
    );
    ExitCode::SUCCESS
}
