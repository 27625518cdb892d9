//! `attrlog` - Structured logging handlers for terminals, buffers and adapters.
//!
//! Records carry a level, a message and typed key/value attributes. Handlers decide
//! how they are rendered:
//! - [`CliHandler`]: compact, colored console lines with a level glyph and padded message
//! - [`TextHandler`] and [`JsonHandler`]: logfmt and JSON lines
//! - [`buffering::BufferingHandler`]: capture records now, replay them later
//! - [`observer::ObserverHandler`]: in-memory capture for tests
//!
//! # Example
//!
//! ```
//! use attrlog::{Attr, CliHandler, CliHandlerOptions, ColorChoice, Level, Logger};
//! use std::sync::Arc;
//!
//! let handler = CliHandler::new(
//!     std::io::sink(),
//!     CliHandlerOptions::new().level(Level::DEBUG).color(ColorChoice::Never),
//! );
//! let logger = Logger::new(Arc::new(handler)).with_group("db");
//!
//! logger.info("connected", [Attr::string("host", "localhost")]);
//! logger.debug("query done", [Attr::int("rows", 3)]);
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `attrlog` binary that pretty-prints JSON log lines

pub mod adapter;
pub mod buffering;
pub mod config;
pub mod context;
pub mod error;
pub mod fmt;
pub mod handler;
pub mod internal;
pub mod level;
pub mod logger;
pub mod observer;
pub mod output;
pub mod record;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use context::{Context, from_context, with_logger};
pub use error::Error;
pub use handler::{
    CliHandler, CliHandlerOptions, Handler, HandlerOptions, JsonHandler, PrefixOptions,
    ReplaceAttr, TextHandler,
};
pub use level::{Level, LevelVar, Leveler};
pub use logger::{Logger, default_logger, set_default};
pub use output::ColorChoice;
pub use record::{AnyValue, Attr, LogValuer, Record, Value, attr, err};
