//! Bridges from other logging interfaces into a [`Logger`](crate::Logger).

pub mod tracelog;

pub use tracelog::{TraceLevel, TraceLog, TraceLogAdapter};
