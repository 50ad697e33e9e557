//! # Host Bridge Traits
//!
//! Abstractions the host application implements so the tag core can report
//! into platform facilities without depending on them directly.
//!
//! ## Traits
//!
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! Bridge implementations report failures with [`BridgeError`](error::BridgeError).
//! Platform implementations should convert their native errors and keep the
//! message actionable (include file names, not full paths).

pub mod error;
pub mod platform;
pub mod time;

pub use error::BridgeError;

pub use time::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
