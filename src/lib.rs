//! # Logflow
//!
//! A structured, leveled event logger with fluent per-event fields, hooks,
//! and buffered background delivery.
//!
//! ## Features
//!
//! - **Fluent events**: chain fields, an error, and a correlation context
//!   onto a level-gated event, then commit with `log`
//! - **Buffered delivery**: a bounded queue and a single drain thread;
//!   overflow falls back to inline delivery, never silent drops
//! - **Hooks**: level-subscribed observers that run before formatting
//! - **Pluggable output**: JSON or text formatters over console, file, or
//!   in-memory sinks
//!
//! ## Example
//!
//! ```
//! use logflow::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .sink(sink.clone())
//!     .build();
//!
//! logger
//!     .info()
//!     .with_field("name", "sunchp")
//!     .log("hello world");
//!
//! assert_eq!(sink.len(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Caller, CallerMode, Event, EventHandle, FieldValue, Fields, Formatter, Hook,
        JsonFormatter, Level, LevelHooks, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        Result, TextFormatter, TimestampFormat, TraceContext, DEFAULT_QUEUE_CAPACITY,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, Sink};
}

pub use crate::core::{
    Caller, CallerMode, Event, EventHandle, FieldValue, Fields, Formatter, Hook, JsonFormatter,
    Level, LevelHooks, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, TextFormatter,
    TimestampFormat, TraceContext, DEFAULT_QUEUE_CAPACITY, ERROR_KEY,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, Sink};
