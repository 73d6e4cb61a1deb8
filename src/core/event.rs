//! Event record and the fluent per-event API
//!
//! An [`Event`] is one in-flight log record between allocation and commit.
//! Callers never hold an `Event` directly; they hold an [`EventHandle`],
//! which is either active (owning a pooled event) or disabled (the level
//! was filtered out), with every operation a no-op on the disabled variant.

use super::context::TraceContext;
use super::fields::{FieldValue, Fields};
use super::level::Level;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::Location;

/// Caller-capture mode for a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerMode {
    /// No call-site information is recorded.
    #[default]
    Off = 0,
    /// Record the call site, rendering only the final path component.
    ShortFile = 1,
    /// Record the call site with the full file path.
    LongFile = 2,
}

impl CallerMode {
    pub(crate) fn from_u8(value: u8) -> CallerMode {
        match value {
            1 => CallerMode::ShortFile,
            2 => CallerMode::LongFile,
            _ => CallerMode::Off,
        }
    }
}

/// Symbolic description of a commit call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// Module path of the caller, when supplied by the level macros.
    pub function: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

/// One in-flight log record.
///
/// Events are pooled: after delivery every mutable field is cleared and the
/// record returns to the free-list. Between allocation and commit an event
/// is owned by exactly one caller thread.
#[derive(Debug)]
pub struct Event {
    pub level: Level,
    pub data: Fields,
    pub message: String,
    /// Rendered description attached via `with_error`, serialized under the
    /// reserved `error` key, separate from `data`.
    pub err: Option<String>,
    pub time: DateTime<Utc>,
    pub caller: Option<Caller>,
    pub context: Option<TraceContext>,
    /// Caller mode stamped at commit so the formatter knows whether to
    /// shorten file paths.
    pub(crate) caller_mode: CallerMode,
    /// Module path recorded ahead of commit by the level macros.
    pub(crate) function: Option<&'static str>,
}

impl Event {
    pub(crate) fn new(level: Level) -> Self {
        Self {
            level,
            data: Fields::new(),
            message: String::new(),
            err: None,
            time: Utc::now(),
            caller: None,
            context: None,
            caller_mode: CallerMode::Off,
            function: None,
        }
    }

    /// Insert a single field. Intended for hooks mutating an event before
    /// formatting; a later insert for the same key wins.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.data.insert(key.into(), value.into());
    }

    /// Clear all mutable state ahead of returning to the pool.
    pub(crate) fn reset(&mut self) {
        self.data.clear();
        self.message.clear();
        self.err = None;
        self.caller = None;
        self.context = None;
        self.caller_mode = CallerMode::Off;
        self.function = None;
    }
}

/// Fluent handle over an event: either active or disabled.
///
/// Every chained operation is defined on both variants; the disabled
/// variant short-circuits, so a filtered-out call chain is harmless.
#[must_use = "an event does nothing until `log` is called"]
pub struct EventHandle<'a> {
    logger: &'a Logger,
    event: Option<Box<Event>>,
}

impl<'a> EventHandle<'a> {
    pub(crate) fn active(logger: &'a Logger, event: Box<Event>) -> Self {
        Self {
            logger,
            event: Some(event),
        }
    }

    pub(crate) fn disabled(logger: &'a Logger) -> Self {
        Self {
            logger,
            event: None,
        }
    }

    /// Whether this event survived level filtering.
    pub fn is_enabled(&self) -> bool {
        self.event.is_some()
    }

    /// Merge a single field; a later value for the same key wins.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        if let Some(event) = self.event.as_mut() {
            event.data.insert(key.into(), value.into());
        }
        self
    }

    /// Merge a field map; new values win on key collision.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        if let Some(event) = self.event.as_mut() {
            event.data.extend(fields);
        }
        self
    }

    /// Attach an error, rendered under the reserved `error` key.
    pub fn with_error(mut self, err: impl fmt::Display) -> Self {
        if let Some(event) = self.event.as_mut() {
            event.err = Some(err.to_string());
        }
        self
    }

    /// Attach an advisory correlation context. Has no effect on delivery.
    pub fn with_context(mut self, context: TraceContext) -> Self {
        if let Some(event) = self.event.as_mut() {
            event.context = Some(context);
        }
        self
    }

    /// Record the caller's module path, surfaced as `func` when caller
    /// capture is enabled. The level macros supply this automatically.
    pub fn with_function(mut self, function: &'static str) -> Self {
        if let Some(event) = self.event.as_mut() {
            event.function = Some(function);
        }
        self
    }

    /// Commit the event: stamp the timestamp, capture the call site when
    /// the logger's caller mode is enabled, and hand it to the delivery
    /// pipeline. Consumes the handle; the event must not be touched again.
    #[track_caller]
    pub fn log(mut self, message: impl Into<String>) {
        let Some(mut event) = self.event.take() else {
            return;
        };

        event.message = message.into();
        event.time = Utc::now();

        let mode = self.logger.caller_mode();
        event.caller_mode = mode;
        if mode != CallerMode::Off {
            let location = Location::caller();
            event.caller = Some(Caller {
                function: event.function,
                file: location.file(),
                line: location.line(),
            });
        }

        self.logger.submit(event);
    }
}
