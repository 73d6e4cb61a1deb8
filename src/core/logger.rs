//! Logger facade
//!
//! Composes the level gate, the delivery pipeline, the hook registry, the
//! formatter, and the sink. Configuration mutation takes the write side of
//! the shared lock, so in-flight deliveries always see a consistent
//! snapshot.

use super::error::Result;
use super::event::{CallerMode, EventHandle};
use super::formatter::{Formatter, JsonFormatter};
use super::hooks::{Hook, LevelHooks};
use super::level::Level;
use super::metrics::LoggerMetrics;
use super::pipeline::{DeliveryConfig, Pipeline, DEFAULT_QUEUE_CAPACITY};
use crate::core::event::Event;
use crate::sinks::{ConsoleSink, Sink};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

pub struct Logger {
    level: AtomicU8,
    caller_mode: AtomicU8,
    pipeline: Pipeline,
}

impl Logger {
    pub fn new(level: Level, formatter: Box<dyn Formatter>, sink: Box<dyn Sink>) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            caller_mode: AtomicU8::new(CallerMode::Off as u8),
            pipeline: Pipeline::new(DeliveryConfig {
                hooks: LevelHooks::new(),
                formatter,
                sink,
            }),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Current minimum enabled level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Acquire))
    }

    pub fn set_level(&self, level: Level) -> &Self {
        self.level.store(level as u8, Ordering::Release);
        self
    }

    pub fn caller_mode(&self) -> CallerMode {
        CallerMode::from_u8(self.caller_mode.load(Ordering::Acquire))
    }

    pub fn set_caller_mode(&self, mode: CallerMode) -> &Self {
        self.caller_mode.store(mode as u8, Ordering::Release);
        self
    }

    pub fn add_hook<H: Hook + 'static>(&self, hook: H) -> &Self {
        self.pipeline.config().write().hooks.add(Arc::new(hook));
        self
    }

    pub fn set_formatter(&self, formatter: Box<dyn Formatter>) -> &Self {
        self.pipeline.config().write().formatter = formatter;
        self
    }

    pub fn set_sink(&self, sink: Box<dyn Sink>) -> &Self {
        self.pipeline.config().write().sink = sink;
        self
    }

    /// Switch to buffered delivery with the default queue capacity.
    pub fn start(&self) {
        self.pipeline.start(DEFAULT_QUEUE_CAPACITY);
    }

    /// Switch to buffered delivery with an explicit queue capacity.
    pub fn start_with_capacity(&self, capacity: usize) {
        self.pipeline.start(capacity);
    }

    /// Stop buffered delivery, blocking until every event enqueued before
    /// the call has been delivered.
    pub fn stop(&self) {
        self.pipeline.stop();
    }

    pub fn flush(&self) -> Result<()> {
        self.pipeline.flush()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.pipeline.metrics()
    }

    /// Begin an event at the given level. Returns the disabled handle when
    /// the level is filtered out, so the whole call chain is a no-op.
    pub fn event(&self, level: Level) -> EventHandle<'_> {
        if level >= self.level() {
            EventHandle::active(self, self.pipeline.pool().get(level))
        } else {
            EventHandle::disabled(self)
        }
    }

    pub fn trace(&self) -> EventHandle<'_> {
        self.event(Level::Trace)
    }

    pub fn debug(&self) -> EventHandle<'_> {
        self.event(Level::Debug)
    }

    pub fn info(&self) -> EventHandle<'_> {
        self.event(Level::Info)
    }

    pub fn warn(&self) -> EventHandle<'_> {
        self.event(Level::Warn)
    }

    pub fn error(&self) -> EventHandle<'_> {
        self.event(Level::Error)
    }

    pub fn fatal(&self) -> EventHandle<'_> {
        self.event(Level::Fatal)
    }

    pub(crate) fn submit(&self, event: Box<Event>) {
        self.pipeline.submit(event);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(
            Level::Info,
            Box::new(JsonFormatter::new()),
            Box::new(ConsoleSink::stdout()),
        )
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Drain anything still buffered before the queue goes away
        self.stop();
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use logflow::prelude::*;
///
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .sink(MemorySink::new())
///     .buffered(1000)
///     .build();
/// logger.stop();
/// ```
pub struct LoggerBuilder {
    level: Level,
    caller_mode: CallerMode,
    formatter: Box<dyn Formatter>,
    sink: Box<dyn Sink>,
    hooks: Vec<Arc<dyn Hook>>,
    queue_capacity: Option<usize>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            caller_mode: CallerMode::Off,
            formatter: Box::new(JsonFormatter::new()),
            sink: Box::new(ConsoleSink::stdout()),
            hooks: Vec::new(),
            queue_capacity: None,
        }
    }

    /// Set the minimum enabled level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the caller-capture mode
    #[must_use = "builder methods return a new value"]
    pub fn caller_mode(mut self, mode: CallerMode) -> Self {
        self.caller_mode = mode;
        self
    }

    /// Replace the formatter
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replace the sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Register a hook
    #[must_use = "builder methods return a new value"]
    pub fn hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Enable buffered delivery with the given queue capacity.
    ///
    /// If not called, the logger delivers synchronously until `start`.
    #[must_use = "builder methods return a new value"]
    pub fn buffered(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new(self.level, self.formatter, self.sink);
        logger.set_caller_mode(self.caller_mode);
        {
            let mut config = logger.pipeline.config().write();
            for hook in self.hooks {
                config.hooks.add(hook);
            }
        }
        if let Some(capacity) = self.queue_capacity {
            logger.start_with_capacity(capacity);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn memory_logger(level: Level) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::new(level, Box::new(JsonFormatter::new()), Box::new(sink.clone()));
        (logger, sink)
    }

    #[test]
    fn test_enabled_level_produces_live_event() {
        let (logger, sink) = memory_logger(Level::Info);
        let event = logger.info();
        assert!(event.is_enabled());
        event.log("hello");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_disabled_level_is_inert() {
        let (logger, sink) = memory_logger(Level::Info);
        let event = logger.debug();
        assert!(!event.is_enabled());
        event
            .with_field("name", "sunchp")
            .with_error("ignored")
            .log("filtered out");
        assert_eq!(sink.len(), 0);
        assert_eq!(logger.metrics().delivered(), 0);
    }

    #[test]
    fn test_set_level_takes_effect_atomically() {
        let (logger, sink) = memory_logger(Level::Info);
        logger.debug().log("before");
        logger.set_level(Level::Trace);
        logger.debug().log("after");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_field_merge_right_bias_end_to_end() {
        let (logger, sink) = memory_logger(Level::Info);
        logger
            .info()
            .with_field("a", 1)
            .with_field("a", 2)
            .log("collide");

        let record: serde_json::Value = serde_json::from_str(&sink.records()[0]).unwrap();
        assert_eq!(record["a"], 2);
    }

    #[test]
    fn test_set_sink_swaps_destination() {
        let (logger, first) = memory_logger(Level::Info);
        let second = MemorySink::new();
        logger.set_sink(Box::new(second.clone()));
        logger.info().log("rerouted");
        assert_eq!(first.len(), 0);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_builder_full_configuration() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .level(Level::Trace)
            .caller_mode(CallerMode::ShortFile)
            .sink(sink.clone())
            .buffered(64)
            .build();

        logger.trace().log("buffered");
        logger.stop();

        assert_eq!(sink.len(), 1);
        assert_eq!(logger.caller_mode(), CallerMode::ShortFile);
    }

    #[test]
    fn test_builder_default_is_synchronous_info() {
        let builder = LoggerBuilder::default();
        let logger = builder.sink(MemorySink::new()).build();
        assert_eq!(logger.level(), Level::Info);
        assert_eq!(logger.caller_mode(), CallerMode::Off);
    }

    #[test]
    fn test_drop_stops_buffered_logger() {
        let sink = MemorySink::new();
        {
            let logger = Logger::builder().sink(sink.clone()).buffered(16).build();
            for i in 0..10 {
                logger.info().with_field("i", i).log("pending");
            }
        }
        // Drop drained the queue
        assert_eq!(sink.len(), 10);
    }
}
