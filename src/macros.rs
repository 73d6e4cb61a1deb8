//! Logging macros for ergonomic message formatting.
//!
//! The level macros format the message like `println!` and attach the
//! caller's module path, so `func` appears in the output when caller
//! capture is enabled.
//!
//! # Examples
//!
//! ```
//! use logflow::prelude::*;
//! use logflow::{fields, info};
//!
//! let logger = Logger::builder().sink(MemorySink::new()).build();
//!
//! info!(logger, "server started");
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//!
//! logger
//!     .info()
//!     .with_fields(fields! {"port" => port, "tls" => false})
//!     .log("accepting connections");
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// ```
/// # use logflow::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use logflow::log_event;
/// log_event!(logger, Level::Info, "simple message");
/// log_event!(logger, Level::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger
            .event($level)
            .with_function(module_path!())
            .log(format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Fatal, $($arg)+)
    };
}

/// Build a [`Fields`](crate::Fields) map from `key => value` pairs.
///
/// ```
/// use logflow::fields;
///
/// let fields = fields! {"age" => 19, "name" => "sunchp"};
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert($key.into(), $crate::FieldValue::from($value));
        )+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Logger};
    use crate::sinks::MemorySink;
    use crate::FieldValue;

    fn memory_logger(level: Level) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder().level(level).sink(sink.clone()).build();
        (logger, sink)
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = memory_logger(Level::Trace);
        trace!(logger, "trace message");
        debug!(logger, "debug value: {}", 10);
        info!(logger, "items: {}", 100);
        warn!(logger, "retry {} of {}", 1, 3);
        error!(logger, "code: {}", 500);
        fatal!(logger, "failure: {}", "disk full");
        assert_eq!(sink.len(), 6);
    }

    #[test]
    fn test_macros_respect_level_gate() {
        let (logger, sink) = memory_logger(Level::Warn);
        info!(logger, "filtered");
        warn!(logger, "kept");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_fields_macro() {
        let fields = fields! {"age" => 19, "name" => "sunchp", "pi" => 3.14};
        assert_eq!(fields.get("age"), Some(&FieldValue::Int(19)));
        assert_eq!(
            fields.get("name"),
            Some(&FieldValue::String("sunchp".to_string()))
        );
        assert!(fields!().is_empty());
    }
}
