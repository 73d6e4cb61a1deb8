//! Event serialization
//!
//! A formatter is a pure function from an event to an output byte
//! sequence. Formatters hold no mutable state and are safe to call from
//! the drain thread and synchronous callers concurrently.

use super::error::Result;
use super::event::{CallerMode, Event};
use super::timestamp::TimestampFormat;
use colored::Colorize;
use serde_json::Value;

pub const FIELD_KEY_LEVEL: &str = "level";
pub const FIELD_KEY_MSG: &str = "msg";
pub const FIELD_KEY_TIME: &str = "time";
pub const FIELD_KEY_FUNC: &str = "func";
pub const FIELD_KEY_FILE: &str = "file";

/// Reserved key for the error attached via `with_error`, kept distinct
/// from user fields.
pub const ERROR_KEY: &str = "error";

pub trait Formatter: Send + Sync {
    fn format(&self, event: &Event) -> Result<Vec<u8>>;
}

/// Canonical JSON formatter: one object per line.
///
/// Emits the merged user fields, `level` (lowercase), `msg`, `time`
/// (unless disabled), the reserved `error` key, and `func`/`file` when the
/// committing logger had caller capture enabled.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
    timestamps: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            timestamps: true,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Enable or disable the `time` field.
    #[must_use]
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, event: &Event) -> Result<Vec<u8>> {
        let mut record = serde_json::Map::with_capacity(event.data.len() + 5);

        for (key, value) in &event.data {
            record.insert(key.clone(), value.to_json_value());
        }

        record.insert(
            FIELD_KEY_LEVEL.to_string(),
            Value::String(event.level.as_str().to_string()),
        );
        record.insert(
            FIELD_KEY_MSG.to_string(),
            Value::String(event.message.clone()),
        );

        if self.timestamps {
            record.insert(
                FIELD_KEY_TIME.to_string(),
                Value::String(self.timestamp_format.format(&event.time)),
            );
        }

        if let Some(err) = &event.err {
            record.insert(ERROR_KEY.to_string(), Value::String(err.clone()));
        }

        if let Some(caller) = &event.caller {
            if let Some(function) = caller.function {
                record.insert(
                    FIELD_KEY_FUNC.to_string(),
                    Value::String(function.to_string()),
                );
            }
            let file = match event.caller_mode {
                CallerMode::ShortFile => short_file(caller.file),
                _ => caller.file,
            };
            record.insert(
                FIELD_KEY_FILE.to_string(),
                Value::String(format!("{}:{}", file, caller.line)),
            );
        }

        let mut bytes = serde_json::to_vec(&Value::Object(record))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Shorten a path to its final component.
fn short_file(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Human-readable formatter: `[time] [LEVEL] message key=value ...`
#[derive(Debug, Clone)]
pub struct TextFormatter {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::Iso8601,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, event: &Event) -> Result<Vec<u8>> {
        let level_str = if self.use_colors {
            format!("{:5}", event.level.as_str().to_uppercase())
                .color(event.level.color_code())
                .to_string()
        } else {
            format!("{:5}", event.level.as_str().to_uppercase())
        };

        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(&event.time),
            level_str,
            event.message
        );

        for (key, value) in &event.data {
            line.push_str(&format!(" {}={}", key, value));
        }

        if let Some(err) = &event.err {
            line.push_str(&format!(" {}={}", ERROR_KEY, err));
        }

        if let Some(caller) = &event.caller {
            let file = match event.caller_mode {
                CallerMode::ShortFile => short_file(caller.file),
                _ => caller.file,
            };
            line.push_str(&format!(" ({}:{})", file, caller.line));
        }

        line.push('\n');
        Ok(line.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Caller;
    use crate::core::level::Level;

    fn sample_event() -> Event {
        let mut event = Event::new(Level::Info);
        event.message = "hello world".to_string();
        event.add_field("name", "sunchp");
        event.add_field("age", 19);
        event
    }

    fn parse(bytes: &[u8]) -> serde_json::Value {
        serde_json::from_slice(bytes).expect("valid JSON record")
    }

    #[test]
    fn test_json_record_shape() {
        let formatter = JsonFormatter::new();
        let bytes = formatter.format(&sample_event()).unwrap();
        assert_eq!(*bytes.last().unwrap(), b'\n');

        let record = parse(&bytes);
        assert_eq!(record["level"], "info");
        assert_eq!(record["msg"], "hello world");
        assert_eq!(record["name"], "sunchp");
        assert_eq!(record["age"], 19);
        assert!(record["time"].is_string());
        assert!(record.get("error").is_none());
        assert!(record.get("file").is_none());
    }

    #[test]
    fn test_json_reserved_error_key() {
        let mut event = sample_event();
        event.err = Some("test err".to_string());
        // A user field under the reserved key loses to the attached error
        event.add_field(ERROR_KEY, "shadowed");

        let record = parse(&JsonFormatter::new().format(&event).unwrap());
        assert_eq!(record["error"], "test err");
    }

    #[test]
    fn test_json_without_timestamps() {
        let formatter = JsonFormatter::new().with_timestamps(false);
        let record = parse(&formatter.format(&sample_event()).unwrap());
        assert!(record.get("time").is_none());
    }

    #[test]
    fn test_json_caller_short_file() {
        let mut event = sample_event();
        event.caller_mode = CallerMode::ShortFile;
        event.caller = Some(Caller {
            function: Some("app::server"),
            file: "src/bin/caller.rs",
            line: 42,
        });

        let record = parse(&JsonFormatter::new().format(&event).unwrap());
        assert_eq!(record["func"], "app::server");
        assert_eq!(record["file"], "caller.rs:42");
    }

    #[test]
    fn test_json_caller_long_file() {
        let mut event = sample_event();
        event.caller_mode = CallerMode::LongFile;
        event.caller = Some(Caller {
            function: None,
            file: "src/bin/caller.rs",
            line: 42,
        });

        let record = parse(&JsonFormatter::new().format(&event).unwrap());
        assert_eq!(record["file"], "src/bin/caller.rs:42");
        assert!(record.get("func").is_none());
    }

    #[test]
    fn test_json_timestamp_microsecond_precision() {
        let record = parse(&JsonFormatter::new().format(&sample_event()).unwrap());
        let time = record["time"].as_str().unwrap();
        // 2024-01-02T15:04:05.000000Z
        assert_eq!(time.len(), 27);
        assert!(time.ends_with('Z'));
    }

    #[test]
    fn test_text_formatter_plain() {
        let formatter = TextFormatter::new().with_colors(false);
        let bytes = formatter.format(&sample_event()).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        assert!(line.contains("[INFO "));
        assert!(line.contains("hello world"));
        assert!(line.contains("name=sunchp"));
        assert!(line.ends_with('\n'));
    }
}
