//! Console sink implementation

use super::Sink;
use crate::core::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy)]
enum Target {
    Stdout,
    Stderr,
}

/// Writes records to standard output or standard error.
pub struct ConsoleSink {
    target: Target,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        match self.target {
            Target::Stdout => std::io::stdout().lock().write_all(bytes)?,
            Target::Stderr => std::io::stderr().lock().write_all(bytes)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            Target::Stdout => std::io::stdout().lock().flush()?,
            Target::Stderr => std::io::stderr().lock().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
