//! In-memory capture sink
//!
//! Retains every record written to it. Clones share the same buffer, so a
//! test can hand a clone to the logger and inspect the original.

use super::Sink;
use crate::core::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records written so far.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Each record as a string, trailing newline trimmed.
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\n')
                    .to_string()
            })
            .collect()
    }

    /// All captured bytes, concatenated.
    pub fn contents(&self) -> String {
        self.records
            .lock()
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        self.records.lock().push(bytes.to_vec());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_buffer() {
        let sink = MemorySink::new();
        let clone = sink.clone();

        clone.write(b"captured\n").unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records(), vec!["captured".to_string()]);
    }

    #[test]
    fn test_clear() {
        let sink = MemorySink::new();
        sink.write(b"one\n").unwrap();
        sink.clear();
        assert!(sink.is_empty());
    }
}
