// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Test handler
//!
//! [`TestHandler`] captures accepted records in memory instead of writing
//! them anywhere, so tests can assert on what a logger dispatched. It is part
//! of the public API so downstream crates can test their own logging the same
//! way this crate tests itself.
//!
//! # Example
//!
//! ```rust
//! use rotolog::{Level, Logger, TestHandler};
//! use std::sync::Arc;
//!
//! let handler = Arc::new(TestHandler::new(Level::Debug, true));
//! let mut logger = Logger::new("app");
//! logger.add_handler(handler.clone());
//!
//! logger.warning("suspicious condition");
//!
//! assert!(handler.has_message("suspicious condition"));
//! assert_eq!(handler.records()[0].level, Level::Warning);
//! ```

use crate::error::Result;
use crate::handler::Handler;
use crate::record::Record;
use crate::Level;
use std::sync::Mutex;

/// Captures accepted records in memory for later inspection.
#[derive(Debug)]
pub struct TestHandler {
    level: Level,
    bubble: bool,
    records: Mutex<Vec<Record>>,
}

impl Default for TestHandler {
    fn default() -> Self {
        Self::new(Level::Debug, true)
    }
}

impl TestHandler {
    pub fn new(level: Level, bubble: bool) -> Self {
        Self {
            level,
            bubble,
            records: Mutex::new(Vec::new()),
        }
    }

    /// All captured records, in the order they were handled.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    /// Whether any captured record's message contains `needle`.
    pub fn has_message(&self, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|record| record.message.contains(needle))
    }

    /// Discards all captured records.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl Handler for TestHandler {
    fn handle(&self, record: &mut Record) -> bool {
        if !self.is_handling(record) {
            return false;
        }
        self.records.lock().unwrap().push(record.clone());
        !self.bubble
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn level(&self) -> Level {
        self.level
    }

    fn bubble(&self) -> bool {
        self.bubble
    }
}
