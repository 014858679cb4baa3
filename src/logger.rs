// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Logger
//!
//! A [`Logger`] is a named channel that owns an ordered list of handlers.
//! [`Logger::log`] builds a [`Record`] and offers it to each handler in
//! registration order; the first handler that returns `true` stops the
//! record from bubbling further. The logger itself performs no I/O and
//! never blocks beyond invoking its handlers synchronously on the calling
//! thread.
//!
//! Handlers are added while the logger is still exclusively owned; after
//! that the logger is immutable and can be shared freely behind `Arc`.
//!
//! # Example
//!
//! ```rust,no_run
//! use rotolog::{Level, Logger, RotatingFileHandler};
//!
//! # fn main() -> rotolog::Result<()> {
//! let handler = RotatingFileHandler::new("/var/log/app.log", 7, Level::Info, true)?;
//! let mut logger = Logger::new("app");
//! logger.add_handler(handler);
//!
//! logger.info("service started");
//! logger.log_with(Level::Error, "request failed", [
//!     ("status".to_string(), serde_json::json!(502)),
//! ].into_iter().collect());
//! # Ok(())
//! # }
//! ```

use crate::handler::Handler;
use crate::record::{Context, Record};
use crate::Level;
use std::sync::Arc;

/// A named logging channel with an ordered handler chain.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Logger {
    /// Creates a logger with no handlers. Records are dropped until a
    /// handler is added; an empty chain is not an error.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    /// The channel name stamped on every record this logger creates.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a handler to the end of the chain.
    pub fn add_handler(&mut self, handler: impl Handler + 'static) {
        self.handlers.push(Arc::new(handler));
    }

    /// The handler chain, in dispatch order.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Logs `message` at `level` with an empty context.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.log_with(level, message, Context::new());
    }

    /// Logs `message` at `level` with structured context.
    pub fn log_with(&self, level: Level, message: impl Into<String>, context: Context) {
        let mut record = Record::new(level, self.name.clone(), message, context);
        for handler in &self.handlers {
            if handler.handle(&mut record) {
                break;
            }
        }
    }

    /**
    Closes every handler in the chain.

    Every handler is offered a close even when an earlier one fails, so a
    handler late in the chain (say a buffer with pending records) is never
    left unflushed behind another handler's error. The first error is
    returned after the sweep completes.
    */
    pub fn close(&self) -> crate::Result<()> {
        let mut first_error = None;
        for handler in &self.handlers {
            if let Err(err) = handler.close() {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn notice(&self, message: impl Into<String>) {
        self.log(Level::Notice, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }

    pub fn alert(&self, message: impl Into<String>) {
        self.log(Level::Alert, message);
    }

    pub fn emergency(&self, message: impl Into<String>) {
        self.log(Level::Emergency, message);
    }
}

/*
Boilerplate notes.

# Logger

Clone is cheap (Arc handles) and lets a configured chain be reused under a
second channel name, so it's in. PartialEq would have to compare trait
objects, so it's out. Default is not sensible: a logger without a name has no
identity. Display would just duplicate name().
*/
