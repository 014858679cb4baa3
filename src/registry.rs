// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name → logger registry.
//!
//! A [`Registry`] maps channel names to shared [`Logger`] instances so that
//! distant parts of an application can reach a configured channel without
//! threading it through every call site. The registry never calls back into
//! the handlers; it is bookkeeping only.

use crate::error::{Error, Result};
use crate::logger::Logger;
use std::collections::HashMap;
use std::sync::Arc;

/// Holds named logger channels.
#[derive(Debug, Default)]
pub struct Registry {
    loggers: HashMap<String, Arc<Logger>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /**
    Registers `logger` under its own channel name.

    Fails with [`Error::DuplicateLogger`] when the name is taken and
    `overwrite` is false.
    */
    pub fn add(&mut self, logger: Arc<Logger>, overwrite: bool) -> Result<()> {
        let name = logger.name().to_string();
        if !overwrite && self.loggers.contains_key(&name) {
            return Err(Error::DuplicateLogger(name));
        }
        self.loggers.insert(name, logger);
        Ok(())
    }

    /// Whether a logger is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.loggers.contains_key(name)
    }

    /// Looks up the logger registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<Logger>> {
        self.loggers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::LoggerNotFound(name.to_string()))
    }

    /// Removes the logger registered under `name`, if any.
    pub fn remove(&mut self, name: &str) {
        self.loggers.remove(name);
    }

    /// Removes every registered logger.
    pub fn clear(&mut self) {
        self.loggers.clear();
    }
}
