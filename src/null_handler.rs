// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::Result;
use crate::handler::Handler;
use crate::record::Record;
use crate::Level;

/**
A handler that accepts records and discards them.

Useful to swallow a severity band, or as a chain terminator with
`bubble = false`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullHandler {
    level: Level,
    bubble: bool,
}

impl NullHandler {
    pub const fn new(level: Level, bubble: bool) -> Self {
        Self { level, bubble }
    }
}

impl Default for NullHandler {
    fn default() -> Self {
        Self::new(Level::Debug, true)
    }
}

impl Handler for NullHandler {
    fn handle(&self, record: &mut Record) -> bool {
        if !self.is_handling(record) {
            return false;
        }
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
