// SPDX-License-Identifier: MIT OR Apache-2.0

//! Buffers records in memory and forwards them downstream in batches.
//!
//! [`BufferHandler`] decorates another handler: it keeps copies of accepted
//! records until `buffer_limit` of them have accumulated, then flushes the
//! whole batch through the downstream handler's `handle_batch` and clears the
//! buffer. Closing the handler forces a final flush, so no accepted record is
//! ever dropped by the buffer itself.
//!
//! The severity gate and bubble flag are the buffer's own; the downstream
//! handler applies its own gate again when the batch reaches it.

use crate::error::Result;
use crate::handler::Handler;
use crate::record::Record;
use crate::Level;
use std::sync::Mutex;

/// Accumulates records and flushes them downstream in batches.
#[derive(Debug)]
pub struct BufferHandler {
    inner: Box<dyn Handler>,
    buffer_limit: usize,
    level: Level,
    bubble: bool,
    buffer: Mutex<Vec<Record>>,
}

impl BufferHandler {
    /// Wraps `inner`, flushing every time `buffer_limit` records accumulate.
    pub fn new(inner: impl Handler + 'static, buffer_limit: usize, level: Level, bubble: bool) -> Self {
        Self {
            inner: Box::new(inner),
            buffer_limit: buffer_limit.max(1),
            level,
            bubble,
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Sends all buffered records downstream and clears the buffer.
    pub fn flush(&self) {
        let mut records = {
            let mut buffer = self.buffer.lock().unwrap();
            std::mem::take(&mut *buffer)
        };
        if !records.is_empty() {
            self.inner.handle_batch(&mut records);
        }
    }

    /// Number of records currently buffered.
    pub fn len(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }

    /// Whether the buffer is currently empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().unwrap().is_empty()
    }
}

impl Handler for BufferHandler {
    fn handle(&self, record: &mut Record) -> bool {
        if !self.is_handling(record) {
            return false;
        }
        let full = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.push(record.clone());
            buffer.len() >= self.buffer_limit
        };
        if full {
            self.flush();
        }
        !self.bubble
    }

    fn close(&self) -> Result<()> {
        self.flush();
        self.inner.close()
    }

    fn level(&self) -> Level {
        self.level
    }

    fn bubble(&self) -> bool {
        self.bubble
    }
}
