// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the rotolog logging system.
//!
//! This module defines [`Record`], the value object that travels through a
//! logger's handler chain. A record is built once per log call and then handed
//! to handlers by mutable reference, so processors can enrich it and the
//! handler's formatter can fill in its byte payload.
//!
//! A record is never shared between threads while it is in flight; the
//! dispatching call stack owns it exclusively until the last handler returns.

use crate::Level;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// Structured context attached to a record, keyed by field name.
pub type Context = BTreeMap<String, serde_json::Value>;

/**
A single log record.

Fields are public: handlers, processors and formatters all read them directly,
and processors mutate `context` in place. `formatted` starts empty and is
populated by the handler's formatter immediately before the write.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// When the record was created.
    pub datetime: DateTime<Local>,
    /// Severity of the record.
    pub level: Level,
    /// Name of the logger channel that created the record.
    pub channel: String,
    /// The raw, unformatted message.
    pub message: String,
    /// Structured context, enriched by processors.
    pub context: Context,
    /// Formatter output; empty until a formatter runs.
    pub formatted: Vec<u8>,
}

impl Record {
    /// Creates a record stamped with the current local time.
    pub fn new(
        level: Level,
        channel: impl Into<String>,
        message: impl Into<String>,
        context: Context,
    ) -> Self {
        Self {
            datetime: Local::now(),
            level,
            channel: channel.into(),
            message: message.into(),
            context,
            formatted: Vec::new(),
        }
    }
}

/*
Boilerplate notes for Record:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - the buffer handler retains copies of in-flight records
- PartialEq/Eq: Derived - enables record comparison in tests

NOT IMPLEMENTED:
- Copy: String/Vec fields are heap-allocated
- Hash: serde_json::Value is not Hash, and records make poor map keys anyway
- Ord/PartialOrd: no meaningful total order (datetime alone would be misleading)
- Default: a record without a channel or message is not a sensible value
- Display: formatting is the formatters' job, with more than one valid answer

AUTOMATIC:
- Send: all fields are Send
- Sync: all fields are Sync, but records are single-owner in practice
*/
