// SPDX-License-Identifier: MIT OR Apache-2.0

//! Formatters turn a [`Record`] into the bytes a handler writes.
//!
//! Two implementations ship with the crate: [`LineFormatter`] produces the
//! classic one-line text form, [`JsonFormatter`] produces one JSON object per
//! line. Handlers treat a formatter error as "drop this record, keep the
//! handler alive".

use crate::error::Result;
use crate::record::Record;
use std::fmt::Debug;

/// Turns records into bytes.
pub trait Formatter: Debug + Send + Sync {
    /// Formats a single record.
    fn format(&self, record: &Record) -> Result<Vec<u8>>;

    /// Formats a batch of records, one payload per record, preserving order.
    fn format_batch(&self, records: &[Record]) -> Result<Vec<Vec<u8>>> {
        records.iter().map(|record| self.format(record)).collect()
    }
}

/**
Formats records as single text lines:

```text
[2026-08-31 12:00:00] app.INFO: user logged in {"user_id":42}
```

The context object is omitted when empty.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineFormatter;

impl LineFormatter {
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &Record) -> Result<Vec<u8>> {
        let mut line = format!(
            "[{}] {}.{}: {}",
            record.datetime.format("%Y-%m-%d %H:%M:%S"),
            record.channel,
            record.level.name(),
            record.message,
        );
        if !record.context.is_empty() {
            line.push(' ');
            line.push_str(&serde_json::to_string(&record.context)?);
        }
        line.push('\n');
        Ok(line.into_bytes())
    }
}

/// Formats records as newline-delimited JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &Record) -> Result<Vec<u8>> {
        let value = serde_json::json!({
            "datetime": record.datetime.to_rfc3339(),
            "channel": record.channel,
            "level": record.level.value(),
            "level_name": record.level.name(),
            "message": record.message,
            "context": record.context,
        });
        let mut bytes = serde_json::to_vec(&value)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{Formatter, JsonFormatter, LineFormatter};
    use crate::record::{Context, Record};
    use crate::Level;

    fn sample() -> Record {
        let mut context = Context::new();
        context.insert("user_id".to_string(), serde_json::json!(42));
        Record::new(Level::Warning, "app", "disk nearly full", context)
    }

    #[test]
    fn line_formatter_includes_channel_level_and_context() {
        let bytes = LineFormatter::new().format(&sample()).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        assert!(line.contains("app.WARNING: disk nearly full"));
        assert!(line.contains("{\"user_id\":42}"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn line_formatter_omits_empty_context() {
        let record = Record::new(Level::Info, "app", "plain", Context::new());
        let line = String::from_utf8(LineFormatter::new().format(&record).unwrap()).unwrap();
        assert!(line.ends_with("plain\n"));
    }

    #[test]
    fn json_formatter_emits_one_object_per_line() {
        let bytes = JsonFormatter::new().format(&sample()).unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(bytes.strip_suffix(b"\n").unwrap()).unwrap();
        assert_eq!(value["level_name"], "WARNING");
        assert_eq!(value["level"], 300);
        assert_eq!(value["context"]["user_id"], 42);
    }

    #[test]
    fn format_batch_preserves_order() {
        let records = vec![
            Record::new(Level::Info, "app", "first", Context::new()),
            Record::new(Level::Info, "app", "second", Context::new()),
        ];
        let payloads = LineFormatter::new().format_batch(&records).unwrap();
        assert_eq!(payloads.len(), 2);
        assert!(String::from_utf8(payloads[0].clone()).unwrap().contains("first"));
        assert!(String::from_utf8(payloads[1].clone()).unwrap().contains("second"));
    }
}
