// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# rotolog

rotolog is a channel-based logging library for Rust with date-rotated file
handlers.

# The model

A [`Logger`] is a named channel. It owns an ordered chain of [`Handler`]s,
and every log call builds a [`Record`] and walks that chain: each handler
filters by severity, optionally enriches the record through its processors,
formats it, writes it to its sink, and then decides whether the record keeps
*bubbling* to the next handler or stops.

The interesting handler is [`RotatingFileHandler`]: it stores logs in files
that are rotated every day and keeps only a limited number of old files,
deleting the rest on close. The other handlers are [`FileHandler`] (one
plain log file), [`BufferHandler`] (batches records for a downstream
handler), [`NullHandler`], and [`TestHandler`] (captures records in memory
for assertions).

# Error philosophy

Logging must never crash the application. A record that cannot be formatted
or written is dropped and the handler stays alive; only construction,
reconfiguration and [`Handler::close`] return [`Result`]s, because those are
the points where the caller can still do something about a problem (a bad
path, an invalid date format, a failed retention cleanup).

# Example

```rust,no_run
use rotolog::{Level, Logger, Registry, RotatingFileHandler};
use std::sync::Arc;

# fn main() -> rotolog::Result<()> {
// keep a week of dated files: app-2026-08-31.log, app-2026-09-01.log, ...
let handler = RotatingFileHandler::new("/var/log/app.log", 7, Level::Info, true)?;

let mut logger = Logger::new("app");
logger.add_handler(handler);
let logger = Arc::new(logger);

let mut registry = Registry::new();
registry.add(logger.clone(), false)?;

logger.info("service started");
logger.close()?; // flush + retention cleanup
# Ok(())
# }
```

# Concurrency

Everything runs synchronously on the calling thread; a log call blocks for
the duration of dispatch, formatting and I/O. Handlers are safe to share
behind `Arc`: each one guards its own mutable state (file descriptor,
rotation boundary, buffers) with its own mutex, and the rotating handler
performs its boundary check, file swap and write as one critical section so
concurrent callers cannot double-rotate.
*/

mod buffer_handler;
mod error;
mod file_handler;
mod formatter;
mod handler;
mod level;
mod logger;
mod null_handler;
mod record;
mod registry;
mod rotating_file_handler;
mod test_handler;

pub use buffer_handler::BufferHandler;
pub use error::{Error, Result};
pub use file_handler::{DEFAULT_FILE_PERM, FileHandler};
pub use formatter::{Formatter, JsonFormatter, LineFormatter};
pub use handler::{Handler, Processor};
pub use level::Level;
pub use logger::Logger;
pub use null_handler::NullHandler;
pub use record::{Context, Record};
pub use registry::Registry;
pub use rotating_file_handler::RotatingFileHandler;
pub use test_handler::TestHandler;
