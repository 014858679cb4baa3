// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::record::Record;
use crate::Level;
use std::fmt::Debug;

/**
A sink in a logger's handler chain.

A [`Logger`](crate::Logger) walks its handlers in registration order and
offers each one the record. The return value of [`Handler::handle`] controls
propagation: `true` means the record stops here, `false` means it continues
("bubbles") to the next handler. A handler that declines a record because it
is below its severity floor also returns `false`.
*/
pub trait Handler: Debug + Send + Sync {
    /**
    Offers a record to this handler.

    Returns `true` to stop the record from bubbling to later handlers. Failures
    while formatting or writing a record are swallowed: the record is dropped,
    the handler stays usable, and the call returns `false`.
    */
    fn handle(&self, record: &mut Record) -> bool;

    /// Handles each record in order. The default forwards to [`Handler::handle`].
    fn handle_batch(&self, records: &mut [Record]) {
        for record in records {
            self.handle(record);
        }
    }

    /**
    Flushes and releases any resources held by the handler.

    A closed handler may still be written to; implementations reopen lazily.
    Errors from deferred work (for a rotating handler, retention cleanup)
    surface here rather than from `handle`.
    */
    fn close(&self) -> Result<()>;

    /// The minimum severity this handler accepts.
    fn level(&self) -> Level;

    /// Whether handled records continue to later handlers in the chain.
    fn bubble(&self) -> bool;

    /// Whether this handler would accept the record at all.
    fn is_handling(&self, record: &Record) -> bool {
        record.level >= self.level()
    }
}

impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    fn handle(&self, record: &mut Record) -> bool {
        (**self).handle(record)
    }

    fn handle_batch(&self, records: &mut [Record]) {
        (**self).handle_batch(records)
    }

    fn close(&self) -> Result<()> {
        (**self).close()
    }

    fn level(&self) -> Level {
        (**self).level()
    }

    fn bubble(&self) -> bool {
        (**self).bubble()
    }
}

/**
Enriches records before they are formatted.

Processors attached to a handler run in registration order on every record the
handler accepts, before the formatter sees it.
*/
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut Record);
}

impl<F> Processor for F
where
    F: Fn(&mut Record) + Send + Sync,
{
    fn process(&self, record: &mut Record) {
        self(record)
    }
}

/*
Boilerplate notes.

# Handler

Clone makes no sense for handlers holding file descriptors, so the trait does
not require it. PartialEq/Eq would have to choose between data and provenance
equality, neither of which is obviously right. Send + Sync are required: a
handler is shared behind Arc across every thread that logs through its
channel. Debug is required so loggers themselves stay Debug.
*/
