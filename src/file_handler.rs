// SPDX-License-Identifier: MIT OR Apache-2.0

//! # File handler
//!
//! [`FileHandler`] appends formatted records to a single log file. It opens
//! the file eagerly at construction (so a bad path fails fast, before any
//! logging happens) and holds the descriptor for the handler's lifetime.
//! After a [`close`](crate::Handler::close) the descriptor is released and the
//! next write reopens the file at the handler's current path; the rotating
//! handler relies on this to swap files at a day boundary.
//!
//! Parent directories are never created. A missing directory is a
//! construction-time error.

use crate::error::Result;
use crate::formatter::{Formatter, LineFormatter};
use crate::handler::{Handler, Processor};
use crate::record::Record;
use crate::Level;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default permission bits for newly created log files.
pub const DEFAULT_FILE_PERM: u32 = 0o644;

/// Appends formatted records to one log file.
pub struct FileHandler {
    level: Level,
    bubble: bool,
    perm: u32,
    formatter: Box<dyn Formatter>,
    processors: Vec<Box<dyn Processor>>,
    state: Mutex<FileState>,
}

#[derive(Debug)]
struct FileState {
    path: PathBuf,
    /// `None` is the explicit unopened state; the next write reopens.
    writer: Option<File>,
}

impl FileHandler {
    /// Opens `path` for appending with [`DEFAULT_FILE_PERM`].
    pub fn new(path: impl Into<PathBuf>, level: Level, bubble: bool) -> Result<Self> {
        Self::with_permissions(path, level, bubble, DEFAULT_FILE_PERM)
    }

    /// Opens `path` for appending with explicit permission bits.
    pub fn with_permissions(
        path: impl Into<PathBuf>,
        level: Level,
        bubble: bool,
        perm: u32,
    ) -> Result<Self> {
        let path = path.into();
        let writer = open_append(&path, perm)?;
        Ok(Self {
            level,
            bubble,
            perm,
            formatter: Box::new(LineFormatter::new()),
            processors: Vec::new(),
            state: Mutex::new(FileState {
                path,
                writer: Some(writer),
            }),
        })
    }

    /// Replaces the formatter. Defaults to [`LineFormatter`].
    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.formatter = Box::new(formatter);
    }

    /// Appends a processor; processors run in registration order.
    pub fn push_processor(&mut self, processor: impl Processor + 'static) {
        self.processors.push(Box::new(processor));
    }

    /// The path the handler currently writes to.
    pub fn path(&self) -> PathBuf {
        self.state.lock().unwrap().path.clone()
    }

    /// Re-points the handler at a new file, releasing any open descriptor.
    pub(crate) fn set_path(&self, path: PathBuf) {
        let mut state = self.state.lock().unwrap();
        state.writer = None;
        state.path = path;
    }

    fn write(&self, record: &Record) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.writer.is_none() {
            state.writer = Some(open_append(&state.path, self.perm)?);
        }
        if let Some(writer) = state.writer.as_mut() {
            writer.write_all(&record.formatted)?;
        }
        Ok(())
    }
}

fn open_append(path: &Path, perm: u32) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;
    options.open(path)
}

impl Handler for FileHandler {
    fn handle(&self, record: &mut Record) -> bool {
        if !self.is_handling(record) {
            return false;
        }
        for processor in &self.processors {
            processor.process(record);
        }
        record.formatted = match self.formatter.format(record) {
            Ok(bytes) => bytes,
            // Formatting failures drop the record, not the handler.
            Err(_) => return false,
        };
        if self.write(record).is_err() {
            return false;
        }
        !self.bubble
    }

    fn close(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(mut writer) = state.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn level(&self) -> Level {
        self.level
    }

    fn bubble(&self) -> bool {
        self.bubble
    }
}

impl std::fmt::Debug for FileHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandler")
            .field("level", &self.level)
            .field("bubble", &self.bubble)
            .field("perm", &format_args!("{:o}", self.perm))
            .field("formatter", &self.formatter)
            .field("processors", &self.processors.len())
            .field("state", &self.state)
            .finish()
    }
}
