// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Rotating file handler
//!
//! [`RotatingFileHandler`] stores logs in files that are rotated every day,
//! keeping a limited number of old files. The logical filename given at
//! construction is a template: `app.log` with the default settings becomes
//! `app-2026-08-31.log`, and the date segment advances whenever a record
//! crosses the current rotation boundary.
//!
//! This rotation is intended as a workaround for hosts without logrotate;
//! prefer logrotate where it is available.
//!
//! ## Rotation protocol
//!
//! The handler tracks the next rotation boundary (a calendar day). A record
//! dated at or past the boundary closes the current file *before* it is
//! written, re-points the underlying [`FileHandler`] at the path for the
//! record's day, and marks a rotation pending. The retention pass — deleting
//! the oldest matching files beyond `max_files` — runs when the handler is
//! closed, so deletion errors surface to the owner through
//! [`close`](crate::Handler::close) rather than being lost inside a log call.
//!
//! The whole check-boundary/close/re-point/write sequence is one critical
//! section, so two threads crossing the same boundary cannot double-rotate or
//! interleave a write with the swap.

use crate::error::{Error, Result};
use crate::file_handler::{DEFAULT_FILE_PERM, FileHandler};
use crate::formatter::Formatter;
use crate::handler::{Handler, Processor};
use crate::record::Record;
use crate::Level;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Mutex;

/// Placeholder for the filename stem in a filename format.
const FILENAME_TOKEN: &str = "{filename}";
/// Placeholder for the date segment in a filename format.
const DATE_TOKEN: &str = "{date}";

const DEFAULT_FILENAME_FORMAT: &str = "{filename}-{date}";
const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Separators permitted between date segments.
const DATE_SEPARATORS: [char; 4] = ['-', '/', '_', '.'];

/// Stores logs to files rotated every day, keeping `max_files` old files.
#[derive(Debug)]
pub struct RotatingFileHandler {
    inner: FileHandler,
    filename: PathBuf,
    max_files: usize,
    filename_format: String,
    date_format: String,
    /// chrono translation of `date_format`, kept in sync by the setters.
    chrono_format: String,
    state: Mutex<RotationState>,
}

#[derive(Debug)]
struct RotationState {
    /// First calendar day that no longer belongs to the current file.
    next_rotation: NaiveDate,
    /// Set when a boundary was crossed; cleared by a successful retention pass.
    must_rotate: bool,
}

impl RotatingFileHandler {
    /**
    Creates a rotating handler for the logical filename `filename`.

    `max_files` is the number of rotated files retained; `0` keeps them all.
    The first concrete path is the template resolved against today's date, and
    its parent directory must already exist.
    */
    pub fn new(
        filename: impl Into<PathBuf>,
        max_files: usize,
        level: Level,
        bubble: bool,
    ) -> Result<Self> {
        Self::with_permissions(filename, max_files, level, bubble, DEFAULT_FILE_PERM)
    }

    /// Like [`RotatingFileHandler::new`] with explicit file permission bits.
    pub fn with_permissions(
        filename: impl Into<PathBuf>,
        max_files: usize,
        level: Level,
        bubble: bool,
        perm: u32,
    ) -> Result<Self> {
        let filename = filename.into();
        let today = Local::now().date_naive();
        let path = timed_filename(
            &filename,
            DEFAULT_FILENAME_FORMAT,
            "%Y-%m-%d",
            today,
        );
        let inner = FileHandler::with_permissions(path, level, bubble, perm)?;
        Ok(Self {
            inner,
            filename,
            max_files,
            filename_format: DEFAULT_FILENAME_FORMAT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            chrono_format: "%Y-%m-%d".to_string(),
            state: Mutex::new(RotationState {
                next_rotation: tomorrow(today),
                must_rotate: false,
            }),
        })
    }

    /**
    Reconfigures the filename and date templates.

    `filename_format` must contain `{date}`; `date_format` must be one of the
    granularities `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, where the separator may
    be any of `-` `/` `_` `.` or absent. Anything else is rejected with a
    configuration error and leaves the handler untouched.

    On success the handler is closed (running any pending retention pass) and
    re-pointed at the re-resolved path for today. Taking `&mut self` forces
    the caller to serialize this against in-flight writes.
    */
    pub fn set_filename_format(&mut self, filename_format: &str, date_format: &str) -> Result<()> {
        let chrono_format = chrono_date_format(date_format)?;
        if !filename_format.contains(DATE_TOKEN) {
            return Err(Error::MissingDatePlaceholder(filename_format.to_string()));
        }

        self.filename_format = filename_format.to_string();
        self.date_format = date_format.to_string();
        self.chrono_format = chrono_format;
        self.close()?;
        self.inner.set_path(self.timed_filename(Local::now().date_naive()));
        Ok(())
    }

    /// Replaces the formatter on the underlying file handler.
    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.inner.set_formatter(formatter);
    }

    /// Appends a processor on the underlying file handler.
    pub fn push_processor(&mut self, processor: impl Processor + 'static) {
        self.inner.push_processor(processor);
    }

    /// The dated path the handler currently writes to.
    pub fn path(&self) -> PathBuf {
        self.inner.path()
    }

    /// Resolves the filename template against `date`. Pure; no side effects.
    pub fn timed_filename(&self, date: NaiveDate) -> PathBuf {
        timed_filename(
            &self.filename,
            &self.filename_format,
            &self.chrono_format,
            date,
        )
    }

    /// The glob matching every dated file produced by the current template.
    fn glob_pattern(&self) -> String {
        let stem = file_stem(&self.filename);
        let name = self
            .filename_format
            .replace(FILENAME_TOKEN, &stem)
            .replace(DATE_TOKEN, "*");
        join_with_extension(&self.filename, name)
            .to_string_lossy()
            .into_owned()
    }

    /**
    The retention pass.

    Recomputes the boundary from the current time, then deletes the oldest
    matching files until at most `max_files` remain. A deletion error aborts
    the pass and leaves `must_rotate` set, so a retried close surfaces it
    again; files already deleted stay deleted.
    */
    fn rotate(&self, state: &mut RotationState) -> Result<()> {
        state.next_rotation = tomorrow(Local::now().date_naive());

        // unlimited retention: nothing to clean up
        if self.max_files == 0 {
            state.must_rotate = false;
            return Ok(());
        }

        let mut files: Vec<PathBuf> = glob::glob(&self.glob_pattern())?
            .filter_map(|entry| entry.ok())
            .collect();
        if files.len() > self.max_files {
            // Lexicographic order is chronological for zero-padded dates, so
            // the head of the sorted list is the oldest.
            files.sort();
            let excess = files.len() - self.max_files;
            for file in &files[..excess] {
                std::fs::remove_file(file)?;
            }
        }

        state.must_rotate = false;
        Ok(())
    }
}

impl Handler for RotatingFileHandler {
    fn handle(&self, record: &mut Record) -> bool {
        if !self.is_handling(record) {
            return false;
        }
        // One critical section around boundary check, swap and write.
        let mut state = self.state.lock().unwrap();
        let day = record.datetime.date_naive();
        if day >= state.next_rotation {
            state.must_rotate = true;
            // Release the old file before anything lands past its boundary. A
            // flush failure loses buffered bytes of the old file at worst and
            // must not block the swap.
            let _ = self.inner.close();
            self.inner.set_path(self.timed_filename(day));
            state.next_rotation = tomorrow(day);
        }
        self.inner.handle(record)
    }

    fn close(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.inner.close()?;
        if state.must_rotate {
            self.rotate(&mut state)?;
        }
        Ok(())
    }

    fn level(&self) -> Level {
        self.inner.level()
    }

    fn bubble(&self) -> bool {
        self.inner.bubble()
    }
}

fn tomorrow(day: NaiveDate) -> NaiveDate {
    // succ_opt is None only at NaiveDate::MAX
    day.succ_opt().unwrap_or(day)
}

fn file_stem(filename: &std::path::Path) -> String {
    filename
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn join_with_extension(filename: &std::path::Path, mut name: String) -> PathBuf {
    if let Some(ext) = filename.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    match filename.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

fn timed_filename(
    filename: &std::path::Path,
    filename_format: &str,
    chrono_format: &str,
    date: NaiveDate,
) -> PathBuf {
    let name = filename_format
        .replace(FILENAME_TOKEN, &file_stem(filename))
        .replace(DATE_TOKEN, &date.format(chrono_format).to_string());
    join_with_extension(filename, name)
}

/**
Validates a date format and translates it to a chrono format string.

Accepted granularities: `YYYY`, `YYYY MM`, `YYYY MM DD`, with an optional
single separator from `-` `/` `_` `.` between segments. Coarser-first order
keeps lexicographic and chronological sorting aligned, which the retention
pass depends on; anything else is a configuration error.
*/
fn chrono_date_format(date_format: &str) -> Result<String> {
    let invalid = || Error::InvalidDateFormat(date_format.to_string());

    let mut rest = date_format.strip_prefix("YYYY").ok_or_else(invalid)?;
    let mut out = String::from("%Y");
    for (token, chrono) in [("MM", "%m"), ("DD", "%d")] {
        if rest.is_empty() {
            return Ok(out);
        }
        let mut chars = rest.chars();
        if let Some(first) = chars.next() {
            if DATE_SEPARATORS.contains(&first) {
                out.push(first);
                rest = chars.as_str();
            }
        }
        rest = rest.strip_prefix(token).ok_or_else(invalid)?;
        out.push_str(chrono);
    }
    if rest.is_empty() { Ok(out) } else { Err(invalid()) }
}

#[cfg(test)]
mod tests {
    use super::{RotatingFileHandler, chrono_date_format};
    use crate::Level;
    use chrono::NaiveDate;

    fn handler(dir: &std::path::Path) -> RotatingFileHandler {
        RotatingFileHandler::new(dir.join("app.log"), 0, Level::Debug, true).unwrap()
    }

    #[test]
    fn date_format_granularities() {
        assert_eq!(chrono_date_format("YYYY").unwrap(), "%Y");
        assert_eq!(chrono_date_format("YYYY-MM").unwrap(), "%Y-%m");
        assert_eq!(chrono_date_format("YYYY-MM-DD").unwrap(), "%Y-%m-%d");
        assert_eq!(chrono_date_format("YYYY_MM_DD").unwrap(), "%Y_%m_%d");
        assert_eq!(chrono_date_format("YYYYMMDD").unwrap(), "%Y%m%d");
        assert_eq!(chrono_date_format("YYYY/MM").unwrap(), "%Y/%m");

        assert!(chrono_date_format("YYYY-DD-MM").is_err());
        assert!(chrono_date_format("MM-DD").is_err());
        assert!(chrono_date_format("YYYY-").is_err());
        assert!(chrono_date_format("YYYY-MM-DD-").is_err());
        assert!(chrono_date_format("").is_err());
    }

    #[test]
    fn filename_format_requires_date_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler(dir.path());
        assert!(handler.set_filename_format("{filename}", "YYYY").is_err());
        assert!(
            handler
                .set_filename_format("{filename}-{date}", "YYYY-DD-MM")
                .is_err()
        );
        // a rejected format leaves the previous configuration in place
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(
            handler.timed_filename(date),
            dir.path().join("app-2026-08-31.log")
        );
    }

    #[test]
    fn timed_filename_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path());
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(handler.timed_filename(date), handler.timed_filename(date));
        assert_eq!(
            handler.timed_filename(date),
            dir.path().join("app-2026-08-31.log")
        );
    }

    #[test]
    fn reconfigured_template_changes_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = handler(dir.path());
        handler
            .set_filename_format("{date}_{filename}", "YYYY-MM")
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(
            handler.timed_filename(date),
            dir.path().join("2026-08_app.log")
        );
    }

    #[test]
    fn filename_without_extension_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let handler =
            RotatingFileHandler::new(dir.path().join("app"), 0, Level::Debug, true).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(
            handler.timed_filename(date),
            dir.path().join("app-2026-01-02")
        );
    }
}
