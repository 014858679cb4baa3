// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotation and retention behavior of `RotatingFileHandler`, driven by
//! records with explicit datetimes so calendar-day boundaries can be
//! simulated without waiting for midnight.

use chrono::{Days, Local, NaiveDate};
use rotolog::{Context, Handler, Level, Record, RotatingFileHandler};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn record_on(day: NaiveDate, message: &str) -> Record {
    let mut record = Record::new(Level::Info, "test", message, Context::new());
    record.datetime = day
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap();
    record
}

fn dated_path(dir: &Path, day: NaiveDate) -> PathBuf {
    dir.join(format!("app-{}.log", day.format("%Y-%m-%d")))
}

fn log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

#[test]
fn crossing_a_day_boundary_resolves_a_new_path() {
    let dir = tempfile::tempdir().unwrap();
    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 0, Level::Debug, true).unwrap();

    let today = Local::now().date_naive();
    let tomorrow = today + Days::new(1);

    handler.handle(&mut record_on(today, "first day"));
    let first_path = handler.path();
    assert_eq!(first_path, dated_path(dir.path(), today));

    handler.handle(&mut record_on(tomorrow, "second day"));
    let second_path = handler.path();
    assert_eq!(second_path, dated_path(dir.path(), tomorrow));
    assert_ne!(first_path, second_path);

    handler.close().unwrap();
    assert!(std::fs::read_to_string(&first_path)
        .unwrap()
        .contains("first day"));
    assert!(std::fs::read_to_string(&second_path)
        .unwrap()
        .contains("second day"));
}

#[test]
fn same_day_records_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 0, Level::Debug, true).unwrap();

    let today = Local::now().date_naive();
    handler.handle(&mut record_on(today, "one"));
    handler.handle(&mut record_on(today, "two"));
    handler.close().unwrap();

    assert_eq!(log_files(dir.path()).len(), 1);
    let contents = std::fs::read_to_string(dated_path(dir.path(), today)).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn five_day_scenario_retains_exactly_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 3, Level::Debug, true).unwrap();

    let day0 = Local::now().date_naive();
    for offset in 0..5u64 {
        let day = day0 + Days::new(offset);
        handler.handle(&mut record_on(day, &format!("day {offset}")));
    }
    assert_eq!(log_files(dir.path()).len(), 5, "cleanup is deferred to close");

    handler.close().unwrap();

    let remaining = log_files(dir.path());
    assert_eq!(remaining.len(), 3);
    // the retained files are the three most recent days, each holding only
    // the records logged on its own day
    for offset in 2..5u64 {
        let day = day0 + Days::new(offset);
        let contents = std::fs::read_to_string(dated_path(dir.path(), day)).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains(&format!("day {offset}")));
    }
}

#[test]
fn cleanup_boundary_count_equals_max_deletes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("app-2020-01-01.log");
    std::fs::write(&old, "ancient\n").unwrap();

    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 3, Level::Debug, true).unwrap();
    // one pre-existing file + today's file + tomorrow's file == max_files
    let tomorrow = Local::now().date_naive() + Days::new(1);
    handler.handle(&mut record_on(tomorrow, "next day"));
    handler.close().unwrap();

    assert_eq!(log_files(dir.path()).len(), 3);
    assert!(old.exists(), "count == max_files must not delete anything");
}

#[test]
fn cleanup_boundary_one_over_max_deletes_exactly_the_oldest() {
    let dir = tempfile::tempdir().unwrap();
    let oldest = dir.path().join("app-2020-01-01.log");
    let older = dir.path().join("app-2020-01-02.log");
    std::fs::write(&oldest, "oldest\n").unwrap();
    std::fs::write(&older, "older\n").unwrap();

    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 3, Level::Debug, true).unwrap();
    // two pre-existing files + today's + tomorrow's == max_files + 1
    let tomorrow = Local::now().date_naive() + Days::new(1);
    handler.handle(&mut record_on(tomorrow, "next day"));
    handler.close().unwrap();

    assert_eq!(log_files(dir.path()).len(), 3);
    assert!(!oldest.exists(), "exactly the lexicographically-smallest file goes");
    assert!(older.exists());
}

#[test]
fn unlimited_retention_never_deletes() {
    let dir = tempfile::tempdir().unwrap();
    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 0, Level::Debug, true).unwrap();

    let day0 = Local::now().date_naive();
    for offset in 0..5u64 {
        handler.handle(&mut record_on(day0 + Days::new(offset), "kept"));
    }
    handler.close().unwrap();
    assert_eq!(log_files(dir.path()).len(), 5);
}

#[test]
fn retention_ignores_files_outside_the_template() {
    let dir = tempfile::tempdir().unwrap();
    let unrelated = dir.path().join("other-2020-01-01.log");
    std::fs::write(&unrelated, "not ours\n").unwrap();

    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 1, Level::Debug, true).unwrap();
    let day0 = Local::now().date_naive();
    for offset in 0..3u64 {
        handler.handle(&mut record_on(day0 + Days::new(offset), "line"));
    }
    handler.close().unwrap();

    assert!(unrelated.exists());
    assert_eq!(
        log_files(dir.path()).len(),
        2,
        "one retained app file plus the unrelated file"
    );
}

#[test]
fn concurrent_writers_rotate_once_per_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let handler = Arc::new(
        RotatingFileHandler::new(dir.path().join("app.log"), 0, Level::Debug, true).unwrap(),
    );

    let tomorrow = Local::now().date_naive() + Days::new(1);
    let mut threads = Vec::new();
    for thread_id in 0..8 {
        let handler = handler.clone();
        threads.push(std::thread::spawn(move || {
            for i in 0..25 {
                handler.handle(&mut record_on(tomorrow, &format!("t{thread_id} m{i}")));
            }
        }));
    }
    for thread in threads {
        thread.join().unwrap();
    }
    handler.close().unwrap();

    // every record landed in tomorrow's file, none in a stale one
    let contents = std::fs::read_to_string(dated_path(dir.path(), tomorrow)).unwrap();
    assert_eq!(contents.lines().count(), 200);
}

#[test]
fn deletion_errors_surface_through_close() {
    let dir = tempfile::tempdir().unwrap();
    let oldest = dir.path().join("app-2020-01-01.log");
    std::fs::write(&oldest, "old\n").unwrap();
    // a directory wearing a rotated file's name: remove_file on it fails
    // regardless of privileges, so the injected error is not chmod-dependent
    let blocker = dir.path().join("app-2020-01-02.log");
    std::fs::create_dir(&blocker).unwrap();
    let newer = dir.path().join("app-2020-01-03.log");
    std::fs::write(&newer, "old\n").unwrap();

    let handler =
        RotatingFileHandler::new(dir.path().join("app.log"), 1, Level::Debug, true).unwrap();
    let tomorrow = Local::now().date_naive() + Days::new(1);
    handler.handle(&mut record_on(tomorrow, "trigger"));

    handler.close().unwrap_err();
    // the pass aborted mid-way: files deleted before the error stay deleted
    assert!(!oldest.exists());
    assert!(newer.exists());

    // the pass stays pending, so once the obstacle is gone a retried close
    // finishes the cleanup
    std::fs::remove_dir(&blocker).unwrap();
    handler.close().unwrap();
    assert_eq!(log_files(dir.path()).len(), 1);
}
