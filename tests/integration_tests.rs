//! Integration tests for logadapter
//!
//! These tests verify:
//! - File and writer outputs
//! - Caller locations, with and without a frame skip
//! - Wrap outputs
//! - Configuration loading

use logadapter::prelude::*;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf8 log output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capturing(logger: impl FnOnce(Arc<Mutex<Vec<String>>>) -> Logger) -> (Logger, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    (logger(Arc::clone(&seen)), seen)
}

#[test]
fn test_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::to_file(LogLevel::Info, &log_file).expect("Failed to open log file");
    logger.debug("hidden");
    logger.infof("%s=%d", ("x", 5));
    logger.named("db").error(("connection lost after ", 3, " retries"));
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 2, "unexpected content: {:?}", content);
    assert!(lines[0].contains("][INFO ] x=5 (tests/integration_tests.rs:"));
    assert!(lines[1].contains("][ERROR][db] connection lost after 3 retries (tests/integration_tests.rs:"));
    assert!(!content.contains("hidden"));
}

#[test]
fn test_file_logging_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("append.log");

    for round in 0..3 {
        let logger = Logger::to_file(LogLevel::Debug, &log_file).expect("Failed to open log file");
        logger.infof("round %d", round);
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("round 2"));
}

#[test]
fn test_file_logging_bad_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Logger::to_file(LogLevel::Info, temp_dir.path().join("no/such/dir/app.log"));
    assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
}

#[test]
fn test_filtered_call_writes_nothing() {
    let buffer = SharedBuffer::default();
    let logger = Logger::to_writer(LogLevel::Info, buffer.clone());

    logger.debug("below threshold");
    logger.debugf("%d", 1);
    assert!(buffer.text().is_empty());
}

#[test]
fn test_writer_line_format() {
    let buffer = SharedBuffer::default();
    let logger = Logger::to_writer(LogLevel::Debug, buffer.clone());

    let line = line!() + 1;
    logger.verbose("checking");

    let text = buffer.text();
    assert!(text.starts_with('['));
    assert!(text.ends_with(&format!("][VERBO] checking (tests/integration_tests.rs:{})\r\n", line)));
    // Timestamp column is 18 wide: "[" + 18 + "]"
    assert_eq!(&text[19..21], "][");
}

#[test]
fn test_caller_is_call_site() {
    let (logger, seen) = capturing(|seen| {
        Logger::new(LogLevel::Debug, move |record: &Record<'_>| {
            seen.lock().push(record.caller.to_string());
        })
    });

    let line = line!() + 1;
    logger.warnf("%d", 1);
    assert_eq!(seen.lock()[0], format!("tests/integration_tests.rs:{}", line));
}

#[inline(never)]
fn log_through_helper(logger: &Logger) -> u32 {
    let line = line!() + 1;
    logger.info("from helper");
    line
}

#[test]
fn test_helper_without_skip_reports_helper() {
    let (logger, seen) = capturing(|seen| {
        Logger::new(LogLevel::Debug, move |record: &Record<'_>| {
            seen.lock().push(record.caller.to_string());
        })
    });

    let line = log_through_helper(&logger);
    assert_eq!(seen.lock()[0], format!("tests/integration_tests.rs:{}", line));
}

#[inline(never)]
fn log_through_two_helpers(logger: &Logger) -> u32 {
    let line = line!() + 1;
    log_through_helper(logger);
    line
}

fn skipping(caller_skip: usize) -> (Logger, Arc<Mutex<Vec<String>>>) {
    capturing(|seen| {
        Logger::with_caller_skip(
            LogLevel::Debug,
            move |record: &Record<'_>| seen.lock().push(record.caller.to_string()),
            caller_skip,
        )
    })
}

/// Debug builds carry line tables, so the skipped frame resolves exactly.
/// Optimized builds may lose the frame and report `undefined`.
fn assert_skipped_to(caller: &str, expected_line: u32) {
    let expected = format!("tests/integration_tests.rs:{}", expected_line);
    if cfg!(debug_assertions) {
        assert_eq!(caller, expected);
    } else {
        assert!(
            caller == "undefined" || caller.starts_with("tests/integration_tests.rs:"),
            "unexpected caller {}",
            caller
        );
    }
}

#[test]
fn test_caller_skip_reports_outer_frame() {
    let (logger, seen) = skipping(1);
    assert_eq!(logger.caller_skip(), 1);

    let line = line!() + 1;
    let helper_line = log_through_helper(&logger);

    let caller = seen.lock()[0].clone();
    assert_ne!(caller, format!("tests/integration_tests.rs:{}", helper_line));
    assert_skipped_to(&caller, line);
}

#[test]
fn test_caller_skip_through_two_helpers() {
    let (logger, seen) = skipping(2);

    let line = line!() + 1;
    log_through_two_helpers(&logger);

    let caller = seen.lock()[0].clone();
    assert_skipped_to(&caller, line);
}

#[test]
fn test_caller_skip_one_through_two_helpers_stops_at_inner_helper() {
    let (logger, seen) = skipping(1);
    let inner_call = log_through_two_helpers(&logger);

    let caller = seen.lock()[0].clone();
    assert_skipped_to(&caller, inner_call);
}

#[test]
fn test_huge_caller_skip_is_undefined() {
    let (logger, seen) = capturing(|seen| {
        Logger::with_caller_skip(
            LogLevel::Debug,
            move |record: &Record<'_>| seen.lock().push(record.caller.to_string()),
            100_000,
        )
    });

    logger.error("lost");
    assert_eq!(*seen.lock(), vec!["undefined".to_string()]);
}

#[test]
fn test_wrap_receives_level_name_message() {
    let (logger, seen) = capturing(|seen| {
        Logger::wrap(LogLevel::Verbose, move |level: LogLevel, name: Option<&str>, msg: &str| {
            seen.lock().push(format!("{}|{}|{}", level, name.unwrap_or("-"), msg));
        })
    });

    logger.debug("dropped");
    logger.verbosef("%q", "quoted");
    logger.named("auth").info(("user ", 7, " logged in"));
    logger.log(LogLevel::Fatal, "no exit through log");

    assert_eq!(
        *seen.lock(),
        vec![
            "VERBO|-|\"quoted\"".to_string(),
            "INFO|auth|user 7 logged in".to_string(),
            "FATAL|-|no exit through log".to_string(),
        ]
    );
}

#[test]
fn test_formatting_problems_are_inline() {
    let (logger, seen) = capturing(|seen| {
        Logger::new(LogLevel::Debug, move |record: &Record<'_>| {
            seen.lock().push(record.message.to_string());
        })
    });

    logger.infof("%d", "x");
    logger.infof("%d %d", 1);
    logger.infof("%d", (1, 2));
    logger.infof("", ("a", 1, 2));

    assert_eq!(
        *seen.lock(),
        vec![
            "%!d(string=x)".to_string(),
            "1 %!d(MISSING)".to_string(),
            "1%!(EXTRA int=2)".to_string(),
            "a1 2".to_string(),
        ]
    );
}

#[test]
fn test_config_builds_logger() {
    let config: LoggerConfig = serde_json::from_str(
        r#"{ "min_level": "WARN", "scale": "collapsed", "name": "jobs" }"#,
    )
    .expect("valid config");

    let buffer = SharedBuffer::default();
    let logger = config
        .builder()
        .writer(buffer.clone())
        .build()
        .expect("valid logger");

    logger.info("hidden");
    logger.warn("shown");

    let text = buffer.text();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("][WARN ][jobs] shown ("));
}

#[test]
fn test_current_stack_mentions_this_test() {
    let dump = current_stack();
    assert!(dump.contains("test_current_stack_mentions_this_test"));
}
