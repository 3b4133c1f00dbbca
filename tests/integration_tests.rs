//! Integration tests for the logger pipeline
//!
//! These tests verify:
//! - Pattern rendering through real appenders
//! - Logger and appender thresholds acting as independent gates
//! - Default formatter assignment
//! - File reopen after external rotation
//! - Thread safety of shared loggers and appenders

use chrono::{TimeZone, Utc};
use pattern_logger::appenders::file::FileAppender;
use pattern_logger::core::appender::{AppendOutcome, Appender, AppenderState};
use pattern_logger::core::error::{LoggerError, Result};
use pattern_logger::core::formatter::LogFormatter;
use pattern_logger::core::log_event::LogEvent;
use pattern_logger::core::log_level::LogLevel;
use pattern_logger::core::logger::Logger;
use pattern_logger::{LoggerConfig, LoggerRegistry};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn event(message: &str) -> LogEvent {
    let ts = Utc
        .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
        .single()
        .expect("valid datetime");
    LogEvent::new("tests/integration_tests.rs", 30, 250, 7, 3, ts).with_message(message)
}

fn file_appender(temp_dir: &TempDir, name: &str) -> (Arc<FileAppender>, std::path::PathBuf) {
    let path = temp_dir.path().join(name);
    let appender = FileAppender::new(&path).expect("Failed to create appender");
    (Arc::new(appender), path)
}

#[test]
fn test_end_to_end_render() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "e2e.log");

    let logger = Logger::builder().name("e2e").pattern("[%p] %m%n").build();
    logger.add_appender(appender);
    logger.info(&event("hello"));

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    assert_eq!(content, "[INFO] hello\n");
}

#[test]
fn test_default_pattern_through_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "default.log");

    let logger = Logger::new("system");
    logger.add_appender(appender);
    logger.error(&event("disk failure"));

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "2025-01-08 10:30:45 [ERROR] [system] tests/integration_tests.rs:30 disk failure\n"
    );
}

#[test]
fn test_logger_warn_appender_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "gates.log");
    appender.set_level(LogLevel::Error);

    let logger = Logger::builder().level(LogLevel::Warn).pattern("%p %m%n").build();
    logger.add_appender(appender.clone());

    logger.warn(&event("passes logger only"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    logger.fatal(&event("passes both"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "FATAL passes both\n");

    let metrics = logger.metrics();
    assert_eq!(metrics.accepted_count(), 2);
    assert_eq!(metrics.filtered_count(), 1);
    assert_eq!(metrics.written_count(), 1);
}

#[test]
fn test_appenders_have_independent_thresholds() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (all, all_path) = file_appender(&temp_dir, "all.log");
    let (errors, errors_path) = file_appender(&temp_dir, "errors.log");
    errors.set_level(LogLevel::Error);

    let logger = Logger::builder().pattern("%p %m%n").build();
    logger.add_appender(all);
    logger.add_appender(errors);

    logger.debug(&event("a"));
    logger.warn(&event("b"));
    logger.error(&event("c"));

    assert_eq!(
        fs::read_to_string(&all_path).unwrap(),
        "DEBUG a\nWARN b\nERROR c\n"
    );
    assert_eq!(fs::read_to_string(&errors_path).unwrap(), "ERROR c\n");
}

#[test]
fn test_default_formatter_not_retroactive() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (early, early_path) = file_appender(&temp_dir, "early.log");
    let (late, late_path) = file_appender(&temp_dir, "late.log");

    let logger = Logger::builder().pattern("old %m%n").build();
    logger.add_appender(early);
    logger.set_formatter(LogFormatter::new("new %m%n").shared());
    logger.add_appender(late);

    logger.info(&event("x"));

    assert_eq!(fs::read_to_string(&early_path).unwrap(), "old x\n");
    assert_eq!(fs::read_to_string(&late_path).unwrap(), "new x\n");
}

#[test]
fn test_shared_formatter_between_appenders() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (first, first_path) = file_appender(&temp_dir, "first.log");
    let (second, second_path) = file_appender(&temp_dir, "second.log");

    let shared = LogFormatter::new("%c|%m%n").shared();
    first.set_formatter(Arc::clone(&shared));
    second.set_formatter(Arc::clone(&shared));

    let logger = Logger::new("shared");
    logger.add_appender(first);
    logger.add_appender(second);
    logger.info(&event("same"));

    assert_eq!(fs::read_to_string(&first_path).unwrap(), "shared|same\n");
    assert_eq!(fs::read_to_string(&second_path).unwrap(), "shared|same\n");
    assert_eq!(Arc::strong_count(&shared), 3);
}

#[test]
fn test_appender_shared_between_loggers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "both.log");
    appender.set_formatter(LogFormatter::new("%c %m%n").shared());

    let http = Logger::new("http");
    let db = Logger::new("db");
    http.add_appender(appender.clone());
    db.add_appender(appender.clone());

    http.info(&event("request"));
    db.info(&event("query"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "http request\ndb query\n");
}

#[test]
fn test_reopen_after_rotation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "rotate.log");
    let logger = Logger::builder().pattern("%m%n").build();
    logger.add_appender(appender.clone());

    logger.info(&event("one"));
    appender.close().unwrap();
    logger.info(&event("lost while closed"));
    assert_eq!(appender.dropped_count(), 1);
    assert_eq!(logger.metrics().failed_count(), 1);

    let rotated = temp_dir.path().join("rotate.log.1");
    fs::rename(&path, &rotated).unwrap();

    assert!(appender.reopen());
    logger.info(&event("two"));

    assert_eq!(fs::read_to_string(&rotated).unwrap(), "one\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");
}

#[test]
fn test_del_appender_missing_is_noop() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (a, _) = file_appender(&temp_dir, "a.log");
    let (b, _) = file_appender(&temp_dir, "b.log");
    let (c, _) = file_appender(&temp_dir, "c.log");

    let logger = Logger::root();
    logger.add_appender(a.clone());
    logger.add_appender(b.clone());

    assert!(!logger.del_appender(&c));
    let order: Vec<String> = logger
        .appenders()
        .iter()
        .filter_map(|appender| appender.formatter().map(|f| f.pattern().to_string()))
        .collect();
    assert_eq!(order.len(), 2);

    assert!(logger.del_appender(&a));
    assert_eq!(logger.appender_count(), 1);
    assert!(!logger.del_appender(&a));
}

#[test]
fn test_error_tracking() {
    // Sink that always fails
    struct FailingAppender {
        state: AppenderState,
        attempts: AtomicUsize,
    }

    impl Appender for FailingAppender {
        fn state(&self) -> &AppenderState {
            &self.state
        }

        fn write_formatted(&self, _level: LogLevel, _text: &str) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            Err(LoggerError::other("Simulated failure"))
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "FailingAppender"
        }
    }

    let failing = Arc::new(FailingAppender {
        state: AppenderState::default(),
        attempts: AtomicUsize::new(0),
    });

    let logger = Logger::root();
    logger.add_appender(failing.clone());

    for _ in 0..5 {
        logger.info(&event("Test message"));
    }

    assert_eq!(failing.attempts.load(Ordering::Relaxed), 5);
    assert_eq!(logger.metrics().failed_count(), 5);
    assert_eq!(
        failing.log(&logger, LogLevel::Info, &event("direct")),
        AppendOutcome::Failed
    );
}

#[test]
fn test_concurrent_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "threads.log");

    let logger = Arc::new(Logger::builder().pattern("%t %m%n").build());
    logger.add_appender(appender);

    let handles: Vec<_> = (0..8)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let event = LogEvent::capture(file!(), line!())
                        .with_message(format!("thread {} message {}", thread_id, i));
                    logger.info(&event);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer panicked");
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 400);
    assert!(lines.iter().all(|line| line.contains("message")));
}

#[test]
fn test_reopen_races_with_writers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (appender, path) = file_appender(&temp_dir, "race.log");

    let logger = Arc::new(Logger::builder().pattern("%m%n").build());
    logger.add_appender(appender.clone());

    let writer = {
        let logger = Arc::clone(&logger);
        std::thread::spawn(move || {
            for i in 0..200 {
                logger.info(&event(&format!("line {}", i)));
            }
        })
    };

    for _ in 0..20 {
        assert!(appender.reopen());
    }
    writer.join().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 200);
    assert!(content.lines().all(|line| line.starts_with("line ")));
}

#[test]
fn test_registry_from_json_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("registry.log");
    let json = serde_json::json!([
        {
            "name": "root",
            "level": "INFO",
            "pattern": "%c [%p] %m%n",
            "appenders": [{ "type": "file", "path": path }]
        }
    ])
    .to_string();

    let configs = LoggerConfig::list_from_json(&json).unwrap();
    let registry = LoggerRegistry::from_configs(&configs).unwrap();

    let worker = registry.get_or_create("worker");
    worker.debug(&event("hidden"));
    worker.warn(&event("visible"));
    registry.root().info(&event("from root"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "worker [WARN] visible\nroot [INFO] from root\n"
    );
}
