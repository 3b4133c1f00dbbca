//! Basic logger usage example
//!
//! Demonstrates pattern rendering, the two severity gates, the logging
//! macros and reopening a rotated log file.
//!
//! Run with: cargo run --example basic_usage

use pattern_logger::prelude::*;
use pattern_logger::{error, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Pattern Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .name("demo")
        .level(LogLevel::Debug)
        .pattern("%d{%H:%M:%S} [%p] [%c] %f:%l %m%n")
        .appender(Arc::new(ConsoleAppender::with_colors(true)))
        .build();

    println!("1. Logging at different levels:");
    for level in LogLevel::ALL {
        let event = LogEvent::capture(file!(), line!())
            .with_message(format!("This is a {} message", level));
        logger.log(level, &event);
    }

    println!("\n2. Raising the logger threshold to WARN:");
    logger.set_level(LogLevel::Warn);
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");
    error!(logger, "Error code: {}", 500);

    println!("\n3. Writing errors to a file:");
    let dir = std::env::temp_dir().join("pattern_logger_demo");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("errors.log");

    let file = Arc::new(
        FileAppender::new(&path)?
            .with_level(LogLevel::Error)
            .with_formatter(LogFormatter::new("%d [%p] %t %m%n").shared()),
    );
    logger.add_appender(file.clone());
    warn!(logger, "Console only");
    error!(logger, "Console and file");

    let rotated = dir.join("errors.log.1");
    std::fs::rename(&path, &rotated)?;
    if file.reopen() {
        error!(logger, "Written after rotation");
    }
    logger.flush()?;

    println!("   current file: {}", std::fs::read_to_string(&path)?.trim_end());
    println!("   rotated file: {}", std::fs::read_to_string(&rotated)?.trim_end());

    println!("\n4. Invalid patterns stay visible in the output:");
    logger.set_level(LogLevel::Debug);
    if !logger.set_pattern("%q %m%n") {
        println!("   pattern rejected, keeping the previous formatter");
    }
    let broken = Logger::builder().pattern("%q %m%n").build();
    broken.add_appender(Arc::new(ConsoleAppender::new()));
    info!(broken, "rendered with an error marker");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
