//! Basic logger usage example
//!
//! Demonstrates the default console logger, custom sinks and the different
//! log levels.
//!
//! Run with: cargo run --example basic_usage

use logadapter::prelude::*;

fn main() -> Result<()> {
    println!("=== logadapter - Basic Usage Example ===\n");

    println!("1. Logging through the default console logger:");
    logadapter::debug("This is a debug message");
    logadapter::verbose("This is a verbose message");
    logadapter::info(("Listening on port ", 8080));
    logadapter::warnf("Disk usage at %d%%", 91);
    logadapter::errorf("Request %q failed after %.2fs", ("/api/users", 1.5));

    println!("\n2. A logger with its own threshold and a custom sink:");
    let logger = Logger::new(LogLevel::Info, |record: &Record<'_>| {
        println!(
            "   {} {:<5} {} [{}]",
            record.timestamp.format("%H:%M:%S"),
            record.level,
            record.message,
            record.caller
        );
    });
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");
    logger.named("auth").warn(("Failed login for user ", 42));

    println!("\n3. Building from a configuration:");
    let config = LoggerConfig {
        min_level: LogLevel::Warn,
        scale: LevelScale::Collapsed,
        name: "jobs".to_string(),
        ..LoggerConfig::default()
    };
    let jobs = config.builder().sink(ConsoleSink::new()).build()?;
    jobs.info("Info message (hidden)");
    jobs.error("Job queue stalled");

    println!("\n4. Current stack:");
    println!("{}", current_stack());

    println!("=== Example completed successfully! ===");

    Ok(())
}
