//! File logging example
//!
//! Demonstrates logging to both the console and a file through one sink.
//!
//! Run with: cargo run --example file_logging

use logadapter::prelude::*;

fn main() -> Result<()> {
    println!("=== logadapter - File Logging Example ===\n");

    let console = ConsoleSink::new();
    let file = WriterSink::open("application.log")?;

    // Fan each record out to both outputs
    let logger = Logger::new(LogLevel::Debug, move |record: &Record<'_>| {
        console.emit(record);
        file.emit(record);
    });

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");
    logger.named("db").info("Database connection established");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.infof("Processing item %d/%d", (i, 5));
        if i == 3 {
            logger.warn(("Item ", i, " took longer than expected"));
        }
    }

    println!("\n3. File-only logger:");
    let audit = Logger::to_file(LogLevel::Info, "application.log")?.named("audit");
    audit.info("All operations completed");

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
