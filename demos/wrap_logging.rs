//! Wrap logging example
//!
//! Demonstrates handing messages to another logging library instead of
//! formatting lines here.
//!
//! Run with: cargo run --example wrap_logging

use logadapter::prelude::*;

/// Minimal `log` backend printing to stdout
struct StdoutLog;

impl log::Log for StdoutLog {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        println!("   log: {:<5} {:<10} {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static STDOUT_LOG: StdoutLog = StdoutLog;

fn main() -> Result<()> {
    println!("=== logadapter - Wrap Logging Example ===\n");

    println!("1. Wrapping a closure:");
    let logger = Logger::wrap(LogLevel::Verbose, |level: LogLevel, name: Option<&str>, msg: &str| {
        println!("   wrap: level={} name={} msg={}", level, name.unwrap_or("-"), msg);
    });
    logger.debug("hidden below VERBO");
    logger.verbose("probe enabled");
    logger.named("cache").infof("hit ratio %.1f%%", 97.25);

    println!("\n2. Forwarding to the log facade:");
    if log::set_logger(&STDOUT_LOG).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
    let bridged = Logger::wrap_log(LogLevel::Info);
    bridged.info("routed through log");
    bridged.named("http").error(("upstream returned ", 502));

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
