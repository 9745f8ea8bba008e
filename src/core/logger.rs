//! Main logger implementation

use super::{
    caller,
    error::{LoggerError, Result},
    log_level::{LevelScale, LogLevel},
    message::{self, LogArgs},
    record::Record,
    sink::{Sink, Wrap},
};
use crate::appenders::{ConsoleSink, WriterSink};
use chrono::Local;
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

/// Exit status used by the fatal entry points.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Minimum level given either as a [`LogLevel`] or as a raw numeric code.
///
/// Raw codes are checked against the logger's [`LevelScale`] when the
/// logger is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    Level(LogLevel),
    Code(u8),
}

impl Threshold {
    pub fn resolve(self, scale: LevelScale) -> Result<LogLevel> {
        match self {
            Threshold::Level(level) => Ok(scale.normalize(level)),
            Threshold::Code(code) => scale
                .level(code)
                .ok_or_else(|| LoggerError::invalid_level(code, scale.max_code())),
        }
    }
}

impl From<LogLevel> for Threshold {
    fn from(level: LogLevel) -> Self {
        Threshold::Level(level)
    }
}

impl From<u8> for Threshold {
    fn from(code: u8) -> Self {
        Threshold::Code(code)
    }
}

#[derive(Clone)]
enum Output {
    Direct(Arc<dyn Sink>),
    Wrap(Arc<dyn Wrap>),
}

/// A leveled logger.
///
/// A `Logger` is an immutable value: its threshold, scale, caller skip and
/// output are fixed when it is built. Cloning is cheap and clones share the
/// output. [`Logger::named`] returns a new logger and leaves the receiver
/// untouched.
///
/// # Example
///
/// ```
/// use logadapter::{LogLevel, Logger, Record};
///
/// let logger = Logger::new(LogLevel::Info, |record: &Record<'_>| {
///     println!("{} {} ({})", record.level, record.message, record.caller);
/// });
/// logger.debug("dropped");
/// logger.info(("listening on port ", 8080));
/// logger.named("db").warnf("pool at %d%%", 95);
/// ```
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    scale: LevelScale,
    name: Option<Arc<str>>,
    caller_skip: usize,
    output: Output,
}

impl Logger {
    /// Create a logger that hands decorated records to `sink`.
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn new<F>(min_level: impl Into<Threshold>, sink: F) -> Self
    where
        F: Fn(&Record<'_>) + Send + Sync + 'static,
    {
        Self::with_caller_skip(min_level, sink, 0)
    }

    /// Like [`Logger::new`], skipping `caller_skip` extra frames when the
    /// caller location is resolved.
    ///
    /// Use this when log calls go through helper functions that are not
    /// `#[track_caller]`.
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn with_caller_skip<F>(min_level: impl Into<Threshold>, sink: F, caller_skip: usize) -> Self
    where
        F: Fn(&Record<'_>) + Send + Sync + 'static,
    {
        Self::builder()
            .min_level(min_level)
            .caller_skip(caller_skip)
            .sink(sink)
            .build()
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Create a logger around any [`Sink`] implementation.
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn from_sink<S: Sink + 'static>(min_level: impl Into<Threshold>, sink: S) -> Self {
        Self::builder()
            .min_level(min_level)
            .sink(sink)
            .build()
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Create a logger that delegates to another logging library.
    ///
    /// `wrap` receives only the level, the logger name and the message; the
    /// wrapped library is expected to add its own timestamp and caller, so
    /// neither is computed here.
    ///
    /// # Example
    ///
    /// ```
    /// use logadapter::{LogLevel, Logger};
    ///
    /// let logger = Logger::wrap(LogLevel::Info, |level: LogLevel, name: Option<&str>, msg: &str| {
    ///     eprintln!("{}:{} {}", name.unwrap_or("-"), level, msg);
    /// });
    /// logger.info("hello from the wrapped logger");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn wrap<F>(min_level: impl Into<Threshold>, wrap: F) -> Self
    where
        F: Fn(LogLevel, Option<&str>, &str) + Send + Sync + 'static,
    {
        Self::builder()
            .min_level(min_level)
            .wrap(wrap)
            .build()
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Create a logger writing console-formatted lines to `writer`.
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn to_writer<W: Write + Send + 'static>(min_level: impl Into<Threshold>, writer: W) -> Self {
        Self::from_sink(min_level, WriterSink::new(writer))
    }

    /// Create a logger appending console-formatted lines to the file at
    /// `path`, creating it if needed.
    ///
    /// The file is closed when the last logger sharing it is dropped.
    pub fn to_file(min_level: impl Into<Threshold>, path: impl AsRef<Path>) -> Result<Self> {
        let sink = WriterSink::open(path)?;
        Self::builder().min_level(min_level).sink(sink).build()
    }

    /// A logger writing console-formatted lines to stderr, like the
    /// process-wide default.
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn stderr(min_level: impl Into<Threshold>) -> Self {
        Self::from_sink(min_level, ConsoleSink::new())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logadapter::{LevelScale, Logger};
    ///
    /// let logger = Logger::builder()
    ///     .scale(LevelScale::Collapsed)
    ///     .min_level(1u8)
    ///     .writer(std::io::sink())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// A copy of this logger carrying `name`; an empty name means unnamed.
    ///
    /// Keeping the returned logger around is cheaper than calling `named`
    /// for every message.
    #[must_use]
    pub fn named(&self, name: &str) -> Logger {
        if self.name() == name {
            return self.clone();
        }
        Logger {
            name: (!name.is_empty()).then(|| Arc::from(name)),
            ..self.clone()
        }
    }

    /// Logger name, empty when unnamed.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn scale(&self) -> LevelScale {
        self.scale
    }

    pub fn caller_skip(&self) -> usize {
        self.caller_skip
    }

    /// Whether this logger hands messages to another logging library.
    pub fn is_wrapping(&self) -> bool {
        matches!(self.output, Output::Wrap(_))
    }

    /// Whether a call at `level` would be emitted.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.scale.normalize(level) >= self.min_level
    }

    #[track_caller]
    pub fn debug(&self, args: impl LogArgs) {
        self.emit(LogLevel::Debug, None, &args);
    }

    #[track_caller]
    pub fn debugf(&self, template: &str, args: impl LogArgs) {
        self.emit(LogLevel::Debug, Some(template), &args);
    }

    /// For chasing one problem when debug output is too noisy; remove or
    /// lower to debug once resolved.
    #[track_caller]
    pub fn verbose(&self, args: impl LogArgs) {
        self.emit(LogLevel::Verbose, None, &args);
    }

    #[track_caller]
    pub fn verbosef(&self, template: &str, args: impl LogArgs) {
        self.emit(LogLevel::Verbose, Some(template), &args);
    }

    #[track_caller]
    pub fn info(&self, args: impl LogArgs) {
        self.emit(LogLevel::Info, None, &args);
    }

    #[track_caller]
    pub fn infof(&self, template: &str, args: impl LogArgs) {
        self.emit(LogLevel::Info, Some(template), &args);
    }

    #[track_caller]
    pub fn warn(&self, args: impl LogArgs) {
        self.emit(LogLevel::Warn, None, &args);
    }

    #[track_caller]
    pub fn warnf(&self, template: &str, args: impl LogArgs) {
        self.emit(LogLevel::Warn, Some(template), &args);
    }

    #[track_caller]
    pub fn error(&self, args: impl LogArgs) {
        self.emit(LogLevel::Error, None, &args);
    }

    #[track_caller]
    pub fn errorf(&self, template: &str, args: impl LogArgs) {
        self.emit(LogLevel::Error, Some(template), &args);
    }

    /// Log at FATAL, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, args: impl LogArgs) -> ! {
        self.emit(LogLevel::Fatal, None, &args);
        terminate()
    }

    /// Log a formatted message at FATAL, then exit the process with status 1.
    #[track_caller]
    pub fn fatalf(&self, template: &str, args: impl LogArgs) -> ! {
        self.emit(LogLevel::Fatal, Some(template), &args);
        terminate()
    }

    /// Log at an arbitrary level. Unlike [`Logger::fatal`] this never exits.
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: impl LogArgs) {
        self.emit(level, None, &args);
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, template: &str, args: impl LogArgs) {
        self.emit(level, Some(template), &args);
    }

    /// Log pre-built format arguments; the entry point of the logging
    /// macros. `args` is only rendered if the level passes.
    #[track_caller]
    pub fn log_args(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.dispatch(level, || match args.as_str() {
            Some(s) => s.to_string(),
            None => args.to_string(),
        });
    }

    /// [`Logger::log_args`] at FATAL, then exit the process with status 1.
    #[track_caller]
    pub fn fatal_args(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_args(LogLevel::Fatal, args);
        terminate()
    }

    #[track_caller]
    fn emit<A: LogArgs + ?Sized>(&self, level: LogLevel, template: Option<&str>, args: &A) {
        self.dispatch(level, || message::assemble(template, args));
    }

    #[track_caller]
    fn dispatch(&self, level: LogLevel, render: impl FnOnce() -> String) {
        let level = self.scale.normalize(level);
        debug_assert!(level < LogLevel::Fatal || level >= self.min_level);
        if level < self.min_level {
            return;
        }

        let message = render();
        match &self.output {
            Output::Wrap(wrap) => wrap.wrap(level, self.name.as_deref(), &message),
            Output::Direct(sink) => {
                let caller = caller::resolve(Location::caller(), self.caller_skip);
                let record = Record {
                    level,
                    name: self.name.as_deref(),
                    timestamp: Local::now(),
                    caller: &caller,
                    message: &message,
                };
                sink.emit(&record);
            }
        }
    }
}

fn terminate() -> ! {
    std::process::exit(FATAL_EXIT_CODE)
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("scale", &self.scale)
            .field("name", &self.name())
            .field("caller_skip", &self.caller_skip)
            .field("wrapping", &self.is_wrapping())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Unlike the [`Logger`] constructors, [`LoggerBuilder::build`] reports an
/// out-of-range threshold as an error instead of panicking.
///
/// # Example
/// ```
/// use logadapter::prelude::*;
///
/// let result = Logger::builder().min_level(9u8).writer(std::io::sink()).build();
/// assert!(matches!(result, Err(LoggerError::InvalidLevel { code: 9, max: 5 })));
/// ```
pub struct LoggerBuilder {
    min_level: Threshold,
    scale: LevelScale,
    name: Option<String>,
    caller_skip: usize,
    output: Option<Output>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    ///
    /// The defaults are the lowest level, the full scale, no name and no
    /// caller skip. An output must be set before building.
    pub fn new() -> Self {
        Self {
            min_level: Threshold::Level(LogLevel::Debug),
            scale: LevelScale::Full,
            name: None,
            caller_skip: 0,
            output: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: impl Into<Threshold>) -> Self {
        self.min_level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn scale(mut self, scale: LevelScale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Extra frames to skip when resolving the caller location.
    #[must_use = "builder methods return a new value"]
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = skip;
        self
    }

    /// Send decorated records to `sink`. Replaces any previous output.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.output = Some(Output::Direct(Arc::new(sink)));
        self
    }

    /// Write console-formatted lines to `writer`. Replaces any previous
    /// output.
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.sink(WriterSink::new(writer))
    }

    /// Delegate to another logging library. Replaces any previous output.
    #[must_use = "builder methods return a new value"]
    pub fn wrap<W: Wrap + 'static>(mut self, wrap: W) -> Self {
        self.output = Some(Output::Wrap(Arc::new(wrap)));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let min_level = self.min_level.resolve(self.scale)?;
        let output = self.output.ok_or(LoggerError::MissingOutput)?;
        Ok(Logger {
            min_level,
            scale: self.scale,
            name: self.name.filter(|n| !n.is_empty()).map(Arc::from),
            caller_skip: self.caller_skip,
            output,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Captured {
        level: LogLevel,
        name: Option<String>,
        caller: String,
        message: String,
    }

    fn capturing(min_level: impl Into<Threshold>) -> (Logger, Arc<Mutex<Vec<Captured>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let logger = Logger::new(min_level, move |record: &Record<'_>| {
            sink_seen.lock().push(Captured {
                level: record.level,
                name: record.name.map(String::from),
                caller: record.caller.to_string(),
                message: record.message.to_string(),
            });
        });
        (logger, seen)
    }

    #[test]
    fn test_threshold_filters_lower_levels() {
        for threshold in LogLevel::ALL {
            let (logger, seen) = capturing(threshold);
            for level in LogLevel::ALL {
                logger.log(level, "x");
            }
            let levels: Vec<LogLevel> = seen.lock().iter().map(|c| c.level).collect();
            let expected: Vec<LogLevel> =
                LogLevel::ALL.into_iter().filter(|l| *l >= threshold).collect();
            assert_eq!(levels, expected, "threshold {}", threshold);
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        for code in [6u8, 7, 42, u8::MAX] {
            let result = Logger::builder().min_level(code).writer(std::io::sink()).build();
            assert!(matches!(result, Err(LoggerError::InvalidLevel { max: 5, .. })));
        }
    }

    #[test]
    #[should_panic(expected = "invalid root level: 6")]
    fn test_new_panics_on_invalid_code() {
        let _ = Logger::new(6u8, |_: &Record<'_>| {});
    }

    #[test]
    fn test_stderr_accepts_level_or_code() {
        let by_level = Logger::stderr(LogLevel::Warn);
        let by_code = Logger::stderr(3u8);
        assert_eq!(by_level.min_level(), LogLevel::Warn);
        assert_eq!(by_code.min_level(), LogLevel::Warn);
        assert!(!by_code.is_wrapping());
        assert_eq!(by_code.scale(), LevelScale::Full);
    }

    #[test]
    #[should_panic(expected = "invalid root level: 9")]
    fn test_stderr_panics_on_invalid_code() {
        let _ = Logger::stderr(9u8);
    }

    #[test]
    fn test_missing_output_rejected() {
        let result = Logger::builder().min_level(LogLevel::Info).build();
        assert!(matches!(result, Err(LoggerError::MissingOutput)));
    }

    #[test]
    fn test_record_fields() {
        let (logger, seen) = capturing(LogLevel::Debug);
        let line = line!() + 1;
        logger.named("db").infof("%s=%d", ("x", 5));

        let captured = seen.lock();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, LogLevel::Info);
        assert_eq!(captured[0].name.as_deref(), Some("db"));
        assert_eq!(captured[0].message, "x=5");
        assert_eq!(captured[0].caller, format!("core/logger.rs:{}", line));
    }

    #[test]
    fn test_named_leaves_receiver_untouched() {
        let (logger, seen) = capturing(LogLevel::Debug);
        let db = logger.named("db");
        let same = db.named("db");
        let unnamed = db.named("");

        logger.info("root");
        db.info("child");
        same.info("again");
        unnamed.info("plain");

        let names: Vec<Option<String>> = seen.lock().iter().map(|c| c.name.clone()).collect();
        assert_eq!(
            names,
            vec![None, Some("db".to_string()), Some("db".to_string()), None]
        );
        assert_eq!(logger.name(), "");
        assert_eq!(same.name(), "db");
    }

    #[test]
    fn test_collapsed_scale_folds_verbose() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let logger = Logger::builder()
            .scale(LevelScale::Collapsed)
            .min_level(0u8)
            .sink(move |record: &Record<'_>| sink_seen.lock().push(record.level))
            .build()
            .unwrap();

        logger.verbose("folded");
        assert_eq!(*seen.lock(), vec![LogLevel::Debug]);

        let info = Logger::builder()
            .scale(LevelScale::Collapsed)
            .min_level(1u8)
            .writer(std::io::sink())
            .build()
            .unwrap();
        assert_eq!(info.min_level(), LogLevel::Info);
        assert!(!info.enabled(LogLevel::Verbose));

        let rejected = Logger::builder()
            .scale(LevelScale::Collapsed)
            .min_level(5u8)
            .writer(std::io::sink())
            .build();
        assert!(matches!(rejected, Err(LoggerError::InvalidLevel { code: 5, max: 4 })));
    }

    #[test]
    fn test_filtered_call_does_no_formatting() {
        struct Loud;
        impl fmt::Display for Loud {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a filtered record");
            }
        }

        let (logger, seen) = capturing(LogLevel::Info);
        logger.debug(message::Displayed(Loud));
        logger.debugf("%v", message::Displayed(Loud));
        logger.log_args(LogLevel::Debug, format_args!("{}", Loud));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_wrap_skips_caller_resolution() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let wrap_calls = Arc::clone(&calls);
        let logger = Logger::wrap(LogLevel::Info, move |level: LogLevel, name: Option<&str>, msg: &str| {
            wrap_calls
                .lock()
                .push((level, name.map(String::from), msg.to_string()));
        });

        let before = caller::LOOKUPS.with(|n| n.get());
        logger.debug("dropped");
        logger.info(("hello ", 42));
        logger.named("svc").warn("careful");
        assert_eq!(caller::LOOKUPS.with(|n| n.get()), before);

        assert!(logger.is_wrapping());
        assert_eq!(
            *calls.lock(),
            vec![
                (LogLevel::Info, None, "hello 42".to_string()),
                (LogLevel::Warn, Some("svc".to_string()), "careful".to_string()),
            ]
        );
    }

    #[test]
    fn test_log_args_renders_lazily() {
        let (logger, seen) = capturing(LogLevel::Debug);
        logger.log_args(LogLevel::Warn, format_args!("{} + {} = {}", 1, 2, 3));
        logger.log_args(LogLevel::Info, format_args!("static"));
        let messages: Vec<String> = seen.lock().iter().map(|c| c.message.clone()).collect();
        assert_eq!(messages, vec!["1 + 2 = 3", "static"]);
    }

    #[test]
    fn test_track_caller_wrappers_are_transparent() {
        #[track_caller]
        fn helper(logger: &Logger) {
            logger.error("from helper");
        }

        let (logger, seen) = capturing(LogLevel::Debug);
        let line = line!() + 1;
        helper(&logger);
        assert_eq!(seen.lock()[0].caller, format!("core/logger.rs:{}", line));
    }

    #[test]
    fn test_debug_format() {
        let logger = Logger::to_writer(LogLevel::Warn, std::io::sink()).named("x");
        let text = format!("{:?}", logger);
        assert!(text.contains("Warn"));
        assert!(text.contains("\"x\""));
    }
}
