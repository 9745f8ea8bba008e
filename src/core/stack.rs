//! Stack dumps of the calling thread

use std::fmt::Write as _;

const INITIAL_FRAME_BUDGET: usize = 64;
const MAX_ATTEMPTS: u32 = 5;

/// Marker appended when the stack is deeper than the largest budget.
pub const ELIDED_MARKER: &str = "      ... more frames elided";

/// Textual dump of the calling thread's stack.
///
/// The dump starts with a thread header followed by one numbered entry per
/// frame, with the symbol and `file:line` where they can be resolved.
/// Frames are captured into a budget that doubles each time the walk runs
/// out of room; after the last attempt the dump is truncated and ends with
/// [`ELIDED_MARKER`].
///
/// ```
/// let dump = logadapter::current_stack();
/// assert!(dump.starts_with("thread "));
/// ```
pub fn current_stack() -> String {
    let (frames, truncated) = capture();
    let mut trace = backtrace::Backtrace::from(frames);
    trace.resolve();

    let thread = std::thread::current();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "thread '{}' ({:?}):",
        thread.name().unwrap_or("<unnamed>"),
        thread.id()
    );

    for (idx, frame) in trace.frames().iter().enumerate() {
        let symbols = frame.symbols();
        if symbols.is_empty() {
            let _ = writeln!(out, "{:>4}: {:?}", idx, frame.ip());
            continue;
        }
        for (n, symbol) in symbols.iter().enumerate() {
            let name = symbol
                .name()
                .map_or_else(|| "<unknown>".to_string(), |name| name.to_string());
            if n == 0 {
                let _ = writeln!(out, "{:>4}: {}", idx, name);
            } else {
                let _ = writeln!(out, "      {}", name);
            }
            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                let _ = writeln!(out, "             at {}:{}", file.display(), line);
            }
        }
    }

    if truncated {
        let _ = writeln!(out, "{}", ELIDED_MARKER);
    }
    out
}

/// Walk the stack with a growing budget. Returns the frames and whether the
/// walk was cut short.
fn capture() -> (Vec<backtrace::BacktraceFrame>, bool) {
    let mut budget = INITIAL_FRAME_BUDGET;
    let mut attempt = 1;
    loop {
        let mut frames = Vec::with_capacity(budget);
        let mut complete = true;
        backtrace::trace(|frame| {
            if frames.len() == budget {
                complete = false;
                return false;
            }
            frames.push(backtrace::BacktraceFrame::from(frame.clone()));
            true
        });

        if complete || attempt == MAX_ATTEMPTS {
            return (frames, !complete);
        }
        budget *= 2;
        attempt += 1;
    }
}
