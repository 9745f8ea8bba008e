//! Caller location resolution
//!
//! Every public logging entry point is `#[track_caller]`, so the location of
//! the original call is available from [`Location::caller`] for free. Hosts
//! that route logging through their own helper functions either mark those
//! helpers `#[track_caller]` as well, or configure a caller skip, in which
//! case the stack is walked to find the frame the skip points at.

use std::panic::Location;

/// Reported when the caller cannot be determined.
pub const UNDEFINED: &str = "undefined";

#[cfg(test)]
thread_local! {
    pub(crate) static LOOKUPS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Shorten a source path to its parent directory and file name.
///
/// A path without a parent directory is kept whole.
///
/// # Examples
///
/// ```
/// use logadapter::core::caller::short_path;
///
/// assert_eq!(short_path("/home/dev/app/src/server/conn.rs"), "server/conn.rs");
/// assert_eq!(short_path("src/lib.rs"), "src/lib.rs");
/// assert_eq!(short_path("lib.rs"), "lib.rs");
/// ```
#[must_use]
pub fn short_path(file: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == '\\';
    match file.rfind(is_sep) {
        Some(last) => match file[..last].rfind(is_sep) {
            Some(parent) => &file[parent + 1..],
            None => file,
        },
        None => file,
    }
}

/// `short_path:line` for a tracked location.
#[must_use]
pub fn format_location(location: &Location<'_>) -> String {
    format!("{}:{}", short_path(location.file()), location.line())
}

/// Resolve the caller to report for a log call made at `location`.
///
/// With `skip == 0` this is `location` itself. Otherwise the stack is walked
/// and the frame `skip` levels above the one containing `location` is
/// reported. Returns [`UNDEFINED`] when that frame cannot be resolved.
pub(crate) fn resolve(location: &'static Location<'static>, skip: usize) -> String {
    #[cfg(test)]
    LOOKUPS.with(|n| n.set(n.get() + 1));

    if skip == 0 {
        return format_location(location);
    }
    walk(location, skip).unwrap_or_else(|| UNDEFINED.to_string())
}

fn walk(location: &Location<'_>, skip: usize) -> Option<String> {
    let trace = backtrace::Backtrace::new();

    // Inlined calls resolve to several symbols per frame, innermost first,
    // so flattening keeps the logical call order.
    let positions: Vec<(String, u32)> = trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| {
            let file = symbol.filename()?.to_string_lossy().replace('\\', "/");
            Some((file, symbol.lineno()?))
        })
        .collect();

    let outside = past_own_frames(&positions);
    let wanted = location.file().replace('\\', "/");
    let candidates = &positions[outside..];

    let origin = candidates
        .iter()
        .position(|(file, line)| same_file(file, &wanted) && *line == location.line())
        .or_else(|| candidates.iter().position(|(file, _)| same_file(file, &wanted)))?;

    let (file, line) = candidates.get(origin + skip)?;
    Some(format!("{}:{}", short_path(file), line))
}

/// Whether the debug-info path `file` names the source file `wanted`.
///
/// `wanted` comes from [`Location::file`] and may be relative, so it must
/// match whole trailing path components.
fn same_file(file: &str, wanted: &str) -> bool {
    match file.strip_suffix(wanted) {
        Some(prefix) => prefix.is_empty() || prefix.ends_with('/') || wanted.starts_with('/'),
        None => false,
    }
}

/// Index of the first position after the innermost run of this crate's own
/// frames, or 0 when none of them could be identified.
fn past_own_frames(positions: &[(String, u32)]) -> usize {
    let own_src = format!("{}/src/", env!("CARGO_MANIFEST_DIR").replace('\\', "/"));
    let is_own = |file: &str| file.starts_with(&own_src);

    match positions.iter().position(|(file, _)| is_own(file)) {
        Some(first) => positions[first..]
            .iter()
            .position(|(file, _)| !is_own(file))
            .map_or(positions.len(), |n| first + n),
        None => 0,
    }
}
