//! Resolve source positions from the call stack.
//!
//! Two resolvers are available:
//!
//! - [`trace_caller`] reads the caller's location through `#[track_caller]`.
//!   It is exact, needs no debug information, and is what the position
//!   hasher builds on.
//! - [`trace_position`] walks the captured call stack and picks a frame by
//!   depth. It depends on debug information being present in the binary, so
//!   it is a best-effort tool for diagnostics.

use std::fmt::Display;

use backtrace::Backtrace;
use log::trace;

/// A position in source code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodePosition {
    /// Source file, as a path or a `file://` URL.
    pub url: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, or `0` when the platform records none.
    pub column: u32,
}

impl Display for CodePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.url, self.line, self.column)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("stack depth({depth}) out of bounds({max})")]
    OutOfBounds { depth: usize, max: usize },

    #[error("unable to resolve stack frame: {frame}")]
    Unresolved { frame: String },

    #[error("unable to locate the tracing frame, is the binary stripped of symbols?")]
    MissingSymbols,
}

/// A single resolved symbol of the captured stack. Inlined functions
/// contribute one symbol each, so they count as frames too.
#[derive(Debug)]
struct Frame {
    name: String,
    position: Option<CodePosition>,
}

fn capture_frames() -> Vec<Frame> {
    Backtrace::new()
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .map(|symbol| {
            let name = symbol
                .name()
                .map(|name| format!("{:#}", name))
                .unwrap_or_else(|| String::from("<unknown>"));
            let position = match (symbol.filename(), symbol.lineno()) {
                (Some(filename), Some(line)) => Some(CodePosition {
                    url: filename.display().to_string(),
                    line,
                    column: symbol.colno().unwrap_or(0),
                }),
                _ => None,
            };
            Frame { name, position }
        })
        .collect()
}

/// Trace the code position `depth` frames above this function.
///
/// Depth `0` is `trace_position` itself, depth `1` its caller, and so on.
#[inline(never)]
pub fn trace_position(depth: usize) -> Result<CodePosition, TraceError> {
    let frames = capture_frames();

    // Everything above our own frame belongs to the capture machinery.
    let own_frame = frames
        .iter()
        .position(|frame| frame.name.contains(concat!(module_path!(), "::trace_position")))
        .ok_or(TraceError::MissingSymbols)?;
    let frames = &frames[own_frame..];
    trace!("captured {} frames above the tracer", frames.len());

    let frame = frames.get(depth).ok_or(TraceError::OutOfBounds {
        depth,
        max: frames.len() - 1,
    })?;
    frame
        .position
        .clone()
        .ok_or_else(|| TraceError::Unresolved {
            frame: frame.name.clone(),
        })
}

/// The position of the code that called this function.
///
/// Propagates through other `#[track_caller]` functions, so a chain of them
/// reports the outermost call site.
#[track_caller]
pub fn trace_caller() -> CodePosition {
    let location = std::panic::Location::caller();
    CodePosition {
        url: location.file().to_owned(),
        line: location.line(),
        column: location.column(),
    }
}
