//! Frame output.
//!
//! Reads hex frame lines, runs them through a [`Session`] and writes the
//! rendered text. Bad lines are logged and skipped unless fail-fast is set.

use std::io::{BufRead, Write};

use clap::ValueEnum;
use tracing::{debug, warn};

use netdissect_core::{Session, Verbosity};

use crate::error::{Error, Result};
use crate::input::parse_line;

/// Output detail levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputLevel {
    /// One line per frame
    Minimal,
    /// One line per layer (default)
    Summary,
    /// Indented tree with every field
    Full,
}

impl From<OutputLevel> for Verbosity {
    fn from(level: OutputLevel) -> Self {
        match level {
            OutputLevel::Minimal => Verbosity::Minimal,
            OutputLevel::Summary => Verbosity::Summary,
            OutputLevel::Full => Verbosity::Full,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames rendered to the output
    pub printed: u64,
    /// Lines that held a frame but were skipped
    pub skipped: u64,
}

/// Writes rendered frames from line-oriented hex input.
pub struct FramePrinter {
    session: Session,
    fail_fast: bool,
}

impl FramePrinter {
    pub fn new(session: Session, fail_fast: bool) -> Self {
        Self { session, fail_fast }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process every line of `input`, writing frames to `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let text = line?;

            match self.print_line(line_no, &text, out) {
                Ok(true) => stats.printed += 1,
                Ok(false) => {}
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) if self.fail_fast => return Err(e),
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping frame");
                    stats.skipped += 1;
                }
            }
        }

        debug!(printed = stats.printed, skipped = stats.skipped, "input exhausted");
        Ok(stats)
    }

    /// Returns `false` for lines without a frame.
    fn print_line<W: Write>(&mut self, line: usize, text: &str, out: &mut W) -> Result<bool> {
        let Some(frame) = parse_line(line, text)? else {
            return Ok(false);
        };
        let rendered = self
            .session
            .process(&frame.data, frame.timestamp)
            .map_err(|source| Error::Decode { line, source })?;
        out.write_all(rendered.as_bytes())?;
        Ok(true)
    }
}
