//! Diagnostic sinks.
//!
//! The parser never formats or renders diagnostics itself. Every syntax error and
//! every non-fatal diagnostic is handed to a [`Reporter`] as a line number and a
//! message.

use log::warn;

/// Receives diagnostics as they are produced.
pub trait Reporter {
    fn report(&mut self, line: u32, message: &str);
}

/// A single reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

/// Collects every diagnostic in the order it was reported.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Returns true if any reported message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|entry| entry.message.contains(needle))
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, line: u32, message: &str) {
        self.entries.push(Diagnostic {
            line,
            message: message.to_string(),
        });
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter {
    count: usize,
}

impl LogReporter {
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Reporter for LogReporter {
    fn report(&mut self, line: u32, message: &str) {
        self.count += 1;
        warn!("[line {}] Error {}", line, message);
    }
}
