//! Append-only string log.

use crate::services::{Clearable, Showable};
use std::fmt::{self, Display};

/// An in-memory, append-only list of lines.
///
/// Renders as the lines joined with `\n`.
///
/// # Example
///
/// ```rust
/// use momenti::services::Logger;
///
/// let mut logger = Logger::new();
/// logger.add("first");
/// logger.add("second");
/// assert_eq!(logger.to_string(), "first\nsecond");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Logger {
    name: String,
    lines: Vec<String>,
}

impl Logger {
    /// Creates an empty, unnamed logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name used as the alert title.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Returns the logger's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a line.
    pub fn add(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns the recorded lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of recorded lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Clearable for Logger {
    fn clear(&mut self) {
        tracing::debug!(logger = %self.name, lines = self.lines.len(), "log cleared");
        self.lines.clear();
    }
}

impl Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl Showable for Logger {
    fn title(&self) -> &str {
        &self.name
    }
}
