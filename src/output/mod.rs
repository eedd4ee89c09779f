//! Output formatting module for stylint
//!
//! Diagnostics are printed either as human-readable text or as JSON.

use crate::rule::LintWarning;
use std::io::{self, Write};

pub mod formatters;

pub use formatters::*;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a collection of warnings for output
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String;

    /// Format a summary of results across multiple files
    fn format_summary(&self, _files_processed: usize, _total_warnings: usize, _duration_ms: u64) -> Option<String> {
        None
    }

    /// Whether this formatter should use colors
    fn use_colors(&self) -> bool {
        false
    }
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable `file:line:column: [rule] message` lines
    Text,
    /// A single JSON array of diagnostics for all files
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl OutputFormat {
    /// Create a formatter instance for this format
    pub fn create_formatter(&self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text if use_colors => Box::new(TextFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::without_colors()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

/// Output writer that handles stdout/stderr routing
pub struct OutputWriter {
    use_stderr: bool,
    silent: bool,
}

impl OutputWriter {
    pub fn new(use_stderr: bool, silent: bool) -> Self {
        Self { use_stderr, silent }
    }

    /// Write output to appropriate stream
    pub fn write(&self, content: &str) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }

        if self.use_stderr {
            let mut stderr = io::stderr().lock();
            stderr.write_all(content.as_bytes())?;
            stderr.flush()
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()
        }
    }

    /// Write a line to appropriate stream
    pub fn writeln(&self, content: &str) -> io::Result<()> {
        self.write(&format!("{content}\n"))
    }

    /// Write error output (always to stderr unless silent)
    pub fn write_error(&self, content: &str) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }
        writeln!(io::stderr().lock(), "{content}")
    }
}
