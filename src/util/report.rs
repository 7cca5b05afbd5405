//! Indenting report with deferred section headers.
//!
//! Section titles are only written once something is reported beneath them,
//! so a check can open a section up front and close it afterwards, and a
//! clean section leaves no trace in the output.

use std::fmt;

const INDENT: &str = "   ";

/// Where report lines are mirrored as they are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportSink {
    /// Keep the report in memory only
    #[default]
    Silent,

    /// Mirror each line to the log
    Log,

    /// Mirror each line to standard error
    Stderr,

    /// Mirror each line to standard output
    Stdout,
}

impl fmt::Display for ReportSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSink::Silent => write!(f, "silent"),
            ReportSink::Log => write!(f, "log"),
            ReportSink::Stderr => write!(f, "stderr"),
            ReportSink::Stdout => write!(f, "stdout"),
        }
    }
}

impl std::str::FromStr for ReportSink {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "silent" | "quiet" => Ok(ReportSink::Silent),
            "log" => Ok(ReportSink::Log),
            "stderr" | "err" => Ok(ReportSink::Stderr),
            "stdout" | "out" => Ok(ReportSink::Stdout),
            _ => anyhow::bail!("Unknown report level: {}", s),
        }
    }
}

/// Hierarchical report buffer
#[derive(Debug, Default)]
pub struct IndentingReport {
    sink: ReportSink,
    size: usize,
    depth: usize,
    pending_headers: Vec<String>,
    buffer: String,
}

impl IndentingReport {
    pub fn new(sink: ReportSink) -> Self {
        Self {
            sink,
            ..Default::default()
        }
    }

    /// Open a section. The title is written when the first line is reported in it.
    pub fn start_section(&mut self, title: impl Into<String>) {
        self.pending_headers.push(title.into());
    }

    /// Close the innermost section
    pub fn stop_section(&mut self) {
        if self.pending_headers.pop().is_none() {
            self.depth = self.depth.saturating_sub(1);
        }
    }

    /// Write one report line, flushing any pending section headers first
    pub fn line(&mut self, text: impl fmt::Display) {
        let headers = std::mem::take(&mut self.pending_headers);
        for title in headers {
            self.write(&format!("{}:", title));
            self.depth += 1;
        }

        self.write(&text.to_string());
        self.size += 1;
    }

    /// Number of lines reported, not counting section headers
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn sink(&self) -> ReportSink {
        self.sink
    }

    /// The full buffered report
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write(&mut self, text: &str) {
        let line = format!("{}{}", INDENT.repeat(self.depth), text);

        self.buffer.push_str(&line);
        self.buffer.push('\n');

        match self.sink {
            ReportSink::Silent => {}
            ReportSink::Log => tracing::warn!("{}", line),
            ReportSink::Stderr => eprintln!("{}", line),
            ReportSink::Stdout => println!("{}", line),
        }
    }
}

impl fmt::Display for IndentingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
