//! Small shared utilities: identifier hashing and diagnostic reports.

pub mod hash;
pub mod report;

pub use hash::compute_hash;
pub use report::{IndentingReport, ReportSink};
