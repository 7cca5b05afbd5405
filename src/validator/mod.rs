//! Catalog validation.
//!
//! [`validate`] runs every check over a catalog and collects the findings in an
//! [`IndentingReport`]. Findings never abort validation; the caller decides
//! what an invalid catalog means.

pub mod checks;

use tracing::debug;

use crate::catalog::Catalog;
use crate::util::{IndentingReport, ReportSink};

/// Options for a validation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Where report lines are mirrored
    pub sink: ReportSink,

    /// Also require unique message names per ministry and stand-alone names that
    /// do not collide with series names
    pub strict_names: bool,
}

impl ValidationOptions {
    pub fn new(sink: ReportSink) -> Self {
        Self {
            sink,
            ..Default::default()
        }
    }
}

/// Validate a catalog. Returns whether it is valid along with the full report.
pub fn validate(catalog: &Catalog, options: ValidationOptions) -> (bool, IndentingReport) {
    let mut report = IndentingReport::new(options.sink);
    let mut valid = true;

    valid &= checks::series_names_unique(catalog, &mut report);
    valid &= checks::message_series_exist(catalog, &mut report);
    valid &= checks::series_indices_well_formed(catalog, &mut report);

    for series in &catalog.series {
        valid &= checks::series_record(series, &mut report);
    }
    for msg in &catalog.messages {
        valid &= checks::message_record(msg, &mut report);
    }

    if options.strict_names {
        valid &= checks::message_names_unique(catalog, &mut report);
        valid &= checks::stand_alone_names_unique(catalog, &mut report);
    }

    debug!(valid, findings = report.size(), "Validated catalog");
    (valid, report)
}
