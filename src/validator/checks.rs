//! Individual validation checks.
//!
//! Each check writes its findings to the report and returns `true` when it
//! found nothing wrong. Checks never stop early.

use std::collections::HashSet;

use crate::catalog::message::is_valid_media;
use crate::catalog::{
    Catalog, CatalogMessage, CatalogSeries, MessageType, Ministry, OnlineResource, View,
};
use crate::util::IndentingReport;

/// No two explicit series share a name
pub fn series_names_unique(catalog: &Catalog, report: &mut IndentingReport) -> bool {
    let mut names: Vec<&str> = catalog.series.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    report_adjacent_duplicates(&names, report, |name| {
        format!("There are multiple series with the name '{}'", name)
    })
}

/// Every reference other than the stand-alone marker names an explicit series
pub fn message_series_exist(catalog: &Catalog, report: &mut IndentingReport) -> bool {
    let defined: HashSet<&str> = catalog.series.iter().map(|s| s.name.as_str()).collect();
    let mut valid = true;

    for msg in &catalog.messages {
        for reference in msg.series.iter().filter(|r| !r.is_stand_alone()) {
            if !defined.contains(reference.name.as_str()) {
                valid = false;
                report.line(format!(
                    "Message '{}' references series named '{}' which cannot be found",
                    msg.name, reference.name
                ));
            }
        }
    }

    valid
}

/// Positive indices in each series run 1, 2, ..., k with no duplicates or gaps
pub fn series_indices_well_formed(catalog: &Catalog, report: &mut IndentingReport) -> bool {
    let mut valid = true;

    for series in &catalog.series {
        let messages = catalog.find_messages_in_series(&series.name);
        let mut positive: Vec<(i32, &str)> = Vec::new();

        for msg in &messages {
            let index = msg.series[0].index;
            if index < 0 {
                valid = false;
                report.line(format!(
                    "Series '{}' message '{}' has negative index {}",
                    series.name, msg.name, index
                ));
            } else if index > 0 {
                positive.push((index, msg.name.as_str()));
            }
        }

        if let Some((first, name)) = positive.first() {
            if *first != 1 {
                valid = false;
                report.line(format!(
                    "Series '{}' first message '{}' has index {}",
                    series.name, name, first
                ));
            }
        }

        for pair in positive.windows(2) {
            let ((index1, name1), (index2, name2)) = (pair[0], pair[1]);
            if index1 == index2 {
                valid = false;
                report.line(format!(
                    "Series '{}' has at least two messages with index {}: '{}' and '{}'",
                    series.name, index1, name1, name2
                ));
            } else if index2 > index1 + 1 {
                valid = false;
                report.line(format!(
                    "Series '{}' has a gap between indexes {} ('{}') and {} ('{}')",
                    series.name, index1, name1, index2, name2
                ));
            }
        }
    }

    valid
}

/// Required fields of a series record
pub fn series_record(series: &CatalogSeries, report: &mut IndentingReport) -> bool {
    let mut valid = true;
    report.start_section(format!("Series '{}'", series.name));

    if series.name.trim().is_empty() {
        valid = false;
        report.line("Has no name");
    }

    if series.visibility == View::Unknown {
        valid = false;
        report.line("Unknown visibility");
    }

    let needs_id = !series.is_booklet() && !series.visibility.is_unpublished();
    if needs_id && series.id.trim().is_empty() {
        valid = false;
        report.line("Has no ID");
    }

    valid &= resources_have_urls("Booklet", &series.booklets, report);
    valid &= resources_have_urls("Resource", &series.resources, report);

    report.stop_section();
    valid
}

/// Required fields and known tags of a message record
pub fn message_record(msg: &CatalogMessage, report: &mut IndentingReport) -> bool {
    let mut valid = true;
    report.start_section(format!("Message '{}' ({})", msg.name, msg.date));

    if msg.date.is_zero() {
        valid = false;
        report.line("Has no date");
    }

    if msg.name.trim().is_empty() {
        valid = false;
        report.line("Has no name");
    }

    match msg.ministry {
        None => {
            valid = false;
            report.line("No ministry");
        }
        Some(Ministry::Unknown) => {
            valid = false;
            report.line("Unknown ministry");
        }
        Some(_) => {}
    }

    match msg.visibility {
        None => {
            valid = false;
            report.line("No visibility");
        }
        Some(View::Unknown) => {
            valid = false;
            report.line("Unknown visibility");
        }
        Some(_) => {}
    }

    if !msg.effective_visibility().is_unpublished() {
        match msg.kind {
            None => {
                valid = false;
                report.line("No type");
            }
            Some(MessageType::Unknown) => {
                valid = false;
                report.line("Unknown type");
            }
            Some(_) => {}
        }
    }

    if !is_valid_media(&msg.audio) {
        valid = false;
        report.line(format!("Audio isn't valid: '{}'", msg.audio));
    }

    if !is_valid_media(&msg.video) {
        valid = false;
        report.line(format!("Video isn't valid: '{}'", msg.video));
    }

    valid &= resources_have_urls("Resource", &msg.resources, report);

    report.stop_section();
    valid
}

/// No two messages of the same ministry share a name
pub fn message_names_unique(catalog: &Catalog, report: &mut IndentingReport) -> bool {
    let mut keys: Vec<(&str, &str)> = catalog
        .messages
        .iter()
        .map(|m| (m.ministry.unwrap_or_default().as_str(), m.name.as_str()))
        .collect();
    keys.sort_unstable();
    report_adjacent_duplicates(&keys, report, |(ministry, name)| {
        format!("There are multiple {} messages with the name '{}'", ministry, name)
    })
}

/// Stand-alone messages do not reuse the name of a series or another stand-alone message
pub fn stand_alone_names_unique(catalog: &Catalog, report: &mut IndentingReport) -> bool {
    let mut names: Vec<&str> = catalog
        .series
        .iter()
        .map(|s| s.name.as_str())
        .chain(
            catalog
                .messages
                .iter()
                .filter(|m| m.series.is_empty())
                .map(|m| m.name.as_str()),
        )
        .collect();
    names.sort_unstable();
    report_adjacent_duplicates(&names, report, |name| {
        format!(
            "Message name '{}' conflicts with another message or series with the same name",
            name
        )
    })
}

fn resources_have_urls(
    label: &str,
    resources: &[OnlineResource],
    report: &mut IndentingReport,
) -> bool {
    let mut valid = true;
    for resource in resources {
        if !resource.url.contains("://") {
            valid = false;
            report.line(format!(
                "{} '{}' does not contain a valid URL: '{}'",
                label, resource.name, resource.url
            ));
        }
    }
    valid
}

/// Report each run of equal neighbours in a sorted list once
fn report_adjacent_duplicates<T: PartialEq + Copy>(
    sorted: &[T],
    report: &mut IndentingReport,
    describe: impl Fn(T) -> String,
) -> bool {
    let mut valid = true;
    let mut last_reported: Option<T> = None;

    for pair in sorted.windows(2) {
        if pair[0] == pair[1] && last_reported != Some(pair[0]) {
            valid = false;
            last_reported = Some(pair[0]);
            report.line(describe(pair[0]));
        }
    }

    valid
}
