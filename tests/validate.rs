//! Validator Integration Tests
//!
//! Whole-catalog validation through the public entry point.

use online::catalog::codec;
use online::{
    validate, Catalog, CatalogMessage, CatalogSeries, DateOnly, MessageType, Ministry,
    ReportSink, SeriesReference, ValidationOptions, View,
};

fn indexed_catalog(indices: &[i32]) -> Catalog {
    let mut series = CatalogSeries::new("SERIES");
    series.id = "WOLS-TEST".into();
    series.visibility = View::Public;

    let messages = indices
        .iter()
        .enumerate()
        .map(|(position, index)| {
            let mut msg = CatalogMessage::new(
                DateOnly::from_ymd(2021, 1, position as u32 + 1).unwrap(),
                format!("MSG-{}", position),
            );
            msg.ministry = Some(Ministry::WordOfLife);
            msg.kind = Some(MessageType::Message);
            msg.visibility = Some(View::Public);
            msg.series = vec![SeriesReference::new("SERIES", *index)];
            msg
        })
        .collect();

    Catalog::new(vec![series], messages)
}

fn is_valid(indices: &[i32]) -> bool {
    validate(&indexed_catalog(indices), ValidationOptions::default()).0
}

#[test]
fn test_series_index_rules() {
    assert!(!is_valid(&[1, 1, 2]), "duplicate index");
    assert!(!is_valid(&[1, 3, 4]), "gap");
    assert!(!is_valid(&[2, 3]), "missing first index");
    assert!(is_valid(&[1, 2, 0, 0]));
    assert!(is_valid(&[0, 0]));
}

#[test]
fn test_index_findings_name_the_messages() {
    let (valid, report) = validate(&indexed_catalog(&[1, 1, 2]), ValidationOptions::default());

    assert!(!valid);
    assert!(report
        .as_str()
        .contains("Series 'SERIES' has at least two messages with index 1: 'MSG-0' and 'MSG-1'"));
}

#[test]
fn test_fixture_reports_missing_series_id() {
    let catalog = codec::from_json(include_str!("testdata/minimal-catalog.json")).unwrap();

    let (valid, report) = validate(&catalog, ValidationOptions::new(ReportSink::Silent));

    assert!(!valid);
    assert_eq!(report.size(), 1);
    assert_eq!(
        report.as_str(),
        "Series 'Walking in Faith':\n   Has no ID\n"
    );
}

#[test]
fn test_fixed_fixture_is_valid() {
    let mut catalog = codec::from_json(include_str!("testdata/minimal-catalog.json")).unwrap();
    let generated = catalog.series[0].id().to_string();
    assert!(generated.starts_with("WOLS-"));

    let (valid, report) = validate(&catalog, ValidationOptions::default());

    assert!(valid, "unexpected findings:\n{}", report);
    assert!(report.is_empty());
}

#[test]
fn test_unknown_series_reference() {
    let mut catalog = indexed_catalog(&[1]);
    catalog.messages[0]
        .series
        .push(SeriesReference::new("MISSING", 1));

    let (valid, report) = validate(&catalog, ValidationOptions::default());

    assert!(!valid);
    assert!(report
        .as_str()
        .contains("Message 'MSG-0' references series named 'MISSING' which cannot be found"));
}

#[test]
fn test_strict_names_is_opt_in() {
    let mut catalog = indexed_catalog(&[1, 2]);
    catalog.messages[1].name = "MSG-0".into();

    assert!(validate(&catalog, ValidationOptions::default()).0);

    let strict = ValidationOptions {
        strict_names: true,
        ..Default::default()
    };
    let (valid, report) = validate(&catalog, strict);
    assert!(!valid);
    assert!(report
        .as_str()
        .contains("There are multiple wol messages with the name 'MSG-0'"));
}
