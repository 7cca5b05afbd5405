//! Codec Integration Tests
//!
//! Loading and saving catalog files, and the text formats found inside them.

use online::catalog::codec;
use online::{CatalogError, DateOnly, OnlineResource, View};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("testdata/minimal-catalog.json");

#[tokio::test]
async fn test_load_fixture() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/minimal-catalog.json");

    let catalog = codec::load(path).await.unwrap();

    assert!(catalog.is_prepared());
    assert!(catalog.created.is_some());
    assert_eq!(catalog.series.len(), 3);
    assert_eq!(catalog.messages.len(), 5);
    assert_eq!(catalog.message_series().len(), 1);
    assert_eq!(catalog.all_series().count(), 4);

    let partner = catalog.find_series_by_name("Partner Training").unwrap();
    assert_eq!(partner.id, "WOLS-PARTNERS");
    assert_eq!(partner.visibility, View::Partner);
    assert_eq!(partner.start_date, DateOnly::from_ymd(2021, 2, 7).unwrap());
}

#[tokio::test]
async fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("online.cache.json");
    let catalog = codec::from_json(FIXTURE).unwrap();

    codec::save(&path, &catalog).await.unwrap();
    let reloaded = codec::load(&path).await.unwrap();

    assert_eq!(reloaded.created, catalog.created);
    assert_eq!(reloaded.series, catalog.series);
    assert_eq!(reloaded.messages, catalog.messages);
    assert_eq!(reloaded.message_series(), catalog.message_series());
}

#[test]
fn test_saved_json_holds_raw_state_only() {
    let catalog = codec::from_json(FIXTURE).unwrap();

    let text = codec::to_json(&catalog).unwrap();

    assert!(text.contains("\"resource\""));
    assert!(text.contains("\"type\": \"ministry-time\""));
    assert!(!text.contains("editing"));
    assert!(!text.contains("\"derived\""));
    assert!(!text.contains("\"attached\""));
    assert!(!text.contains("message_series"));
}

#[tokio::test]
async fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");

    let err = codec::load(&path).await.unwrap_err();

    match err {
        CatalogError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an IO error, got {:?}", other),
    }
}

#[test]
fn test_malformed_json() {
    let err = codec::from_json("{ \"series\": [").unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}

#[test]
fn test_parse_date_rejects_bad_input() {
    assert_eq!(
        codec::parse_date("2021-02-07").unwrap(),
        DateOnly::from_ymd(2021, 2, 7).unwrap()
    );

    let err = codec::parse_date("2021-13-01").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDate { ref value, .. } if value == "2021-13-01"));
}

#[test]
fn test_resource_list_formats() {
    let resources =
        OnlineResource::parse_list("http://one.pdf; [2](http://two.pdf); Video|http://youtu.be/12368");

    let pairs: Vec<(&str, &str)> = resources
        .iter()
        .map(|r| (r.name.as_str(), r.url.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("one", "http://one.pdf"),
            ("2", "http://two.pdf"),
            ("Video", "http://youtu.be/12368"),
        ]
    );

    assert!(OnlineResource::parse_list("n/a").is_empty());
}
