//! The root aggregate owning every series and message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec::null_as_default;
use super::date_only::DateOnly;
use super::message::CatalogMessage;
use super::ministry::Ministry;
use super::series::CatalogSeries;
use super::series_reference::index_order_key;
use super::view::View;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// When the catalog was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Series defined in the source data
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub series: Vec<CatalogSeries>,

    /// Messages defined in the source data
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub messages: Vec<CatalogMessage>,

    /// Series synthesized from stand-alone messages
    #[serde(skip)]
    message_series: Vec<CatalogSeries>,

    #[serde(skip)]
    prepared: bool,
}

impl Catalog {
    pub fn new(series: Vec<CatalogSeries>, messages: Vec<CatalogMessage>) -> Self {
        Self {
            created: Some(Utc::now()),
            series,
            messages,
            ..Default::default()
        }
    }

    /// Explicit series followed by the synthesized stand-alone series
    pub fn all_series(&self) -> impl Iterator<Item = &CatalogSeries> {
        self.series.iter().chain(self.message_series.iter())
    }

    pub fn message_series(&self) -> &[CatalogSeries] {
        &self.message_series
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// First series with exactly this name, explicit series first
    pub fn find_series_by_name(&self, name: &str) -> Option<&CatalogSeries> {
        self.all_series().find(|s| s.name == name)
    }

    /// Messages referencing `series_name`, in series order. Each copy keeps only the
    /// matching reference.
    pub fn find_messages_in_series(&self, series_name: &str) -> Vec<CatalogMessage> {
        let mut found: Vec<CatalogMessage> = self
            .messages
            .iter()
            .filter_map(|msg| {
                let reference = msg.find_series_reference(series_name)?.clone();
                let mut copy = msg.clone();
                copy.series = vec![reference];
                Some(copy)
            })
            .collect();

        found.sort_by_key(|m| index_order_key(m.series[0].index));
        found
    }

    /// Give every explicit series its messages and date window. References to
    /// undefined series are left for the validator.
    pub fn attach_messages_to_series(&mut self) {
        for position in 0..self.series.len() {
            let name = self.series[position].name.clone();
            let messages = self.find_messages_in_series(&name);
            self.series[position].attach_messages(messages);
        }
    }

    /// Build a single-message series for every stand-alone message, in message order
    pub fn synthesize_stand_alone_series(&mut self) {
        self.message_series = self
            .messages
            .iter()
            .filter(|m| m.is_stand_alone())
            .map(CatalogSeries::from_stand_alone_message)
            .collect();
    }

    /// Attach messages and synthesize stand-alone series; runs once
    pub fn prepare(&mut self) {
        if self.prepared {
            return;
        }

        self.attach_messages_to_series();
        self.synthesize_stand_alone_series();
        self.prepared = true;

        debug!(
            series = self.series.len(),
            stand_alone = self.message_series.len(),
            messages = self.messages.len(),
            "Prepared catalog"
        );
    }

    /// Clear non-URL audio and video on every message
    pub fn initialize_messages(&mut self) {
        for msg in &mut self.messages {
            msg.initialize();
        }
    }

    /// Series visible in `view`, each normalized for it. Series left without
    /// messages are dropped.
    pub fn view_of(&self, view: View) -> Vec<CatalogSeries> {
        self.all_series()
            .filter(|s| s.visibility.is_visible_in(view))
            .map(|s| s.view_of(view))
            .filter(|s| !s.messages_in_view().is_empty())
            .collect()
    }

    /// Dated messages of a ministry on or after `since`, newest first
    pub fn recent_messages(&self, ministry: Ministry, since: DateOnly) -> Vec<&CatalogMessage> {
        let mut recent: Vec<&CatalogMessage> = self
            .messages
            .iter()
            .filter(|m| m.ministry == Some(ministry))
            .filter(|m| !m.date.is_zero() && m.date >= since)
            .collect();

        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeriesReference;

    fn message(name: &str, refs: &[(&str, i32)]) -> CatalogMessage {
        let mut msg = CatalogMessage::new(DateOnly::from_ymd(2021, 1, 1).unwrap(), name);
        msg.series = refs
            .iter()
            .map(|(series, index)| SeriesReference::new(*series, *index))
            .collect();
        msg.visibility = Some(View::Public);
        msg
    }

    fn names(messages: &[CatalogMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_find_series_by_name() {
        let mut catalog = Catalog::new(
            vec![CatalogSeries::new("SERIES-A"), CatalogSeries::new("SERIES-B")],
            vec![message("LONE", &[])],
        );

        assert!(catalog.find_series_by_name("SERIES-B").is_some());
        assert!(catalog.find_series_by_name("series-b").is_none());
        assert!(catalog.find_series_by_name("LONE").is_none());

        catalog.prepare();
        assert!(catalog.find_series_by_name("LONE").is_some());
    }

    #[test]
    fn test_find_messages_in_series_empty() {
        let catalog = Catalog::default();
        assert!(catalog.find_messages_in_series("SERIES").is_empty());

        let catalog = Catalog::new(vec![], vec![message("MSG", &[("OTHER", 1)])]);
        assert!(catalog.find_messages_in_series("SERIES").is_empty());
    }

    #[test]
    fn test_find_messages_in_series_strips_other_references() {
        let catalog = Catalog::new(
            vec![],
            vec![message("MSG", &[("A", 3), ("SERIES", 2), ("B", 1)])],
        );

        let found = catalog.find_messages_in_series("SERIES");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].series, vec![SeriesReference::new("SERIES", 2)]);
        assert_eq!(catalog.messages[0].series.len(), 3);
    }

    #[test]
    fn test_find_messages_in_series_sorted() {
        let catalog = Catalog::new(
            vec![CatalogSeries::new("SERIES")],
            vec![
                message("MSG-3", &[("SERIES", 3)]),
                message("MSG-1", &[("SERIES", 1)]),
                message("MSG-2", &[("SERIES", 2)]),
            ],
        );

        assert_eq!(
            names(&catalog.find_messages_in_series("SERIES")),
            vec!["MSG-1", "MSG-2", "MSG-3"]
        );
    }

    #[test]
    fn test_find_messages_in_series_equal_indices_keep_input_order() {
        let catalog = Catalog::new(
            vec![CatalogSeries::new("SERIES")],
            vec![
                message("A", &[("SERIES", 1)]),
                message("B", &[("SERIES", 1)]),
                message("C", &[("SERIES", 0)]),
                message("D", &[("SERIES", 1)]),
            ],
        );

        assert_eq!(
            names(&catalog.find_messages_in_series("SERIES")),
            vec!["A", "B", "D", "C"]
        );
    }

    #[test]
    fn test_prepare_attaches_references_in_any_case() {
        let mut catalog = Catalog::new(
            vec![CatalogSeries::new("Walking in Faith")],
            vec![message("MSG-1", &[("walking in faith", 1)])],
        );

        catalog.prepare();

        let series = catalog.find_series_by_name("Walking in Faith").unwrap();
        assert_eq!(names(series.messages()), vec!["MSG-1"]);
        assert!(catalog.message_series().is_empty());
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let mut catalog = Catalog::new(
            vec![CatalogSeries::new("SERIES")],
            vec![message("MSG-1", &[("SERIES", 1)]), message("LONE", &[("SAM", 0)])],
        );

        catalog.prepare();
        let series = catalog.series.clone();
        let stand_alone = catalog.message_series().to_vec();

        catalog.prepare();
        assert_eq!(catalog.series, series);
        assert_eq!(catalog.message_series(), stand_alone.as_slice());
        assert_eq!(catalog.all_series().count(), 2);
    }

    #[test]
    fn test_view_of_drops_hidden_and_empty_series() {
        let mut private_series = CatalogSeries::new("PRIVATE-SERIES");
        private_series.visibility = View::Private;
        let mut public_series = CatalogSeries::new("PUBLIC-SERIES");
        public_series.visibility = View::Public;
        let mut empty_series = CatalogSeries::new("EMPTY-SERIES");
        empty_series.visibility = View::Public;

        let mut hidden = message("HIDDEN", &[("PUBLIC-SERIES", 2)]);
        hidden.visibility = Some(View::Private);

        let mut catalog = Catalog::new(
            vec![private_series, public_series, empty_series],
            vec![
                message("P1", &[("PRIVATE-SERIES", 1)]),
                message("Q1", &[("PUBLIC-SERIES", 1)]),
                hidden,
            ],
        );
        catalog.prepare();

        let public: Vec<CatalogSeries> = catalog.view_of(View::Public);
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name, "PUBLIC-SERIES");
        assert_eq!(names(public[0].messages_in_view()), vec!["Q1"]);

        let private = catalog.view_of(View::Private);
        let private_names: Vec<&str> = private.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(private_names, vec!["PRIVATE-SERIES", "PUBLIC-SERIES"]);
        assert_eq!(private[1].messages_in_view().len(), 2);
    }

    #[test]
    fn test_recent_messages() {
        let mut old = message("OLD", &[]);
        old.ministry = Some(Ministry::WordOfLife);
        old.date = DateOnly::from_ymd(2020, 1, 1).unwrap();

        let mut newer = message("NEWER", &[]);
        newer.ministry = Some(Ministry::WordOfLife);
        newer.date = DateOnly::from_ymd(2021, 6, 1).unwrap();

        let mut newest = message("NEWEST", &[]);
        newest.ministry = Some(Ministry::WordOfLife);
        newest.date = DateOnly::from_ymd(2021, 7, 1).unwrap();

        let mut other = message("OTHER", &[]);
        other.ministry = Some(Ministry::TheBridgeOutreach);
        other.date = DateOnly::from_ymd(2021, 7, 1).unwrap();

        let catalog = Catalog::new(vec![], vec![old, newer, newest, other]);
        let recent = catalog.recent_messages(
            Ministry::WordOfLife,
            DateOnly::from_ymd(2021, 1, 1).unwrap(),
        );

        let recent_names: Vec<&str> = recent.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(recent_names, vec!["NEWEST", "NEWER"]);
    }
}
