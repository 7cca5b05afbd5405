//! Series: ordered collections of messages plus series-level metadata.
//!
//! A [`CatalogSeries`] holds the raw record that is persisted, the messages
//! attached to it when the catalog is prepared, and a [`SeriesView`] with the
//! state derived by the most recent [`CatalogSeries::normalize`].

use std::collections::HashSet;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::codec::{null_as_default, tag_or_default};
use super::date_only::DateOnly;
use super::message::CatalogMessage;
use super::ministry::Ministry;
use super::resource::OnlineResource;
use super::series_reference::{index_order_key, SeriesReference};
use super::view::View;
use crate::util::compute_hash;

/// Identifier prefix of series synthesized from stand-alone messages
pub const STAND_ALONE_ID_PREFIX: &str = "SAM-";

/// State derived for one view of a series
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesView {
    /// View the state was built for; raw until normalized for another view
    pub view: View,

    /// Visible messages in series order
    pub messages: Vec<CatalogMessage>,

    /// Speakers in series order, first occurrence wins
    pub speakers: Vec<String>,

    /// Series resources followed by message resources, unique by URL
    pub resources: Vec<OnlineResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeries {
    /// Web- and file-safe identifier; generated from the name when empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Study guides (PDF)
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub booklets: Vec<OnlineResource>,

    /// Other series-level resources (links, documents, videos)
    #[serde(
        rename = "resource",
        alias = "resources",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub resources: Vec<OnlineResource>,

    /// Visibility of the series as a whole
    #[serde(default, deserialize_with = "tag_or_default")]
    pub visibility: View,

    /// DVD or CD jacket image
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jacket: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,

    #[serde(rename = "start-date", default, skip_serializing_if = "DateOnly::is_zero")]
    pub start_date: DateOnly,

    #[serde(
        rename = "end-date",
        alias = "stop-date",
        default,
        skip_serializing_if = "DateOnly::is_zero"
    )]
    pub end_date: DateOnly,

    #[serde(skip)]
    attached: Vec<CatalogMessage>,

    #[serde(skip)]
    derived: SeriesView,
}

impl CatalogSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Single-message series for a stand-alone message
    pub fn from_stand_alone_message(msg: &CatalogMessage) -> Self {
        let mut series = CatalogSeries {
            id: format!("{}{}", STAND_ALONE_ID_PREFIX, compute_hash(&msg.name)),
            name: msg.name.clone(),
            description: msg.description.clone(),
            resources: msg.resources.clone(),
            visibility: msg.effective_visibility(),
            start_date: msg.date,
            end_date: msg.date,
            ..Default::default()
        };

        let mut copy = msg.clone();
        copy.series = vec![SeriesReference::new(series.name.clone(), 1)];
        series.attach_messages(vec![copy]);

        series
    }

    /// Replace the attached messages and rebuild the raw view
    pub fn attach_messages(&mut self, mut messages: Vec<CatalogMessage>) {
        messages.sort_by_key(|m| index_order_key(self.index_of(m)));
        self.attached = messages;
        self.normalize(View::Raw);
    }

    /// Index of `msg` within this series, 0 when it has no reference to it
    pub fn index_of(&self, msg: &CatalogMessage) -> i32 {
        msg.find_series_reference(&self.name)
            .map(|r| r.index)
            .unwrap_or(0)
    }

    /// Every attached message regardless of view
    pub fn messages(&self) -> &[CatalogMessage] {
        &self.attached
    }

    /// Messages visible in the current view, in series order
    pub fn messages_in_view(&self) -> &[CatalogMessage] {
        &self.derived.messages
    }

    pub fn view(&self) -> View {
        self.derived.view
    }

    pub fn derived(&self) -> &SeriesView {
        &self.derived
    }

    pub fn speakers(&self) -> &[String] {
        &self.derived.speakers
    }

    pub fn merged_resources(&self) -> &[OnlineResource] {
        &self.derived.resources
    }

    /// Rebuild derived state for `view`: filter, order, date window, speakers, resources
    pub fn normalize(&mut self, view: View) {
        let mut messages: Vec<CatalogMessage> = self
            .attached
            .iter()
            .filter(|m| m.is_visible_in(view))
            .cloned()
            .collect();
        messages.sort_by_key(|m| index_order_key(self.index_of(m)));

        if !self.attached.is_empty() {
            let dates = messages.iter().map(|m| m.date).filter(|d| !d.is_zero());
            self.start_date = dates.clone().min().unwrap_or_default();
            self.end_date = dates.max().unwrap_or_default();
        }

        let mut speakers: Vec<String> = Vec::new();
        for speaker in messages.iter().flat_map(|m| &m.speakers) {
            if !speakers.contains(speaker) {
                speakers.push(speaker.clone());
            }
        }

        let mut seen_urls = HashSet::new();
        let resources = self
            .resources
            .iter()
            .chain(messages.iter().flat_map(|m| &m.resources))
            .filter(|r| seen_urls.insert(r.url.clone()))
            .cloned()
            .collect();

        self.derived = SeriesView {
            view,
            messages,
            speakers,
            resources,
        };
    }

    /// Copy of this series normalized for `view`
    pub fn view_of(&self, view: View) -> CatalogSeries {
        let mut copy = self.clone();
        copy.normalize(view);
        copy
    }

    /// Ministry of the first message in the current view
    pub fn ministry(&self) -> Ministry {
        self.derived
            .messages
            .first()
            .and_then(|m| m.ministry)
            .unwrap_or(Ministry::Unknown)
    }

    /// True for study-guide records: booklets, no explicit id, no messages
    pub fn is_booklet(&self) -> bool {
        !self.booklets.is_empty() && self.id.is_empty() && self.attached.is_empty()
    }

    /// The explicit identifier, or the one derived from ministry and name
    pub fn generated_id(&self) -> String {
        if !self.id.is_empty() {
            return self.id.clone();
        }
        format!("{}{}", self.ministry().id_prefix(), compute_hash(&self.name))
    }

    /// Identifier, generating and storing it when absent
    pub fn id(&mut self) -> &str {
        if self.id.is_empty() {
            self.id = self.generated_id();
        }
        &self.id
    }

    /// Identifier for one published view; the public view uses the plain id
    pub fn view_id(&mut self, view: View) -> String {
        let id = self.id().to_string();
        if view == View::Public {
            return id;
        }
        let hash = compute_hash(&format!("{}{}", id, view.as_str()));
        format!("{}-{}", id, hash)
    }

    pub fn speaker_string(&self) -> String {
        self.derived.speakers.join(", ")
    }

    /// Date window for display, e.g. `Jul 8 - Sep 1, 2006`
    pub fn date_string(&self) -> String {
        let Some(start) = self.start_date.date() else {
            return "Coming Soon".to_string();
        };
        let Some(end) = self.end_date.date() else {
            return format!("Started {}", start.format("%b %-d, %Y"));
        };

        if start == end {
            start.format("%b %-d, %Y").to_string()
        } else if start.year() == end.year() && start.month() == end.month() {
            format!("{}-{}", start.format("%b %-d"), end.format("%-d, %Y"))
        } else if start.year() == end.year() {
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        } else {
            format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
        }
    }
}

/// Series whose current view belongs to `ministry`
pub fn filter_series_by_ministry(
    corpus: &[CatalogSeries],
    ministry: Ministry,
) -> Vec<CatalogSeries> {
    corpus
        .iter()
        .filter(|s| s.ministry() == ministry)
        .cloned()
        .collect()
}

/// Alphabetical, ignoring case
pub fn sort_series_by_name(series: &mut [CatalogSeries]) {
    series.sort_by_cached_key(|s| s.name.to_lowercase());
}

pub fn sort_series_oldest_to_newest(series: &mut [CatalogSeries]) {
    series.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.name.cmp(&b.name)));
}

pub fn sort_series_newest_to_oldest(series: &mut [CatalogSeries]) {
    series.sort_by(|a, b| b.start_date.cmp(&a.start_date).then_with(|| a.name.cmp(&b.name)));
}
