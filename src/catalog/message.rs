//! A single recorded teaching event.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::codec::{null_as_default, optional_tag};
use super::date_only::DateOnly;
use super::message_type::MessageType;
use super::ministry::Ministry;
use super::resource::OnlineResource;
use super::series_reference::SeriesReference;
use super::view::View;
use crate::adapters::SizeResolver;

/// Non-URL values the audio and video columns may hold while a recording moves
/// through production
pub const PRODUCTION_STATES: [&str; 12] = [
    "-",
    "n/a",
    "n/e",
    "abrogated",
    "in progress",
    "exporting",
    "exported",
    "editing",
    "edited",
    "rendering",
    "rendered",
    "uploading",
];

/// Whether `value` is a URL or one of the known production states
pub fn is_valid_media(value: &str) -> bool {
    if value.is_empty() || is_url(value) {
        return true;
    }
    let state = value.trim().to_lowercase();
    PRODUCTION_STATES.contains(&state.as_str())
}

fn is_url(value: &str) -> bool {
    value.contains("://")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMessage {
    /// Date the message was given or recorded (required)
    #[serde(default)]
    pub date: DateOnly,

    /// Title of the message (required)
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Significant speakers, in speaking order
    #[serde(default, deserialize_with = "null_as_default")]
    pub speakers: Vec<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_tag"
    )]
    pub ministry: Option<Ministry>,

    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_tag"
    )]
    pub kind: Option<MessageType>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_tag"
    )]
    pub visibility: Option<View>,

    /// Series this message belongs to
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub series: Vec<SeriesReference>,

    #[serde(
        rename = "playlist",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub playlists: Vec<String>,

    /// Audio URL, or a production state
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub audio: String,

    /// Video URL (YouTube, Rumble, BitChute, S3), or a production state
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub video: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub resources: Vec<OnlineResource>,
}

impl CatalogMessage {
    pub fn new(date: DateOnly, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Audio location, empty when the stored value is not a URL
    pub fn audio_url(&self) -> &str {
        if is_url(&self.audio) {
            &self.audio
        } else {
            ""
        }
    }

    /// Video location, empty when the stored value is not a URL
    pub fn video_url(&self) -> &str {
        if is_url(&self.video) {
            &self.video
        } else {
            ""
        }
    }

    pub fn has_audio(&self) -> bool {
        !self.audio_url().is_empty()
    }

    pub fn has_video(&self) -> bool {
        !self.video_url().is_empty()
    }

    /// Size of the audio file in bytes: 0 without audio, -1 when the lookup fails
    pub async fn audio_size(&self, resolver: &dyn SizeResolver) -> i64 {
        let url = self.audio_url();
        if url.is_empty() {
            return 0;
        }

        match resolver.content_length(url).await {
            Ok(size) => i64::try_from(size).unwrap_or(i64::MAX),
            Err(e) => {
                warn!(url, error = %e, "Could not get audio file size");
                -1
            }
        }
    }

    /// First reference naming `series_name`, ignoring case
    pub fn find_series_reference(&self, series_name: &str) -> Option<&SeriesReference> {
        let wanted = series_name.to_uppercase();
        self.series.iter().find(|r| r.name.to_uppercase() == wanted)
    }

    pub fn in_series(&self, series_name: &str) -> bool {
        self.find_series_reference(series_name).is_some()
    }

    /// Clear audio and video values that are production states rather than URLs,
    /// and expand well-known speaker abbreviations. Safe to call more than once.
    pub fn initialize(&mut self) {
        if !is_url(&self.audio) {
            self.audio.clear();
        }
        if !is_url(&self.video) {
            self.video.clear();
        }

        let ministry = self.ministry;
        for speaker in &mut self.speakers {
            *speaker = normalize_speaker_name(speaker, ministry);
        }
    }

    /// Visibility used for view filtering; a missing value counts as raw
    pub fn effective_visibility(&self) -> View {
        self.visibility.unwrap_or(View::Raw)
    }

    pub fn is_visible_in(&self, view: View) -> bool {
        self.effective_visibility().is_visible_in(view)
    }

    /// True when the message has no series or is marked stand-alone
    pub fn is_stand_alone(&self) -> bool {
        self.series.is_empty() || self.series.iter().any(SeriesReference::is_stand_alone)
    }

    pub fn speaker_string(&self) -> String {
        self.speakers.join(", ")
    }

    /// `Jan 2, 2006`, or `Scheduled for Jan 2, 2006` when after `today`
    pub fn date_string(&self, today: DateOnly) -> String {
        if self.date.is_zero() {
            return String::new();
        }

        let text = self.date.format("%b %-d, %Y");
        if self.date > today {
            format!("Scheduled for {}", text)
        } else {
            text
        }
    }

    /// Location of the transcript with the given extension, stored in an `xscript/`
    /// folder beside the audio file
    pub fn transcript_url(&self, ext: &str) -> String {
        let audio = self.audio_url();
        if audio.is_empty() {
            return String::new();
        }

        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };

        let url = audio.replacen(".mp3", &ext, 1);
        match url.rfind('/') {
            Some(slash) => format!("{}xscript/{}", &url[..=slash], &url[slash + 1..]),
            None => String::new(),
        }
    }
}

/// Full name and title for the regular speakers, who are often entered by initials
fn normalize_speaker_name(speaker: &str, ministry: Option<Ministry>) -> String {
    let speaker = speaker.trim();
    let full = match speaker.to_lowercase().as_str() {
        "vp" | "vern" | "vern peltz" | "pastor vern peltz" | "pastor vern" => "Pastor Vern Peltz",
        "dw" | "dave" | "dave warren" | "pastor dave" | "pastor warren" | "warren" => {
            "Pastor Dave Warren"
        }
        "ji" | "jim" | "jim isakson" | "isakson" => "Pastor Jim Isakson",
        "ik" | "igor" | "igor kondratyuk" | "pastor igor kondratyuk" | "pastor igor"
        | "pastor kondratyuk" | "kondratyuk" => "Pastor Igor Kondratyuk",
        "tk" | "tania" | "tania kondratyuk" => "Pastor Tania Kondratyuk",
        "mp" | "mary" | "mary peltz" | "pastor mary peltz" | "pastor mary" => {
            // C.O.R.E. does not use her title
            if ministry == Some(Ministry::CenterOfRelationshipExperience) {
                "Mary Peltz"
            } else {
                "Pastor Mary Peltz"
            }
        }
        _ => speaker,
    };
    full.to_string()
}
