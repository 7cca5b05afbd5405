//! Categories of recorded messages.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum MessageType {
    /// A teaching or preached message
    #[serde(rename = "message")]
    Message,

    /// Prayer for someone or something
    #[serde(rename = "prayer")]
    Prayer,

    #[serde(rename = "song")]
    Song,

    /// Wedding, funeral, child dedication, etc.
    #[serde(rename = "special-event")]
    SpecialEvent,

    #[serde(rename = "testimony")]
    Testimony,

    /// Leadership or ministry training
    #[serde(rename = "training")]
    Training,

    /// Prophecy, encouragement, or other utterance
    #[serde(rename = "word")]
    Word,

    /// Individual prayer, normally at the end of a service
    #[serde(rename = "ministry-time")]
    MinistryTime,

    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl MessageType {
    /// Case-insensitive parser; spaces and dashes are interchangeable
    pub fn parse(s: &str) -> Self {
        let normalized = s
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");

        match normalized.as_str() {
            "message" => MessageType::Message,
            "prayer" => MessageType::Prayer,
            "song" => MessageType::Song,
            "special-event" => MessageType::SpecialEvent,
            "testimony" => MessageType::Testimony,
            "training" => MessageType::Training,
            "word" => MessageType::Word,
            "ministry-time" => MessageType::MinistryTime,
            _ => MessageType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Message => "message",
            MessageType::Prayer => "prayer",
            MessageType::Song => "song",
            MessageType::SpecialEvent => "special-event",
            MessageType::Testimony => "testimony",
            MessageType::Training => "training",
            MessageType::Word => "word",
            MessageType::MinistryTime => "ministry-time",
            MessageType::Unknown => "unknown",
        }
    }
}

impl From<String> for MessageType {
    fn from(s: String) -> Self {
        MessageType::parse(&s)
    }
}

impl FromStr for MessageType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MessageType::parse(s))
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(MessageType::parse("Message"), MessageType::Message);
        assert_eq!(MessageType::parse("PRAYER"), MessageType::Prayer);
        assert_eq!(MessageType::parse("special event"), MessageType::SpecialEvent);
        assert_eq!(MessageType::parse("Special  Event"), MessageType::SpecialEvent);
        assert_eq!(MessageType::parse("special-event"), MessageType::SpecialEvent);
        assert_eq!(MessageType::parse("ministry time"), MessageType::MinistryTime);
        assert_eq!(MessageType::parse(" word "), MessageType::Word);
        assert_eq!(MessageType::parse("sermonette"), MessageType::Unknown);
    }

    #[test]
    fn test_json() {
        assert_eq!(
            serde_json::to_string(&MessageType::MinistryTime).unwrap(),
            "\"ministry-time\""
        );
        let kind: MessageType = serde_json::from_str("\"Testimony\"").unwrap();
        assert_eq!(kind, MessageType::Testimony);
    }
}
