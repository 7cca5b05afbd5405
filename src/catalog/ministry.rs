//! Ministries that present messages and series.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Ministry {
    #[serde(rename = "wol")]
    WordOfLife,

    #[serde(rename = "core")]
    CenterOfRelationshipExperience,

    #[serde(rename = "tbo")]
    TheBridgeOutreach,

    #[serde(rename = "ask-pastor")]
    AskThePastor,

    #[serde(rename = "faith-freedom")]
    FaithAndFreedom,

    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Ministry {
    /// Every known ministry
    pub const ALL: [Ministry; 5] = [
        Ministry::WordOfLife,
        Ministry::CenterOfRelationshipExperience,
        Ministry::TheBridgeOutreach,
        Ministry::AskThePastor,
        Ministry::FaithAndFreedom,
    ];

    /// Case-insensitive parser accepting the spreadsheet aliases
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "wol" | "word of life" => Ministry::WordOfLife,
            "core" | "c.o.r.e." => Ministry::CenterOfRelationshipExperience,
            "tbo" | "the bridge outreach" => Ministry::TheBridgeOutreach,
            "ask-pastor" | "ask pastor" | "ask the pastor" | "askthepastor" => {
                Ministry::AskThePastor
            }
            "faith-freedom" | "faithandfreedom" | "faith and freedom" | "faith & freedom" => {
                Ministry::FaithAndFreedom
            }
            _ => Ministry::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ministry::WordOfLife => "wol",
            Ministry::CenterOfRelationshipExperience => "core",
            Ministry::TheBridgeOutreach => "tbo",
            Ministry::AskThePastor => "ask-pastor",
            Ministry::FaithAndFreedom => "faith-freedom",
            Ministry::Unknown => "unknown",
        }
    }

    /// Human-readable name
    pub fn description(&self) -> &'static str {
        match self {
            Ministry::WordOfLife => "Word of Life",
            Ministry::CenterOfRelationshipExperience => "C.O.R.E.",
            Ministry::TheBridgeOutreach => "The Bridge Outreach",
            Ministry::AskThePastor => "Ask the Pastor",
            Ministry::FaithAndFreedom => "Faith & Freedom",
            Ministry::Unknown => "(Unknown Ministry)",
        }
    }

    /// Prefix of series identifiers generated for this ministry
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Ministry::WordOfLife => "WOLS-",
            Ministry::CenterOfRelationshipExperience => "CORE-",
            Ministry::AskThePastor => "ATP-",
            Ministry::FaithAndFreedom => "FandF-",
            Ministry::TheBridgeOutreach => "TBO-",
            Ministry::Unknown => "ID-",
        }
    }
}

impl From<String> for Ministry {
    fn from(s: String) -> Self {
        Ministry::parse(&s)
    }
}

impl FromStr for Ministry {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Ministry::parse(s))
    }
}

impl fmt::Display for Ministry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
