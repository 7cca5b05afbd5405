//! Visibility of series and messages.
//!
//! Views form an accessibility order, `public ⊂ partner ⊂ private`: a viewer
//! authorized for a level sees everything at or below it. `raw` content is
//! unedited and is treated as private, while the `raw` *view* sees everything.
//! `unknown` marks text that could not be parsed and is never published.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum View {
    /// Undetermined or unedited
    #[default]
    #[serde(rename = "raw")]
    Raw,

    /// Available to anyone
    #[serde(rename = "public")]
    Public,

    /// Available to covenant partners
    #[serde(rename = "partner")]
    Partner,

    /// Not to be displayed online to anyone
    #[serde(rename = "private")]
    Private,

    /// Unparseable visibility
    #[serde(rename = "unknown")]
    Unknown,
}

impl View {
    /// The views content is published under
    pub const PUBLISHED: [View; 3] = [View::Public, View::Partner, View::Private];

    /// Lenient parser; anything unrecognized becomes `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "public" => View::Public,
            "partner" | "partners" | "protected" => View::Partner,
            "private" => View::Private,
            "raw" => View::Raw,
            _ => View::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Raw => "raw",
            View::Public => "public",
            View::Partner => "partner",
            View::Private => "private",
            View::Unknown => "unknown",
        }
    }

    /// Position in the accessibility order
    fn level(self) -> u8 {
        match self {
            View::Public => 1,
            View::Partner => 2,
            View::Private | View::Raw => 3,
            View::Unknown => 4,
        }
    }

    /// Whether content with this visibility is accessible to a viewer of `view`
    pub fn is_visible_in(self, view: View) -> bool {
        match view {
            View::Raw => true,
            View::Unknown => false,
            _ => self.level() <= view.level(),
        }
    }

    /// Raw and private content never needs publishing metadata
    pub fn is_unpublished(self) -> bool {
        matches!(self, View::Raw | View::Private)
    }
}

impl From<String> for View {
    fn from(s: String) -> Self {
        View::parse(&s)
    }
}

impl FromStr for View {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(View::parse(s))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
