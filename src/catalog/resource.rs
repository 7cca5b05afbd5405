//! Online resources (documents, videos, web pages) attached to series and messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

/// A link to reference material for a series or message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineResource {
    /// Location of the resource (required)
    pub url: String,

    /// Display name; derived from the URL when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Free-form metadata, e.g. `iframe` for Rumble embeds
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl OnlineResource {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Parse one resource definition.
    ///
    /// Accepted forms, with an optional JSON metadata object anywhere in the text:
    /// - raw URL: `http://host/path+to+file.doc` (name derived from the file name)
    /// - markdown: `[name](url)`
    /// - wiki: `name|url` or `url|name`
    ///
    /// Blank input yields a resource with an empty URL.
    pub fn parse(s: &str) -> Self {
        let (rest, metadata) = extract_metadata(s);
        let text = rest.trim();

        let mut resource = OnlineResource {
            metadata,
            ..Default::default()
        };

        if text.is_empty() {
            return resource;
        }

        if let Some((left, right)) = text.split_once('|') {
            let (left, right) = (left.trim(), right.trim());
            if left.contains("://") && !right.contains("://") {
                resource.url = left.to_string();
                resource.name = right.to_string();
            } else {
                resource.url = right.to_string();
                resource.name = left.to_string();
            }
        } else if let Some((name, url)) = parse_markdown(text) {
            resource.url = url.trim().to_string();
            resource.name = name.trim().to_string();
        } else {
            resource.url = text.to_string();
            resource.name = name_from_url(text);
        }

        resource
    }

    /// Parse a semicolon-separated list, dropping entries without a URL.
    /// `-` and `n/a` mean "nothing".
    pub fn parse_list(s: &str) -> Vec<OnlineResource> {
        let s = s.trim();
        if s == "-" || s.eq_ignore_ascii_case("n/a") {
            return Vec::new();
        }

        s.split(';')
            .map(OnlineResource::parse)
            .filter(|r| !r.url.is_empty())
            .collect()
    }

    /// Name to show for the link
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            name_from_url(&self.url)
        } else {
            self.name.clone()
        }
    }

    /// Last path segment of the URL
    pub fn file_name(&self) -> String {
        match Url::parse(&self.url) {
            Ok(parsed) => base_name(parsed.path()).to_string(),
            Err(_) => self.url.clone(),
        }
    }

    /// Large clickable image standing in for the resource
    pub fn thumbnail(&self) -> &'static str {
        if self.is_youtube() {
            "static/all.thumbnail_youtube_light.png"
        } else if self.url.contains("rumble") {
            "static/all.thumbnail_rumble_light.png"
        } else if self.url.contains("bitchute") {
            "static/all.thumbnail_bitchute.png"
        } else {
            "static/all.thumbnail_video.png"
        }
    }

    /// Small decorator icon for the link
    pub fn icon(&self) -> &'static str {
        let url = self.url.as_str();
        if url.ends_with(".pdf") {
            "static/all.icon_pdf.png"
        } else if url.ends_with(".mp3") {
            "static/all.icon_mp3.png"
        } else if url.ends_with(".wmv") {
            "static/all.icon_wmv.png"
        } else if url.ends_with(".mov") {
            "static/all.icon_mov.png"
        } else if url.ends_with(".doc") || url.ends_with(".docx") {
            "static/all.icon_word.png"
        } else if self.is_youtube() {
            "static/all.icon_youtube.png"
        } else {
            "static/all.icon_web.png"
        }
    }

    /// Short description of what clicking the link does
    pub fn classifier(&self) -> &'static str {
        if self.url.ends_with(".pdf") {
            "PDF file"
        } else if self.is_youtube() {
            "YouTube video"
        } else if self.url.contains("rumble") {
            "Rumble video"
        } else if self.url.contains("bitchute") {
            "BitChute video"
        } else {
            "Internet link"
        }
    }

    /// URL suitable for an iframe
    pub fn embedded_url(&self) -> String {
        if self.url.contains("//youtu.be/") {
            return self.url.replace("//youtu.be/", "//www.youtube.com/embed/");
        }
        if self.url.contains("//rumble.com/") {
            if let Some(iframe) = self.metadata.get("iframe") {
                return iframe.clone();
            }
        }
        self.url.clone()
    }

    fn is_youtube(&self) -> bool {
        self.url.contains("youtube") || self.url.contains("youtu.be")
    }
}

fn parse_markdown(s: &str) -> Option<(&str, &str)> {
    let inner = s.strip_prefix('[')?.strip_suffix(')')?;
    inner.split_once("](")
}

/// Remove a `{...}` JSON object from the text and return its fields as strings.
/// Text without a valid object comes back untouched with empty metadata.
fn extract_metadata(s: &str) -> (String, BTreeMap<String, String>) {
    let (Some(open), Some(close)) = (s.find('{'), s.rfind('}')) else {
        return (s.to_string(), BTreeMap::new());
    };
    if close < open {
        return (s.to_string(), BTreeMap::new());
    }

    let object: serde_json::Map<String, serde_json::Value> =
        match serde_json::from_str(&s[open..=close]) {
            Ok(object) => object,
            Err(_) => return (s.to_string(), BTreeMap::new()),
        };

    let metadata = object
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect();

    (format!("{}{}", &s[..open], &s[close + 1..]), metadata)
}

fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Human-readable name from the last URL segment, minus extension, decoded
pub(crate) fn name_from_url(url: &str) -> String {
    let mut name = base_name(url);
    if let Some(dot) = name.rfind('.') {
        name = &name[..dot];
    }

    let decoded = query_unescape(name).unwrap_or_else(|| name.to_string());
    decoded.replace('_', " ")
}

/// Query-string unescaping: `+` becomes a space and `%XX` is decoded.
/// Returns `None` when an escape is malformed.
fn query_unescape(s: &str) -> Option<String> {
    let well_formed = s.match_indices('%').all(|(i, _)| {
        s.get(i + 1..i + 3)
            .is_some_and(|hex| hex.bytes().all(|h| h.is_ascii_hexdigit()))
    });
    if !well_formed {
        return None;
    }

    // form_urlencoded splits pairs on `&` and `=`; keep them in the name
    let single = s.replace('&', "%26").replace('=', "%3D");
    let (decoded, _) = form_urlencoded::parse(single.as_bytes()).next()?;
    Some(decoded.into_owned())
}
