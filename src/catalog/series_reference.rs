//! A message's membership in a series.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reserved series name marking a stand-alone message
pub const STAND_ALONE_SERIES: &str = "SAM";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesReference {
    /// Name of the referenced series
    pub name: String,

    /// Position in the series, starting at 1. Zero means "in the series but not enumerated"
    #[serde(default, skip_serializing_if = "is_zero")]
    pub index: i32,
}

fn is_zero(index: &i32) -> bool {
    *index == 0
}

impl SeriesReference {
    pub fn new(name: impl Into<String>, index: i32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// Whether this is the reserved stand-alone marker (case-insensitive)
    pub fn is_stand_alone(&self) -> bool {
        self.name.eq_ignore_ascii_case(STAND_ALONE_SERIES)
    }

    /// Sort key placing positive indices in ascending order and all others after them.
    /// Equal keys keep their input order under a stable sort.
    pub fn order_key(&self) -> (bool, i32) {
        index_order_key(self.index)
    }

    /// Build references from parallel semicolon-separated lists of names and indices.
    ///
    /// Empty names are skipped. A name without a matching index reuses the last index given,
    /// and an index that is not a number becomes 0.
    pub fn parse_list(names: &str, indices: &str) -> Vec<SeriesReference> {
        let parsed: Vec<i32> = indices
            .split(';')
            .map(str::trim)
            .map(|text| match text.parse::<i32>() {
                Ok(index) => index,
                Err(_) => {
                    if !text.is_empty() {
                        warn!(index = text, "Ignoring illegal series index");
                    }
                    0
                }
            })
            .collect();
        let last = parsed.last().copied().unwrap_or(0);

        names
            .split(';')
            .map(str::trim)
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(position, name)| {
                let index = parsed.get(position).copied().unwrap_or(last);
                SeriesReference::new(name, index)
            })
            .collect()
    }
}

/// Ordering key for a raw series index: positive first (ascending), then the rest
pub fn index_order_key(index: i32) -> (bool, i32) {
    (index <= 0, index.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stand_alone() {
        assert!(SeriesReference::new("SAM", 0).is_stand_alone());
        assert!(SeriesReference::new("sam", 0).is_stand_alone());
        assert!(SeriesReference::new("Sam", 0).is_stand_alone());
        assert!(!SeriesReference::new("Samuel", 0).is_stand_alone());
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(SeriesReference::parse_list("", "").is_empty());
        assert!(SeriesReference::parse_list("", "1").is_empty());
        assert!(SeriesReference::parse_list("", "1; 2").is_empty());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            SeriesReference::parse_list("x", "1"),
            vec![SeriesReference::new("x", 1)]
        );
        assert_eq!(
            SeriesReference::parse_list("x", "1; 2"),
            vec![SeriesReference::new("x", 1)]
        );
        assert_eq!(
            SeriesReference::parse_list("x;y", "1; 2"),
            vec![SeriesReference::new("x", 1), SeriesReference::new("y", 2)]
        );
        assert_eq!(
            SeriesReference::parse_list("x;y;z", "1; 2"),
            vec![
                SeriesReference::new("x", 1),
                SeriesReference::new("y", 2),
                SeriesReference::new("z", 2),
            ]
        );
    }

    #[test]
    fn test_parse_list_bad_index() {
        assert_eq!(
            SeriesReference::parse_list("x; y", "one; 3"),
            vec![SeriesReference::new("x", 0), SeriesReference::new("y", 3)]
        );
    }

    #[test]
    fn test_order_key() {
        let mut indices = vec![0, 3, -1, 1, 0, 2];
        indices.sort_by_key(|i| index_order_key(*i));
        assert_eq!(indices, vec![1, 2, 3, 0, -1, 0]);
    }

    #[test]
    fn test_json_omits_zero_index() {
        let json = serde_json::to_string(&SeriesReference::new("x", 0)).unwrap();
        assert_eq!(json, r#"{"name":"x"}"#);
        let parsed: SeriesReference = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(parsed.index, 0);
    }
}
