//! JSON persistence for catalogs.
//!
//! Only raw state is written. Loading initializes every message and prepares the
//! catalog, so derived state is always rebuilt from the raw records.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use super::aggregate::Catalog;
use super::date_only::DateOnly;
use super::error::CatalogError;

/// Parse a catalog from JSON, then initialize and prepare it
pub fn from_json(text: &str) -> Result<Catalog, CatalogError> {
    let mut catalog: Catalog = serde_json::from_str(text)?;
    catalog.initialize_messages();
    catalog.prepare();
    Ok(catalog)
}

/// Pretty-printed JSON of the raw catalog
pub fn to_json(catalog: &Catalog) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Read and prepare a catalog file
pub async fn load(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::io(path, e))?;

    let catalog = from_json(&text)?;
    info!(
        path = %path.display(),
        series = catalog.series.len(),
        messages = catalog.messages.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Write the raw catalog, creating parent directories as needed
pub async fn save(path: impl AsRef<Path>, catalog: &Catalog) -> Result<(), CatalogError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CatalogError::io(parent, e))?;
    }

    let text = to_json(catalog)?;
    tokio::fs::write(path, text)
        .await
        .map_err(|e| CatalogError::io(path, e))?;

    debug!(path = %path.display(), "Saved catalog");
    Ok(())
}

/// Parse a `YYYY-MM-DD` date supplied outside of a catalog file
pub fn parse_date(value: &str) -> Result<DateOnly, CatalogError> {
    DateOnly::parse(value).map_err(|source| CatalogError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Read an optional tag: absent, `null`, and blank strings are all `None`.
/// Anything else goes through the tag's lenient parser, so unknown text becomes
/// the tag's `Unknown` value.
pub(crate) fn optional_tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text
        .filter(|s| !s.trim().is_empty())
        .map(T::from))
}

/// Like [`optional_tag`], with the tag's default standing in for a missing value
pub(crate) fn tag_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(optional_tag(deserializer)?.unwrap_or_default())
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
