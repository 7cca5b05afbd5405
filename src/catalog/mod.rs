//! Catalog model: value types, messages, series, and the root aggregate.

pub mod aggregate;
pub mod codec;
pub mod date_only;
pub mod error;
pub mod message;
pub mod message_type;
pub mod ministry;
pub mod resource;
pub mod series;
pub mod series_reference;
pub mod view;

pub use aggregate::Catalog;
pub use date_only::DateOnly;
pub use error::CatalogError;
pub use message::{CatalogMessage, PRODUCTION_STATES};
pub use message_type::MessageType;
pub use ministry::Ministry;
pub use resource::OnlineResource;
pub use series::{
    filter_series_by_ministry, sort_series_by_name, sort_series_newest_to_oldest,
    sort_series_oldest_to_newest, CatalogSeries, SeriesView,
};
pub use series_reference::{SeriesReference, STAND_ALONE_SERIES};
pub use view::View;
