//! online - catalog of Word of Life teaching series and messages
//!
//! The catalog is read from JSON, prepared (messages attached to their series,
//! stand-alone messages turned into single-message series), validated, and
//! projected onto published views for the podcast feed and web pages.
//!
//! # Modules
//!
//! - `catalog`: Data model (messages, series, the root `Catalog`) and JSON codec
//! - `validator`: Catalog checks producing an indented report
//! - `adapters`: External lookups (audio file sizes over HTTP)
//! - `util`: Stable hashing and the indenting report
//! - `config`: Layered configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check the catalog
//! online validate --input online.cache.json
//!
//! # List public series, newest first
//! online series --view public --sort newest
//! ```

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod util;
pub mod validator;

// Re-export main types at crate root for convenience
pub use adapters::{CachingSizeResolver, HttpSizeResolver, SizeResolver};
pub use catalog::{
    Catalog, CatalogError, CatalogMessage, CatalogSeries, DateOnly, MessageType, Ministry,
    OnlineResource, SeriesReference, View,
};
pub use util::{compute_hash, IndentingReport, ReportSink};
pub use validator::{validate, ValidationOptions};
