//! Adapter interfaces for external systems.
//!
//! The catalog core performs no I/O of its own; the one network lookup it
//! needs (the size of an audio file for podcast enclosures) goes through the
//! [`SizeResolver`] capability defined here.

pub mod size;

use anyhow::Result;
use async_trait::async_trait;

pub use size::{CachingSizeResolver, HttpSizeResolver};

/// Looks up the size in bytes of a remote file
#[async_trait]
pub trait SizeResolver: Send + Sync {
    /// Human-readable resolver name
    fn name(&self) -> &str;

    /// Content length of the resource at `url`
    async fn content_length(&self, url: &str) -> Result<u64>;
}
