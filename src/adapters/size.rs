//! Size resolvers: HTTP HEAD lookups and an in-memory cache in front of them.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use tracing::debug;

use super::SizeResolver;

/// Resolves sizes with a HEAD request and the `Content-Length` header
pub struct HttpSizeResolver {
    client: reqwest::Client,
}

impl HttpSizeResolver {
    /// Create a resolver whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SizeResolver for HttpSizeResolver {
    fn name(&self) -> &str {
        "http"
    }

    async fn content_length(&self, url: &str) -> Result<u64> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .with_context(|| format!("HEAD request failed for {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Unsuccessful status getting size of {}: {}", url, status);
        }

        let header = response
            .headers()
            .get(CONTENT_LENGTH)
            .with_context(|| format!("No Content-Length for {}", url))?;
        let text = header
            .to_str()
            .with_context(|| format!("Unreadable Content-Length for {}", url))?;

        text.trim()
            .parse::<u64>()
            .with_context(|| format!("Could not parse the file size '{}'", text))
    }
}

/// Remembers successful lookups of an inner resolver. Failures are not cached.
pub struct CachingSizeResolver<R> {
    inner: R,
    sizes: Mutex<HashMap<String, u64>>,
}

impl<R: SizeResolver> CachingSizeResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            sizes: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached sizes
    pub fn len(&self) -> usize {
        self.sizes.lock().map(|sizes| sizes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, url: &str) -> Option<u64> {
        self.sizes.lock().ok()?.get(url).copied()
    }
}

#[async_trait]
impl<R: SizeResolver> SizeResolver for CachingSizeResolver<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn content_length(&self, url: &str) -> Result<u64> {
        if let Some(size) = self.cached(url) {
            debug!(url, size, "Size cache hit");
            return Ok(size);
        }

        let size = self.inner.content_length(url).await?;
        if let Ok(mut sizes) = self.sizes.lock() {
            sizes.insert(url.to_string(), size);
        }
        Ok(size)
    }
}
