//! Core trait definitions for dataset sources.
//!
//! The HTTP and file sources live in `worddrill-sources`; the in-memory
//! [`StaticSource`] is kept here for tests and embedding.

use async_trait::async_trait;

use crate::error::FetchError;

/// Something that can produce the raw text of a sheet export.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable source name (e.g. a URL or path).
    fn name(&self) -> &str;

    /// Fetch the raw export text. One attempt; callers decide on retry.
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// A source serving fixed text, or a fixed error.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    body: Result<String, FetchError>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Ok(body.into()),
        }
    }

    /// A source whose every fetch fails with `error`.
    pub fn failing(name: impl Into<String>, error: FetchError) -> Self {
        Self {
            name: name.into(),
            body: Err(error),
        }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        self.body.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_repeats_its_body() {
        let source = StaticSource::new("fixture", "a,b\n1,2");
        assert_eq!(source.name(), "fixture");
        assert_eq!(source.fetch().await.unwrap(), "a,b\n1,2");
        assert_eq!(source.fetch().await.unwrap(), "a,b\n1,2");
    }

    #[tokio::test]
    async fn failing_source_returns_error() {
        let source = StaticSource::failing("down", FetchError::Timeout(5));
        assert_eq!(source.fetch().await.unwrap_err(), FetchError::Timeout(5));
    }
}
