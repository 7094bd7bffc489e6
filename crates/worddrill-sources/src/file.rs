//! Local CSV file source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use worddrill_core::error::FetchError;
use worddrill_core::traits::DatasetSource;

/// Reads a sheet export saved to disk.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(path = %self.path.display(), "reading dataset file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io {
                path: self.name.clone(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nouns.csv");
        std::fs::write(&path, "Sr No,Noun\n1,dog\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), "Sr No,Noun\n1,dog\n");
        assert!(source.name().ends_with("nouns.csv"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.csv"));

        match source.fetch().await {
            Err(FetchError::Io { path, .. }) => assert!(path.ends_with("absent.csv")),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
