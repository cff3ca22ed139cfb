use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::error::FeedError;
use super::oem::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => write!(f, "{}", url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and parses the trajectory feed.
pub struct FeedLoader {
    client: reqwest::Client,
    source: FeedSource,
}

impl FeedLoader {
    pub fn new(source: FeedSource, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, source })
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    pub async fn fetch(&self) -> Result<Dataset, FeedError> {
        let xml = match &self.source {
            FeedSource::Url(url) => {
                self.client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
            FeedSource::File(path) => tokio::fs::read_to_string(path).await?,
        };

        let dataset = Dataset::from_xml(&xml)?;

        for epoch in dataset.duplicate_epochs() {
            log::warn!("Duplicate epoch {} in feed, keeping the first record", epoch);
        }
        log::info!(
            "Loaded {} state vectors from {}",
            dataset.trajectory().len(),
            self.source
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::oem::tests::SAMPLE_OEM;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_local_file() {
        let path = temp_file("iss_oem_sample.xml", SAMPLE_OEM);
        let loader =
            FeedLoader::new(FeedSource::File(path.clone()), Duration::from_secs(5)).unwrap();

        let dataset = loader.fetch().await.unwrap();
        assert_eq!(dataset.trajectory().len(), 3);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("iss_tracker_does_not_exist.xml");
        let loader = FeedLoader::new(FeedSource::File(path), Duration::from_secs(5)).unwrap();
        assert!(matches!(loader.fetch().await, Err(FeedError::Io(_))));
    }

    #[tokio::test]
    async fn garbage_file_is_parse_error() {
        let path = temp_file("iss_oem_garbage.xml", "<ndm><oem></oem></ndm>");
        let loader =
            FeedLoader::new(FeedSource::File(path.clone()), Duration::from_secs(5)).unwrap();
        assert!(matches!(loader.fetch().await, Err(FeedError::Xml(_))));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn source_display() {
        let url = FeedSource::Url("https://example.org/ISS.xml".into());
        assert_eq!(url.to_string(), "https://example.org/ISS.xml");
        let file = FeedSource::File(PathBuf::from("/tmp/ISS.xml"));
        assert_eq!(file.to_string(), "/tmp/ISS.xml");
    }
}
