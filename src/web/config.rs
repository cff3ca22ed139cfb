use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::feed::FeedSource;
use crate::geocode::DEFAULT_ZOOM;
use crate::location::LocationOptions;

pub const ISS_OEM_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub location: LocationOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Local OEM file, takes precedence over `url`.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_feed_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl FeedConfig {
    pub fn source(&self) -> FeedSource {
        match &self.file {
            Some(path) => FeedSource::File(path.clone()),
            None => FeedSource::Url(self.url.clone()),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            file: None,
            timeout: default_feed_timeout(),
        }
    }
}

fn default_feed_url() -> String {
    ISS_OEM_URL.to_string()
}

fn default_feed_timeout() -> Duration {
    Duration::from_secs(30)
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_zoom")]
    pub initial_zoom: u8,
    #[serde(default = "default_attempt_timeout", deserialize_with = "deserialize_duration")]
    pub attempt_timeout: Duration,
    #[serde(default = "default_total_timeout", deserialize_with = "deserialize_duration")]
    pub total_timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            language: default_language(),
            initial_zoom: default_zoom(),
            attempt_timeout: default_attempt_timeout(),
            total_timeout: default_total_timeout(),
        }
    }
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "iss_tracker".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

fn default_attempt_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_total_timeout() -> Duration {
    Duration::from_secs(60)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::LongitudeMode;
    use crate::trajectory::NearestPolicy;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:5000");
        assert_eq!(config.feed.source(), FeedSource::Url(ISS_OEM_URL.into()));
        assert_eq!(config.geocoder.initial_zoom, 15);
        assert_eq!(config.geocoder.attempt_timeout, Duration::from_secs(10));
        assert_eq!(config.location, LocationOptions::default());
        assert_eq!(config.location.nearest_policy, NearestPolicy::Closest);
        assert_eq!(config.location.longitude, LongitudeMode::Raw);
    }

    #[test]
    fn full_document() {
        let yaml = r#"
web:
  bind: "127.0.0.1:8080"
feed:
  file: /data/ISS.OEM_J2K_EPH.xml
  timeout: 5s
geocoder:
  base_url: http://localhost:8088
  user_agent: test-agent
  language: de
  initial_zoom: 12
  attempt_timeout: 500ms
  total_timeout: 1m
location:
  nearest_policy: latest_signed
  longitude: normalized
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:8080");
        assert_eq!(
            config.feed.source(),
            FeedSource::File(PathBuf::from("/data/ISS.OEM_J2K_EPH.xml"))
        );
        assert_eq!(config.feed.timeout, Duration::from_secs(5));
        assert_eq!(config.geocoder.language, "de");
        assert_eq!(config.geocoder.initial_zoom, 12);
        assert_eq!(config.geocoder.attempt_timeout, Duration::from_millis(500));
        assert_eq!(config.geocoder.total_timeout, Duration::from_secs(60));
        assert_eq!(config.location.nearest_policy, NearestPolicy::LatestSigned);
        assert_eq!(config.location.longitude, LongitudeMode::Normalized);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_yaml("geocoder:\n  attempt_timeout: soon\n").is_err());
        assert!(Config::from_yaml("location:\n  longitude: sideways\n").is_err());
        assert!(Config::from_yaml("geocoder:\n  initial_zoom: -1\n").is_err());
    }
}
