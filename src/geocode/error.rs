use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no geolocation found for ({latitude}, {longitude}) at any zoom level")]
    Unavailable { latitude: f64, longitude: f64 },
    #[error("geocoder timed out after {0:?}")]
    Timeout(Duration),
    #[error("geocoder request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Transport(err.to_string())
    }
}
