use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use super::{GeocodeError, Place, ReverseGeocoder};

pub const DEFAULT_ZOOM: u8 = 15;
pub const MAX_ZOOM: u8 = 18;

const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Reverse geocodes a point, coarsening the zoom level until the geocoder
/// has something to say about it.
pub struct GeolocationResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    initial_zoom: u8,
    attempt_timeout: Duration,
    total_timeout: Duration,
}

impl GeolocationResolver {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            geocoder,
            initial_zoom: DEFAULT_ZOOM,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            total_timeout: DEFAULT_TOTAL_TIMEOUT,
        }
    }

    pub fn with_initial_zoom(mut self, zoom: u8) -> Self {
        if zoom > MAX_ZOOM {
            log::warn!("initial zoom {} is above {}, clamping", zoom, MAX_ZOOM);
        }
        self.initial_zoom = zoom.min(MAX_ZOOM);
        self
    }

    pub fn with_timeouts(mut self, attempt: Duration, total: Duration) -> Self {
        self.attempt_timeout = attempt;
        self.total_timeout = total;
        self
    }

    /// Levels tried, finest first: `initial_zoom, …, 1, 0`.
    pub fn zoom_levels(&self) -> impl Iterator<Item = u8> {
        (0..=self.initial_zoom).rev()
    }

    pub async fn resolve(&self, latitude: f64, longitude: f64) -> Result<Place, GeocodeError> {
        match timeout(self.total_timeout, self.descend(latitude, longitude)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "geolocation of ({}, {}) exceeded {:?}",
                    latitude,
                    longitude,
                    self.total_timeout
                );
                Err(GeocodeError::Timeout(self.total_timeout))
            }
        }
    }

    async fn descend(&self, latitude: f64, longitude: f64) -> Result<Place, GeocodeError> {
        for zoom in self.zoom_levels() {
            log::debug!("reverse geocoding ({}, {}) at zoom {}", latitude, longitude, zoom);

            let attempt = self.geocoder.reverse(latitude, longitude, zoom);
            let answer = timeout(self.attempt_timeout, attempt)
                .await
                .map_err(|_| GeocodeError::Timeout(self.attempt_timeout))??;

            if let Some(place) = answer {
                return Ok(place);
            }
        }

        Err(GeocodeError::Unavailable {
            latitude,
            longitude,
        })
    }
}
