mod error;
mod nominatim;
mod resolver;
mod types;

use async_trait::async_trait;

pub use error::GeocodeError;
pub use nominatim::NominatimClient;
pub use resolver::{GeolocationResolver, DEFAULT_ZOOM, MAX_ZOOM};
pub use types::Place;

#[cfg(test)]
pub(crate) use resolver::tests::ScriptedGeocoder;

/// External reverse-geocoding capability.
///
/// `Ok(None)` means the service answered but has nothing at this zoom level.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
        zoom: u8,
    ) -> Result<Option<Place>, GeocodeError>;
}
