use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geocode::{GeolocationResolver, Place};
use crate::kinematics::{subsatellite_point, GeoFix, LongitudeMode};
use crate::trajectory::{find, nearest, NearestPolicy, StateVector};

use super::clock::Clock;
use super::error::LocationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LocationOptions {
    #[serde(default)]
    pub nearest_policy: NearestPolicy,
    #[serde(default)]
    pub longitude: LongitudeMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub geolocation: Place,
}

impl Location {
    fn new(fix: GeoFix, geolocation: Place) -> Self {
        Location {
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude,
            geolocation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NowLocation {
    pub closest_epoch: String,
    /// `now - closest_epoch` in seconds.
    pub seconds_from_now: f64,
    pub location: Location,
}

pub struct LocationService {
    resolver: GeolocationResolver,
    options: LocationOptions,
}

impl LocationService {
    pub fn new(resolver: GeolocationResolver, options: LocationOptions) -> Self {
        Self { resolver, options }
    }

    pub async fn location_for_epoch(
        &self,
        trajectory: &[StateVector],
        epoch: &str,
    ) -> Result<Location, LocationError> {
        let sv = find(trajectory, epoch)?;
        self.locate(sv).await
    }

    pub async fn location_now(
        &self,
        trajectory: &[StateVector],
        clock: &dyn Clock,
    ) -> Result<NowLocation, LocationError> {
        let nearest = nearest(trajectory, clock.now(), self.options.nearest_policy)?;
        let location = self.locate(nearest.state_vector).await?;

        Ok(NowLocation {
            closest_epoch: nearest.state_vector.epoch.clone(),
            seconds_from_now: nearest.seconds_difference,
            location,
        })
    }

    async fn locate(&self, sv: &StateVector) -> Result<Location, LocationError> {
        let fix = subsatellite_point(sv, self.options.longitude)?;
        let place = self.resolver.resolve(fix.latitude, fix.longitude).await?;
        Ok(Location::new(fix, place))
    }
}
