use serde::Deserialize;

use crate::trajectory::{clock_fields, StateVector, TrajectoryError};

pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

const DEGREES_PER_HOUR: f64 = 360.0 / 24.0;
const LONGITUDE_OFFSET_DEG: f64 = 24.0;

/// Whether the sub-satellite longitude is wrapped into [-180, 180).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeMode {
    /// Emit the value as computed, which can leave the ±180 range.
    #[default]
    Raw,
    Normalized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    /// km above the mean spherical Earth.
    pub altitude: f64,
}

/// Magnitude of the velocity vector in km/s.
pub fn speed(sv: &StateVector) -> Result<f64, TrajectoryError> {
    let [vx, vy, vz] = sv.velocity()?;
    Ok((vx * vx + vy * vy + vz * vz).sqrt())
}

/// Point on a spherical Earth directly below the spacecraft.
///
/// The position is read as if it were Earth-fixed and the Earth's rotation is
/// approximated from the epoch's clock time alone, so this is only good for
/// display purposes.
pub fn subsatellite_point(
    sv: &StateVector,
    mode: LongitudeMode,
) -> Result<GeoFix, TrajectoryError> {
    let [x, y, z] = sv.position()?;
    let (hours, minutes) = clock_fields(&sv.epoch)?;

    let latitude = z.atan2((x * x + y * y).sqrt()).to_degrees();
    let rotation = ((hours as f64 - 12.0) + minutes as f64 / 60.0) * DEGREES_PER_HOUR;
    let longitude = y.atan2(x).to_degrees() - rotation + LONGITUDE_OFFSET_DEG;
    let altitude = (x * x + y * y + z * z).sqrt() - MEAN_EARTH_RADIUS_KM;

    let longitude = match mode {
        LongitudeMode::Raw => longitude,
        LongitudeMode::Normalized => normalize_longitude(longitude),
    };

    Ok(GeoFix {
        latitude,
        longitude,
        altitude,
    })
}

pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}
