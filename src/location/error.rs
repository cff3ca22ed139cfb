use thiserror::Error;

use crate::geocode::GeocodeError;
use crate::trajectory::TrajectoryError;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}
