mod epoch;
mod error;
mod index;
mod types;

pub use epoch::{clock_fields, parse_epoch};
pub use error::TrajectoryError;
pub use index::{find, nearest, NearestEpoch, NearestPolicy};
pub use types::{Quantity, StateVector};
