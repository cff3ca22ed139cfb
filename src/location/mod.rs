mod clock;
mod error;
mod service;

#[cfg(test)]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use error::LocationError;
pub use service::{Location, LocationOptions, LocationService, NowLocation};
