use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::epoch::parse_epoch;
use super::error::TrajectoryError;
use super::types::StateVector;

/// How `nearest` picks among the records of a trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearestPolicy {
    /// Smallest `|reference - epoch|`, ties broken by the earliest epoch.
    #[default]
    Closest,
    /// Smallest signed `reference - epoch`. Always favours the most-future
    /// record; kept for compatibility with the legacy `/now` output.
    LatestSigned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearestEpoch<'a> {
    pub state_vector: &'a StateVector,
    /// `reference - epoch` in seconds.
    pub seconds_difference: f64,
}

/// First record whose epoch label equals `epoch`.
pub fn find<'a>(
    trajectory: &'a [StateVector],
    epoch: &str,
) -> Result<&'a StateVector, TrajectoryError> {
    trajectory
        .iter()
        .find(|sv| sv.epoch == epoch)
        .ok_or_else(|| TrajectoryError::NotFound(epoch.to_string()))
}

pub fn nearest(
    trajectory: &[StateVector],
    reference: DateTime<Utc>,
    policy: NearestPolicy,
) -> Result<NearestEpoch<'_>, TrajectoryError> {
    let mut best: Option<(NearestEpoch<'_>, DateTime<Utc>)> = None;

    for sv in trajectory {
        let instant = parse_epoch(&sv.epoch)?;
        let difference = seconds_between(reference, instant);

        let better = match &best {
            None => true,
            Some((current, current_instant)) => match policy {
                NearestPolicy::Closest => {
                    let (candidate, incumbent) =
                        (difference.abs(), current.seconds_difference.abs());
                    candidate < incumbent
                        || (candidate == incumbent && instant < *current_instant)
                }
                NearestPolicy::LatestSigned => difference < current.seconds_difference,
            },
        };

        if better {
            best = Some((
                NearestEpoch {
                    state_vector: sv,
                    seconds_difference: difference,
                },
                instant,
            ));
        }
    }

    best.map(|(nearest, _)| nearest).ok_or(TrajectoryError::Empty)
}

fn seconds_between(reference: DateTime<Utc>, instant: DateTime<Utc>) -> f64 {
    (reference - instant).num_milliseconds() as f64 / 1000.0
}
