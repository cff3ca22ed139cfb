use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use super::error::TrajectoryError;

const EPOCH_FORMAT: &str = "%Y-%jT%H:%M:%S";

/// Parses an OEM epoch label (`YYYY-DDDThh:mm:ss.sssZ`) as UTC.
///
/// The fractional seconds and the trailing zone marker are discarded.
pub fn parse_epoch(label: &str) -> Result<DateTime<Utc>, TrajectoryError> {
    let trimmed = label.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let whole = match trimmed.split_once('.') {
        Some((whole, _fraction)) => whole,
        None => trimmed,
    };

    NaiveDateTime::parse_from_str(whole, EPOCH_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| TrajectoryError::malformed(label, "EPOCH", e.to_string()))
}

/// Hour and minute of the epoch's clock time.
pub fn clock_fields(label: &str) -> Result<(u32, u32), TrajectoryError> {
    let instant = parse_epoch(label)?;
    Ok((instant.hour(), instant.minute()))
}
