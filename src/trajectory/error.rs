use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrajectoryError {
    #[error("epoch not found: {0}")]
    NotFound(String),
    #[error("trajectory is empty")]
    Empty,
    #[error("malformed record {epoch}: field {field} {reason}")]
    MalformedRecord {
        epoch: String,
        field: &'static str,
        reason: String,
    },
}

impl TrajectoryError {
    pub(crate) fn malformed(epoch: &str, field: &'static str, reason: impl Into<String>) -> Self {
        TrajectoryError::MalformedRecord {
            epoch: epoch.to_string(),
            field,
            reason: reason.into(),
        }
    }
}
