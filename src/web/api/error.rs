use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::feed::FeedError;
use crate::geocode::GeocodeError;
use crate::location::LocationError;
use crate::trajectory::TrajectoryError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    NoData,
    InvalidArgument(String),
    MalformedRecord(String),
    GeolocationUnavailable(String),
    GeocoderTimeout(String),
    Geocoder(String),
    Feed(String),
}

impl From<TrajectoryError> for ApiError {
    fn from(e: TrajectoryError) -> Self {
        match &e {
            TrajectoryError::NotFound(epoch) => ApiError::NotFound(epoch.clone()),
            TrajectoryError::Empty => ApiError::NoData,
            TrajectoryError::MalformedRecord { .. } => ApiError::MalformedRecord(e.to_string()),
        }
    }
}

impl From<GeocodeError> for ApiError {
    fn from(e: GeocodeError) -> Self {
        match &e {
            GeocodeError::Unavailable { .. } => ApiError::GeolocationUnavailable(e.to_string()),
            GeocodeError::Timeout(_) => ApiError::GeocoderTimeout(e.to_string()),
            GeocodeError::Transport(_) => {
                log::warn!("Geocoder failure: {}", e);
                ApiError::Geocoder(e.to_string())
            }
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::Trajectory(e) => e.into(),
            LocationError::Geocode(e) => e.into(),
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(e: FeedError) -> Self {
        log::warn!("Feed failure: {}", e);
        ApiError::Feed(e.to_string())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::NoData | ApiError::GeolocationUnavailable(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::GeocoderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Geocoder(_) | ApiError::Feed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "epoch_not_found",
            ApiError::NoData => "no_data",
            ApiError::InvalidArgument(_) => "invalid_argument",
            ApiError::MalformedRecord(_) => "malformed_record",
            ApiError::GeolocationUnavailable(_) => "geolocation_unavailable",
            ApiError::GeocoderTimeout(_) => "geocoder_timeout",
            ApiError::Geocoder(_) => "geocoder_error",
            ApiError::Feed(_) => "feed_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::from(self))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable code clients can match on, e.g. `epoch_not_found`.
    pub error: String,
    /// The unknown epoch label, or the failure as text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(e: ApiError) -> Self {
        let error = e.code().to_string();
        let message = match e {
            ApiError::NoData => None,
            ApiError::NotFound(msg)
            | ApiError::InvalidArgument(msg)
            | ApiError::MalformedRecord(msg)
            | ApiError::GeolocationUnavailable(msg)
            | ApiError::GeocoderTimeout(msg)
            | ApiError::Geocoder(msg)
            | ApiError::Feed(msg) => Some(msg),
        };
        ErrorResponse { error, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn each_kind_has_a_distinct_status() {
        assert_eq!(status(TrajectoryError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(TrajectoryError::Empty), StatusCode::NOT_FOUND);
        assert_eq!(
            status(TrajectoryError::MalformedRecord {
                epoch: "x".into(),
                field: "X",
                reason: "is missing".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(GeocodeError::Unavailable {
                latitude: 0.0,
                longitude: 0.0
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(GeocodeError::Timeout(Duration::from_secs(1))),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status(GeocodeError::Transport("refused".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(ApiError::InvalidArgument("limit".into())),
            StatusCode::BAD_REQUEST
        );
    }

    async fn body(err: ApiError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn body_carries_code_and_detail() {
        let json = body(TrajectoryError::NotFound("2023-050T12:04:00.000Z".into()).into()).await;
        assert_eq!(json["error"], "epoch_not_found");
        assert_eq!(json["message"], "2023-050T12:04:00.000Z");

        let json = body(ApiError::NoData).await;
        assert_eq!(json["error"], "no_data");
        assert!(json.get("message").is_none());

        let json = body(GeocodeError::Timeout(Duration::from_secs(10)).into()).await;
        assert_eq!(json["error"], "geocoder_timeout");
        assert!(json["message"].is_string());
    }

    #[test]
    fn location_errors_unwrap_to_their_cause() {
        let err: ApiError = LocationError::Trajectory(TrajectoryError::NotFound("e".into())).into();
        assert!(matches!(err, ApiError::NotFound(epoch) if epoch == "e"));

        let err: ApiError = LocationError::Geocode(GeocodeError::Unavailable {
            latitude: 1.0,
            longitude: 2.0,
        })
        .into();
        assert!(matches!(err, ApiError::GeolocationUnavailable(_)));
    }
}
