use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::kinematics::speed;
use crate::location::Location;
use crate::trajectory::{find, StateVector};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EpochsQuery {
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpeedResponse {
    pub epoch: String,
    pub speed_km_s: f64,
}

#[utoipa::path(
    get,
    path = "/epochs",
    params(
        ("offset" = Option<usize>, Query, description = "Number of epochs to skip"),
        ("limit" = Option<usize>, Query, description = "Maximum number of epochs returned")
    ),
    responses(
        (status = 200, description = "Epoch labels in feed order", body = Vec<String>),
        (status = 400, description = "Invalid offset or limit", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn list_epochs(
    State(state): State<AppState>,
    Query(query): Query<EpochsQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let offset = parse_count("offset", query.offset.as_deref())?.unwrap_or(0);
    let limit = parse_count("limit", query.limit.as_deref())?.unwrap_or(usize::MAX);

    let Some(dataset) = state.store.snapshot().await else {
        return Ok(Json(Vec::new()));
    };

    let epochs = dataset
        .trajectory()
        .iter()
        .skip(offset)
        .take(limit)
        .map(|sv| sv.epoch.clone())
        .collect();

    Ok(Json(epochs))
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}",
    params(
        ("epoch" = String, Path, description = "Epoch label, e.g. 2023-050T12:00:00.000Z")
    ),
    responses(
        (status = 200, description = "State vector", body = StateVector),
        (status = 404, description = "Unknown epoch or no data", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn get_state_vector(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> ApiResult<Response> {
    let dataset = state.dataset().await?;
    let sv = find(dataset.trajectory(), &epoch)?;
    Ok(Json(sv).into_response())
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}/speed",
    params(
        ("epoch" = String, Path, description = "Epoch label")
    ),
    responses(
        (status = 200, description = "Instantaneous speed", body = SpeedResponse),
        (status = 404, description = "Unknown epoch or no data", body = ErrorResponse),
        (status = 500, description = "Malformed record", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn get_speed(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> ApiResult<Json<SpeedResponse>> {
    let dataset = state.dataset().await?;
    let sv = find(dataset.trajectory(), &epoch)?;

    Ok(Json(SpeedResponse {
        speed_km_s: speed(sv)?,
        epoch,
    }))
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}/location",
    params(
        ("epoch" = String, Path, description = "Epoch label")
    ),
    responses(
        (status = 200, description = "Sub-satellite location", body = Location),
        (status = 404, description = "Unknown epoch, no data or nothing to geocode", body = ErrorResponse),
        (status = 502, description = "Geocoder failure", body = ErrorResponse),
        (status = 504, description = "Geocoder timeout", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> ApiResult<Json<Location>> {
    let dataset = state.dataset().await?;
    let location = state
        .locator
        .location_for_epoch(dataset.trajectory(), &epoch)
        .await?;
    Ok(Json(location))
}

fn parse_count(name: &str, raw: Option<&str>) -> ApiResult<Option<usize>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ApiError::InvalidArgument(format!(
                "invalid {} parameter {:?}; must be zero or a positive integer",
                name, value
            ))
        }),
    }
}
