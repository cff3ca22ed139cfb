use axum::{extract::State, Json};

use crate::location::NowLocation;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/now",
    responses(
        (status = 200, description = "Location at the epoch nearest to now", body = NowLocation),
        (status = 404, description = "No data or nothing to geocode", body = ErrorResponse),
        (status = 502, description = "Geocoder failure", body = ErrorResponse),
        (status = 504, description = "Geocoder timeout", body = ErrorResponse)
    ),
    tag = "location"
)]
pub async fn now(State(state): State<AppState>) -> ApiResult<Json<NowLocation>> {
    let dataset = state.dataset().await?;
    let now = state
        .locator
        .location_now(dataset.trajectory(), state.clock.as_ref())
        .await?;
    Ok(Json(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::ScriptedGeocoder;
    use crate::web::api::error::ApiError;
    use crate::web::state::tests::test_state;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[tokio::test]
    async fn reports_closest_epoch_and_offset() {
        let geocoder = Arc::new(ScriptedGeocoder::found_at(Some(5)));
        let state = test_state(geocoder.clone(), PathBuf::from("/nonexistent")).await;

        let Json(now) = now(State(state)).await.unwrap();

        assert_eq!(now.closest_epoch, "2023-050T12:04:00.000Z");
        assert_eq!(now.seconds_from_now, 60.0);
        assert_eq!(now.location.geolocation.0["zoom"], 5);
        assert_eq!(geocoder.calls(), (5..=15).rev().collect::<Vec<u8>>());
    }

    #[tokio::test]
    async fn ocean_pass_is_unavailable() {
        let geocoder = Arc::new(ScriptedGeocoder::found_at(None));
        let state = test_state(geocoder, PathBuf::from("/nonexistent")).await;

        let result = now(State(state)).await;
        assert!(matches!(result, Err(ApiError::GeolocationUnavailable(_))));
    }

    #[tokio::test]
    async fn no_data_after_delete() {
        let geocoder = Arc::new(ScriptedGeocoder::found_at(Some(15)));
        let state = test_state(geocoder, PathBuf::from("/nonexistent")).await;
        state.store.clear().await;

        assert!(matches!(now(State(state)).await, Err(ApiError::NoData)));
    }
}
