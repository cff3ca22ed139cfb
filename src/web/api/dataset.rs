use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::feed::{Dataset, Header, Metadata};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    pub source: String,
    pub state_vectors: usize,
}

const HELP: &str = "\
Routes over the ISS trajectory feed:
    GET    /                          the entire data set
    GET    /epochs?offset=0&limit=10  epoch labels; offset skips, limit caps (both optional)
    GET    /epochs/<epoch>            state vector of one epoch
    GET    /epochs/<epoch>/speed      instantaneous speed of one epoch (km/s)
    GET    /epochs/<epoch>/location   latitude, longitude, altitude and geolocation of one epoch
    GET    /now                       location at the epoch nearest to the current time
    GET    /comment                   comments of the data segment
    GET    /header                    message header
    GET    /metadata                  segment metadata
    GET    /help                      this text
    DELETE /delete-data               drop the data set
    POST   /post-data                 fetch the data set again
";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Entire data set", body = Dataset),
        (status = 404, description = "No data", body = ErrorResponse)
    ),
    tag = "dataset"
)]
pub async fn entire_set(State(state): State<AppState>) -> ApiResult<Response> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset.as_ref()).into_response())
}

#[utoipa::path(
    get,
    path = "/comment",
    responses(
        (status = 200, description = "Data segment comments", body = Vec<String>)
    ),
    tag = "dataset"
)]
pub async fn get_comments(State(state): State<AppState>) -> Json<Vec<String>> {
    let comments = match state.store.snapshot().await {
        Some(dataset) => dataset.comments().to_vec(),
        None => Vec::new(),
    };
    Json(comments)
}

#[utoipa::path(
    get,
    path = "/header",
    responses(
        (status = 200, description = "Message header", body = Header),
        (status = 404, description = "No data", body = ErrorResponse)
    ),
    tag = "dataset"
)]
pub async fn get_header(State(state): State<AppState>) -> ApiResult<Json<Header>> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset.header().clone()))
}

#[utoipa::path(
    get,
    path = "/metadata",
    responses(
        (status = 200, description = "Segment metadata", body = Metadata),
        (status = 404, description = "No data", body = ErrorResponse)
    ),
    tag = "dataset"
)]
pub async fn get_metadata(State(state): State<AppState>) -> ApiResult<Json<Metadata>> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset.metadata().clone()))
}

#[utoipa::path(
    get,
    path = "/help",
    responses(
        (status = 200, description = "Route summary", body = String, content_type = "text/plain")
    ),
    tag = "dataset"
)]
pub async fn help() -> &'static str {
    HELP
}

#[utoipa::path(
    delete,
    path = "/delete-data",
    responses(
        (status = 204, description = "Data set dropped")
    ),
    tag = "dataset"
)]
pub async fn delete_data(State(state): State<AppState>) -> StatusCode {
    if state.store.clear().await {
        log::info!("Data set deleted");
    }
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/post-data",
    responses(
        (status = 200, description = "Data set reloaded", body = ReloadResponse),
        (status = 502, description = "Feed could not be fetched or parsed", body = ErrorResponse)
    ),
    tag = "dataset"
)]
pub async fn post_data(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    let dataset = state.loader.fetch().await?;
    let dataset = state.store.replace(dataset).await;

    Ok(Json(ReloadResponse {
        source: state.loader.source().to_string(),
        state_vectors: dataset.trajectory().len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::SAMPLE_OEM;
    use crate::geocode::ScriptedGeocoder;
    use crate::web::api::error::ApiError;
    use crate::web::state::tests::test_state;
    use std::path::PathBuf;
    use std::sync::Arc;

    async fn state(feed_file: PathBuf) -> AppState {
        test_state(Arc::new(ScriptedGeocoder::found_at(Some(15))), feed_file).await
    }

    #[tokio::test]
    async fn exposes_header_metadata_and_comments() {
        let state = state(PathBuf::from("/nonexistent")).await;

        let Json(header) = get_header(State(state.clone())).await.unwrap();
        assert_eq!(header.originator.as_deref(), Some("JSC"));

        assert_eq!(header.comments.len(), 1);

        let Json(metadata) = get_metadata(State(state.clone())).await.unwrap();
        assert_eq!(metadata.object_id.as_deref(), Some("1998-067-A"));
        assert_eq!(metadata.useable_start_time.as_deref(), Some("2023-050T12:00:00.000Z"));

        let Json(comments) = get_comments(State(state.clone())).await;
        assert_eq!(comments.len(), 2);

        let response = entire_set(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ndm"]["oem"]["header"]["ORIGINATOR"], "JSC");
        assert_eq!(
            json["ndm"]["oem"]["body"]["segment"]["metadata"]["USEABLE_STOP_TIME"],
            "2023-050T12:08:00.000Z"
        );
    }

    #[tokio::test]
    async fn delete_then_reload() {
        let path = std::env::temp_dir().join(format!("{}_post_data.xml", std::process::id()));
        std::fs::write(&path, SAMPLE_OEM).unwrap();
        let state = state(path.clone()).await;

        assert_eq!(delete_data(State(state.clone())).await, StatusCode::NO_CONTENT);
        assert!(matches!(get_header(State(state.clone())).await, Err(ApiError::NoData)));
        assert!(get_comments(State(state.clone())).await.0.is_empty());
        assert_eq!(delete_data(State(state.clone())).await, StatusCode::NO_CONTENT);

        let Json(reloaded) = post_data(State(state.clone())).await.unwrap();
        assert_eq!(reloaded.state_vectors, 3);
        assert_eq!(reloaded.source, path.display().to_string());
        assert!(get_header(State(state)).await.is_ok());

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn failed_reload_keeps_current_data() {
        let state = state(PathBuf::from("/nonexistent/ISS.xml")).await;

        assert!(matches!(post_data(State(state.clone())).await, Err(ApiError::Feed(_))));
        assert!(state.store.snapshot().await.is_some());
    }

    #[tokio::test]
    async fn help_lists_every_route() {
        let text = help().await;
        for route in [
            "/epochs",
            "/now",
            "/comment",
            "/header",
            "/metadata",
            "/delete-data",
            "/post-data",
        ] {
            assert!(text.contains(route), "missing {route}");
        }
    }
}
