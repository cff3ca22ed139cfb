use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::feed::{DatasetStore, FeedLoader};
use crate::geocode::{GeolocationResolver, NominatimClient};
use crate::location::{LocationService, SystemClock};

use super::api::dataset as dataset_handlers;
use super::api::epochs as epoch_handlers;
use super::api::now as now_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Data set
        .route("/", get(dataset_handlers::entire_set))
        .route("/comment", get(dataset_handlers::get_comments))
        .route("/header", get(dataset_handlers::get_header))
        .route("/metadata", get(dataset_handlers::get_metadata))
        .route("/help", get(dataset_handlers::help))
        .route("/delete-data", delete(dataset_handlers::delete_data))
        .route("/post-data", post(dataset_handlers::post_data))
        // Epochs
        .route("/epochs", get(epoch_handlers::list_epochs))
        .route("/epochs/{epoch}", get(epoch_handlers::get_state_vector))
        .route("/epochs/{epoch}/speed", get(epoch_handlers::get_speed))
        .route("/epochs/{epoch}/location", get(epoch_handlers::get_location))
        .route("/now", get(now_handlers::now))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let loader = FeedLoader::new(config.feed.source(), config.feed.timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to build feed client: {}", e)))?;

    let geocoder = NominatimClient::new(
        &config.geocoder.base_url,
        &config.geocoder.user_agent,
        &config.geocoder.language,
        config.geocoder.attempt_timeout,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build geocoder client: {}", e)))?;

    let resolver = GeolocationResolver::new(Arc::new(geocoder))
        .with_initial_zoom(config.geocoder.initial_zoom)
        .with_timeouts(config.geocoder.attempt_timeout, config.geocoder.total_timeout);

    let store = DatasetStore::new();
    match loader.fetch().await {
        Ok(dataset) => {
            store.replace(dataset).await;
        }
        Err(e) => log::warn!("Initial load from {} failed, starting empty: {}", loader.source(), e),
    }

    let state = AppState {
        store,
        loader: Arc::new(loader),
        locator: Arc::new(LocationService::new(resolver, config.location)),
        clock: Arc::new(SystemClock),
    };

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
