use utoipa::OpenApi;

use super::api::dataset::ReloadResponse;
use super::api::epochs::{EpochsQuery, SpeedResponse};
use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::dataset::entire_set,
        super::api::dataset::get_comments,
        super::api::dataset::get_header,
        super::api::dataset::get_metadata,
        super::api::dataset::help,
        super::api::dataset::delete_data,
        super::api::dataset::post_data,
        super::api::epochs::list_epochs,
        super::api::epochs::get_state_vector,
        super::api::epochs::get_speed,
        super::api::epochs::get_location,
        super::api::now::now,
    ),
    components(
        schemas(
            ErrorResponse,
            EpochsQuery,
            SpeedResponse,
            ReloadResponse,
            crate::trajectory::StateVector,
            crate::location::Location,
            crate::location::NowLocation,
            crate::geocode::Place,
        )
    ),
    info(
        title = "ISS Tracker API",
        description = "Epochs, speed and ground location of the International Space Station",
        version = "0.1.0"
    ),
    tags(
        (name = "dataset", description = "Trajectory data set management"),
        (name = "epochs", description = "Per-epoch queries"),
        (name = "location", description = "Current position")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/",
            "/epochs",
            "/epochs/{epoch}",
            "/epochs/{epoch}/speed",
            "/epochs/{epoch}/location",
            "/now",
            "/post-data",
            "/delete-data",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
