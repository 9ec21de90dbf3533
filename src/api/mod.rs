
pub mod record_types;
pub mod servers;
pub mod zones;

use axum::{Extension, Router, routing::{any, get}};
use crate::{SharedState, error::AppError};

pub fn create_router(state: SharedState) -> Router {
    use crate::api::{record_types, servers, zones};

    Router::new()
        .route("/api/servers", get(servers::list_servers))
        .route("/api/servers/{server_id}/statistics", get(servers::statistics))
        .route(
            "/api/servers/{server_id}/zones",
            get(zones::list_zones).post(zones::create_zone),
        )
        .route(
            "/api/servers/{server_id}/zones/{zone_id}",
            get(zones::get_zone)
                .delete(zones::delete_zone)
                .patch(zones::patch_rrsets),
        )
        .route("/api/record-types", get(record_types::list_record_types))
        // unknown API paths answer in JSON rather than with the HTML 404 page
        .route("/api/{*rest}", any(api_not_found))
        .method_not_allowed_fallback(api_method_not_allowed)
        .layer(Extension(state))
}

async fn api_not_found() -> AppError {
    AppError::NotFound
}

async fn api_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
