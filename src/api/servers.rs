//! Server listing and read-only statistics.
use axum::{Extension, Json, extract::Path};
use tracing::debug;

use crate::SharedState;
use crate::error::AppError;
use crate::powerdns::types::{PdnsMetric, PdnsServer};

// GET /api/servers
pub async fn list_servers(
    Extension(state): Extension<SharedState>,
) -> Result<Json<Vec<PdnsServer>>, AppError> {
    let servers = state.sync.list_servers().await?;
    debug!(count = servers.len(), "listed servers");
    Ok(Json(servers))
}

// GET /api/servers/{server_id}/statistics
pub async fn statistics(
    Path(server_id): Path<String>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Vec<PdnsMetric>>, AppError> {
    Ok(Json(state.sync.statistics(&server_id).await?))
}
