// src/api/zones.rs
use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::SharedState;
use crate::error::AppError;
use crate::powerdns::types::{PdnsRrset, PdnsZone, PdnsZoneCreate, PdnsZoneSummary};

// GET /api/servers/{server_id}/zones
pub async fn list_zones(
    Path(server_id): Path<String>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Vec<PdnsZoneSummary>>, AppError> {
    Ok(Json(state.sync.list_zones(&server_id).await?))
}

// GET /api/servers/{server_id}/zones/{zone_id}
pub async fn get_zone(
    Path((server_id, zone_id)): Path<(String, String)>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<PdnsZone>, AppError> {
    Ok(Json(state.sync.get_zone(&server_id, &zone_id).await?))
}

// POST /api/servers/{server_id}/zones
pub async fn create_zone(
    Path(server_id): Path<String>,
    Extension(state): Extension<SharedState>,
    payload: Result<Json<PdnsZoneCreate>, JsonRejection>,
) -> Result<Json<PdnsZone>, AppError> {
    let Json(spec) = payload?;
    Ok(Json(state.sync.create_zone(&server_id, &spec).await?))
}

// DELETE /api/servers/{server_id}/zones/{zone_id}
pub async fn delete_zone(
    Path((server_id, zone_id)): Path<(String, String)>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.sync.delete_zone(&server_id, &zone_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Deserialize)]
pub struct RrsetPatchRequest {
    pub rrsets: Vec<PdnsRrset>,
}

// PATCH /api/servers/{server_id}/zones/{zone_id}
pub async fn patch_rrsets(
    Path((server_id, zone_id)): Path<(String, String)>,
    Extension(state): Extension<SharedState>,
    payload: Result<Json<RrsetPatchRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload?;
    state
        .sync
        .submit_record_changes(&server_id, &zone_id, &req.rrsets)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
