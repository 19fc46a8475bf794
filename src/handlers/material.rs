//! Material handlers: create, read, update, list, plus the route listing.

use crate::error::AppError;
use crate::extractors::AppJson;
use crate::model::{
    CreateMaterialRequest, GetMaterialByIdRequest, GetMaterialsRequest, MaterialId, UpdateMaterialRequest,
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use crate::response::{RouteInfo, ROUTES};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Digits only, fitting the `SERIAL` range.
fn parse_id(id_str: &str) -> Result<MaterialId, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest("invalid id".into()));
    }
    id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// Missing or non-integer values fall back to the default.
fn int_param(params: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    params
        .get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Empty means absent; anything else must be RFC 3339.
fn time_param(params: &HashMap<String, String>, key: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    match params.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(v) => DateTime::parse_from_rfc3339(v)
            .map(|d| Some(d.with_timezone(&Utc)))
            .map_err(|_| AppError::BadRequest(format!("{} must be an RFC 3339 timestamp", key))),
    }
}

pub fn list_request(params: &HashMap<String, String>) -> Result<GetMaterialsRequest, AppError> {
    Ok(GetMaterialsRequest {
        material_type: params.get("type").cloned(),
        page: int_param(params, "page", DEFAULT_PAGE),
        page_size: int_param(params, "page_size", DEFAULT_PAGE_SIZE),
        created_from: time_param(params, "created_from")?,
        created_to: time_param(params, "created_to")?,
    })
}

pub async fn routes_info() -> Json<&'static [RouteInfo]> {
    Json(ROUTES)
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateMaterialRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(?req, "create request");
    let id = state.materials.create_material(&req).await?;
    tracing::info!(id, "material created");
    Ok(StatusCode::CREATED)
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let req = GetMaterialByIdRequest { id: parse_id(&id_str)? };
    tracing::debug!(?req, "get request");
    let material = state
        .materials
        .get_material_by_id(&req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("material {}", req.id)))?;
    Ok((StatusCode::OK, Json(material)))
}

pub async fn update(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateMaterialRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(?req, "update request");
    state.materials.update_material(&req).await?;
    Ok(StatusCode::OK)
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let req = list_request(&params)?;
    tracing::debug!(?req, "list request");
    let page = state.materials.get_materials(&req).await?;
    Ok((StatusCode::OK, Json(page)))
}
