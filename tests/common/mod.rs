//! Shared helpers: an in-memory `MaterialRepository` and request shortcuts for the router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use materials_api::model::{MATERIAL_TYPES, PUBLICATION_STATUSES};
use materials_api::{
    app, AppError, AppState, CreateMaterialRequest, GetMaterialByIdRequest, GetMaterialsRequest,
    GetMaterialsResponse, Material, MaterialId, MaterialRepository, MaterialService, UpdateMaterialRequest,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Rows kept in id order. Rejects unknown type/status the way the CHECK constraints do.
#[derive(Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<Material>>,
}

impl InMemoryRepository {
    /// Insert with an explicit creation time, for date-range tests.
    pub fn insert_at(&self, material_type: &str, title: &str, at: DateTime<Utc>) -> MaterialId {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as MaterialId + 1;
        rows.push(Material {
            id,
            material_type: material_type.into(),
            status: "active".into(),
            title: title.into(),
            content: None,
            created_at: at,
            updated_at: at,
        });
        id
    }
}

#[async_trait]
impl MaterialRepository for InMemoryRepository {
    async fn create_material(&self, req: &CreateMaterialRequest) -> Result<MaterialId, AppError> {
        if !MATERIAL_TYPES.contains(&req.material_type.as_str())
            || !PUBLICATION_STATUSES.contains(&req.status.as_str())
        {
            return Err(AppError::storage("memory.create_material")(sqlx::Error::Protocol(
                "check constraint violated".into(),
            )));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as MaterialId + 1;
        let now = Utc::now();
        rows.push(Material {
            id,
            material_type: req.material_type.clone(),
            status: req.status.clone(),
            title: req.title.clone(),
            content: req.content.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn get_material_by_id(&self, req: &GetMaterialByIdRequest) -> Result<Option<Material>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.id == req.id).cloned())
    }

    async fn update_material(&self, req: &UpdateMaterialRequest) -> Result<(), AppError> {
        if req.is_empty() {
            return Err(AppError::Validation("nothing to update".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let m = rows
            .iter_mut()
            .find(|m| m.id == req.id)
            .ok_or_else(|| AppError::NotFound(format!("material {}", req.id)))?;
        if let Some(s) = req.status() {
            m.status = s.to_string();
        }
        if let Some(t) = req.title() {
            m.title = t.to_string();
        }
        if let Some(c) = req.content() {
            m.content = Some(c.to_string());
        }
        m.updated_at = Utc::now();
        Ok(())
    }

    async fn get_materials(&self, req: &GetMaterialsRequest) -> Result<GetMaterialsResponse, AppError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<&Material> = rows
            .iter()
            .filter(|m| req.material_type().map_or(true, |t| m.material_type == t))
            .filter(|m| req.created_from.map_or(true, |f| m.created_at >= f))
            .filter(|m| req.created_to.map_or(true, |t| m.created_at <= t))
            .collect();
        let materials = matching
            .iter()
            .skip(req.offset() as usize)
            .take(req.limit() as usize)
            .map(|m| (*m).clone())
            .collect();
        Ok(GetMaterialsResponse {
            materials,
            total: matching.len() as i64,
            page: req.page(),
            page_size: req.page_size(),
        })
    }
}

/// Delays every call by `delay` before delegating, to trip the request timeout.
pub struct SlowRepository {
    pub inner: InMemoryRepository,
    pub delay: Duration,
}

#[async_trait]
impl MaterialRepository for SlowRepository {
    async fn create_material(&self, req: &CreateMaterialRequest) -> Result<MaterialId, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create_material(req).await
    }

    async fn get_material_by_id(&self, req: &GetMaterialByIdRequest) -> Result<Option<Material>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_material_by_id(req).await
    }

    async fn update_material(&self, req: &UpdateMaterialRequest) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.update_material(req).await
    }

    async fn get_materials(&self, req: &GetMaterialsRequest) -> Result<GetMaterialsResponse, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_materials(req).await
    }
}

pub fn build_test_app(repo: Arc<InMemoryRepository>) -> Router {
    build_test_app_with_timeout(repo, Duration::from_secs(30))
}

pub fn build_test_app_with_timeout(repo: Arc<dyn MaterialRepository>, request_timeout: Duration) -> Router {
    let state = AppState {
        materials: MaterialService::new(repo),
    };
    app(state, request_timeout)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn send_raw(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
