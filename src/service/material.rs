//! MaterialService: the seam between the HTTP boundary and storage.

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::model::{
    CreateMaterialRequest, GetMaterialByIdRequest, GetMaterialsRequest, GetMaterialsResponse, Material,
    MaterialId, UpdateMaterialRequest,
};
use crate::repository::MaterialRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct MaterialService {
    repo: Arc<dyn MaterialRepository>,
}

impl MaterialService {
    pub fn new(repo: Arc<dyn MaterialRepository>) -> Self {
        MaterialService { repo }
    }

    pub async fn create_material(&self, req: &CreateMaterialRequest) -> Result<MaterialId, AppError> {
        RequestValidator::validate_create(req)?;
        self.repo.create_material(req).await
    }

    pub async fn get_material_by_id(&self, req: &GetMaterialByIdRequest) -> Result<Option<Material>, AppError> {
        self.repo.get_material_by_id(req).await
    }

    pub async fn update_material(&self, req: &UpdateMaterialRequest) -> Result<(), AppError> {
        RequestValidator::validate_update(req)?;
        self.repo.update_material(req).await
    }

    pub async fn get_materials(&self, req: &GetMaterialsRequest) -> Result<GetMaterialsResponse, AppError> {
        self.repo.get_materials(req).await
    }
}
