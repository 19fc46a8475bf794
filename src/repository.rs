//! Storage capability the service depends on. Any backend implementing it is substitutable.

use crate::error::AppError;
use crate::model::{
    CreateMaterialRequest, GetMaterialByIdRequest, GetMaterialsRequest, GetMaterialsResponse, Material,
    MaterialId, UpdateMaterialRequest,
};
use async_trait::async_trait;

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Insert a new material and return the id the store assigned.
    async fn create_material(&self, req: &CreateMaterialRequest) -> Result<MaterialId, AppError>;

    /// `Ok(None)` when no row has this id.
    async fn get_material_by_id(&self, req: &GetMaterialByIdRequest) -> Result<Option<Material>, AppError>;

    /// Partial update. Fails with `Validation` when no field is set and `NotFound` when the id is unknown.
    async fn update_material(&self, req: &UpdateMaterialRequest) -> Result<(), AppError>;

    /// One page of matching materials ordered by id, plus the total number of matches.
    async fn get_materials(&self, req: &GetMaterialsRequest) -> Result<GetMaterialsResponse, AppError>;
}
