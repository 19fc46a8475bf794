//! Materials API: CRUD REST backend for educational materials on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::init_schema;
pub use model::{
    CreateMaterialRequest, GetMaterialByIdRequest, GetMaterialsRequest, GetMaterialsResponse, Material,
    MaterialId, UpdateMaterialRequest,
};
pub use repository::MaterialRepository;
pub use routes::material::app;
pub use service::MaterialService;
pub use state::AppState;
pub use store::{ensure_database_exists, PgMaterialStore};
