//! PostgreSQL implementation of `MaterialRepository`, plus database bootstrap helpers.

use crate::error::{AppError, ConfigError};
use crate::model::{
    CreateMaterialRequest, GetMaterialByIdRequest, GetMaterialsRequest, GetMaterialsResponse, Material,
    MaterialId, UpdateMaterialRequest,
};
use crate::repository::MaterialRepository;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;
use std::time::Duration;

/// Storage adapter over a shared connection pool. Cheap to clone.
#[derive(Clone)]
pub struct PgMaterialStore {
    pool: PgPool,
}

impl PgMaterialStore {
    pub fn new(pool: PgPool) -> Self {
        PgMaterialStore { pool }
    }
}

fn bind_as<'q, T>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}

fn bind_scalar<'q, T>(q: &'q QueryBuf) -> QueryScalar<'q, Postgres, T, PgArguments>
where
    (T,): for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_scalar::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}

/// Logs a storage failure with its operation tag before handing it back.
fn log_storage(err: AppError) -> AppError {
    if let AppError::Storage { op, source } = &err {
        tracing::error!(op = %op, error = %source, "storage operation failed");
    }
    err
}

#[async_trait]
impl MaterialRepository for PgMaterialStore {
    async fn create_material(&self, req: &CreateMaterialRequest) -> Result<MaterialId, AppError> {
        const OP: &str = "store.create_material";
        let q = sql::insert(req);
        let id = bind_scalar::<MaterialId>(&q)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::storage(OP))
            .map_err(log_storage)?;
        tracing::debug!(id, "material created");
        Ok(id)
    }

    async fn get_material_by_id(&self, req: &GetMaterialByIdRequest) -> Result<Option<Material>, AppError> {
        const OP: &str = "store.get_material_by_id";
        let q = sql::select_by_id(req.id);
        let row = bind_as::<Material>(&q)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::storage(OP))
            .map_err(log_storage)?;
        if row.is_none() {
            tracing::debug!(id = req.id, "no material with this id");
        }
        Ok(row)
    }

    async fn update_material(&self, req: &UpdateMaterialRequest) -> Result<(), AppError> {
        const OP: &str = "store.update_material";
        let q = sql::update(req)
            .ok_or_else(|| AppError::Validation("nothing to update: set at least one of status, title, content".into()))?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(AppError::storage(OP))
            .map_err(log_storage)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("material {}", req.id)));
        }
        Ok(())
    }

    async fn get_materials(&self, req: &GetMaterialsRequest) -> Result<GetMaterialsResponse, AppError> {
        const OP: &str = "store.get_materials";
        let page = sql::select_list(req);
        let materials = bind_as::<Material>(&page)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::storage(OP))
            .map_err(log_storage)?;
        let count = sql::count_list(req);
        let total = bind_scalar::<i64>(&count)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::storage(OP))
            .map_err(log_storage)?;
        Ok(GetMaterialsResponse {
            materials,
            total,
            page: req.page(),
            page_size: req.page_size(),
        })
    }
}

/// Pool sizing taken from configuration.
#[derive(Clone, Copy, Debug)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        PoolSettings {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Open the shared pool. Built once at startup and passed down.
pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
        .map_err(AppError::storage("store.connect"))
}

/// Connect to the `postgres` maintenance database and create the target database if it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    const OP: &str = "store.ensure_database_exists";
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::storage(OP))?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::storage(OP))?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::storage(OP))?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_url("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn invalid_url(value: String) -> AppError {
    AppError::Config(ConfigError::Invalid {
        var: "DATABASE_URL",
        value,
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_swaps_the_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/materials").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "materials");
    }

    #[test]
    fn admin_url_keeps_query_options() {
        let (admin, name) =
            parse_db_name_from_url("postgres://localhost/materials?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "materials");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }
}
