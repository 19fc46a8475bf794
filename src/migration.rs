//! Schema initialization: the `materials` table and its indexes, applied in one transaction.

use crate::error::AppError;
use crate::model::{MATERIAL_TYPES, PUBLICATION_STATUSES};
use sqlx::PgPool;

const OP: &str = "store.init_schema";

/// `'a', 'b'` list for a CHECK ... IN clause.
fn sql_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn table_ddl() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS materials (
    id SERIAL PRIMARY KEY,
    material_type VARCHAR(50) CHECK (material_type IN ({})),
    publication_status VARCHAR(50) CHECK (publication_status IN ({})),
    title VARCHAR(255) NOT NULL,
    content TEXT,
    creation_date TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP,
    modification_date TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
)"#,
        sql_list(MATERIAL_TYPES),
        sql_list(PUBLICATION_STATUSES)
    )
}

pub const INDEXES: &[(&str, &str)] = &[
    (
        "material type index",
        "CREATE INDEX IF NOT EXISTS idx_material_type ON materials(material_type)",
    ),
    (
        "creation date index",
        "CREATE INDEX IF NOT EXISTS idx_creation_date ON materials(creation_date)",
    ),
    (
        "composite index",
        "CREATE INDEX IF NOT EXISTS idx_material_type_creation_date ON materials(material_type, creation_date)",
    ),
];

/// Create the table and indexes if missing. Idempotent.
/// Any failure rolls the whole transaction back and is returned to the caller.
pub async fn init_schema(pool: &PgPool) -> Result<(), AppError> {
    tracing::debug!("starting schema transaction");
    let mut tx = pool.begin().await.map_err(AppError::storage(OP))?;

    tracing::debug!("creating materials table");
    if let Err(e) = sqlx::query(&table_ddl()).execute(&mut *tx).await {
        return Err(rollback(tx, e).await);
    }

    for (what, ddl) in INDEXES {
        tracing::debug!("creating {}", what);
        if let Err(e) = sqlx::query(ddl).execute(&mut *tx).await {
            return Err(rollback(tx, e).await);
        }
    }

    tx.commit().await.map_err(AppError::storage(OP))?;
    tracing::info!("schema ready");
    Ok(())
}

async fn rollback(tx: sqlx::Transaction<'_, sqlx::Postgres>, err: sqlx::Error) -> AppError {
    tracing::error!(error = %err, "rolling back schema transaction");
    if let Err(rb) = tx.rollback().await {
        tracing::error!(error = %rb, "failed to roll back schema transaction");
    }
    AppError::storage(OP)(err)
}
