//! The `materials` row as seen by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type MaterialId = i32;

/// Values accepted by the `material_type` CHECK constraint.
pub const MATERIAL_TYPES: &[&str] = &["article", "video", "presentation"];

/// Values accepted by the `publication_status` CHECK constraint.
pub const PUBLICATION_STATUSES: &[&str] = &["archived", "active"];

/// One educational material. Column names differ from the JSON names, so the
/// row mapping renames each field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Material {
    pub id: MaterialId,
    #[serde(rename = "type")]
    #[sqlx(rename = "material_type")]
    pub material_type: String,
    #[sqlx(rename = "publication_status")]
    pub status: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[sqlx(rename = "creation_date")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "modification_date")]
    pub updated_at: DateTime<Utc>,
}
