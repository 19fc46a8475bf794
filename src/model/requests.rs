//! Request and response DTOs. Built per request, never shared.

use super::material::{Material, MaterialId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateMaterialRequest {
    #[serde(rename = "type")]
    pub material_type: String,
    pub status: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GetMaterialByIdRequest {
    pub id: MaterialId,
}

/// Partial update. An absent field and an empty string both mean "leave unchanged".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateMaterialRequest {
    pub id: MaterialId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdateMaterialRequest {
    pub fn status(&self) -> Option<&str> {
        non_empty(&self.status)
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn content(&self) -> Option<&str> {
        non_empty(&self.content)
    }

    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.status().is_none() && self.title().is_none() && self.content().is_none()
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Filters and window for the list query. `page` is 1-based.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetMaterialsRequest {
    #[serde(default, rename = "type")]
    pub material_type: Option<String>,
    pub page: i64,
    pub page_size: i64,
    #[serde(default)]
    pub created_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_to: Option<DateTime<Utc>>,
}

impl Default for GetMaterialsRequest {
    fn default() -> Self {
        GetMaterialsRequest {
            material_type: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            created_from: None,
            created_to: None,
        }
    }
}

impl GetMaterialsRequest {
    pub fn material_type(&self) -> Option<&str> {
        non_empty(&self.material_type)
    }

    /// Page clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn limit(&self) -> i64 {
        self.page_size()
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

/// One page of materials. `total` counts every matching row, not just this page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetMaterialsResponse {
    pub materials: Vec<Material>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}
