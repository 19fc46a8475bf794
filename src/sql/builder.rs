//! Builds parameterized INSERT, SELECT, UPDATE and COUNT statements for the `materials` table.

use super::params::PgBindValue;
use crate::model::{CreateMaterialRequest, GetMaterialsRequest, MaterialId, UpdateMaterialRequest};

pub const TABLE: &str = "materials";

/// Column list in `Material` field order.
pub const COLUMNS: &str =
    "id, material_type, publication_status, title, content, creation_date, modification_date";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter and returns its `$n` placeholder.
    fn push_param(&mut self, v: impl Into<PgBindValue>) -> String {
        self.params.push(v.into());
        format!("${}", self.params.len())
    }
}

/// INSERT of the four caller-supplied columns; id and timestamps come from defaults.
pub fn insert(req: &CreateMaterialRequest) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = [
        q.push_param(req.material_type.as_str()),
        q.push_param(req.status.as_str()),
        q.push_param(req.title.as_str()),
        q.push_param(req.content.as_deref()),
    ];
    q.sql = format!(
        "INSERT INTO {} (material_type, publication_status, title, content) VALUES ({}) RETURNING id",
        TABLE,
        placeholders.join(", ")
    );
    q
}

/// Point lookup by primary key.
pub fn select_by_id(id: MaterialId) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE id = {}", COLUMNS, TABLE, ph);
    q
}

/// UPDATE by id: SET only the non-empty fields, then refresh `modification_date`.
/// Returns `None` when there is nothing to set.
pub fn update(req: &UpdateMaterialRequest) -> Option<QueryBuf> {
    if req.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in [
        ("publication_status", req.status()),
        ("title", req.title()),
        ("content", req.content()),
    ] {
        if let Some(v) = val {
            let ph = q.push_param(v);
            sets.push(format!("{} = {}", col, ph));
        }
    }
    sets.push("modification_date = NOW()".to_string());
    let id_ph = q.push_param(req.id);
    q.sql = format!("UPDATE {} SET {} WHERE id = {}", TABLE, sets.join(", "), id_ph);
    Some(q)
}

/// WHERE clause shared by the page and count queries.
fn push_filters(q: &mut QueryBuf, req: &GetMaterialsRequest) -> String {
    let mut where_parts = Vec::new();
    if let Some(t) = req.material_type() {
        let ph = q.push_param(t);
        where_parts.push(format!("material_type = {}", ph));
    }
    if let Some(from) = req.created_from {
        let ph = q.push_param(from);
        where_parts.push(format!("creation_date >= {}", ph));
    }
    if let Some(to) = req.created_to {
        let ph = q.push_param(to);
        where_parts.push(format!("creation_date <= {}", ph));
    }
    if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    }
}

/// One page of filtered materials, ordered by id so pages never overlap.
pub fn select_list(req: &GetMaterialsRequest) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = push_filters(&mut q, req);
    let limit_ph = q.push_param(req.limit());
    let offset_ph = q.push_param(req.offset());
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY id ASC LIMIT {} OFFSET {}",
        COLUMNS, TABLE, where_clause, limit_ph, offset_ph
    );
    q
}

/// Number of rows matching the list filters, ignoring the page window.
pub fn count_list(req: &GetMaterialsRequest) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = push_filters(&mut q, req);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", TABLE, where_clause);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn insert_binds_four_values() {
        let q = insert(&CreateMaterialRequest {
            material_type: "video".into(),
            status: "active".into(),
            title: "Intro".into(),
            content: None,
        });
        assert_eq!(
            q.sql,
            "INSERT INTO materials (material_type, publication_status, title, content) VALUES ($1, $2, $3, $4) RETURNING id"
        );
        assert_eq!(
            q.params,
            vec![
                PgBindValue::from("video"),
                PgBindValue::from("active"),
                PgBindValue::from("Intro"),
                PgBindValue::Null,
            ]
        );
    }

    #[test]
    fn values_never_reach_the_sql_text() {
        let q = insert(&CreateMaterialRequest {
            material_type: "article'); DROP TABLE materials; --".into(),
            status: "active".into(),
            title: "x".into(),
            content: Some("y".into()),
        });
        assert!(!q.sql.contains("DROP"));
    }

    #[test]
    fn select_by_id_is_a_point_lookup() {
        let q = select_by_id(42);
        assert_eq!(q.sql, format!("SELECT {} FROM materials WHERE id = $1", COLUMNS));
        assert_eq!(q.params, vec![PgBindValue::I32(42)]);
    }

    #[test]
    fn update_sets_only_non_empty_fields() {
        let q = update(&UpdateMaterialRequest {
            id: 1,
            status: Some(String::new()),
            title: Some("Intro v2".into()),
            content: None,
        })
        .unwrap();
        assert_eq!(
            q.sql,
            "UPDATE materials SET title = $1, modification_date = NOW() WHERE id = $2"
        );
        assert_eq!(q.params, vec![PgBindValue::from("Intro v2"), PgBindValue::I32(1)]);
    }

    #[test]
    fn update_with_every_field() {
        let q = update(&UpdateMaterialRequest {
            id: 9,
            status: Some("archived".into()),
            title: Some("t".into()),
            content: Some("c".into()),
        })
        .unwrap();
        assert_eq!(
            q.sql,
            "UPDATE materials SET publication_status = $1, title = $2, content = $3, modification_date = NOW() WHERE id = $4"
        );
        assert_eq!(q.params.len(), 4);
    }

    #[test]
    fn update_without_fields_builds_nothing() {
        let q = update(&UpdateMaterialRequest {
            id: 1,
            ..Default::default()
        });
        assert!(q.is_none());
    }

    #[test]
    fn list_without_filters() {
        let q = select_list(&GetMaterialsRequest::default());
        assert_eq!(
            q.sql,
            format!("SELECT {} FROM materials ORDER BY id ASC LIMIT $1 OFFSET $2", COLUMNS)
        );
        assert_eq!(q.params, vec![PgBindValue::I64(10), PgBindValue::I64(0)]);
    }

    #[test]
    fn list_combines_filters_with_and() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let req = GetMaterialsRequest {
            material_type: Some("video".into()),
            page: 3,
            page_size: 2,
            created_from: Some(from),
            created_to: Some(to),
        };
        let q = select_list(&req);
        assert_eq!(
            q.sql,
            format!(
                "SELECT {} FROM materials WHERE material_type = $1 AND creation_date >= $2 AND creation_date <= $3 ORDER BY id ASC LIMIT $4 OFFSET $5",
                COLUMNS
            )
        );
        assert_eq!(
            q.params,
            vec![
                PgBindValue::from("video"),
                PgBindValue::Timestamp(from),
                PgBindValue::Timestamp(to),
                PgBindValue::I64(2),
                PgBindValue::I64(4),
            ]
        );

        let c = count_list(&req);
        assert_eq!(
            c.sql,
            "SELECT COUNT(*) FROM materials WHERE material_type = $1 AND creation_date >= $2 AND creation_date <= $3"
        );
        assert_eq!(c.params.len(), 3);
    }

    #[test]
    fn empty_type_filter_is_ignored() {
        let req = GetMaterialsRequest {
            material_type: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(count_list(&req).sql, "SELECT COUNT(*) FROM materials");
    }

    #[test]
    fn non_positive_window_is_clamped() {
        let req = GetMaterialsRequest {
            page: -2,
            page_size: 0,
            ..Default::default()
        };
        let q = select_list(&req);
        assert_eq!(q.params, vec![PgBindValue::I64(1), PgBindValue::I64(0)]);
    }
}
