//! Response bodies shared by the handlers: error envelope and route listing.

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

/// One entry of the `GET /` route listing.
#[derive(Clone, Debug, Serialize)]
pub struct RouteInfo {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

pub const ROUTES: &[RouteInfo] = &[
    RouteInfo {
        path: "/materials",
        method: "POST",
        description: "Create a material",
    },
    RouteInfo {
        path: "/materials/{id}",
        method: "GET",
        description: "Get a material by id",
    },
    RouteInfo {
        path: "/materials",
        method: "PUT",
        description: "Update a material (id in the body)",
    },
    RouteInfo {
        path: "/materials",
        method: "GET",
        description: "List materials with type/date filters and pagination",
    },
];
