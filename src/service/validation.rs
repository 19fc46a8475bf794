//! Request validation run before anything reaches storage.
//!
//! `type` and `status` are left to the database CHECK constraints.

use crate::error::AppError;
use crate::model::{CreateMaterialRequest, UpdateMaterialRequest};

/// Matches `title VARCHAR(255)`.
pub const TITLE_MAX_CHARS: usize = 255;

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_create(req: &CreateMaterialRequest) -> Result<(), AppError> {
        if req.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        validate_title_length(&req.title)
    }

    /// Only the fields that will be written are checked.
    pub fn validate_update(req: &UpdateMaterialRequest) -> Result<(), AppError> {
        if let Some(title) = req.title() {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be blank".into()));
            }
            validate_title_length(title)?;
        }
        Ok(())
    }
}

fn validate_title_length(title: &str) -> Result<(), AppError> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at most {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
}
