//! Shared application state for all routes. Built once at startup.

use crate::service::MaterialService;

#[derive(Clone)]
pub struct AppState {
    pub materials: MaterialService,
}
