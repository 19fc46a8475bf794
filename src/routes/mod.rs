//! Routers: common (health, version) and materials.

pub mod common;
pub mod material;

pub use common::common_routes;
pub use material::material_routes;
