//! HTTP handlers for materials.

pub mod material;
pub use material::*;
