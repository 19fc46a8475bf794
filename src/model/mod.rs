//! Material record and the per-request DTOs.

mod material;
mod requests;

pub use material::*;
pub use requests::*;
