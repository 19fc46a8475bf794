//! Use-case layer: validates requests and delegates to the repository.

mod material;
mod validation;
pub use material::MaterialService;
pub use validation::RequestValidator;
