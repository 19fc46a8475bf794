//! Safe SQL builder: fixed identifiers, every value bound as a parameter.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
