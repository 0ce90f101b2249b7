//! SQL building and parameter binding.

pub mod builder;
pub mod params;

pub use builder::*;
pub use params::BindValue;
