//! HTTP handlers.

pub mod course;
pub use course::*;
