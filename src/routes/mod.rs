//! Route tables.

pub mod common;
pub mod course;

pub use common::common_routes;
pub use course::course_routes;
