//! Students API: REST backend for courses and the students enrolled in them.

pub mod error;
pub mod extractors;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod serializer;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use filters::CourseFilter;
pub use models::{Course, NewStudent, Student};
pub use response::error_body;
pub use routes::{common_routes, course_routes};
pub use serializer::{CourseChanges, CourseRepr, CourseSerializer};
pub use service::{CourseService, StudentService};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_tables};

use axum::{extract::DefaultBodyLimit, http::StatusCode, Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

async fn fallback() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("not_found", "no such route".into())),
    )
}

/// Full application: operational routes, course routes, request tracing and body limit.
/// The limit is enforced by the body extractors, so oversized bodies get the JSON error envelope.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(course_routes(state))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}
