//! Course routes. Each path is served with and without the trailing slash.

use crate::handlers::course::{create, delete, list, partial_update, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn course_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(list).post(create))
        .route("/courses/", get(list).post(create))
        .route(
            "/courses/:id",
            get(read).put(update).patch(partial_update).delete(delete),
        )
        .route(
            "/courses/:id/",
            get(read).put(update).patch(partial_update).delete(delete),
        )
        .with_state(state)
}
