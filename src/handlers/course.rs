//! Course handlers: list, retrieve, create, update, partial update, delete.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::filters::CourseFilter;
use crate::response::{created, ok};
use crate::serializer::{CourseSerializer, Mode};
use crate::service::CourseService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

/// Path ids that are not integers cannot name a course.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("course {}", id_str)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = CourseFilter::from_query(&params)?;
    let rows = CourseService::list(&state.pool, &filter).await?;
    Ok(ok(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let changes = CourseSerializer::validate(&body, Mode::Full)?;
    let row = CourseService::create(&state.pool, &changes).await?;
    Ok(created(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CourseService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id_str)))?;
    Ok(ok(row))
}

/// PUT: `name` is required.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    apply_update(&state, &id_str, &body, Mode::Full).await
}

/// PATCH: only the fields present are changed.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    apply_update(&state, &id_str, &body, Mode::Partial).await
}

async fn apply_update(
    state: &AppState,
    id_str: &str,
    body: &HashMap<String, serde_json::Value>,
    mode: Mode,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(id_str)?;
    // Existence first: a missing course is 404 even when the body is also invalid.
    if CourseService::read(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound(format!("course {}", id_str)));
    }
    let changes = CourseSerializer::validate(body, mode)?;
    let row = CourseService::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id_str)))?;
    Ok(ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !CourseService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("course {}", id_str)));
    }
    Ok(StatusCode::NO_CONTENT)
}
