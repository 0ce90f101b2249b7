//! Request body as a field map, from JSON, URL-encoded form or multipart form data.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Multipart,
    Missing,
    Other,
}

impl BodyKind {
    fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(ct) = content_type else {
            return BodyKind::Missing;
        };
        let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/json" => BodyKind::Json,
            "application/x-www-form-urlencoded" => BodyKind::Form,
            "multipart/form-data" => BodyKind::Multipart,
            s if s.starts_with("application/") && s.ends_with("+json") => BodyKind::Json,
            _ => BodyKind::Other,
        }
    }
}

/// Top-level fields of the request body. Form and multipart fields arrive as strings;
/// multipart file parts are skipped. An empty body is an empty map whatever its content type.
#[derive(Clone, Debug, Default)]
pub struct Payload(pub HashMap<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let kind = BodyKind::from_content_type(content_type.as_deref());

        match kind {
            BodyKind::Form => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::Rejected {
                        status: e.status(),
                        message: e.body_text(),
                    })?;
                Ok(Payload(
                    fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
                ))
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::Rejected {
                        status: e.status(),
                        message: e.body_text(),
                    })?;
                multipart_fields(multipart).await.map(Payload)
            }
            BodyKind::Json | BodyKind::Missing | BodyKind::Other => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| AppError::Rejected {
                        status: e.status(),
                        message: e.body_text(),
                    })?;
                if bytes.is_empty() {
                    return Ok(Payload::default());
                }
                if kind != BodyKind::Json {
                    return Err(AppError::Rejected {
                        status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        message: format!(
                            "unsupported media type '{}'",
                            content_type.as_deref().unwrap_or("")
                        ),
                    });
                }
                let value: Value = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
                body_to_map(value).map(Payload)
            }
        }
    }
}

async fn multipart_fields(mut multipart: Multipart) -> Result<HashMap<String, Value>, AppError> {
    let mut out = HashMap::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let text = field.text().await.map_err(multipart_rejection)?;
        out.insert(name, Value::String(text));
    }
    Ok(out)
}

fn multipart_rejection(e: MultipartError) -> AppError {
    AppError::Rejected {
        status: e.status(),
        message: e.body_text(),
    }
}

fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
