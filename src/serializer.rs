//! Course wire representation and input validation.
//!
//! Output is `{"id", "name", "students"}` where each student is rendered through its
//! `Display` impl. Only `name` is writable; `id` and `students` in a request body are ignored.

use crate::error::AppError;
use crate::models::{Course, Student};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const COURSE_NAME_MAX_LENGTH: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRepr {
    pub id: i64,
    pub name: String,
    pub students: Vec<String>,
}

impl CourseRepr {
    pub fn new(course: Course, students: &[Student]) -> Self {
        CourseRepr {
            id: course.id,
            name: course.name,
            students: students.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Writable course fields after validation. `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Per-field constraints applied to string input.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub required: bool,
    pub allow_blank: bool,
    pub max_length: Option<usize>,
}

const NAME_RULE: FieldRule = FieldRule {
    required: true,
    allow_blank: false,
    max_length: Some(COURSE_NAME_MAX_LENGTH),
};

/// Whether missing required fields are an error (POST, PUT) or simply left alone (PATCH).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Full,
    Partial,
}

pub struct CourseSerializer;

impl CourseSerializer {
    pub fn validate(body: &HashMap<String, Value>, mode: Mode) -> Result<CourseChanges, AppError> {
        let name = validate_string("name", body.get("name"), &NAME_RULE, mode)?;
        Ok(CourseChanges { name })
    }
}

fn validate_string(
    field: &str,
    value: Option<&Value>,
    rule: &FieldRule,
    mode: Mode,
) -> Result<Option<String>, AppError> {
    let value = match value {
        None if rule.required && mode == Mode::Full => {
            return Err(AppError::Validation(format!("{}: this field is required", field)));
        }
        None => return Ok(None),
        Some(v) => v,
    };
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => {
            return Err(AppError::Validation(format!("{}: this field may not be null", field)));
        }
        _ => {
            return Err(AppError::Validation(format!("{}: not a valid string", field)));
        }
    };
    if s.is_empty() && !rule.allow_blank {
        return Err(AppError::Validation(format!("{}: this field may not be blank", field)));
    }
    if let Some(max) = rule.max_length {
        if s.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{}: ensure this field has no more than {} characters",
                field, max
            )));
        }
    }
    Ok(Some(s))
}
