//! Exact-match list filters taken from the query string.

use crate::error::AppError;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl CourseFilter {
    /// Reads `id` and `name`. Values are trimmed; empty values mean "no filter";
    /// other keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = CourseFilter::default();
        for (k, v) in params {
            let v = v.trim();
            if v.is_empty() {
                continue;
            }
            match k.as_str() {
                "id" => {
                    let id = v
                        .parse::<i64>()
                        .map_err(|_| AppError::BadRequest(format!("id: enter a whole number, got '{}'", v)))?;
                    filter.id = Some(id);
                }
                "name" => filter.name = Some(v.to_string()),
                _ => {}
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}
