//! Stored records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

/// `"<name>, <birth_date>"`, with `None` for a missing birth date.
impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.birth_date {
            Some(d) => write!(f, "{}, {}", self.name, d.format("%Y-%m-%d")),
            None => write!(f, "{}, None", self.name),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

/// Junction row joined with its student; used to batch-load students for many courses.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Enrollment {
    pub course_id: i64,
    #[sqlx(flatten)]
    pub student: Student,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_display_with_birth_date() {
        let s = Student {
            id: 1,
            name: "Smith".into(),
            birth_date: NaiveDate::from_ymd_opt(2001, 3, 9),
        };
        assert_eq!(s.to_string(), "Smith, 2001-03-09");
    }

    #[test]
    fn student_display_without_birth_date() {
        let s = Student {
            id: 2,
            name: "Jones".into(),
            birth_date: None,
        };
        assert_eq!(s.to_string(), "Jones, None");
    }
}
