//! Student records and their course enrollments.

use super::{fetch_all, fetch_optional};
use crate::error::AppError;
use crate::models::{Enrollment, NewStudent, Student};
use crate::sql::{insert_student, select_enrollments, select_student_by_id};
use sqlx::SqlitePool;
use std::collections::HashMap;

pub struct StudentService;

impl StudentService {
    pub async fn create(pool: &SqlitePool, new: &NewStudent) -> Result<Student, AppError> {
        let q = insert_student(&new.name, new.birth_date);
        fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Student>, AppError> {
        fetch_optional(pool, &select_student_by_id(id)).await
    }

    /// Students of one course in enrollment order.
    pub async fn for_course(pool: &SqlitePool, course_id: i64) -> Result<Vec<Student>, AppError> {
        let mut by_course = Self::for_courses(pool, &[course_id]).await?;
        Ok(by_course.remove(&course_id).unwrap_or_default())
    }

    /// Batch-load students for many courses in one query. Courses without students are absent.
    pub async fn for_courses(
        pool: &SqlitePool,
        course_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Student>>, AppError> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<Enrollment> = fetch_all(pool, &select_enrollments(course_ids)).await?;
        let mut out: HashMap<i64, Vec<Student>> = HashMap::new();
        for row in rows {
            out.entry(row.course_id).or_default().push(row.student);
        }
        Ok(out)
    }
}
