//! Course CRUD and enrollment. Results come back already serialized with their students.

use super::{execute, fetch_all, fetch_optional, StudentService};
use crate::error::AppError;
use crate::filters::CourseFilter;
use crate::models::Course;
use crate::serializer::{CourseChanges, CourseRepr};
use crate::sql::{
    delete_course, delete_enrollments_for_course, insert_course, insert_enrollment,
    select_course_by_id, select_courses, update_course, BindValue,
};
use sqlx::SqlitePool;

pub struct CourseService;

impl CourseService {
    /// All courses matching `filter`, in creation order.
    pub async fn list(pool: &SqlitePool, filter: &CourseFilter) -> Result<Vec<CourseRepr>, AppError> {
        let courses: Vec<Course> = fetch_all(pool, &select_courses(filter)).await?;
        let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        let mut students = StudentService::for_courses(pool, &ids).await?;
        Ok(courses
            .into_iter()
            .map(|c| {
                let enrolled = students.remove(&c.id).unwrap_or_default();
                CourseRepr::new(c, &enrolled)
            })
            .collect())
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<CourseRepr>, AppError> {
        let Some(course) = fetch_optional::<Course, _>(pool, &select_course_by_id(id)).await? else {
            return Ok(None);
        };
        let students = StudentService::for_course(pool, course.id).await?;
        Ok(Some(CourseRepr::new(course, &students)))
    }

    /// Insert a course. A new course has no students.
    pub async fn create(pool: &SqlitePool, changes: &CourseChanges) -> Result<CourseRepr, AppError> {
        let name = changes
            .name
            .as_deref()
            .ok_or_else(|| AppError::Validation("name: this field is required".into()))?;
        let course: Course = fetch_optional(pool, &insert_course(name))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::debug!(id = course.id, "course created");
        Ok(CourseRepr::new(course, &[]))
    }

    /// Apply the set fields of `changes`; the student association is left as is.
    /// Returns None when the course does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        changes: &CourseChanges,
    ) -> Result<Option<CourseRepr>, AppError> {
        let mut columns: Vec<(&'static str, BindValue)> = Vec::new();
        if let Some(name) = &changes.name {
            columns.push(("name", BindValue::from(name.as_str())));
        }
        if columns.is_empty() {
            return Self::read(pool, id).await;
        }
        let Some(course) = fetch_optional::<Course, _>(pool, &update_course(id, columns)).await? else {
            return Ok(None);
        };
        let students = StudentService::for_course(pool, course.id).await?;
        Ok(Some(CourseRepr::new(course, &students)))
    }

    /// Delete the course and its junction rows; students are kept. Returns false if absent.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        execute(&mut *tx, &delete_enrollments_for_course(id)).await?;
        let deleted = execute(&mut *tx, &delete_course(id)).await?;
        tx.commit().await?;
        if deleted > 0 {
            tracing::debug!(id, "course deleted");
        }
        Ok(deleted > 0)
    }

    /// Enroll existing students in a course. Already-enrolled students are skipped.
    pub async fn add_students(
        pool: &SqlitePool,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        let exists: Option<Course> = fetch_optional(&mut *tx, &select_course_by_id(course_id)).await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("course {}", course_id)));
        }
        for student_id in student_ids {
            execute(&mut *tx, &insert_enrollment(course_id, *student_id)).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
