//! Data access for courses and students.

pub mod course;
pub mod student;

pub use course::CourseService;
pub use student::StudentService;

use crate::error::AppError;
use crate::sql::QueryBuf;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Executor, FromRow};

pub(crate) async fn fetch_all<'c, O, E>(executor: E, q: &QueryBuf) -> Result<Vec<O>, AppError>
where
    E: Executor<'c, Database = Sqlite>,
    O: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, O>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(executor).await?)
}

pub(crate) async fn fetch_optional<'c, O, E>(executor: E, q: &QueryBuf) -> Result<Option<O>, AppError>
where
    E: Executor<'c, Database = Sqlite>,
    O: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, O>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_optional(executor).await?)
}

/// Run a statement; returns rows affected.
pub(crate) async fn execute<'c, E>(executor: E, q: &QueryBuf) -> Result<u64, AppError>
where
    E: Executor<'c, Database = Sqlite>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.execute(executor).await?.rows_affected())
}
