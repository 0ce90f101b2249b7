//! Connection pool and table DDL for `student`, `course` and the `course_students` junction.

use crate::error::AppError;
use crate::settings::Settings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open a pool against `settings.database_url`, creating the database file if missing.
/// Foreign keys are enforced on every connection so junction rows follow their parents.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url = %settings.database_url, "connected to database");
    Ok(pool)
}

/// Private in-memory database. Pinned to one connection that never expires,
/// since every new in-memory connection would see an empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS student (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        birth_date TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course_students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_id INTEGER NOT NULL REFERENCES course (id) ON DELETE CASCADE,
        student_id INTEGER NOT NULL REFERENCES student (id) ON DELETE CASCADE,
        UNIQUE (course_id, student_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS course_students_student_id ON course_students (student_id)",
];

/// Create tables and indexes if they do not exist. Safe to call on every startup.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!(tables = TABLES.len(), "schema ensured");
    Ok(())
}
