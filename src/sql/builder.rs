//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for courses and their students.

use crate::filters::CourseFilter;
use crate::sql::BindValue;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn with_sql(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<BindValue>) {
        self.params.push(v.into());
    }
}

const COURSE_COLUMNS: &str = "id, name";
const STUDENT_COLUMNS: &str = "id, name, birth_date";

/// SELECT courses matching every set filter field, in creation order.
pub fn select_courses(filter: &CourseFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut clauses: Vec<&str> = Vec::new();
    if let Some(id) = filter.id {
        clauses.push("id = ?");
        q.push_param(id);
    }
    if let Some(name) = &filter.name {
        clauses.push("name = ?");
        q.push_param(name.as_str());
    }
    q.sql = format!("SELECT {} FROM course", COURSE_COLUMNS);
    if !clauses.is_empty() {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(&clauses.join(" AND "));
    }
    q.sql.push_str(" ORDER BY id");
    q
}

pub fn select_course_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::with_sql(format!("SELECT {} FROM course WHERE id = ?", COURSE_COLUMNS));
    q.push_param(id);
    q
}

pub fn insert_course(name: &str) -> QueryBuf {
    let mut q = QueryBuf::with_sql(format!(
        "INSERT INTO course (name) VALUES (?) RETURNING {}",
        COURSE_COLUMNS
    ));
    q.push_param(name);
    q
}

/// UPDATE only the given columns. Caller must pass at least one column.
pub fn update_course(id: i64, columns: Vec<(&'static str, BindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = columns
        .into_iter()
        .map(|(col, v)| {
            q.push_param(v);
            format!("{} = ?", col)
        })
        .collect();
    q.sql = format!(
        "UPDATE course SET {} WHERE id = ? RETURNING {}",
        sets.join(", "),
        COURSE_COLUMNS
    );
    q.push_param(id);
    q
}

pub fn delete_course(id: i64) -> QueryBuf {
    let mut q = QueryBuf::with_sql("DELETE FROM course WHERE id = ?");
    q.push_param(id);
    q
}

pub fn delete_enrollments_for_course(course_id: i64) -> QueryBuf {
    let mut q = QueryBuf::with_sql("DELETE FROM course_students WHERE course_id = ?");
    q.push_param(course_id);
    q
}

pub fn insert_enrollment(course_id: i64, student_id: i64) -> QueryBuf {
    let mut q = QueryBuf::with_sql(
        "INSERT OR IGNORE INTO course_students (course_id, student_id) VALUES (?, ?)",
    );
    q.push_param(course_id);
    q.push_param(student_id);
    q
}

pub fn insert_student(name: &str, birth_date: Option<chrono::NaiveDate>) -> QueryBuf {
    let mut q = QueryBuf::with_sql(format!(
        "INSERT INTO student (name, birth_date) VALUES (?, ?) RETURNING {}",
        STUDENT_COLUMNS
    ));
    q.push_param(name);
    q.push_param(birth_date);
    q
}

pub fn select_student_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::with_sql(format!("SELECT {} FROM student WHERE id = ?", STUDENT_COLUMNS));
    q.push_param(id);
    q
}

/// Students of each given course, joined through `course_students`, in enrollment order.
pub fn select_enrollments(course_ids: &[i64]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = vec!["?"; course_ids.len()].join(", ");
    for id in course_ids {
        q.push_param(*id);
    }
    q.sql = format!(
        "SELECT cs.course_id AS course_id, s.id AS id, s.name AS name, s.birth_date AS birth_date \
         FROM course_students cs JOIN student s ON s.id = cs.student_id \
         WHERE cs.course_id IN ({}) ORDER BY cs.id",
        placeholders
    );
    q
}
