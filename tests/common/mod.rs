//! Shared fixtures: a fresh in-memory database per test, a router over it, and a
//! factory for students and courses with fake data.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use fake::faker::lorem::en::Word;
use fake::Fake;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use students_api::{
    app, connect_in_memory, ensure_tables, AppState, CourseChanges, CourseRepr, CourseService,
    NewStudent, Student, StudentService,
};
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn setup() -> TestApp {
    setup_with_limit(BODY_LIMIT).await
}

pub async fn setup_with_limit(body_limit: usize) -> TestApp {
    let pool = connect_in_memory().await.unwrap();
    ensure_tables(&pool).await.unwrap();
    let router = app(AppState { pool: pool.clone() }, body_limit);
    TestApp { router, pool }
}

pub fn fake_birth_date() -> NaiveDate {
    let year: i32 = (1990..2006).fake();
    let month: u32 = (1..13).fake();
    let day: u32 = (1..29).fake();
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

impl TestApp {
    /// `quantity` students with the given name and a fake birth date.
    pub async fn students(&self, quantity: usize, name: &str) -> Vec<Student> {
        let mut out = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            let new = NewStudent {
                name: name.to_string(),
                birth_date: Some(fake_birth_date()),
            };
            out.push(StudentService::create(&self.pool, &new).await.unwrap());
        }
        out
    }

    /// `quantity` courses, each with three freshly created students named "Smith".
    /// Courses get a fake name unless `name` is given.
    pub async fn courses(&self, quantity: usize, name: Option<&str>) -> Vec<CourseRepr> {
        let mut out = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            let name = name.map(str::to_string).unwrap_or_else(|| Word().fake());
            let changes = CourseChanges { name: Some(name) };
            let course = CourseService::create(&self.pool, &changes).await.unwrap();
            let students = self.students(3, "Smith").await;
            let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
            CourseService::add_students(&self.pool, course.id, &ids).await.unwrap();
            out.push(CourseRepr {
                students: students.iter().map(|s| s.to_string()).collect(),
                ..course
            });
        }
        out
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn form(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    /// `multipart/form-data` body with one text part per field.
    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        const BOUNDARY: &str = "course-form-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    pub async fn raw(&self, method: Method, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::delete(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}
