mod common;

use common::{fake_birth_date, setup};
use students_api::{
    AppError, CourseChanges, CourseFilter, CourseService, NewStudent, StudentService,
};

fn named(name: &str) -> CourseChanges {
    CourseChanges {
        name: Some(name.to_string()),
    }
}

#[tokio::test]
async fn student_create_and_read() {
    let app = setup().await;
    let birth_date = fake_birth_date();

    let created = StudentService::create(
        &app.pool,
        &NewStudent {
            name: "Smith".into(),
            birth_date: Some(birth_date),
        },
    )
    .await
    .unwrap();

    let loaded = StudentService::read(&app.pool, created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.birth_date, Some(birth_date));
    assert!(StudentService::read(&app.pool, created.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn student_without_birth_date_renders_none() {
    let app = setup().await;
    let course = CourseService::create(&app.pool, &named("Art")).await.unwrap();
    let student = StudentService::create(
        &app.pool,
        &NewStudent {
            name: "Jones".into(),
            birth_date: None,
        },
    )
    .await
    .unwrap();

    CourseService::add_students(&app.pool, course.id, &[student.id]).await.unwrap();

    let repr = CourseService::read(&app.pool, course.id).await.unwrap().unwrap();
    assert_eq!(repr.students, vec!["Jones, None".to_string()]);
}

#[tokio::test]
async fn add_students_skips_duplicates() {
    let app = setup().await;
    let course = CourseService::create(&app.pool, &named("Art")).await.unwrap();
    let students = app.students(2, "Smith").await;
    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();

    CourseService::add_students(&app.pool, course.id, &ids).await.unwrap();
    CourseService::add_students(&app.pool, course.id, &ids).await.unwrap();

    let enrolled = StudentService::for_course(&app.pool, course.id).await.unwrap();
    assert_eq!(enrolled, students);
}

#[tokio::test]
async fn add_students_to_missing_course() {
    let app = setup().await;
    let students = app.students(1, "Smith").await;

    let err = CourseService::add_students(&app.pool, 99, &[students[0].id])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn add_unknown_student_fails_and_rolls_back() {
    let app = setup().await;
    let course = CourseService::create(&app.pool, &named("Art")).await.unwrap();
    let students = app.students(1, "Smith").await;

    let err = CourseService::add_students(&app.pool, course.id, &[students[0].id, 1234])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert!(StudentService::for_course(&app.pool, course.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn student_in_many_courses() {
    let app = setup().await;
    let a = CourseService::create(&app.pool, &named("Art")).await.unwrap();
    let b = CourseService::create(&app.pool, &named("Music")).await.unwrap();
    let students = app.students(1, "Smith").await;

    CourseService::add_students(&app.pool, a.id, &[students[0].id]).await.unwrap();
    CourseService::add_students(&app.pool, b.id, &[students[0].id]).await.unwrap();

    let by_course = StudentService::for_courses(&app.pool, &[a.id, b.id]).await.unwrap();
    assert_eq!(by_course[&a.id], students);
    assert_eq!(by_course[&b.id], students);

    let all = CourseService::list(&app.pool, &CourseFilter::default()).await.unwrap();
    assert!(all.iter().all(|c| c.students == vec![students[0].to_string()]));
}

#[tokio::test]
async fn update_leaves_students() {
    let app = setup().await;
    let courses = app.courses(1, None).await;

    let updated = CourseService::update(&app.pool, courses[0].id, &named("Drama"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Drama");
    assert_eq!(updated.students, courses[0].students);
    assert!(CourseService::update(&app.pool, 500, &named("Drama")).await.unwrap().is_none());
}
