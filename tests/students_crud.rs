use schooldeskd::api::AppState;
use schooldeskd::client::{ApiClient, ApiError, InProcess, Transport};
use schooldeskd::db;
use schooldeskd::model::{PaymentStatus, StudentPayload};
use serde_json::json;

fn client() -> ApiClient<InProcess> {
    let conn = db::open_in_memory().expect("open store");
    ApiClient::in_process(AppState::new(conn))
}

fn payload(name: &str, grade: &str) -> StudentPayload {
    StudentPayload {
        name: name.to_string(),
        grade: grade.to_string(),
        ..Default::default()
    }
}

#[test]
fn create_with_name_and_grade_defaults_everything_else() {
    let mut api = client();
    let created = api.students_create(&payload("Ann", "5")).expect("create");

    assert!(created.id > 0);
    assert_eq!(created.name, "Ann");
    assert_eq!(created.grade, "5");
    assert_eq!(created.payment_status, PaymentStatus::Unpaid);
    assert_eq!(created.class_id, None);
    assert_eq!(created.age, None);
    assert_eq!(created.phone, None);
    assert_eq!(created.address, None);
    assert!(!created.created_at.is_empty());
}

#[test]
fn create_without_grade_is_a_validation_error_and_persists_nothing() {
    let mut api = client();
    let err = api
        .students_create(&payload("Ann", ""))
        .expect_err("missing grade");
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.to_string(), "Name and grade are required");
    assert!(api.students_list().expect("list").is_empty());
}

#[test]
fn list_is_newest_first() {
    let mut api = client();
    let first = api.students_create(&payload("Ann", "5")).expect("create");
    let second = api.students_create(&payload("Ben", "6")).expect("create");

    let students = api.students_list().expect("list");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, second.id);
    assert_eq!(students[1].id, first.id);
}

#[test]
fn get_returns_the_row_or_not_found() {
    let mut api = client();
    let created = api.students_create(&payload("Ann", "5")).expect("create");

    let fetched = api.students_get(created.id).expect("get");
    assert_eq!(fetched, created);

    let err = api.students_get(created.id + 99).expect_err("missing id");
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.to_string(), "Student not found");
}

#[test]
fn update_replaces_fields_and_reports_missing_rows() {
    let mut api = client();
    let created = api.students_create(&payload("Ann", "5")).expect("create");

    let updated = api
        .students_update(
            created.id,
            &StudentPayload {
                name: "Ann Lee".to_string(),
                grade: "6".to_string(),
                age: Some(12),
                payment_status: PaymentStatus::Paid,
                ..Default::default()
            },
        )
        .expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ann Lee");
    assert_eq!(updated.grade, "6");
    assert_eq!(updated.age, Some(12));
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    // The creation timestamp is immutable.
    assert_eq!(updated.created_at, created.created_at);

    let err = api
        .students_update(created.id + 99, &payload("Ghost", "1"))
        .expect_err("missing id");
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn delete_removes_the_row_once() {
    let mut api = client();
    let created = api.students_create(&payload("Ann", "5")).expect("create");

    let message = api.students_delete(created.id).expect("delete");
    assert_eq!(message, "Student deleted successfully");
    assert!(api.students_list().expect("list").is_empty());

    let err = api.students_delete(created.id).expect_err("already gone");
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn unknown_payment_status_is_rejected_at_the_boundary() {
    let conn = db::open_in_memory().expect("open store");
    let mut transport = InProcess::new(AppState::new(conn));

    let err = transport
        .call(
            "students.create",
            json!({ "name": "Ann", "grade": "5", "paymentStatus": "Overdue" }),
        )
        .expect_err("bad enum label");
    assert!(matches!(err, ApiError::Validation(_)));

    let students = transport.call("students.list", json!({})).expect("list");
    assert_eq!(students, json!([]));
}

#[test]
fn unknown_method_is_a_request_failure() {
    let conn = db::open_in_memory().expect("open store");
    let mut transport = InProcess::new(AppState::new(conn));

    let err = transport
        .call("students.reorder", json!({}))
        .expect_err("unknown method");
    match err {
        ApiError::RequestFailed(msg) => assert!(msg.contains("unknown method")),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}
