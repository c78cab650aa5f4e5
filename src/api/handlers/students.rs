use crate::api::error::{codes, err, ok};
use crate::api::types::{AppState, Request};
use crate::model::{Student, StudentPayload};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use serde_json::json;

pub(crate) const STUDENT_COLUMNS: &str =
    "id, name, grade, class_id, age, phone, address, payment_status, created_at";

pub(crate) fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        grade: row.get(2)?,
        class_id: row.get(3)?,
        age: row.get(4)?,
        phone: row.get(5)?,
        address: row.get(6)?,
        payment_status: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn param_id(req: &Request) -> Option<i64> {
    req.params.get("id").and_then(|v| v.as_i64())
}

fn parse_payload(req: &Request) -> Result<StudentPayload, String> {
    let payload: StudentPayload =
        serde_json::from_value(req.params.clone()).map_err(|e| e.to_string())?;
    if payload.name.trim().is_empty() || payload.grade.trim().is_empty() {
        return Err("Name and grade are required".to_string());
    }
    Ok(payload)
}

fn fetch_student(state: &AppState, id: i64) -> rusqlite::Result<Option<Student>> {
    state
        .db()
        .query_row(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"),
            [id],
            student_from_row,
        )
        .optional()
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    // Newest first, matching the dashboard's default ordering.
    let mut stmt = match state
        .db()
        .prepare(&format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id DESC"))
    {
        Ok(s) => s,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };

    let rows = stmt
        .query_map([], student_from_row)
        .and_then(|it| it.collect::<Result<Vec<_>, _>>());

    match rows {
        Ok(students) => match serde_json::to_value(&students) {
            Ok(v) => ok(&req.id, v),
            Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
        },
        Err(e) => err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    }
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_id(req) else {
        return err(&req.id, codes::BAD_PARAMS, "missing id", None);
    };

    match fetch_student(state, id) {
        Ok(Some(student)) => match serde_json::to_value(&student) {
            Ok(v) => ok(&req.id, v),
            Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
        },
        Ok(None) => err(&req.id, codes::NOT_FOUND, "Student not found", None),
        Err(e) => err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payload = match parse_payload(req) {
        Ok(p) => p,
        Err(msg) => return err(&req.id, codes::VALIDATION, msg, None),
    };

    let created_at = Utc::now().to_rfc3339();
    if let Err(e) = state.db().execute(
        "INSERT INTO students(name, grade, class_id, age, phone, address, payment_status, created_at)
         VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            payload.name.trim(),
            payload.grade.trim(),
            payload.class_id,
            payload.age,
            payload.phone,
            payload.address,
            payload.payment_status,
            created_at,
        ],
    ) {
        return err(
            &req.id,
            codes::DB_INSERT_FAILED,
            e.to_string(),
            Some(json!({ "table": "students" })),
        );
    }

    let id = state.db().last_insert_rowid();
    match fetch_student(state, id) {
        Ok(Some(student)) => match serde_json::to_value(&student) {
            Ok(v) => ok(&req.id, v),
            Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
        },
        Ok(None) => err(&req.id, codes::DB_QUERY_FAILED, "inserted row vanished", None),
        Err(e) => err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_id(req) else {
        return err(&req.id, codes::BAD_PARAMS, "missing id", None);
    };
    let payload = match parse_payload(req) {
        Ok(p) => p,
        Err(msg) => return err(&req.id, codes::VALIDATION, msg, None),
    };

    let changed = match state.db().execute(
        "UPDATE students
         SET name = ?, grade = ?, class_id = ?, age = ?, phone = ?, address = ?, payment_status = ?
         WHERE id = ?",
        rusqlite::params![
            payload.name.trim(),
            payload.grade.trim(),
            payload.class_id,
            payload.age,
            payload.phone,
            payload.address,
            payload.payment_status,
            id,
        ],
    ) {
        Ok(n) => n,
        Err(e) => return err(&req.id, codes::DB_UPDATE_FAILED, e.to_string(), None),
    };

    if changed == 0 {
        return err(&req.id, codes::NOT_FOUND, "Student not found", None);
    }

    match fetch_student(state, id) {
        Ok(Some(student)) => match serde_json::to_value(&student) {
            Ok(v) => ok(&req.id, v),
            Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
        },
        Ok(None) => err(&req.id, codes::NOT_FOUND, "Student not found", None),
        Err(e) => err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_id(req) else {
        return err(&req.id, codes::BAD_PARAMS, "missing id", None);
    };

    let deleted = match state.db().execute("DELETE FROM students WHERE id = ?", [id]) {
        Ok(n) => n,
        Err(e) => return err(&req.id, codes::DB_DELETE_FAILED, e.to_string(), None),
    };

    if deleted == 0 {
        return err(&req.id, codes::NOT_FOUND, "Student not found", None);
    }

    ok(&req.id, json!({ "message": "Student deleted successfully" }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.get" => Some(handle_get(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
