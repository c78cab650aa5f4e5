use crate::api::error::{codes, err, ok};
use crate::api::handlers::students::{student_from_row, STUDENT_COLUMNS};
use crate::api::types::{AppState, Request};
use crate::model::{Class, ClassDetail, ClassPayload};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use serde_json::json;

fn class_from_row(row: &Row<'_>) -> rusqlite::Result<Class> {
    Ok(Class {
        id: row.get(0)?,
        class_name: row.get(1)?,
        grade_level: row.get(2)?,
        teacher_name: row.get(3)?,
        room_number: row.get(4)?,
        created_at: row.get(5)?,
        student_count: row.get(6)?,
    })
}

fn param_id(req: &Request) -> Option<i64> {
    req.params.get("id").and_then(|v| v.as_i64())
}

fn parse_payload(req: &Request) -> Result<ClassPayload, String> {
    let payload: ClassPayload =
        serde_json::from_value(req.params.clone()).map_err(|e| e.to_string())?;
    let Some(grade_level) = payload.grade_level else {
        return Err("Class name and grade level are required".to_string());
    };
    if payload.class_name.trim().is_empty() {
        return Err("Class name and grade level are required".to_string());
    }
    if !(0..=12).contains(&grade_level) {
        return Err("Grade level must be between 0 and 12".to_string());
    }
    Ok(payload)
}

fn fetch_class(state: &AppState, id: i64) -> rusqlite::Result<Option<Class>> {
    state
        .db()
        .query_row(
            "SELECT
               c.id, c.class_name, c.grade_level, c.teacher_name, c.room_number, c.created_at,
               (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id) AS student_count
             FROM classes c
             WHERE c.id = ?",
            [id],
            class_from_row,
        )
        .optional()
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    // Correlated subquery for the live count, to avoid double-counting
    // from joins. Grades ascending, Kindergarten (0) first.
    let mut stmt = match state.db().prepare(
        "SELECT
           c.id, c.class_name, c.grade_level, c.teacher_name, c.room_number, c.created_at,
           (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id) AS student_count
         FROM classes c
         ORDER BY c.grade_level ASC, c.class_name ASC",
    ) {
        Ok(s) => s,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };

    let rows = stmt
        .query_map([], class_from_row)
        .and_then(|it| it.collect::<Result<Vec<_>, _>>());

    match rows {
        Ok(classes) => match serde_json::to_value(&classes) {
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

    let class = match fetch_class(state, id) {
        Ok(Some(c)) => c,
        Ok(None) => return err(&req.id, codes::NOT_FOUND, "Class not found", None),
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };

    // Embedded roster; an empty class yields an empty array, not an error.
    let mut stmt = match state.db().prepare(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE class_id = ? ORDER BY id DESC"
    )) {
        Ok(s) => s,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };

    let students = stmt
        .query_map([id], student_from_row)
        .and_then(|it| it.collect::<Result<Vec<_>, _>>());

    match students {
        Ok(students) => {
            let detail = ClassDetail { class, students };
            match serde_json::to_value(&detail) {
                Ok(v) => ok(&req.id, v),
                Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
            }
        }
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
        "INSERT INTO classes(class_name, grade_level, teacher_name, room_number, created_at)
         VALUES(?, ?, ?, ?, ?)",
        rusqlite::params![
            payload.class_name.trim(),
            payload.grade_level,
            payload.teacher_name,
            payload.room_number,
            created_at,
        ],
    ) {
        return err(
            &req.id,
            codes::DB_INSERT_FAILED,
            e.to_string(),
            Some(json!({ "table": "classes" })),
        );
    }

    let id = state.db().last_insert_rowid();
    match fetch_class(state, id) {
        Ok(Some(class)) => match serde_json::to_value(&class) {
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
        "UPDATE classes
         SET class_name = ?, grade_level = ?, teacher_name = ?, room_number = ?
         WHERE id = ?",
        rusqlite::params![
            payload.class_name.trim(),
            payload.grade_level,
            payload.teacher_name,
            payload.room_number,
            id,
        ],
    ) {
        Ok(n) => n,
        Err(e) => return err(&req.id, codes::DB_UPDATE_FAILED, e.to_string(), None),
    };

    if changed == 0 {
        return err(&req.id, codes::NOT_FOUND, "Class not found", None);
    }

    match fetch_class(state, id) {
        Ok(Some(class)) => match serde_json::to_value(&class) {
            Ok(v) => ok(&req.id, v),
            Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
        },
        Ok(None) => err(&req.id, codes::NOT_FOUND, "Class not found", None),
        Err(e) => err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_id(req) else {
        return err(&req.id, codes::BAD_PARAMS, "missing id", None);
    };

    let exists: Option<i64> = match state
        .db()
        .query_row("SELECT 1 FROM classes WHERE id = ?", [id], |r| r.get(0))
        .optional()
    {
        Ok(v) => v,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };

    if exists.is_none() {
        return err(&req.id, codes::NOT_FOUND, "Class not found", None);
    }

    let tx = match state.db().unchecked_transaction() {
        Ok(t) => t,
        Err(e) => return err(&req.id, codes::DB_TX_FAILED, e.to_string(), None),
    };

    // Unassign first: students survive their class, with a null reference.
    if let Err(e) = tx.execute(
        "UPDATE students SET class_id = NULL WHERE class_id = ?",
        [id],
    ) {
        let _ = tx.rollback();
        return err(
            &req.id,
            codes::DB_UPDATE_FAILED,
            e.to_string(),
            Some(json!({ "table": "students" })),
        );
    }

    if let Err(e) = tx.execute("DELETE FROM classes WHERE id = ?", [id]) {
        let _ = tx.rollback();
        return err(
            &req.id,
            codes::DB_DELETE_FAILED,
            e.to_string(),
            Some(json!({ "table": "classes" })),
        );
    }

    if let Err(e) = tx.commit() {
        return err(&req.id, codes::DB_COMMIT_FAILED, e.to_string(), None);
    }

    ok(
        &req.id,
        json!({ "message": "Class deleted successfully and students unassigned" }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_list(state, req)),
        "classes.get" => Some(handle_get(state, req)),
        "classes.create" => Some(handle_create(state, req)),
        "classes.update" => Some(handle_update(state, req)),
        "classes.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
