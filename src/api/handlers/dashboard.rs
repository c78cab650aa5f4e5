use crate::api::error::{codes, err, ok};
use crate::api::types::{AppState, Request};
use crate::model::DashboardStats;

fn count(state: &AppState, sql: &str) -> rusqlite::Result<i64> {
    state.db().query_row(sql, [], |r| r.get(0))
}

fn handle_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let total_students = match count(state, "SELECT COUNT(*) FROM students") {
        Ok(n) => n,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };
    let paid_students = match count(
        state,
        "SELECT COUNT(*) FROM students WHERE payment_status = 'Paid'",
    ) {
        Ok(n) => n,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };
    let unpaid_students = match count(
        state,
        "SELECT COUNT(*) FROM students WHERE payment_status = 'Unpaid'",
    ) {
        Ok(n) => n,
        Err(e) => return err(&req.id, codes::DB_QUERY_FAILED, e.to_string(), None),
    };

    // Teachers and profit stay zero until their tables exist.
    let stats = DashboardStats {
        total_students,
        total_teachers: 0,
        profit: 0,
        paid_students,
        unpaid_students,
    };

    match serde_json::to_value(&stats) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, codes::SERIALIZE_FAILED, e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.stats" => Some(handle_stats(state, req)),
        _ => None,
    }
}
