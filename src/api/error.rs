use serde_json::json;

/// Wire error codes. `validation` and `not_found` map onto the client's
/// typed conditions; everything else surfaces as a generic request failure.
pub mod codes {
    pub const BAD_JSON: &str = "bad_json";
    pub const BAD_PARAMS: &str = "bad_params";
    pub const VALIDATION: &str = "validation";
    pub const NOT_FOUND: &str = "not_found";
    pub const DB_QUERY_FAILED: &str = "db_query_failed";
    pub const DB_INSERT_FAILED: &str = "db_insert_failed";
    pub const DB_UPDATE_FAILED: &str = "db_update_failed";
    pub const DB_DELETE_FAILED: &str = "db_delete_failed";
    pub const DB_TX_FAILED: &str = "db_tx_failed";
    pub const DB_COMMIT_FAILED: &str = "db_commit_failed";
    pub const SERIALIZE_FAILED: &str = "serialize_failed";
    pub const NOT_IMPLEMENTED: &str = "not_implemented";
}

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}
