use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Per-daemon state. The connection is constructed once at startup and
/// passed in; handlers never reach for a global.
pub struct AppState {
    db: Connection,
}

impl AppState {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Connection {
        &self.db
    }
}
