use rusqlite::Connection;
use std::path::Path;

/// Opens (creating if needed) the SQLite store inside the data directory.
pub fn open_db(data_dir: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("schooldesk.sqlite3");
    let conn = Connection::open(db_path)?;
    init_connection(&conn)?;
    Ok(conn)
}

/// In-memory store with the same schema. Used by tests and embedders.
pub fn open_in_memory() -> anyhow::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_connection(&conn)?;
    Ok(conn)
}

fn init_connection(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS classes(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            class_name TEXT NOT NULL,
            grade_level INTEGER NOT NULL,
            teacher_name TEXT,
            room_number TEXT,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // class_id is nullable on purpose: deleting a class unassigns its
    // students instead of deleting them, so no ON DELETE action here.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            grade TEXT NOT NULL,
            class_id INTEGER,
            age INTEGER,
            phone TEXT,
            address TEXT,
            payment_status TEXT NOT NULL DEFAULT 'Unpaid',
            created_at TEXT NOT NULL,
            FOREIGN KEY(class_id) REFERENCES classes(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_class ON students(class_id)",
        [],
    )?;

    Ok(())
}
