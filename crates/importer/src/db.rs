//! SQLite access for the import utility.

use crate::error::ImportError;
use crate::shape::ToolPayload;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Open (or create) the web UI database.
pub fn open(path: &Path) -> Result<Connection, ImportError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(Duration::from_secs(30))?;
    Ok(conn)
}

/// Create the `tool` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> Result<(), ImportError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tool (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            content TEXT NOT NULL,
            specs TEXT,
            meta TEXT,
            valves TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Owning user for tools whose export carries none.
///
/// Prefers the first admin in the `user` table, then any user, then a
/// generated identifier. A missing `user` table counts as no users.
pub fn default_user_id(conn: &Connection) -> String {
    for sql in [
        "SELECT id FROM user WHERE role = 'admin' LIMIT 1",
        "SELECT id FROM user LIMIT 1",
    ] {
        let found = conn
            .query_row(sql, [], |row| row.get::<_, String>(0))
            .optional()
            .ok()
            .flatten();
        if let Some(id) = found {
            return id;
        }
    }

    let generated = Uuid::new_v4().to_string();
    debug!(user_id = %generated, "no users in database, generated an owner id");
    generated
}

/// Insert or replace one tool row, keyed by the tool id.
pub fn upsert_tool(
    conn: &Connection,
    tool: &ToolPayload,
    user_id: &str,
) -> Result<(), ImportError> {
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT OR REPLACE INTO tool
            (id, user_id, name, content, specs, meta, valves, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tool.id,
            user_id,
            tool.name,
            tool.content,
            "[]",
            tool.meta.to_string(),
            "{}",
            now,
            now,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn memory_conn() -> Connection {
        Connection::open_in_memory().expect("open in-memory database")
    }

    #[test]
    fn default_user_prefers_admins() {
        let conn = memory_conn();
        conn.execute_batch(
            "CREATE TABLE user (id TEXT PRIMARY KEY, role TEXT NOT NULL);
             INSERT INTO user VALUES ('u-plain', 'user');
             INSERT INTO user VALUES ('u-admin', 'admin');",
        )
        .unwrap();

        assert_eq!(default_user_id(&conn), "u-admin");
    }

    #[test]
    fn default_user_falls_back_to_any_user() {
        let conn = memory_conn();
        conn.execute_batch(
            "CREATE TABLE user (id TEXT PRIMARY KEY, role TEXT NOT NULL);
             INSERT INTO user VALUES ('u-plain', 'user');",
        )
        .unwrap();

        assert_eq!(default_user_id(&conn), "u-plain");
    }

    #[test]
    fn missing_user_table_generates_an_id() {
        let conn = memory_conn();
        let id = default_user_id(&conn);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn upsert_replaces_on_conflict() {
        let conn = memory_conn();
        ensure_schema(&conn).unwrap();

        let mut tool = ToolPayload {
            id: "t1".to_string(),
            name: "first".to_string(),
            content: "...".to_string(),
            meta: json!({}),
        };
        upsert_tool(&conn, &tool, "u1").unwrap();

        tool.name = "second".to_string();
        upsert_tool(&conn, &tool, "u1").unwrap();

        let (count, name): (i64, String) = conn
            .query_row("SELECT COUNT(*), MAX(name) FROM tool", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(name, "second");
    }
}
