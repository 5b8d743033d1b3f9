//! Directory-level import loop.

use crate::db;
use crate::error::ImportError;
use crate::shape::ExportShape;
use rusqlite::Connection;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Counts for one directory import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Tool payloads upserted.
    pub imported: usize,
    /// Metadata documents skipped.
    pub skipped: usize,
    /// Files that failed to parse or validate.
    pub failed: usize,
}

/// Import every `.json` file under `tools_dir` into the database.
///
/// Per-file failures are logged and counted; they do not stop the
/// remaining files. The `tool` table is created when absent.
///
/// # Errors
///
/// Only directory-level problems are returned: an unreadable directory or
/// a failure creating the schema.
pub fn import_dir(conn: &Connection, tools_dir: &Path) -> Result<ImportStats, ImportError> {
    let entries = fs::read_dir(tools_dir).map_err(|source| ImportError::Io {
        path: tools_dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    db::ensure_schema(conn)?;
    let default_user = db::default_user_id(conn);
    info!(user_id = %default_user, files = files.len(), "importing tool exports");

    let mut stats = ImportStats::default();
    for path in &files {
        match import_file(conn, path, &default_user) {
            Ok(Some(id)) => {
                info!(path = %path.display(), tool_id = %id, "imported tool");
                stats.imported += 1;
            }
            Ok(None) => {
                info!(path = %path.display(), "skipped metadata file");
                stats.skipped += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to import file");
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// Import one export file; `Ok(None)` means a skipped metadata document.
///
/// # Errors
///
/// Unreadable or unparsable files, unrecognized shapes, payloads missing
/// required fields, and database failures.
pub fn import_file(
    conn: &Connection,
    path: &Path,
    default_user_id: &str,
) -> Result<Option<String>, ImportError> {
    let raw = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| ImportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let shape = ExportShape::classify(&value)?;
    match shape.into_tool(default_user_id) {
        Some((tool, user_id)) => {
            db::upsert_tool(conn, &tool, &user_id)?;
            Ok(Some(tool.id))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn memory_conn() -> Connection {
        Connection::open_in_memory().expect("open in-memory database")
    }

    fn write_json(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write fixture");
    }

    #[test]
    fn imports_all_three_shapes_and_skips_metadata() {
        let conn = memory_conn();
        let dir = TempDir::new().unwrap();
        write_json(
            &dir,
            "wrapped_list.json",
            r#"[{"tool": {"id": "t1", "name": "a", "content": "..."}, "userId": "u-9"}]"#,
        );
        write_json(
            &dir,
            "wrapped.json",
            r#"{"tool": {"id": "t2", "name": "b", "content": "..."}}"#,
        );
        write_json(
            &dir,
            "direct.json",
            r#"{"id": "t3", "name": "c", "content": "..."}"#,
        );
        write_json(
            &dir,
            "metadata.json",
            r#"{"description": "pack", "manifest": {}}"#,
        );
        write_json(&dir, "notes.txt", "not json, not picked up");

        let stats = import_dir(&conn, dir.path()).unwrap();
        assert_eq!(
            stats,
            ImportStats {
                imported: 3,
                skipped: 1,
                failed: 0
            }
        );

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tool", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        // The wrapped list carried its own owner; the others got a default.
        let owner: String = conn
            .query_row("SELECT user_id FROM tool WHERE id = 't1'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(owner, "u-9");
    }

    #[test]
    fn a_bad_file_does_not_stop_the_rest() {
        let conn = memory_conn();
        let dir = TempDir::new().unwrap();
        write_json(&dir, "broken.json", "{ not json");
        write_json(&dir, "incomplete.json", r#"{"tool": {"id": "t1"}}"#);
        write_json(
            &dir,
            "ok.json",
            r#"{"id": "t2", "name": "fine", "content": "..."}"#,
        );

        let stats = import_dir(&conn, dir.path()).unwrap();
        assert_eq!(
            stats,
            ImportStats {
                imported: 1,
                skipped: 0,
                failed: 2
            }
        );
    }

    #[test]
    fn reimporting_replaces_rather_than_duplicates() {
        let conn = memory_conn();
        let dir = TempDir::new().unwrap();
        write_json(
            &dir,
            "tool.json",
            r#"{"id": "t1", "name": "v1", "content": "..."}"#,
        );
        import_dir(&conn, dir.path()).unwrap();

        write_json(
            &dir,
            "tool.json",
            r#"{"id": "t1", "name": "v2", "content": "..."}"#,
        );
        import_dir(&conn, dir.path()).unwrap();

        let (count, name): (i64, String) = conn
            .query_row("SELECT COUNT(*), MAX(name) FROM tool", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(name, "v2");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let conn = memory_conn();
        let err = import_dir(&conn, Path::new("/nonexistent/tools")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
