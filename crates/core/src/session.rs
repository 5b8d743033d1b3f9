// Copyright 2025 LLM Benchviz Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark session discovery and path resolution.
//!
//! A session is one benchmark run's output directory, named with the
//! timestamp of the run (`YYYY-MM-DD_HH:MM:SS`). Sessions are only ever
//! discovered here; nothing in this crate creates or mutates them. Because
//! the name format is zero-padded and fixed-width, sorting names
//! lexicographically descending is the same as sorting chronologically,
//! most recent first.

use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the per-session summary table.
pub const SUMMARY_FILE: &str = "summary.csv";

/// Subdirectory of the base reports directory holding the bundled sample.
pub const SAMPLE_DIR: &str = "sample";

/// File name of the bundled sample summary table.
pub const SAMPLE_SUMMARY_FILE: &str = "sample_summary.csv";

/// Matches session directory names at the start of the string.
static SESSION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}_\d{2}:\d{2}:\d{2}").expect("session name pattern is valid")
});

/// How the caller picked the session to visualize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSelection {
    /// No session was requested; fall back to the bundled sample data.
    None,
    /// Use the most recent discovered session, or the sample when none exist.
    Latest,
    /// Use the session with this exact name.
    Named(String),
}

/// Resolved input/output locations for one visualization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Location of the summary table to load.
    pub summary_path: PathBuf,
    /// Directory chart artifacts are written into.
    pub output_dir: PathBuf,
}

/// List all session names under `base_dir`, most recent first.
///
/// Only immediate subdirectories whose names match the timestamp pattern
/// are included. A missing or unreadable base directory yields an empty
/// list rather than an error.
pub fn list_sessions(base_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(base_dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(base_dir = %base_dir.display(), %err, "session base directory not readable");
            return Vec::new();
        }
    };

    let mut sessions: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| SESSION_NAME.is_match(name))
        .collect();

    sessions.sort_unstable_by(|a, b| b.cmp(a));
    sessions
}

/// Return the most recent session name under `base_dir`, if any exist.
pub fn latest_session(base_dir: &Path) -> Option<String> {
    list_sessions(base_dir).into_iter().next()
}

/// Path of the summary table that a given session is expected to contain.
pub fn session_summary_path(base_dir: &Path, session: &str) -> PathBuf {
    base_dir.join(session).join(SUMMARY_FILE)
}

/// Resolve the summary/output path pair for a run.
///
/// Precedence, applied independently to each path: an explicit override
/// wins verbatim; otherwise the selected session's directory is used;
/// otherwise the bundled sample location. The output directory is created
/// (with intermediate directories) as a side effect; an already existing
/// directory is not an error.
///
/// Resolution only computes paths. It does not check that the summary file
/// exists; a bad session name surfaces as a load error later.
pub fn resolve_paths(
    base_dir: &Path,
    explicit_summary: Option<&Path>,
    explicit_output: Option<&Path>,
    selection: &SessionSelection,
) -> Result<SessionPaths, CoreError> {
    let session = match selection {
        SessionSelection::None => None,
        SessionSelection::Latest => latest_session(base_dir),
        SessionSelection::Named(name) => Some(name.clone()),
    };

    let summary_path = match explicit_summary {
        Some(path) => path.to_path_buf(),
        None => match &session {
            Some(name) => session_summary_path(base_dir, name),
            None => base_dir.join(SAMPLE_DIR).join(SAMPLE_SUMMARY_FILE),
        },
    };

    let output_dir = match explicit_output {
        Some(path) => path.to_path_buf(),
        None => match &session {
            Some(name) => base_dir.join(name),
            None => base_dir.join(SAMPLE_DIR),
        },
    };

    fs::create_dir_all(&output_dir).map_err(|source| CoreError::CreateOutputDir {
        path: output_dir.clone(),
        source,
    })?;

    Ok(SessionPaths {
        summary_path,
        output_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base_with_sessions(names: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("create temp dir");
        for name in names {
            fs::create_dir(dir.path().join(name)).expect("create session dir");
        }
        dir
    }

    #[test]
    fn lists_only_matching_directories_descending() {
        let base = base_with_sessions(&[
            "2024-03-01_10:00:00",
            "2024-03-02_09:30:00",
            "2024-02-28_23:59:59",
            "notes",
            "2024-03-0",
        ]);
        // A matching name that is a file, not a directory, must be excluded.
        fs::write(base.path().join("2024-03-03_00:00:00"), b"").unwrap();

        let sessions = list_sessions(base.path());
        assert_eq!(
            sessions,
            vec![
                "2024-03-02_09:30:00".to_string(),
                "2024-03-01_10:00:00".to_string(),
                "2024-02-28_23:59:59".to_string(),
            ]
        );
    }

    #[test]
    fn missing_base_directory_is_zero_sessions() {
        let base = TempDir::new().unwrap();
        let gone = base.path().join("never-created");
        assert!(list_sessions(&gone).is_empty());
        assert_eq!(latest_session(&gone), None);
    }

    #[test]
    fn latest_is_lexicographically_greatest() {
        let base = base_with_sessions(&["2024-01-01_00:00:00", "2024-06-15_12:00:00"]);
        assert_eq!(
            latest_session(base.path()),
            Some("2024-06-15_12:00:00".to_string())
        );
    }

    #[test]
    fn explicit_summary_path_wins_over_session_flags() {
        let base = base_with_sessions(&["2024-03-02_09:30:00"]);
        let override_path = Path::new("/tmp/elsewhere/summary.csv");

        let paths = resolve_paths(
            base.path(),
            Some(override_path),
            None,
            &SessionSelection::Latest,
        )
        .unwrap();

        assert_eq!(paths.summary_path, override_path);
        // The output path still follows the session because only the summary
        // was overridden.
        assert_eq!(paths.output_dir, base.path().join("2024-03-02_09:30:00"));
    }

    #[test]
    fn named_session_resolves_without_checking_existence() {
        let base = TempDir::new().unwrap();
        let paths = resolve_paths(
            base.path(),
            None,
            None,
            &SessionSelection::Named("2030-01-01_00:00:00".to_string()),
        )
        .unwrap();

        assert_eq!(
            paths.summary_path,
            base.path().join("2030-01-01_00:00:00").join(SUMMARY_FILE)
        );
        assert_eq!(paths.output_dir, base.path().join("2030-01-01_00:00:00"));
    }

    #[test]
    fn no_selection_falls_back_to_sample() {
        let base = TempDir::new().unwrap();
        let paths = resolve_paths(base.path(), None, None, &SessionSelection::None).unwrap();
        assert_eq!(
            paths.summary_path,
            base.path().join(SAMPLE_DIR).join(SAMPLE_SUMMARY_FILE)
        );
        assert_eq!(paths.output_dir, base.path().join(SAMPLE_DIR));
    }

    #[test]
    fn latest_with_no_sessions_falls_back_to_sample() {
        let base = TempDir::new().unwrap();
        let paths = resolve_paths(base.path(), None, None, &SessionSelection::Latest).unwrap();
        assert_eq!(paths.output_dir, base.path().join(SAMPLE_DIR));
    }

    #[test]
    fn output_directory_is_created() {
        let base = TempDir::new().unwrap();
        let out = base.path().join("charts").join("nested");
        let paths = resolve_paths(base.path(), None, Some(&out), &SessionSelection::None).unwrap();
        assert!(paths.output_dir.is_dir());

        // Resolving again with the directory already present must succeed.
        resolve_paths(base.path(), None, Some(&out), &SessionSelection::None).unwrap();
    }
}
