// Copyright 2025 LLM Benchviz Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types shared by the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving paths or loading the summary table.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The summary file could not be opened.
    #[error("could not read summary file at {}: {source}", .path.display())]
    SummaryRead {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The summary file opened but did not parse as CSV.
    #[error("could not parse summary file at {}: {source}", .path.display())]
    SummaryParse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// The summary file has no model column, which every chart needs.
    #[error("summary file at {} is missing the required '{column}' column", .path.display())]
    MissingModelColumn {
        /// Path that was loaded.
        path: PathBuf,
        /// Name of the required column.
        column: &'static str,
    },

    /// The output directory could not be created.
    #[error("could not create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        /// Directory that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
