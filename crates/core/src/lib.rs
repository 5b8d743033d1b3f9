// Copyright 2025 LLM Benchviz Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for LLM Benchviz.
//!
//! This crate provides the two building blocks shared by the visualization
//! tooling:
//!
//! - [`session`] - discovery of timestamped benchmark sessions and
//!   resolution of the summary/output path pair for a run
//! - [`table`] - the per-model summary table loaded from CSV
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use llm_benchviz_core::{resolve_paths, SessionSelection, SummaryTable};
//!
//! let paths = resolve_paths(
//!     Path::new("benchmark-reports"),
//!     None,
//!     None,
//!     &SessionSelection::Latest,
//! )?;
//! let table = SummaryTable::from_csv(&paths.summary_path)?;
//! println!("{} models", table.len());
//! # Ok::<(), llm_benchviz_core::CoreError>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod session;
pub mod table;

pub use error::CoreError;
pub use session::{
    latest_session, list_sessions, resolve_paths, session_summary_path, SessionPaths,
    SessionSelection,
};
pub use table::SummaryTable;
