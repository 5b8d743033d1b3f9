//! Chart generation for LLM Benchviz.
//!
//! This crate turns a loaded [`SummaryTable`](llm_benchviz_core::SummaryTable)
//! into image artifacts. The pieces are:
//!
//! - [`kind`] - the fixed catalogue of renderable chart kinds and output
//!   formats
//! - [`request`] - the set of boolean flags selecting which kinds to render
//! - [`dispatch`] - runs the selected rendering routines, isolating
//!   per-chart failures
//! - [`render`] - the plotters-based routines themselves
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use llm_benchviz_core::SummaryTable;
//! use llm_benchviz_charts::{dispatch, ChartRequest};
//!
//! let table = SummaryTable::from_csv(Path::new("summary.csv"))?;
//! let request = ChartRequest::default();
//! let outcome = dispatch(&table, &request, Path::new("charts"));
//! println!("{} charts rendered", outcome.rendered.len());
//! # Ok::<(), llm_benchviz_core::CoreError>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod kind;
pub mod render;
pub mod request;

pub use dispatch::{dispatch, DispatchOutcome};
pub use error::ChartError;
pub use kind::{ChartFormat, ChartKind};
pub use request::ChartRequest;
