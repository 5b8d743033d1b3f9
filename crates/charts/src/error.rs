//! Error type for chart rendering.

use thiserror::Error;

/// Errors produced by a single rendering routine.
///
/// These are chart-local: the dispatcher catches them, logs them and moves
/// on to the next requested kind.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The table has no rows, so there is nothing to plot.
    #[error("summary table has no rows to plot")]
    EmptyTable,

    /// The column this chart kind is centered on is not in the table.
    #[error("required column '{0}' is not present in the summary table")]
    MissingColumn(&'static str),

    /// The plotting backend failed while drawing or writing the artifact.
    #[error("failed to render chart: {0}")]
    Backend(String),
}

/// Convert any backend error into the chart-local error type.
pub(crate) fn backend_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Backend(err.to_string())
}
