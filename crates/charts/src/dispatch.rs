//! Chart-generation dispatch.
//!
//! The dispatcher owns the two-step selection rule (main kinds, then GPU
//! kinds) and the failure policy: a rendering failure in one kind is
//! logged and recorded but never stops the remaining kinds.

use crate::error::ChartError;
use crate::kind::ChartKind;
use crate::render;
use crate::request::ChartRequest;
use llm_benchviz_core::table::{columns, SummaryTable};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What one dispatch produced.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Artifacts written, in render order.
    pub rendered: Vec<PathBuf>,
    /// Kinds that failed, with the chart-local error.
    pub failures: Vec<(ChartKind, ChartError)>,
    /// GPU kinds were requested but skipped because the power column is
    /// absent or holds no numeric values.
    pub gpu_skipped: bool,
}

/// Render every chart the request selects into `output_dir`.
///
/// Artifacts land at deterministic per-kind paths, so re-dispatching with
/// the same inputs overwrites prior output instead of duplicating it. GPU
/// kinds are gated on the power column actually holding numeric data;
/// when it does not, they are skipped with a notice rather than failing
/// the run.
pub fn dispatch(table: &SummaryTable, request: &ChartRequest, output_dir: &Path) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();

    for kind in request.selected_kinds() {
        render_one(table, request, output_dir, kind, &mut outcome);
    }

    let gpu_kinds = request.gpu_kinds();
    if !gpu_kinds.is_empty() {
        if table.coerced_rows(columns::GPU_POWER_W).is_empty() {
            if table.has_column(columns::GPU_POWER_W) {
                warn!("no numeric GPU power values in summary file, skipping GPU charts");
            } else {
                warn!("GPU power column not found in summary file, skipping GPU charts");
            }
            warn!("to collect GPU metrics, run the benchmark with --gpu-metrics");
            outcome.gpu_skipped = true;
        } else {
            for kind in gpu_kinds {
                render_one(table, request, output_dir, kind, &mut outcome);
            }
        }
    }

    outcome
}

fn render_one(
    table: &SummaryTable,
    request: &ChartRequest,
    output_dir: &Path,
    kind: ChartKind,
    outcome: &mut DispatchOutcome,
) {
    let path = kind.artifact_path(output_dir, request.format);
    info!(chart = %kind, path = %path.display(), "rendering chart");

    match render::render(kind, table, &path, request.format, request.dpi) {
        Ok(()) => outcome.rendered.push(path),
        Err(err) => {
            warn!(chart = %kind, %err, "chart failed, continuing with remaining charts");
            outcome.failures.push((kind, err));
        }
    }
}
