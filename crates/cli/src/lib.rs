//! CLI for LLM Benchviz.
//!
//! This crate wires the two-step pipeline together: resolve the
//! summary/output path pair for the requested session, load the summary
//! table, and dispatch the requested charts. Table loading failures are
//! fatal; chart failures are reported and do not affect the exit code.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use clap::Parser;
use colored::Colorize;
use llm_benchviz_charts::request::DEFAULT_DPI;
use llm_benchviz_charts::{dispatch, ChartFormat, ChartRequest};
use llm_benchviz_core::{
    latest_session, list_sessions, resolve_paths, session_summary_path, SessionSelection,
    SummaryTable,
};
use std::path::{Path, PathBuf};

/// Visualize benchmark summaries for specific sessions.
#[derive(Parser, Debug)]
#[command(name = "benchviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the summary CSV (overrides session-based path).
    #[arg(long)]
    pub summary_path: Option<PathBuf>,

    /// Directory to save output charts (overrides session-based path).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Base directory holding timestamped session subdirectories.
    #[arg(long, default_value = "benchmark-reports")]
    pub reports_dir: PathBuf,

    /// Specific session timestamp to visualize (YYYY-MM-DD_HH:MM:SS format).
    #[arg(long)]
    pub session: Option<String>,

    /// Use the latest session automatically.
    #[arg(long)]
    pub latest: bool,

    /// List all available sessions and exit.
    #[arg(long)]
    pub list_sessions: bool,

    /// Generate the 2x2 overview chart.
    #[arg(long)]
    pub overview: bool,

    /// Generate the performance comparison chart.
    #[arg(long)]
    pub performance: bool,

    /// Generate the efficiency score chart.
    #[arg(long)]
    pub efficiency: bool,

    /// Generate the memory usage chart with efficiency annotations.
    #[arg(long)]
    pub memory: bool,

    /// Generate all visualization types.
    #[arg(long)]
    pub all: bool,

    /// Include GPU metrics in charts.
    #[arg(long)]
    pub include_gpu: bool,

    /// Generate the dedicated GPU power usage chart.
    #[arg(long)]
    pub gpu_chart: bool,

    /// Output file format (png or svg).
    #[arg(long, default_value = "png")]
    pub format: ChartFormat,

    /// Raster density for bitmap output.
    #[arg(long, default_value_t = DEFAULT_DPI)]
    pub dpi: u32,

    /// Don't print the per-chart artifact listing, just save the charts.
    #[arg(long)]
    pub no_display: bool,
}

impl Cli {
    /// The chart request these flags describe.
    pub fn chart_request(&self) -> ChartRequest {
        ChartRequest {
            overview: self.overview,
            memory: self.memory,
            performance: self.performance,
            efficiency: self.efficiency,
            all: self.all,
            include_gpu: self.include_gpu,
            gpu_chart: self.gpu_chart,
            format: self.format,
            dpi: self.dpi,
        }
    }
}

/// Run the CLI with the process arguments.
///
/// # Errors
///
/// Returns an error on fatal load or resolution failures; the caller maps
/// this to a non-zero exit code.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_sessions {
        print_sessions(&cli.reports_dir);
        return Ok(());
    }

    let selection = select_session(&cli);
    let paths = resolve_paths(
        &cli.reports_dir,
        cli.summary_path.as_deref(),
        cli.output_dir.as_deref(),
        &selection,
    )?;

    println!("Using summary file: {}", paths.summary_path.display());
    println!("Saving charts to: {}", paths.output_dir.display());

    let table = SummaryTable::from_csv(&paths.summary_path)?;

    let outcome = dispatch(&table, &cli.chart_request(), &paths.output_dir);

    if !cli.no_display {
        for path in &outcome.rendered {
            println!("  wrote {}", path.display());
        }
    }
    for (kind, err) in &outcome.failures {
        eprintln!("warning: {kind} chart failed: {err}");
    }

    println!("Visualization complete! Check the output directory for generated charts.");
    Ok(())
}

fn select_session(cli: &Cli) -> SessionSelection {
    if let Some(name) = &cli.session {
        return SessionSelection::Named(name.clone());
    }
    if cli.latest {
        return match latest_session(&cli.reports_dir) {
            Some(name) => {
                println!("Using latest session: {name}");
                SessionSelection::Named(name)
            }
            None => {
                println!("No sessions found. Using sample data.");
                SessionSelection::None
            }
        };
    }
    SessionSelection::None
}

/// Print each discovered session with a marker for summary-file presence.
fn print_sessions(base_dir: &Path) {
    let sessions = list_sessions(base_dir);
    if sessions.is_empty() {
        println!("No benchmark sessions found.");
        return;
    }

    println!("Available benchmark sessions ({}):", sessions.len());
    for session in &sessions {
        let marker = if session_summary_path(base_dir, session).exists() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("  {marker} {session}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use llm_benchviz_charts::ChartKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_the_chart_request() {
        let cli = Cli::parse_from([
            "benchviz",
            "--memory",
            "--include-gpu",
            "--format",
            "svg",
            "--dpi",
            "150",
        ]);
        let request = cli.chart_request();

        assert_eq!(request.selected_kinds(), vec![ChartKind::Memory]);
        assert_eq!(request.gpu_kinds(), vec![ChartKind::GpuPowerVsPerformance]);
        assert_eq!(request.format, ChartFormat::Svg);
        assert_eq!(request.dpi, 150);
    }

    #[test]
    fn named_session_wins_over_latest() {
        let cli = Cli::parse_from([
            "benchviz",
            "--session",
            "2024-03-01_10:00:00",
            "--latest",
        ]);
        assert_eq!(
            select_session(&cli),
            SessionSelection::Named("2024-03-01_10:00:00".to_string())
        );
    }

    #[test]
    fn no_session_flags_fall_back_to_sample_selection() {
        let cli = Cli::parse_from(["benchviz"]);
        assert_eq!(select_session(&cli), SessionSelection::None);
    }
}
