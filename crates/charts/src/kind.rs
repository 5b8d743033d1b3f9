//! The fixed catalogue of chart kinds and output formats.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One renderable visualization.
///
/// Each kind writes exactly one artifact with a deterministic file stem,
/// so re-running a dispatch overwrites prior output instead of
/// accumulating duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// 2x2 panel of the key metrics.
    Overview,
    /// Memory usage bars with efficiency annotations.
    Memory,
    /// Throughput bars with a CPU utilization overlay.
    Performance,
    /// Throughput-score bars.
    Efficiency,
    /// Plain tokens-per-second bars; the default chart.
    TokensPerSecond,
    /// GPU power draw bars.
    GpuPower,
    /// Throughput bars with a GPU power overlay.
    GpuPowerVsPerformance,
}

impl ChartKind {
    /// File stem of the artifact this kind writes.
    pub const fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Overview => "overview",
            ChartKind::Memory => "memory_usage",
            ChartKind::Performance => "performance_comparison",
            ChartKind::Efficiency => "efficiency_score",
            ChartKind::TokensPerSecond => "tokens_per_second",
            ChartKind::GpuPower => "gpu_power_usage",
            ChartKind::GpuPowerVsPerformance => "performance_vs_gpu_power",
        }
    }

    /// Human-readable name used in log lines and progress output.
    pub const fn label(self) -> &'static str {
        match self {
            ChartKind::Overview => "overview",
            ChartKind::Memory => "memory usage",
            ChartKind::Performance => "performance comparison",
            ChartKind::Efficiency => "efficiency score",
            ChartKind::TokensPerSecond => "tokens per second",
            ChartKind::GpuPower => "GPU power usage",
            ChartKind::GpuPowerVsPerformance => "performance vs. GPU power",
        }
    }

    /// Full artifact path for this kind under `output_dir`.
    pub fn artifact_path(self, output_dir: &Path, format: ChartFormat) -> PathBuf {
        output_dir.join(format!("{}.{}", self.file_stem(), format.extension()))
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supported image output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFormat {
    /// Raster output via the bitmap backend.
    #[default]
    Png,
    /// Vector output via the SVG backend.
    Svg,
}

impl ChartFormat {
    /// File extension for artifacts in this format.
    pub const fn extension(self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(format!("unknown format '{other}' (expected png or svg)")),
        }
    }
}
