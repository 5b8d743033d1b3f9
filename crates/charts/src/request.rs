//! Chart requests: which kinds to render, and how.

use crate::kind::{ChartFormat, ChartKind};

/// Default raster density; a 10x6 inch figure at this density is 1000x600.
pub const DEFAULT_DPI: u32 = 100;

/// Independent boolean flags plus output options for one dispatch.
///
/// The flags mirror the CLI surface one to one. There is no ordering
/// dependency between requested kinds; each is independently producible
/// from the same table.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    /// Render the 2x2 overview panel.
    pub overview: bool,
    /// Render the memory usage chart.
    pub memory: bool,
    /// Render the performance comparison chart.
    pub performance: bool,
    /// Render the efficiency score chart.
    pub efficiency: bool,
    /// Render every main chart kind.
    pub all: bool,
    /// Additionally render the performance vs. GPU power chart.
    pub include_gpu: bool,
    /// Additionally render the GPU power usage chart.
    pub gpu_chart: bool,
    /// Image format for every artifact of this dispatch.
    pub format: ChartFormat,
    /// Raster density used to scale figure dimensions.
    pub dpi: u32,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            overview: false,
            memory: false,
            performance: false,
            efficiency: false,
            all: false,
            include_gpu: false,
            gpu_chart: false,
            format: ChartFormat::default(),
            dpi: DEFAULT_DPI,
        }
    }
}

impl ChartRequest {
    /// The main chart kinds this request selects.
    ///
    /// No flag set selects exactly the default kind (tokens per second);
    /// `all` selects every main kind; otherwise exactly the flagged kinds
    /// are selected. GPU kinds are governed by [`ChartRequest::gpu_kinds`]
    /// independently of this rule.
    pub fn selected_kinds(&self) -> Vec<ChartKind> {
        if self.all {
            return vec![
                ChartKind::Overview,
                ChartKind::Performance,
                ChartKind::Efficiency,
                ChartKind::Memory,
                ChartKind::TokensPerSecond,
            ];
        }

        let mut kinds = Vec::new();
        if self.overview {
            kinds.push(ChartKind::Overview);
        }
        if self.performance {
            kinds.push(ChartKind::Performance);
        }
        if self.efficiency {
            kinds.push(ChartKind::Efficiency);
        }
        if self.memory {
            kinds.push(ChartKind::Memory);
        }
        if kinds.is_empty() {
            kinds.push(ChartKind::TokensPerSecond);
        }
        kinds
    }

    /// The GPU chart kinds this request selects, independent of the main
    /// selection rule.
    pub fn gpu_kinds(&self) -> Vec<ChartKind> {
        let mut kinds = Vec::new();
        if self.include_gpu {
            kinds.push(ChartKind::GpuPowerVsPerformance);
        }
        if self.gpu_chart {
            kinds.push(ChartKind::GpuPower);
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_selects_only_the_default_kind() {
        let request = ChartRequest::default();
        assert_eq!(request.selected_kinds(), vec![ChartKind::TokensPerSecond]);
        assert!(request.gpu_kinds().is_empty());
    }

    #[test]
    fn all_selects_every_main_kind() {
        let request = ChartRequest {
            all: true,
            ..ChartRequest::default()
        };
        let kinds = request.selected_kinds();
        assert_eq!(kinds.len(), 5);
        assert!(kinds.contains(&ChartKind::Overview));
        assert!(kinds.contains(&ChartKind::TokensPerSecond));
        assert!(!kinds.contains(&ChartKind::GpuPower));
    }

    #[test]
    fn explicit_flags_select_exactly_those_kinds() {
        let request = ChartRequest {
            memory: true,
            efficiency: true,
            ..ChartRequest::default()
        };
        assert_eq!(
            request.selected_kinds(),
            vec![ChartKind::Efficiency, ChartKind::Memory]
        );
    }

    #[test]
    fn gpu_kinds_are_independent_of_the_main_rule() {
        let request = ChartRequest {
            include_gpu: true,
            gpu_chart: true,
            ..ChartRequest::default()
        };
        assert_eq!(request.selected_kinds(), vec![ChartKind::TokensPerSecond]);
        assert_eq!(
            request.gpu_kinds(),
            vec![ChartKind::GpuPowerVsPerformance, ChartKind::GpuPower]
        );
    }
}
