// Copyright 2025 LLM Benchviz Contributors
// SPDX-License-Identifier: Apache-2.0

//! The per-model summary table.
//!
//! Benchmark runs write one CSV row per model, with a `Model` name column
//! and a set of averaged numeric metric columns. The table is loaded once
//! per invocation and treated as immutable afterwards.
//!
//! Metric columns are stored as optional per-row values: a cell that is
//! empty or not numeric (the upstream writer emits an `N/A` sentinel for
//! unmeasured GPU power) becomes `None`. Chart routines declare which
//! columns they require and which they treat as optional, so nothing here
//! needs to know which charts exist.

use crate::error::CoreError;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Well-known column names produced by the benchmark runner.
pub mod columns {
    /// Model name, the category axis for every chart. Required.
    pub const MODEL: &str = "Model";
    /// Average generation throughput.
    pub const TOKENS_PER_SEC: &str = "Avg Tokens/sec";
    /// Average resident memory.
    pub const MEMORY_MB: &str = "Avg Memory (MB)";
    /// Average CPU utilization.
    pub const CPU_PCT: &str = "Avg CPU (%)";
    /// Tokens generated per megabyte of memory.
    pub const TOKENS_PER_MB: &str = "Avg Tokens/MB";
    /// Composite throughput-per-CPU score.
    pub const THROUGHPUT_SCORE: &str = "Avg Throughput Score";
    /// Average GPU power draw; may hold an `N/A` sentinel.
    pub const GPU_POWER_W: &str = "Avg GPU Power (W)";
}

/// One loaded summary table: ordered model names plus named metric series.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    models: Vec<String>,
    metrics: HashMap<String, Vec<Option<f64>>>,
}

impl SummaryTable {
    /// Load a summary table from a CSV file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, does not parse as CSV, or has
    /// no `Model` column. All of these are fatal for a visualization run.
    pub fn from_csv(path: &Path) -> Result<Self, CoreError> {
        let file = File::open(path).map_err(|source| CoreError::SummaryRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, CoreError> {
        let parse_err = |source: csv::Error| CoreError::SummaryParse {
            path: path.to_path_buf(),
            source,
        };

        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = csv_reader.headers().map_err(parse_err)?.clone();

        let model_idx = headers
            .iter()
            .position(|h| h == columns::MODEL)
            .ok_or(CoreError::MissingModelColumn {
                path: path.to_path_buf(),
                column: columns::MODEL,
            })?;

        let mut models = Vec::new();
        let mut metrics: HashMap<String, Vec<Option<f64>>> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != model_idx)
            .map(|(_, name)| (name.to_string(), Vec::new()))
            .collect();

        for record in csv_reader.records() {
            let record = record.map_err(parse_err)?;
            models.push(record.get(model_idx).unwrap_or_default().to_string());
            for (idx, name) in headers.iter().enumerate() {
                if idx == model_idx {
                    continue;
                }
                let value = record.get(idx).and_then(parse_metric);
                if let Some(series) = metrics.get_mut(name) {
                    series.push(value);
                }
            }
        }

        debug!(
            path = %path.display(),
            rows = models.len(),
            columns = metrics.len(),
            "loaded summary table"
        );

        Ok(Self { models, metrics })
    }

    /// Model names in input order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Whether a metric column with this name was present in the file.
    pub fn has_column(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// The per-row values of a metric column, `None` where a cell did not
    /// parse as a number. Absent entirely when the column is not in the file.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.metrics.get(name).map(Vec::as_slice)
    }

    /// Coerce a column to numeric and drop the rows that fail.
    ///
    /// Returns `(row_index, value)` pairs for the rows that parsed. This is
    /// the policy applied to the GPU power column, where unmeasured rows
    /// carry an `N/A` sentinel. An absent column yields no rows.
    pub fn coerced_rows(&self, name: &str) -> Vec<(usize, f64)> {
        self.column(name)
            .map(|series| {
                series
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, value)| value.map(|v| (idx, v)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn parse_metric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
