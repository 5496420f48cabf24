//! Per-source statistics
//!
//! Combines the streaming totals with median and percentile into the one
//! record each source contributes to the output.

use anyhow::Result;
use std::io::BufRead;

use crate::aggregate::{aggregate, AggregateConfig};
use crate::error_handling::DiagnosticSink;
use crate::order_stats::{median, percentile, sort_values};

/// Statistics for one source, written once and never mutated afterwards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResult {
    pub source_label: Option<String>,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub average: f64,
    /// Only meaningful when the median was requested
    pub median: f64,
    /// Only meaningful when a percentile rank was requested
    pub percentile: f64,
}

impl AggregationResult {
    /// Zero-valued record standing in for a source that could not be read
    pub fn empty(source_label: Option<String>) -> Self {
        Self {
            source_label,
            ..Default::default()
        }
    }

    pub fn with_label(mut self, source_label: impl Into<String>) -> Self {
        self.source_label = Some(source_label.into());
        self
    }
}

/// Aggregate one source and, when requested, compute its order statistics.
///
/// Retained values are sorted once unless `sorted_hint` is set, in which
/// case they are trusted to be ascending already.
pub fn compute<R: BufRead>(
    reader: R,
    config: &AggregateConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Result<AggregationResult> {
    let mut totals = aggregate(reader, config, diagnostics)?;

    let mut result = AggregationResult {
        source_label: None,
        count: totals.count,
        min: totals.min,
        max: totals.max,
        sum: totals.sum,
        average: totals.average,
        median: 0.0,
        percentile: 0.0,
    };

    if config.wants_order_stats() {
        if !config.sorted_hint {
            sort_values(&mut totals.values);
        }
        if config.median {
            result.median = median(&totals.values);
        }
        if config.percentile_rank > 0 {
            result.percentile = percentile(&totals.values, config.percentile_rank);
        }
    }

    Ok(result)
}
