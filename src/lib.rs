// Core library for the numstat statistics tool

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error_handling;
pub mod fields;
pub mod formatters;
pub mod order_stats;
pub mod parallel;
pub mod platform;
pub mod source;
pub mod stats;

pub use aggregate::{aggregate, Aggregate, AggregateConfig};
pub use cli::Cli;
pub use config::StatsConfig;
pub use error_handling::{DiagnosticSink, ErrorReporter};
pub use fields::extract_field;
pub use formatters::RecordFormatter;
pub use order_stats::{median, percentile};
pub use parallel::{ParallelConfig, ParallelProcessor, SourceDescriptor};
pub use stats::AggregationResult;

use anyhow::{Context, Result};
use std::io::Read;

/// Compute one record per configured source.
///
/// Named files go through the worker pool and come back in command-line
/// order; a file that cannot be read becomes a zero-valued record. With no
/// files, stdin is aggregated directly and any read error is returned.
pub fn run(
    config: &StatsConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Result<Vec<AggregationResult>> {
    let descriptors = config.source_descriptors();
    if descriptors.is_empty() {
        let result = process_stream(std::io::stdin(), config, diagnostics)?;
        return Ok(vec![result]);
    }

    let processor = ParallelProcessor::new(ParallelConfig {
        num_workers: config.effective_threads(),
    });
    processor.run_all(descriptors, &config.aggregate_config(), diagnostics)
}

/// Aggregate a single unlabeled stream such as stdin
pub fn process_stream<R: Read + Send + 'static>(
    reader: R,
    config: &StatsConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Result<AggregationResult> {
    let reader = source::decode(reader).context("failed to read input")?;
    stats::compute(reader, &config.aggregate_config(), diagnostics)
}
