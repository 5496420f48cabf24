//! Streaming aggregation of numeric lines
//!
//! Reads a line source once and keeps running count/min/max/sum without
//! holding the values, unless the caller asks for them (median and
//! percentile need the full set).

use anyhow::{Context, Result};
use std::io::BufRead;

use crate::error_handling::{create_soft_error, DiagnosticSink};
use crate::fields::extract_field;

/// Settings for one aggregation run, shared read-only between workers
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateConfig {
    /// Keep every parsed value; implied when median or percentile is set
    pub need_values: bool,
    pub delimiter: String,
    /// 1-based field to extract; `<= 0` uses the whole line
    pub field_index: i64,
    pub ignore_header_rows: usize,
    /// Input is already ascending, skip the sort
    pub sorted_hint: bool,
    pub median: bool,
    /// Percentile rank 1..=100; `<= 0` disables
    pub percentile_rank: i64,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            need_values: false,
            delimiter: "\t".to_string(),
            field_index: 0,
            ignore_header_rows: 0,
            sorted_hint: false,
            median: false,
            percentile_rank: 0,
        }
    }
}

impl AggregateConfig {
    /// Whether median or percentile was requested
    pub fn wants_order_stats(&self) -> bool {
        self.median || self.percentile_rank > 0
    }

    /// Whether parsed values must be kept after aggregation
    pub fn retains_values(&self) -> bool {
        self.need_values || self.wants_order_stats()
    }

    /// Copy of this configuration with a per-source field index applied.
    /// An override `<= 0` keeps the global index.
    pub fn for_source(&self, field_index_override: i64) -> Self {
        let mut config = self.clone();
        if field_index_override > 0 {
            config.field_index = field_index_override;
        }
        config
    }
}

/// Running totals produced by [`aggregate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub average: f64,
    /// Parsed values in input order; empty unless values are retained
    pub values: Vec<f64>,
}

/// Aggregate every numeric line of `reader`.
///
/// Lines that do not parse as `f64` are reported to `diagnostics` and
/// skipped. `max` starts at `0`, so all-negative input reports a maximum of
/// `0`. An empty result (`count == 0`) has every statistic at zero. A read
/// failure is returned as an error.
pub fn aggregate<R: BufRead>(
    mut reader: R,
    config: &AggregateConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Result<Aggregate> {
    let mut min = f64::INFINITY;
    let mut max = 0.0_f64;
    let mut sum = 0.0_f64;
    let mut count = 0usize;
    let mut values = Vec::new();
    let retain = config.retains_values();

    let mut skipped = 0usize;
    let mut line_number = 0usize;
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("read failed after line {}", line_number))?;
        if bytes_read == 0 {
            break;
        }
        line_number += 1;

        if skipped < config.ignore_header_rows {
            skipped += 1;
            continue;
        }

        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        let field = extract_field(line.trim_matches(' '), &config.delimiter, config.field_index);

        let value = match field.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                diagnostics.report(
                    create_soft_error(format!("illegal value. value={}", field), None)
                        .at_line(line_number),
                );
                continue;
            }
        };

        min = min.min(value);
        max = max.max(value);
        sum += value;
        count += 1;
        if retain {
            values.push(value);
        }
    }

    if count == 0 {
        return Ok(Aggregate {
            count,
            min: 0.0,
            max,
            sum,
            average: 0.0,
            values,
        });
    }

    Ok(Aggregate {
        count,
        min,
        max,
        sum,
        average: sum / count as f64,
        values,
    })
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
