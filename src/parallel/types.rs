//! Type definitions for parallel processing
//!
//! Contains the work unit handed to workers, the slot-tagged result they
//! send back, and the pool configuration.

use crate::stats::AggregationResult;

/// One input source, consumed exactly once by one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Position in submission order; also the result slot
    pub original_index: usize,
    /// Path of the source
    pub location: String,
    /// Field index for this source; `<= 0` uses the global index
    pub field_index_override: i64,
}

/// Result tagged with the slot it belongs to
#[derive(Debug)]
pub(crate) struct SlotResult {
    pub original_index: usize,
    pub result: AggregationResult,
}

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    /// Pool width for `sources` descriptors: never more workers than
    /// sources, never fewer than one
    pub fn workers_for(&self, sources: usize) -> usize {
        self.num_workers.min(sources).max(1)
    }
}
