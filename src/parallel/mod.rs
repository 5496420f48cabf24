//! Parallel processing module for numstat
//!
//! Aggregates several input sources at once on a fixed pool of worker
//! threads while keeping the output in submission order.
//!
//! # Module Structure
//!
//! - `types`: Source descriptors, slot results and pool configuration
//! - `worker`: Worker thread draining the source queue
//! - `processor`: Main ParallelProcessor orchestration

mod processor;
mod types;
mod worker;

// Re-export public types
pub use processor::ParallelProcessor;
pub use types::{ParallelConfig, SourceDescriptor};
