//! Worker thread for parallel processing
//!
//! Each worker drains descriptors from the shared queue until it is closed
//! and empty, aggregating one source at a time.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};

use crate::aggregate::AggregateConfig;
use crate::error_handling::{create_medium_error, DiagnosticSink, SourceScopedSink};
use crate::source::open_source;
use crate::stats::{self, AggregationResult};

use super::types::{SlotResult, SourceDescriptor};

/// Worker thread: processes sources until the queue is exhausted
pub(crate) fn worker_thread(
    work_receiver: Receiver<SourceDescriptor>,
    result_sender: Sender<SlotResult>,
    config: &AggregateConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Result<()> {
    // recv() fails only once the queue is closed and drained
    while let Ok(descriptor) = work_receiver.recv() {
        let result = process_source(&descriptor, config, diagnostics);
        let slot = SlotResult {
            original_index: descriptor.original_index,
            result,
        };
        if result_sender.send(slot).is_err() {
            break; // Collector dropped
        }
    }

    Ok(())
}

/// Aggregate one source. Open and read failures are reported and replaced
/// by a zero-valued record so sibling sources keep going.
pub(crate) fn process_source(
    descriptor: &SourceDescriptor,
    config: &AggregateConfig,
    diagnostics: &dyn DiagnosticSink,
) -> AggregationResult {
    let label = descriptor.location.clone();

    let reader = match open_source(&descriptor.location) {
        Ok(reader) => reader,
        Err(e) => {
            // The message already names the path
            diagnostics.report(create_medium_error(format!("{:#}", e), None));
            return AggregationResult::empty(Some(label));
        }
    };

    let source_config = config.for_source(descriptor.field_index_override);
    let scoped = SourceScopedSink::new(diagnostics, &descriptor.location);
    match stats::compute(reader, &source_config, &scoped) {
        Ok(result) => result.with_label(label),
        Err(e) => {
            diagnostics.report(create_medium_error(format!("{:#}", e), Some(label.clone())));
            AggregationResult::empty(Some(label))
        }
    }
}
