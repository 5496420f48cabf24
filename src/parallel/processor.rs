//! Main parallel processor
//!
//! Fans sources out over a fixed pool of worker threads and gathers the
//! results back into submission order.

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, unbounded};
use std::thread;

use crate::aggregate::AggregateConfig;
use crate::error_handling::DiagnosticSink;
use crate::stats::AggregationResult;

use super::types::{ParallelConfig, SlotResult, SourceDescriptor};
use super::worker::worker_thread;

/// Main parallel processor
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    /// Aggregate every source and return one record per descriptor, in
    /// `original_index` order regardless of which worker finished first.
    ///
    /// The queue is fully loaded and closed before any worker starts. A
    /// source that cannot be opened or read yields a zero-valued record in
    /// its slot; it never stops the other sources.
    pub fn run_all(
        &self,
        descriptors: Vec<SourceDescriptor>,
        config: &AggregateConfig,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<Vec<AggregationResult>> {
        let total = descriptors.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let (work_sender, work_receiver) = bounded(total);
        for descriptor in descriptors {
            if descriptor.original_index >= total {
                return Err(anyhow!(
                    "source '{}' has index {} outside 0..{}",
                    descriptor.location,
                    descriptor.original_index,
                    total
                ));
            }
            work_sender
                .send(descriptor)
                .map_err(|_| anyhow!("work queue closed before all sources were queued"))?;
        }
        // Close the queue so workers stop once it is drained
        drop(work_sender);

        let (result_sender, result_receiver) = unbounded::<SlotResult>();
        let num_workers = self.config.workers_for(total);

        thread::scope(|scope| -> Result<()> {
            let mut worker_handles = Vec::with_capacity(num_workers);
            for _ in 0..num_workers {
                let work_receiver = work_receiver.clone();
                let result_sender = result_sender.clone();
                let handle = scope.spawn(move || {
                    worker_thread(work_receiver, result_sender, config, diagnostics)
                });
                worker_handles.push(handle);
            }

            // Drop our copy so the result channel closes with the last worker
            drop(result_sender);

            for (idx, handle) in worker_handles.into_iter().enumerate() {
                handle
                    .join()
                    .unwrap_or_else(|e| panic!("Worker thread {} panicked: {:?}", idx, e))?;
            }
            Ok(())
        })?;

        let mut slots: Vec<Option<AggregationResult>> = (0..total).map(|_| None).collect();
        for SlotResult {
            original_index,
            result,
        } in result_receiver.try_iter()
        {
            if slots[original_index].replace(result).is_some() {
                return Err(anyhow!("source #{} was processed twice", original_index));
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| slot.ok_or_else(|| anyhow!("no result for source #{}", idx)))
            .collect()
    }
}
