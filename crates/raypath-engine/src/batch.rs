//! Parallel receiver sampling for coverage maps.
//!
//! [`sample_receivers`] evaluates one transmitter against many receiver
//! positions. Receivers are split into fixed-size chunks and dispatched
//! to scoped worker threads over a bounded crossbeam channel; each
//! worker replies with its chunk's start index and values, so the output
//! preserves input order regardless of completion order.

use std::ops::Range;

use crossbeam_channel::{Receiver, Sender};
use glam::Vec3;
use raypath_core::PropagationContext;
use raypath_scene::Scene;
use tracing::debug;

use crate::config::MAX_SAMPLING_WORKERS;
use crate::error::EngineError;
use crate::facade::PropagationEngine;

/// Receivers handed to a worker per task.
const CHUNK_SIZE: usize = 16;

/// Borrowed inputs shared by every worker.
#[derive(Clone, Copy)]
struct SampleJob<'a> {
    engine: &'a PropagationEngine,
    base: &'a PropagationContext,
    receivers: &'a [Vec3],
    scene: &'a dyn Scene,
}

/// Received power at each of `receivers` from the transmitter in `base`.
///
/// Every receiver is evaluated with `base.with_receiver_position(rx)`;
/// all other fields, including the receiver antenna height, come from
/// `base`. Results go through the engine's cache and fallback policy, so
/// invalid receivers (e.g. on top of the transmitter) yield
/// `f32::NEG_INFINITY` rather than an error.
///
/// `workers` is clamped to `[1, 64]` and to the number of chunks.
///
/// # Errors
///
/// - [`EngineError::WorkerPanicked`] if a worker thread panicked.
/// - [`EngineError::WorkerFailed`] if some receivers went unanswered.
pub fn sample_receivers(
    engine: &PropagationEngine,
    base: &PropagationContext,
    receivers: &[Vec3],
    scene: &dyn Scene,
    workers: usize,
) -> Result<Vec<f32>, EngineError> {
    let n = receivers.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let chunks = n.div_ceil(CHUNK_SIZE);
    let workers = workers.clamp(1, MAX_SAMPLING_WORKERS).min(chunks);
    let job = SampleJob {
        engine,
        base,
        receivers,
        scene,
    };

    let (task_tx, task_rx) = crossbeam_channel::bounded::<Range<usize>>(workers * 4);
    // Sized so workers never block on reply while the caller is still
    // feeding tasks.
    let (reply_tx, reply_rx) = crossbeam_channel::bounded::<(usize, Vec<f32>)>(chunks);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let task_rx = task_rx.clone();
                let reply_tx = reply_tx.clone();
                s.spawn(move || worker_loop(task_rx, reply_tx, job))
            })
            .collect();
        drop(task_rx);
        drop(reply_tx);

        for start in (0..n).step_by(CHUNK_SIZE) {
            // Fails only when every worker has exited.
            if task_tx.send(start..(start + CHUNK_SIZE).min(n)).is_err() {
                break;
            }
        }
        drop(task_tx);

        let mut out = vec![f32::NAN; n];
        let mut answered = 0;
        while let Ok((start, values)) = reply_rx.recv() {
            answered += values.len();
            out[start..start + values.len()].copy_from_slice(&values);
        }

        // Join every handle so the scope never re-raises a worker panic.
        let panicked = handles
            .into_iter()
            .enumerate()
            .filter_map(|(worker, handle)| handle.join().is_err().then_some(worker))
            .collect::<Vec<_>>();
        if let Some(&worker) = panicked.first() {
            return Err(EngineError::WorkerPanicked { worker });
        }
        if answered != n {
            return Err(EngineError::WorkerFailed {
                reason: format!("{answered} of {n} receivers answered"),
            });
        }
        debug!("sampled {n} receivers on {workers} workers");
        Ok(out)
    })
}

/// Runs until the task channel is closed.
fn worker_loop(
    task_rx: Receiver<Range<usize>>,
    reply_tx: Sender<(usize, Vec<f32>)>,
    job: SampleJob<'_>,
) {
    while let Ok(range) = task_rx.recv() {
        let start = range.start;
        let values = job.receivers[range]
            .iter()
            .map(|&rx| {
                let ctx = job.base.with_receiver_position(rx);
                job.engine.received_power_dbm(&ctx, job.scene)
            })
            .collect();
        let _ = reply_tx.send((start, values));
    }
}

impl PropagationEngine {
    /// [`sample_receivers`] with the configured worker count.
    ///
    /// # Errors
    ///
    /// See [`sample_receivers`].
    pub fn sample_receivers(
        &self,
        base: &PropagationContext,
        receivers: &[Vec3],
        scene: &dyn Scene,
    ) -> Result<Vec<f32>, EngineError> {
        sample_receivers(
            self,
            base,
            receivers,
            scene,
            self.config().resolved_worker_count(),
        )
    }
}
