// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spreads the escape test over a pool of scoped worker threads.
//!
//! The sample sequence is cut into contiguous runs, and each run is
//! paired with the slice of the output buffer it is responsible for.
//! Those pairs go into a queue that the workers drain.  Since every
//! run writes only into its own slice, the output ends up in input
//! order no matter which worker picked up which run, or in what order
//! they finished, and nothing has to be locked along the way.

use crossbeam::channel;
use num::Complex;
use std::any::Any;

use crate::errors::JuliaError;
use crate::escape::Escape;

/// How many runs each worker gets, on average.  More than one, so a
/// worker stuck on the slow heart of the set does not hold up the
/// rest of the pass.
const UNITS_PER_WORKER: usize = 4;

/// One contiguous run of samples and the counts it produces.
pub(crate) struct Unit<'a> {
    index: usize,
    samples: &'a [Complex<f64>],
    counts: &'a mut [u32],
}

fn unit_len(samples: usize, workers: usize) -> usize {
    let units = workers * UNITS_PER_WORKER;
    ((samples + units - 1) / units).max(1)
}

/// Digs a readable message out of whatever a worker panicked with.
/// crossbeam gathers every panic of a scope into a `Vec`; only the
/// first one is reported.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(panics) = payload.downcast_ref::<Vec<Box<dyn Any + Send + 'static>>>() {
        return panics
            .first()
            .map(|first| panic_message(&**first))
            .unwrap_or_else(|| "worker panicked".to_string());
    }
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "worker panicked".to_string()
}

/// Runs `evaluator` for `c` over every sample on `workers` threads and
/// returns the counts in the same order as `samples`.  If any worker
/// dies the whole pass fails and no counts are returned.
pub fn dispatch<E: Escape>(
    evaluator: &E,
    c: Complex<f64>,
    samples: &[Complex<f64>],
    max_iter: u32,
    workers: usize,
) -> Result<Vec<u32>, JuliaError> {
    dispatch_scheduled(evaluator, c, samples, max_iter, workers, |_| ())
}

/// `dispatch`, with a hook to reorder the work queue before the
/// workers start pulling from it.
pub(crate) fn dispatch_scheduled<E, F>(
    evaluator: &E,
    c: Complex<f64>,
    samples: &[Complex<f64>],
    max_iter: u32,
    workers: usize,
    schedule: F,
) -> Result<Vec<u32>, JuliaError>
where
    E: Escape,
    F: FnOnce(&mut Vec<Unit<'_>>),
{
    if workers == 0 {
        return Err(JuliaError::InvalidWorkerCount);
    }

    let mut counts = vec![0 as u32; samples.len()];
    if samples.is_empty() {
        return Ok(counts);
    }

    let outcome = {
        let len = unit_len(samples.len(), workers);
        let mut units: Vec<Unit> = samples
            .chunks(len)
            .zip(counts.chunks_mut(len))
            .enumerate()
            .map(|(index, (samples, counts))| Unit {
                index,
                samples,
                counts,
            })
            .collect();
        schedule(&mut units);

        let pool = workers.min(units.len());
        debug!(
            "dispatching {} samples as {} units of up to {} on {} workers",
            samples.len(),
            units.len(),
            len,
            pool
        );

        let (sender, receiver) = channel::unbounded();
        for unit in units {
            sender
                .send(unit)
                .map_err(|_| JuliaError::EvaluationFailure {
                    reason: "work queue closed before the pass started".to_string(),
                })?;
        }
        drop(sender);

        crossbeam::scope(|spawner| {
            for _ in 0..pool {
                let receiver = receiver.clone();
                spawner.spawn(move |_| {
                    for unit in receiver.iter() {
                        trace!("evaluating unit {}", unit.index);
                        for (count, &z0) in unit.counts.iter_mut().zip(unit.samples) {
                            *count = evaluator.escape(c, z0, max_iter);
                        }
                    }
                });
            }
        })
    };

    match outcome {
        Ok(()) => Ok(counts),
        Err(payload) => Err(JuliaError::EvaluationFailure {
            reason: panic_message(&*payload),
        }),
    }
}
