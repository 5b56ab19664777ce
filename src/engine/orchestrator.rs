// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Async driver for a single parallel run.
//!
//! The [`Orchestrator`] partitions the input, starts one execution unit per
//! partition on its [`ExecutionRuntime`], and then sits in one receive loop
//! feeding unit messages into a [`Supervisor`]. Because only this loop touches
//! the supervisor, result writes and state transitions are never concurrent.
//!
//! # Cancellation
//!
//! When the supervisor flags the first failure (or the optional operation
//! timeout fires), every unit that has not exited yet is told to terminate.
//! The orchestrator then waits for them, but never longer than
//! [`RunnerOptions::termination_timeout`], and resolves the failure whether or
//! not they all confirmed. Anything they send afterwards is drained and
//! discarded.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use the_divvy::engine::{Orchestrator, RunnerOptions};
//! use the_divvy::backends::ThreadRuntime;
//! use the_divvy::traits::processor_fn;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(
//!     Arc::new(ThreadRuntime::new()),
//!     RunnerOptions::default().with_max_workers(3),
//! );
//!
//! let squares = orchestrator
//!     .run((1..=10u64).collect(), Arc::new(processor_fn(|x: u64| Ok(x * x))))
//!     .await?;
//!
//! assert_eq!(squares, vec![1, 4, 9, 16, 25, 36, 49, 64, 81, 100]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::backends::ThreadRuntime;
use crate::engine::messages::{Outbox, UnitId, UnitMessage};
use crate::engine::partitioner::{effective_worker_count, partition, Partition};
use crate::engine::supervisor::{Directive, Supervisor};
use crate::engine::worker::UnitWorker;
use crate::engine::Outcome;
use crate::errors::RunnerError;
use crate::observability::messages::engine::{
    RunCompleted, RunFailed, RunStarted, TerminationRequested, TerminationTimedOut, UnitSpawned,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ExecutionRuntime, ItemProcessor, ProgressObserver, UnitHandle};

/// Default bound on how long a failed run waits for terminated units.
pub const DEFAULT_TERMINATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Get the default worker count based on system capabilities
///
/// Returns the number of available CPU cores, falling back to 4 if detection fails.
pub fn default_max_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Knobs for a run. Validation of `max_workers` happens at partition time so
/// that a bad value is reported as a [`RunnerError::Partition`].
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub max_workers: usize,
    pub termination_timeout: Duration,
    pub operation_timeout: Option<Duration>,
    pub report_progress: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            termination_timeout: DEFAULT_TERMINATION_TIMEOUT,
            operation_timeout: None,
            report_progress: false,
        }
    }
}

impl RunnerOptions {
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_termination_timeout(mut self, timeout: Duration) -> Self {
        self.termination_timeout = timeout;
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    pub fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }
}

/// Runs item processors over partitioned input on an [`ExecutionRuntime`].
///
/// An orchestrator holds no per-run state: every call to [`Orchestrator::run`]
/// builds its own channel, handles and supervisor, so one orchestrator can
/// serve any number of sequential or concurrent runs.
pub struct Orchestrator {
    runtime: Arc<dyn ExecutionRuntime>,
    options: RunnerOptions,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl Orchestrator {
    pub fn new(runtime: Arc<dyn ExecutionRuntime>, options: RunnerOptions) -> Self {
        Self {
            runtime,
            options,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    pub fn runtime_name(&self) -> &'static str {
        self.runtime.name()
    }

    /// Apply `processor` to every item in parallel and return the results in
    /// input order, or the first failure.
    pub async fn run<T, P>(&self, items: Vec<T>, processor: Arc<P>) -> Outcome<P::Output>
    where
        T: Send + 'static,
        P: ItemProcessor<T> + ?Sized + 'static,
    {
        let item_count = items.len();
        let partitions = partition(items, self.options.max_workers)?;
        if partitions.is_empty() {
            return Ok(Vec::new());
        }

        let start_msg = RunStarted {
            runtime: self.runtime.name(),
            processor: processor.name(),
            item_count,
            worker_count: effective_worker_count(item_count, self.options.max_workers),
        };
        let span = start_msg.span("parallel_run");
        start_msg.log();

        self.dispatch(item_count, partitions, processor)
            .instrument(span)
            .await
    }

    async fn dispatch<T, P>(
        &self,
        item_count: usize,
        partitions: Vec<Partition<T>>,
        processor: Arc<P>,
    ) -> Outcome<P::Output>
    where
        T: Send + 'static,
        P: ItemProcessor<T> + ?Sized + 'static,
    {
        let started_at = Instant::now();
        let runtime_name = self.runtime.name();

        let (sender, mut receiver) = mpsc::unbounded_channel::<UnitMessage<P::Output>>();
        let mut handles: HashMap<UnitId, Box<dyn UnitHandle>> =
            HashMap::with_capacity(partitions.len());

        for (n, part) in partitions.into_iter().enumerate() {
            let unit = UnitId(n);
            let partition_len = part.len();
            let worker = UnitWorker::new(
                part,
                processor.clone(),
                Outbox::new(unit, sender.clone()),
                self.options.report_progress,
            );
            match self.runtime.spawn_unit(Box::new(worker)) {
                Ok(handle) => {
                    UnitSpawned {
                        unit,
                        item_count: partition_len,
                    }
                    .log();
                    handles.insert(unit, handle);
                }
                Err(error) => {
                    let live: Vec<UnitId> = handles.keys().copied().collect();
                    self.terminate_units(&mut handles, &live).await;
                    RunFailed {
                        runtime: runtime_name,
                        error: &error,
                    }
                    .log();
                    return Err(error);
                }
            }
        }
        // Units hold the only senders from here on.
        drop(sender);

        let mut supervisor = Supervisor::new(item_count, handles.keys().copied())
            .with_observer(self.observer.clone());
        let deadline = self
            .options
            .operation_timeout
            .map(|timeout| (tokio::time::Instant::now() + timeout, timeout));

        loop {
            let directive = tokio::select! {
                message = receiver.recv() => match message {
                    Some(message) => supervisor.handle(message),
                    None => {
                        let unit = supervisor.live_units().first().copied().unwrap_or(UnitId(0));
                        supervisor.fail(RunnerError::UnitCrash { unit, code: None })
                    }
                },
                timeout = Self::expire(deadline) => {
                    supervisor.fail(RunnerError::TimedOut { timeout })
                }
            };

            match directive {
                Directive::Continue => continue,
                Directive::Finish => break,
                Directive::Cancel => {
                    let live = supervisor.live_units();
                    self.terminate_units(&mut handles, &live).await;
                    break;
                }
            }
        }

        let outcome = match supervisor.settle() {
            Some(outcome) => outcome,
            None => unreachable!("supervisor left the receive loop without settling"),
        };

        // Whatever terminated units managed to send is now a no-op.
        while let Ok(message) = receiver.try_recv() {
            supervisor.handle(message);
        }

        match &outcome {
            Ok(_) => RunCompleted {
                runtime: runtime_name,
                item_count,
                duration: started_at.elapsed(),
            }
            .log(),
            Err(error) => RunFailed {
                runtime: runtime_name,
                error,
            }
            .log(),
        }

        outcome
    }

    async fn expire(deadline: Option<(tokio::time::Instant, Duration)>) -> Duration {
        match deadline {
            Some((at, timeout)) => {
                tokio::time::sleep_until(at).await;
                timeout
            }
            None => std::future::pending().await,
        }
    }

    async fn terminate_units(&self, handles: &mut HashMap<UnitId, Box<dyn UnitHandle>>, units: &[UnitId]) {
        for unit in units {
            if let Some(handle) = handles.get(unit) {
                TerminationRequested { unit: *unit }.log();
                handle.terminate();
            }
        }

        let wait_all = async {
            for unit in units {
                if let Some(handle) = handles.get_mut(unit) {
                    handle.wait().await;
                }
            }
        };
        if tokio::time::timeout(self.options.termination_timeout, wait_all)
            .await
            .is_err()
        {
            TerminationTimedOut {
                pending: still_running(handles, units),
                timeout: self.options.termination_timeout,
            }
            .log();
        }
    }
}

/// Number of `units` whose handle reports they have not stopped yet.
fn still_running(handles: &HashMap<UnitId, Box<dyn UnitHandle>>, units: &[UnitId]) -> usize {
    units
        .iter()
        .filter_map(|unit| handles.get(unit))
        .filter(|handle| !handle.is_finished())
        .count()
}

/// Run `processor` over `items` with at most `max_workers` units on the
/// blocking-thread runtime and default options.
pub async fn run_parallel<T, P>(items: Vec<T>, processor: P, max_workers: usize) -> Outcome<P::Output>
where
    T: Send + 'static,
    P: ItemProcessor<T> + 'static,
{
    let orchestrator = Orchestrator::new(
        Arc::new(ThreadRuntime::new()),
        RunnerOptions::default().with_max_workers(max_workers),
    );
    orchestrator.run(items, Arc::new(processor)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedHandle {
        id: UnitId,
        finished: bool,
    }

    #[async_trait]
    impl UnitHandle for FixedHandle {
        fn id(&self) -> UnitId {
            self.id
        }

        fn terminate(&self) {}

        fn is_finished(&self) -> bool {
            self.finished
        }

        async fn wait(&mut self) {}
    }

    fn handles(finished: &[bool]) -> HashMap<UnitId, Box<dyn UnitHandle>> {
        finished
            .iter()
            .enumerate()
            .map(|(n, done)| {
                let handle: Box<dyn UnitHandle> = Box::new(FixedHandle {
                    id: UnitId(n),
                    finished: *done,
                });
                (UnitId(n), handle)
            })
            .collect()
    }

    #[test]
    fn test_still_running_counts_only_unfinished_units() {
        let handles = handles(&[true, false, true, false]);

        assert_eq!(
            still_running(&handles, &[UnitId(0), UnitId(1), UnitId(2), UnitId(3)]),
            2
        );
        assert_eq!(still_running(&handles, &[UnitId(0), UnitId(2)]), 0);
        assert_eq!(still_running(&handles, &[UnitId(1), UnitId(9)]), 1);
    }

    #[test]
    fn test_runner_options_builders() {
        let options = RunnerOptions::default()
            .with_max_workers(3)
            .with_termination_timeout(Duration::from_millis(10))
            .with_operation_timeout(Duration::from_secs(1))
            .with_progress(true);

        assert_eq!(options.max_workers, 3);
        assert_eq!(options.termination_timeout, Duration::from_millis(10));
        assert_eq!(options.operation_timeout, Some(Duration::from_secs(1)));
        assert!(options.report_progress);
        assert!(default_max_workers() >= 1);
    }
}
