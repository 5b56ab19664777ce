// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run lifecycle and execution runtime events.
//!
//! This module contains message types for logging events related to:
//! * Run lifecycle (start, completion, failure)
//! * Unit spawning and exit
//! * Cancellation and termination of live units
//! * Messages arriving after the run has settled

use crate::engine::UnitId;
use crate::errors::RunnerError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Run started on a runtime with a given fan-out.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_divvy::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     runtime: "threads",
///     processor: "heavy_computation",
///     item_count: 1000,
///     worker_count: 8,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub runtime: &'a str,
    pub processor: &'a str,
    pub item_count: usize,
    pub worker_count: usize,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting parallel run on {} runtime: {} items through '{}' across {} units",
            self.runtime, self.item_count, self.processor, self.worker_count
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            runtime = self.runtime,
            processor = self.processor,
            item_count = self.item_count,
            worker_count = self.worker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run",
            span_name = name,
            runtime = self.runtime,
            processor = self.processor,
            item_count = self.item_count,
            worker_count = self.worker_count,
        )
    }
}

/// Run completed with every item processed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted<'a> {
    pub runtime: &'a str,
    pub item_count: usize,
    pub duration: Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parallel run completed on {} runtime: {} items in {:?}",
            self.runtime, self.item_count, self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            runtime = self.runtime,
            item_count = self.item_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            runtime = self.runtime,
            item_count = self.item_count,
            duration = ?self.duration,
        )
    }
}

/// Run resolved with a failure.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use std::time::Duration;
/// use the_divvy::errors::RunnerError;
/// use the_divvy::observability::messages::engine::RunFailed;
///
/// let error = RunnerError::TimedOut { timeout: Duration::from_secs(5) };
/// let msg = RunFailed {
///     runtime: "tasks",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct RunFailed<'a> {
    pub runtime: &'a str,
    pub error: &'a RunnerError,
}

impl Display for RunFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parallel run failed on {} runtime: {}",
            self.runtime, self.error
        )
    }
}

impl StructuredLog for RunFailed<'_> {
    fn log(&self) {
        tracing::error!(
            runtime = self.runtime,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "run_failed",
            span_name = name,
            runtime = self.runtime,
            error = %self.error,
        )
    }
}

/// Execution unit spawned for one partition.
///
/// # Log Level
/// `debug!` - Per-unit detail
pub struct UnitSpawned {
    pub unit: UnitId,
    pub item_count: usize,
}

impl Display for UnitSpawned {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Spawned {} with {} items", self.unit, self.item_count)
    }
}

impl StructuredLog for UnitSpawned {
    fn log(&self) {
        tracing::debug!(
            unit = %self.unit,
            item_count = self.item_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "unit",
            span_name = name,
            unit = %self.unit,
            item_count = self.item_count,
        )
    }
}

/// Execution unit reported its exit code.
///
/// # Log Level
/// `debug!` for a clean exit, `warn!` otherwise
pub struct UnitExited {
    pub unit: UnitId,
    pub code: Option<i32>,
}

impl Display for UnitExited {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} exited with code {}", self.unit, code),
            None => write!(f, "{} exited without an exit code", self.unit),
        }
    }
}

impl StructuredLog for UnitExited {
    fn log(&self) {
        if self.code == Some(0) {
            tracing::debug!(unit = %self.unit, code = ?self.code, "{}", self);
        } else {
            tracing::warn!(unit = %self.unit, code = ?self.code, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "unit_exited",
            span_name = name,
            unit = %self.unit,
            code = ?self.code,
        )
    }
}

/// A cooperatively cancelled unit stopped between items.
///
/// # Log Level
/// `debug!` - Per-unit detail
pub struct UnitCancelled {
    pub unit: UnitId,
}

impl Display for UnitCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} observed cancellation and stopped", self.unit)
    }
}

impl StructuredLog for UnitCancelled {
    fn log(&self) {
        tracing::debug!(unit = %self.unit, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("unit_cancelled", span_name = name, unit = %self.unit)
    }
}

/// Orchestrator asked a live unit to terminate.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TerminationRequested {
    pub unit: UnitId,
}

impl Display for TerminationRequested {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Terminating {}", self.unit)
    }
}

impl StructuredLog for TerminationRequested {
    fn log(&self) {
        tracing::info!(unit = %self.unit, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("termination", span_name = name, unit = %self.unit)
    }
}

/// Terminated units did not confirm within the termination timeout.
///
/// # Log Level
/// `warn!` - Degraded but recoverable
pub struct TerminationTimedOut {
    pub pending: usize,
    pub timeout: Duration,
}

impl Display for TerminationTimedOut {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Gave up waiting on {} terminated units after {:?}",
            self.pending, self.timeout
        )
    }
}

impl StructuredLog for TerminationTimedOut {
    fn log(&self) {
        tracing::warn!(
            pending = self.pending,
            timeout_ms = self.timeout.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "termination_timed_out",
            span_name = name,
            pending = self.pending,
            timeout = ?self.timeout,
        )
    }
}

/// A unit message arrived after the outcome was decided and was dropped.
///
/// # Log Level
/// `trace!` - Expected noise during cancellation
pub struct LateMessageDiscarded {
    pub unit: UnitId,
    pub kind: &'static str,
}

impl Display for LateMessageDiscarded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Discarded late {} message from {}", self.kind, self.unit)
    }
}

impl StructuredLog for LateMessageDiscarded {
    fn log(&self) {
        tracing::trace!(unit = %self.unit, kind = self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "late_message",
            span_name = name,
            unit = %self.unit,
            kind = self.kind,
        )
    }
}

/// A failure arrived after the run had already failed; the first one stands.
///
/// # Log Level
/// `warn!` - Logged only, never returned
pub struct SecondaryFailureIgnored<'a> {
    pub first: &'a RunnerError,
    pub ignored: &'a RunnerError,
}

impl Display for SecondaryFailureIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring failure '{}' because the run already failed with '{}'",
            self.ignored, self.first
        )
    }
}

impl StructuredLog for SecondaryFailureIgnored<'_> {
    fn log(&self) {
        tracing::warn!(
            first = %self.first,
            ignored = %self.ignored,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "secondary_failure",
            span_name = name,
            first = %self.first,
            ignored = %self.ignored,
        )
    }
}
