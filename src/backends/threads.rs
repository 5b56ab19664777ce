// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution units on tokio's blocking thread pool.
//!
//! Each unit gets its own blocking thread, so CPU-heavy item processors run
//! truly in parallel without stalling the async workers that drive the
//! orchestrator. Threads cannot be killed from the outside: `terminate` cancels
//! a [`CancellationToken`] the unit checks before every item, so an item that
//! is already running finishes first. The orchestrator's termination timeout
//! bounds how long a failed run waits for that.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::engine::UnitId;
use crate::errors::RunnerError;
use crate::observability::messages::engine::UnitCancelled;
use crate::observability::messages::StructuredLog;
use crate::traits::{ExecutionRuntime, Step, UnitHandle, UnitWork};

pub struct ThreadRuntime;

impl ThreadRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionRuntime for ThreadRuntime {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn spawn_unit(&self, mut work: Box<dyn UnitWork>) -> Result<Box<dyn UnitHandle>, RunnerError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            RunnerError::RuntimeUnavailable {
                runtime: self.name(),
                reason: e.to_string(),
            }
        })?;

        let id = work.id();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let join = runtime.spawn_blocking(move || loop {
            if cancelled.is_cancelled() {
                UnitCancelled { unit: work.id() }.log();
                break;
            }
            if let Step::Exited(_) = work.step() {
                break;
            }
        });

        Ok(Box::new(ThreadUnitHandle {
            id,
            token,
            join: Some(join),
        }))
    }
}

struct ThreadUnitHandle {
    id: UnitId,
    token: CancellationToken,
    join: Option<JoinHandle<()>>,
}

#[async_trait]
impl UnitHandle for ThreadUnitHandle {
    fn id(&self) -> UnitId {
        self.id
    }

    fn terminate(&self) {
        self.token.cancel();
    }

    fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, |join| join.is_finished())
    }

    async fn wait(&mut self) {
        if let Some(join) = self.join.take() {
            // Processor panics are caught inside the unit, so there is nothing to report.
            let _ = join.await;
        }
    }
}
