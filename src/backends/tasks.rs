// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution units as plain tokio tasks.
//!
//! Cheaper than [`ThreadRuntime`](super::ThreadRuntime) and forcefully
//! cancellable: `terminate` aborts the task, which takes effect at the yield
//! between two items. Each item runs inside `block_in_place`, so a long item
//! never starves the orchestrator's receive loop. That needs a multi-thread
//! tokio runtime; spawning from a current-thread runtime is refused.

use async_trait::async_trait;
use tokio::runtime::RuntimeFlavor;
use tokio::task::JoinHandle;

use crate::engine::UnitId;
use crate::errors::RunnerError;
use crate::traits::{ExecutionRuntime, Step, UnitHandle, UnitWork};

pub struct TaskRuntime;

impl TaskRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TaskRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionRuntime for TaskRuntime {
    fn name(&self) -> &'static str {
        "tasks"
    }

    fn spawn_unit(&self, mut work: Box<dyn UnitWork>) -> Result<Box<dyn UnitHandle>, RunnerError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            RunnerError::RuntimeUnavailable {
                runtime: self.name(),
                reason: e.to_string(),
            }
        })?;
        if runtime.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(RunnerError::RuntimeUnavailable {
                runtime: self.name(),
                reason: "block_in_place requires a multi-thread tokio runtime".to_string(),
            });
        }

        let id = work.id();
        let join = runtime.spawn(async move {
            while let Step::Continue = tokio::task::block_in_place(|| work.step()) {
                tokio::task::yield_now().await;
            }
        });

        Ok(Box::new(TaskUnitHandle {
            id,
            join: Some(join),
        }))
    }
}

struct TaskUnitHandle {
    id: UnitId,
    join: Option<JoinHandle<()>>,
}

#[async_trait]
impl UnitHandle for TaskUnitHandle {
    fn id(&self) -> UnitId {
        self.id
    }

    fn terminate(&self) {
        if let Some(join) = &self.join {
            join.abort();
        }
    }

    fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, |join| join.is_finished())
    }

    async fn wait(&mut self) {
        if let Some(join) = self.join.take() {
            // Aborted tasks resolve with a cancellation error, which is expected.
            let _ = join.await;
        }
    }
}
