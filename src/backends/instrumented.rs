// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A runtime wrapper that keeps a ledger of unit lifecycles.
//!
//! Wraps any [`ExecutionRuntime`] and records which units were spawned and
//! which were asked to terminate. Useful for diagnosing how a run fanned out
//! and what a failure cancelled.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::engine::UnitId;
use crate::errors::RunnerError;
use crate::traits::{ExecutionRuntime, UnitHandle, UnitWork};

#[derive(Debug, Default)]
struct Ledger {
    spawned: Vec<UnitId>,
    terminated: Vec<UnitId>,
}

pub struct InstrumentedRuntime {
    inner: Arc<dyn ExecutionRuntime>,
    ledger: Arc<Mutex<Ledger>>,
}

impl InstrumentedRuntime {
    pub fn new(inner: Arc<dyn ExecutionRuntime>) -> Self {
        Self {
            inner,
            ledger: Arc::new(Mutex::new(Ledger::default())),
        }
    }

    /// Units spawned so far, in spawn order.
    pub fn spawned(&self) -> Vec<UnitId> {
        self.ledger
            .lock()
            .map(|ledger| ledger.spawned.clone())
            .unwrap_or_default()
    }

    /// Units that received a terminate request, in request order.
    pub fn terminated(&self) -> Vec<UnitId> {
        self.ledger
            .lock()
            .map(|ledger| ledger.terminated.clone())
            .unwrap_or_default()
    }

    pub fn reset(&self) {
        if let Ok(mut ledger) = self.ledger.lock() {
            ledger.spawned.clear();
            ledger.terminated.clear();
        }
    }
}

impl ExecutionRuntime for InstrumentedRuntime {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn spawn_unit(&self, work: Box<dyn UnitWork>) -> Result<Box<dyn UnitHandle>, RunnerError> {
        let handle = self.inner.spawn_unit(work)?;
        if let Ok(mut ledger) = self.ledger.lock() {
            ledger.spawned.push(handle.id());
        }
        Ok(Box::new(InstrumentedHandle {
            inner: handle,
            ledger: self.ledger.clone(),
        }))
    }
}

struct InstrumentedHandle {
    inner: Box<dyn UnitHandle>,
    ledger: Arc<Mutex<Ledger>>,
}

#[async_trait]
impl UnitHandle for InstrumentedHandle {
    fn id(&self) -> UnitId {
        self.inner.id()
    }

    fn terminate(&self) {
        if let Ok(mut ledger) = self.ledger.lock() {
            ledger.terminated.push(self.inner.id());
        }
        self.inner.terminate();
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    async fn wait(&mut self) {
        self.inner.wait().await;
    }
}
