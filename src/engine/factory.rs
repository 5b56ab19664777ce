// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::{TaskRuntime, ThreadRuntime};
use crate::config::{Config, RuntimeKind};
use crate::engine::orchestrator::{Orchestrator, RunnerOptions};
use crate::traits::ExecutionRuntime;

/// Factory for creating execution runtimes and orchestrators from configuration
pub struct RuntimeFactory;

impl RuntimeFactory {
    /// Create the execution runtime named by the configuration
    pub fn runtime_for(kind: &RuntimeKind) -> Arc<dyn ExecutionRuntime> {
        match kind {
            RuntimeKind::Threads => Arc::new(ThreadRuntime::new()),
            RuntimeKind::Tasks => Arc::new(TaskRuntime::new()),
        }
    }

    /// Create an orchestrator using the configured runtime and runner options
    pub fn from_config(cfg: &Config) -> Orchestrator {
        let options: RunnerOptions = cfg.runner_options.to_runner_options();
        Orchestrator::new(Self::runtime_for(&cfg.runtime), options)
    }
}
