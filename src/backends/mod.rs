// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution runtimes and built-in item processors.
//!
//! # Runtimes
//!
//! Every runtime implements [`ExecutionRuntime`](crate::traits::ExecutionRuntime)
//! and can be selected from configuration through
//! [`RuntimeFactory`](crate::engine::RuntimeFactory):
//!
//! - **threads** ([`ThreadRuntime`]): one blocking-pool thread per unit,
//!   cooperative termination between items. The default, and the right choice
//!   for CPU-bound processors.
//! - **tasks** ([`TaskRuntime`]): one tokio task per unit, aborted on
//!   termination. Best for short items.
//! - [`InstrumentedRuntime`] wraps either one and records spawns and
//!   terminations.
//!
//! # Local processors
//!
//! Numeric processors built by name from configuration:
//! ```text
//! Configuration → LocalProcessorFactory → Arc<dyn ItemProcessor<f64>> → Orchestrator
//! ```
//!
//! ```rust
//! use the_divvy::backends::local::LocalProcessorFactory;
//! use the_divvy::config::ProcessorConfig;
//!
//! let config = ProcessorConfig::named("square");
//! let processor = LocalProcessorFactory::create_processor(&config)?;
//! assert_eq!(processor.process(3.0)?, 9.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Stub Backend (Test-Only)
//! Processors with scripted failures, panics and delays for engine tests.

pub mod instrumented;
pub mod local;
#[cfg(test)]
pub mod stub;
pub mod tasks;
pub mod threads;

pub use instrumented::InstrumentedRuntime;
pub use tasks::TaskRuntime;
pub use threads::ThreadRuntime;
