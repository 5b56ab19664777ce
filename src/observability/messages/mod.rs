// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it as a leveled `tracing` event with its fields
//! attached, or to open a span carrying the same fields.
//!
//! # Organization
//!
//! * `engine` - Orchestrator and execution runtime events
//! * `worker` - Execution unit events
//! * `validation` - Configuration validation errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_divvy::observability::messages::engine::RunStarted;
//! use the_divvy::observability::messages::StructuredLog;
//!
//! let msg = RunStarted {
//!     runtime: "threads",
//!     processor: "square",
//!     item_count: 100,
//!     worker_count: 4,
//! };
//!
//! let span = msg.span("parallel_run");
//! let _guard = span.enter();
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod validation;
pub mod worker;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: std::fmt::Display {
    /// Emit the message as a `tracing` event at its level.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
