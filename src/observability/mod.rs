// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging in the runner. Message types follow a struct-based pattern with
//! `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep the human-readable text and the structured fields side by side
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Run lifecycle, unit spawning and cancellation events
//! * `messages::worker` - Per-item events raised inside execution units
//! * `messages::validation` - Configuration validation errors
//!
//! # Usage
//!
//! ```rust
//! use the_divvy::engine::UnitId;
//! use the_divvy::observability::messages::worker::UnitFinished;
//! use the_divvy::observability::messages::StructuredLog;
//!
//! let msg = UnitFinished {
//!     unit: UnitId(2),
//!     item_count: 25,
//! };
//!
//! msg.log();
//! assert_eq!(msg.to_string(), "unit-2 finished 25 items");
//! ```

pub mod messages;
