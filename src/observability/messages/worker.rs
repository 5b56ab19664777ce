// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for events raised inside execution units.

use crate::engine::UnitId;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// The item processor returned an error for one item.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_divvy::engine::UnitId;
/// use the_divvy::observability::messages::worker::ItemFailed;
///
/// let error = anyhow::anyhow!("division by zero");
/// let msg = ItemFailed {
///     unit: UnitId(0),
///     index: 7,
///     processor: "reciprocal",
///     error: &error,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Processor 'reciprocal' failed on item 7 in unit-0: division by zero"
/// );
/// ```
pub struct ItemFailed<'a> {
    pub unit: UnitId,
    pub index: usize,
    pub processor: &'a str,
    pub error: &'a anyhow::Error,
}

impl Display for ItemFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' failed on item {} in {}: {}",
            self.processor, self.index, self.unit, self.error
        )
    }
}

impl StructuredLog for ItemFailed<'_> {
    fn log(&self) {
        tracing::error!(
            unit = %self.unit,
            index = self.index,
            processor = self.processor,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "item_failed",
            span_name = name,
            unit = %self.unit,
            index = self.index,
            processor = self.processor,
        )
    }
}

/// The item processor panicked; the unit exits as a crash.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ProcessorPanicked<'a> {
    pub unit: UnitId,
    pub index: usize,
    pub processor: &'a str,
}

impl Display for ProcessorPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' panicked on item {} in {}",
            self.processor, self.index, self.unit
        )
    }
}

impl StructuredLog for ProcessorPanicked<'_> {
    fn log(&self) {
        tracing::error!(
            unit = %self.unit,
            index = self.index,
            processor = self.processor,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "processor_panicked",
            span_name = name,
            unit = %self.unit,
            index = self.index,
            processor = self.processor,
        )
    }
}

/// A unit processed its whole partition.
///
/// # Log Level
/// `debug!` - Per-unit detail
pub struct UnitFinished {
    pub unit: UnitId,
    pub item_count: usize,
}

impl Display for UnitFinished {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} finished {} items", self.unit, self.item_count)
    }
}

impl StructuredLog for UnitFinished {
    fn log(&self) {
        tracing::debug!(unit = %self.unit, item_count = self.item_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "unit_finished",
            span_name = name,
            unit = %self.unit,
            item_count = self.item_count,
        )
    }
}

/// Advisory progress from a unit.
///
/// # Log Level
/// `debug!` - Advisory only
pub struct ProgressReported<'a> {
    pub unit: UnitId,
    pub percent: u8,
    pub note: &'a str,
}

impl Display for ProgressReported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} at {}%: {}", self.unit, self.percent, self.note)
    }
}

impl StructuredLog for ProgressReported<'_> {
    fn log(&self) {
        tracing::debug!(
            unit = %self.unit,
            percent = self.percent,
            note = self.note,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "progress",
            span_name = name,
            unit = %self.unit,
            percent = self.percent,
        )
    }
}
