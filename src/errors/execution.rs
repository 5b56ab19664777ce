// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced to callers of the parallel runner.

use std::time::Duration;
use thiserror::Error;

use crate::engine::UnitId;

/// Rejection of the partitioning request itself, raised before any unit exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("max_workers must be at least 1, got {requested}")]
    InvalidWorkerCount { requested: usize },
}

/// The single failure cause a run resolves to.
///
/// Only the first failure observed during a run is ever reported; anything
/// that goes wrong afterwards (including errors from units that were being
/// terminated) is logged and dropped.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// The item processor returned an error for the item at `index`.
    #[error("{unit} failed processing item {index}: {source}")]
    UnitExecution {
        unit: UnitId,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// A unit went away without reporting a structured error.
    #[error(
        "{unit} exited abnormally with code {}",
        .code.map_or_else(|| "<none>".to_string(), |c| c.to_string())
    )]
    UnitCrash { unit: UnitId, code: Option<i32> },

    #[error("operation did not settle within {timeout:?}")]
    TimedOut { timeout: Duration },

    #[error("{runtime} runtime could not start a unit: {reason}")]
    RuntimeUnavailable {
        runtime: &'static str,
        reason: String,
    },
}

impl RunnerError {
    /// Original index of the failing item, when the failure is tied to one.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            RunnerError::UnitExecution { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Unit the failure originated from, when there is one.
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            RunnerError::UnitExecution { unit, .. } | RunnerError::UnitCrash { unit, .. } => {
                Some(*unit)
            }
            _ => None,
        }
    }
}
