// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Broken invariants of the result buffer.
///
/// These can only happen when partitioning or a unit misbehaves, so the
/// orchestrator treats them as bugs and panics rather than reporting them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("result slot {index} written twice")]
    SlotAlreadyWritten { index: usize },

    #[error("result index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("result buffer incomplete: {missing} of {len} slots unset")]
    Incomplete { missing: usize, len: usize },
}
