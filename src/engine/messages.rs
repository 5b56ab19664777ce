// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The message protocol between execution units and the orchestrator.
//!
//! Units never touch orchestrator state. Everything they have to say travels
//! through an [`Outbox`] as a [`UnitMessage`], and the orchestrator applies
//! those messages one at a time from a single receive loop.

use std::fmt;
use tokio::sync::mpsc;

/// Exit code a unit reports after processing its whole partition.
pub const EXIT_OK: i32 = 0;
/// Exit code a unit reports after emitting an item error.
pub const EXIT_ITEM_FAILED: i32 = 1;
/// Exit code a unit reports when the item processor panicked.
pub const EXIT_PANICKED: i32 = 101;

/// Opaque identity of one execution unit within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub usize);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit-{}", self.0)
    }
}

/// Everything a unit can report.
#[derive(Debug)]
pub enum UnitMessage<R> {
    /// `value` is the processed form of the item at `index`.
    Result { unit: UnitId, index: usize, value: R },
    /// Advisory progress; never changes the outcome of a run.
    Progress { unit: UnitId, percent: u8, note: String },
    /// The processor failed on the item at `index`. The unit stops after this.
    Error {
        unit: UnitId,
        index: usize,
        cause: anyhow::Error,
    },
    /// The unit is gone. `None` means it was torn down without reporting a code.
    Exit { unit: UnitId, code: Option<i32> },
}

impl<R> UnitMessage<R> {
    pub fn unit(&self) -> UnitId {
        match self {
            UnitMessage::Result { unit, .. }
            | UnitMessage::Progress { unit, .. }
            | UnitMessage::Error { unit, .. }
            | UnitMessage::Exit { unit, .. } => *unit,
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UnitMessage::Result { .. } => "result",
            UnitMessage::Progress { .. } => "progress",
            UnitMessage::Error { .. } => "error",
            UnitMessage::Exit { .. } => "exit",
        }
    }
}

/// Sending half handed to a unit at creation.
///
/// Sends never block and never fail loudly: once the orchestrator has settled
/// and dropped its receiver, whatever a lagging unit still emits is discarded.
pub struct Outbox<R> {
    unit: UnitId,
    sender: mpsc::UnboundedSender<UnitMessage<R>>,
}

impl<R> Outbox<R> {
    pub fn new(unit: UnitId, sender: mpsc::UnboundedSender<UnitMessage<R>>) -> Self {
        Self { unit, sender }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn result(&self, index: usize, value: R) {
        self.send(UnitMessage::Result {
            unit: self.unit,
            index,
            value,
        });
    }

    pub fn progress(&self, percent: u8, note: String) {
        self.send(UnitMessage::Progress {
            unit: self.unit,
            percent,
            note,
        });
    }

    pub fn error(&self, index: usize, cause: anyhow::Error) {
        self.send(UnitMessage::Error {
            unit: self.unit,
            index,
            cause,
        });
    }

    pub fn exit(&self, code: Option<i32>) {
        self.send(UnitMessage::Exit {
            unit: self.unit,
            code,
        });
    }

    fn send(&self, message: UnitMessage<R>) {
        // A closed channel means the run already settled.
        let _ = self.sender.send(message);
    }
}
