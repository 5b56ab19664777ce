// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The settlement state machine behind the orchestrator.
//!
//! [`Supervisor`] holds everything a run decides on: the result buffer, which
//! units are still live, and the first failure seen. It is fed one
//! [`UnitMessage`] at a time and answers with a [`Directive`] telling the
//! async driver what to do next. Keeping it free of channels and timers means
//! any message interleaving can be replayed in a plain unit test.
//!
//! ```text
//! Idle ──partition──▶ Dispatching ──no partitions──────────────────────────▶ Succeeded
//!                         │
//!                         └──units spawned──▶ Running
//!
//! Running ──all units exit 0──▶ Settling ──settle()──▶ Succeeded
//!    │
//!    └──first error / abnormal exit / timeout──▶ Settling ──settle()──▶ Failed
//! ```
//!
//! `Idle` and `Dispatching` happen inside [`Orchestrator::run`] before a
//! supervisor exists: the input is partitioned and one unit is spawned per
//! partition. Empty input resolves to an empty success there, and a spawn
//! failure ends the run before any message is read. [`RunState`] therefore
//! starts at `Running`.
//!
//! [`Orchestrator::run`]: crate::engine::Orchestrator::run
//!
//! Once [`Supervisor::settle`] has produced the outcome, the machine is
//! terminal and every further message is discarded.

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::aggregator::AggregateBuffer;
use crate::engine::messages::{UnitId, UnitMessage, EXIT_OK};
use crate::engine::Outcome;
use crate::errors::RunnerError;
use crate::observability::messages::engine::{
    LateMessageDiscarded, SecondaryFailureIgnored, UnitExited,
};
use crate::observability::messages::worker::ProgressReported;
use crate::observability::messages::StructuredLog;
use crate::traits::ProgressObserver;

/// Lifecycle of one run, from the orchestrator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Settling,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }
}

/// What the driver should do after a message has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Keep receiving.
    Continue,
    /// A failure was just flagged: terminate every live unit, then settle.
    Cancel,
    /// Every unit exited cleanly: settle.
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitStatus {
    Live,
    Exited,
}

pub struct Supervisor<R> {
    state: RunState,
    buffer: AggregateBuffer<R>,
    units: HashMap<UnitId, UnitStatus>,
    failure: Option<RunnerError>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl<R> Supervisor<R> {
    pub fn new(item_count: usize, units: impl IntoIterator<Item = UnitId>) -> Self {
        let units: HashMap<UnitId, UnitStatus> =
            units.into_iter().map(|id| (id, UnitStatus::Live)).collect();
        let state = if units.is_empty() {
            RunState::Settling
        } else {
            RunState::Running
        };
        Self {
            state,
            buffer: AggregateBuffer::new(item_count),
            units,
            failure: None,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Option<Arc<dyn ProgressObserver>>) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Units that have not reported an exit yet, in id order.
    pub fn live_units(&self) -> Vec<UnitId> {
        let mut live: Vec<UnitId> = self
            .units
            .iter()
            .filter(|(_, status)| **status == UnitStatus::Live)
            .map(|(id, _)| *id)
            .collect();
        live.sort_unstable();
        live
    }

    /// Apply one inbound message.
    pub fn handle(&mut self, message: UnitMessage<R>) -> Directive {
        if self.state.is_terminal() {
            LateMessageDiscarded {
                unit: message.unit(),
                kind: message.kind(),
            }
            .log();
            return Directive::Continue;
        }

        match message {
            UnitMessage::Result { unit, index, value } => {
                if self.failure.is_some() {
                    LateMessageDiscarded { unit, kind: "result" }.log();
                } else {
                    self.buffer.write(index, value);
                }
                Directive::Continue
            }
            UnitMessage::Progress {
                unit,
                percent,
                note,
            } => {
                ProgressReported {
                    unit,
                    percent,
                    note: &note,
                }
                .log();
                if let Some(observer) = &self.observer {
                    observer.on_progress(unit, percent, &note);
                }
                Directive::Continue
            }
            UnitMessage::Error { unit, index, cause } => {
                self.mark_exited(unit);
                self.fail(RunnerError::UnitExecution {
                    unit,
                    index,
                    source: cause,
                })
            }
            UnitMessage::Exit { unit, code } => {
                let was_live = self.mark_exited(unit);
                UnitExited { unit, code }.log();
                if code == Some(EXIT_OK) {
                    self.check_all_exited()
                } else if was_live {
                    self.fail(RunnerError::UnitCrash { unit, code })
                } else {
                    // Non-zero exit following the unit's own error message.
                    Directive::Continue
                }
            }
        }
    }

    /// Flag a failure that did not come from a unit message (timeouts, a
    /// closed channel). The first failure wins, as with unit failures.
    pub fn fail(&mut self, error: RunnerError) -> Directive {
        if self.state.is_terminal() {
            return Directive::Continue;
        }
        if let Some(first) = &self.failure {
            SecondaryFailureIgnored {
                first,
                ignored: &error,
            }
            .log();
            return Directive::Continue;
        }
        self.failure = Some(error);
        self.state = RunState::Settling;
        Directive::Cancel
    }

    /// Produce the outcome. Returns `Some` exactly once, and only from the
    /// `Settling` state.
    pub fn settle(&mut self) -> Option<Outcome<R>> {
        if self.state != RunState::Settling {
            return None;
        }
        match self.failure.take() {
            Some(error) => {
                self.state = RunState::Failed;
                Some(Err(error))
            }
            None => {
                self.state = RunState::Succeeded;
                Some(Ok(self.buffer.take_ordered()))
            }
        }
    }

    /// Returns whether the unit was still considered live.
    fn mark_exited(&mut self, unit: UnitId) -> bool {
        match self.units.get_mut(&unit) {
            Some(status) if *status == UnitStatus::Live => {
                *status = UnitStatus::Exited;
                true
            }
            _ => false,
        }
    }

    fn check_all_exited(&mut self) -> Directive {
        if self.failure.is_some() || !self.live_units().is_empty() {
            return Directive::Continue;
        }
        self.state = RunState::Settling;
        Directive::Finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn result(unit: usize, index: usize, value: i32) -> UnitMessage<i32> {
        UnitMessage::Result {
            unit: UnitId(unit),
            index,
            value,
        }
    }

    fn exit(unit: usize, code: Option<i32>) -> UnitMessage<i32> {
        UnitMessage::Exit {
            unit: UnitId(unit),
            code,
        }
    }

    fn error(unit: usize, index: usize, text: &str) -> UnitMessage<i32> {
        UnitMessage::Error {
            unit: UnitId(unit),
            index,
            cause: anyhow::anyhow!(text.to_string()),
        }
    }

    /// Two units over `[1, 2, 3, 4]` squared: unit 0 holds indices 0 and 2,
    /// unit 1 holds indices 1 and 3.
    fn clean_run() -> Vec<UnitMessage<i32>> {
        vec![
            result(0, 0, 1),
            result(0, 2, 9),
            exit(0, Some(0)),
            result(1, 1, 4),
            result(1, 3, 16),
            exit(1, Some(0)),
        ]
    }

    fn replay(order: &[usize]) -> Outcome<i32> {
        let mut messages: Vec<Option<UnitMessage<i32>>> = clean_run().into_iter().map(Some).collect();
        let mut supervisor = Supervisor::new(4, [UnitId(0), UnitId(1)]);
        let mut finished = false;
        for &i in order {
            let message = messages[i].take().expect("each message delivered once");
            if supervisor.handle(message) == Directive::Finish {
                finished = true;
            }
        }
        assert!(finished);
        supervisor.settle().expect("settles once")
    }

    #[test]
    fn test_clean_run_settles_in_input_order() {
        let outcome = replay(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(outcome.unwrap(), vec![1, 4, 9, 16]);
    }

    #[test]
    fn test_reordered_delivery_yields_identical_output() {
        // Interleavings that keep each unit's own exit after its results.
        let orders: [[usize; 6]; 4] = [
            [3, 0, 4, 1, 5, 2],
            [3, 4, 5, 0, 1, 2],
            [1, 4, 0, 3, 2, 5],
            [4, 1, 3, 0, 5, 2],
        ];
        for order in orders {
            assert_eq!(replay(&order).unwrap(), vec![1, 4, 9, 16], "order {order:?}");
        }
    }

    #[test]
    fn test_finish_only_after_last_exit() {
        let mut supervisor = Supervisor::new(2, [UnitId(0), UnitId(1)]);
        assert_eq!(supervisor.handle(result(0, 0, 1)), Directive::Continue);
        assert_eq!(supervisor.handle(exit(0, Some(0))), Directive::Continue);
        assert_eq!(supervisor.state(), RunState::Running);
        assert_eq!(supervisor.live_units(), vec![UnitId(1)]);
        assert_eq!(supervisor.handle(result(1, 1, 2)), Directive::Continue);
        assert_eq!(supervisor.handle(exit(1, Some(0))), Directive::Finish);
        assert_eq!(supervisor.state(), RunState::Settling);
    }

    #[test]
    fn test_no_units_is_immediately_settling() {
        let mut supervisor: Supervisor<i32> = Supervisor::new(0, []);
        assert_eq!(supervisor.state(), RunState::Settling);
        assert_eq!(supervisor.settle().unwrap().unwrap(), Vec::<i32>::new());
        assert_eq!(supervisor.state(), RunState::Succeeded);
    }

    #[test]
    fn test_error_flags_failure_and_requests_cancel() {
        let mut supervisor = Supervisor::new(4, [UnitId(0), UnitId(1)]);
        supervisor.handle(result(0, 0, 1));
        assert!(!supervisor.has_failed());
        assert_eq!(supervisor.handle(error(0, 2, "bad item")), Directive::Cancel);
        assert!(supervisor.has_failed());
        assert_eq!(supervisor.state(), RunState::Settling);
        assert_eq!(supervisor.live_units(), vec![UnitId(1)]);

        // The failing unit's own non-zero exit does not count as a second failure.
        assert_eq!(supervisor.handle(exit(0, Some(1))), Directive::Continue);

        let outcome = supervisor.settle().unwrap();
        let err = outcome.unwrap_err();
        assert_eq!(err.item_index(), Some(2));
        assert_eq!(err.unit(), Some(UnitId(0)));
        assert_eq!(supervisor.state(), RunState::Failed);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut supervisor = Supervisor::new(4, [UnitId(0), UnitId(1)]);
        assert_eq!(supervisor.handle(error(1, 3, "first")), Directive::Cancel);
        assert_eq!(supervisor.handle(error(0, 0, "second")), Directive::Continue);
        assert_eq!(supervisor.handle(exit(0, Some(101))), Directive::Continue);

        match supervisor.settle().unwrap() {
            Err(RunnerError::UnitExecution { index, source, .. }) => {
                assert_eq!(index, 3);
                assert_eq!(source.to_string(), "first");
            }
            other => panic!("unexpected outcome: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_abnormal_exit_without_error_is_a_crash() {
        let mut supervisor = Supervisor::new(2, [UnitId(0), UnitId(1)]);
        supervisor.handle(result(1, 1, 5));
        assert_eq!(supervisor.handle(exit(0, Some(101))), Directive::Cancel);
        assert!(matches!(
            supervisor.settle(),
            Some(Err(RunnerError::UnitCrash {
                unit: UnitId(0),
                code: Some(101)
            }))
        ));
    }

    #[test]
    fn test_vanished_unit_is_a_crash_without_code() {
        let mut supervisor = Supervisor::new(1, [UnitId(0)]);
        assert_eq!(supervisor.handle(exit(0, None)), Directive::Cancel);
        assert!(matches!(
            supervisor.settle(),
            Some(Err(RunnerError::UnitCrash { code: None, .. }))
        ));
    }

    #[test]
    fn test_late_messages_after_failure_are_no_ops() {
        let mut supervisor = Supervisor::new(4, [UnitId(0), UnitId(1)]);
        supervisor.handle(error(0, 2, "boom"));
        let outcome = supervisor.settle().unwrap();
        assert!(outcome.is_err());

        // Lagging unit keeps talking; nothing changes and nothing panics,
        // even a write to a slot that would otherwise collide.
        for message in [
            result(1, 1, 4),
            result(1, 1, 4),
            result(1, 99, 0),
            exit(1, Some(0)),
            error(1, 3, "late"),
            exit(1, None),
        ] {
            assert_eq!(supervisor.handle(message), Directive::Continue);
        }
        assert_eq!(supervisor.state(), RunState::Failed);
        assert!(supervisor.settle().is_none());
    }

    #[test]
    fn test_results_while_settling_are_discarded() {
        let mut supervisor = Supervisor::new(4, [UnitId(0), UnitId(1)]);
        supervisor.handle(error(0, 0, "boom"));
        // Still settling: a result for an out-of-range slot must not trip the buffer.
        assert_eq!(supervisor.handle(result(1, 42, 0)), Directive::Continue);
        assert!(supervisor.settle().unwrap().is_err());
    }

    #[test]
    fn test_external_failure_after_success_ignored() {
        let mut supervisor = Supervisor::new(1, [UnitId(0)]);
        supervisor.handle(result(0, 0, 7));
        assert_eq!(supervisor.handle(exit(0, Some(0))), Directive::Finish);
        assert_eq!(supervisor.settle().unwrap().unwrap(), vec![7]);
        assert_eq!(
            supervisor.fail(RunnerError::TimedOut {
                timeout: std::time::Duration::from_secs(1)
            }),
            Directive::Continue
        );
        assert_eq!(supervisor.state(), RunState::Succeeded);
    }

    #[test]
    fn test_progress_forwarded_to_observer() {
        struct Recorder(Mutex<Vec<(UnitId, u8)>>);
        impl ProgressObserver for Recorder {
            fn on_progress(&self, unit: UnitId, percent: u8, _note: &str) {
                self.0.lock().unwrap().push((unit, percent));
            }
        }

        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut supervisor: Supervisor<i32> = Supervisor::new(2, [UnitId(0)])
            .with_observer(Some(recorder.clone() as Arc<dyn ProgressObserver>));

        let directive = supervisor.handle(UnitMessage::Progress {
            unit: UnitId(0),
            percent: 50,
            note: "1/2 items".to_string(),
        });
        assert_eq!(directive, Directive::Continue);
        assert_eq!(supervisor.state(), RunState::Running);
        assert_eq!(*recorder.0.lock().unwrap(), vec![(UnitId(0), 50)]);
    }
}
