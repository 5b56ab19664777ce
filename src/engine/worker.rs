// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The body of one execution unit.
//!
//! A [`UnitWorker`] owns its partition outright and talks to the orchestrator
//! only through its [`Outbox`]. Each [`UnitWork::step`] processes one item and
//! emits either a result or an error; after the last item (or the first error)
//! it emits its exit message and reports [`Step::Exited`].
//!
//! Two things can end a unit without a clean exit code:
//! * a panic inside the item processor, which is caught here and reported as
//!   exit code [`EXIT_PANICKED`] with no preceding error message;
//! * the hosting runtime dropping the worker early (termination, task abort),
//!   in which case `Drop` reports an exit without a code.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::vec;

use crate::engine::messages::{Outbox, UnitId, EXIT_ITEM_FAILED, EXIT_OK, EXIT_PANICKED};
use crate::engine::partitioner::{Partition, WorkItem};
use crate::observability::messages::worker::{ItemFailed, ProcessorPanicked, UnitFinished};
use crate::observability::messages::StructuredLog;
use crate::traits::{ItemProcessor, Step, UnitWork};

pub struct UnitWorker<T, P: ?Sized + ItemProcessor<T>> {
    id: UnitId,
    items: vec::IntoIter<WorkItem<T>>,
    total: usize,
    done: usize,
    processor: Arc<P>,
    outbox: Outbox<P::Output>,
    report_progress: bool,
    exited: bool,
}

impl<T, P> UnitWorker<T, P>
where
    T: Send + 'static,
    P: ItemProcessor<T> + ?Sized + 'static,
{
    pub fn new(
        partition: Partition<T>,
        processor: Arc<P>,
        outbox: Outbox<P::Output>,
        report_progress: bool,
    ) -> Self {
        let total = partition.len();
        Self {
            id: outbox.unit(),
            items: partition.into_iter(),
            total,
            done: 0,
            processor,
            outbox,
            report_progress,
            exited: false,
        }
    }

    fn exit(&mut self, code: i32) -> Step {
        self.exited = true;
        self.outbox.exit(Some(code));
        Step::Exited(code)
    }

    fn percent_done(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.done * 100 / self.total) as u8
    }
}

impl<T, P> UnitWork for UnitWorker<T, P>
where
    T: Send + 'static,
    P: ItemProcessor<T> + ?Sized + 'static,
{
    fn id(&self) -> UnitId {
        self.id
    }

    fn step(&mut self) -> Step {
        if self.exited {
            return Step::Exited(EXIT_OK);
        }

        let Some(WorkItem { index, value }) = self.items.next() else {
            UnitFinished {
                unit: self.id,
                item_count: self.total,
            }
            .log();
            return self.exit(EXIT_OK);
        };

        let processor = &self.processor;
        match catch_unwind(AssertUnwindSafe(|| processor.process(value))) {
            Ok(Ok(output)) => {
                self.outbox.result(index, output);
                self.done += 1;
                if self.report_progress {
                    let note = format!("{}/{} items", self.done, self.total);
                    self.outbox.progress(self.percent_done(), note);
                }
                Step::Continue
            }
            Ok(Err(cause)) => {
                ItemFailed {
                    unit: self.id,
                    index,
                    processor: self.processor.name(),
                    error: &cause,
                }
                .log();
                self.outbox.error(index, cause);
                self.exit(EXIT_ITEM_FAILED)
            }
            Err(_) => {
                ProcessorPanicked {
                    unit: self.id,
                    index,
                    processor: self.processor.name(),
                }
                .log();
                self.exit(EXIT_PANICKED)
            }
        }
    }
}

impl<T, P: ?Sized + ItemProcessor<T>> Drop for UnitWorker<T, P> {
    fn drop(&mut self) {
        if !self.exited {
            self.outbox.exit(None);
        }
    }
}
