// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Static round-robin partitioning of an input sequence.
//!
//! Item `i` lands in partition `i % worker_count`, where `worker_count` is the
//! smaller of the requested worker count and the number of items. This keeps
//! partitions within one item of each other without knowing anything about
//! per-item cost. There is no rebalancing: a partition full of expensive items
//! simply finishes last.
//!
//! ```rust
//! use the_divvy::engine::partitioner::partition;
//!
//! let partitions = partition(vec!["a", "b", "c", "d", "e"], 2).unwrap();
//! assert_eq!(partitions.len(), 2);
//! assert_eq!(partitions[0].indices(), vec![0, 2, 4]);
//! assert_eq!(partitions[1].indices(), vec![1, 3]);
//! ```

use crate::errors::PartitionError;

/// An input value paired with its position in the caller's sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem<T> {
    pub index: usize,
    pub value: T,
}

/// The items assigned to exactly one execution unit, ascending by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    items: Vec<WorkItem<T>>,
}

impl<T> Partition<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[WorkItem<T>] {
        &self.items
    }

    pub fn indices(&self) -> Vec<usize> {
        self.items.iter().map(|item| item.index).collect()
    }
}

impl<T> IntoIterator for Partition<T> {
    type Item = WorkItem<T>;
    type IntoIter = std::vec::IntoIter<WorkItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Number of units a run over `item_count` items will actually use.
pub fn effective_worker_count(item_count: usize, max_workers: usize) -> usize {
    max_workers.min(item_count)
}

/// Split `items` into at most `max_workers` non-empty partitions.
///
/// Returns an empty vector for empty input. Fails only when `max_workers` is 0.
pub fn partition<T>(items: Vec<T>, max_workers: usize) -> Result<Vec<Partition<T>>, PartitionError> {
    if max_workers < 1 {
        return Err(PartitionError::InvalidWorkerCount {
            requested: max_workers,
        });
    }

    let total = items.len();
    let worker_count = effective_worker_count(total, max_workers);
    if worker_count == 0 {
        return Ok(Vec::new());
    }

    let per_partition = total.div_ceil(worker_count);
    let mut partitions: Vec<Partition<T>> = (0..worker_count)
        .map(|_| Partition::with_capacity(per_partition))
        .collect();

    for (index, value) in items.into_iter().enumerate() {
        partitions[index % worker_count]
            .items
            .push(WorkItem { index, value });
    }

    Ok(partitions)
}
