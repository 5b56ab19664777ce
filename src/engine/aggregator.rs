// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::AggregationError;

/// Fixed-size, write-once result buffer addressed by original index.
///
/// Owned by the orchestrator alone; units only ever reach it through messages.
#[derive(Debug)]
pub struct AggregateBuffer<R> {
    slots: Vec<Option<R>>,
    filled: usize,
}

impl<R> AggregateBuffer<R> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
            filled: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.slots.len()
    }

    pub fn try_write(&mut self, index: usize, value: R) -> Result<(), AggregationError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AggregationError::IndexOutOfRange { index, len })?;
        if slot.is_some() {
            return Err(AggregationError::SlotAlreadyWritten { index });
        }
        *slot = Some(value);
        self.filled += 1;
        Ok(())
    }

    /// Write a slot, panicking on a double write or a bad index.
    pub fn write(&mut self, index: usize, value: R) {
        if let Err(err) = self.try_write(index, value) {
            panic!("aggregation invariant violated: {err}");
        }
    }

    /// Move the results out in index order, leaving the buffer empty.
    pub fn try_take_ordered(&mut self) -> Result<Vec<R>, AggregationError> {
        if !self.is_complete() {
            return Err(AggregationError::Incomplete {
                missing: self.slots.len() - self.filled,
                len: self.slots.len(),
            });
        }
        self.filled = 0;
        Ok(std::mem::take(&mut self.slots).into_iter().flatten().collect())
    }

    pub fn take_ordered(&mut self) -> Vec<R> {
        match self.try_take_ordered() {
            Ok(values) => values,
            Err(err) => panic!("aggregation invariant violated: {err}"),
        }
    }

    pub fn into_ordered(mut self) -> Vec<R> {
        self.take_ordered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_writes_come_back_ordered() {
        let mut buffer = AggregateBuffer::new(4);
        buffer.write(3, "d");
        buffer.write(0, "a");
        assert!(!buffer.is_complete());
        buffer.write(2, "c");
        buffer.write(1, "b");

        assert!(buffer.is_complete());
        assert_eq!(buffer.into_ordered(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_buffer_is_complete() {
        let buffer: AggregateBuffer<u8> = AggregateBuffer::new(0);
        assert!(buffer.is_complete());
        assert!(buffer.into_ordered().is_empty());
    }

    #[test]
    fn test_double_write_reported() {
        let mut buffer = AggregateBuffer::new(2);
        buffer.try_write(1, 10).unwrap();
        assert_eq!(
            buffer.try_write(1, 11),
            Err(AggregationError::SlotAlreadyWritten { index: 1 })
        );
        assert_eq!(buffer.filled(), 1);
    }

    #[test]
    fn test_out_of_range_reported() {
        let mut buffer = AggregateBuffer::new(2);
        assert_eq!(
            buffer.try_write(2, 0),
            Err(AggregationError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_incomplete_take_reported() {
        let mut buffer = AggregateBuffer::new(3);
        buffer.write(0, 1);
        assert_eq!(
            buffer.try_take_ordered(),
            Err(AggregationError::Incomplete { missing: 2, len: 3 })
        );
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn test_write_panics_on_double_write() {
        let mut buffer = AggregateBuffer::new(1);
        buffer.write(0, ());
        buffer.write(0, ());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_write_panics_out_of_range() {
        let mut buffer = AggregateBuffer::new(1);
        buffer.write(5, ());
    }
}
