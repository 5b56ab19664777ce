// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::time::Duration;

use crate::traits::ItemProcessor;

/// Doubles its input; the baseline processor for engine tests
pub struct StubProcessor;

impl ItemProcessor<i64> for StubProcessor {
    type Output = i64;

    fn process(&self, item: i64) -> anyhow::Result<i64> {
        Ok(item * 2)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// A processor that fails on one specific value for testing failure scenarios
pub struct FailingProcessor {
    pub fail_on: i64,
}

impl FailingProcessor {
    pub fn new(fail_on: i64) -> Self {
        Self { fail_on }
    }
}

impl ItemProcessor<i64> for FailingProcessor {
    type Output = i64;

    fn process(&self, item: i64) -> anyhow::Result<i64> {
        if item == self.fail_on {
            anyhow::bail!("Simulated failure on {}", item);
        }
        Ok(item * 2)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A processor that panics on one specific value, standing in for a unit crash
pub struct PanickingProcessor {
    pub panic_on: i64,
}

impl ItemProcessor<i64> for PanickingProcessor {
    type Output = i64;

    fn process(&self, item: i64) -> anyhow::Result<i64> {
        if item == self.panic_on {
            panic!("Simulated panic on {}", item);
        }
        Ok(item * 2)
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

/// Sleeps before doubling selected values and can fail on one of them
pub struct SlowProcessor {
    pub delays: HashMap<i64, Duration>,
    pub fail_on: Option<i64>,
}

impl SlowProcessor {
    pub fn new(delays: impl IntoIterator<Item = (i64, Duration)>) -> Self {
        Self {
            delays: delays.into_iter().collect(),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, value: i64) -> Self {
        self.fail_on = Some(value);
        self
    }
}

impl ItemProcessor<i64> for SlowProcessor {
    type Output = i64;

    fn process(&self, item: i64) -> anyhow::Result<i64> {
        if let Some(delay) = self.delays.get(&item) {
            std::thread::sleep(*delay);
        }
        if self.fail_on == Some(item) {
            anyhow::bail!("Simulated failure on {}", item);
        }
        Ok(item * 2)
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}
