// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::ItemProcessor;

/// Default number of series terms
pub const DEFAULT_SINE_ITERATIONS: u64 = 100_000;
/// Default scaling factor applied to each item
pub const DEFAULT_SINE_FACTOR: f64 = 1.0;

/// Sine Series processor - sums `sin(item * factor / (i + 1))` for
/// `i in 0..iterations`
pub struct SineSeriesProcessor {
    factor: f64,
    iterations: u64,
}

impl SineSeriesProcessor {
    pub fn new(factor: f64, iterations: u64) -> Self {
        Self { factor, iterations }
    }
}

impl Default for SineSeriesProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_SINE_FACTOR, DEFAULT_SINE_ITERATIONS)
    }
}

impl ItemProcessor<f64> for SineSeriesProcessor {
    type Output = f64;

    fn process(&self, item: f64) -> anyhow::Result<f64> {
        let scaled = item * self.factor;
        let result: f64 = (0..self.iterations)
            .map(|i| (scaled / (i as f64 + 1.0)).sin())
            .sum();
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "sine_series"
    }
}
