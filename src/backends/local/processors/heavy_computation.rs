// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::f64::consts::PI;

use crate::traits::ItemProcessor;

/// Default number of accumulation rounds per item
pub const DEFAULT_HEAVY_ITERATIONS: u64 = 1_000_000;

/// Heavy Computation processor - a deliberately CPU-bound benchmark that adds
/// `sqrt(item * PI)` to an accumulator `iterations` times
pub struct HeavyComputationProcessor {
    iterations: u64,
}

impl HeavyComputationProcessor {
    pub fn new(iterations: u64) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl Default for HeavyComputationProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_HEAVY_ITERATIONS)
    }
}

impl ItemProcessor<f64> for HeavyComputationProcessor {
    type Output = f64;

    fn process(&self, item: f64) -> anyhow::Result<f64> {
        if item < 0.0 {
            anyhow::bail!("heavy_computation needs a non-negative input, got {item}");
        }
        let term = (item * PI).sqrt();
        let mut result = 0.0;
        for _ in 0..self.iterations {
            result += term;
        }
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "heavy_computation"
    }
}
