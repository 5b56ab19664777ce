// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::ItemProcessor;

/// Reciprocal processor - computes `1 / item`, failing on zero
pub struct ReciprocalProcessor;

impl ReciprocalProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReciprocalProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemProcessor<f64> for ReciprocalProcessor {
    type Output = f64;

    fn process(&self, item: f64) -> anyhow::Result<f64> {
        if item == 0.0 {
            anyhow::bail!("division by zero");
        }
        Ok(1.0 / item)
    }

    fn name(&self) -> &'static str {
        "reciprocal"
    }
}
