// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::ItemProcessor;

/// Square processor - multiplies each item by itself
pub struct SquareProcessor;

impl SquareProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SquareProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemProcessor<f64> for SquareProcessor {
    type Output = f64;

    fn process(&self, item: f64) -> anyhow::Result<f64> {
        Ok(item * item)
    }

    fn name(&self) -> &'static str {
        "square"
    }
}
