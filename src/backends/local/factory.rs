// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::processors::*;
use crate::config::ProcessorConfig;
use crate::errors::ValidationError;
use crate::traits::SharedProcessor;

/// Factory for creating local (in-process) numeric processors
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a processor instance from configuration
    ///
    /// The `name` field in the config determines which processor to create:
    /// - "heavy_computation" -> HeavyComputationProcessor (option: `iterations`)
    /// - "sine_series" -> SineSeriesProcessor (options: `factor`, `iterations`)
    /// - "square" -> SquareProcessor
    /// - "reciprocal" -> ReciprocalProcessor
    pub fn create_processor(config: &ProcessorConfig) -> Result<SharedProcessor<f64, f64>, ValidationError> {
        match config.name.as_str() {
            "heavy_computation" => {
                let iterations = u64_option(config, "iterations", DEFAULT_HEAVY_ITERATIONS)?;
                Ok(Arc::new(HeavyComputationProcessor::new(iterations)))
            }
            "sine_series" => {
                let factor = f64_option(config, "factor", DEFAULT_SINE_FACTOR)?;
                let iterations = u64_option(config, "iterations", DEFAULT_SINE_ITERATIONS)?;
                Ok(Arc::new(SineSeriesProcessor::new(factor, iterations)))
            }
            "square" => Ok(Arc::new(SquareProcessor::new())),
            "reciprocal" => Ok(Arc::new(ReciprocalProcessor::new())),

            // Add more processors here as they're implemented
            _ => Err(ValidationError::UnknownProcessor {
                name: config.name.clone(),
                available: Self::list_available_implementations(),
            }),
        }
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["heavy_computation", "sine_series", "square", "reciprocal"]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(name: &str) -> bool {
        Self::list_available_implementations().contains(&name)
    }
}

fn u64_option(config: &ProcessorConfig, key: &str, default: u64) -> Result<u64, ValidationError> {
    match config.options.get(key) {
        None => Ok(default),
        Some(value) => value.as_u64().ok_or_else(|| ValidationError::InvalidProcessorOption {
            processor: config.name.clone(),
            option: key.to_string(),
            expected: "a non-negative integer",
        }),
    }
}

fn f64_option(config: &ProcessorConfig, key: &str, default: f64) -> Result<f64, ValidationError> {
    match config.options.get(key) {
        None => Ok(default),
        Some(value) => value.as_f64().ok_or_else(|| ValidationError::InvalidProcessorOption {
            processor: config.name.clone(),
            option: key.to_string(),
            expected: "a number",
        }),
    }
}
