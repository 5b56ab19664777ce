// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for runner configs.
//!
//! Validation runs every check and accumulates all problems, so a user sees
//! every issue with a config file at once rather than fixing them one by one.
//!
//! # Checks
//!
//! 1. **Worker count**: `max_workers`, when set, must be at least 1
//! 2. **Timeouts**: `termination_timeout_ms` and `operation_timeout_seconds`,
//!    when set, must be non-zero
//! 3. **Processor**: the name must be a known built-in and its options must
//!    have the expected types
//!
//! # Examples
//!
//! ```rust
//! use the_divvy::config::{validate_config, Config, ProcessorConfig, RunnerConfig, RuntimeKind};
//! use the_divvy::errors::ValidationError;
//!
//! let config = Config {
//!     runtime: RuntimeKind::Threads,
//!     runner_options: RunnerConfig {
//!         max_workers: Some(0),
//!         ..RunnerConfig::default()
//!     },
//!     processor: ProcessorConfig::named("square"),
//! };
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::ZeroWorkers]);
//! ```

use crate::backends::local::LocalProcessorFactory;
use crate::config::{Config, RunnerConfig};
use crate::errors::ValidationError;
use crate::observability::messages::validation::ConfigValidationFailed;
use crate::observability::messages::StructuredLog;
use crate::traits::SharedProcessor;

/// Validates a configuration, returning every problem found.
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid and ready to run
/// * `Err(Vec<ValidationError>)` - List of all validation errors found
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    build_validated_processor(config).map(|_| ())
}

/// Runs every check and builds the configured processor in the same pass.
///
/// A processor that cannot be built contributes its error to the list
/// alongside any runner option problems.
pub fn build_validated_processor(
    config: &Config,
) -> Result<SharedProcessor<f64, f64>, Vec<ValidationError>> {
    let mut errors = validate_runner_options(&config.runner_options);

    // Constructing the processor checks both the name and its options.
    let processor = match LocalProcessorFactory::create_processor(&config.processor) {
        Ok(processor) => Some(processor),
        Err(error) => {
            errors.push(error);
            None
        }
    };

    match processor {
        Some(processor) if errors.is_empty() => Ok(processor),
        _ => {
            ConfigValidationFailed {
                error_count: errors.len(),
                errors: &errors,
            }
            .log();
            Err(errors)
        }
    }
}

fn validate_runner_options(options: &RunnerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if options.max_workers == Some(0) {
        errors.push(ValidationError::ZeroWorkers);
    }
    if options.termination_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout {
            option: "termination_timeout_ms",
        });
    }
    if options.operation_timeout_seconds == Some(0) {
        errors.push(ValidationError::ZeroTimeout {
            option: "operation_timeout_seconds",
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProcessorConfig, RuntimeKind};

    fn config(runner_options: RunnerConfig, processor: ProcessorConfig) -> Config {
        Config {
            runtime: RuntimeKind::Threads,
            runner_options,
            processor,
        }
    }

    #[test]
    fn test_valid_config() {
        let cfg = config(
            RunnerConfig {
                max_workers: Some(4),
                termination_timeout_ms: Some(200),
                operation_timeout_seconds: Some(30),
                report_progress: Some(true),
            },
            ProcessorConfig::named("heavy_computation").with_option("iterations", 1000u64),
        );

        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_defaults_are_valid() {
        let cfg = config(RunnerConfig::default(), ProcessorConfig::named("square"));
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_zero_workers() {
        let cfg = config(
            RunnerConfig {
                max_workers: Some(0),
                ..RunnerConfig::default()
            },
            ProcessorConfig::named("square"),
        );

        assert_eq!(
            validate_config(&cfg).unwrap_err(),
            vec![ValidationError::ZeroWorkers]
        );
    }

    #[test]
    fn test_zero_timeouts() {
        let cfg = config(
            RunnerConfig {
                termination_timeout_ms: Some(0),
                operation_timeout_seconds: Some(0),
                ..RunnerConfig::default()
            },
            ProcessorConfig::named("square"),
        );

        assert_eq!(
            validate_config(&cfg).unwrap_err(),
            vec![
                ValidationError::ZeroTimeout {
                    option: "termination_timeout_ms"
                },
                ValidationError::ZeroTimeout {
                    option: "operation_timeout_seconds"
                },
            ]
        );
    }

    #[test]
    fn test_unknown_processor() {
        let cfg = config(RunnerConfig::default(), ProcessorConfig::named("fibonacci"));

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::UnknownProcessor { name, available } => {
                assert_eq!(name, "fibonacci");
                assert!(available.contains(&"heavy_computation"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_processor_option() {
        let cfg = config(
            RunnerConfig::default(),
            ProcessorConfig::named("sine_series").with_option("factor", "loud"),
        );

        assert_eq!(
            validate_config(&cfg).unwrap_err(),
            vec![ValidationError::InvalidProcessorOption {
                processor: "sine_series".to_string(),
                option: "factor".to_string(),
                expected: "a number",
            }]
        );
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let cfg = config(
            RunnerConfig {
                max_workers: Some(0),
                operation_timeout_seconds: Some(0),
                ..RunnerConfig::default()
            },
            ProcessorConfig::named("nope"),
        );

        assert_eq!(validate_config(&cfg).unwrap_err().len(), 3);
    }

    #[test]
    fn test_build_validated_processor_returns_processor() {
        let cfg = config(
            RunnerConfig::default(),
            ProcessorConfig::named("heavy_computation").with_option("iterations", 10u64),
        );

        let processor = build_validated_processor(&cfg).unwrap();
        assert_eq!(processor.name(), "heavy_computation");
    }

    #[test]
    fn test_build_validated_processor_merges_processor_error() {
        let cfg = config(
            RunnerConfig {
                max_workers: Some(0),
                ..RunnerConfig::default()
            },
            ProcessorConfig::named("sine_series").with_option("factor", "loud"),
        );

        let errors = build_validated_processor(&cfg).err().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ValidationError::ZeroWorkers);
        assert!(matches!(
            errors[1],
            ValidationError::InvalidProcessorOption { .. }
        ));
    }
}
