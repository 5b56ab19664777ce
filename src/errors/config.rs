// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Problems found while validating a runner configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `max_workers` was explicitly set to zero
    ZeroWorkers,
    /// A timeout option was set to zero
    ZeroTimeout {
        /// Name of the offending option
        option: &'static str,
    },
    /// The configured processor name is not a known implementation
    UnknownProcessor {
        /// The name that was requested
        name: String,
        /// Names that would have been accepted
        available: Vec<&'static str>,
    },
    /// A processor option had the wrong shape
    InvalidProcessorOption {
        /// The processor the option belongs to
        processor: String,
        /// The option key
        option: String,
        /// What was expected instead
        expected: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroWorkers => {
                write!(f, "runner_options.max_workers must be at least 1")
            }
            ValidationError::ZeroTimeout { option } => {
                write!(f, "runner_options.{} must be greater than zero", option)
            }
            ValidationError::UnknownProcessor { name, available } => {
                write!(
                    f,
                    "Unknown processor '{}' (available: {})",
                    name,
                    available.join(", ")
                )
            }
            ValidationError::InvalidProcessorOption {
                processor,
                option,
                expected,
            } => {
                write!(
                    f,
                    "Processor '{}' option '{}' must be {}",
                    processor, option, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading configuration or building a runner from it
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config file extension '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
