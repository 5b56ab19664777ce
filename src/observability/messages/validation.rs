// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation errors.

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration validation found one or more problems.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_divvy::errors::ValidationError;
/// use the_divvy::observability::messages::validation::ConfigValidationFailed;
///
/// let errors = vec![ValidationError::ZeroWorkers];
/// let msg = ConfigValidationFailed {
///     error_count: errors.len(),
///     errors: &errors,
/// };
///
/// assert!(msg.to_string().contains("max_workers must be at least 1"));
/// ```
pub struct ConfigValidationFailed<'a> {
    pub error_count: usize,
    pub errors: &'a [ValidationError],
}

impl ConfigValidationFailed<'_> {
    fn joined(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Display for ConfigValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation failed with {} error(s): {}",
            self.error_count,
            self.joined()
        )
    }
}

impl StructuredLog for ConfigValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            error_count = self.error_count,
            errors = %self.joined(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_validation_failed",
            span_name = name,
            error_count = self.error_count,
        )
    }
}
