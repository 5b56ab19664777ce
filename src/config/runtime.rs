// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{build_validated_processor, Config};
use crate::engine::{Orchestrator, RuntimeFactory};
use crate::errors::ConfigError;
use crate::traits::SharedProcessor;

/// Runner builder - creates the item processor and orchestrator from configuration.
///
/// # Examples
///
/// ```
/// use the_divvy::config::{Config, ProcessorConfig, RunnerConfig, RuntimeBuilder, RuntimeKind};
///
/// let config = Config {
///     runtime: RuntimeKind::Tasks,
///     runner_options: RunnerConfig::default(),
///     processor: ProcessorConfig::named("square"),
/// };
///
/// let (processor, orchestrator) = RuntimeBuilder::from_config(&config).unwrap();
///
/// assert_eq!(processor.name(), "square");
/// assert_eq!(orchestrator.runtime_name(), "tasks");
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a ready-to-run processor and orchestrator.
    ///
    /// The config is validated first; every problem found is reported in
    /// [`ConfigError::Invalid`].
    pub fn from_config(
        cfg: &Config,
    ) -> Result<(SharedProcessor<f64, f64>, Orchestrator), ConfigError> {
        let processor = build_validated_processor(cfg).map_err(ConfigError::Invalid)?;
        let orchestrator = RuntimeFactory::from_config(cfg);
        Ok((processor, orchestrator))
    }
}
