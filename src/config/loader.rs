// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_TERMINATION_TIMEOUT_MS, TOML_EXTENSION, YAML_EXTENSIONS};
use crate::engine::{default_max_workers, RunnerOptions};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for a parallel run.
///
/// Names the execution runtime, the runner knobs and the item processor to
/// apply. It is typically loaded from a YAML (or TOML) file.
///
/// # Fields
/// * `runtime` - Which execution runtime hosts the units (optional, defaults to threads)
/// * `runner_options` - Worker count, timeouts and progress reporting (optional)
/// * `processor` - The built-in processor applied to every item
///
/// # Example
/// ```yaml
/// runtime: threads
/// runner_options:
///   max_workers: 4
///   termination_timeout_ms: 500
///   operation_timeout_seconds: 30
///   report_progress: false
/// processor:
///   name: heavy_computation
///   options:
///     iterations: 100000
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeKind,
    #[serde(default)]
    pub runner_options: RunnerConfig,
    pub processor: ProcessorConfig,
}

/// Execution runtime hosting the units of a run.
///
/// # Variants
/// * `Threads` - One blocking-pool thread per unit, cooperative termination
/// * `Tasks` - One async task per unit, terminated by abort
#[derive(Debug, Default, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeKind {
    #[default]
    Threads,
    Tasks,
}

/// Runner options as they appear in a config file. Every field is optional;
/// unset fields fall back to the [`RunnerOptions`] defaults.
#[derive(Debug, Default, Deserialize)]
pub struct RunnerConfig {
    pub max_workers: Option<usize>,
    pub termination_timeout_ms: Option<u64>,
    pub operation_timeout_seconds: Option<u64>,
    pub report_progress: Option<bool>,
}

impl RunnerConfig {
    /// Resolve into the options the orchestrator runs with
    pub fn to_runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            max_workers: self.max_workers.unwrap_or_else(default_max_workers),
            termination_timeout: Duration::from_millis(
                self.termination_timeout_ms
                    .unwrap_or(DEFAULT_TERMINATION_TIMEOUT_MS),
            ),
            operation_timeout: self.operation_timeout_seconds.map(Duration::from_secs),
            report_progress: self.report_progress.unwrap_or(false),
        }
    }
}

/// Configuration for the item processor.
///
/// # Fields
/// * `name` - Built-in implementation name (e.g. `heavy_computation`)
/// * `options` - Processor-specific options such as `iterations`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    pub name: String,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>, // processor-specific options
}

impl ProcessorConfig {
    /// A processor config with no options
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Load a config from a YAML or TOML file, chosen by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let content = fs::read_to_string(path)?;
    if YAML_EXTENSIONS.contains(&extension.as_str()) {
        Ok(serde_yaml::from_str(&content)?)
    } else if extension == TOML_EXTENSION {
        Ok(toml::from_str(&content)?)
    } else {
        Err(ConfigError::UnsupportedFormat(extension))
    }
}

/// Load and validate a config file
///
/// Every validation problem is collected; the returned error lists them all.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
