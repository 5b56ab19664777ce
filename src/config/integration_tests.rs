// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{load_and_validate_config, RuntimeBuilder, RuntimeKind};
use crate::errors::RunnerError;
use std::time::Duration;

/// Test that the demo configuration loads and resolves its options
#[test]
fn test_demo_yaml_loading() {
    let config = load_and_validate_config("configs/demo.yaml").unwrap();

    assert_eq!(config.runtime, RuntimeKind::Threads);
    assert_eq!(config.runner_options.max_workers, Some(4));
    assert_eq!(config.runner_options.operation_timeout_seconds, Some(30));
    assert_eq!(config.runner_options.report_progress, Some(true));
    assert_eq!(config.processor.name, "heavy_computation");
    assert_eq!(config.processor.options["iterations"].as_u64(), Some(200_000));
}

#[test]
fn test_sine_tasks_yaml_loading() {
    let config = load_and_validate_config("configs/sine-tasks.yaml").unwrap();

    assert_eq!(config.runtime, RuntimeKind::Tasks);
    let options = config.runner_options.to_runner_options();
    assert_eq!(options.max_workers, 3);
    assert_eq!(options.termination_timeout, Duration::from_millis(250));
    assert_eq!(options.operation_timeout, None);
}

#[test]
fn test_reciprocal_toml_loading() {
    let config = load_and_validate_config("configs/reciprocal.toml").unwrap();

    assert_eq!(config.runtime, RuntimeKind::Threads);
    assert_eq!(config.runner_options.max_workers, Some(2));
    assert_eq!(config.processor.name, "reciprocal");
}

/// Test building a runner from configuration and running it end to end
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_from_sine_tasks_config() {
    let config = load_and_validate_config("configs/sine-tasks.yaml").unwrap();
    let (processor, orchestrator) = RuntimeBuilder::from_config(&config).unwrap();

    let items = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let expected: Vec<f64> = items
        .iter()
        .map(|x| processor.process(*x).unwrap())
        .collect();

    let results = orchestrator.run(items, processor).await.unwrap();
    assert_eq!(results, expected);
    assert_eq!(results[0], 0.0);
}

#[tokio::test]
async fn test_run_from_reciprocal_config_fails_on_zero() {
    let config = load_and_validate_config("configs/reciprocal.toml").unwrap();
    let (processor, orchestrator) = RuntimeBuilder::from_config(&config).unwrap();

    let err = orchestrator
        .run(vec![1.0, 2.0, 0.0, 4.0], processor)
        .await
        .unwrap_err();

    match err {
        RunnerError::UnitExecution { index, source, .. } => {
            assert_eq!(index, 2);
            assert!(source.to_string().contains("division by zero"));
        }
        other => panic!("expected item failure, got {}", other),
    }
}
