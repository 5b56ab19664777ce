// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::env;
use std::time::Instant;
use the_divvy::config::{load_and_validate_config, RuntimeBuilder};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Configs exercised by `--demo-mode`, with the input each one runs over
const DEMO_RUNS: [(&str, &[f64]); 3] = [
    ("configs/demo.yaml", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]),
    ("configs/sine-tasks.yaml", &[0.0, 0.25, 0.5, 0.75, 1.0, 1.25]),
    ("configs/reciprocal.toml", &[4.0, 2.0, 0.0, 1.0]),
];

/// Machine-readable summary of one run, printed as JSON after the results
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    config: &'a str,
    runtime: &'static str,
    processor: &'static str,
    max_workers: usize,
    item_count: usize,
    duration_ms: u64,
    succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_item: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    // Check for demo mode
    if args.len() >= 2 && args[1] == "--demo-mode" {
        run_demo().await;
        return Ok(());
    }

    if args.len() < 3 {
        eprintln!("Usage: {} <config.yaml|config.toml> <number> [number ...]", args[0]);
        eprintln!("       {} --demo-mode", args[0]);
        eprintln!("Example: {} configs/demo.yaml 1 2 3 4 5 6 7 8", args[0]);
        std::process::exit(1);
    }

    let config_file = &args[1];
    let items = args[2..]
        .iter()
        .map(|arg| {
            arg.parse::<f64>()
                .map_err(|e| anyhow::anyhow!("'{}' is not a number: {}", arg, e))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    let report = run_single_config(config_file, items).await?;
    if !report.succeeded {
        std::process::exit(2);
    }
    Ok(())
}

/// Run every demo config in turn; failures are part of the show
async fn run_demo() {
    println!("🚀 Divvy Parallel Runner Demo");
    println!("═══════════════════════════════");

    for (i, (config_file, items)) in DEMO_RUNS.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(80));
        }
        if let Err(e) = run_single_config(config_file, items.to_vec()).await {
            eprintln!("❌ Failed to run {}: {}", config_file, e);
        }
    }

    println!("\n🎉 Demo complete!");
}

async fn run_single_config<'a>(
    config_file: &'a str,
    items: Vec<f64>,
) -> anyhow::Result<RunReport<'a>> {
    let config = load_and_validate_config(config_file)?;
    let (processor, orchestrator) = RuntimeBuilder::from_config(&config)?;

    println!("📋 Configuration: {}", config_file);
    println!("🔧 Runtime: {}", orchestrator.runtime_name());
    println!("🧮 Processor: {}", processor.name());
    println!("⚙️  Max Workers: {}", orchestrator.options().max_workers);
    println!("🔢 Items: {:?}", items);

    let item_count = items.len();
    let processor_name = processor.name();
    let start = Instant::now();
    let outcome = orchestrator.run(items, processor).await;
    let duration = start.elapsed();

    let mut report = RunReport {
        config: config_file,
        runtime: orchestrator.runtime_name(),
        processor: processor_name,
        max_workers: orchestrator.options().max_workers,
        item_count,
        duration_ms: duration.as_millis() as u64,
        succeeded: outcome.is_ok(),
        results: None,
        error: None,
        failed_item: None,
    };

    match outcome {
        Ok(results) => {
            println!("\n📊 Results ({:?}):", duration);
            for (index, value) in results.iter().enumerate() {
                println!("  [{}] → {}", index, value);
            }
            report.results = Some(results);
        }
        Err(e) => {
            println!("\n❌ Run failed after {:?}: {}", duration, e);
            report.failed_item = e.item_index();
            report.error = Some(e.to_string());
        }
    }

    println!("\n🧾 Report:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(report)
}
