// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // execution runtimes + built-in processors
pub mod config;     // config loading + validation
pub mod engine;     // partitioner, units, supervisor, orchestrator
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // unified abstractions
