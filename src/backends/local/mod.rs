// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod processors;
pub mod factory;

pub use processors::*;
pub use factory::LocalProcessorFactory;
