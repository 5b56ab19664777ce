// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod heavy_computation;
pub mod reciprocal;
pub mod sine_series;
pub mod square;

pub use heavy_computation::*;
pub use reciprocal::*;
pub use sine_series::*;
pub use square::*;
