// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! shade-core: a software fragment evaluator for the PlayStation (PSX) GPU
//!
//! This crate reproduces the per-pixel texture-mapping and blending stage
//! of the PSX GPU as a pure software function, for consumption by a modern
//! rasterization pipeline: the host rasterizer interpolates attributes per
//! covered pixel and calls into this crate for the hardware-accurate color.
//!
//! # Architecture
//!
//! - [`core::gpu`]: the fragment stage: packed texel memory, per-draw
//!   configuration, and the decode/CLUT/dither/blend pipeline
//!
//! The surrounding emulator owns everything either side of the fragment
//! stage: triangle setup and interpolation, the command processor that
//! uploads texture/palette memory and issues per-draw configuration, and
//! display/presentation.
//!
//! # Example
//!
//! ```
//! use shade_core::core::gpu::{
//!     BackSurface, DrawConfig, FragmentInput, FragmentShader, Rgb,
//! };
//!
//! let mut shader = FragmentShader::new();
//! shader.set_config(DrawConfig::default());
//!
//! let back = BackSurface::default();
//! let input = FragmentInput::flat(Rgb::new(0.5, 0.5, 0.5));
//!
//! // Output is reordered blue-green-red with an unused fourth channel
//! let color = shader.shade(&back, &input, (0, 0)).unwrap();
//! assert_eq!(color.0, [0.5, 0.5, 0.5, 0.0]);
//! ```
//!
//! # Error Handling
//!
//! Fragment evaluation is total; the only abnormal outcome is the
//! transparent-texel discard, returned as `None`. Fallible buffer
//! construction returns [`core::error::Result<T>`], an alias for
//! `Result<T, ShadeError>`.

pub mod core;

// Re-export commonly used types
pub use core::error::{Result, ShadeError};
