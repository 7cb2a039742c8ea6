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

//! Core fragment-stage components
//!
//! This module contains the fragment evaluation core:
//! - GPU fragment stage (texel decode, CLUT, dither, blend)
//! - Error types for the buffer-construction boundary

pub mod error;
pub mod gpu;

// Re-export commonly used types
pub use error::{Result, ShadeError};
pub use gpu::FragmentShader;
