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

/// Fragment core error types
use thiserror::Error;

/// Result type for fragment core operations
pub type Result<T> = std::result::Result<T, ShadeError>;

/// Main error type for the fragment core
///
/// Fragment evaluation itself is total and never fails; errors only arise
/// at the buffer-construction boundary where the command processor hands
/// memory to the core.
#[derive(Error, Debug)]
pub enum ShadeError {
    #[error("CLUT holds {entries} entries (maximum {max})")]
    ClutTooLarge { entries: usize, max: usize },

    #[error("Surface pixel count mismatch: expected {expected}, got {got}")]
    SurfaceSizeMismatch { expected: usize, got: usize },

    #[error("Surface dimensions must be nonzero: {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
}
