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

//! Palette (CLUT) resolution
//!
//! In the indexed color depths a raw texture slot holds several packed
//! palette indices rather than colors. The fragment's sub-slot index is
//! extracted by the column position within the slot, then resolved through
//! palette memory using the same packed-word addressing as the texture
//! itself.

use crate::core::gpu::primitives::TextureDepth;
use crate::core::gpu::vram::ClutMemory;

/// Resolve a packed palette index into the final raw 16-bit color
///
/// Extracts `16 / divider` bits at the column's position within the raw
/// slot and reads that entry from palette memory. Only meaningful for the
/// indexed depth modes; direct color never calls this.
///
/// # Arguments
///
/// * `depth` - Active indexed depth mode (selects index width)
/// * `raw_slot` - The 16-bit slot read from texture memory
/// * `column` - Post-flip, pre-division texel column from addressing
/// * `clut` - Palette memory for the draw batch
pub(crate) fn resolve(depth: TextureDepth, raw_slot: u16, column: i32, clut: &ClutMemory) -> u16 {
    let divider = depth.texels_per_slot();
    let index_bits = 16 / divider;

    let mask = 0xFFFFu32 >> (16 - index_bits);
    let shift = column.rem_euclid(divider) * index_bits;
    let clut_index = (raw_slot as u32 >> shift) & mask;

    clut.read_u16(clut_index as i32)
}
