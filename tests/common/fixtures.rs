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

//! Test fixtures for common fragment-evaluation scenarios

use std::sync::Once;

use shade_core::core::gpu::{ClutMemory, DrawConfig, Rgb, TextureDepth, TextureMemory};

static INIT: Once = Once::new();

/// Initialize logging once for the test binary
#[allow(dead_code)]
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A 16-entry grayscale palette; entry 0 stays the transparent sentinel
#[allow(dead_code)]
pub fn gray_ramp_clut() -> ClutMemory {
    let entries: Vec<u16> = (0..16u16).map(|i| (i << 10) | (i << 5) | i).collect();
    ClutMemory::from_texels(&entries).expect("16 entries fit any palette")
}

/// A 4-bit texture page where every texel of row `v` holds index `v % 16`
///
/// 16 rows of 64 slots (256 texels per row).
#[allow(dead_code)]
pub fn banded_4bit_texture() -> TextureMemory {
    let mut slots = Vec::with_capacity(16 * 64);
    for row in 0..16u16 {
        let index = row % 16;
        let slot = index << 12 | index << 8 | index << 4 | index;
        slots.extend(std::iter::repeat(slot).take(64));
    }
    TextureMemory::from_texels(&slots)
}

/// A direct-color page holding a left-to-right red ramp in its first row
#[allow(dead_code)]
pub fn red_ramp_texture() -> TextureMemory {
    let texels: Vec<u16> = (0..256u16).map(|x| (x * 31 / 255) & 0x1F).collect();
    TextureMemory::from_texels(&texels)
}

/// Per-draw configuration for a textured draw at the given depth
#[allow(dead_code)]
pub fn textured_config(depth: TextureDepth) -> DrawConfig {
    DrawConfig {
        textured: true,
        texture_depth: depth,
        ..Default::default()
    }
}

/// Compare colors within blending float tolerance
#[allow(dead_code)]
pub fn assert_rgb_close(actual: Rgb, expected: Rgb) {
    assert!(
        (actual.r - expected.r).abs() < 1e-6
            && (actual.g - expected.g).abs() < 1e-6
            && (actual.b - expected.b).abs() < 1e-6,
        "expected {expected:?}, got {actual:?}"
    );
}
