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

//! Ordered dithering
//!
//! Flat-shaded fragments are perturbed by a fixed 4×4 screen-space pattern
//! before quantization down to the 5-bit-per-channel output format, which
//! trades banding for high-frequency noise. The pattern repeats every four
//! pixels in both screen axes.

use crate::core::gpu::primitives::Rgb;

/// The hardware's 4×4 ordered-dither offsets, row-major, in float color
/// units (integer offset / 255)
const DITHER_TABLE: [f32; 16] = [
    -4.0 / 255.0,
    0.0 / 255.0,
    -3.0 / 255.0,
    1.0 / 255.0,
    2.0 / 255.0,
    -2.0 / 255.0,
    3.0 / 255.0,
    -1.0 / 255.0,
    -3.0 / 255.0,
    1.0 / 255.0,
    -4.0 / 255.0,
    0.0 / 255.0,
    3.0 / 255.0,
    -1.0 / 255.0,
    2.0 / 255.0,
    -2.0 / 255.0,
];

/// Look up the dither offset for an absolute screen position
///
/// The table is indexed by `(y mod 4) * 4 + (x mod 4)`; the same offset is
/// added to all three color channels.
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::dither_offset;
///
/// assert_eq!(dither_offset(0, 0), -4.0 / 255.0);
/// assert_eq!(dither_offset(3, 0), 1.0 / 255.0);
/// // Period 4 in both axes
/// assert_eq!(dither_offset(5, 9), dither_offset(1, 1));
/// ```
pub fn dither_offset(x: u32, y: u32) -> f32 {
    DITHER_TABLE[((y % 4) * 4 + (x % 4)) as usize]
}

/// Apply the dither offset for a screen position to a color
pub(crate) fn apply(color: Rgb, x: u32, y: u32) -> Rgb {
    color.offset(dither_offset(x, y))
}
