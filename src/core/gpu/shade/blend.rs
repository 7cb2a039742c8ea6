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

//! Semi-transparency blending
//!
//! The four hardware blend equations are encoded as a table of
//! (back, front) coefficient pairs rather than as branches, so the exact
//! constants survive as data. The blend result is deliberately unclamped;
//! the storage format clamps when the host quantizes.

use crate::core::gpu::primitives::{Rgb, TransparencyMode};

/// (back, front) coefficient pairs indexed by hardware transparency mode
const BLEND_FACTORS: [(f32, f32); 4] = [
    (0.5, 0.5),   // mode 0: average
    (1.0, 1.0),   // mode 1: additive
    (1.0, -1.0),  // mode 2: subtractive
    (1.0, 0.25),  // mode 3: add quarter
];

impl TransparencyMode {
    /// The (back, front) blend coefficients for this mode
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::TransparencyMode;
    ///
    /// assert_eq!(TransparencyMode::Average.factors(), (0.5, 0.5));
    /// assert_eq!(TransparencyMode::Subtractive.factors(), (1.0, -1.0));
    /// ```
    pub fn factors(self) -> (f32, f32) {
        BLEND_FACTORS[self.bits() as usize]
    }

    /// Blend a source fragment color onto a destination sample
    ///
    /// Computes `back_factor * destination + front_factor * source` per
    /// channel. The result is not clamped here.
    ///
    /// # Arguments
    ///
    /// * `destination` - Current destination-surface color under the fragment
    /// * `source` - Computed fragment color
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::{Rgb, TransparencyMode};
    ///
    /// let blended =
    ///     TransparencyMode::Additive.blend(Rgb::splat(0.3), Rgb::splat(0.2));
    /// assert!((blended.r - 0.5).abs() < 1e-6);
    /// ```
    pub fn blend(self, destination: Rgb, source: Rgb) -> Rgb {
        let (back, front) = self.factors();

        Rgb::new(
            back * destination.r + front * source.r,
            back * destination.g + front * source.g,
            back * destination.b + front * source.b,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb_close(actual: Rgb, expected: Rgb) {
        assert!(
            (actual.r - expected.r).abs() < 1e-6
                && (actual.g - expected.g).abs() < 1e-6
                && (actual.b - expected.b).abs() < 1e-6,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_factor_table() {
        assert_eq!(TransparencyMode::Average.factors(), (0.5, 0.5));
        assert_eq!(TransparencyMode::Additive.factors(), (1.0, 1.0));
        assert_eq!(TransparencyMode::Subtractive.factors(), (1.0, -1.0));
        assert_eq!(TransparencyMode::AddQuarter.factors(), (1.0, 0.25));
    }

    #[test]
    fn test_average_of_identical_is_identity() {
        let color = Rgb::new(0.1, 0.6, 0.9);
        assert_rgb_close(TransparencyMode::Average.blend(color, color), color);
    }

    #[test]
    fn test_additive() {
        let blended = TransparencyMode::Additive.blend(Rgb::splat(0.3), Rgb::splat(0.2));
        assert_rgb_close(blended, Rgb::splat(0.5));
    }

    #[test]
    fn test_subtractive_can_go_negative() {
        let blended = TransparencyMode::Subtractive.blend(Rgb::splat(0.2), Rgb::splat(0.5));
        assert_rgb_close(blended, Rgb::splat(-0.3));
    }

    #[test]
    fn test_add_quarter() {
        let blended = TransparencyMode::AddQuarter.blend(Rgb::splat(0.4), Rgb::splat(0.8));
        assert_rgb_close(blended, Rgb::splat(0.6));
    }

    #[test]
    fn test_additive_unclamped_above_one() {
        let blended = TransparencyMode::Additive.blend(Rgb::WHITE, Rgb::WHITE);
        assert_rgb_close(blended, Rgb::splat(2.0));
    }

    #[test]
    fn test_channels_blend_independently() {
        let destination = Rgb::new(0.0, 0.5, 1.0);
        let source = Rgb::new(1.0, 0.5, 0.0);
        let blended = TransparencyMode::Average.blend(destination, source);
        assert_rgb_close(blended, Rgb::new(0.5, 0.5, 0.5));
    }
}
