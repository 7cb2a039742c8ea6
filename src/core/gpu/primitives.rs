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

//! Fragment primitive type definitions
//!
//! This module contains the value types that flow through the fragment
//! pipeline: floating-point colors, raw 16-bit texels, texture depth and
//! transparency selectors, per-fragment interpolated inputs, and the
//! reordered output color handed back to the host.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// An RGB color with floating-point channels in the 0.0..=1.0 range
///
/// Interpolated vertex colors arrive in this form from the rasterizer, and
/// decoded texels are converted into it (5-bit channel / 31.0). Blending
/// intentionally may push channels outside the nominal range; quantization
/// back to hardware format clamps at storage time.
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::Rgb;
///
/// let gray = Rgb::splat(0.5);
/// assert_eq!(gray.r, 0.5);
/// assert_eq!(gray.g, 0.5);
/// assert_eq!(gray.b, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Black (all channels zero)
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// White (all channels one)
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color from individual channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color with all three channels set to `value`
    pub const fn splat(value: f32) -> Self {
        Self {
            r: value,
            g: value,
            b: value,
        }
    }

    /// Modulate a texel color by an interpolated shading color
    ///
    /// Performs the hardware texture-blend step: each channel is multiplied
    /// by twice the corresponding shading channel, so a shading value of 0.5
    /// leaves the texel unchanged, values below darken and values above
    /// brighten.
    ///
    /// # Arguments
    ///
    /// * `shading` - Interpolated vertex color from the rasterizer
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::Rgb;
    ///
    /// let texel = Rgb::new(0.4, 0.4, 0.4);
    /// let neutral = texel.modulate(Rgb::splat(0.5));
    /// assert!((neutral.r - 0.4).abs() < 1e-6);
    ///
    /// let doubled = texel.modulate(Rgb::WHITE);
    /// assert!((doubled.r - 0.8).abs() < 1e-6);
    /// ```
    pub fn modulate(self, shading: Rgb) -> Self {
        Self {
            r: self.r * shading.r * 2.0,
            g: self.g * shading.g * 2.0,
            b: self.b * shading.b * 2.0,
        }
    }

    /// Add the same offset to all three channels
    ///
    /// Used by the dither stage, which perturbs every channel identically.
    pub fn offset(self, amount: f32) -> Self {
        Self {
            r: self.r + amount,
            g: self.g + amount,
            b: self.b + amount,
        }
    }
}

/// A raw 16-bit hardware color word
///
/// The packed texel format used throughout VRAM:
/// - Bits 0-4: Red (5 bits)
/// - Bits 5-9: Green (5 bits)
/// - Bits 10-14: Blue (5 bits)
/// - Bit 15: Semi-transparency flag
///
/// The all-zero word is the hardware's fully-transparent sentinel; a
/// textured fragment that resolves to it is discarded entirely rather
/// than drawn as black.
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::RawTexel;
///
/// let red = RawTexel(0x001F);
/// let decoded = red.decode();
/// assert_eq!(decoded.color.r, 1.0);
/// assert_eq!(decoded.color.g, 0.0);
/// assert!(!decoded.semi_transparent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTexel(pub u16);

impl RawTexel {
    /// The fully-transparent sentinel value
    pub const TRANSPARENT: Self = Self(0);

    /// Whether this texel is the fully-transparent sentinel
    ///
    /// Note that this is distinct from the semi-transparency flag in bit 15:
    /// the sentinel suppresses the fragment entirely, while the flag selects
    /// whether the blend equations apply.
    pub fn is_transparent(self) -> bool {
        self.0 == 0
    }

    /// Decode into floating-point channels and the semi-transparency flag
    ///
    /// Each 5-bit channel maps to `component / 31.0`. Decoding is total:
    /// every 16-bit input yields a defined color.
    ///
    /// # Returns
    ///
    /// The decoded [`TexelColor`] with channels in 0.0..=1.0
    pub fn decode(self) -> TexelColor {
        let r = (self.0 & 0x1F) as f32 / 31.0;
        let g = ((self.0 >> 5) & 0x1F) as f32 / 31.0;
        let b = ((self.0 >> 10) & 0x1F) as f32 / 31.0;
        let semi_transparent = (self.0 >> 15) & 1 == 1;

        TexelColor {
            color: Rgb::new(r, g, b),
            semi_transparent,
        }
    }

    /// Quantize a floating-point color back into the packed hardware word
    ///
    /// Channels are clamped to 0.0..=1.0 and rounded to 5 bits; the
    /// semi-transparency flag becomes bit 15. This is the storage-side
    /// counterpart of [`RawTexel::decode`]: decoding then quantizing
    /// recovers the original word exactly.
    ///
    /// # Arguments
    ///
    /// * `color` - Color to pack (clamped per channel)
    /// * `semi_transparent` - Value for bit 15
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::{RawTexel, Rgb};
    ///
    /// let white = RawTexel::quantize(Rgb::WHITE, false);
    /// assert_eq!(white, RawTexel(0x7FFF));
    ///
    /// let flagged_black = RawTexel::quantize(Rgb::BLACK, true);
    /// assert_eq!(flagged_black, RawTexel(0x8000));
    /// ```
    pub fn quantize(color: Rgb, semi_transparent: bool) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 31.0).round() as u16;

        Self(
            (semi_transparent as u16) << 15
                | channel(color.b) << 10
                | channel(color.g) << 5
                | channel(color.r),
        )
    }
}

/// A decoded texel: color plus the per-texel semi-transparency flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexelColor {
    /// Decoded color with channels in 0.0..=1.0
    pub color: Rgb,

    /// Bit 15 of the raw word; selects whether blending applies
    pub semi_transparent: bool,
}

/// Texture color depth modes
///
/// Selects how many bits each texel of the page occupies, which determines
/// both the addressing divisor and whether a CLUT lookup applies:
/// - 4-bit: 16 colors via CLUT, four texels per 16-bit slot
/// - 8-bit: 256 colors via CLUT, two texels per 16-bit slot
/// - 15-bit: direct color, one texel per slot, no CLUT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureDepth {
    /// 4-bit indexed color (16 colors, uses CLUT)
    Indexed4,
    /// 8-bit indexed color (256 colors, uses CLUT)
    Indexed8,
    /// 15-bit direct color (no CLUT)
    Direct15,
}

impl TextureDepth {
    /// Create a TextureDepth from the 2-bit hardware mode field
    ///
    /// # Arguments
    ///
    /// * `bits` - Color depth mode (0=4bit, 1=8bit, 2=15bit)
    ///
    /// # Returns
    ///
    /// Corresponding TextureDepth; the reserved value 3 maps to 15-bit,
    /// matching how the hardware treats it.
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0 => TextureDepth::Indexed4,
            1 => TextureDepth::Indexed8,
            _ => TextureDepth::Direct15,
        }
    }

    /// The 2-bit hardware encoding of this mode
    pub fn bits(self) -> u8 {
        match self {
            TextureDepth::Indexed4 => 0,
            TextureDepth::Indexed8 => 1,
            TextureDepth::Direct15 => 2,
        }
    }

    /// Number of texels packed into one 16-bit slot
    ///
    /// Computed as `1 << (2 - mode)`: 4 for 4-bit, 2 for 8-bit, 1 for
    /// direct color.
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::TextureDepth;
    ///
    /// assert_eq!(TextureDepth::Indexed4.texels_per_slot(), 4);
    /// assert_eq!(TextureDepth::Indexed8.texels_per_slot(), 2);
    /// assert_eq!(TextureDepth::Direct15.texels_per_slot(), 1);
    /// ```
    pub fn texels_per_slot(self) -> i32 {
        1 << (2 - self.bits() as i32)
    }

    /// Logical row width of the page in addressed units
    ///
    /// Computed as `1 << (6 + mode)`: 64 for 4-bit, 128 for 8-bit, 256 for
    /// direct color.
    pub fn row_width(self) -> i32 {
        1 << (6 + self.bits() as i32)
    }

    /// Whether this mode resolves texels through the palette
    pub fn uses_clut(self) -> bool {
        !matches!(self, TextureDepth::Direct15)
    }
}

impl Default for TextureDepth {
    fn default() -> Self {
        TextureDepth::Indexed4
    }
}

/// Semi-transparency blend equation selector
///
/// The hardware supports four fixed blend equations, each a pair of
/// (back, front) coefficients applied per channel:
///
/// | mode | equation |
/// |------|----------------------|
/// | 0 | 0.5×Back + 0.5×Front |
/// | 1 | 1.0×Back + 1.0×Front |
/// | 2 | 1.0×Back - 1.0×Front |
/// | 3 | 1.0×Back + 0.25×Front |
///
/// The coefficient pairs themselves live in a lookup table in the blend
/// stage; see [`TransparencyMode::factors`](crate::core::gpu::TransparencyMode::factors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransparencyMode {
    /// 0.5×B + 0.5×F (average)
    #[default]
    Average,

    /// 1.0×B + 1.0×F (additive)
    Additive,

    /// 1.0×B - 1.0×F (subtractive)
    Subtractive,

    /// 1.0×B + 0.25×F (add quarter)
    AddQuarter,
}

impl TransparencyMode {
    /// Create a TransparencyMode from the 2-bit hardware mode field
    ///
    /// Only the low two bits are considered, mirroring the hardware's
    /// register decoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::TransparencyMode;
    ///
    /// assert_eq!(TransparencyMode::from_bits(0), TransparencyMode::Average);
    /// assert_eq!(TransparencyMode::from_bits(3), TransparencyMode::AddQuarter);
    /// assert_eq!(TransparencyMode::from_bits(5), TransparencyMode::Additive);
    /// ```
    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => TransparencyMode::Average,
            1 => TransparencyMode::Additive,
            2 => TransparencyMode::Subtractive,
            3 => TransparencyMode::AddQuarter,
            _ => unreachable!(),
        }
    }

    /// The 2-bit hardware encoding of this mode
    pub fn bits(self) -> u8 {
        match self {
            TransparencyMode::Average => 0,
            TransparencyMode::Additive => 1,
            TransparencyMode::Subtractive => 2,
            TransparencyMode::AddQuarter => 3,
        }
    }
}

/// Per-fragment interpolated attributes supplied by the rasterizer
///
/// The rasterizer interpolates these across the primitive and hands one
/// instance to the evaluator per covered pixel. Texture coordinates are in
/// texel units, before the depth-mode division.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInput {
    /// Interpolated vertex color, channels in 0.0..=1.0
    pub color: Rgb,

    /// Interpolated texture coordinate in texel units
    pub tex_coord: (f32, f32),
}

impl FragmentInput {
    /// Create a fragment input for a flat (non-textured) fragment
    ///
    /// The texture coordinate is zeroed; it is never read on the flat path.
    pub fn flat(color: Rgb) -> Self {
        Self {
            color,
            tex_coord: (0.0, 0.0),
        }
    }

    /// Create a fragment input for a textured fragment
    pub fn textured(color: Rgb, u: f32, v: f32) -> Self {
        Self {
            color,
            tex_coord: (u, v),
        }
    }
}

/// Final fragment color in the display surface's storage order
///
/// Channels are stored reversed relative to the internal representation:
/// index 0 is blue, index 1 green, index 2 red, and index 3 is the unused
/// fourth channel, always zero. The layout is `repr(C)` plain-old-data so
/// hosts can upload fragment output buffers directly.
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::{OutputColor, Rgb};
///
/// let red = OutputColor::from_rgb(Rgb::new(1.0, 0.0, 0.0));
/// assert_eq!(red.0, [0.0, 0.0, 1.0, 0.0]);
/// assert_eq!(red.to_rgb(), Rgb::new(1.0, 0.0, 0.0));
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct OutputColor(pub [f32; 4]);

impl OutputColor {
    /// Reorder an internal RGB color into storage order
    ///
    /// # Returns
    ///
    /// The color as `[b, g, r, 0.0]`
    pub fn from_rgb(color: Rgb) -> Self {
        Self([color.b, color.g, color.r, 0.0])
    }

    /// Undo the storage reorder, recovering the internal RGB color
    pub fn to_rgb(self) -> Rgb {
        Rgb::new(self.0[2], self.0[1], self.0[0])
    }
}


#[cfg(test)]
mod depth_tests {
    use super::*;

    #[test]
    fn test_depth_from_bits() {
        assert_eq!(TextureDepth::from_bits(0), TextureDepth::Indexed4);
        assert_eq!(TextureDepth::from_bits(1), TextureDepth::Indexed8);
        assert_eq!(TextureDepth::from_bits(2), TextureDepth::Direct15);
        // Reserved value 3 behaves as direct color
        assert_eq!(TextureDepth::from_bits(3), TextureDepth::Direct15);
    }

    #[test]
    fn test_divider_and_row_width() {
        assert_eq!(TextureDepth::Indexed4.texels_per_slot(), 4);
        assert_eq!(TextureDepth::Indexed8.texels_per_slot(), 2);
        assert_eq!(TextureDepth::Direct15.texels_per_slot(), 1);

        assert_eq!(TextureDepth::Indexed4.row_width(), 64);
        assert_eq!(TextureDepth::Indexed8.row_width(), 128);
        assert_eq!(TextureDepth::Direct15.row_width(), 256);
    }

    #[test]
    fn test_clut_applicability() {
        assert!(TextureDepth::Indexed4.uses_clut());
        assert!(TextureDepth::Indexed8.uses_clut());
        assert!(!TextureDepth::Direct15.uses_clut());
    }
}

#[cfg(test)]
mod output_tests {
    use super::*;

    #[test]
    fn test_channel_reorder() {
        let out = OutputColor::from_rgb(Rgb::new(0.25, 0.5, 0.75));
        assert_eq!(out.0, [0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_fourth_channel_always_zero() {
        let out = OutputColor::from_rgb(Rgb::WHITE);
        assert_eq!(out.0[3], 0.0);
    }

    #[test]
    fn test_reorder_roundtrip() {
        let color = Rgb::new(0.1, 0.2, 0.3);
        assert_eq!(OutputColor::from_rgb(color).to_rgb(), color);
    }
}
