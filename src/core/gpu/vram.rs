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

//! Packed texel memory and the destination surface
//!
//! Texture and palette data reach the fragment evaluator as flat sequences
//! of 32-bit words, each packing two 16-bit texels with the low half first.
//! This module centralizes the word/half-select arithmetic in a single
//! accessor so the packing format exists in exactly one place, and wraps the
//! destination color buffer the blend stage samples from.
//!
//! All buffers here are filled once per draw batch by the external command
//! processor and are read-only to the evaluator.

use crate::core::error::{Result, ShadeError};

use super::primitives::{OutputColor, RawTexel, Rgb};

/// Logical destination surface width used to normalize screen positions
pub const SURFACE_WIDTH: u32 = 1024;

/// Logical destination surface height used to normalize screen positions
pub const SURFACE_HEIGHT: u32 = 512;

/// Maximum number of palette entries (8-bit indexed mode)
pub const MAX_CLUT_ENTRIES: usize = 256;

/// A read-only sequence of 32-bit words packing two 16-bit texels each
///
/// The low 16 bits of each word hold the even-indexed texel, the high 16
/// bits the odd-indexed one. [`PackedWords::read_u16`] is the only place
/// that knows this.
#[derive(Debug, Clone, Default)]
pub struct PackedWords {
    words: Vec<u32>,
}

impl PackedWords {
    /// Wrap an already-packed word buffer
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Pack a sequence of 16-bit texels, low half first
    ///
    /// An odd trailing texel occupies the low half of the final word with
    /// the high half zeroed, as an upload of odd width leaves it on the
    /// hardware.
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::PackedWords;
    ///
    /// let buffer = PackedWords::from_texels(&[0x1234, 0xABCD, 0x000F]);
    /// assert_eq!(buffer.read_u16(0), 0x1234);
    /// assert_eq!(buffer.read_u16(1), 0xABCD);
    /// assert_eq!(buffer.read_u16(2), 0x000F);
    /// assert_eq!(buffer.read_u16(3), 0x0000);
    /// ```
    pub fn from_texels(texels: &[u16]) -> Self {
        let words = texels
            .chunks(2)
            .map(|pair| {
                let low = pair[0] as u32;
                let high = pair.get(1).copied().unwrap_or(0) as u32;
                high << 16 | low
            })
            .collect();

        Self { words }
    }

    /// Read the 16-bit texel at a logical index
    ///
    /// Selects word `index / 2` and the low or high half by the index
    /// parity. Negative or out-of-range indices read as 0, matching the
    /// hardware's behavior for reads past the uploaded region; the flipped
    /// addressing paths rely on this being total.
    ///
    /// # Arguments
    ///
    /// * `index` - Logical 16-bit slot index
    pub fn read_u16(&self, index: i32) -> u16 {
        if index < 0 {
            return 0;
        }

        let word = match self.words.get(index as usize / 2) {
            Some(&word) => word,
            None => return 0,
        };

        if index % 2 == 0 {
            word as u16
        } else {
            (word >> 16) as u16
        }
    }

    /// Number of 16-bit slots the buffer holds
    pub fn len_texels(&self) -> usize {
        self.words.len() * 2
    }

    /// Whether the buffer holds no words at all
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Texture page memory for the current draw batch
///
/// Holds raw color words (15-bit direct mode) or palette indices (4-bit and
/// 8-bit indexed modes) in the packed two-per-word layout.
#[derive(Debug, Clone, Default)]
pub struct TextureMemory(PackedWords);

impl TextureMemory {
    /// Wrap an already-packed word buffer
    pub fn from_words(words: Vec<u32>) -> Self {
        Self(PackedWords::from_words(words))
    }

    /// Pack a sequence of 16-bit slots
    pub fn from_texels(texels: &[u16]) -> Self {
        Self(PackedWords::from_texels(texels))
    }

    /// Read the 16-bit slot at a logical index (0 when out of range)
    pub fn read_u16(&self, index: i32) -> u16 {
        self.0.read_u16(index)
    }

    /// Number of 16-bit slots uploaded
    pub fn len_texels(&self) -> usize {
        self.0.len_texels()
    }
}

/// Palette memory for the current draw batch
///
/// Same packed layout as [`TextureMemory`], interpreted as a table of final
/// 16-bit colors indexed by the values extracted from an indexed-mode
/// texture. A palette never exceeds 256 entries.
#[derive(Debug, Clone, Default)]
pub struct ClutMemory(PackedWords);

impl ClutMemory {
    /// Wrap an already-packed word buffer
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::ClutTooLarge`] if the buffer holds more than
    /// the 256 entries an 8-bit palette can address.
    pub fn from_words(words: Vec<u32>) -> Result<Self> {
        let entries = words.len() * 2;
        if entries > MAX_CLUT_ENTRIES {
            return Err(ShadeError::ClutTooLarge {
                entries,
                max: MAX_CLUT_ENTRIES,
            });
        }

        Ok(Self(PackedWords::from_words(words)))
    }

    /// Pack a sequence of 16-bit palette entries
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::ClutTooLarge`] if more than 256 entries are
    /// supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::ClutMemory;
    ///
    /// let clut = ClutMemory::from_texels(&[0x7FFF, 0x001F]).unwrap();
    /// assert_eq!(clut.read_u16(1), 0x001F);
    ///
    /// assert!(ClutMemory::from_texels(&[0u16; 300]).is_err());
    /// ```
    pub fn from_texels(texels: &[u16]) -> Result<Self> {
        if texels.len() > MAX_CLUT_ENTRIES {
            return Err(ShadeError::ClutTooLarge {
                entries: texels.len(),
                max: MAX_CLUT_ENTRIES,
            });
        }

        Ok(Self(PackedWords::from_texels(texels)))
    }

    /// Read the palette entry at a logical index (0 when out of range)
    pub fn read_u16(&self, index: i32) -> u16 {
        self.0.read_u16(index)
    }
}

/// Snapshot of the destination color buffer sampled by the blend stage
///
/// Pixels are stored in the display surface's storage order (blue, green,
/// red, unused), the same order the evaluator emits. Sampling addresses the
/// surface by absolute screen position normalized against the fixed
/// 1024×512 logical size, so a physically smaller surface is still covered
/// by the full logical coordinate range.
///
/// The sample is a snapshot: the host must ensure the surface being read is
/// not the one being concurrently written by the same draw.
#[derive(Debug, Clone)]
pub struct BackSurface {
    width: u32,
    height: u32,
    pixels: Vec<OutputColor>,
}

impl BackSurface {
    /// Wrap a destination buffer of `width * height` pixels
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::EmptySurface`] for a zero dimension and
    /// [`ShadeError::SurfaceSizeMismatch`] when the pixel count does not
    /// match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<OutputColor>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ShadeError::EmptySurface { width, height });
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ShadeError::SurfaceSizeMismatch {
                expected,
                got: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a surface of the full logical size filled with one color
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::{BackSurface, Rgb};
    ///
    /// let back = BackSurface::filled(64, 64, Rgb::splat(0.3));
    /// assert_eq!(back.sample_rgb(0, 0), Rgb::splat(0.3));
    /// ```
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let pixels = vec![OutputColor::from_rgb(color); width as usize * height as usize];
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Surface width in physical pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in physical pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the stored pixel under an absolute screen position
    ///
    /// The position is normalized against the 1024×512 logical surface and
    /// mapped to the nearest physical pixel; positions past the logical
    /// edge clamp to the border, as sampling hardware does.
    pub fn sample(&self, x: u32, y: u32) -> OutputColor {
        let px = ((x as f32 / SURFACE_WIDTH as f32) * self.width as f32) as u32;
        let py = ((y as f32 / SURFACE_HEIGHT as f32) * self.height as f32) as u32;

        let px = px.min(self.width - 1) as usize;
        let py = py.min(self.height - 1) as usize;

        self.pixels[py * self.width as usize + px]
    }

    /// Sample and un-reorder into the internal RGB representation
    pub fn sample_rgb(&self, x: u32, y: u32) -> Rgb {
        self.sample(x, y).to_rgb()
    }
}

impl Default for BackSurface {
    /// A full-size logical surface cleared to black
    fn default() -> Self {
        Self::filled(SURFACE_WIDTH, SURFACE_HEIGHT, Rgb::BLACK)
    }
}

/// Pack a row of decoded texels for upload, low half first
///
/// Convenience for hosts and tests that build texture pages from
/// [`RawTexel`] values instead of bare words.
pub fn pack_texels(texels: &[RawTexel]) -> Vec<u32> {
    texels
        .chunks(2)
        .map(|pair| {
            let low = pair[0].0 as u32;
            let high = pair.get(1).map(|t| t.0).unwrap_or(0) as u32;
            high << 16 | low
        })
        .collect()
}
