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

//! Per-draw configuration
//!
//! This module contains the configuration record the command processor
//! prepares once per draw call and hands to the fragment evaluator. The
//! record is immutable for the duration of the draw; the evaluator never
//! mutates it.

use serde::{Deserialize, Serialize};

use super::primitives::{TextureDepth, TransparencyMode};

/// Per-draw configuration for fragment evaluation
///
/// Mirrors the draw-state registers of the hardware that matter to the
/// pixel pipeline. The command processor fills this in from the draw
/// command stream before any fragment of the draw is evaluated; values are
/// then fixed for the whole batch.
///
/// Mode fields are trusted as-is: the command processor validates ranges
/// before dispatch, so the evaluator performs no per-fragment checking,
/// matching the hardware (which has none either).
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::{DrawConfig, TextureDepth, TransparencyMode};
///
/// let config = DrawConfig {
///     textured: true,
///     texture_depth: TextureDepth::Indexed4,
///     transparency_mode: TransparencyMode::Additive,
///     ..Default::default()
/// };
/// assert_eq!(config.texture_row_width(), 64);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Drawing offset added to vertex positions (signed)
    ///
    /// Consumed by the vertex stage; carried here because it is part of the
    /// per-draw state block, but never read by the fragment path.
    pub draw_offset: (i32, i32),

    /// Drawing area top-left corner in VRAM coordinates
    ///
    /// Scissoring against the drawing area happens in the rasterizer before
    /// fragments exist, so this field is contract-only for the evaluator.
    pub draw_area_top_left: (u32, u32),

    /// Drawing area size in pixels (see `draw_area_top_left`)
    pub draw_area_size: (u32, u32),

    /// Semi-transparency enabled for this draw
    ///
    /// For flat fragments this is the blend applicability flag. Textured
    /// fragments use the texel's own flag bit instead.
    pub semi_transparent: bool,

    /// Semi-transparency blend equation (hardware mode 0-3)
    pub transparency_mode: TransparencyMode,

    /// Dithering enabled
    ///
    /// Applies the ordered-dither offset to flat fragments only.
    pub dithering: bool,

    /// Whether fragments of this draw sample the texture page
    pub textured: bool,

    /// Texture blending enabled
    ///
    /// When set, sampled texels are modulated by twice the interpolated
    /// vertex color before blending.
    pub texture_blend: bool,

    /// Texture page color depth (selects divider and CLUT use)
    pub texture_depth: TextureDepth,

    /// Textured rectangle X-flip
    pub texture_x_flip: bool,

    /// Textured rectangle Y-flip
    pub texture_y_flip: bool,
}

impl DrawConfig {
    /// Number of texels packed per 16-bit slot for the active depth mode
    pub fn texel_divider(&self) -> i32 {
        self.texture_depth.texels_per_slot()
    }

    /// Addressed row width of the texture page for the active depth mode
    ///
    /// This is the "texture width" the hardware selects per depth mode:
    /// 64, 128 or 256 addressed units per row. It is derived from the depth
    /// mode rather than stored, as the two are definitionally equal.
    pub fn texture_row_width(&self) -> i32 {
        self.texture_depth.row_width()
    }

    /// Apply a texpage attribute word to this configuration
    ///
    /// Parses the draw-mode fields of the 16-bit texpage word found in the
    /// hardware's draw-mode register and in textured draw commands:
    ///
    /// ```text
    ///   Bit 5-6:   Semi Transparency     (0=B/2+F/2, 1=B+F, 2=B-F, 3=B+F/4)
    ///   Bit 7-8:   Texture page colors   (0=4bit, 1=8bit, 2=15bit)
    ///   Bit 9:     Dithering enabled     (0=Off, 1=On)
    ///   Bit 12:    Textured rect X-flip
    ///   Bit 13:    Textured rect Y-flip
    /// ```
    ///
    /// Page base coordinates (bits 0-4) address VRAM as a whole and are
    /// resolved by the command processor when it extracts the page into
    /// texture memory, so they are not represented here.
    ///
    /// # Arguments
    ///
    /// * `word` - Raw attribute word (only the low 16 bits are read)
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_core::core::gpu::{DrawConfig, TextureDepth, TransparencyMode};
    ///
    /// let mut config = DrawConfig::default();
    /// config.apply_texpage_word(0x0000_0320);
    /// assert_eq!(config.transparency_mode, TransparencyMode::Additive);
    /// assert_eq!(config.texture_depth, TextureDepth::Direct15);
    /// assert!(config.dithering);
    /// ```
    pub fn apply_texpage_word(&mut self, word: u32) {
        self.transparency_mode = TransparencyMode::from_bits(((word >> 5) & 3) as u8);
        self.texture_depth = TextureDepth::from_bits(((word >> 7) & 3) as u8);
        self.dithering = (word >> 9) & 1 != 0;
        self.texture_x_flip = (word >> 12) & 1 != 0;
        self.texture_y_flip = (word >> 13) & 1 != 0;

        log::debug!(
            "Texpage word {:#06X}: semi={} depth={} dither={} flip=({}, {})",
            word & 0xFFFF,
            self.transparency_mode.bits(),
            self.texture_depth.bits(),
            self.dithering,
            self.texture_x_flip,
            self.texture_y_flip,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DrawConfig::default();
        assert_eq!(config.draw_offset, (0, 0));
        assert!(!config.semi_transparent);
        assert_eq!(config.transparency_mode, TransparencyMode::Average);
        assert!(!config.dithering);
        assert!(!config.textured);
        assert!(!config.texture_blend);
        assert_eq!(config.texture_depth, TextureDepth::Indexed4);
        assert!(!config.texture_x_flip);
        assert!(!config.texture_y_flip);
    }

    #[test]
    fn test_derived_addressing_constants() {
        let mut config = DrawConfig::default();

        config.texture_depth = TextureDepth::Indexed4;
        assert_eq!(config.texel_divider(), 4);
        assert_eq!(config.texture_row_width(), 64);

        config.texture_depth = TextureDepth::Indexed8;
        assert_eq!(config.texel_divider(), 2);
        assert_eq!(config.texture_row_width(), 128);

        config.texture_depth = TextureDepth::Direct15;
        assert_eq!(config.texel_divider(), 1);
        assert_eq!(config.texture_row_width(), 256);
    }

    #[test]
    fn test_texpage_word_parsing() {
        let mut config = DrawConfig::default();

        // Subtractive (mode 2), 8-bit depth, dithering on, both flips
        let word = (2 << 5) | (1 << 7) | (1 << 9) | (1 << 12) | (1 << 13);
        config.apply_texpage_word(word);

        assert_eq!(config.transparency_mode, TransparencyMode::Subtractive);
        assert_eq!(config.texture_depth, TextureDepth::Indexed8);
        assert!(config.dithering);
        assert!(config.texture_x_flip);
        assert!(config.texture_y_flip);
    }

    #[test]
    fn test_texpage_word_clears_previous_state() {
        let mut config = DrawConfig::default();
        config.apply_texpage_word((3 << 5) | (1 << 9));
        assert_eq!(config.transparency_mode, TransparencyMode::AddQuarter);
        assert!(config.dithering);

        // An all-zero word resets the parsed fields
        config.apply_texpage_word(0);
        assert_eq!(config.transparency_mode, TransparencyMode::Average);
        assert_eq!(config.texture_depth, TextureDepth::Indexed4);
        assert!(!config.dithering);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = DrawConfig {
            draw_offset: (-8, 16),
            draw_area_top_left: (320, 0),
            draw_area_size: (320, 240),
            semi_transparent: true,
            transparency_mode: TransparencyMode::AddQuarter,
            dithering: true,
            textured: true,
            texture_blend: true,
            texture_depth: TextureDepth::Indexed8,
            texture_x_flip: true,
            texture_y_flip: false,
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: DrawConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.draw_offset, config.draw_offset);
        assert_eq!(restored.transparency_mode, config.transparency_mode);
        assert_eq!(restored.texture_depth, config.texture_depth);
        assert_eq!(restored.texture_x_flip, config.texture_x_flip);
    }
}
