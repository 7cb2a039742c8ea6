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

//! GPU fragment stage implementation
//!
//! This module implements the per-pixel half of the PlayStation GPU's
//! rendering pipeline: decoding packed 16-bit colors, resolving indexed
//! texels through the palette, ordered dithering for flat shading, and the
//! four semi-transparency blend equations. It is consumed by a host
//! rasterizer that produces interpolated attributes per covered pixel.
//!
//! # Texel Format
//!
//! Texture and palette memory hold 16-bit values in 5-5-5 RGB format:
//! - Bits 0-4: Red (5 bits)
//! - Bits 5-9: Green (5 bits)
//! - Bits 10-14: Blue (5 bits)
//! - Bit 15: Semi-transparency flag
//!
//! Two 16-bit values pack into each 32-bit word of the upload buffers, low
//! half first.
//!
//! # Pipeline
//!
//! ```text
//! textured: addressing → texel decode → (4/8-bit) CLUT → blend → reorder
//! flat:     vertex color → dither → blend → reorder
//! ```
//!
//! Evaluation is stateless and embarrassingly parallel; the host may invoke
//! it for any number of fragments concurrently against the same read-only
//! memories.
//!
//! # References
//!
//! - [PSX-SPX: GPU](http://problemkaputt.de/psx-spx.htm#gpu)
//! - [PSX-SPX: GPU Rendering](http://problemkaputt.de/psx-spx.htm#gpurenderstatecommands)

// Module declarations
mod primitives;
mod registers;
mod shade;
mod vram;
#[cfg(test)]
mod tests;

// Public re-exports
pub use primitives::*;
pub use registers::*;
pub use shade::{dither_offset, shade_fragment};
pub use vram::*;

/// Fragment shader state for one draw batch
///
/// Bundles the per-draw configuration with the texture and palette memory
/// the command processor uploaded for the batch, so the host rasterizer
/// only threads per-fragment data through [`FragmentShader::shade`]. The
/// free function [`shade_fragment`] is the same evaluation for callers that
/// manage the pieces themselves.
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::{
///     BackSurface, DrawConfig, FragmentInput, FragmentShader, Rgb,
///     TextureDepth, TextureMemory,
/// };
///
/// let mut shader = FragmentShader::new();
/// shader.set_config(DrawConfig {
///     textured: true,
///     texture_depth: TextureDepth::Direct15,
///     ..Default::default()
/// });
/// shader.upload_texture(TextureMemory::from_texels(&[0x7FFF]));
///
/// let back = BackSurface::default();
/// let input = FragmentInput::textured(Rgb::WHITE, 0.0, 0.0);
/// let out = shader.shade(&back, &input, (0, 0)).unwrap();
/// assert_eq!(out.to_rgb(), Rgb::WHITE);
/// ```
#[derive(Debug, Default)]
pub struct FragmentShader {
    /// Per-draw configuration, fixed for the duration of the batch
    config: DrawConfig,

    /// Texture page memory for the batch
    texture: TextureMemory,

    /// Palette memory for the batch
    clut: ClutMemory,
}

impl FragmentShader {
    /// Create a shader with default configuration and empty memories
    pub fn new() -> Self {
        Self::default()
    }

    /// The active per-draw configuration
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Replace the per-draw configuration
    ///
    /// Called by the command processor between batches; never during one.
    pub fn set_config(&mut self, config: DrawConfig) {
        log::debug!(
            "Draw config: textured={} blend={} semi={} mode={} depth={} dither={} flip=({}, {})",
            config.textured,
            config.texture_blend,
            config.semi_transparent,
            config.transparency_mode.bits(),
            config.texture_depth.bits(),
            config.dithering,
            config.texture_x_flip,
            config.texture_y_flip,
        );
        self.config = config;
    }

    /// Replace the texture page memory
    pub fn upload_texture(&mut self, texture: TextureMemory) {
        log::trace!("Texture upload: {} slots", texture.len_texels());
        self.texture = texture;
    }

    /// Replace the palette memory
    pub fn upload_clut(&mut self, clut: ClutMemory) {
        self.clut = clut;
    }

    /// Evaluate one fragment against the bundled state
    ///
    /// See [`shade_fragment`] for the full contract; `None` means the
    /// fragment is discarded and nothing may be written for it.
    pub fn shade(
        &self,
        back: &BackSurface,
        input: &FragmentInput,
        screen: (u32, u32),
    ) -> Option<OutputColor> {
        shade_fragment(&self.config, &self.texture, &self.clut, back, input, screen)
    }
}
