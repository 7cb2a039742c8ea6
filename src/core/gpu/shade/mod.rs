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

//! Fragment evaluation pipeline
//!
//! One invocation per covered pixel. Textured fragments walk
//! addressing → texel decode → (indexed modes) palette resolution, flat
//! fragments take the dither path, and both feed the blend stage before the
//! output is reordered into the display surface's channel order.
//!
//! The whole pipeline is a pure function of its inputs: no state survives
//! an invocation, nothing is mutated, and the only abnormal outcome is the
//! transparent-texel discard, surfaced as `None`.

mod address;
mod blend;
mod clut;
mod dither;

pub use dither::dither_offset;

use super::primitives::{FragmentInput, OutputColor, RawTexel, TexelColor};
use super::registers::DrawConfig;
use super::vram::{BackSurface, ClutMemory, TextureMemory};

/// Evaluate one fragment
///
/// Computes the output color for the covered pixel at `screen`, or `None`
/// when the fragment resolves to the hardware's fully-transparent texel and
/// must not be written at all (no color write, no depth write).
///
/// # Arguments
///
/// * `config` - Per-draw configuration, fixed for the batch
/// * `texture` - Texture page memory (read for textured draws only)
/// * `clut` - Palette memory (read for indexed depth modes only)
/// * `back` - Destination-surface snapshot sampled when blending applies
/// * `input` - Interpolated color and texture coordinate
/// * `screen` - Absolute screen position of the fragment
///
/// # Returns
///
/// The fragment color in storage channel order, or `None` to discard
///
/// # Examples
///
/// ```
/// use shade_core::core::gpu::{
///     shade_fragment, BackSurface, ClutMemory, DrawConfig, FragmentInput,
///     Rgb, TextureMemory,
/// };
///
/// let config = DrawConfig::default();
/// let texture = TextureMemory::default();
/// let clut = ClutMemory::default();
/// let back = BackSurface::default();
///
/// let input = FragmentInput::flat(Rgb::new(1.0, 0.0, 0.0));
/// let out = shade_fragment(&config, &texture, &clut, &back, &input, (0, 0));
/// assert_eq!(out.unwrap().0, [0.0, 0.0, 1.0, 0.0]);
/// ```
pub fn shade_fragment(
    config: &DrawConfig,
    texture: &TextureMemory,
    clut: &ClutMemory,
    back: &BackSurface,
    input: &FragmentInput,
    screen: (u32, u32),
) -> Option<OutputColor> {
    let (color, blend_applies) = if config.textured {
        let texel = sample_texture(config, texture, clut, input.tex_coord)?;

        let color = if config.texture_blend {
            texel.color.modulate(input.color)
        } else {
            texel.color
        };

        (color, texel.semi_transparent)
    } else {
        let color = if config.dithering {
            dither::apply(input.color, screen.0, screen.1)
        } else {
            input.color
        };

        (color, config.semi_transparent)
    };

    let color = if blend_applies {
        let destination = back.sample_rgb(screen.0, screen.1);
        config.transparency_mode.blend(destination, color)
    } else {
        color
    };

    Some(OutputColor::from_rgb(color))
}

/// Sample the texture page at an interpolated coordinate
///
/// Resolves addressing and, for indexed depth modes, the palette lookup.
/// Returns `None` when the final raw value is the transparent sentinel.
fn sample_texture(
    config: &DrawConfig,
    texture: &TextureMemory,
    clut: &ClutMemory,
    tex_coord: (f32, f32),
) -> Option<TexelColor> {
    let depth = config.texture_depth;
    let addr = address::locate(depth, config.texture_x_flip, config.texture_y_flip, tex_coord);

    let raw_slot = texture.read_u16(addr.index);

    let raw = if depth.uses_clut() {
        clut::resolve(depth, raw_slot, addr.column, clut)
    } else {
        raw_slot
    };

    let texel = RawTexel(raw);
    if texel.is_transparent() {
        log::trace!(
            "Discarding transparent texel at uv=({:.1}, {:.1}) slot={}",
            tex_coord.0,
            tex_coord.1,
            addr.index,
        );
        return None;
    }

    Some(texel.decode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpu::primitives::{Rgb, TextureDepth};

    #[test]
    fn test_flat_fragment_passes_through() {
        let config = DrawConfig::default();
        let input = FragmentInput::flat(Rgb::new(0.2, 0.4, 0.6));

        let out = shade_fragment(
            &config,
            &TextureMemory::default(),
            &ClutMemory::default(),
            &BackSurface::default(),
            &input,
            (10, 10),
        )
        .unwrap();

        assert_eq!(out.to_rgb(), Rgb::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_direct_texture_sample() {
        let config = DrawConfig {
            textured: true,
            texture_depth: TextureDepth::Direct15,
            ..Default::default()
        };
        // One green texel at (0, 0)
        let texture = TextureMemory::from_texels(&[0x03E0]);

        let input = FragmentInput::textured(Rgb::WHITE, 0.0, 0.0);
        let out = shade_fragment(
            &config,
            &texture,
            &ClutMemory::default(),
            &BackSurface::default(),
            &input,
            (0, 0),
        )
        .unwrap();

        assert_eq!(out.to_rgb(), Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_transparent_texel_discards() {
        let config = DrawConfig {
            textured: true,
            texture_depth: TextureDepth::Direct15,
            ..Default::default()
        };
        let texture = TextureMemory::from_texels(&[0x0000, 0x7FFF]);

        let discard = shade_fragment(
            &config,
            &texture,
            &ClutMemory::default(),
            &BackSurface::default(),
            &FragmentInput::textured(Rgb::WHITE, 0.0, 0.0),
            (0, 0),
        );
        assert!(discard.is_none());

        let kept = shade_fragment(
            &config,
            &texture,
            &ClutMemory::default(),
            &BackSurface::default(),
            &FragmentInput::textured(Rgb::WHITE, 1.0, 0.0),
            (0, 0),
        );
        assert!(kept.is_some());
    }
}
