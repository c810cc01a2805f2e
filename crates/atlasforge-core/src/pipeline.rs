//! End-to-end packing of a code point set into a finished atlas.

use std::collections::BTreeMap;

use image::RgbaImage;
use tracing::info;

use crate::face::GlyphSource;
use crate::fixed::{Fixed, FixedRect};
use crate::normalize::{NormalizedGlyph, normalize};
use crate::planner::SquareAtlasPlanner;
use crate::ranges::CodePointSet;
use crate::raster::AtlasRasterizer;

/// Padding between glyphs used when a request does not specify one.
pub const DEFAULT_PADDING: Fixed = Fixed::from_int(2);

/// A rasterized atlas together with its per-glyph metadata.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    /// RGBA canvas; glyphs are white with coverage in alpha.
    pub canvas: RgbaImage,
    /// Texture-space placement of each packed code point.
    pub glyphs: BTreeMap<char, NormalizedGlyph>,
    /// Tallest glyph frame in pixels.
    pub max_glyph_height: f32,
    /// Layout-space bounds the canvas was cut from.
    pub bounds: FixedRect,
}

impl PackedAtlas {
    /// Placement of `ch`, if it was packed.
    pub fn glyph(&self, ch: char) -> Option<&NormalizedGlyph> {
        self.glyphs.get(&ch)
    }

    /// Number of packed glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether nothing was packed.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Pack `chars` from `face` into the squarest atlas possible.
///
/// The space character is always included so that text layout has an advance
/// for whitespace. Code points the face cannot render are left out.
pub fn pack_atlas<F>(face: &F, chars: &CodePointSet, padding: Fixed) -> PackedAtlas
where
    F: GlyphSource + ?Sized,
{
    let mut chars = chars.clone();
    chars.insert(' ');
    let order = chars.to_vec();

    let layout = SquareAtlasPlanner::new(face, &order, padding).plan();
    let canvas = AtlasRasterizer::new(face).rasterize(&layout);
    let normalized = normalize(&layout);

    info!(
        target: "atlasforge_core::pipeline",
        requested = order.len(),
        packed = layout.len(),
        width = canvas.width(),
        height = canvas.height(),
        "packed glyph atlas"
    );

    PackedAtlas {
        canvas,
        glyphs: normalized.glyphs,
        max_glyph_height: normalized.max_glyph_height,
        bounds: layout.bounds(),
    }
}
