//! Conversion of a packed layout into atlas texture space.
//!
//! Layout space has its origin wherever the packer started and its y axis
//! pointing down. Consumers sample the atlas with the origin at the bottom-left
//! corner and y pointing up, in floating-point pixel units. Every coordinate is
//! made local to the atlas bounds, then flipped vertically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed, FixedPoint, FixedRect};
use crate::layout::AtlasLayout;
use crate::types::{AtlasPoint, AtlasRect};

/// Placement of one glyph in atlas texture space.
///
/// Glyphs without ink keep a zero-size frame, pinned inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGlyph {
    /// Pen position of the glyph.
    pub dot: AtlasPoint,
    /// Ink frame, with `min <= max` on both axes.
    pub frame: AtlasRect,
    /// Horizontal advance in pixels.
    pub advance: f32,
}

/// Every glyph of an atlas in texture space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedAtlas {
    /// Per code point placement.
    pub glyphs: BTreeMap<char, NormalizedGlyph>,
    /// Tallest glyph frame, for line-height layout.
    pub max_glyph_height: f32,
    /// Width and height of the atlas in pixels.
    pub width: f32,
    pub height: f32,
}

/// Maps fixed-point layout coordinates into flipped atlas space.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateNormalizer {
    bounds: FixedRect,
}

impl CoordinateNormalizer {
    /// Create a normalizer for an atlas covering `bounds`.
    pub fn new(bounds: FixedRect) -> Self {
        Self { bounds }
    }

    /// Convert a layout point.
    pub fn point(&self, p: FixedPoint) -> AtlasPoint {
        let local = p - self.bounds.min;
        AtlasPoint::new(local.x.to_f32(), (self.bounds.height() - local.y).to_f32())
    }

    /// Convert a layout rectangle, normalizing its corners after the flip.
    pub fn rect(&self, r: FixedRect) -> AtlasRect {
        AtlasRect {
            min: self.point(r.min),
            max: self.point(r.max),
        }
        .normalized()
    }

    /// Convert a horizontal length.
    pub fn length(&self, v: Fixed) -> f32 {
        v.to_f32()
    }

    /// Clamp a converted rectangle into the atlas.
    fn pin(&self, r: AtlasRect) -> AtlasRect {
        let (width, height) = (self.bounds.width().to_f32(), self.bounds.height().to_f32());
        let clamp = |p: AtlasPoint| AtlasPoint::new(p.x.clamp(0.0, width), p.y.clamp(0.0, height));
        AtlasRect {
            min: clamp(r.min),
            max: clamp(r.max),
        }
    }

    /// Convert every placement of `layout`.
    ///
    /// Empty frames sit at the pen position, which may lie outside the atlas
    /// bounds; they are clamped onto its edge.
    pub fn normalize(&self, layout: &AtlasLayout) -> NormalizedAtlas {
        let mut glyphs = BTreeMap::new();
        let mut max_glyph_height = 0.0f32;

        for (ch, placement) in layout.iter() {
            let mut frame = self.rect(placement.frame);
            if placement.frame.is_empty() {
                frame = self.pin(frame);
            }
            max_glyph_height = max_glyph_height.max(frame.height());
            glyphs.insert(
                ch,
                NormalizedGlyph {
                    dot: self.point(placement.dot),
                    frame,
                    advance: self.length(placement.advance),
                },
            );
        }

        NormalizedAtlas {
            glyphs,
            max_glyph_height,
            width: self.bounds.width().to_f32(),
            height: self.bounds.height().to_f32(),
        }
    }
}

/// Convert `layout` using its own bounds.
pub fn normalize(layout: &AtlasLayout) -> NormalizedAtlas {
    CoordinateNormalizer::new(layout.bounds()).normalize(layout)
}
