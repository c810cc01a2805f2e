//! Packed glyph placements in fixed-point layout space.

use std::collections::BTreeMap;

use crate::fixed::{Fixed, FixedPoint, FixedRect};

/// Where a single glyph sits in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Pen position the glyph is drawn from.
    pub dot: FixedPoint,
    /// Pixel-aligned ink frame, already translated by `dot`.
    pub frame: FixedRect,
    /// Horizontal advance to the next glyph.
    pub advance: Fixed,
}

/// The result of one packing pass: every placed glyph plus their union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtlasLayout {
    placements: BTreeMap<char, GlyphPlacement>,
    bounds: FixedRect,
}

impl AtlasLayout {
    pub(crate) fn new(placements: BTreeMap<char, GlyphPlacement>, bounds: FixedRect) -> Self {
        Self { placements, bounds }
    }

    /// Union of all glyph frames.
    pub fn bounds(&self) -> FixedRect {
        self.bounds
    }

    /// Placement of `ch`, if it was packed.
    pub fn get(&self, ch: char) -> Option<&GlyphPlacement> {
        self.placements.get(&ch)
    }

    /// All placements in ascending code point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphPlacement)> {
        self.placements.iter().map(|(ch, placement)| (*ch, placement))
    }

    /// Number of placed glyphs.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether no glyph was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Whether the bounds are at least as wide as they are tall.
    pub fn is_landscape(&self) -> bool {
        self.bounds.width() >= self.bounds.height()
    }
}
