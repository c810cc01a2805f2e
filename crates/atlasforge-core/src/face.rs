//! The font face interface used by layout and rasterization.
//!
//! Layout only ever asks a face three questions: how large is a glyph's ink,
//! how tall is a line, and what does a glyph look like when drawn at a given
//! pen position. [`GlyphSource`] captures exactly that, so the packing code can
//! be exercised with synthetic faces as well as real fonts.

use crate::fixed::{Fixed, FixedPoint, FixedRect};

/// Ink bounds and advance of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBounds {
    /// Tight ink rectangle relative to the pen position, y axis pointing down.
    pub ink: FixedRect,
    /// Horizontal advance to the next pen position.
    pub advance: Fixed,
}

/// Vertical metrics of a face at its active size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceMetrics {
    /// Distance from the baseline to the top of the line (positive).
    pub ascent: Fixed,
    /// Distance from the baseline to the bottom of the line (positive).
    pub descent: Fixed,
}

impl FaceMetrics {
    /// Total line height.
    #[inline]
    pub fn line_height(&self) -> Fixed {
        self.ascent + self.descent
    }
}

/// An integer pixel rectangle, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    /// Create a rectangle from its corners.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels (zero if inverted).
    #[inline]
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    /// Height in pixels (zero if inverted).
    #[inline]
    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }
}

/// A rendered 8-bit coverage mask and where it lands in layout space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    /// Destination rectangle in layout pixel space.
    pub rect: PixelRect,
    /// Row-major coverage values, `rect.width() * rect.height()` long.
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    /// Coverage at mask-local coordinates.
    #[inline]
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.rect.width() + x) as usize]
    }
}

/// A font face able to measure and draw individual code points.
///
/// Implementations must be deterministic: the same query always returns the
/// same answer, since the packer re-runs layout many times per atlas.
pub trait GlyphSource {
    /// Ink bounds and advance of `ch`, or `None` if the face has no glyph for it.
    fn glyph_bounds(&self, ch: char) -> Option<GlyphBounds>;

    /// Render `ch` with its pen at `dot`, or `None` if no mask is available.
    fn glyph_mask(&self, dot: FixedPoint, ch: char) -> Option<GlyphMask>;

    /// Line metrics at the active size.
    fn metrics(&self) -> FaceMetrics;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn glyph_bounds(&self, ch: char) -> Option<GlyphBounds> {
        (**self).glyph_bounds(ch)
    }

    fn glyph_mask(&self, dot: FixedPoint, ch: char) -> Option<GlyphMask> {
        (**self).glyph_mask(dot, ch)
    }

    fn metrics(&self) -> FaceMetrics {
        (**self).metrics()
    }
}
