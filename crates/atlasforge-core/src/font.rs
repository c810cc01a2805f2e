//! TrueType / OpenType glyph source backed by `fontdue`.

use fontdue::{Font, FontSettings};
use tracing::debug;

use crate::error::{AtlasError, AtlasResult};
use crate::face::{FaceMetrics, GlyphBounds, GlyphMask, GlyphSource, PixelRect};
use crate::fixed::{Fixed, FixedPoint, FixedRect};

/// A parsed font face at a fixed pixel size.
///
/// Point sizes map one-to-one onto pixels (72 dpi), so a 16pt request is
/// rasterized with a 16px em.
pub struct TrueTypeFace {
    font: Font,
    px: f32,
    metrics: FaceMetrics,
}

impl TrueTypeFace {
    /// Parse a font binary and prepare it for rendering at `size` pixels.
    pub fn from_bytes(data: &[u8], size: f32) -> AtlasResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(AtlasError::InvalidSize(size));
        }

        let settings = FontSettings {
            scale: size,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings)
            .map_err(|e| AtlasError::FontParse(e.to_string()))?;

        let metrics = match font.horizontal_line_metrics(size) {
            Some(line) => FaceMetrics {
                ascent: Fixed::from_f32(line.ascent),
                // fontdue reports descent below the baseline as a negative value.
                descent: Fixed::from_f32(-line.descent),
            },
            None => {
                debug!(
                    target: "atlasforge_core::font",
                    size, "face has no horizontal line metrics, using the em box"
                );
                FaceMetrics {
                    ascent: Fixed::from_f32(size),
                    descent: Fixed::ZERO,
                }
            }
        };

        Ok(Self {
            font,
            px: size,
            metrics,
        })
    }

    /// Glyph index for `ch`, treating `.notdef` as missing.
    fn glyph_index(&self, ch: char) -> Option<u16> {
        match self.font.lookup_glyph_index(ch) {
            0 => None,
            index => Some(index),
        }
    }
}

impl GlyphSource for TrueTypeFace {
    fn glyph_bounds(&self, ch: char) -> Option<GlyphBounds> {
        let index = self.glyph_index(ch)?;
        let metrics = self.font.metrics_indexed(index, self.px);

        Some(GlyphBounds {
            ink: ink_rect(metrics.xmin, metrics.ymin, metrics.width, metrics.height),
            advance: Fixed::from_f32(metrics.advance_width),
        })
    }

    fn glyph_mask(&self, dot: FixedPoint, ch: char) -> Option<GlyphMask> {
        let index = self.glyph_index(ch)?;
        let (metrics, coverage) = self.font.rasterize_indexed(index, self.px);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }

        Some(GlyphMask {
            rect: mask_rect(dot, metrics.xmin, metrics.ymin, metrics.width, metrics.height),
            coverage,
        })
    }

    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }
}

/// Ink box of a rasterized glyph relative to its pen position, y axis down.
///
/// fontdue places the bitmap with its bottom-left corner at `(xmin, ymin)`
/// above the baseline. Using the bitmap's integer placement keeps the frame
/// identical to the pixels [`mask_rect`] draws.
fn ink_rect(xmin: i32, ymin: i32, width: usize, height: usize) -> FixedRect {
    let (width, height) = (width as i32, height as i32);
    FixedRect::from_int(xmin, -(ymin + height), xmin + width, -ymin)
}

/// Where the bitmap of a glyph lands when its pen is at `dot`.
fn mask_rect(dot: FixedPoint, xmin: i32, ymin: i32, width: usize, height: usize) -> PixelRect {
    let ink = ink_rect(xmin, ymin, width, height);
    let (x, y) = (dot.x.floor(), dot.y.floor());
    PixelRect::new(
        x + ink.min.x.floor(),
        y + ink.min.y.floor(),
        x + ink.max.x.floor(),
        y + ink.max.y.floor(),
    )
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("px", &self.px)
            .field("glyph_count", &self.font.glyph_count())
            .field("metrics", &self.metrics)
            .finish()
    }
}
