//! Synthetic glyph sources for unit tests.

use std::collections::BTreeMap;

use crate::face::{FaceMetrics, GlyphBounds, GlyphMask, GlyphSource, PixelRect};
use crate::fixed::{Fixed, FixedPoint, FixedRect};

/// A face whose glyphs are solid boxes of configurable size.
#[derive(Debug, Clone)]
pub(crate) struct BoxFace {
    glyphs: BTreeMap<char, GlyphBounds>,
    metrics: FaceMetrics,
}

impl BoxFace {
    /// Every char gets a `width` x `height` box sitting on the baseline.
    pub(crate) fn uniform(chars: impl IntoIterator<Item = char>, width: i32, height: i32) -> Self {
        let bounds = GlyphBounds {
            ink: FixedRect::from_int(0, -height, width, 0),
            advance: Fixed::from_int(width),
        };
        Self {
            glyphs: chars.into_iter().map(|ch| (ch, bounds)).collect(),
            metrics: FaceMetrics {
                ascent: Fixed::from_int(height),
                descent: Fixed::ZERO,
            },
        }
    }

    pub(crate) fn with_glyph(mut self, ch: char, ink: FixedRect, advance: Fixed) -> Self {
        self.glyphs.insert(ch, GlyphBounds { ink, advance });
        self
    }

    pub(crate) fn with_metrics(mut self, ascent: Fixed, descent: Fixed) -> Self {
        self.metrics = FaceMetrics { ascent, descent };
        self
    }

    /// Coverage value painted for `ch`, unique enough to tell glyphs apart.
    pub(crate) fn shade(ch: char) -> u8 {
        (ch as u32 % 254 + 1) as u8
    }
}

impl GlyphSource for BoxFace {
    fn glyph_bounds(&self, ch: char) -> Option<GlyphBounds> {
        self.glyphs.get(&ch).copied()
    }

    fn glyph_mask(&self, dot: FixedPoint, ch: char) -> Option<GlyphMask> {
        let frame = self.glyphs.get(&ch)?.ink.pixel_aligned().translate(dot);
        if frame.is_empty() {
            return None;
        }
        let rect = PixelRect::new(
            frame.min.x.floor(),
            frame.min.y.floor(),
            frame.max.x.ceil(),
            frame.max.y.ceil(),
        );
        let len = (rect.width() * rect.height()) as usize;
        Some(GlyphMask {
            rect,
            coverage: vec![Self::shade(ch); len],
        })
    }

    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }
}
