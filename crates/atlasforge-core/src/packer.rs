//! Greedy row packing of glyph frames.
//!
//! Glyphs are laid out left to right in input order. Each frame is the ink
//! box expanded to whole pixels, and every pen advance is rounded up to a whole
//! pixel, so every frame edge lands on a pixel boundary and sampling one glyph
//! never bleeds into its neighbour. Once a frame reaches the target width the
//! pen drops to the next row.

use std::collections::BTreeMap;

use tracing::trace;

use crate::face::GlyphSource;
use crate::fixed::{Fixed, FixedPoint, FixedRect};
use crate::layout::{AtlasLayout, GlyphPlacement};

/// Packs a fixed sequence of code points into rows of a given width.
#[derive(Debug, Clone, Copy)]
pub struct RowPacker<'a, F: ?Sized> {
    face: &'a F,
    chars: &'a [char],
    padding: Fixed,
    line_height: Fixed,
}

impl<'a, F: GlyphSource + ?Sized> RowPacker<'a, F> {
    /// Create a packer for `chars`, which are placed in the order given.
    pub fn new(face: &'a F, chars: &'a [char], padding: Fixed) -> Self {
        Self {
            face,
            chars,
            padding,
            line_height: face.metrics().line_height(),
        }
    }

    /// Place every glyph, starting a new row whenever a frame reaches `width`.
    ///
    /// The first glyph of a row is always placed, however narrow `width` is.
    pub fn pack(&self, width: Fixed) -> AtlasLayout {
        let mut placements = BTreeMap::new();
        let mut bounds = FixedRect::ZERO;
        let mut dot = FixedPoint::ZERO;

        for &ch in self.chars {
            let Some(glyph) = self.face.glyph_bounds(ch) else {
                trace!(
                    target: "atlasforge_core::packer",
                    ch = %ch.escape_unicode(),
                    "no glyph, skipping"
                );
                continue;
            };

            let aligned = glyph.ink.pixel_aligned();
            dot.x -= aligned.min.x;
            let frame = aligned.translate(dot);

            placements.insert(
                ch,
                GlyphPlacement {
                    dot,
                    frame,
                    advance: glyph.advance,
                },
            );
            bounds = bounds.union(&frame);

            dot.x = (frame.max.x + self.padding).ceil_fixed();

            if frame.max.x >= width {
                dot.x = Fixed::ZERO;
                dot.y = (dot.y + self.line_height + self.padding).ceil_fixed();
            }
        }

        AtlasLayout::new(placements, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BoxFace;

    fn letters() -> Vec<char> {
        ('A'..='Z').collect()
    }

    fn assert_no_overlap(layout: &AtlasLayout) {
        let frames: Vec<_> = layout.iter().map(|(ch, p)| (ch, p.frame)).collect();
        for (i, (a, fa)) in frames.iter().enumerate() {
            for (b, fb) in &frames[i + 1..] {
                assert!(!fa.intersects(fb), "{a:?} {fa:?} overlaps {b:?} {fb:?}");
            }
        }
    }

    #[test]
    fn test_no_overlap_across_widths() {
        let chars = letters();
        let face = BoxFace::uniform(chars.iter().copied(), 7, 11)
            .with_glyph('M', FixedRect::from_int(-2, -14, 12, 3), Fixed::from_int(10))
            .with_glyph('Q', FixedRect::from_int(1, -11, 9, 4), Fixed::from_int(10))
            .with_metrics(Fixed::from_int(14), Fixed::from_int(4));
        let packer = RowPacker::new(&face, &chars, Fixed::from_int(2));

        for px in [0, 1, 7, 8, 30, 64, 100, 1000] {
            let layout = packer.pack(Fixed::from_int(px));
            assert_eq!(layout.len(), chars.len());
            assert_no_overlap(&layout);
        }
    }

    #[test]
    fn test_rows_never_empty() {
        let chars = letters();
        let face = BoxFace::uniform(chars.iter().copied(), 10, 10);
        let padding = Fixed::from_int(2);
        let packer = RowPacker::new(&face, &chars, padding);
        let pitch = Fixed::from_int(12);

        for px in [10, 25, 47, 90] {
            let layout = packer.pack(Fixed::from_int(px));
            let mut rows: Vec<Fixed> = layout.iter().map(|(_, p)| p.dot.y).collect();
            rows.sort();
            rows.dedup();
            for (i, y) in rows.iter().enumerate() {
                assert_eq!(*y, Fixed(pitch.raw() * i as i32), "row {i} at width {px}");
            }
        }
    }

    #[test]
    fn test_only_row_end_reaches_width() {
        let chars = letters();
        let face = BoxFace::uniform(chars.iter().copied(), 10, 10);
        let width = Fixed::from_int(50);
        let layout = RowPacker::new(&face, &chars, Fixed::from_int(2)).pack(width);

        let mut by_row: BTreeMap<Fixed, Vec<FixedRect>> = BTreeMap::new();
        for (_, placement) in layout.iter() {
            by_row.entry(placement.dot.y).or_default().push(placement.frame);
        }
        for frames in by_row.values_mut() {
            frames.sort_by_key(|f| f.min.x);
            let (last, rest) = frames.split_last().unwrap();
            assert!(rest.iter().all(|f| f.max.x < width));
            assert!(last.min.x < width);
        }
    }

    #[test]
    fn test_narrow_width_places_one_per_row() {
        let chars = vec!['a', 'b', 'c'];
        let face = BoxFace::uniform(chars.iter().copied(), 10, 10);
        let layout = RowPacker::new(&face, &chars, Fixed::ZERO).pack(Fixed::ZERO);

        for (i, ch) in chars.iter().enumerate() {
            let placement = layout.get(*ch).unwrap();
            assert_eq!(placement.frame.min.x, Fixed::ZERO);
            assert_eq!(placement.dot.y, Fixed::from_int(10 * i as i32));
        }
    }

    #[test]
    fn test_frames_are_pixel_aligned() {
        let chars = vec!['a', 'b'];
        let ink = FixedRect::new(
            FixedPoint::new(Fixed(32), Fixed(-600)),
            FixedPoint::new(Fixed(595), Fixed(20)),
        );
        let face = BoxFace::uniform([], 0, 0)
            .with_glyph('a', ink, Fixed(630))
            .with_glyph('b', ink, Fixed(630))
            .with_metrics(Fixed(650), Fixed(100));
        let layout = RowPacker::new(&face, &chars, Fixed(40)).pack(Fixed::from_int(1000));

        let a = layout.get('a').unwrap();
        assert_eq!(a.frame, FixedRect::from_int(0, -10, 10, 1));
        assert_eq!(a.dot, FixedPoint::ZERO);
        assert_eq!(a.advance, Fixed(630));

        // 10px frame + 40/64px padding rounds up to 11px.
        let b = layout.get('b').unwrap();
        assert_eq!(b.frame.min.x, Fixed::from_int(11));
        assert_eq!(b.dot.x, Fixed::from_int(11));
    }

    #[test]
    fn test_negative_bearing_shifts_dot() {
        let chars = vec!['j'];
        let face = BoxFace::uniform([], 0, 0)
            .with_glyph('j', FixedRect::from_int(-3, -10, 4, 3), Fixed::from_int(5))
            .with_metrics(Fixed::from_int(10), Fixed::from_int(3));
        let layout = RowPacker::new(&face, &chars, Fixed::ZERO).pack(Fixed::from_int(100));

        let j = layout.get('j').unwrap();
        assert_eq!(j.dot, FixedPoint::from_int(3, 0));
        assert_eq!(j.frame, FixedRect::from_int(0, -10, 7, 3));
    }

    #[test]
    fn test_row_pitch_rounds_up() {
        let chars = vec!['a', 'b'];
        let face = BoxFace::uniform(chars.iter().copied(), 10, 10)
            .with_metrics(Fixed(600), Fixed(100));
        let layout = RowPacker::new(&face, &chars, Fixed::from_int(1)).pack(Fixed::ZERO);

        // 600 + 100 + 64 = 764 sub-units, rounded up to 12px.
        assert_eq!(layout.get('b').unwrap().dot.y, Fixed::from_int(12));
    }

    #[test]
    fn test_missing_glyph_is_skipped() {
        let chars = vec!['a', '\u{FFFF}', 'b'];
        let face = BoxFace::uniform(['a', 'b'], 10, 10);
        let with_missing =
            RowPacker::new(&face, &chars, Fixed::from_int(2)).pack(Fixed::from_int(100));
        let without =
            RowPacker::new(&face, &['a', 'b'], Fixed::from_int(2)).pack(Fixed::from_int(100));

        assert!(with_missing.get('\u{FFFF}').is_none());
        assert_eq!(with_missing, without);
    }

    #[test]
    fn test_empty_glyph_does_not_grow_bounds() {
        let chars = vec![' ', 'a'];
        let face =
            BoxFace::uniform(['a'], 10, 10).with_glyph(' ', FixedRect::ZERO, Fixed::from_int(4));
        let layout = RowPacker::new(&face, &chars, Fixed::from_int(2)).pack(Fixed::from_int(100));

        assert!(layout.get(' ').is_some());
        assert_eq!(layout.get('a').unwrap().frame.min.x, Fixed::from_int(2));
        assert_eq!(layout.bounds(), FixedRect::from_int(2, -10, 12, 0));
    }

    #[test]
    fn test_deterministic() {
        let chars = letters();
        let face = BoxFace::uniform(chars.iter().copied(), 9, 13);
        let packer = RowPacker::new(&face, &chars, Fixed::from_int(2));
        assert_eq!(packer.pack(Fixed::from_int(77)), packer.pack(Fixed::from_int(77)));
    }
}
