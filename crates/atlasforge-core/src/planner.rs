//! Choosing a row width that makes the packed atlas close to square.
//!
//! There is no closed form for the best width: the outcome depends on glyph
//! order, glyph sizes and padding. Widening the rows can only keep or reduce
//! the row count, so "bounds are at least as wide as tall" flips from false to
//! true once as the width grows. Bisection finds that flip point in
//! `O(log SEARCH_LIMIT)` packing passes.

use tracing::debug;

use crate::face::GlyphSource;
use crate::fixed::Fixed;
use crate::layout::AtlasLayout;
use crate::packer::RowPacker;

/// Upper bound of the width search, in sub-pixel units (1024 * 1024 pixels).
pub const SEARCH_LIMIT: Fixed = Fixed::from_int(1024 * 1024);

/// Drives a [`RowPacker`] to the squarest layout it can produce.
#[derive(Debug, Clone, Copy)]
pub struct SquareAtlasPlanner<'a, F: ?Sized> {
    packer: RowPacker<'a, F>,
}

impl<'a, F: GlyphSource + ?Sized> SquareAtlasPlanner<'a, F> {
    /// Create a planner over `chars` in the order given.
    pub fn new(face: &'a F, chars: &'a [char], padding: Fixed) -> Self {
        Self {
            packer: RowPacker::new(face, chars, padding),
        }
    }

    /// The packer this planner drives.
    pub fn packer(&self) -> &RowPacker<'a, F> {
        &self.packer
    }

    /// Smallest width at which the packed bounds are at least as wide as tall.
    ///
    /// Returns [`SEARCH_LIMIT`] if no width below it qualifies.
    pub fn square_width(&self) -> Fixed {
        Fixed(search(SEARCH_LIMIT.raw(), |raw| {
            self.packer.pack(Fixed(raw)).is_landscape()
        }))
    }

    /// Pack at [`square_width`](Self::square_width).
    pub fn plan(&self) -> AtlasLayout {
        let width = self.square_width();
        let layout = self.packer.pack(width);
        let bounds = layout.bounds();
        debug!(
            target: "atlasforge_core::planner",
            width = width.to_f32(),
            glyphs = layout.len(),
            bounds_width = bounds.width().to_f32(),
            bounds_height = bounds.height().to_f32(),
            "planned square atlas"
        );
        layout
    }
}

/// Smallest `i` in `[0, n)` for which `pred(i)` holds, or `n` if none does.
///
/// `pred` must be false up to some point and true from there on.
fn search(n: i32, mut pred: impl FnMut(i32) -> bool) -> i32 {
    let (mut lo, mut hi) = (0, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
