//! Painting packed glyphs onto the atlas canvas.

use image::{Rgba, RgbaImage};
use tracing::{trace, warn};

use crate::face::{GlyphMask, GlyphSource};
use crate::layout::AtlasLayout;

/// Fully transparent pixel.
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel written for a given mask coverage: white, with coverage as alpha.
#[inline]
fn coverage_pixel(alpha: u8) -> Rgba<u8> {
    if alpha == 0 {
        CLEAR
    } else {
        Rgba([255, 255, 255, alpha])
    }
}

/// Paints every glyph of a layout into an RGBA canvas sized to its bounds.
#[derive(Debug, Clone, Copy)]
pub struct AtlasRasterizer<'a, F: ?Sized> {
    face: &'a F,
}

impl<'a, F: GlyphSource + ?Sized> AtlasRasterizer<'a, F> {
    /// Create a rasterizer drawing glyphs from `face`.
    pub fn new(face: &'a F) -> Self {
        Self { face }
    }

    /// Allocate the canvas and draw every glyph at its recorded pen position.
    ///
    /// Glyphs without a mask leave their area transparent.
    pub fn rasterize(&self, layout: &AtlasLayout) -> RgbaImage {
        let bounds = layout.bounds();
        let origin_x = bounds.min.x.floor();
        let origin_y = bounds.min.y.floor();
        let width = (bounds.max.x.ceil() - origin_x).max(0) as u32;
        let height = (bounds.max.y.ceil() - origin_y).max(0) as u32;

        let mut canvas = RgbaImage::from_pixel(width, height, CLEAR);

        for (ch, placement) in layout.iter() {
            let Some(mask) = self.face.glyph_mask(placement.dot, ch) else {
                trace!(
                    target: "atlasforge_core::raster",
                    ch = %ch.escape_unicode(),
                    "no mask, leaving blank"
                );
                continue;
            };
            let expected = mask.rect.width() as usize * mask.rect.height() as usize;
            if mask.coverage.len() != expected {
                warn!(
                    target: "atlasforge_core::raster",
                    ch = %ch.escape_unicode(),
                    expected,
                    actual = mask.coverage.len(),
                    "mask size does not match its rectangle, skipping"
                );
                continue;
            }
            blit(&mut canvas, &mask, origin_x, origin_y);
        }

        canvas
    }
}

/// Copy `mask` into `canvas`, replacing whatever was there.
///
/// `origin_x`/`origin_y` is the layout-space position of the canvas' top-left
/// pixel. Mask pixels outside the canvas are dropped.
fn blit(canvas: &mut RgbaImage, mask: &GlyphMask, origin_x: i32, origin_y: i32) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    for my in 0..mask.rect.height() {
        let y = mask.rect.y0 + my as i32 - origin_y;
        if y < 0 || y as u32 >= canvas_h {
            continue;
        }
        for mx in 0..mask.rect.width() {
            let x = mask.rect.x0 + mx as i32 - origin_x;
            if x < 0 || x as u32 >= canvas_w {
                continue;
            }
            canvas.put_pixel(x as u32, y as u32, coverage_pixel(mask.coverage_at(mx, my)));
        }
    }
}
