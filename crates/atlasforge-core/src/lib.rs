//! Glyph atlas layout and rasterization for Atlasforge.
//!
//! This crate turns a font face and a set of code points into a single
//! near-square texture plus the per-glyph metadata a renderer needs to sample
//! it.
//!
//! # Pipeline
//!
//! 1. [`ranges`] expands configured character ranges into an ordered
//!    [`CodePointSet`].
//! 2. [`SquareAtlasPlanner`] bisects over row widths, driving a [`RowPacker`]
//!    each time, until the packed bounds are as close to square as possible.
//! 3. [`AtlasRasterizer`] paints every glyph mask into an RGBA canvas.
//! 4. [`CoordinateNormalizer`] flips the layout into bottom-up texture space.
//!
//! [`pack_atlas`] runs all four steps:
//!
//! ```no_run
//! use atlasforge_core::{expand_ranges, pack_atlas, TrueTypeFace, DEFAULT_PADDING};
//!
//! # fn example(font_bytes: &[u8]) -> atlasforge_core::AtlasResult<()> {
//! let face = TrueTypeFace::from_bytes(font_bytes, 16.0)?;
//! let chars = expand_ranges([("A", "Z"), ("a", "z")])?;
//! let atlas = pack_atlas(&face, &chars, DEFAULT_PADDING);
//!
//! println!("{}x{} with {} glyphs", atlas.canvas.width(), atlas.canvas.height(), atlas.len());
//! # Ok(())
//! # }
//! ```
//!
//! Layout runs in 26.6 fixed point ([`fixed`]); only the final metadata is
//! expressed in floating-point atlas units ([`types`]).

mod error;
mod face;
mod font;
mod layout;
mod normalize;
mod packer;
mod pipeline;
mod planner;
mod raster;

pub mod fixed;
pub mod ranges;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{AtlasError, AtlasResult};
pub use face::{FaceMetrics, GlyphBounds, GlyphMask, GlyphSource, PixelRect};
pub use fixed::{Fixed, FixedPoint, FixedRect};
pub use font::TrueTypeFace;
pub use layout::{AtlasLayout, GlyphPlacement};
pub use normalize::{CoordinateNormalizer, NormalizedAtlas, NormalizedGlyph, normalize};
pub use packer::RowPacker;
pub use pipeline::{DEFAULT_PADDING, PackedAtlas, pack_atlas};
pub use planner::{SEARCH_LIMIT, SquareAtlasPlanner};
pub use ranges::{CodePointRange, CodePointSet, expand_ranges};
pub use raster::AtlasRasterizer;
pub use types::{AtlasPoint, AtlasRect};

// Re-export image types that appear in the public API
pub use image;
