//! Floating-point atlas-space geometry.
//!
//! These are the types handed to consumers of a packed atlas. Layout never
//! touches them; see [`crate::fixed`] for the layout-side types.

use serde::{Deserialize, Serialize};

/// A point in atlas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AtlasPoint {
    pub x: f32,
    pub y: f32,
}

impl AtlasPoint {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A rectangle in atlas space defined by two corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AtlasRect {
    pub min: AtlasPoint,
    pub max: AtlasPoint,
}

impl AtlasRect {
    /// Create a rectangle from corner coordinates.
    #[inline]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: AtlasPoint { x: min_x, y: min_y },
            max: AtlasPoint { x: max_x, y: max_y },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        min: AtlasPoint::ZERO,
        max: AtlasPoint::ZERO,
    };

    /// Reorder the corners so that `min <= max` on both axes.
    pub fn normalized(&self) -> Self {
        Self {
            min: AtlasPoint {
                x: self.min.x.min(self.max.x),
                y: self.min.y.min(self.max.y),
            },
            max: AtlasPoint {
                x: self.min.x.max(self.max.x),
                y: self.min.y.max(self.max.y),
            },
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}
