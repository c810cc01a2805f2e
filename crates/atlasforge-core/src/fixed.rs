//! Fixed-point layout geometry.
//!
//! All packing arithmetic happens in 26.6 fixed point: an `i32` where the low
//! six bits are the fractional part, giving 64 sub-units per pixel. Keeping
//! layout integral avoids the rounding drift that float accumulation would
//! introduce across a long row of glyphs.
//!
//! Conversion into floating-point atlas units goes through [`Fixed::to_f32`]
//! and nowhere else.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of sub-units per pixel.
pub const SUBPIXELS: i32 = 64;

const SHIFT: u32 = 6;

/// A 26.6 fixed-point scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(pub i32);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create from a whole number of pixels.
    #[inline]
    pub const fn from_int(pixels: i32) -> Self {
        Self(pixels << SHIFT)
    }

    /// Create from fractional pixels, rounding to the nearest sub-unit.
    #[inline]
    pub fn from_f32(pixels: f32) -> Self {
        Self((pixels * SUBPIXELS as f32).round() as i32)
    }

    /// Raw sub-unit value.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Largest whole pixel not greater than this value.
    #[inline]
    pub const fn floor(self) -> i32 {
        self.0 >> SHIFT
    }

    /// Smallest whole pixel not less than this value.
    #[inline]
    pub const fn ceil(self) -> i32 {
        (self.0 + SUBPIXELS - 1) >> SHIFT
    }

    /// Round up to a whole pixel, staying in fixed point.
    #[inline]
    pub const fn ceil_fixed(self) -> Self {
        Self::from_int(self.ceil())
    }

    /// Round down to a whole pixel, staying in fixed point.
    #[inline]
    pub const fn floor_fixed(self) -> Self {
        Self::from_int(self.floor())
    }

    /// Convert to floating-point atlas units.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SUBPIXELS as f32
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// A point in fixed-point layout space (y axis points down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    /// The origin.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    /// Create a new point.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a point at whole pixel coordinates.
    #[inline]
    pub const fn from_int(x: i32, y: i32) -> Self {
        Self {
            x: Fixed::from_int(x),
            y: Fixed::from_int(y),
        }
    }
}

impl Add for FixedPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rectangle in fixed-point layout space, stored as min/max corners.
///
/// The rectangle is half-open: it covers `min.x..max.x` and `min.y..max.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedRect {
    pub min: FixedPoint,
    pub max: FixedPoint,
}

impl FixedRect {
    /// The zero rectangle at the origin.
    pub const ZERO: Self = Self {
        min: FixedPoint::ZERO,
        max: FixedPoint::ZERO,
    };

    /// Create a rectangle from its corners.
    #[inline]
    pub const fn new(min: FixedPoint, max: FixedPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from whole pixel corners.
    #[inline]
    pub const fn from_int(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: FixedPoint::from_int(min_x, min_y),
            max: FixedPoint::from_int(max_x, max_y),
        }
    }

    /// Width in fixed units.
    #[inline]
    pub fn width(&self) -> Fixed {
        self.max.x - self.min.x
    }

    /// Height in fixed units.
    #[inline]
    pub fn height(&self) -> Fixed {
        self.max.y - self.min.y
    }

    /// Whether the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Move the rectangle by `offset`.
    #[inline]
    pub fn translate(&self, offset: FixedPoint) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Expand to whole pixels: floor the min corner, ceil the max corner.
    pub fn pixel_aligned(&self) -> Self {
        Self {
            min: FixedPoint::new(self.min.x.floor_fixed(), self.min.y.floor_fixed()),
            max: FixedPoint::new(self.max.x.ceil_fixed(), self.max.y.ceil_fixed()),
        }
    }

    /// Smallest rectangle containing both.
    ///
    /// An empty operand contributes nothing: if `self` is empty the result is
    /// `other`, and if `other` is empty the result is `self`.
    pub fn union(&self, other: &FixedRect) -> FixedRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        FixedRect {
            min: FixedPoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: FixedPoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Whether the two rectangles share any area.
    pub fn intersects(&self, other: &FixedRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
