//! Math type re-exports and bounding boxes.
//!
//! This module re-exports the `glam` types used for positions and normals
//! and provides the axis-aligned box shared by both point collections.

pub use glam::Vec3;

use std::fmt;

/// Axis-aligned 3D bounding box with single precision.
///
/// The null state ([`BBox3f::NULL`]) is an inverted box and is distinct
/// from a degenerate box around a single point, which has zero size but
/// is not null.
#[derive(Clone, Copy, PartialEq)]
pub struct BBox3f {
    pub min: Vec3,
    pub max: Vec3,
}

impl BBox3f {
    /// Null bounding box (inverted, will expand on first point).
    pub const NULL: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a new bounding box from min and max points.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a bounding box from a single point.
    #[inline]
    pub fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Check if this box is in the null state (contains no point).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Reset to the null state.
    #[inline]
    pub fn set_null(&mut self) {
        *self = Self::NULL;
    }

    /// Expand this box to include a point.
    #[inline]
    pub fn expand_by_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand this box to include another box.
    #[inline]
    pub fn expand_by_box(&mut self, other: &Self) {
        if !other.is_null() {
            self.min = self.min.min(other.min);
            self.max = self.max.max(other.max);
        }
    }

    /// Check whether a point lies inside the box (inclusive).
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Get the center of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size (extents) of the box.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the diagonal, 0 for a null box.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        if self.is_null() {
            return 0.0;
        }
        self.size().as_dvec3().length()
    }

    /// Largest extent over the three axes.
    #[inline]
    pub fn max_extent(&self) -> f32 {
        self.size().abs().max_element()
    }
}

impl Default for BBox3f {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for BBox3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "BBox3f(null)")
        } else {
            write!(f, "BBox3f({:?} - {:?})", self.min, self.max)
        }
    }
}
