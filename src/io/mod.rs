//! External file formats.
//!
//! PLY and PCD byte-level codecs live outside this crate. They are reached
//! through the [`MeshIo`] and [`PcdIo`] traits, which hand over plain
//! [`PointRecord`] lists or raw [`PcdCloud`] buffers. The XYZN text format
//! is read here directly.

pub mod pcd;
pub mod ply;
pub mod xyzn;

pub use pcd::{extract_points, PcdCloud, PcdDatatype, PcdField, PcdIo};
pub use ply::{import_mesh, export_mesh, MeshIo};
pub use xyzn::{load_xyzn, read_xyzn};

use crate::geom::{Vertex, DEFAULT_COLOR};
use crate::util::Vec3;
use std::ops::{BitOr, BitOrAssign};

/// One point handed across a collaborator boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointRecord {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub color: Option<[u8; 4]>,
}

impl PointRecord {
    /// Create a record from a position only.
    pub fn new(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    /// Convert to a vertex; missing attributes take their defaults.
    pub fn to_vertex(&self) -> Vertex {
        let mut v = Vertex::new(self.position, self.normal.unwrap_or(Vec3::ZERO));
        v.color = self.color.unwrap_or(DEFAULT_COLOR);
        v
    }

    /// Build a record from a vertex, keeping the attributes `mask` selects.
    pub fn from_vertex(v: &Vertex, mask: IoMask) -> Self {
        Self {
            position: v.position,
            normal: mask.contains(IoMask::VERT_NORMAL).then_some(v.normal),
            color: mask.contains(IoMask::VERT_COLOR).then_some(v.color),
        }
    }
}

/// Capability mask selecting which attributes a mesh codec reads or writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IoMask(u32);

impl IoMask {
    pub const NONE: Self = Self(0);
    pub const VERT_COORD: Self = Self(1 << 0);
    pub const VERT_NORMAL: Self = Self(1 << 1);
    pub const VERT_COLOR: Self = Self(1 << 2);
    /// Faces are polygons rather than triangles.
    pub const BIT_POLYGONAL: Self = Self(1 << 3);

    /// Mask used when loading the original cloud.
    pub const ORIGINAL_READ: Self = Self(Self::VERT_COORD.0 | Self::VERT_NORMAL.0);
    /// Mask used when loading samples and for every write.
    pub const FULL: Self = Self(
        Self::VERT_COORD.0 | Self::VERT_NORMAL.0 | Self::VERT_COLOR.0 | Self::BIT_POLYGONAL.0,
    );

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for IoMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for IoMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_ops() {
        let mut m = IoMask::VERT_COORD | IoMask::VERT_NORMAL;
        assert_eq!(m, IoMask::ORIGINAL_READ);
        assert!(!m.contains(IoMask::VERT_COLOR));

        m |= IoMask::VERT_COLOR;
        m |= IoMask::BIT_POLYGONAL;
        assert_eq!(m, IoMask::FULL);
        assert_eq!(m.bits(), 0b1111);
    }

    #[test]
    fn test_record_vertex_conversion() {
        let r = PointRecord { position: Vec3::ONE, normal: None, color: Some([1, 2, 3, 4]) };
        let v = r.to_vertex();
        assert_eq!(v.normal, Vec3::ZERO);
        assert_eq!(v.color, [1, 2, 3, 4]);

        let back = PointRecord::from_vertex(&v, IoMask::ORIGINAL_READ);
        assert_eq!(back.normal, Some(Vec3::ZERO));
        assert_eq!(back.color, None);
    }
}
