//! Vertices and point collections.
//!
//! Every attribute the SKEL format persists per point lives on [`Vertex`],
//! so a collection can never hold attribute arrays of a different length
//! than its vertex list.

use crate::util::{BBox3f, Vec3};

/// Default vertex color (opaque black).
pub const DEFAULT_COLOR: [u8; 4] = [0, 0, 0, 255];

/// A point of the original cloud or of the sample set.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Position.
    pub position: Vec3,
    /// Normal, zero when unset.
    pub normal: Vec3,
    /// RGBA color carried through mesh import/export.
    pub color: [u8; 4],
    /// Belongs to the original (dense) cloud.
    pub is_original: bool,
    /// Sample pinned by the skeletonization stage.
    pub is_fixed_sample: bool,
    /// Sample turned into a virtual skeleton point.
    pub is_skel_virtual: bool,
    /// Sample lies on a skeleton branch.
    pub is_skel_branch: bool,
    /// Excluded from boxes and removed by compaction.
    pub is_skel_ignore: bool,
    /// Local geometric reliability.
    pub eigen_confidence: f64,
    /// Offset within the owning collection.
    pub index: usize,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            color: DEFAULT_COLOR,
            is_original: false,
            is_fixed_sample: false,
            is_skel_virtual: false,
            is_skel_branch: false,
            is_skel_ignore: false,
            eigen_confidence: 0.0,
            index: 0,
        }
    }
}

impl Vertex {
    /// Create a vertex at `position` with the given normal.
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            ..Default::default()
        }
    }

    /// Check if the normal is set (non-zero).
    #[inline]
    pub fn has_normal(&self) -> bool {
        self.normal != Vec3::ZERO
    }
}

/// An ordered point collection with its bounding box.
///
/// The count is always `vertices.len()`.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub vertices: Vec<Vertex>,
    pub bbox: BBox3f,
}

impl PointCloud {
    /// Create an empty collection with a null box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from vertices: reindex, tag membership and
    /// compute the box over every vertex.
    pub fn from_vertices(vertices: Vec<Vertex>, is_original: bool) -> Self {
        let mut cloud = Self { vertices, bbox: BBox3f::NULL };
        for (i, v) in cloud.vertices.iter_mut().enumerate() {
            v.index = i;
            v.is_original = is_original;
        }
        cloud.recompute_bbox(false);
        cloud
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the collection holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Empty the vertex list and reset the box to null.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.bbox = BBox3f::NULL;
    }

    /// Append a vertex, assigning its index and growing the box.
    pub fn push(&mut self, mut v: Vertex) {
        v.index = self.vertices.len();
        self.bbox.expand_by_point(v.position);
        self.vertices.push(v);
    }

    /// Recompute the box, optionally skipping skel-ignored vertices.
    pub fn recompute_bbox(&mut self, exclude_ignored: bool) {
        self.bbox = super::compute_bounding_box(&self.vertices, exclude_ignored);
    }

    /// Reassign `index` to each vertex's current offset.
    pub fn reindex(&mut self) {
        for (i, v) in self.vertices.iter_mut().enumerate() {
            v.index = i;
        }
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }
}
