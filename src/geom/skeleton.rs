//! Skeleton graph: ordered branches of curve points.
//!
//! A curve point may name the sample it was derived from through
//! `corresponding_sample_index`. That is a lookup relation, not
//! ownership: the index is only meaningful right after
//! [`Skeleton::rebuild_sample_correspondence`] and goes stale as soon as
//! the sample collection is compacted.

use smallvec::SmallVec;
use std::collections::HashMap;

use crate::util::Vec3;

/// Sentinel for a curve point without a corresponding sample.
pub const NO_SAMPLE: i32 = -1;

/// A point along a skeleton branch.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePoint {
    pub position: Vec3,
    pub skel_radius: f64,
    pub is_virtual: bool,
    /// Offset into the sample collection, [`NO_SAMPLE`] when unset.
    pub corresponding_sample_index: i32,
}

impl Default for CurvePoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            skel_radius: 0.0,
            is_virtual: false,
            corresponding_sample_index: NO_SAMPLE,
        }
    }
}

impl CurvePoint {
    /// Create a curve point at `position` with no other data.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Corresponding sample offset, if set.
    #[inline]
    pub fn sample_index(&self) -> Option<usize> {
        usize::try_from(self.corresponding_sample_index).ok()
    }
}

/// An open polyline of curve points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Branch {
    pub curve: Vec<CurvePoint>,
}

impl Branch {
    pub fn new(curve: Vec<CurvePoint>) -> Self {
        Self { curve }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curve.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curve.is_empty()
    }

    /// Polyline length.
    pub fn length(&self) -> f32 {
        self.curve
            .windows(2)
            .map(|w| w[0].position.distance(w[1].position))
            .sum()
    }
}

/// Location of a curve point: branch number and offset within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchPos {
    pub branch: usize,
    pub point: usize,
}

/// Ordered collection of branches plus the derived sample lookup.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    pub branches: Vec<Branch>,
    sample_map: HashMap<usize, SmallVec<[BranchPos; 2]>>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a skeleton from branches; the sample lookup starts empty.
    pub fn from_branches(branches: Vec<Branch>) -> Self {
        Self {
            branches,
            sample_map: HashMap::new(),
        }
    }

    /// Remove all branches and the derived lookup.
    pub fn clear(&mut self) {
        self.branches.clear();
        self.sample_map.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    #[inline]
    pub fn num_branches(&self) -> usize {
        self.branches.len()
    }

    /// Total number of curve points over all branches.
    pub fn size(&self) -> usize {
        self.branches.iter().map(Branch::len).sum()
    }

    /// Curve points in branch-major order.
    pub fn curve_points(&self) -> impl Iterator<Item = &CurvePoint> + '_ {
        self.branches.iter().flat_map(|b| b.curve.iter())
    }

    /// Mutable curve points in branch-major order.
    pub fn curve_points_mut(&mut self) -> impl Iterator<Item = &mut CurvePoint> + '_ {
        self.branches.iter_mut().flat_map(|b| b.curve.iter_mut())
    }

    /// Rebuild the sample -> (branch, point) lookup from the curve points'
    /// `corresponding_sample_index` fields. Unset indices are skipped.
    pub fn rebuild_sample_correspondence(&mut self) {
        self.sample_map.clear();
        for (bi, branch) in self.branches.iter().enumerate() {
            for (pi, cp) in branch.curve.iter().enumerate() {
                if let Some(sample) = cp.sample_index() {
                    self.sample_map
                        .entry(sample)
                        .or_default()
                        .push(BranchPos { branch: bi, point: pi });
                }
            }
        }
    }

    /// Curve points that reference `sample`, in branch-major order.
    pub fn branches_at_sample(&self, sample: usize) -> &[BranchPos] {
        self.sample_map.get(&sample).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
