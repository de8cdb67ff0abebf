//! Point collections, the skeleton graph and the geometry utilities that
//! operate on them.
//!
//! - [`PointCloud`] / [`Vertex`] - Original cloud and sample set
//! - [`Skeleton`] / [`Branch`] / [`CurvePoint`] - Skeleton graph
//! - [`compute_bounding_box`], [`estimate_init_radius`], [`normalize`]
//! - [`downsample_by_count`], [`compact_ignored`]

pub mod bounds;
pub mod sampling;
pub mod skeleton;
pub mod vertex;

pub use bounds::{
    compute_bounding_box, estimate_init_radius, normalize, recompute_boxes, DEGENERATE_EXTENT,
};
pub use sampling::{compact_ignored, downsample_by_count, promote_samples};
pub use skeleton::{Branch, BranchPos, CurvePoint, Skeleton, NO_SAMPLE};
pub use vertex::{PointCloud, Vertex, DEFAULT_COLOR};
