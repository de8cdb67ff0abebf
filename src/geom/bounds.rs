//! Bounding boxes, radius estimation and normalization.

use crate::util::{BBox3f, SkeletonParams, Vec3};

use super::{PointCloud, Vertex};

/// Extent below which an axis counts as flat.
pub const DEGENERATE_EXTENT: f32 = 1e-5;

/// Box over vertex positions, skipping skel-ignored vertices when
/// `exclude_ignored` is set. Empty or fully excluded input gives
/// [`BBox3f::NULL`].
pub fn compute_bounding_box(vertices: &[Vertex], exclude_ignored: bool) -> BBox3f {
    let mut bbox = BBox3f::NULL;
    for v in vertices {
        if exclude_ignored && v.is_skel_ignore {
            continue;
        }
        bbox.expand_by_point(v.position);
    }
    bbox
}

/// Recompute both boxes: samples skip skel-ignored vertices, the original
/// cloud includes everything.
pub fn recompute_boxes(samples: &mut PointCloud, original: &mut PointCloud) {
    samples.recompute_bbox(true);
    original.recompute_bbox(false);
}

/// Estimate the initial neighbourhood radius from the original cloud's box
/// and publish it to `params`.
///
/// Near-planar input (any axis extent below [`DEGENERATE_EXTENT`]) scales
/// with the square root of the point count, volumetric input with the cube
/// root. An empty original cloud leaves the published radius unchanged.
pub fn estimate_init_radius(original: &PointCloud, params: &mut SkeletonParams) -> f64 {
    let mut radius = params.initial_radius;

    if !original.is_empty() {
        let bbox = original.bbox;
        let size = bbox.size().abs();
        let diagonal = bbox.diagonal();
        let count = original.len() as f64;

        radius = if size.min_element() < DEGENERATE_EXTENT {
            2.0 * params.init_radius_para * diagonal / count.sqrt()
        } else {
            params.init_radius_para * diagonal / count.cbrt()
        };
    }

    params.publish_radius(radius);
    radius
}

/// Fit `cloud` into the unit cube centered at the origin using its current
/// box, and unitize non-zero normals.
fn normalize_cloud(cloud: &mut PointCloud) {
    if cloud.is_empty() {
        return;
    }
    let bbox = cloud.bbox;
    let mut extent = bbox.max_extent();
    if extent <= 0.0 {
        extent = 1.0;
    }

    cloud.bbox.set_null();
    for v in &mut cloud.vertices {
        v.position = (v.position - bbox.min) / extent - Vec3::splat(0.5);
        v.normal = v.normal.normalize_or_zero();
        cloud.bbox.expand_by_point(v.position);
    }
}

/// Normalize both collections into `[-0.5, 0.5]^3` using one combined box,
/// so they stay registered to each other. Boxes and the initial radius are
/// recomputed afterwards; returns the new sample box.
pub fn normalize(
    samples: &mut PointCloud,
    original: &mut PointCloud,
    params: &mut SkeletonParams,
) -> BBox3f {
    let mut bbox = BBox3f::NULL;
    if !samples.is_empty() {
        bbox.expand_by_box(&compute_bounding_box(&samples.vertices, false));
    }
    if !original.is_empty() {
        bbox.expand_by_box(&compute_bounding_box(&original.vertices, false));
        original.bbox = bbox;
    }
    samples.bbox = bbox;

    normalize_cloud(samples);
    normalize_cloud(original);

    recompute_boxes(samples, original);
    estimate_init_radius(original, params);

    tracing::debug!(samples = samples.len(), original = original.len(), "normalized point sets");
    samples.bbox
}
