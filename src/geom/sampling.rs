//! Downsampling and compaction of the sample collection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::util::SkeletonParams;

use super::{estimate_init_radius, PointCloud};

/// Refill `samples` with `target` vertices taken from `original`.
///
/// With an empty original cloud and a non-empty sample set, the samples
/// are first promoted into the original cloud and then resampled from it.
/// `target` is clamped to the original size. `use_random` picks the first
/// `target` entries of a random permutation, otherwise the first `target`
/// originals in order. Finishes with [`estimate_init_radius`].
pub fn downsample_by_count<R: Rng + ?Sized>(
    original: &mut PointCloud,
    samples: &mut PointCloud,
    target: usize,
    use_random: bool,
    rng: &mut R,
    params: &mut SkeletonParams,
) {
    if original.is_empty() {
        if samples.is_empty() {
            return;
        }
        promote_samples(original, samples);
    }

    let target = target.min(original.len());

    let mut cards: Vec<usize> = (0..original.len()).collect();
    if use_random {
        cards.shuffle(rng);
    }

    samples.clear();
    samples.vertices.reserve(target);
    for &i in &cards[..target] {
        let mut v = original.vertices[i].clone();
        v.is_original = false;
        samples.push(v);
    }

    tracing::debug!(target, original = original.len(), use_random, "downsampled");
    estimate_init_radius(original, params);
}

/// Replace the original cloud with a copy of the sample set.
pub fn promote_samples(original: &mut PointCloud, samples: &PointCloud) {
    original.clear();
    original.vertices.reserve(samples.len());
    for v in &samples.vertices {
        let mut v = v.clone();
        v.is_original = true;
        original.push(v);
    }
}

/// Drop every skel-ignored sample, keeping survivor order, and reindex.
///
/// Curve points referring to samples by offset are stale afterwards.
pub fn compact_ignored(samples: &mut PointCloud) {
    let before = samples.len();
    samples.vertices.retain(|v| !v.is_skel_ignore);
    samples.reindex();
    samples.recompute_bbox(true);
    tracing::debug!(removed = before - samples.len(), kept = samples.len(), "compacted samples");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vertex;
    use crate::util::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_cloud(n: usize) -> PointCloud {
        let vertices = (0..n)
            .map(|i| Vertex::new(Vec3::new(i as f32, (i * i) as f32, 1.0 - i as f32), Vec3::X))
            .collect();
        PointCloud::from_vertices(vertices, true)
    }

    #[test]
    fn test_downsample_first_n() {
        let mut original = line_cloud(10);
        let mut samples = PointCloud::new();
        let mut params = SkeletonParams::default();
        let mut rng = StdRng::seed_from_u64(1);

        downsample_by_count(&mut original, &mut samples, 3, false, &mut rng, &mut params);

        assert_eq!(samples.len(), 3);
        for i in 0..3 {
            let s = &samples.vertices[i];
            let o = &original.vertices[i];
            assert_eq!(s.position, o.position);
            assert_eq!(s.normal, o.normal);
            assert_eq!(s.index, o.index);
            assert!(!s.is_original);
            assert!(o.is_original);
        }
        assert_eq!(samples.bbox.max, Vec3::new(2.0, 4.0, 1.0));
        assert!(params.initial_radius > 0.0);
    }

    #[test]
    fn test_downsample_clamps_target() {
        let mut original = line_cloud(4);
        let mut samples = PointCloud::new();
        let mut params = SkeletonParams::default();
        let mut rng = StdRng::seed_from_u64(1);

        downsample_by_count(&mut original, &mut samples, 100, true, &mut rng, &mut params);
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn test_downsample_random_is_subset_and_seeded() {
        let mut original = line_cloud(50);
        let mut params = SkeletonParams::default();

        let mut a = PointCloud::new();
        let mut rng = StdRng::seed_from_u64(9);
        downsample_by_count(&mut original, &mut a, 10, true, &mut rng, &mut params);
        let mut b = PointCloud::new();
        let mut rng = StdRng::seed_from_u64(9);
        downsample_by_count(&mut original, &mut b, 10, true, &mut rng, &mut params);

        assert_eq!(a.len(), 10);
        let pa: Vec<Vec3> = a.positions().collect();
        let pb: Vec<Vec3> = b.positions().collect();
        assert_eq!(pa, pb);

        let mut xs: Vec<i64> = pa.iter().map(|p| p.x as i64).collect();
        xs.sort_unstable();
        xs.dedup();
        assert_eq!(xs.len(), 10);
        assert!(xs.iter().all(|&x| (0..50).contains(&x)));
        for (i, v) in a.vertices.iter().enumerate() {
            assert_eq!(v.index, i);
        }
    }

    #[test]
    fn test_promote_then_resample() {
        let mut original = PointCloud::new();
        let mut samples = line_cloud(6);
        for v in &mut samples.vertices {
            v.is_original = false;
        }
        let mut params = SkeletonParams::default();
        let mut rng = StdRng::seed_from_u64(3);

        downsample_by_count(&mut original, &mut samples, 2, false, &mut rng, &mut params);

        assert_eq!(original.len(), 6);
        assert!(original.vertices.iter().all(|v| v.is_original));
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.vertices[1].position, original.vertices[1].position);
    }

    #[test]
    fn test_downsample_both_empty_is_noop() {
        let mut original = PointCloud::new();
        let mut samples = PointCloud::new();
        let mut params = SkeletonParams { initial_radius: 0.5, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(0);

        downsample_by_count(&mut original, &mut samples, 5, true, &mut rng, &mut params);
        assert!(original.is_empty() && samples.is_empty());
        assert_eq!(params.initial_radius, 0.5);
    }

    #[test]
    fn test_compact_ignored() {
        let mut samples = line_cloud(5);
        samples.vertices[1].is_skel_ignore = true;
        samples.vertices[3].is_skel_ignore = true;

        compact_ignored(&mut samples);

        assert_eq!(samples.len(), 3);
        let idx: Vec<usize> = samples.vertices.iter().map(|v| v.index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        let xs: Vec<f32> = samples.positions().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    }
}
