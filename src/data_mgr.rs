//! Data manager: owns both point collections and the skeleton.
//!
//! Every load builds its result completely before replacing the current
//! contents, so a failed load leaves the manager as it was.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use crate::geom::{self, PointCloud, Skeleton};
use crate::io::{self, IoMask, MeshIo, PcdIo};
use crate::skel;
use crate::util::{BBox3f, Result, SkeletonParams};

/// Which point collection an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Original,
    Samples,
}

/// Owner of the original cloud, the sample set and the skeleton graph.
#[derive(Debug, Default)]
pub struct DataMgr {
    original: PointCloud,
    samples: PointCloud,
    skeleton: Skeleton,
    params: SkeletonParams,
    current_file: Option<PathBuf>,
}

impl DataMgr {
    pub fn new(params: SkeletonParams) -> Self {
        Self { params, ..Default::default() }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_samples_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_original_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn is_skeleton_empty(&self) -> bool {
        self.skeleton.is_empty()
    }

    pub fn samples(&self) -> &PointCloud {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut PointCloud {
        &mut self.samples
    }

    pub fn original(&self) -> &PointCloud {
        &self.original
    }

    pub fn original_mut(&mut self) -> &mut PointCloud {
        &mut self.original
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.skeleton
    }

    pub fn params(&self) -> &SkeletonParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SkeletonParams {
        &mut self.params
    }

    /// Path of the last successfully loaded point file.
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    fn cloud_mut(&mut self, target: Target) -> &mut PointCloud {
        match target {
            Target::Original => &mut self.original,
            Target::Samples => &mut self.samples,
        }
    }

    fn cloud(&self, target: Target) -> &PointCloud {
        match target {
            Target::Original => &self.original,
            Target::Samples => &self.samples,
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load a PLY file as the original cloud (coordinates and normals).
    pub fn load_ply_to_original(&mut self, path: impl AsRef<Path>, io: &dyn MeshIo) -> Result<()> {
        let path = path.as_ref();
        self.original = io::import_mesh(io, path, IoMask::ORIGINAL_READ, true)?;
        self.current_file = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), count = self.original.len(), "points loaded");
        Ok(())
    }

    /// Load a PLY file as the sample set (coordinates, normals, colors).
    pub fn load_ply_to_samples(&mut self, path: impl AsRef<Path>, io: &dyn MeshIo) -> Result<()> {
        let path = path.as_ref();
        self.samples = io::import_mesh(io, path, IoMask::FULL, false)?;
        self.current_file = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), count = self.samples.len(), "samples loaded");
        Ok(())
    }

    /// Load a PCD file into the sample set or the original cloud.
    pub fn load_pcd(
        &mut self,
        path: impl AsRef<Path>,
        target: Target,
        io: &dyn PcdIo,
    ) -> Result<()> {
        let path = path.as_ref();
        let cloud = io.read(path)?;
        let records = io::extract_points(&cloud)?;
        let vertices = records.iter().map(io::PointRecord::to_vertex).collect();
        *self.cloud_mut(target) = PointCloud::from_vertices(vertices, target == Target::Original);
        self.current_file = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), count = records.len(), ?target, "pcd loaded");
        Ok(())
    }

    /// Load an XYZN file into the sample set.
    pub fn load_xyzn(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.samples = io::load_xyzn(path)?;
        self.current_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace both collections and the skeleton with a SKEL document.
    pub fn load_skeleton_from_skel(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let doc = skel::load_skel(path)?;
        self.original = doc.original;
        self.samples = doc.samples;
        self.skeleton = doc.skeleton;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Save one collection as PLY. Paths not ending in `ply` are skipped.
    pub fn save_ply(&self, path: impl AsRef<Path>, target: Target, io: &dyn MeshIo) -> Result<()> {
        let path = path.as_ref();
        if !path.to_string_lossy().ends_with("ply") {
            tracing::warn!(path = %path.display(), "not a .ply path, nothing written");
            return Ok(());
        }
        io::export_mesh(io, path, self.cloud(target))
    }

    /// Save both collections and the skeleton as a SKEL document.
    pub fn save_skeleton_as_skel(&self, path: impl AsRef<Path>) -> Result<()> {
        skel::save_skel(path, &self.original, &self.samples, &self.skeleton)
    }

    // ------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------

    /// Resample `params.down_sample_num` vertices from the original cloud.
    pub fn downsample(&mut self, use_random: bool) {
        match self.params.random_seed {
            Some(seed) => self.downsample_with(use_random, &mut StdRng::seed_from_u64(seed)),
            None => self.downsample_with(use_random, &mut rand::rng()),
        }
    }

    fn downsample_with<R: Rng + ?Sized>(&mut self, use_random: bool, rng: &mut R) {
        let target = self.params.down_sample_num;
        geom::downsample_by_count(
            &mut self.original,
            &mut self.samples,
            target,
            use_random,
            rng,
            &mut self.params,
        );
    }

    /// Promote the sample set to the original cloud and resample from it.
    pub fn sub_samples(&mut self) {
        geom::promote_samples(&mut self.original, &self.samples);
        self.downsample(true);
    }

    /// Normalize both collections into the centered unit cube.
    pub fn normalize_all(&mut self) -> BBox3f {
        geom::normalize(&mut self.samples, &mut self.original, &mut self.params)
    }

    /// Recompute both bounding boxes.
    pub fn recompute_box(&mut self) {
        geom::recompute_boxes(&mut self.samples, &mut self.original);
    }

    /// Estimate and publish the initial radius.
    pub fn init_radius(&mut self) -> f64 {
        geom::estimate_init_radius(&self.original, &mut self.params)
    }

    /// Remove skel-ignored samples.
    pub fn erase_removed_samples(&mut self) {
        geom::compact_ignored(&mut self.samples);
    }

    /// Empty both collections and the skeleton.
    pub fn clear_data(&mut self) {
        self.original.clear();
        self.samples.clear();
        self.skeleton.clear();
    }
}
