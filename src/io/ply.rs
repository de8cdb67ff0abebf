//! PLY collaborator contract.

use std::path::Path;

use super::{IoMask, PointRecord};
use crate::geom::PointCloud;
use crate::util::{Error, Result};

/// External mesh codec.
///
/// Failures are reported as a nonzero codec status, mirroring what the
/// codec itself returns.
pub trait MeshIo {
    /// Read point records from `path`, limited to the attributes in `mask`.
    fn read(&self, path: &Path, mask: IoMask) -> std::result::Result<Vec<PointRecord>, i32>;

    /// Write point records to `path` with the attributes in `mask`.
    fn write(
        &self,
        path: &Path,
        records: &[PointRecord],
        mask: IoMask,
    ) -> std::result::Result<(), i32>;
}

/// Read a point collection through `io`.
///
/// Vertices are tagged `is_original` as requested and indexed by offset.
/// A codec failure returns [`Error::ImportFailure`] without producing a
/// collection, so callers can keep their previous one.
pub fn import_mesh(
    io: &dyn MeshIo,
    path: &Path,
    mask: IoMask,
    is_original: bool,
) -> Result<PointCloud> {
    let records = io.read(path, mask).map_err(|status| Error::ImportFailure {
        path: path.to_path_buf(),
        status,
    })?;
    let vertices = records.iter().map(PointRecord::to_vertex).collect();
    Ok(PointCloud::from_vertices(vertices, is_original))
}

/// Write a point collection through `io` with the full mask.
pub fn export_mesh(io: &dyn MeshIo, path: &Path, cloud: &PointCloud) -> Result<()> {
    let mask = IoMask::FULL;
    let records: Vec<PointRecord> = cloud
        .vertices
        .iter()
        .map(|v| PointRecord::from_vertex(v, mask))
        .collect();
    io.write(path, &records, mask).map_err(|status| Error::ExportFailure {
        path: path.to_path_buf(),
        status,
    })
}
