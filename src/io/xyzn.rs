//! XYZN text point format: `x y z nx ny nz` per record.
//!
//! Records are read until the input runs out, then the last record read is
//! dropped. Files written by the legacy tools rely on that trailing drop,
//! so a file with three complete records yields two vertices. A trailing
//! partial record counts as the last record read.

use std::path::Path;

use crate::geom::{PointCloud, Vertex};
use crate::util::{Error, Result, Vec3};

const FIELDS_PER_RECORD: usize = 6;

/// Parse XYZN text into a sample collection.
pub fn read_xyzn(text: &str) -> Result<PointCloud> {
    let mut values = Vec::new();
    for token in text.split_ascii_whitespace() {
        let v: f32 = token
            .parse()
            .map_err(|_| Error::invalid(format!("XYZN: bad number `{token}`")))?;
        values.push(v);
    }

    let mut vertices: Vec<Vertex> = values
        .chunks(FIELDS_PER_RECORD)
        .map(|c| {
            let mut r = [0.0f32; FIELDS_PER_RECORD];
            r[..c.len()].copy_from_slice(c);
            Vertex::new(Vec3::new(r[0], r[1], r[2]), Vec3::new(r[3], r[4], r[5]))
        })
        .collect();
    vertices.pop();

    Ok(PointCloud::from_vertices(vertices, false))
}

/// Load an XYZN file.
pub fn load_xyzn(path: impl AsRef<Path>) -> Result<PointCloud> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::from_open(path, e))?;
    let cloud = read_xyzn(&text)?;
    tracing::info!(path = %path.display(), samples = cloud.len(), "loaded xyzn");
    Ok(cloud)
}
