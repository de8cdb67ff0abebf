//! SKEL writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::format::{Owner, Section, BRANCH_TAG};
use crate::geom::{PointCloud, Skeleton, Vertex};
use crate::util::Result;

/// Write the original cloud, the sample set and the skeleton as one SKEL
/// document.
pub fn write_skel<W: Write>(
    w: &mut W,
    original: &PointCloud,
    samples: &PointCloud,
    skeleton: &Skeleton,
) -> Result<()> {
    let skel_size = skeleton.size();
    let sv = &samples.vertices;

    for section in Section::ORDER {
        let count = match section.owner() {
            Owner::Original => original.len(),
            Owner::Samples => samples.len(),
            Owner::Branches => skeleton.num_branches(),
            Owner::CurvePoints => skel_size,
            Owner::Reserved => 0,
        };
        writeln!(w, "{}{}{}", section.tag(), section.header_separator(), count)?;

        match section {
            Section::Original => {
                write_vertices(w, original)?;
                writeln!(w)?;
            }
            Section::Samples => {
                write_vertices(w, samples)?;
                writeln!(w)?;
            }
            Section::Curves => {
                for branch in &skeleton.branches {
                    writeln!(w, "{} {}", BRANCH_TAG, branch.len())?;
                    for cp in &branch.curve {
                        let p = cp.position;
                        writeln!(w, "{}\t{}\t{}\t", p.x, p.y, p.z)?;
                    }
                }
                writeln!(w)?;
            }
            Section::Edges | Section::BranchSamples | Section::SkelRadius2 | Section::Alpha => {
                writeln!(w)?;
            }
            Section::FixedSample => write_row(w, sv.iter().map(|v| flag(v.is_fixed_sample)))?,
            Section::GroupId => write_row(w, sv.iter().map(|v| v.index))?,
            Section::SkelRadius => write_row(w, skeleton.curve_points().map(|cp| cp.skel_radius))?,
            Section::Confidence => write_row(w, sv.iter().map(|v| v.eigen_confidence))?,
            Section::SampleVirtual => write_row(w, sv.iter().map(|v| flag(v.is_skel_virtual)))?,
            Section::SampleBranch => write_row(w, sv.iter().map(|v| flag(v.is_skel_branch)))?,
            Section::SampleRadius => write_row(w, sv.iter().map(|_| 0))?,
            Section::SkelVirtual => {
                write_row(w, skeleton.curve_points().map(|cp| flag(cp.is_virtual)))?
            }
            Section::CorrespondingSample => {
                write_row(w, skeleton.curve_points().map(|cp| cp.corresponding_sample_index))?
            }
        }
    }

    w.flush()?;
    Ok(())
}

/// Save a SKEL document to `path`.
pub fn save_skel(
    path: impl AsRef<Path>,
    original: &PointCloud,
    samples: &PointCloud,
    skeleton: &Skeleton,
) -> Result<()> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write_skel(&mut w, original, samples, skeleton)?;
    tracing::info!(
        path = %path.display(),
        original = original.len(),
        samples = samples.len(),
        branches = skeleton.num_branches(),
        "saved skeleton"
    );
    Ok(())
}

#[inline]
fn flag(b: bool) -> u8 {
    u8::from(b)
}

/// One line per vertex: position then normal, tab separated.
fn write_vertices<W: Write>(w: &mut W, cloud: &PointCloud) -> Result<()> {
    for Vertex { position: p, normal: n, .. } in &cloud.vertices {
        writeln!(w, "{}\t{}\t{}\t{}\t{}\t{}\t", p.x, p.y, p.z, n.x, n.y, n.z)?;
    }
    Ok(())
}

/// All values on one tab-separated line.
fn write_row<W: Write, T: std::fmt::Display>(
    w: &mut W,
    values: impl Iterator<Item = T>,
) -> Result<()> {
    for v in values {
        write!(w, "{}\t", v)?;
    }
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Branch, CurvePoint};
    use crate::util::Vec3;

    #[test]
    fn test_empty_document_layout() {
        let mut buf = Vec::new();
        write_skel(&mut buf, &PointCloud::new(), &PointCloud::new(), &Skeleton::new()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let headers: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(headers.len(), 16);
        assert_eq!(headers[0], "ON 0");
        assert_eq!(headers[8], "Confidence_Sigma\t0");
        assert_eq!(headers[15], "Corresponding_sample_index 0");
    }

    #[test]
    fn test_sections_and_values() {
        let mut samples = PointCloud::new();
        let mut v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
        v.is_fixed_sample = true;
        v.eigen_confidence = 0.5;
        samples.push(v);

        let skeleton = Skeleton::from_branches(vec![Branch::new(vec![
            CurvePoint {
                skel_radius: 0.25,
                corresponding_sample_index: 0,
                ..CurvePoint::new(Vec3::X)
            },
            CurvePoint { is_virtual: true, ..CurvePoint::new(Vec3::Y) },
        ])]);

        let mut buf = Vec::new();
        write_skel(&mut buf, &PointCloud::new(), &samples, &skeleton).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("SN 1\n1\t2\t3\t0\t0\t1\t\n"));
        assert!(text.contains("CN 1\nCNN 2\n1\t0\t0\t\n0\t1\t0\t\n"));
        assert!(text.contains("S_onedge 1\n1\t\n"));
        assert!(text.contains("SkelRadius 2\n0.25\t0\t\n"));
        assert!(text.contains("Confidence_Sigma\t1\n0.5\t\n"));
        assert!(text.contains("Sample_radius 1\n0\t\n"));
        assert!(text.contains("Skel_isVirtual 2\n0\t1\t\n"));
        assert!(text.contains("Corresponding_sample_index 2\n0\t-1\t\n"));
    }
}
