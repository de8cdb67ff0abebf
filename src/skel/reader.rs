//! SKEL reader.
//!
//! The reader is strict: every section must open with the tag that
//! [`Section::ORDER`] expects next, otherwise the whole read fails with
//! [`Error::FormatMismatch`] and nothing is returned.

use std::path::Path;
use std::str::{FromStr, SplitAsciiWhitespace};

use super::format::{Section, BRANCH_TAG};
use super::SkelDocument;
use crate::geom::{Branch, CurvePoint, PointCloud, Vertex};
use crate::util::{Error, Result, Vec3};

/// Whitespace token stream over a whole document.
struct Tokens<'a> {
    iter: std::iter::Peekable<SplitAsciiWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { iter: text.split_ascii_whitespace().peekable() }
    }

    fn is_exhausted(&mut self) -> bool {
        self.iter.peek().is_none()
    }

    fn next(&mut self, section: Section) -> Result<&'a str> {
        self.iter.next().ok_or(Error::UnexpectedEof { section: section.tag() })
    }

    fn parse<T: FromStr>(&mut self, section: Section) -> Result<T> {
        let token = self.next(section)?;
        token.parse().map_err(|_| Error::InvalidToken {
            section: section.tag(),
            token: token.to_string(),
        })
    }

    fn parse_bool(&mut self, section: Section) -> Result<bool> {
        match self.next(section)? {
            "0" => Ok(false),
            "1" => Ok(true),
            token => Err(Error::InvalidToken {
                section: section.tag(),
                token: token.to_string(),
            }),
        }
    }

    fn parse_vec3(&mut self, section: Section) -> Result<Vec3> {
        Ok(Vec3::new(self.parse(section)?, self.parse(section)?, self.parse(section)?))
    }

    fn expect(&mut self, expected: &'static str, section: Section) -> Result<()> {
        let token = self.next(section)?;
        if token == expected {
            Ok(())
        } else {
            Err(Error::FormatMismatch { expected, found: token.to_string() })
        }
    }

    /// Consume and discard `n` numeric tokens.
    fn skip_numbers(&mut self, n: usize, section: Section) -> Result<()> {
        for _ in 0..n {
            self.parse::<f64>(section)?;
        }
        Ok(())
    }
}

fn check_count(section: Section, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::CountMismatch { section: section.tag(), expected, found })
    }
}

// Counts come from the file and are untrusted: vectors grow by push only.
fn read_vertices(
    tokens: &mut Tokens<'_>,
    section: Section,
    count: usize,
    is_original: bool,
) -> Result<PointCloud> {
    let mut cloud = PointCloud::new();
    for _ in 0..count {
        let position = tokens.parse_vec3(section)?;
        let normal = tokens.parse_vec3(section)?;
        let mut v = Vertex::new(position, normal);
        v.is_original = is_original;
        cloud.push(v);
    }
    Ok(cloud)
}

fn read_section(
    tokens: &mut Tokens<'_>,
    section: Section,
    count: usize,
    doc: &mut SkelDocument,
) -> Result<()> {
    let skel_size = doc.skeleton.size();

    match section {
        Section::Original => {
            // Matching the current (freshly cleared) size means "same cloud": skip it.
            if count == doc.original.len() {
                tokens.skip_numbers(count * 6, section)?;
            } else {
                doc.original = read_vertices(tokens, section, count, true)?;
            }
        }
        Section::Samples => {
            doc.samples = read_vertices(tokens, section, count, false)?;
        }
        Section::Curves => {
            for _ in 0..count {
                tokens.expect(BRANCH_TAG, section)?;
                let n: usize = tokens.parse(section)?;
                let mut curve = Vec::new();
                for _ in 0..n {
                    curve.push(CurvePoint::new(tokens.parse_vec3(section)?));
                }
                doc.skeleton.branches.push(Branch::new(curve));
            }
        }
        Section::Edges => {
            for _ in 0..count {
                tokens.parse::<i64>(section)?;
                tokens.parse::<i64>(section)?;
            }
        }
        Section::BranchSamples => {
            if count != 0 {
                return Err(Error::ReservedSection { section: section.tag(), count });
            }
        }
        Section::FixedSample => {
            check_count(section, doc.samples.len(), count)?;
            for v in &mut doc.samples.vertices {
                v.is_fixed_sample = tokens.parse_bool(section)?;
            }
        }
        Section::GroupId => {
            for _ in 0..count {
                tokens.parse::<i64>(section)?;
            }
        }
        Section::SkelRadius => {
            if count > 1 {
                check_count(section, skel_size, count)?;
                for cp in doc.skeleton.curve_points_mut() {
                    cp.skel_radius = tokens.parse(section)?;
                }
            } else {
                tokens.skip_numbers(count, section)?;
            }
        }
        Section::Confidence => {
            check_count(section, doc.samples.len(), count)?;
            for v in &mut doc.samples.vertices {
                v.eigen_confidence = tokens.parse(section)?;
            }
        }
        Section::SkelRadius2 | Section::Alpha | Section::SampleRadius => {
            tokens.skip_numbers(count, section)?;
        }
        Section::SampleVirtual => {
            check_count(section, doc.samples.len(), count)?;
            for v in &mut doc.samples.vertices {
                v.is_skel_virtual = tokens.parse_bool(section)?;
            }
        }
        Section::SampleBranch => {
            check_count(section, doc.samples.len(), count)?;
            for v in &mut doc.samples.vertices {
                v.is_skel_branch = tokens.parse_bool(section)?;
            }
        }
        Section::SkelVirtual => {
            check_count(section, skel_size, count)?;
            for cp in doc.skeleton.curve_points_mut() {
                cp.is_virtual = tokens.parse_bool(section)?;
            }
        }
        Section::CorrespondingSample => {
            check_count(section, skel_size, count)?;
            for cp in doc.skeleton.curve_points_mut() {
                cp.corresponding_sample_index = tokens.parse(section)?;
            }
        }
    }
    Ok(())
}

/// Parse a SKEL document from text.
///
/// `ON`, `SN` and `CN` are required. Input that ends cleanly before a later
/// section leaves that section and all following ones at their defaults.
/// The skeleton's sample correspondence is rebuilt before returning.
pub fn read_skel(text: &str) -> Result<SkelDocument> {
    let mut tokens = Tokens::new(text);
    let mut doc = SkelDocument::default();

    for section in Section::ORDER {
        if !section.is_mandatory() && tokens.is_exhausted() {
            tracing::debug!(section = section.tag(), "document ends before section");
            break;
        }
        tokens.expect(section.tag(), section)?;
        let count: usize = tokens.parse(section)?;
        read_section(&mut tokens, section, count, &mut doc)?;
    }

    doc.skeleton.rebuild_sample_correspondence();
    Ok(doc)
}

/// Load a SKEL document from `path`.
pub fn load_skel(path: impl AsRef<Path>) -> Result<SkelDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::from_open(path, e))?;
    let doc = read_skel(&text)?;
    tracing::info!(
        path = %path.display(),
        original = doc.original.len(),
        samples = doc.samples.len(),
        branches = doc.skeleton.num_branches(),
        "loaded skeleton"
    );
    Ok(doc)
}
