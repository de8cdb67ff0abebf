//! SKEL text format.
//!
//! Stores the original cloud, the sample set and the skeleton graph in
//! one document. See [`Section`] for the section layout.
//!
//! ```ignore
//! use pointskel::skel;
//!
//! let doc = skel::load_skel("model.skel")?;
//! skel::save_skel("copy.skel", &doc.original, &doc.samples, &doc.skeleton)?;
//! ```

mod format;
mod reader;
mod writer;

pub use format::{Owner, Section, BRANCH_TAG};
pub use reader::{load_skel, read_skel};
pub use writer::{save_skel, write_skel};

use crate::geom::{PointCloud, Skeleton};

/// Contents of one SKEL document.
#[derive(Clone, Debug, Default)]
pub struct SkelDocument {
    pub original: PointCloud,
    pub samples: PointCloud,
    pub skeleton: Skeleton,
}

impl SkelDocument {
    /// Serialize this document into a string.
    pub fn to_text(&self) -> crate::Result<String> {
        let mut buf = Vec::new();
        write_skel(&mut buf, &self.original, &self.samples, &self.skeleton)?;
        String::from_utf8(buf).map_err(|e| crate::Error::invalid(e.to_string()))
    }
}
