//! # pointskel
//!
//! Data management for point-based curve-skeleton extraction.
//!
//! A [`DataMgr`] owns two point collections, the dense *original* cloud and
//! the *sample* set the skeletonization runs on, plus the [`Skeleton`] graph
//! of polyline branches. The SKEL text format stores all three in one
//! document together with the per-sample and per-curve-point attributes.
//!
//! ## Modules
//!
//! - [`util`] - Errors, bounding boxes, parameters
//! - [`geom`] - Point collections, skeleton graph, geometry utilities
//! - [`skel`] - SKEL reader and writer
//! - [`io`] - PLY / PCD collaborator contracts and the XYZN reader
//!
//! ## Example
//!
//! ```ignore
//! use pointskel::prelude::*;
//!
//! let mut mgr = DataMgr::new(SkeletonParams::default());
//! mgr.load_xyzn("scan.xyzn")?;
//! mgr.normalize_all();
//! mgr.save_skeleton_as_skel("scan.skel")?;
//! ```

pub mod util;
pub mod geom;
pub mod skel;
pub mod io;
pub mod data_mgr;

// Re-export commonly used types
pub use util::{BBox3f, Error, Result, SkeletonParams};
pub use geom::{Branch, CurvePoint, PointCloud, Skeleton, Vertex};
pub use data_mgr::{DataMgr, Target};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{BBox3f, Error, Result, SkeletonParams, Vec3};
    pub use crate::geom::*;
    pub use crate::skel::{load_skel, save_skel, SkelDocument};
    pub use crate::data_mgr::{DataMgr, Target};
}
