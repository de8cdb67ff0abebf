//! Utility types shared across the crate.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`BBox3f`] and math type re-exports from glam
//! - [`SkeletonParams`] - Explicit parameter object

mod error;
mod math;
mod params;

pub use error::*;
pub use math::*;
pub use params::*;
