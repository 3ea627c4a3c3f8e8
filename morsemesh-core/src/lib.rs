//! Core data structures for morsemesh
//!
//! This crate provides the fundamental types shared by the morsemesh crates:
//! partition grids (a scalar raster with a congruent label raster), the 2D
//! value-carrying triangle mesh built from them, value ranges, and the
//! interface to the external segmentation step.

pub mod point;
pub mod grid;
pub mod mesh;
pub mod range;
pub mod segmentation;
pub mod error;

pub use point::*;
pub use grid::*;
pub use mesh::*;
pub use range::*;
pub use segmentation::*;
pub use error::*;

/// Re-export commonly used types from nalgebra and ndarray
pub use nalgebra::{Point2, Vector2};
pub use ndarray::{Array2, ArrayView2};
