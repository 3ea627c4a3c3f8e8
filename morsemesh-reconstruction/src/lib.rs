//! # Morsemesh Reconstruction
//!
//! Compact triangle meshes from Morse-Smale partition grids.
//!
//! A partition grid pairs a scalar raster with a label raster produced by an
//! external segmentation. The pipeline finds the junction pixels where more
//! than two partitions (or grid boundaries) meet, merges adjacent junctions
//! into vertices, and fan-triangulates each partition's polygon from its
//! highest vertex. The crate also provides a Delaunay baseline over the
//! segmentation's extrema, size and compression estimates, and a Gouraud
//! rasterizer for image error comparison.

pub mod corners;
pub mod grouping;
pub mod compactor;
pub mod faces;
pub mod pipeline;
pub mod delaunay;
pub mod compression;
pub mod raster;

// Re-export commonly used items
pub use corners::*;
pub use grouping::*;
pub use compactor::*;
pub use faces::*;
pub use pipeline::*;
pub use delaunay::*;
pub use compression::*;
pub use raster::*;
