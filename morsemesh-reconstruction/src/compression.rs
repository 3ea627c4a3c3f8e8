//! Compression estimates against raw raster storage

use morsemesh_core::PartitionMesh;

/// Bytes needed to store a raster uncompressed
pub fn raw_raster_bytes(width: usize, height: usize, bytes_per_sample: usize) -> usize {
    width * height * bytes_per_sample
}

/// Raw raster size versus compact mesh size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub raw_bytes: usize,
    pub mesh_bytes: usize,
}

impl CompressionReport {
    pub fn new(raw_bytes: usize, mesh_bytes: usize) -> Self {
        Self {
            raw_bytes,
            mesh_bytes,
        }
    }

    /// Compare `mesh` against a `width` x `height` raster of
    /// `bytes_per_sample`-byte samples
    pub fn for_mesh(
        mesh: &PartitionMesh,
        width: usize,
        height: usize,
        bytes_per_sample: usize,
    ) -> Self {
        Self::new(raw_raster_bytes(width, height, bytes_per_sample), mesh.byte_size())
    }

    /// `raw / mesh`; `None` when the mesh encodes to zero bytes
    pub fn ratio(&self) -> Option<f64> {
        (self.mesh_bytes > 0).then(|| self.raw_bytes as f64 / self.mesh_bytes as f64)
    }

    /// Fraction of the raw size saved, negative when the mesh is larger
    pub fn space_saving(&self) -> Option<f64> {
        (self.raw_bytes > 0).then(|| 1.0 - self.mesh_bytes as f64 / self.raw_bytes as f64)
    }
}
