//! Partition triangulation of a synthetic scalar field
//!
//! This demo:
//! - Samples a monkey saddle with ripples on a regular grid
//! - Segments it with a jittered-lattice nearest-seed segmenter
//! - Triangulates the partitions and the critical points
//! - Reports mesh sizes, compression ratios and rasterization error

use anyhow::Context;
use clap::Parser;
use morsemesh_core::{Extrema, Segmentation, Segmenter};
use morsemesh_reconstruction::{
    critical_point_delaunay, rasterize, CompressionReport, ImageError, PartitionTriangulator,
    TriangulationConfig,
};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Triangulate the partitions of a synthetic scalar field")]
struct Args {
    /// Grid width in samples
    #[arg(long, default_value_t = 256)]
    width: usize,

    /// Grid height in samples
    #[arg(long, default_value_t = 256)]
    height: usize,

    /// Approximate number of partitions
    #[arg(long, default_value_t = 64)]
    cells: usize,

    /// Seed for the segmenter's jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Neighbors considered per sample by the segmenter
    #[arg(long, default_value_t = 8)]
    k_neighbors: usize,

    /// Skip grids with more partitions than this fraction of samples
    #[arg(long, default_value_t = 0.25)]
    partition_limit: f64,

    /// Scan for corners in parallel
    #[arg(long)]
    parallel: bool,

    /// Write the partition mesh as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Stand-in segmenter: labels samples by their nearest seed on a jittered
/// lattice and reports each cell's highest and lowest sample as extrema
struct LatticeSegmenter {
    cells: usize,
    seed: u64,
}

impl Segmenter for LatticeSegmenter {
    fn segment(
        &self,
        values: ArrayView2<'_, f64>,
        _k_neighbors: usize,
    ) -> morsemesh_core::Result<Segmentation> {
        let (width, height) = values.dim();
        let side = (self.cells as f64).sqrt().ceil().max(1.0) as usize;
        let (step_x, step_y) = (width as f64 / side as f64, height as f64 / side as f64);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let seeds: Vec<(f64, f64)> = (0..side * side)
            .map(|i| {
                let (cx, cy) = ((i / side) as f64 + 0.5, (i % side) as f64 + 0.5);
                (
                    (cx + rng.gen_range(-0.35..0.35)) * step_x,
                    (cy + rng.gen_range(-0.35..0.35)) * step_y,
                )
            })
            .collect();

        let nearest = |x: usize, y: usize| -> usize {
            let distance =
                |&(sx, sy): &(f64, f64)| (x as f64 - sx).powi(2) + (y as f64 - sy).powi(2);
            (0..seeds.len())
                .min_by(|&a, &b| distance(&seeds[a]).total_cmp(&distance(&seeds[b])))
                .unwrap_or(0)
        };
        let partitions = Array2::from_shape_fn((width, height), |(x, y)| nearest(x, y) as u32);

        let mut maxima: Vec<Option<(usize, usize)>> = vec![None; seeds.len()];
        let mut minima: Vec<Option<(usize, usize)>> = vec![None; seeds.len()];
        for ((x, y), &label) in partitions.indexed_iter() {
            let label = label as usize;
            let value = values[[x, y]];
            if maxima[label].map_or(true, |p| value > values[[p.0, p.1]]) {
                maxima[label] = Some((x, y));
            }
            if minima[label].map_or(true, |p| value < values[[p.0, p.1]]) {
                minima[label] = Some((x, y));
            }
        }

        Ok(Segmentation {
            partitions,
            extrema: Extrema::new(
                maxima.into_iter().flatten().collect(),
                minima.into_iter().flatten().collect(),
            ),
        })
    }
}

/// Monkey saddle with a ripple, mapped into 8-bit range
fn sample_field(width: usize, height: usize) -> Array2<f64> {
    Array2::from_shape_fn((width, height), |(x, y)| {
        let u = (x as f64 / (width.max(2) - 1) as f64) * 2.0 - 1.0;
        let v = (y as f64 / (height.max(2) - 1) as f64) * 2.0 - 1.0;
        let (a, b) = (-1.5 * u, -1.5 * v);
        let saddle = a.powi(3) - 3.0 * a * b * b;
        let ripple = (6.0 * u).sin() * (4.0 * v).cos();
        (127.5 + 18.0 * saddle + 20.0 * ripple).clamp(0.0, 255.0)
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Partition Triangulation Demo");
    println!("============================");

    let values = sample_field(args.width, args.height);
    let segmenter = LatticeSegmenter {
        cells: args.cells,
        seed: args.seed,
    };
    let segmentation = segmenter.segment(values.view(), args.k_neighbors)?;
    let (grid, extrema) = segmentation.into_grid(values)?;
    println!(
        "Sampled {}x{} grid with {} partitions and {} extrema",
        grid.width(),
        grid.height(),
        grid.partition_count(),
        extrema.len()
    );

    let config = TriangulationConfig::pixel_ranges(grid.width(), grid.height())
        .with_parallel_detection(args.parallel)
        .with_partition_limit(args.partition_limit);
    let result = PartitionTriangulator::new(config.clone()).triangulate(&grid)?;
    let mesh = &result.mesh;

    println!("\nPartition mesh:");
    println!(
        "- {} corners in {} vertex groups",
        result.stats.corner_count, result.stats.group_count
    );
    println!("- {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    if result.degenerate_faces {
        println!(
            "- {} faces dropped with fewer than three vertices",
            result.stats.dropped_face_count
        );
    }

    let report = CompressionReport::for_mesh(mesh, grid.width(), grid.height(), 1);
    println!("- {} bytes against {} raw bytes", report.mesh_bytes, report.raw_bytes);
    if let Some(ratio) = report.ratio() {
        println!("- compression ratio {:.2}", ratio);
    }

    let image = rasterize(mesh, grid.width(), grid.height(), &config.x_range, &config.y_range)?;
    match ImageError::compare(grid.values(), image.view(), 255.0) {
        Ok(error) => println!(
            "- RMSE {:.3}, max error {:.3}, coverage {:.1}%",
            error.rmse,
            error.max_abs_error,
            error.coverage * 100.0
        ),
        Err(e) => println!("- could not compare rasterization: {}", e),
    }

    let baseline = critical_point_delaunay(&grid, &extrema, &config.x_range, &config.y_range)?;
    let baseline_report = CompressionReport::for_mesh(&baseline, grid.width(), grid.height(), 1);
    println!("\nCritical point Delaunay baseline:");
    println!("- {} vertices, {} triangles", baseline.vertex_count(), baseline.triangle_count());
    println!("- {} bytes", baseline_report.mesh_bytes);

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(mesh)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("\nWrote mesh to {}", path.display());
    }

    Ok(())
}
