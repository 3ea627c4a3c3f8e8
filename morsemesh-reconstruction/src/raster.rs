//! Gouraud rasterization of partition meshes and image error metrics
//!
//! Each pixel `(x, y)` is placed at the same rescaled position the mesh
//! vertices were given, and takes the barycentric interpolation of the
//! values of the triangle covering it. Pixels covered by no triangle are
//! `NaN`.

use morsemesh_core::{Error, PartitionMesh, Point2d, Result, ValueRange};
use ndarray::{Array2, ArrayView2};

/// Tolerance on barycentric weights so pixels on shared edges are covered
const EDGE_TOLERANCE: f64 = 1e-9;

fn cross(u: nalgebra::Vector2<f64>, v: nalgebra::Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Barycentric weights of `p` in triangle `(a, b, c)`, or `None` when the
/// triangle has no area
fn barycentric(p: Point2d, a: Point2d, b: Point2d, c: Point2d) -> Option<[f64; 3]> {
    let area = cross(b - a, c - a);
    if area.abs() <= f64::EPSILON {
        return None;
    }
    let wa = cross(b - p, c - p) / area;
    let wb = cross(c - p, a - p) / area;
    Some([wa, wb, 1.0 - wa - wb])
}

/// Inclusive pixel index span along one axis covered by `[lo, hi]` in
/// target coordinates
fn pixel_span(lo: f64, hi: f64, target: &ValueRange, extent: usize) -> Option<(usize, usize)> {
    let source = ValueRange::grid_axis(extent);
    let a = target.rescale_to(lo, &source);
    let b = target.rescale_to(hi, &source);
    let (min, max) = if a <= b { (a, b) } else { (b, a) };

    let last = extent.checked_sub(1)? as f64;
    if max < 0.0 || min > last {
        return None;
    }
    Some((min.floor().max(0.0) as usize, max.ceil().min(last) as usize))
}

/// Render `mesh` onto a `width` x `height` grid, indexed `[x, y]`.
///
/// `x_range` and `y_range` must be the ranges the mesh was built with.
pub fn rasterize(
    mesh: &PartitionMesh,
    width: usize,
    height: usize,
    x_range: &ValueRange,
    y_range: &ValueRange,
) -> Result<Array2<f64>> {
    x_range.validate()?;
    y_range.validate()?;
    if mesh.values.len() != mesh.vertices.len() {
        return Err(Error::InvalidData(format!(
            "Mesh has {} vertices but {} values",
            mesh.vertices.len(),
            mesh.values.len()
        )));
    }

    let source_x = ValueRange::grid_axis(width);
    let source_y = ValueRange::grid_axis(height);
    let mut image = Array2::from_elem((width, height), f64::NAN);

    for &[ia, ib, ic] in &mesh.triangles {
        let corners = (mesh.vertices.get(ia), mesh.vertices.get(ib), mesh.vertices.get(ic));
        let (a, b, c) = match corners {
            (Some(&a), Some(&b), Some(&c)) => (a, b, c),
            _ => {
                return Err(Error::InvalidData(format!(
                    "Triangle [{}, {}, {}] references a missing vertex",
                    ia, ib, ic
                )))
            }
        };
        let values = [mesh.values[ia], mesh.values[ib], mesh.values[ic]];

        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(min_x, max_x, x_range, width),
            pixel_span(min_y, max_y, y_range, height),
        ) else {
            continue;
        };

        for x in x0..=x1 {
            let px = source_x.rescale_to(x as f64, x_range);
            for y in y0..=y1 {
                let p = Point2d::new(px, source_y.rescale_to(y as f64, y_range));
                let Some(weights) = barycentric(p, a, b, c) else {
                    continue;
                };
                if weights.iter().all(|&w| w >= -EDGE_TOLERANCE) {
                    image[[x, y]] = weights
                        .iter()
                        .zip(values.iter())
                        .map(|(w, v)| w * v)
                        .sum::<f64>();
                }
            }
        }
    }

    Ok(image)
}

/// Pixel-wise error between a reference image and an approximation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageError {
    pub rmse: f64,
    pub max_abs_error: f64,
    /// Peak signal-to-noise ratio in dB; `None` for a perfect match
    pub psnr: Option<f64>,
    /// Fraction of pixels finite in both images
    pub coverage: f64,
}

impl ImageError {
    /// Compare over pixels finite in both images. `peak` is the largest
    /// representable sample value, e.g. 255 for 8-bit images.
    pub fn compare(
        reference: ArrayView2<'_, f64>,
        approximation: ArrayView2<'_, f64>,
        peak: f64,
    ) -> Result<Self> {
        if reference.dim() != approximation.dim() {
            return Err(Error::InvalidData(format!(
                "Cannot compare a {:?} image with a {:?} image",
                reference.dim(),
                approximation.dim()
            )));
        }

        let mut count = 0usize;
        let mut squared = 0.0;
        let mut max_abs_error: f64 = 0.0;
        for (r, a) in reference.iter().zip(approximation.iter()) {
            if !(r.is_finite() && a.is_finite()) {
                continue;
            }
            let diff = (r - a).abs();
            squared += diff * diff;
            max_abs_error = max_abs_error.max(diff);
            count += 1;
        }

        if count == 0 {
            return Err(Error::InvalidData("Images share no finite pixels".to_string()));
        }

        let rmse = (squared / count as f64).sqrt();
        let psnr = (rmse > 0.0).then(|| 20.0 * (peak / rmse).log10());
        Ok(Self {
            rmse,
            max_abs_error,
            psnr,
            coverage: count as f64 / reference.len() as f64,
        })
    }
}
