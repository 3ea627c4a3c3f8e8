//! Point types and related functionality

use nalgebra::{Point2, Vector2};

/// A 2D point with double precision coordinates
pub type Point2d = Point2<f64>;

/// A 2D vector with double precision components
pub type Vector2d = Vector2<f64>;

/// Arithmetic mean of a non-empty set of points
pub fn centroid<'a, I>(points: I) -> Option<Point2d>
where
    I: IntoIterator<Item = &'a Point2d>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vector2d::zeros(), 0usize), |(sum, count), p| (sum + p.coords, count + 1));
    (count > 0).then(|| Point2d::from(sum / count as f64))
}
