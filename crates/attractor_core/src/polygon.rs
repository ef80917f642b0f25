use crate::error::{AttractorError, Result};
use crate::traits::Point;
use rand::Rng;
use std::f64::consts::PI;

/// Vertices of a regular n-gon on the unit circle.
///
/// Vertex k sits at angle 2πk/n measured clockwise from the positive y axis,
/// i.e. `(sin θ, cos θ)`, so vertex 0 is always `(0, 1)`.
pub fn regular_polygon(n: usize) -> Result<Vec<Point>> {
    regular_polygon_with_radius(n, 1.0)
}

pub fn regular_polygon_with_radius(n: usize, radius: f64) -> Result<Vec<Point>> {
    if n < 3 {
        return Err(AttractorError::InvalidVertexCount(n as f64));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(AttractorError::InvalidRadius(radius));
    }

    let angle_scale = 2.0 * PI / n as f64;
    Ok((0..n)
        .map(|k| {
            let angle = angle_scale * k as f64;
            Point::new(radius * angle.sin(), radius * angle.cos())
        })
        .collect())
}

/// Validates a vertex count received as an untyped number.
pub fn vertex_count_from_f64(n: f64) -> Result<usize> {
    if !n.is_finite() || n.fract() != 0.0 || n < 3.0 || n > u32::MAX as f64 {
        return Err(AttractorError::InvalidVertexCount(n));
    }
    Ok(n as usize)
}

/// Completes an equilateral triangle from the base edge `v0`–`v1`.
///
/// The apex lies to the left of the edge direction, so a base along the
/// positive x axis puts it above.
pub fn equilateral_triangle(v0: Point, v1: Point) -> [Point; 3] {
    let edge = v1 - v0;
    let normal = Point::new(-edge.y, edge.x);
    let apex = (v0 + v1) / 2.0 + normal * (3.0_f64.sqrt() / 2.0);
    [v0, v1, apex]
}

/// Random point inside the convex hull of `vertices`.
///
/// Draws one uniform weight in [0, 1) per vertex, normalizes the weights to
/// sum to one and returns the resulting convex combination.
pub fn random_interior_point<R: Rng + ?Sized>(vertices: &[Point], rng: &mut R) -> Result<Point> {
    if vertices.is_empty() {
        return Err(AttractorError::EmptyMapSet);
    }

    let mut weights: Vec<f64> = (0..vertices.len()).map(|_| rng.gen::<f64>()).collect();
    let mut total: f64 = weights.iter().sum();
    if total <= f64::EPSILON {
        // Every draw came out as zero; fall back to the centroid.
        weights.iter_mut().for_each(|w| *w = 1.0);
        total = vertices.len() as f64;
    }

    let point = vertices
        .iter()
        .zip(&weights)
        .fold(Point::zeros(), |acc, (vertex, w)| acc + vertex * (w / total));
    Ok(point)
}
