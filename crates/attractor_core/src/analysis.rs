use crate::traits::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Smallest axis-aligned box containing every point, `None` when empty.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox {
            min: *first,
            max: *first,
        };
        for point in &points[1..] {
            bbox.min = bbox.min.inf(point);
            bbox.max = bbox.max.sup(point);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: &Point, tol: f64) -> bool {
        point.x >= self.min.x - tol
            && point.x <= self.max.x + tol
            && point.y >= self.min.y - tol
            && point.y <= self.max.y + tol
    }
}

/// Tests whether `point` lies inside the convex polygon with the given
/// vertices, in either winding order.
pub fn convex_hull_contains(vertices: &[Point], point: &Point, tol: f64) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let edge = b - a;
        let rel = point - a;
        // Signed distance to the edge line.
        let cross = (edge.x * rel.y - edge.y * rel.x) / edge.norm();
        if cross.abs() <= tol {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Fraction of `indices` equal to each of `0..count`.
pub fn selection_frequencies(indices: &[usize], count: usize) -> Vec<f64> {
    let mut counts = vec![0usize; count];
    for &index in indices {
        if index < count {
            counts[index] += 1;
        }
    }
    if indices.is_empty() {
        return vec![0.0; count];
    }
    let total = indices.len() as f64;
    counts.into_iter().map(|c| c as f64 / total).collect()
}

/// Point counts on a regular grid over a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    pub bounds: BoundingBox,
    pub resolution: usize,
    /// Row-major counts, row 0 at `bounds.min.y`.
    pub counts: Vec<usize>,
}

impl DensityGrid {
    pub fn bin(points: &[Point], bounds: BoundingBox, resolution: usize) -> Self {
        let resolution = resolution.max(1);
        let mut counts = vec![0usize; resolution * resolution];
        for point in points {
            if let Some((row, col)) = cell_of(&bounds, resolution, point) {
                counts[row * resolution + col] += 1;
            }
        }
        Self {
            bounds,
            resolution,
            counts,
        }
    }

    pub fn count_at(&self, point: &Point) -> Option<usize> {
        cell_of(&self.bounds, self.resolution, point)
            .map(|(row, col)| self.counts[row * self.resolution + col])
    }

    /// Fraction of cells holding at least one point.
    pub fn occupancy(&self) -> f64 {
        let occupied = self.counts.iter().filter(|&&c| c > 0).count();
        occupied as f64 / self.counts.len() as f64
    }
}

fn cell_of(bounds: &BoundingBox, resolution: usize, point: &Point) -> Option<(usize, usize)> {
    if !bounds.contains(point, 0.0) {
        return None;
    }
    let scale = |value: f64, lo: f64, span: f64| -> usize {
        if span <= 0.0 {
            return 0;
        }
        (((value - lo) / span * resolution as f64) as usize).min(resolution - 1)
    };
    let col = scale(point.x, bounds.min.x, bounds.width());
    let row = scale(point.y, bounds.min.y, bounds.height());
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn bounding_box_handles_empty_and_points() {
        assert!(BoundingBox::of(&[]).is_none());
        let bbox = BoundingBox::of(&[Point::new(1.0, -2.0), Point::new(-3.0, 4.0)]).expect("bbox");
        assert_eq!(bbox.min, Point::new(-3.0, -2.0));
        assert_eq!(bbox.max, Point::new(1.0, 4.0));
        assert_eq!(bbox.width(), 4.0);
        assert_eq!(bbox.height(), 6.0);
    }

    #[test]
    fn convex_hull_contains_in_both_windings() {
        let square = unit_square();
        let mut reversed = square.clone();
        reversed.reverse();
        for vertices in [&square, &reversed] {
            assert!(convex_hull_contains(vertices, &Point::new(0.5, 0.5), 1e-12));
            assert!(convex_hull_contains(vertices, &Point::new(1.0, 0.5), 1e-12));
            assert!(!convex_hull_contains(vertices, &Point::new(1.5, 0.5), 1e-12));
            assert!(!convex_hull_contains(vertices, &Point::new(-0.1, -0.1), 1e-12));
        }
        assert!(!convex_hull_contains(&square[..2], &Point::new(0.5, 0.0), 1e-12));
    }

    #[test]
    fn selection_frequencies_counts_indices() {
        let frequencies = selection_frequencies(&[0, 1, 1, 2], 3);
        assert_eq!(frequencies, vec![0.25, 0.5, 0.25]);
        assert_eq!(selection_frequencies(&[], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn density_grid_bins_points_into_cells() {
        let bounds = BoundingBox {
            min: Point::new(0.0, 0.0),
            max: Point::new(1.0, 1.0),
        };
        let points = vec![
            Point::new(0.1, 0.1),
            Point::new(0.2, 0.2),
            Point::new(0.9, 0.9),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        let grid = DensityGrid::bin(&points, bounds, 2);
        assert_eq!(grid.counts, vec![2, 0, 0, 2]);
        assert_eq!(grid.count_at(&Point::new(0.75, 0.25)), Some(0));
        assert_eq!(grid.count_at(&Point::new(5.0, 0.0)), None);
        assert_eq!(grid.occupancy(), 0.5);
    }
}
