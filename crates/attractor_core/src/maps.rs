//! Planar map families used by the chaos game.
//!
//! Two flavours are provided:
//! - [`PolygonSystem`]: one contraction toward each vertex of a polygon, all
//!   sharing a single ratio.
//! - [`AffineSystem`]: an arbitrary list of affine maps with a selection
//!   probability each (Barnsley fern and friends).

use crate::error::{AttractorError, Result};
use crate::selector::WeightedSelector;
use crate::traits::{IteratedFunctionSystem, Point};
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

/// Contraction toward a fixed vertex: `p ↦ r·p + (1 − r)·v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractionMap {
    ratio: f64,
}

impl ContractionMap {
    pub fn new(ratio: f64) -> Result<Self> {
        if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
            return Err(AttractorError::InvalidRatio(ratio));
        }
        if ratio < 1e-3 || ratio > 1.0 - 1e-3 {
            log::warn!("Contraction ratio {ratio} is close to the boundary of (0, 1).");
        }
        Ok(Self { ratio })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn apply(&self, point: &Point, vertex: &Point) -> Point {
        point * self.ratio + vertex * (1.0 - self.ratio)
    }
}

/// Affine map `p ↦ [[a, b], [c, d]]·p + (e, f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMap {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineMap {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Builds a map from `[a, b, c, d, e, f]`.
    pub fn from_coefficients(coefficients: &[f64]) -> Result<Self> {
        match *coefficients {
            [a, b, c, d, e, f] => Ok(Self::new(a, b, c, d, e, f)),
            _ => Err(AttractorError::MalformedCoefficients(coefficients.len())),
        }
    }

    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn linear_part(&self) -> Matrix2<f64> {
        Matrix2::new(self.a, self.b, self.c, self.d)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.e, self.f)
    }

    pub fn apply(&self, point: &Point) -> Point {
        self.linear_part() * point + self.translation()
    }
}

/// Polygon vertices paired with a shared contraction ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSystem {
    vertices: Vec<Point>,
    contraction: ContractionMap,
}

impl PolygonSystem {
    pub fn new(vertices: Vec<Point>, ratio: f64) -> Result<Self> {
        if vertices.is_empty() {
            return Err(AttractorError::EmptyMapSet);
        }
        Ok(Self {
            vertices,
            contraction: ContractionMap::new(ratio)?,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn ratio(&self) -> f64 {
        self.contraction.ratio()
    }
}

impl IteratedFunctionSystem for PolygonSystem {
    fn map_count(&self) -> usize {
        self.vertices.len()
    }

    fn apply(&self, index: usize, point: &Point) -> Point {
        self.contraction.apply(point, &self.vertices[index])
    }
}

/// Affine maps with one selection probability per map.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineSystem {
    maps: Vec<AffineMap>,
    selector: WeightedSelector,
}

impl AffineSystem {
    pub fn new(maps: Vec<AffineMap>, probabilities: &[f64]) -> Result<Self> {
        if maps.is_empty() {
            return Err(AttractorError::EmptyMapSet);
        }
        if maps.len() != probabilities.len() {
            return Err(AttractorError::LengthMismatch {
                expected: maps.len(),
                actual: probabilities.len(),
            });
        }
        let selector = WeightedSelector::new(probabilities)?;
        Ok(Self { maps, selector })
    }

    /// The four-map Barnsley fern.
    pub fn barnsley_fern() -> Result<Self> {
        let maps = vec![
            AffineMap::new(0.0, 0.0, 0.0, 0.16, 0.0, 0.0),
            AffineMap::new(0.85, 0.04, -0.04, 0.85, 0.0, 1.60),
            AffineMap::new(0.20, -0.26, 0.23, 0.22, 0.0, 1.60),
            AffineMap::new(-0.15, 0.28, 0.26, 0.24, 0.0, 0.44),
        ];
        let selector = WeightedSelector::new(&[0.01, 0.85, 0.07, 0.07])?;
        Ok(Self { maps, selector })
    }

    pub fn maps(&self) -> &[AffineMap] {
        &self.maps
    }

    pub fn selector(&self) -> &WeightedSelector {
        &self.selector
    }
}

impl IteratedFunctionSystem for AffineSystem {
    fn map_count(&self) -> usize {
        self.maps.len()
    }

    fn apply(&self, index: usize, point: &Point) -> Point {
        self.maps[index].apply(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn contraction_rejects_ratios_outside_open_interval() {
        for ratio in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            assert!(
                matches!(ContractionMap::new(ratio), Err(AttractorError::InvalidRatio(_))),
                "ratio {ratio} should be rejected"
            );
        }
        assert!(ContractionMap::new(0.5).is_ok());
    }

    #[test]
    fn contraction_moves_toward_vertex() {
        let map = ContractionMap::new(0.5).expect("map");
        let next = map.apply(&Point::new(0.0, 0.0), &Point::new(1.0, 2.0));
        assert_relative_eq!(next.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(next.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn affine_map_applies_matrix_then_translation() {
        let map = AffineMap::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let out = map.apply(&Point::new(1.0, -1.0));
        assert_relative_eq!(out.x, 1.0 - 2.0 + 5.0, epsilon = 1e-12);
        assert_relative_eq!(out.y, 3.0 - 4.0 + 6.0, epsilon = 1e-12);
    }

    #[test]
    fn affine_map_from_coefficients_checks_length() {
        let map = AffineMap::from_coefficients(&[0.85, 0.04, -0.04, 0.85, 0.0, 1.6]).expect("map");
        assert_eq!(map.coefficients(), [0.85, 0.04, -0.04, 0.85, 0.0, 1.6]);
        assert_eq!(
            AffineMap::from_coefficients(&[1.0, 2.0]),
            Err(AttractorError::MalformedCoefficients(2))
        );
    }

    #[test]
    fn affine_system_validates_table() {
        let maps = vec![AffineMap::new(0.5, 0.0, 0.0, 0.5, 0.0, 0.0); 2];
        assert!(matches!(
            AffineSystem::new(maps.clone(), &[0.5]),
            Err(AttractorError::LengthMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            AffineSystem::new(maps.clone(), &[0.5, 0.6]),
            Err(AttractorError::MalformedProbabilityTable(_))
        ));
        assert_eq!(AffineSystem::new(Vec::new(), &[]), Err(AttractorError::EmptyMapSet));
        assert!(AffineSystem::new(maps, &[0.25, 0.75]).is_ok());
    }

    #[test]
    fn barnsley_fern_stem_map_flattens_x() {
        let fern = AffineSystem::barnsley_fern().expect("fern");
        assert_eq!(fern.map_count(), 4);
        let stem = fern.apply(0, &Point::new(3.0, 2.0));
        assert_relative_eq!(stem.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(stem.y, 0.32, epsilon = 1e-12);
    }
}
