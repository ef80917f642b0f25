//! Nonlinear "variation" transforms applied to generated point clouds.
//!
//! Each variation is a closed-form function of (x, y), written in terms of
//! the polar radius r = √(x² + y²) and angle θ = atan2(y, x).

use crate::error::{AttractorError, Result};
use crate::iteration::Trajectory;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    Linear,
    Handkerchief,
    Swirl,
    Disc,
    Heart,
    Ex,
    Hyperbolic,
    Power,
    Fisheye,
}

impl Variation {
    pub const ALL: [Variation; 9] = [
        Variation::Linear,
        Variation::Handkerchief,
        Variation::Swirl,
        Variation::Disc,
        Variation::Heart,
        Variation::Ex,
        Variation::Hyperbolic,
        Variation::Power,
        Variation::Fisheye,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variation::Linear => "linear",
            Variation::Handkerchief => "handkerchief",
            Variation::Swirl => "swirl",
            Variation::Disc => "disc",
            Variation::Heart => "heart",
            Variation::Ex => "ex",
            Variation::Hyperbolic => "hyperbolic",
            Variation::Power => "power",
            Variation::Fisheye => "fisheye",
        }
    }

    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        let r = (x * x + y * y).sqrt();
        let theta = y.atan2(x);
        match self {
            Variation::Linear => (x, y),
            Variation::Handkerchief => (r * (theta + r).sin(), r * (theta - r).cos()),
            Variation::Swirl => {
                let r2 = r * r;
                (
                    x * r2.sin() - y * r2.cos(),
                    x * r2.cos() + y * r2.sin(),
                )
            }
            Variation::Disc => {
                let scale = theta / PI;
                (scale * (PI * r).sin(), scale * (PI * r).cos())
            }
            Variation::Heart => (r * (theta * r).sin(), -r * (theta * r).cos()),
            Variation::Ex => {
                let p0 = (theta + r).sin().powi(3);
                let p1 = (theta - r).cos().powi(3);
                (r * (p0 + p1), r * (p0 - p1))
            }
            // Undefined at the origin; yields non-finite values there.
            Variation::Hyperbolic => (theta.sin() / r, r * theta.cos()),
            Variation::Power => {
                let scale = r.powf(theta.sin());
                (scale * theta.cos(), scale * theta.sin())
            }
            Variation::Fisheye => {
                let scale = 2.0 / (r + 1.0);
                (scale * y, scale * x)
            }
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variation {
    type Err = AttractorError;

    fn from_str(name: &str) -> Result<Self> {
        Variation::ALL
            .into_iter()
            .find(|variation| variation.name() == name)
            .ok_or_else(|| AttractorError::UnknownVariation(name.to_string()))
    }
}

/// A transformed point cloud as separate coordinate columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformedPoints {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

impl TransformedPoints {
    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }
}

/// Coordinate columns bound to one named variation.
#[derive(Debug, Clone, PartialEq)]
pub struct Variations {
    xs: Vec<f64>,
    ys: Vec<f64>,
    variation: Variation,
}

impl Variations {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, name: &str) -> Result<Self> {
        let variation = name.parse()?;
        Self::with_variation(xs, ys, variation)
    }

    pub fn with_variation(xs: Vec<f64>, ys: Vec<f64>, variation: Variation) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(AttractorError::LengthMismatch {
                expected: xs.len(),
                actual: ys.len(),
            });
        }
        Ok(Self { xs, ys, variation })
    }

    /// Binds the points of a trajectory, with y mirrored so that the
    /// image's upward axis matches the polygon's.
    pub fn from_trajectory(trajectory: &Trajectory, variation: Variation) -> Self {
        let (xs, ys) = trajectory.points.iter().map(|p| (p.x, -p.y)).unzip();
        Self { xs, ys, variation }
    }

    pub fn variation(&self) -> Variation {
        self.variation
    }

    pub fn transform(&self) -> TransformedPoints {
        let (u, v) = self
            .xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| self.variation.apply(x, y))
            .unzip();
        TransformedPoints { u, v }
    }
}

/// Linear interpolation between two transformed clouds: `w·V2 + (1 − w)·V1`.
pub fn blend(v1: &TransformedPoints, v2: &TransformedPoints, w: f64) -> Result<TransformedPoints> {
    if !(0.0..=1.0).contains(&w) {
        return Err(AttractorError::InvalidBlendWeight(w));
    }
    if v1.u.len() != v2.u.len() || v1.v.len() != v2.v.len() {
        return Err(AttractorError::LengthMismatch {
            expected: v1.len(),
            actual: v2.len(),
        });
    }
    let mix = |a: &[f64], b: &[f64]| -> Vec<f64> {
        a.iter().zip(b).map(|(&p, &q)| w * q + (1.0 - w) * p).collect()
    };
    Ok(TransformedPoints {
        u: mix(&v1.u, &v2.u),
        v: mix(&v1.v, &v2.v),
    })
}

/// Captures two clouds and returns the blend as a function of the weight.
pub fn linear_combination<'a>(
    v1: &'a TransformedPoints,
    v2: &'a TransformedPoints,
) -> impl Fn(f64) -> Result<TransformedPoints> + 'a {
    move |w| blend(v1, v2, w)
}
