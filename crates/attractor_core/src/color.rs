use crate::error::{AttractorError, Result};
use serde::{Deserialize, Serialize};

/// A color label attached to a trajectory point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Scalar(f64),
    Rgb([f64; 3]),
}

/// Assigns a basis color to each map index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "colors", rename_all = "snake_case")]
pub enum Palette {
    /// Index k maps to the scalar k.
    #[default]
    Scalar,
    /// Index k maps to `colors[k]`.
    Rgb(Vec<[f64; 3]>),
}

impl Palette {
    /// Pure red, green and blue for the first three indices.
    pub fn one_hot(count: usize) -> Result<Self> {
        if count == 0 || count > 3 {
            return Err(AttractorError::InvalidPalette(format!(
                "one-hot RGB palette supports 1 to 3 colors, got {count}"
            )));
        }
        let colors = (0..count)
            .map(|k| {
                let mut rgb = [0.0; 3];
                rgb[k] = 1.0;
                rgb
            })
            .collect();
        Ok(Palette::Rgb(colors))
    }

    /// Number of indices this palette can color, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Palette::Scalar => None,
            Palette::Rgb(colors) => Some(colors.len()),
        }
    }

    pub fn check_covers(&self, count: usize) -> Result<()> {
        match self.capacity() {
            Some(capacity) if capacity < count => Err(AttractorError::InvalidPalette(format!(
                "palette has {capacity} colors but {count} maps need coloring"
            ))),
            _ => Ok(()),
        }
    }

    pub fn base(&self) -> Color {
        match self {
            Palette::Scalar => Color::Scalar(0.0),
            Palette::Rgb(_) => Color::Rgb([0.0; 3]),
        }
    }

    pub fn color(&self, index: usize) -> Color {
        match self {
            Palette::Scalar => Color::Scalar(index as f64),
            Palette::Rgb(colors) => Color::Rgb(colors[index]),
        }
    }
}

/// Running label blended halfway toward each selected index's color.
#[derive(Debug, Clone)]
pub struct ColorTracker {
    palette: Palette,
    current: Color,
}

impl ColorTracker {
    pub fn new(palette: Palette) -> Self {
        let current = palette.base();
        Self { palette, current }
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn advance(&mut self, index: usize) -> Color {
        self.current = match (self.current, self.palette.color(index)) {
            (Color::Scalar(c), Color::Scalar(target)) => Color::Scalar((c + target) / 2.0),
            (Color::Rgb(c), Color::Rgb(target)) => Color::Rgb([
                (c[0] + target[0]) / 2.0,
                (c[1] + target[1]) / 2.0,
                (c[2] + target[2]) / 2.0,
            ]),
            // Base and palette colors always share a variant.
            (_, target) => target,
        };
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tracker_averages_with_selected_index() {
        let mut tracker = ColorTracker::new(Palette::Scalar);
        assert_eq!(tracker.current(), Color::Scalar(0.0));
        assert_eq!(tracker.advance(2), Color::Scalar(1.0));
        assert_eq!(tracker.advance(2), Color::Scalar(1.5));
        assert_eq!(tracker.advance(0), Color::Scalar(0.75));
    }

    #[test]
    fn rgb_tracker_blends_toward_basis_color() {
        let mut tracker = ColorTracker::new(Palette::one_hot(3).expect("palette"));
        assert_eq!(tracker.current(), Color::Rgb([0.0, 0.0, 0.0]));
        assert_eq!(tracker.advance(0), Color::Rgb([0.5, 0.0, 0.0]));
        assert_eq!(tracker.advance(1), Color::Rgb([0.25, 0.5, 0.0]));
        assert_eq!(tracker.advance(2), Color::Rgb([0.125, 0.25, 0.5]));
    }

    #[test]
    fn one_hot_palette_limits_size() {
        assert!(Palette::one_hot(0).is_err());
        assert!(Palette::one_hot(4).is_err());
        assert_eq!(Palette::one_hot(2).expect("palette").capacity(), Some(2));
    }

    #[test]
    fn check_covers_rejects_small_palettes() {
        let palette = Palette::one_hot(3).expect("palette");
        assert!(palette.check_covers(3).is_ok());
        assert!(matches!(
            palette.check_covers(4),
            Err(AttractorError::InvalidPalette(_))
        ));
        assert!(Palette::Scalar.check_covers(1000).is_ok());
    }

    #[test]
    fn default_palette_is_scalar() {
        assert_eq!(Palette::default(), Palette::Scalar);
        assert_eq!(Palette::default().base(), Color::Scalar(0.0));
    }
}
