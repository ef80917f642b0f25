use crate::color::{Color, Palette};
use crate::error::Result;
use crate::iteration::{self, rng_from_settings, IterationSettings, Trajectory, TrajectoryState};
use crate::maps::{AffineMap, AffineSystem};
use crate::traits::Point;
use rand::Rng;

/// Random iteration of a probability-weighted affine map set.
///
/// Runs always start from the origin, which is a fixed point of the fern's
/// stem map.
#[derive(Debug, Clone)]
pub struct AffineGame {
    system: AffineSystem,
    state: TrajectoryState,
}

impl AffineGame {
    pub fn new(maps: Vec<AffineMap>, probabilities: &[f64]) -> Result<Self> {
        Ok(Self::from_system(AffineSystem::new(maps, probabilities)?))
    }

    /// Builds the map set from flat coefficients, six per map.
    pub fn from_flat(coefficients: &[f64], probabilities: &[f64]) -> Result<Self> {
        let maps = coefficients
            .chunks(6)
            .map(AffineMap::from_coefficients)
            .collect::<Result<Vec<_>>>()?;
        Self::new(maps, probabilities)
    }

    pub fn barnsley_fern() -> Result<Self> {
        Ok(Self::from_system(AffineSystem::barnsley_fern()?))
    }

    pub fn from_system(system: AffineSystem) -> Self {
        Self {
            system,
            state: TrajectoryState::Uncomputed,
        }
    }

    pub fn system(&self) -> &AffineSystem {
        &self.system
    }

    pub fn iterate(&mut self, settings: &IterationSettings) -> Result<&Trajectory> {
        let mut rng = rng_from_settings(settings);
        self.iterate_with_rng(settings, Palette::Scalar, &mut rng)
    }

    pub fn iterate_with_rng<R: Rng + ?Sized>(
        &mut self,
        settings: &IterationSettings,
        palette: Palette,
        rng: &mut R,
    ) -> Result<&Trajectory> {
        let trajectory = iteration::iterate(
            &self.system,
            self.system.selector(),
            Point::zeros(),
            settings,
            palette,
            rng,
        )?;
        self.state = TrajectoryState::Computed(trajectory);
        self.state.computed()
    }

    pub fn state(&self) -> &TrajectoryState {
        &self.state
    }

    pub fn trajectory(&self) -> Result<&Trajectory> {
        self.state.computed()
    }

    pub fn points(&self) -> Result<&[Point]> {
        Ok(&self.trajectory()?.points)
    }

    pub fn colors(&self) -> Result<&[Color]> {
        Ok(&self.trajectory()?.colors)
    }

    pub fn into_trajectory(self) -> Result<Trajectory> {
        self.state.into_computed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{selection_frequencies, BoundingBox};
    use crate::error::AttractorError;

    #[test]
    fn fern_points_stay_in_known_bounds() {
        let mut fern = AffineGame::barnsley_fern().expect("fern");
        let settings = IterationSettings::new(50_000, 5).with_seed(17);
        let trajectory = fern.iterate(&settings).expect("trajectory");
        assert_eq!(trajectory.len(), 50_000);

        let bbox = BoundingBox::of(&trajectory.points).expect("bbox");
        assert!(bbox.min.x >= -2.2 && bbox.max.x <= 2.7, "bbox {bbox:?}");
        assert!(bbox.min.y >= 0.0 && bbox.max.y <= 10.0, "bbox {bbox:?}");
        // The fern spans most of its theoretical extent.
        assert!(bbox.height() > 9.0);
    }

    #[test]
    fn fern_selection_follows_probability_table() {
        let mut fern = AffineGame::barnsley_fern().expect("fern");
        let settings = IterationSettings::new(100_000, 5).with_seed(23);
        let trajectory = fern.iterate(&settings).expect("trajectory");
        let frequencies = selection_frequencies(&trajectory.indices, 4);
        for (observed, expected) in frequencies.iter().zip([0.01, 0.85, 0.07, 0.07]) {
            assert!((observed - expected).abs() < 0.01);
        }
    }

    #[test]
    fn from_flat_groups_coefficients_by_six() {
        let game = AffineGame::from_flat(
            &[0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.5, 0.0],
            &[0.5, 0.5],
        )
        .expect("game");
        assert_eq!(game.system().maps().len(), 2);
        assert_eq!(game.system().maps()[1].e, 0.5);

        assert_eq!(
            AffineGame::from_flat(&[0.5, 0.0, 0.0, 0.5, 0.0], &[1.0]).err(),
            Some(AttractorError::MalformedCoefficients(5))
        );
    }

    #[test]
    fn accessors_require_iteration() {
        let mut fern = AffineGame::barnsley_fern().expect("fern");
        assert_eq!(fern.points().err(), Some(AttractorError::NotYetComputed));
        assert_eq!(fern.colors().err(), Some(AttractorError::NotYetComputed));
        assert_eq!(
            fern.clone().into_trajectory().err(),
            Some(AttractorError::NotYetComputed)
        );

        fern.iterate(&IterationSettings::new(10, 5).with_seed(1))
            .expect("trajectory");
        assert_eq!(fern.points().expect("points").len(), 10);
        let colors = fern.colors().expect("colors");
        assert_eq!(colors.len(), 10);
        assert!(colors
            .iter()
            .all(|c| matches!(c, Color::Scalar(v) if (0.0..=3.0).contains(v))));

        let trajectory = fern.into_trajectory().expect("trajectory");
        assert_eq!(trajectory.len(), 10);
    }

    #[test]
    fn rejects_unbalanced_probabilities() {
        let maps = vec![AffineMap::new(0.5, 0.0, 0.0, 0.5, 0.0, 0.0); 2];
        assert!(matches!(
            AffineGame::new(maps, &[0.3, 0.3]),
            Err(AttractorError::MalformedProbabilityTable(_))
        ));
    }
}
