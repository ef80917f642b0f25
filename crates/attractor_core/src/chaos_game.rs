use crate::color::{Color, Palette};
use crate::error::{AttractorError, Result};
use crate::iteration::{self, rng_from_settings, IterationSettings, Trajectory, TrajectoryState};
use crate::maps::PolygonSystem;
use crate::polygon::{
    equilateral_triangle, random_interior_point, regular_polygon, vertex_count_from_f64,
};
use crate::selector::UniformSelector;
use crate::traits::Point;
use rand::Rng;

/// Chaos game on the vertices of a polygon.
///
/// Each step jumps from the current point toward a uniformly chosen vertex,
/// keeping a fraction `ratio` of the current position.
#[derive(Debug, Clone)]
pub struct ChaosGame {
    system: PolygonSystem,
    selector: UniformSelector,
    start: Option<Point>,
    state: TrajectoryState,
}

impl ChaosGame {
    /// Regular `n`-gon on the unit circle.
    pub fn new(n: usize, ratio: f64) -> Result<Self> {
        let vertices = regular_polygon(n)?;
        Self::from_vertices(vertices, ratio)
    }

    /// Same as [`ChaosGame::new`] for a vertex count that arrives as a float.
    pub fn from_raw(n: f64, ratio: f64) -> Result<Self> {
        Self::new(vertex_count_from_f64(n)?, ratio)
    }

    pub fn from_vertices(vertices: Vec<Point>, ratio: f64) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(AttractorError::InvalidVertexCount(vertices.len() as f64));
        }
        let selector = UniformSelector::new(vertices.len())?;
        Ok(Self {
            system: PolygonSystem::new(vertices, ratio)?,
            selector,
            start: None,
            state: TrajectoryState::Uncomputed,
        })
    }

    /// Sierpinski triangle over the equilateral triangle with base `v0`–`v1`.
    pub fn sierpinski(v0: Point, v1: Point) -> Result<Self> {
        Self::from_vertices(equilateral_triangle(v0, v1).to_vec(), 0.5)
    }

    pub fn vertex_count(&self) -> usize {
        self.system.vertices().len()
    }

    pub fn vertices(&self) -> &[Point] {
        self.system.vertices()
    }

    pub fn ratio(&self) -> f64 {
        self.system.ratio()
    }

    pub fn system(&self) -> &PolygonSystem {
        &self.system
    }

    pub fn selector(&self) -> &UniformSelector {
        &self.selector
    }

    /// Draws a fresh random starting point inside the polygon and keeps it
    /// for subsequent runs.
    pub fn starting_point<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Point> {
        let point = random_interior_point(self.system.vertices(), rng)?;
        self.start = Some(point);
        Ok(point)
    }

    pub fn set_starting_point(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// RGB one-hot coloring for triangles, scalar gradient otherwise.
    pub fn gradient_palette(&self) -> Palette {
        Palette::one_hot(self.vertex_count()).unwrap_or(Palette::Scalar)
    }

    /// Runs with the scalar vertex-index palette.
    pub fn iterate(&mut self, settings: &IterationSettings) -> Result<&Trajectory> {
        self.iterate_with_palette(settings, Palette::Scalar)
    }

    pub fn iterate_gradient(&mut self, settings: &IterationSettings) -> Result<&Trajectory> {
        let palette = self.gradient_palette();
        self.iterate_with_palette(settings, palette)
    }

    pub fn iterate_with_palette(
        &mut self,
        settings: &IterationSettings,
        palette: Palette,
    ) -> Result<&Trajectory> {
        let mut rng = rng_from_settings(settings);
        self.iterate_with_rng(settings, palette, &mut rng)
    }

    /// Replaces any earlier trajectory with a new run.
    pub fn iterate_with_rng<R: Rng + ?Sized>(
        &mut self,
        settings: &IterationSettings,
        palette: Palette,
        rng: &mut R,
    ) -> Result<&Trajectory> {
        let start = match self.start {
            Some(point) => point,
            None => self.starting_point(rng)?,
        };
        let trajectory =
            iteration::iterate(&self.system, &self.selector, start, settings, palette, rng)?;
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
