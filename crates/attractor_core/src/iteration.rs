//! Random-iteration driver shared by every generator.
//!
//! A run starts from a given point, repeatedly draws a map index from a
//! [`Selector`], applies that map from an [`IteratedFunctionSystem`] and
//! records the point, the index and a running [`Color`]. The first
//! `discard` entries of the run are dropped so the returned trajectory
//! sits on the attractor.

use crate::color::{Color, ColorTracker, Palette};
use crate::error::{AttractorError, Result};
use crate::traits::{IteratedFunctionSystem, Point, Selector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Settings controlling a chaos-game run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationSettings {
    /// Number of points to return.
    pub steps: usize,
    /// Number of leading points generated and then dropped.
    pub discard: usize,
    /// Seed for a reproducible run; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for IterationSettings {
    fn default() -> Self {
        Self {
            steps: 20_000,
            discard: 5,
            seed: None,
        }
    }
}

impl IterationSettings {
    pub fn new(steps: usize, discard: usize) -> Self {
        Self {
            steps,
            discard,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Length of the internal run before the warm-up prefix is dropped.
    pub fn run_length(&self) -> Result<usize> {
        self.steps.checked_add(self.discard).ok_or_else(|| {
            AttractorError::InvalidSettings(format!(
                "{} steps plus {} discarded points overflows the run length",
                self.steps, self.discard
            ))
        })
    }
}

/// Builds the random source described by `settings`.
pub fn rng_from_settings(settings: &IterationSettings) -> StdRng {
    match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Points produced by one run, with the selected map index and color label
/// of each point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<Point>,
    pub indices: Vec<usize>,
    pub colors: Vec<Color>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, point: Point, index: usize, color: Color) {
        self.points.push(point);
        self.indices.push(index);
        self.colors.push(color);
    }

    fn drop_prefix(&mut self, count: usize) {
        let count = count.min(self.len());
        self.points.drain(..count);
        self.indices.drain(..count);
        self.colors.drain(..count);
    }

    /// Points as `[x0, y0, x1, y1, ...]`.
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Points whose selected index equals `index`.
    pub fn points_for_index(&self, index: usize) -> Vec<Point> {
        self.points
            .iter()
            .zip(&self.indices)
            .filter(|(_, &k)| k == index)
            .map(|(p, _)| *p)
            .collect()
    }
}

/// Whether a generator has produced a trajectory yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrajectoryState {
    #[default]
    Uncomputed,
    Computed(Trajectory),
}

impl TrajectoryState {
    pub fn is_computed(&self) -> bool {
        matches!(self, TrajectoryState::Computed(_))
    }

    pub fn computed(&self) -> Result<&Trajectory> {
        match self {
            TrajectoryState::Computed(trajectory) => Ok(trajectory),
            TrajectoryState::Uncomputed => Err(AttractorError::NotYetComputed),
        }
    }

    pub fn into_computed(self) -> Result<Trajectory> {
        match self {
            TrajectoryState::Computed(trajectory) => Ok(trajectory),
            TrajectoryState::Uncomputed => Err(AttractorError::NotYetComputed),
        }
    }
}

/// Runs the chaos game for `settings.steps + settings.discard` entries and
/// returns the last `settings.steps` of them.
///
/// Entry 0 of the internal run is `start`, labelled with index 0 and the
/// palette's base color.
pub fn iterate<S, Sel, R>(
    system: &S,
    selector: &Sel,
    start: Point,
    settings: &IterationSettings,
    palette: Palette,
    rng: &mut R,
) -> Result<Trajectory>
where
    S: IteratedFunctionSystem + ?Sized,
    Sel: Selector,
    R: Rng + ?Sized,
{
    log::debug!(
        "Iterating {} maps for {} steps ({} discarded).",
        system.map_count(),
        settings.steps,
        settings.discard
    );
    let stepper = ChaosStepper::new(system, selector, start, palette)?;
    let mut run = IterationRun::new(stepper, *settings)?;
    run.run_steps(run.total(), rng);
    run.finish()
}

/// Progress of a batched run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    pub completed: usize,
    pub total: usize,
    pub done: bool,
}

/// A run that can be advanced in batches, e.g. to report progress to a UI.
pub struct IterationRun<S, Sel> {
    stepper: ChaosStepper<S, Sel>,
    discard: usize,
    total: usize,
    trajectory: Trajectory,
}

impl<S, Sel> IterationRun<S, Sel>
where
    S: IteratedFunctionSystem,
    Sel: Selector,
{
    pub fn new(stepper: ChaosStepper<S, Sel>, settings: IterationSettings) -> Result<Self> {
        let total = settings.run_length()?;
        // `total` is caller-controlled, so buffers grow on demand.
        let mut trajectory = Trajectory::default();
        if total > 0 {
            trajectory.push(stepper.point(), 0, stepper.color());
        }
        Ok(Self {
            stepper,
            discard: settings.discard,
            total,
            trajectory,
        })
    }

    /// Entries in the full run, warm-up prefix included.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_done(&self) -> bool {
        self.trajectory.len() >= self.total
    }

    /// Advances by at most `batch` entries.
    pub fn run_steps<R: Rng + ?Sized>(&mut self, batch: usize, rng: &mut R) -> RunProgress {
        let remaining = self.total - self.trajectory.len();
        for _ in 0..batch.min(remaining) {
            let (point, index, color) = self.stepper.step(rng);
            self.trajectory.push(point, index, color);
        }
        self.progress()
    }

    pub fn progress(&self) -> RunProgress {
        RunProgress {
            completed: self.trajectory.len(),
            total: self.total,
            done: self.is_done(),
        }
    }

    /// Drops the warm-up prefix and returns the generated points.
    ///
    /// Fails if the run has not reached its full length.
    pub fn finish(mut self) -> Result<Trajectory> {
        if !self.is_done() {
            return Err(AttractorError::RunIncomplete {
                completed: self.trajectory.len(),
                total: self.total,
            });
        }
        self.trajectory.drop_prefix(self.discard);
        Ok(self.trajectory)
    }
}

/// Single-step form of the driver, for callers that iterate in batches.
///
/// `S` and `Sel` may be owned values or references.
pub struct ChaosStepper<S, Sel> {
    system: S,
    selector: Sel,
    point: Point,
    tracker: ColorTracker,
}

impl<S, Sel> ChaosStepper<S, Sel>
where
    S: IteratedFunctionSystem,
    Sel: Selector,
{
    pub fn new(system: S, selector: Sel, start: Point, palette: Palette) -> Result<Self> {
        if system.map_count() == 0 {
            return Err(AttractorError::EmptyMapSet);
        }
        if selector.choice_count() != system.map_count() {
            return Err(AttractorError::SelectorMismatch {
                selector: selector.choice_count(),
                system: system.map_count(),
            });
        }
        palette.check_covers(system.map_count())?;
        Ok(Self {
            system,
            selector,
            point: start,
            tracker: ColorTracker::new(palette),
        })
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn color(&self) -> Color {
        self.tracker.current()
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (Point, usize, Color) {
        let index = self.selector.select(rng);
        self.point = self.system.apply(index, &self.point);
        let color = self.tracker.advance(index);
        (self.point, index, color)
    }
}
