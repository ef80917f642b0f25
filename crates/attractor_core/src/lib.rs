pub mod affine_game;
pub mod analysis;
pub mod chaos_game;
pub mod color;
pub mod error;
pub mod iteration;
pub mod maps;
pub mod polygon;
pub mod selector;
/// The `attractor_core` crate generates point clouds of iterated function system
/// attractors by random iteration (the "chaos game").
///
/// Key components:
/// - **Traits**: `IteratedFunctionSystem` (families of planar maps), `Selector` (index draws).
/// - **Maps**: contraction toward polygon vertices and probability-weighted affine maps.
/// - **Iteration**: the shared driver that produces a `Trajectory` with color labels.
/// - **Generators**: `ChaosGame` (regular polygons, Sierpinski) and `AffineGame` (Barnsley fern).
/// - **Variations**: the nine named nonlinear post-transforms and their linear blend.
pub mod traits;
pub mod variations;

pub use affine_game::AffineGame;
pub use chaos_game::ChaosGame;
pub use error::{AttractorError, Result};
pub use iteration::{IterationSettings, Trajectory, TrajectoryState};
pub use variations::{Variation, Variations};
