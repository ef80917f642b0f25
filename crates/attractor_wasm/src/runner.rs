//! Stepped chaos game runner.

use crate::payload::{settings_from_js, to_js, to_js_error, TrajectoryPayload};
use anyhow::{Context, Result};
use attractor_core::chaos_game::ChaosGame;
use attractor_core::color::Palette;
use attractor_core::iteration::{
    rng_from_settings, ChaosStepper, IterationRun, IterationSettings, RunProgress,
};
use attractor_core::maps::PolygonSystem;
use attractor_core::selector::UniformSelector;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

struct RunnerState {
    run: IterationRun<PolygonSystem, UniformSelector>,
    rng: StdRng,
}

/// WASM-exported runner for the polygon chaos game.
/// Allows progress reporting by running batches of steps at a time.
#[wasm_bindgen]
pub struct WasmChaosGameRunner {
    state: Option<RunnerState>,
}

impl WasmChaosGameRunner {
    pub(crate) fn build(
        n: f64,
        ratio: f64,
        settings: IterationSettings,
        gradient: bool,
    ) -> Result<Self> {
        let mut game = ChaosGame::from_raw(n, ratio).context("Invalid chaos game")?;
        let palette = if gradient {
            game.gradient_palette()
        } else {
            Palette::Scalar
        };
        let mut rng = rng_from_settings(&settings);
        let start = game.starting_point(&mut rng)?;
        let stepper = ChaosStepper::new(
            game.system().clone(),
            game.selector().clone(),
            start,
            palette,
        )
        .context("Runner init failed")?;
        Ok(Self {
            state: Some(RunnerState {
                run: IterationRun::new(stepper, settings).context("Runner init failed")?,
                rng,
            }),
        })
    }

    fn state_mut(&mut self) -> Result<&mut RunnerState> {
        self.state
            .as_mut()
            .context("Runner not initialized")
    }

    pub(crate) fn advance(&mut self, batch_size: usize) -> Result<RunProgress> {
        let state = self.state_mut()?;
        Ok(state.run.run_steps(batch_size, &mut state.rng))
    }

    /// Takes the finished trajectory; an unfinished run is left in place.
    pub(crate) fn take_payload(&mut self) -> Result<TrajectoryPayload> {
        let progress = self.state_mut()?.run.progress();
        if !progress.done {
            anyhow::bail!(
                "Runner not finished ({}/{})",
                progress.completed,
                progress.total
            );
        }
        let state = self.state.take().context("Runner not initialized")?;
        let trajectory = state.run.finish().context("Runner finish failed")?;
        Ok(TrajectoryPayload::from(&trajectory))
    }
}

#[wasm_bindgen]
impl WasmChaosGameRunner {
    /// Create a new stepped chaos game runner.
    #[wasm_bindgen(constructor)]
    pub fn new(
        n: f64,
        ratio: f64,
        settings_val: JsValue,
        gradient: bool,
    ) -> Result<WasmChaosGameRunner, JsValue> {
        crate::init_runtime();
        let settings = settings_from_js(settings_val)?;
        Self::build(n, ratio, settings, gradient).map_err(to_js_error)
    }

    /// Check if the run is complete.
    pub fn is_done(&self) -> bool {
        self.state.as_ref().map_or(true, |state| state.run.is_done())
    }

    /// Run a batch of steps and return progress.
    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let progress = self.advance(batch_size as usize).map_err(to_js_error)?;
        to_js(&progress)
    }

    /// Get progress information.
    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;
        to_js(&state.run.progress())
    }

    /// Get the final trajectory; the runner is consumed.
    pub fn get_result(&mut self) -> Result<JsValue, JsValue> {
        let payload = self.take_payload().map_err(to_js_error)?;
        to_js(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_runner(steps: usize) -> WasmChaosGameRunner {
        WasmChaosGameRunner::build(3.0, 0.5, IterationSettings::new(steps, 5).with_seed(4), true)
            .expect("runner")
    }

    #[test]
    fn runner_finishes_after_enough_batches() {
        let mut runner = build_runner(100);
        assert!(!runner.is_done());
        let mut batches = 0;
        while !runner.advance(10).expect("advance").done {
            batches += 1;
        }
        assert!(runner.is_done());
        assert_eq!(batches, 10);

        let payload = runner.take_payload().expect("payload");
        assert_eq!(payload.indices.len(), 100);
        assert_eq!(payload.color_channels, 3);
    }

    #[test]
    fn runner_with_zero_steps_is_done_immediately() {
        let mut runner = WasmChaosGameRunner::build(
            4.0,
            0.5,
            IterationSettings::new(0, 0).with_seed(1),
            false,
        )
        .expect("runner");
        assert!(runner.is_done());
        assert!(runner.take_payload().expect("payload").points.is_empty());
    }

    #[test]
    fn runner_errors_after_result_taken() {
        let mut runner = build_runner(0);
        runner.take_payload().expect("payload");
        assert!(runner.is_done());
        let err = runner.advance(1).expect_err("runner should be consumed");
        assert!(format!("{err}").contains("Runner not initialized"));
    }

    #[test]
    fn runner_refuses_result_before_done() {
        let mut runner = build_runner(100);
        let progress = runner.advance(3).expect("advance");
        assert!(!progress.done);

        let err = runner.take_payload().expect_err("run is unfinished");
        assert!(format!("{err}").contains("Runner not finished (4/105)"), "got {err}");

        while !runner.advance(50).expect("advance").done {}
        let payload = runner.take_payload().expect("payload");
        assert_eq!(payload.indices.len(), 100);
    }

    #[test]
    fn runner_rejects_overflowing_run_length() {
        let result = WasmChaosGameRunner::build(3.0, 0.5, IterationSettings::new(usize::MAX, 5), false);
        let message = format!("{:#}", result.err().expect("error"));
        assert!(message.contains("Invalid iteration settings"), "got {message}");
    }

    #[test]
    fn runner_rejects_invalid_polygon() {
        let result = WasmChaosGameRunner::build(2.0, 0.5, IterationSettings::default(), false);
        assert!(result.is_err());
    }
}
