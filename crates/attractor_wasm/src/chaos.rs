//! Polygon chaos game exposed to JS.

use crate::payload::{flatten_vertices, settings_from_js, to_js, to_js_error, TrajectoryPayload};
use anyhow::{Context, Result};
use attractor_core::chaos_game::ChaosGame;
use attractor_core::iteration::IterationSettings;
use attractor_core::traits::Point;
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmChaosGame {
    pub(crate) game: ChaosGame,
}

impl WasmChaosGame {
    pub(crate) fn build(n: f64, ratio: f64) -> Result<Self> {
        let game = ChaosGame::from_raw(n, ratio).context("Invalid chaos game")?;
        Ok(Self { game })
    }

    pub(crate) fn run(
        &mut self,
        settings: &IterationSettings,
        gradient: bool,
    ) -> Result<TrajectoryPayload> {
        let trajectory = if gradient {
            self.game.iterate_gradient(settings)
        } else {
            self.game.iterate(settings)
        }
        .context("Chaos game iteration failed")?;
        Ok(TrajectoryPayload::from(trajectory))
    }
}

#[wasm_bindgen]
impl WasmChaosGame {
    #[wasm_bindgen(constructor)]
    pub fn new(n: f64, ratio: f64) -> Result<WasmChaosGame, JsValue> {
        crate::init_runtime();
        Self::build(n, ratio).map_err(to_js_error)
    }

    /// Equilateral Sierpinski triangle with base from `(x0, y0)` to `(x1, y1)`.
    pub fn sierpinski(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<WasmChaosGame, JsValue> {
        crate::init_runtime();
        ChaosGame::sierpinski(Point::new(x0, y0), Point::new(x1, y1))
            .map(|game| WasmChaosGame { game })
            .map_err(|e| JsValue::from_str(&format!("Invalid Sierpinski triangle: {}", e)))
    }

    pub fn vertex_count(&self) -> usize {
        self.game.vertex_count()
    }

    pub fn ratio(&self) -> f64 {
        self.game.ratio()
    }

    /// Vertices as `[x0, y0, x1, y1, ...]`.
    pub fn vertices(&self) -> Vec<f64> {
        flatten_vertices(self.game.vertices())
    }

    pub fn set_starting_point(&mut self, x: f64, y: f64) {
        self.game.set_starting_point(Point::new(x, y));
    }

    pub fn has_trajectory(&self) -> bool {
        self.game.state().is_computed()
    }

    /// Runs the game with vertex-index colors and returns the trajectory.
    pub fn iterate(&mut self, settings_val: JsValue) -> Result<JsValue, JsValue> {
        let settings = settings_from_js(settings_val)?;
        let payload = self.run(&settings, false).map_err(to_js_error)?;
        to_js(&payload)
    }

    /// Runs the game with gradient colors (RGB for triangles).
    pub fn iterate_gradient(&mut self, settings_val: JsValue) -> Result<JsValue, JsValue> {
        let settings = settings_from_js(settings_val)?;
        let payload = self.run(&settings, true).map_err(to_js_error)?;
        to_js(&payload)
    }

    /// Points of the last run as `[x0, y0, x1, y1, ...]`.
    pub fn points(&self) -> Result<Float64Array, JsValue> {
        let trajectory = self
            .game
            .trajectory()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Float64Array::from(trajectory.flat_points().as_slice()))
    }
}
