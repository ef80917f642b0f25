//! Probability-weighted affine IFS (Barnsley fern) exposed to JS.

use crate::payload::{ensure_finite, settings_from_js, to_js, to_js_error, TrajectoryPayload};
use anyhow::{Context, Result};
use attractor_core::affine_game::AffineGame;
use attractor_core::iteration::IterationSettings;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmAffineGame {
    game: AffineGame,
}

impl WasmAffineGame {
    pub(crate) fn build(coefficients: &[f64], probabilities: &[f64]) -> Result<Self> {
        ensure_finite(coefficients, "coefficient")?;
        ensure_finite(probabilities, "probability")?;
        let game = AffineGame::from_flat(coefficients, probabilities)
            .context("Invalid affine map set")?;
        Ok(Self { game })
    }

    pub(crate) fn fern() -> Result<Self> {
        let game = AffineGame::barnsley_fern().context("Invalid Barnsley fern")?;
        Ok(Self { game })
    }

    pub(crate) fn run(&mut self, settings: &IterationSettings) -> Result<TrajectoryPayload> {
        let trajectory = self
            .game
            .iterate(settings)
            .context("Affine iteration failed")?;
        Ok(TrajectoryPayload::from(trajectory))
    }
}

#[wasm_bindgen]
impl WasmAffineGame {
    /// `coefficients` holds `[a, b, c, d, e, f]` for each map in turn.
    #[wasm_bindgen(constructor)]
    pub fn new(coefficients: Vec<f64>, probabilities: Vec<f64>) -> Result<WasmAffineGame, JsValue> {
        crate::init_runtime();
        Self::build(&coefficients, &probabilities).map_err(to_js_error)
    }

    pub fn barnsley_fern() -> Result<WasmAffineGame, JsValue> {
        crate::init_runtime();
        Self::fern().map_err(to_js_error)
    }

    pub fn map_count(&self) -> usize {
        self.game.system().maps().len()
    }

    pub fn iterate(&mut self, settings_val: JsValue) -> Result<JsValue, JsValue> {
        let settings = settings_from_js(settings_val)?;
        let payload = self.run(&settings).map_err(to_js_error)?;
        to_js(&payload)
    }
}
