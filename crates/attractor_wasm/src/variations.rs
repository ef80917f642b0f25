//! Nonlinear variation transforms exposed to JS.

use crate::chaos::WasmChaosGame;
use crate::payload::{ensure_finite, to_js, to_js_error, unflatten_points};
use anyhow::{Context, Result};
use attractor_core::variations::{blend, TransformedPoints, Variation, Variations};
use wasm_bindgen::prelude::*;

pub(crate) fn transform_flat(name: &str, flat_points: &[f64]) -> Result<TransformedPoints> {
    let (xs, ys) = unflatten_points(flat_points)?;
    let variations = Variations::new(xs, ys, name).context("Cannot build variation")?;
    Ok(variations.transform())
}

pub(crate) fn blend_flat(first: &[f64], second: &[f64], weight: f64) -> Result<TransformedPoints> {
    ensure_finite(&[weight], "weight")?;
    let (u1, v1) = unflatten_points(first)?;
    let (u2, v2) = unflatten_points(second)?;
    let blended = blend(
        &TransformedPoints { u: u1, v: v1 },
        &TransformedPoints { u: u2, v: v2 },
        weight,
    )
    .context("Cannot blend variations")?;
    Ok(blended)
}

/// Names accepted by the transform functions, in display order.
#[wasm_bindgen]
pub fn variation_names() -> Vec<String> {
    Variation::ALL.iter().map(|v| v.name().to_string()).collect()
}

/// Applies the named variation to `[x0, y0, x1, y1, ...]`.
#[wasm_bindgen]
pub fn transform_variation(name: &str, flat_points: Vec<f64>) -> Result<JsValue, JsValue> {
    let transformed = transform_flat(name, &flat_points).map_err(to_js_error)?;
    to_js(&transformed)
}

/// Blends two transformed clouds, each given as `[u0, v0, u1, v1, ...]`.
#[wasm_bindgen]
pub fn blend_variations(first: Vec<f64>, second: Vec<f64>, weight: f64) -> Result<JsValue, JsValue> {
    let blended = blend_flat(&first, &second, weight).map_err(to_js_error)?;
    to_js(&blended)
}

#[wasm_bindgen]
impl WasmChaosGame {
    /// Applies the named variation to the last trajectory, y mirrored.
    pub fn transform_trajectory(&self, name: &str) -> Result<JsValue, JsValue> {
        let variation: Variation = name
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        let trajectory = self
            .game
            .trajectory()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&Variations::from_trajectory(trajectory, variation).transform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variation_names_lists_all_nine() {
        let names = variation_names();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "linear");
        assert_eq!(names[8], "fisheye");
    }

    #[test]
    fn transform_flat_applies_identity() {
        let out = transform_flat("linear", &[0.5, -0.25, 1.0, 2.0]).expect("transform");
        assert_eq!(out.u, vec![0.5, 1.0]);
        assert_eq!(out.v, vec![-0.25, 2.0]);
    }

    #[test]
    fn transform_flat_rejects_unknown_name() {
        let err = transform_flat("spiral", &[0.0, 0.0]).expect_err("unknown name");
        let message = format!("{:#}", err);
        assert!(message.contains("Unknown transformation name: spiral"), "got {message}");
    }

    #[test]
    fn blend_flat_mixes_columns() {
        let out = blend_flat(&[0.0, 0.0, 2.0, 2.0], &[1.0, 1.0, 4.0, 0.0], 0.5).expect("blend");
        assert_eq!(out.u, vec![0.5, 3.0]);
        assert_eq!(out.v, vec![0.5, 1.0]);
        assert!(blend_flat(&[0.0, 0.0], &[1.0, 1.0], 2.0).is_err());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::chaos::WasmChaosGame;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn transform_trajectory_requires_iteration() {
        let game = WasmChaosGame::new(3.0, 0.5).expect("game");
        let message = game
            .transform_trajectory("sinusoidal")
            .err()
            .and_then(|e| e.as_string())
            .unwrap_or_default();
        assert!(message.contains("No trajectory"));
    }

    #[wasm_bindgen_test]
    fn transform_trajectory_rejects_unknown_name() {
        let mut game = WasmChaosGame::new(3.0, 0.5).expect("game");
        game.iterate(JsValue::UNDEFINED).expect("iterate");
        let message = game
            .transform_trajectory("spiral")
            .err()
            .and_then(|e| e.as_string())
            .unwrap_or_default();
        assert!(message.contains("Unknown transformation name"));
    }
}
