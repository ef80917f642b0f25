//! Serialized shapes handed to the JS plotting front end.

use anyhow::{Context, Result};
use attractor_core::color::Color;
use attractor_core::iteration::{IterationSettings, Trajectory};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Flat trajectory arrays: `points` holds `[x0, y0, x1, y1, ...]` and
/// `colors` holds `color_channels` values per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TrajectoryPayload {
    pub points: Vec<f64>,
    pub indices: Vec<u32>,
    pub colors: Vec<f64>,
    pub color_channels: usize,
}

impl From<&Trajectory> for TrajectoryPayload {
    fn from(trajectory: &Trajectory) -> Self {
        let color_channels = match trajectory.colors.first() {
            Some(Color::Rgb(_)) => 3,
            _ => 1,
        };
        let colors = trajectory
            .colors
            .iter()
            .flat_map(|color| match color {
                Color::Scalar(value) => vec![*value],
                Color::Rgb(rgb) => rgb.to_vec(),
            })
            .collect();
        Self {
            points: trajectory.flat_points(),
            indices: trajectory.indices.iter().map(|&k| k as u32).collect(),
            colors,
            color_channels,
        }
    }
}

/// Reads iteration settings, falling back to defaults for `undefined`/`null`.
pub(crate) fn settings_from_js(settings_val: JsValue) -> Result<IterationSettings, JsValue> {
    if settings_val.is_undefined() || settings_val.is_null() {
        return Ok(IterationSettings::default());
    }
    from_value(settings_val)
        .map_err(|e| JsValue::from_str(&format!("Invalid iteration settings: {}", e)))
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

/// Pairs flat `[x0, y0, ...]` input into coordinate columns.
pub(crate) fn unflatten_points(flat: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if flat.len() % 2 != 0 {
        anyhow::bail!("Flat point array has odd length {}.", flat.len());
    }
    Ok(flat.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip())
}

pub(crate) fn flatten_vertices(vertices: &[attractor_core::traits::Point]) -> Vec<f64> {
    vertices.iter().flat_map(|v| [v.x, v.y]).collect()
}

pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    values
        .iter()
        .position(|v| !v.is_finite())
        .map_or(Ok(()), |index| Err(anyhow::anyhow!("{what} entry {index} is not finite.")))
        .context("Input validation failed")
}
