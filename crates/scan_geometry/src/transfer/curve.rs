//! Opacity curve fitted through user control points.

use super::linspace;
use super::spline::{CubicSpline, LinearInterpolant};
use crate::constants::TRANSFER_FUNCTION_SIZE;
use crate::error::{GeometryError, Result};

/// Fit used between control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveKind {
  #[default]
  Cubic,
  Linear,
}

#[derive(Clone, Debug, PartialEq)]
enum Interpolant {
  Cubic(CubicSpline),
  Linear(LinearInterpolant),
}

impl Interpolant {
  #[inline]
  fn evaluate(&self, x: f64) -> f64 {
    match self {
      Interpolant::Cubic(f) => f.evaluate(x),
      Interpolant::Linear(f) => f.evaluate(x),
    }
  }
}

/// Alpha-versus-intensity response and its rasterized lookup table.
///
/// Evaluation is flat outside the control points: below the first input the
/// first output is returned as stored, above the last input the last output.
/// Spline overshoot between points is clamped to [0, 1]. With a single
/// control point the curve is constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
  inputs: Vec<f32>,
  outputs: Vec<f32>,
  bounds: (f32, f32),
  kind: CurveKind,
  /// `None` for a constant curve.
  interpolant: Option<Interpolant>,
  /// 256 RGBA groups, flattened.
  transfer_function: Vec<f32>,
}

impl Curve {
  /// Fit a curve through `(inputs, outputs)` and rasterize it over `bounds`.
  ///
  /// # Errors
  /// `InvalidCurveDefinition` when the sequences differ in length, are
  /// empty, `inputs` is not strictly increasing or an output lies outside
  /// [0, 1].
  pub fn new(
    inputs: Vec<f32>,
    outputs: Vec<f32>,
    bounds: (f32, f32),
    kind: CurveKind,
  ) -> Result<Self> {
    let invalid = |reason| GeometryError::InvalidCurveDefinition {
      inputs: inputs.len(),
      outputs: outputs.len(),
      reason,
    };
    if inputs.len() != outputs.len() {
      return Err(invalid("length mismatch"));
    }
    if inputs.is_empty() {
      return Err(invalid("no control points"));
    }
    // Negated so NaN inputs are rejected as well
    if inputs.windows(2).any(|w| !(w[0] < w[1])) {
      return Err(invalid("inputs are not strictly increasing"));
    }
    if outputs.iter().any(|v| !(0.0..=1.0).contains(v)) {
      return Err(invalid("outputs outside [0, 1]"));
    }

    let interpolant = (inputs.len() > 1).then(|| {
      let xs: Vec<f64> = inputs.iter().map(|&v| v as f64).collect();
      let ys: Vec<f64> = outputs.iter().map(|&v| v as f64).collect();
      match kind {
        CurveKind::Cubic => Interpolant::Cubic(CubicSpline::new(xs, ys)),
        CurveKind::Linear => Interpolant::Linear(LinearInterpolant::new(xs, ys)),
      }
    });

    let mut curve = Self {
      inputs,
      outputs,
      bounds,
      kind,
      interpolant,
      transfer_function: Vec::new(),
    };
    curve.transfer_function = curve.rasterize();
    Ok(curve)
  }

  /// Alpha for a single intensity.
  #[inline]
  pub fn evaluate_one(&self, x: f32) -> f32 {
    let first = self.inputs[0];
    let last = self.inputs[self.inputs.len() - 1];
    if x < first {
      self.outputs[0]
    } else if x > last {
      self.outputs[self.outputs.len() - 1]
    } else {
      match &self.interpolant {
        Some(f) => (f.evaluate(x as f64) as f32).clamp(0.0, 1.0),
        None => self.outputs[0],
      }
    }
  }

  /// Alpha for every intensity in `xs`.
  pub fn evaluate(&self, xs: &[f32]) -> Vec<f32> {
    xs.iter().map(|&x| self.evaluate_one(x)).collect()
  }

  /// Grayscale ramp in RGB, fitted alpha in A, sampled evenly over `bounds`.
  fn rasterize(&self) -> Vec<f32> {
    let mut table = Vec::with_capacity(TRANSFER_FUNCTION_SIZE * 4);
    let ramp = linspace(0.0, 1.0, TRANSFER_FUNCTION_SIZE);
    let samples = linspace(self.bounds.0, self.bounds.1, TRANSFER_FUNCTION_SIZE);
    for (gray, x) in ramp.zip(samples) {
      table.extend_from_slice(&[gray, gray, gray, self.evaluate_one(x)]);
    }
    table
  }

  /// Flattened 256×4 lookup table for the renderer.
  pub fn transfer_function(&self) -> &[f32] {
    &self.transfer_function
  }

  pub fn inputs(&self) -> &[f32] {
    &self.inputs
  }

  pub fn outputs(&self) -> &[f32] {
    &self.outputs
  }

  pub fn bounds(&self) -> (f32, f32) {
    self.bounds
  }

  pub fn kind(&self) -> CurveKind {
    self.kind
  }

  /// True when fewer than two control points were given.
  pub fn is_constant(&self) -> bool {
    self.interpolant.is_none()
  }
}

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;
