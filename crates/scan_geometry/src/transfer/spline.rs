//! 1-D interpolants used by transfer-function curves.
//!
//! Both interpolants expect strictly increasing knots (validated by
//! [`Curve::new`](super::Curve::new)) and evaluate in f64. Inside an interval
//! the value is written as `a * y_i + b * y_{i+1} + ...` with `a + b == 1`,
//! so evaluating exactly at a knot returns the knot value bit for bit.

/// Interval `i` such that `xs[i] <= x <= xs[i + 1]`, clamped to the end
/// intervals for points outside the knot range.
#[inline]
fn interval(xs: &[f64], x: f64) -> usize {
  xs.partition_point(|&k| k <= x)
    .saturating_sub(1)
    .min(xs.len() - 2)
}

/// Piecewise-linear interpolant.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearInterpolant {
  xs: Vec<f64>,
  ys: Vec<f64>,
}

impl LinearInterpolant {
  pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
    debug_assert!(xs.len() >= 2 && xs.len() == ys.len());
    Self { xs, ys }
  }

  pub fn evaluate(&self, x: f64) -> f64 {
    let i = interval(&self.xs, x);
    let h = self.xs[i + 1] - self.xs[i];
    let a = (self.xs[i + 1] - x) / h;
    let b = (x - self.xs[i]) / h;
    a * self.ys[i] + b * self.ys[i + 1]
  }
}

/// Cubic spline with not-a-knot end conditions.
///
/// Two knots degrade to a straight line and three knots to the parabola
/// through them. From four knots on, the third derivative is continuous
/// across the second and the second-to-last knot.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicSpline {
  xs: Vec<f64>,
  ys: Vec<f64>,
  /// Second derivative at each knot.
  second: Vec<f64>,
}

impl CubicSpline {
  pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
    debug_assert!(xs.len() >= 2 && xs.len() == ys.len());
    let second = not_a_knot_second_derivatives(&xs, &ys);
    Self { xs, ys, second }
  }

  pub fn evaluate(&self, x: f64) -> f64 {
    let i = interval(&self.xs, x);
    let h = self.xs[i + 1] - self.xs[i];
    let a = (self.xs[i + 1] - x) / h;
    let b = (x - self.xs[i]) / h;
    a * self.ys[i]
      + b * self.ys[i + 1]
      + ((a * a * a - a) * self.second[i] + (b * b * b - b) * self.second[i + 1]) * (h * h)
        / 6.0
  }
}

fn not_a_knot_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
  let n = xs.len();
  let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
  let slope: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

  match n {
    2 => return vec![0.0; 2],
    3 => {
      // Parabola: constant second derivative
      let m = 2.0 * (slope[1] - slope[0]) / (h[0] + h[1]);
      return vec![m; 3];
    }
    _ => {}
  }

  // Interior rows i = 1..=n-2:
  //   h[i-1] M[i-1] + 2 (h[i-1] + h[i]) M[i] + h[i] M[i+1] = 6 (slope[i] - slope[i-1])
  // with M[0] and M[n-1] eliminated through the not-a-knot conditions, which
  // leaves a diagonally dominant tridiagonal system in M[1..=n-2].
  let k = n - 2;
  let mut sub = vec![0.0; k];
  let mut diag = vec![0.0; k];
  let mut sup = vec![0.0; k];
  let mut rhs = vec![0.0; k];

  for j in 0..k {
    let i = j + 1;
    sub[j] = h[i - 1];
    diag[j] = 2.0 * (h[i - 1] + h[i]);
    sup[j] = h[i];
    rhs[j] = 6.0 * (slope[i] - slope[i - 1]);
  }

  // M[0] = ((h0 + h1) M[1] - h0 M[2]) / h1
  let (h0, h1) = (h[0], h[1]);
  diag[0] += h0 * (h0 + h1) / h1;
  sup[0] -= h0 * h0 / h1;
  sub[0] = 0.0;

  // M[n-1] = ((a + b) M[n-2] - b M[n-3]) / a
  let (a, b) = (h[n - 3], h[n - 2]);
  diag[k - 1] += b * (a + b) / a;
  sub[k - 1] -= b * b / a;
  sup[k - 1] = 0.0;

  let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs);

  let mut second = Vec::with_capacity(n);
  second.push(((h0 + h1) * interior[0] - h0 * interior[1]) / h1);
  second.extend_from_slice(&interior);
  second.push(((a + b) * interior[k - 1] - b * interior[k - 2]) / a);
  second
}

/// Thomas algorithm; `sub[0]` and `sup[n-1]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
  let n = diag.len();
  let mut c = vec![0.0; n];
  let mut d = vec![0.0; n];

  c[0] = sup[0] / diag[0];
  d[0] = rhs[0] / diag[0];
  for i in 1..n {
    let denom = diag[i] - sub[i] * c[i - 1];
    c[i] = sup[i] / denom;
    d[i] = (rhs[i] - sub[i] * d[i - 1]) / denom;
  }

  let mut x = vec![0.0; n];
  x[n - 1] = d[n - 1];
  for i in (0..n - 1).rev() {
    x[i] = d[i] - c[i] * x[i + 1];
  }
  x
}
