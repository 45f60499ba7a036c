//! Exponential growth and decay
//!
//! `dy/dt = r·y`, applied to every component independently. The exact
//! solution `y(t) = y₀·exp(r·(t - t₀))` makes it the reference problem for
//! accuracy and convergence checks.

use crate::error::DerivativeError;
use crate::state::{DerivativeFunction, VectorState};

/// Linear growth (`rate > 0`) or decay (`rate < 0`)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialGrowth {
    /// Growth rate r [1/time]
    pub rate: f64,
}

impl ExponentialGrowth {
    /// Create a system with growth rate `rate`
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Exact solution at `t` of a component starting at `y0` at `t = 0`
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (self.rate * t).exp()
    }
}

impl DerivativeFunction for ExponentialGrowth {
    fn evaluate(&self, _t: f64, y: &VectorState) -> Result<VectorState, DerivativeError> {
        Ok(self.rate * y.clone())
    }

    fn name(&self) -> &str {
        "Exponential Growth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derivative_is_proportional() {
        let decay = ExponentialGrowth::new(-0.5);
        let dy = decay.evaluate(0.0, &VectorState::from([2.0, -4.0])).unwrap();

        assert_eq!(dy.as_slice(), &[-1.0, 2.0]);
    }

    #[test]
    fn test_analytical_solution() {
        let growth = ExponentialGrowth::new(1.0);

        assert_relative_eq!(growth.analytical_solution(0.0, 3.0), 3.0);
        assert_relative_eq!(growth.analytical_solution(1.0, 1.0), std::f64::consts::E);
    }
}
