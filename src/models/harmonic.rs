//! Undamped harmonic oscillator
//!
//! # Mathematical Background
//!
//! The second-order equation `x'' = -ω²·x` written as a first-order system
//! on the state `(x, v)`:
//!
//! ```text
//! dx/dt = v
//! dv/dt = -ω²·x
//! ```
//!
//! The energy `E = (v² + ω²·x²)/2` is conserved by the exact flow. RK4 does not
//! conserve it exactly but drifts only at order h⁴, which the integration tests
//! use as an accuracy probe.

use crate::error::{DerivativeError, IntegrationError};
use crate::state::{DerivativeFunction, VectorState};

/// Harmonic oscillator with angular frequency ω
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicOscillator {
    /// Angular frequency ω [rad/time]
    pub omega: f64,
}

impl HarmonicOscillator {
    /// Create an oscillator with angular frequency `omega`
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Exact `(x, v)` at `t` for the initial state `(x0, v0)` at `t = 0`
    pub fn analytical_solution(&self, t: f64, x0: f64, v0: f64) -> VectorState {
        let (sin, cos) = (self.omega * t).sin_cos();
        VectorState::from([
            x0 * cos + v0 / self.omega * sin,
            -x0 * self.omega * sin + v0 * cos,
        ])
    }

    /// Energy `(v² + ω²·x²)/2` of a state
    pub fn energy(&self, state: &VectorState) -> f64 {
        let (x, v) = (state[0], state[1]);
        0.5 * (v * v + self.omega * self.omega * x * x)
    }
}

impl DerivativeFunction for HarmonicOscillator {
    fn evaluate(&self, _t: f64, state: &VectorState) -> Result<VectorState, DerivativeError> {
        match state.as_slice() {
            &[x, v] => Ok(VectorState::from([v, -self.omega * self.omega * x])),
            other => Err(Box::new(IntegrationError::DimensionMismatch {
                expected: 2,
                found: other.len(),
            })),
        }
    }

    fn name(&self) -> &str {
        "Harmonic Oscillator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_analytical_solution_period() {
        let oscillator = HarmonicOscillator::new(2.0);

        let state = oscillator.analytical_solution(PI, 1.0, 0.0);

        assert_relative_eq!(state[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(state[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_energy_along_exact_solution() {
        let oscillator = HarmonicOscillator::new(3.0);
        let e0 = oscillator.energy(&VectorState::from([0.5, 1.0]));

        for t in [0.1, 0.7, 2.3] {
            let state = oscillator.analytical_solution(t, 0.5, 1.0);
            assert_relative_eq!(oscillator.energy(&state), e0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_wrong_dimension_is_an_error() {
        let oscillator = HarmonicOscillator::new(1.0);
        assert!(oscillator.evaluate(0.0, &VectorState::zeros(3)).is_err());
    }
}
