//! Mock ODE systems for testing
//!
//! Systems with known solutions or deliberately broken behaviour, used to
//! check the integrator's accuracy and its error paths.

#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use ode_rs::error::DerivativeError;
use ode_rs::state::{DerivativeFunction, VectorState};

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c
///
/// Analytical solution: y(t) = y₀ + c*t
///
/// RK4 is exact for this problem, whatever the step size.
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(growth_rate: f64) -> Self {
        Self { growth_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 + self.growth_rate * t
    }
}

impl DerivativeFunction for ConstantGrowth {
    fn evaluate(&self, _t: f64, y: &VectorState) -> Result<VectorState, DerivativeError> {
        Ok(VectorState::uniform(y.len(), self.growth_rate))
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Counting System: dy/dt = y, counting evaluations
// =================================================================================================

/// dy/dt = y, counting how often it is evaluated
///
/// The counter is atomic so the system stays `Sync` and can be shared by
/// ensemble members.
#[derive(Default)]
pub struct CountingSystem {
    evaluations: AtomicUsize,
}

impl CountingSystem {
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl DerivativeFunction for CountingSystem {
    fn evaluate(&self, _t: f64, y: &VectorState) -> Result<VectorState, DerivativeError> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        Ok(y.clone())
    }
}

// =================================================================================================
// Truncating System: returns too few components
// =================================================================================================

/// Returns a derivative with `output_len` components whatever the input
pub struct TruncatingSystem {
    pub output_len: usize,
}

impl DerivativeFunction for TruncatingSystem {
    fn evaluate(&self, _t: f64, _y: &VectorState) -> Result<VectorState, DerivativeError> {
        Ok(VectorState::zeros(self.output_len))
    }
}

// =================================================================================================
// Failing System: dy/dt = y until a blow-up time
// =================================================================================================

/// Error returned by [`FailingAfter`]
#[derive(Debug)]
pub struct BlowUp {
    pub time: f64,
}

impl fmt::Display for BlowUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solution blows up at t = {}", self.time)
    }
}

impl std::error::Error for BlowUp {}

/// dy/dt = y, failing for every evaluation past `blow_up_time`
pub struct FailingAfter {
    pub blow_up_time: f64,
}

impl DerivativeFunction for FailingAfter {
    fn evaluate(&self, t: f64, y: &VectorState) -> Result<VectorState, DerivativeError> {
        if t > self.blow_up_time {
            return Err(Box::new(BlowUp { time: t }));
        }
        Ok(y.clone())
    }

    fn name(&self) -> &str {
        "Failing System"
    }
}
