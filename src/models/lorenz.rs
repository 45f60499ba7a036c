//! Lorenz system
//!
//! # Mathematical Background
//!
//! ```text
//! dx/dt = σ·(y - x)
//! dy/dt = x·(ρ - z) - y
//! dz/dt = x·y - β·z
//! ```
//!
//! Where:
//! - **σ** : Prandtl number
//! - **ρ** : Rayleigh number (scaled)
//! - **β** : Geometric factor
//!
//! With the classical parameters σ = 10, β = 8/3, ρ = 28 the trajectories
//! settle on the butterfly-shaped strange attractor. Nearby initial values
//! separate exponentially, which makes the system a good stress test for
//! step-size studies and ensembles.
//!
//! # Example
//!
//! ```rust
//! use ode_rs::models::Lorenz;
//! use ode_rs::state::{DerivativeFunction, VectorState};
//!
//! let lorenz = Lorenz::default();
//! let dy = lorenz.evaluate(0.0, &VectorState::from([1.0, 0.0, 0.0])).unwrap();
//!
//! assert_eq!(dy.as_slice(), &[-10.0, 28.0, 0.0]);
//! ```

use crate::error::{DerivativeError, IntegrationError};
use crate::state::{DerivativeFunction, VectorState};

/// Lorenz convection model
///
/// # Thread Safety
///
/// Only `f64` fields: `Send + Sync`, one instance can drive any number of
/// integrators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lorenz {
    /// σ
    pub sigma: f64,
    /// β
    pub beta: f64,
    /// ρ
    pub rho: f64,
}

impl Lorenz {
    /// Dimension of the state `(x, y, z)`
    pub const DIMENSION: usize = 3;

    /// Create a Lorenz system with the given parameters
    pub fn new(sigma: f64, beta: f64, rho: f64) -> Self {
        Self { sigma, beta, rho }
    }
}

/// σ = 10, β = 8/3, ρ = 28
impl Default for Lorenz {
    fn default() -> Self {
        Self::new(10.0, 8.0 / 3.0, 28.0)
    }
}

impl DerivativeFunction for Lorenz {
    fn evaluate(&self, _t: f64, state: &VectorState) -> Result<VectorState, DerivativeError> {
        let &[x, y, z] = state.as_slice() else {
            return Err(Box::new(IntegrationError::DimensionMismatch {
                expected: Self::DIMENSION,
                found: state.len(),
            }));
        };

        Ok(VectorState::from([
            self.sigma * (y - x),
            x * (self.rho - z) - y,
            x * y - self.beta * z,
        ]))
    }

    fn name(&self) -> &str {
        "Lorenz"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
