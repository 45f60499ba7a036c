//! Derivative function contract
//!
//! This module defines the right-hand side of an ODE system `dy/dt = f(t, y)`
//! as the integrator sees it.

use crate::error::DerivativeError;
use crate::state::VectorState;

// =================================================================================================
// Derivative Function Trait
// =================================================================================================

/// Right-hand side of a first-order ODE system
///
/// # Responsibility
/// Evaluates `f(t, y)`. Does NOT integrate it (that's the integrator's job).
///
/// The function provides the equations, the integrator provides the numerics.
///
/// # Contract
/// - The returned vector must have the same length as `y`. The integrator
///   checks this and fails with `DimensionMismatch` otherwise.
/// - The integrator treats the function as pure: it may be called any number
///   of times with any arguments.
/// - An `Err` aborts the current step and reaches the caller unchanged.
///
/// # Closures
/// Any `Fn(f64, &VectorState) -> Result<VectorState, E>` implements this trait
/// when `E` converts into a boxed error:
///
/// ```rust
/// use ode_rs::state::{DerivativeFunction, VectorState};
///
/// let growth = |_t: f64, y: &VectorState| -> Result<VectorState, std::convert::Infallible> {
///     Ok(y.clone())
/// };
///
/// let dy = growth.evaluate(0.0, &VectorState::from_vec(vec![2.0])).unwrap();
/// assert_eq!(dy[0], 2.0);
/// ```
pub trait DerivativeFunction {
    /// Evaluate `f(t, y)`
    ///
    /// # Arguments
    /// * `t` - Time at which to evaluate
    /// * `y` - State at which to evaluate
    ///
    /// # Returns
    /// The derivative `dy/dt`, same length as `y`
    fn evaluate(&self, t: f64, y: &VectorState) -> Result<VectorState, DerivativeError>;

    /// Name of the system (used in log messages)
    fn name(&self) -> &str {
        "anonymous system"
    }
}

impl<F, E> DerivativeFunction for F
where
    F: Fn(f64, &VectorState) -> Result<VectorState, E>,
    E: Into<DerivativeError>,
{
    fn evaluate(&self, t: f64, y: &VectorState) -> Result<VectorState, DerivativeError> {
        self(t, y).map_err(Into::into)
    }
}
