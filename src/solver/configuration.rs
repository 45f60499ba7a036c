//! Integrator configuration
//!
//! Everything an [`Rk4Integrator`](crate::solver::Rk4Integrator) needs besides
//! the derivative function, gathered in one value that can be validated before
//! any integration starts.

use crate::error::{IntegrationError, Result};
use crate::state::VectorState;

// =================================================================================================
// Integrator configuration
// =================================================================================================

/// Configuration of a fixed-step integration
///
/// # Examples
///
/// ```rust
/// use ode_rs::solver::IntegratorConfiguration;
/// use ode_rs::state::VectorState;
///
/// let config = IntegratorConfiguration::new(
///     0.0,                                  // initial time
///     VectorState::from([1.0, 0.0, 0.0]),   // initial value
///     0.1,                                  // step size
/// )
/// .with_max_steps(10_000);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IntegratorConfiguration {
    /// Time of the initial value
    pub initial_time: f64,

    /// State at `initial_time`; fixes the dimension of the system
    pub initial_value: VectorState,

    /// Fixed step size (strictly positive)
    pub step_size: f64,

    /// Upper bound on the steps a single advance call may take
    pub max_steps: Option<usize>,
}

impl IntegratorConfiguration {
    /// Create a configuration without step budget
    pub fn new(initial_time: f64, initial_value: impl Into<VectorState>, step_size: f64) -> Self {
        Self {
            initial_time,
            initial_value: initial_value.into(),
            step_size,
            max_steps: None,
        }
    }

    /// Bound the number of steps a single advance call may take
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Validate that parameters are numerically meaningful
    pub fn validate(&self) -> Result<()> {
        if !self.initial_time.is_finite() {
            return Err(IntegrationError::invalid(format!(
                "initial time must be finite (got {})",
                self.initial_time
            )));
        }
        if self.initial_value.is_empty() {
            return Err(IntegrationError::invalid("initial value must have at least one component"));
        }
        if !self.initial_value.is_finite() {
            return Err(IntegrationError::invalid("initial value contains NaN or infinite components"));
        }
        validate_step_size(self.step_size)?;
        if let Some(budget) = self.max_steps
            && budget == 0
        {
            return Err(IntegrationError::invalid("step budget must be greater than 0"));
        }

        Ok(())
    }
}

/// Check that `h` is usable as a fixed step size
pub(crate) fn validate_step_size(h: f64) -> Result<()> {
    if !h.is_finite() || h <= 0.0 {
        return Err(IntegrationError::invalid(format!(
            "step size must be finite and strictly positive (got {})",
            h
        )));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
