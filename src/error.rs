//! Integration errors
//!
//! Every fallible operation of the crate returns [`Result<T>`], an alias over
//! [`IntegrationError`]. Errors are reported at the failing call and never
//! swallowed: after any failure the integrator keeps its last committed time
//! and value, so the caller can retry with corrected inputs.

use thiserror::Error;

/// Error type a derivative function may return.
///
/// Boxed so that any caller error type can travel through the integrator
/// untouched. Recover the original with [`downcast_ref`](std::error::Error).
pub type DerivativeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, IntegrationError>;

/// Failure of a configuration or integration request
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// Advance requested before configuration was complete.
    ///
    /// Carries the name of the first missing item.
    #[error("integrator is not configured: {0} has not been set")]
    NotConfigured(&'static str),

    /// A configuration value was rejected (non-positive step size, ...)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two vectors that must share the state dimension do not.
    #[error("dimension mismatch: expected a vector of length {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Target time lies before the current integration time.
    #[error("cannot integrate backwards from t = {current} to t = {target}")]
    BackwardIntegration { current: f64, target: f64 },

    /// Reaching the target would take more steps than the configured budget.
    #[error("reaching the target needs {required} steps, budget is {budget}")]
    StepBudgetExceeded { budget: usize, required: usize },

    /// Error raised by the caller's derivative function, passed through as is.
    #[error(transparent)]
    Derivative(DerivativeError),
}

impl IntegrationError {
    /// Build an [`IntegrationError::InvalidConfiguration`] from any message
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Original error of a failed derivative evaluation, if that is what this is
    pub fn derivative_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            IntegrationError::Derivative(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
