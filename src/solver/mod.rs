//! Numerical integration
//!
//! This module advances an ODE system `dy/dt = f(t, y)` in time with the
//! classical fixed-step Runge-Kutta 4 method.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Derivative function** ([`DerivativeFunction`](crate::state::DerivativeFunction)) - WHAT to integrate
//!    - The right-hand side of the system
//!    - Pluggable, borrowed by the integrator
//!
//! 2. **Configuration** ([`IntegratorConfiguration`]) - WHERE to start and HOW FINE
//!    - Initial time and value
//!    - Fixed step size, optional step budget
//!
//! 3. **Integrator** ([`Rk4Integrator`]) - The numerical method
//!    - Owns current time and value
//!    - Advances monotonically to each query time
//!    - Reports the steps each query needed
//!
//! # Module Organization
//!
//! - **`methods`**: the RK4 single-step formula ([`rk4_step`]) and the
//!   stateful [`Rk4Integrator`]
//! - **`configuration`**: [`IntegratorConfiguration`] and its validation
//! - **`trajectory`**: sampling a list of query times into a [`Trajectory`]
//! - **`ensemble`**: many independent integrations, optionally in parallel
//!
//! # Quick Start Example
//!
//! ```rust
//! use ode_rs::models::Lorenz;
//! use ode_rs::solver::{IntegratorConfiguration, Rk4Integrator};
//!
//! # fn main() -> ode_rs::error::Result<()> {
//! let lorenz = Lorenz::default();
//! let config = IntegratorConfiguration::new(0.0, [1.0, 0.0, 0.0], 0.1);
//! let mut rk4 = Rk4Integrator::with_configuration(&lorenz, config)?;
//!
//! let y = rk4.advance_to(0.2)?;
//! assert_eq!(y.len(), 3);
//! assert_eq!(rk4.iterations_needed(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────────┐   ┌──────────────────────────┐
//! │ Derivative function │   │ Integrator configuration │
//! └──────────┬──────────┘   └────────────┬─────────────┘
//!            └──────────────┬────────────┘
//!                  ┌────────▼────────┐
//!                  │  Rk4Integrator  │ ← owns t, y, h
//!                  └────────┬────────┘
//!                           │ advance_to(T₁), advance_to(T₂), ...
//!                  ┌────────▼────────┐
//!                  │  y(T), steps    │
//!                  └─────────────────┘
//! ```
//!
//! # Time Step Selection
//!
//! RK4 is explicit: `h` must stay below the stability limit of the system
//! (problem-dependent). Halving `h` costs twice the evaluations and reduces
//! the global error by about 16.
//!
//! # Error Handling
//!
//! All operations return [`crate::error::Result`]:
//!
//! ```rust
//! # use ode_rs::models::Lorenz;
//! # use ode_rs::solver::{IntegratorConfiguration, Rk4Integrator};
//! # use ode_rs::error::IntegrationError;
//! # let lorenz = Lorenz::default();
//! # let config = IntegratorConfiguration::new(1.0, [1.0, 0.0, 0.0], 0.1);
//! # let mut rk4 = Rk4Integrator::with_configuration(&lorenz, config).unwrap();
//! match rk4.advance_to(0.5) {
//!     Ok(y) => println!("y = {}", y),
//!     Err(IntegrationError::BackwardIntegration { current, target }) => {
//!         eprintln!("already at t = {}, cannot go back to {}", current, target);
//!     }
//!     Err(e) => eprintln!("integration failed: {}", e),
//! }
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod configuration;
mod trajectory;
pub mod ensemble;
pub mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Handing ensemble members to Rayon only pays off once there are enough of
// them. The threshold is an AtomicUsize so benchmarks and tests can change it
// at runtime; Relaxed ordering is enough for a performance hint.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of ensemble members from which [`integrate_ensemble()`]
/// runs them in parallel.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// [`integrate_ensemble()`] runs members sequentially when there are fewer
/// than this many, and on the Rayon pool otherwise, but only when the crate
/// is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use ode_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use ode_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(16);
/// assert_eq!(parallel_threshold(), 16);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that change the threshold.
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Holds a global lock while alive, so concurrently running tests see their
/// own value. Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use configuration::IntegratorConfiguration;
pub use ensemble::{EnsembleMember, integrate_ensemble};
pub use methods::{Rk4Integrator, rk4_step};
pub use trajectory::{Trajectory, TrajectoryPoint};

// =================================================================================================
// Tests
// =================================================================================================
