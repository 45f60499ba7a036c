//! ode-rs: Fixed-Step Runge-Kutta Integration
//!
//! A small library for advancing systems of ordinary differential equations
//!
//! ```text
//! dy/dt = f(t, y),    y(t₀) = y₀,    y ∈ ℝⁿ
//! ```
//!
//! with the classical fourth-order Runge-Kutta method and a fixed step size.
//!
//! # Architecture
//!
//! ode-rs is built on two core principles:
//!
//! 1. **Separation of Equations and Numerics**
//!    - Derivative functions define the system (what to integrate)
//!    - The integrator provides the method (how to integrate)
//!
//! 2. **Stateful, Monotone Integration**
//!    - The integrator owns the current time and value
//!    - Each query advances from where the previous one stopped
//!    - The number of steps each query needed is reported
//!
//! # Quick Start
//!
//! ```rust
//! use ode_rs::prelude::*;
//!
//! # fn main() -> ode_rs::error::Result<()> {
//! // 1. Pick a system
//! let lorenz = Lorenz::default();
//!
//! // 2. Configure the integrator
//! let mut rk4 = Rk4Integrator::new();
//! rk4.set_derivative_function(&lorenz);
//! rk4.set_initial_time(0.0);
//! rk4.set_initial_value([1.0, 0.0, 0.0]);
//! rk4.set_step_size(0.1)?;
//!
//! // 3. Query increasing times
//! for i in 0..=5 {
//!     let t = 0.2 * i as f64;
//!     let y = rk4.advance_to(t)?.clone();
//!     println!("{:.2}: {:.14} ({} steps)", t, y, rk4.iterations_needed());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: one `debug`
//! record per advance call, one `trace` record per step, and a `warn` record
//! when the state becomes non-finite. Install any logger to see them.
//!
//! # Features
//!
//! - `parallel`: run [`solver::integrate_ensemble`] members on the Rayon pool
//!
//! # Modules
//!
//! - [`state`]: state vectors and derivative functions
//! - [`solver`]: the RK4 integrator, trajectories and ensembles
//! - [`models`]: ready-made systems
//! - [`error`]: error type

pub mod error;
pub mod models;
pub mod solver;
pub mod state;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use ode_rs::prelude::*;
    //! ```
    pub use crate::error::{DerivativeError, IntegrationError};
    pub use crate::models::{ExponentialGrowth, HarmonicOscillator, Lorenz};
    pub use crate::solver::{
        EnsembleMember, IntegratorConfiguration, Rk4Integrator, Trajectory, TrajectoryPoint,
        integrate_ensemble, rk4_step,
    };
    pub use crate::state::{DerivativeFunction, VectorState};
}
