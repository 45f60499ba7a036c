//! Numerical methods for advancing ODE systems
//!
//! # Available Methods
//!
//! ## Explicit Time-Stepping Methods
//!
//! - **[`Rk4Integrator`]**: Classical fourth-order Runge-Kutta with a fixed step
//!   - Order: Fourth-order O(h⁴)
//!   - Cost: 4 derivative evaluations per step
//!   - Lands exactly on every query time with a shortened final step
//!
//! [`rk4_step`] exposes the single step as a pure function, for callers that
//! manage time themselves.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod rk4;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use rk4::{Rk4Integrator, rk4_step};
