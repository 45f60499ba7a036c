//! Ready-made ODE systems
//!
//! All models implement [`DerivativeFunction`](crate::state::DerivativeFunction).
//! They hold only their parameters, so one instance can be shared by any
//! number of integrators, including across threads.
//!
//! # Available Models
//!
//! ## [`Lorenz`] — chaotic convection
//!
//! Three-component system with the classical attractor parameters as default.
//!
//! ## [`ExponentialGrowth`] — `dy/dt = r·y`
//!
//! Componentwise growth or decay with a closed-form solution.
//!
//! ## [`HarmonicOscillator`] — `x'' = -ω²·x`
//!
//! Two-component oscillator with a closed-form solution and a conserved energy.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod exponential;
pub mod harmonic;
pub mod lorenz;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use exponential::ExponentialGrowth;
pub use harmonic::HarmonicOscillator;
pub use lorenz::Lorenz;
