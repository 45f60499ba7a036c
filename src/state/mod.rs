//! ODE state and right-hand side
//!
//! This module provides the two inputs of an integration:
//!
//! - **State vector** ([`VectorState`]): the `n` real values describing the
//!   system at one instant
//! - **Derivative function** ([`DerivativeFunction`]): the right-hand side
//!   `f(t, y)` of `dy/dt = f(t, y)`
//!
//! # Architecture
//!
//! The derivative function is **separate from the integrator**:
//! - The function provides the **equations**
//! - The integrator provides the **method** to advance them
//!
//! The same function can be integrated from many initial values or with
//! different step sizes, and the same integrator code serves every system.
//!
//! # Implementing a New System
//!
//! ```rust
//! use ode_rs::error::DerivativeError;
//! use ode_rs::state::{DerivativeFunction, VectorState};
//!
//! /// Logistic growth dy/dt = r·y·(1 - y)
//! struct Logistic {
//!     rate: f64,
//! }
//!
//! impl DerivativeFunction for Logistic {
//!     fn evaluate(&self, _t: f64, y: &VectorState) -> Result<VectorState, DerivativeError> {
//!         Ok(VectorState::from_vec(vec![self.rate * y[0] * (1.0 - y[0])]))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Logistic"
//!     }
//! }
//! ```

// module declaration
pub mod traits;
pub mod vector;

// re-export commonly used types for convenience
pub use traits::DerivativeFunction;
pub use vector::VectorState;
