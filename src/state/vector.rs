//! State vector type
//!
//! This module provides the fixed-length real vector that carries the state
//! of an ODE system, together with the elementwise combinations the stepping
//! formula needs.

use nalgebra::DVector;
use std::fmt;
use std::ops::Index;

use crate::error::{IntegrationError, Result};

/// State of an ODE system: an ordered sequence of `n` real values
///
/// The length `n` is fixed at construction. Combinations with another vector
/// require matching lengths and fail with
/// [`IntegrationError::DimensionMismatch`] otherwise; nothing is ever resized
/// behind the caller's back.
///
/// # Memory Layout
///
/// Backed by a heap-allocated `DVector<f64>`: 8n bytes.
///
/// # Examples
///
/// ```rust
/// use ode_rs::state::VectorState;
///
/// let y = VectorState::from_vec(vec![1.0, 0.0, 0.0]);
/// let k = VectorState::from_vec(vec![-10.0, 28.0, 0.0]);
///
/// // y + 0.5 * k
/// let stage = y.scaled_add(0.5, &k).unwrap();
/// assert_eq!(stage.as_slice(), &[-4.0, 14.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VectorState {
    values: DVector<f64>,
}

impl VectorState {

    // ======================================= constructors =======================================

    /// Create from a vector of values
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values: DVector::from_vec(values) }
    }

    /// Create from a slice of values
    pub fn from_slice(values: &[f64]) -> Self {
        Self { values: DVector::from_vec(values.to_vec()) }
    }

    /// Create from an existing DVector
    pub fn from_vector(values: DVector<f64>) -> Self {
        Self { values }
    }

    /// Create a zero vector of length `n`
    pub fn zeros(n: usize) -> Self {
        Self { values: DVector::zeros(n) }
    }

    /// Create a vector of length `n` with every component set to `value`
    pub fn uniform(n: usize, value: f64) -> Self {
        Self { values: DVector::from_element(n, value) }
    }

    // ========================================== Queries ==========================================

    /// Number of components
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|x| x.is_finite())
    }

    /// Component `i`, if it exists
    pub fn get(&self, i: usize) -> Option<f64> {
        self.as_slice().get(i).copied()
    }

    /// Fail with `DimensionMismatch` unless `other` has the same length
    pub fn check_dimension(&self, other: &VectorState) -> Result<()> {
        check_len(self.len(), other.len())
    }

    /// Largest absolute componentwise difference to `other`
    pub fn max_abs_diff(&self, other: &VectorState) -> Result<f64> {
        self.check_dimension(other)?;

        Ok(self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    // ======================================== Extractions ========================================

    /// Borrow the components as a slice
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// Borrow the underlying DVector
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }

    /// Consume into the underlying DVector
    pub fn into_inner(self) -> DVector<f64> {
        self.values
    }

    /// Iterate over the components
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    // ===================================== Scaled combinations ====================================

    /// Return `self + c·other`
    ///
    /// This is the only combination the RK4 stages need: every stage argument
    /// and the final update are of the form `y + c·k`.
    pub fn scaled_add(&self, c: f64, other: &VectorState) -> Result<VectorState> {
        self.check_dimension(other)?;
        Ok(Self { values: &self.values + &other.values * c })
    }

    /// In-place `self ← self + c·other`
    pub fn scaled_add_assign(&mut self, c: f64, other: &VectorState) -> Result<()> {
        self.check_dimension(other)?;
        self.values.axpy(c, &other.values, 1.0);
        Ok(())
    }
}

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(IntegrationError::DimensionMismatch { expected, found });
    }
    Ok(())
}

// ================================== Conversions ==================================

impl From<Vec<f64>> for VectorState {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl From<&[f64]> for VectorState {
    fn from(values: &[f64]) -> Self {
        Self::from_slice(values)
    }
}

impl<const N: usize> From<[f64; N]> for VectorState {
    fn from(values: [f64; N]) -> Self {
        Self::from_slice(&values)
    }
}

impl From<DVector<f64>> for VectorState {
    fn from(values: DVector<f64>) -> Self {
        Self::from_vector(values)
    }
}

impl Index<usize> for VectorState {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

// ================================== Scalar arithmetic ==================================

// Scaling never changes the length, so unlike vector-vector combinations it
// cannot fail and gets a plain operator.

impl std::ops::Mul<f64> for VectorState {
    type Output = VectorState;
    fn mul(self, scalar: f64) -> Self::Output {
        Self { values: self.values * scalar }
    }
}

impl std::ops::Mul<VectorState> for f64 {
    type Output = VectorState;
    fn mul(self, rhs: VectorState) -> Self::Output {
        rhs * self
    }
}

// ======================== Display ============================

/// Prints `(y0, y1, ...)`. A precision (`{:.14}`) applies to every component.
impl fmt::Display for VectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match f.precision() {
                Some(precision) => write!(f, "{:.*}", precision, value)?,
                None => write!(f, "{}", value)?,
            }
        }
        write!(f, ")")
    }
}

// ==================== Tests ====================
