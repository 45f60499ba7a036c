//! Runge-Kutta 4 (RK4) fixed-step integrator
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method advances
//!
//! ```text
//! dy/dt = f(t, y)
//! ```
//!
//! by a weighted average of four slope estimates:
//!
//! ```text
//! k₁ = f(tₙ,        yₙ)
//! k₂ = f(tₙ + h/2,  yₙ + h/2·k₁)
//! k₃ = f(tₙ + h/2,  yₙ + h/2·k₂)
//! k₄ = f(tₙ + h,    yₙ + h·k₃)
//!
//! yₙ₊₁ = yₙ + h/6·(k₁ + 2k₂ + 2k₃ + k₄)
//! tₙ₊₁ = tₙ + h
//! ```
//!
//! # Characteristics
//!
//! - **Order**: local truncation error O(h⁵), global error O(h⁴)
//! - **Cost**: 4 derivative evaluations per step
//! - **Step size**: fixed; the last step towards a query time is shortened so
//!   that the integrator lands exactly on it
//!
//! Halving `h` reduces the global error by a factor of about 16.
//!
//! # Example
//!
//! ```rust
//! use ode_rs::models::Lorenz;
//! use ode_rs::solver::Rk4Integrator;
//! use ode_rs::state::VectorState;
//!
//! # fn main() -> ode_rs::error::Result<()> {
//! let lorenz = Lorenz::default();
//!
//! let mut rk4 = Rk4Integrator::new();
//! rk4.set_derivative_function(&lorenz);
//! rk4.set_initial_time(0.0);
//! rk4.set_initial_value(VectorState::from([1.0, 0.0, 0.0]));
//! rk4.set_step_size(0.1)?;
//!
//! for i in 0..=5 {
//!     let t = 0.2 * i as f64;
//!     let y = rk4.advance_to(t)?.clone();
//!     println!("{:.2}: {:.14} ({} steps)", t, y, rk4.iterations_needed());
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use crate::error::{IntegrationError, Result};
use crate::solver::configuration::{IntegratorConfiguration, validate_step_size};
use crate::state::{DerivativeFunction, VectorState};

/// Multiple of the machine epsilon (relative to the time magnitude) within
/// which a remaining distance counts as rounding noise of the step grid
const ROUNDING_ULPS: f64 = 8.0;

// =================================================================================================
// Single step
// =================================================================================================

/// Advance `y` from `t` by one classical RK4 step of size `h`
///
/// Pure: the only effect is the returned value, which is `y(t + h)`. The
/// derivative is evaluated exactly four times, at `(t, y)`,
/// `(t + h/2, y + h/2·k₁)`, `(t + h/2, y + h/2·k₂)` and `(t + h, y + h·k₃)`, in
/// that order.
///
/// # Errors
///
/// - `DimensionMismatch` when a stage returns a vector whose length differs from `y`
/// - `Derivative` when `f` itself fails
pub fn rk4_step<F>(f: &F, t: f64, y: &VectorState, h: f64) -> Result<VectorState>
where
    F: DerivativeFunction + ?Sized,
{
    let half = 0.5 * h;

    // Stage 1: slope at the beginning of the interval
    let k1 = evaluate_stage(f, t, y)?;

    // Stage 2: slope at the midpoint, predicted with k₁
    let k2 = evaluate_stage(f, t + half, &y.scaled_add(half, &k1)?)?;

    // Stage 3: slope at the midpoint, predicted with k₂
    let k3 = evaluate_stage(f, t + half, &y.scaled_add(half, &k2)?)?;

    // Stage 4: slope at the end of the interval, predicted with k₃
    let k4 = evaluate_stage(f, t + h, &y.scaled_add(h, &k3)?)?;

    // Simpson weights: k₁ + 2k₂ + 2k₃ + k₄
    let mut slope = k1;
    slope.scaled_add_assign(2.0, &k2)?;
    slope.scaled_add_assign(2.0, &k3)?;
    slope.scaled_add_assign(1.0, &k4)?;

    y.scaled_add(h / 6.0, &slope)
}

/// Evaluate `f(t, y)` and check the output keeps the state dimension
fn evaluate_stage<F>(f: &F, t: f64, y: &VectorState) -> Result<VectorState>
where
    F: DerivativeFunction + ?Sized,
{
    let dy = f.evaluate(t, y).map_err(IntegrationError::Derivative)?;
    y.check_dimension(&dy)?;
    Ok(dy)
}

/// Number of steps (full ones plus a final, possibly shorter one) needed to
/// cover `distance` with step `h`
///
/// `tolerance` only absorbs rounding noise at a step boundary into the last
/// step; any positive distance takes at least one step.
fn steps_required(distance: f64, h: f64, tolerance: f64) -> usize {
    if distance <= 0.0 {
        return 0;
    }
    ((distance - tolerance) / h).ceil().max(1.0) as usize
}

// =================================================================================================
// RK4 Integrator
// =================================================================================================

/// Stateful classical RK4 integrator
///
/// Owns the current time, the current value and the step size, and borrows
/// the derivative function for its whole lifetime `'f`.
///
/// # Lifecycle
///
/// 1. Create with [`new`](Self::new)
/// 2. Configure: derivative function, initial time, initial value, step size
///    (any order; all four are required)
/// 3. Query with [`advance_to`](Self::advance_to) at non-decreasing times
///
/// [`with_configuration`](Self::with_configuration) does steps 1 and 2 at once.
///
/// # Step counting
///
/// [`iterations_needed`](Self::iterations_needed) reports the steps taken by
/// the most recent `advance_to` call only; it is recomputed, not accumulated.
/// The cumulative count since configuration is
/// [`total_steps`](Self::total_steps).
///
/// # Concurrency
///
/// `advance_to` takes `&mut self`: one integrator cannot be advanced from two
/// threads at once without external synchronisation. Independent integrators
/// share nothing and may run in parallel (see [`crate::solver::ensemble`]).
pub struct Rk4Integrator<'f, F: ?Sized> {
    derivative: Option<&'f F>,
    initial_time: Option<f64>,
    initial_value: Option<VectorState>,
    step_size: Option<f64>,
    max_steps: Option<usize>,

    current_time: f64,
    current_value: Option<VectorState>,

    iterations_needed: usize,
    total_steps: usize,
}

impl<'f, F> Default for Rk4Integrator<'f, F>
where
    F: DerivativeFunction + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'f, F> Rk4Integrator<'f, F>
where
    F: DerivativeFunction + ?Sized,
{
    /// Create an unconfigured integrator
    pub fn new() -> Self {
        Self {
            derivative: None,
            initial_time: None,
            initial_value: None,
            step_size: None,
            max_steps: None,
            current_time: 0.0,
            current_value: None,
            iterations_needed: 0,
            total_steps: 0,
        }
    }

    /// Create a fully configured integrator
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `configuration` fails validation.
    pub fn with_configuration(f: &'f F, configuration: IntegratorConfiguration) -> Result<Self> {
        configuration.validate()?;

        let mut integrator = Self::new();
        integrator.set_derivative_function(f);
        integrator.set_initial_time(configuration.initial_time);
        integrator.set_initial_value(configuration.initial_value);
        integrator.set_step_size(configuration.step_size)?;
        integrator.set_max_steps(configuration.max_steps)?;

        Ok(integrator)
    }

    // ====== Configuration ======

    /// Set the right-hand side `f(t, y)`
    pub fn set_derivative_function(&mut self, f: &'f F) {
        self.derivative = Some(f);
    }

    /// Set the initial time and restart the integration from it
    pub fn set_initial_time(&mut self, t0: f64) {
        self.initial_time = Some(t0);
        self.restart();
    }

    /// Set the initial value, fixing the dimension of the system
    ///
    /// Restarts the integration from the initial time.
    pub fn set_initial_value(&mut self, y0: impl Into<VectorState>) {
        self.initial_value = Some(y0.into());
        self.restart();
    }

    /// Set the fixed step size
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` unless `h` is finite and strictly positive. The
    /// previous step size is kept in that case.
    pub fn set_step_size(&mut self, h: f64) -> Result<()> {
        validate_step_size(h)?;
        self.step_size = Some(h);
        Ok(())
    }

    /// Bound the number of steps a single [`advance_to`](Self::advance_to) may take
    ///
    /// `None` removes the bound.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for a budget of zero.
    pub fn set_max_steps(&mut self, max_steps: Option<usize>) -> Result<()> {
        if max_steps == Some(0) {
            return Err(IntegrationError::invalid("step budget must be greater than 0"));
        }
        self.max_steps = max_steps;
        Ok(())
    }

    /// Rewind to the initial time and value and clear the step counters
    fn restart(&mut self) {
        self.current_time = self.initial_time.unwrap_or(0.0);
        self.current_value = self.initial_value.clone();
        self.iterations_needed = 0;
        self.total_steps = 0;
    }

    // ====== Queries ======

    /// True once derivative function, initial time, initial value and step size are all set
    pub fn is_configured(&self) -> bool {
        self.derivative.is_some()
            && self.initial_time.is_some()
            && self.initial_value.is_some()
            && self.step_size.is_some()
    }

    /// Current integration time
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// State at [`current_time`](Self::current_time), once an initial value is set
    pub fn current_value(&self) -> Option<&VectorState> {
        self.current_value.as_ref()
    }

    /// Configured step size
    pub fn step_size(&self) -> Option<f64> {
        self.step_size
    }

    /// Configured step budget per advance call
    pub fn max_steps(&self) -> Option<usize> {
        self.max_steps
    }

    /// Dimension `n` of the system, once an initial value is set
    pub fn dimension(&self) -> Option<usize> {
        self.current_value.as_ref().map(VectorState::len)
    }

    /// Steps (full and partial) taken by the most recent advance call
    pub fn iterations_needed(&self) -> usize {
        self.iterations_needed
    }

    /// Steps taken since the integration was (re)started
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    // ====== Integration ======

    /// Integrate up to `target` and return the state there
    ///
    /// Takes full steps of the configured size while they fit before `target`,
    /// then one final step of exactly the remaining distance, so that the
    /// integrator lands on `target`. Full-step times are computed from the
    /// starting time and the step index, not by repeated addition. A target
    /// equal to the current time takes zero steps and returns the current value;
    /// any later target, however close, takes at least one step.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` when any configuration item is missing
    /// - `InvalidConfiguration` for a non-finite target
    /// - `BackwardIntegration` when `target` lies before the current time
    /// - `StepBudgetExceeded` when more steps than the budget would be needed
    /// - `DimensionMismatch` when the derivative returns a vector of the wrong length
    /// - `Derivative` when the derivative function fails
    ///
    /// On failure the integrator keeps its last committed time and value: a
    /// rejected request commits nothing, and a step that fails midway is not
    /// committed (steps completed before it in the same call are).
    /// [`iterations_needed`](Self::iterations_needed) always describes this
    /// call, so it is 0 after a rejected request.
    pub fn advance_to(&mut self, target: f64) -> Result<&VectorState> {
        self.iterations_needed = 0;

        let f = self.derivative.ok_or(IntegrationError::NotConfigured("derivative function"))?;
        if self.initial_time.is_none() {
            return Err(IntegrationError::NotConfigured("initial time"));
        }
        let mut value = self
            .current_value
            .take()
            .ok_or(IntegrationError::NotConfigured("initial value"))?;
        let h = match self.step_size {
            Some(h) => h,
            None => {
                self.current_value = Some(value);
                return Err(IntegrationError::NotConfigured("step size"));
            }
        };

        let outcome = self.integrate(f, h, target, &mut value);
        let value = self.current_value.insert(value);
        outcome?;

        Ok(&*value)
    }

    /// Stepping loop of [`advance_to`](Self::advance_to); commits into `value` step by step
    fn integrate(&mut self, f: &F, h: f64, target: f64, value: &mut VectorState) -> Result<()> {
        if !target.is_finite() {
            return Err(IntegrationError::invalid(format!(
                "target time must be finite (got {})",
                target
            )));
        }

        let start = self.current_time;
        if target < start {
            return Err(IntegrationError::BackwardIntegration { current: start, target });
        }

        let tolerance = ROUNDING_ULPS * f64::EPSILON * f64::max(start.abs(), target.abs());
        let steps = steps_required(target - start, h, tolerance);

        if let Some(budget) = self.max_steps
            && steps > budget
        {
            return Err(IntegrationError::StepBudgetExceeded { budget, required: steps });
        }

        let mut warned = false;

        for k in 0..steps {
            let t = self.current_time;

            // The last step covers exactly what is left, full or partial
            let (step, t_next) = if k + 1 < steps {
                (h, start + (k + 1) as f64 * h)
            } else {
                (target - t, target)
            };

            let next = rk4_step(f, t, value, step)?;

            *value = next;
            self.current_time = t_next;
            self.iterations_needed += 1;
            self.total_steps += 1;

            log::trace!("{}: step {} of {}, t = {}, h = {}", f.name(), k + 1, steps, t_next, step);

            if !warned && !value.is_finite() {
                log::warn!(
                    "{}: state became non-finite at t = {}; consider a smaller step size",
                    f.name(),
                    t_next
                );
                warned = true;
            }
        }

        log::debug!(
            "{}: advanced from t = {} to t = {} in {} steps",
            f.name(),
            start,
            target,
            steps
        );

        Ok(())
    }
}

impl<F: ?Sized> fmt::Debug for Rk4Integrator<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rk4Integrator")
            .field("has derivative", &self.derivative.is_some())
            .field("initial time", &self.initial_time)
            .field("dimension", &self.initial_value.as_ref().map(VectorState::len))
            .field("step size", &self.step_size)
            .field("max steps", &self.max_steps)
            .field("current time", &self.current_time)
            .field("current value", &self.current_value)
            .field("iterations needed", &self.iterations_needed)
            .field("total steps", &self.total_steps)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
