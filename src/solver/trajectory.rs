//! Sampled trajectories
//!
//! A [`Trajectory`] collects the state of a system at a sequence of query
//! times, together with the number of steps each query needed. It is what
//! [`Rk4Integrator::sample`] returns.

use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::solver::methods::Rk4Integrator;
use crate::state::{DerivativeFunction, VectorState};

/// State of the system at one query time
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryPoint {
    /// Query time
    pub time: f64,

    /// Integrated state at `time`
    pub value: VectorState,

    /// Steps the integrator took to get here from the previous point
    pub iterations: usize,
}

/// `t: (y0, y1, ...) (n steps)`; a precision applies to the state components.
impl fmt::Display for TrajectoryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.2}: {:.*}", self.time, precision, self.value)?,
            None => write!(f, "{:.2}: {}", self.time, self.value)?,
        }
        write!(f, " ({} steps)", self.iterations)
    }
}

/// States of a system at successive query times
///
/// # Metadata
///
/// Free-form key/value pairs describing how the trajectory was produced
/// (solver, system name, step size, derivative evaluations).
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,

    /// Description of the run
    pub metadata: HashMap<String, String>,
}

impl Trajectory {
    /// Create an empty trajectory with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            metadata: HashMap::new(),
        }
    }

    /// Append a point
    pub fn push(&mut self, point: TrajectoryPoint) {
        self.points.push(point);
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of sampled points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, in query order
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Iterate over the points
    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    /// Query times, in order
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Last sampled point
    pub fn final_point(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Steps taken over the whole trajectory
    pub fn total_iterations(&self) -> usize {
        self.points.iter().map(|p| p.iterations).sum()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<'f, F> Rk4Integrator<'f, F>
where
    F: DerivativeFunction + ?Sized,
{
    /// Advance through every time in `times` and record the state at each
    ///
    /// `times` must be non-decreasing and start at or after the current time.
    /// The integrator is left at the last query time.
    ///
    /// # Errors
    ///
    /// The first error of [`advance_to`](Self::advance_to); points sampled
    /// before it are discarded, but the integrator keeps the progress made.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ode_rs::models::ExponentialGrowth;
    /// use ode_rs::solver::{IntegratorConfiguration, Rk4Integrator};
    ///
    /// # fn main() -> ode_rs::error::Result<()> {
    /// let decay = ExponentialGrowth::new(-0.5);
    /// let config = IntegratorConfiguration::new(0.0, [1.0], 0.1);
    /// let mut rk4 = Rk4Integrator::with_configuration(&decay, config)?;
    ///
    /// let trajectory = rk4.sample(&[0.0, 0.25, 1.0])?;
    ///
    /// assert_eq!(trajectory.len(), 3);
    /// assert_eq!(trajectory.points()[1].iterations, 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn sample(&mut self, times: &[f64]) -> Result<Trajectory> {
        let mut trajectory = Trajectory::with_capacity(times.len());
        let steps_before = self.total_steps();

        for &time in times {
            let value = self.advance_to(time)?.clone();
            trajectory.push(TrajectoryPoint {
                time,
                value,
                iterations: self.iterations_needed(),
            });
        }

        trajectory.add_metadata("solver", "Runge-Kutta 4");
        if let Some(h) = self.step_size() {
            trajectory.add_metadata("step size", &h.to_string());
        }
        trajectory.add_metadata(
            "derivative evaluations",
            &(4 * (self.total_steps() - steps_before)).to_string(),
        );

        Ok(trajectory)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
