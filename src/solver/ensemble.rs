//! Ensembles of independent integrations
//!
//! Integrators share no mutable state, so a batch of them (one system from
//! many initial values, or several parameter sets of a system) can run side by
//! side. With the `parallel` feature the members are distributed over the
//! `rayon` thread pool once the batch reaches
//! [`parallel_threshold()`](crate::solver::parallel_threshold) members;
//! otherwise they run one after the other.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::solver::configuration::IntegratorConfiguration;
use crate::solver::methods::Rk4Integrator;
use crate::solver::trajectory::Trajectory;
use crate::state::DerivativeFunction;

/// One integration of an ensemble: a system and where to start it
pub struct EnsembleMember<'f, F: ?Sized> {
    /// Right-hand side to integrate
    pub system: &'f F,

    /// Initial time, initial value, step size and budget of this member
    pub configuration: IntegratorConfiguration,
}

impl<'f, F: ?Sized> EnsembleMember<'f, F> {
    /// Pair a system with its configuration
    pub fn new(system: &'f F, configuration: IntegratorConfiguration) -> Self {
        Self { system, configuration }
    }
}

/// Sample every member at the same query times
///
/// Each member gets its own [`Rk4Integrator`]. Trajectories come back in
/// member order.
///
/// # Errors
///
/// An error of a failing member (configuration or integration). When several
/// members fail in parallel mode, which one is reported is unspecified.
///
/// # Example
///
/// ```rust
/// use ode_rs::models::Lorenz;
/// use ode_rs::solver::{integrate_ensemble, EnsembleMember, IntegratorConfiguration};
///
/// # fn main() -> ode_rs::error::Result<()> {
/// let lorenz = Lorenz::default();
/// let members: Vec<_> = [1.0, 1.001, 1.002]
///     .iter()
///     .map(|&x0| EnsembleMember::new(&lorenz, IntegratorConfiguration::new(0.0, [x0, 0.0, 0.0], 0.01)))
///     .collect();
///
/// let trajectories = integrate_ensemble(&members, &[0.5, 1.0])?;
/// assert_eq!(trajectories.len(), 3);
/// # Ok(())
/// # }
/// ```
pub fn integrate_ensemble<F>(members: &[EnsembleMember<'_, F>], times: &[f64]) -> Result<Vec<Trajectory>>
where
    F: DerivativeFunction + Sync + ?Sized,
{
    log::debug!("integrating an ensemble of {} members at {} query times", members.len(), times.len());

    #[cfg(feature = "parallel")]
    if members.len() >= crate::solver::parallel_threshold() {
        return members
            .par_iter()
            .map(|member| integrate_member(member, times))
            .collect();
    }

    members
        .iter()
        .map(|member| integrate_member(member, times))
        .collect()
}

fn integrate_member<F>(member: &EnsembleMember<'_, F>, times: &[f64]) -> Result<Trajectory>
where
    F: DerivativeFunction + ?Sized,
{
    let mut integrator = Rk4Integrator::with_configuration(member.system, member.configuration.clone())?;
    let mut trajectory = integrator.sample(times)?;
    trajectory.add_metadata("system", member.system.name());
    Ok(trajectory)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntegrationError;
    use crate::models::{ExponentialGrowth, Lorenz};
    use crate::solver::ThresholdGuard;
    use approx::assert_relative_eq;

    fn growth_members(rates: &[ExponentialGrowth]) -> Vec<EnsembleMember<'_, ExponentialGrowth>> {
        rates
            .iter()
            .map(|system| EnsembleMember::new(system, IntegratorConfiguration::new(0.0, [1.0], 0.05)))
            .collect()
    }

    #[test]
    fn test_members_are_independent_and_ordered() {
        let systems: Vec<ExponentialGrowth> =
            [-1.0, -0.5, 0.0, 0.5, 1.0].iter().map(|&r| ExponentialGrowth::new(r)).collect();
        let members = growth_members(&systems);

        let trajectories = integrate_ensemble(&members, &[1.0, 2.0]).unwrap();

        assert_eq!(trajectories.len(), 5);
        for (system, trajectory) in systems.iter().zip(&trajectories) {
            let last = trajectory.final_point().unwrap();
            assert_relative_eq!(
                last.value[0],
                system.analytical_solution(2.0, 1.0),
                max_relative = 1e-6
            );
            assert_eq!(trajectory.metadata.get("system"), Some(&"Exponential Growth".to_string()));
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let lorenz = Lorenz::default();
        let members: Vec<_> = (0..6)
            .map(|i| {
                let x0 = 1.0 + 0.01 * i as f64;
                EnsembleMember::new(&lorenz, IntegratorConfiguration::new(0.0, [x0, 0.0, 0.0], 0.01))
            })
            .collect();

        let sequential = {
            let _guard = ThresholdGuard::save(usize::MAX);
            integrate_ensemble(&members, &[0.5, 1.0]).unwrap()
        };
        let parallel = {
            let _guard = ThresholdGuard::save(1);
            integrate_ensemble(&members, &[0.5, 1.0]).unwrap()
        };

        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.points(), b.points());
        }
    }

    #[test]
    fn test_invalid_member_fails_the_ensemble() {
        let systems = [ExponentialGrowth::new(1.0)];
        let mut members = growth_members(&systems);
        members[0].configuration.step_size = 0.0;

        let error = integrate_ensemble(&members, &[1.0]).unwrap_err();

        assert!(matches!(error, IntegrationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_empty_ensemble() {
        let members: Vec<EnsembleMember<'_, Lorenz>> = Vec::new();
        assert!(integrate_ensemble(&members, &[1.0]).unwrap().is_empty());
    }
}
