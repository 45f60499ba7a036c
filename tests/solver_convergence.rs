//! Convergence tests for the RK4 integrator
//!
//! These tests verify that the integrator exhibits fourth-order convergence
//! when refining the step size.

use ode_rs::models::{ExponentialGrowth, HarmonicOscillator};
use ode_rs::solver::IntegratorConfiguration;
use ode_rs::solver::Rk4Integrator;

mod common;
use common::{compute_l2_error, ConstantGrowth};

#[test]
fn test_rk4_fourth_order_convergence() {
    // RK4 should have fourth-order convergence: error ~ O(h^4)
    // When h → h/2, error should → error/16

    let growth = ExponentialGrowth::new(1.0);
    let total_time = 1.0;
    let exact = growth.analytical_solution(total_time, 1.0);

    let step_sizes = vec![0.2, 0.1, 0.05, 0.025];
    let mut errors = Vec::new();

    for &h in &step_sizes {
        let config = IntegratorConfiguration::new(0.0, [1.0], h);
        let mut rk4 = Rk4Integrator::with_configuration(&growth, config).unwrap();

        let y = rk4.advance_to(total_time).unwrap();

        errors.push((y[0] - exact).abs());
    }

    // Check convergence ratios
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("RK4 convergence ratio {}->{}: {}", i, i + 1, ratio);

        // Should be close to 16 for fourth-order
        assert!(
            ratio > 12.0 && ratio < 20.0,
            "Convergence ratio {} not fourth-order",
            ratio
        );
    }
}

#[test]
fn test_harmonic_oscillator_convergence() {
    let oscillator = HarmonicOscillator::new(2.0);
    let total_time = 3.0;
    let exact = oscillator.analytical_solution(total_time, 1.0, 0.0);

    let mut errors = Vec::new();
    for h in [0.1, 0.05, 0.025] {
        let config = IntegratorConfiguration::new(0.0, [1.0, 0.0], h);
        let mut rk4 = Rk4Integrator::with_configuration(&oscillator, config).unwrap();

        let y = rk4.advance_to(total_time).unwrap();
        errors.push(compute_l2_error(y, &exact));
    }

    for pair in errors.windows(2) {
        let ratio = pair[0] / pair[1];
        assert!(
            ratio > 12.0 && ratio < 20.0,
            "Convergence ratio {} not fourth-order",
            ratio
        );
    }
}

#[test]
fn test_constant_growth_is_exact_for_any_step() {
    let model = ConstantGrowth::new(0.7);

    for h in [1.0, 0.3, 0.01] {
        let config = IntegratorConfiguration::new(0.0, [2.0, -1.0], h);
        let mut rk4 = Rk4Integrator::with_configuration(&model, config).unwrap();

        let y = rk4.advance_to(2.0).unwrap();

        assert!((y[0] - model.analytical_solution(2.0, 2.0)).abs() < 1e-12);
        assert!((y[1] - model.analytical_solution(2.0, -1.0)).abs() < 1e-12);
    }
}

#[test]
fn test_partial_steps_do_not_spoil_accuracy() {
    // Sampling at times that are not multiples of h gives the same accuracy
    // as a single advance to the end.
    let decay = ExponentialGrowth::new(-0.8);
    let config = IntegratorConfiguration::new(0.0, [1.0], 0.1);
    let mut rk4 = Rk4Integrator::with_configuration(&decay, config).unwrap();

    for t in [0.13, 0.47, 0.9, 1.234, 2.0] {
        let y = rk4.advance_to(t).unwrap();
        let exact = decay.analytical_solution(t, 1.0);
        assert!(
            ((y[0] - exact) / exact).abs() < 1e-6,
            "t = {}: {} vs {}",
            t,
            y[0],
            exact
        );
    }
}
