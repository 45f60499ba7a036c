//! Helper functions for integration tests

#![allow(dead_code)]

use ode_rs::solver::Rk4Integrator;
use ode_rs::state::{DerivativeFunction, VectorState};

/// Assert that two states are close, component by component
pub fn assert_states_close(state1: &VectorState, state2: &VectorState, tolerance: f64, message: &str) {
    assert_eq!(state1.len(), state2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in state1.iter().zip(state2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Root-mean-square difference between two states of equal length
pub fn compute_l2_error(state1: &VectorState, state2: &VectorState) -> f64 {
    if state1.is_empty() {
        return 0.0;
    }

    let sum_squared_diff: f64 = state1
        .iter()
        .zip(state2.iter())
        .map(|(&v1, &v2)| (v1 - v2).powi(2))
        .sum();

    (sum_squared_diff / state1.len() as f64).sqrt()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Integrator starting at `t = 0` from `y0` with step `h`
pub fn configured_integrator<'f, F>(f: &'f F, y0: &[f64], h: f64) -> Rk4Integrator<'f, F>
where
    F: DerivativeFunction + ?Sized,
{
    let mut rk4 = Rk4Integrator::new();
    rk4.set_derivative_function(f);
    rk4.set_initial_time(0.0);
    rk4.set_initial_value(y0);
    rk4.set_step_size(h).unwrap();
    rk4
}

/// One RK4 step written out component by component on plain slices
///
/// Independent of the crate's vector arithmetic, used as a reference.
pub fn reference_rk4_step<F>(f: &F, t: f64, y: &[f64], h: f64) -> Vec<f64>
where
    F: DerivativeFunction + ?Sized,
{
    let eval = |t: f64, y: &[f64]| -> Vec<f64> {
        f.evaluate(t, &VectorState::from_slice(y)).unwrap().as_slice().to_vec()
    };
    let shift = |c: f64, k: &[f64]| -> Vec<f64> { y.iter().zip(k).map(|(yi, ki)| yi + c * ki).collect() };

    let k1 = eval(t, y);
    let k2 = eval(t + h / 2.0, &shift(h / 2.0, &k1));
    let k3 = eval(t + h / 2.0, &shift(h / 2.0, &k2));
    let k4 = eval(t + h, &shift(h, &k3));

    (0..y.len())
        .map(|i| y[i] + h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
        .collect()
}
