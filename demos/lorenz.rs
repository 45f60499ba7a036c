//! Example: Lorenz attractor
//!
//! Integrates the Lorenz system (σ = 10, β = 8/3, ρ = 28) from (1, 0, 0) with
//! a fixed step h = 0.1 and prints the state every 0.2 time units together
//! with the number of RK4 steps each query needed:
//!
//! ```text
//! 0.00: (1.00000000000000, 0.00000000000000, 0.00000000000000) (0 steps)
//! 0.20: (...) (2 steps)
//! ```
//!
//! ```bash
//! cargo run --example lorenz
//! ```

use ode_rs::models::Lorenz;
use ode_rs::solver::Rk4Integrator;
use ode_rs::state::VectorState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lorenz = Lorenz::default();

    let mut rk4 = Rk4Integrator::new();
    rk4.set_derivative_function(&lorenz);
    rk4.set_initial_time(0.0);
    rk4.set_initial_value(VectorState::from([1.0, 0.0, 0.0]));
    rk4.set_step_size(0.1)?;

    for i in 0..=5 {
        let t = 0.2 * i as f64;
        let y = rk4.advance_to(t)?.clone();
        println!("{:.2}: {:.14} ({} steps)", t, y, rk4.iterations_needed());
    }

    Ok(())
}
