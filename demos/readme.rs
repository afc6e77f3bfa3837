use checkout_sim::{Notification, Simulation, SimulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Example of a minimal checkout Simulation that can be executed.
fn main() -> Result<(), checkout_sim::SimulationError> {
    // One working day of eight hours with the default queue of 1000 places.
    // The student number widens both the arrival gaps and the shopping times.
    let config = SimulationConfig {
        student_number: 2,
        ..Default::default()
    };

    // The random source is explicit; the same seed gives the same day.
    let mut rng = StdRng::seed_from_u64(2026);
    let mut simulation = Simulation::new(config, &mut rng)?;

    // Any closure over notifications can observe the run as it happens.
    let mut longest_waits = vec![];
    let report = simulation.run_with(&mut |n: &Notification| {
        if let Notification::NewMaxWait { time, wait } = n {
            longest_waits.push((*time, *wait));
        }
    })?;

    println!("{report:#?}");
    println!("New longest waits (at, seconds): {longest_waits:?}");
    Ok(())
}
