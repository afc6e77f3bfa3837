//! Baseline performance of a full working day at the till.
#![allow(clippy::missing_docs_in_private_items, clippy::expect_used)]
#[macro_use]
extern crate criterion;

use checkout_sim::{Simulation, SimulationConfig, Trace};
use criterion::criterion_group;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn full_day_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("full day");

    for student_number in [2, 15] {
        let config = SimulationConfig {
            student_number,
            ..Default::default()
        };

        group.bench_function(format!("student {student_number}"), |b| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| {
                let mut simulation =
                    Simulation::new(config.clone(), &mut rng).expect("valid config");
                simulation.run().expect("queue large enough")
            });
        });

        group.bench_function(format!("student {student_number}, traced"), |b| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| {
                let mut simulation =
                    Simulation::new(config.clone(), &mut rng).expect("valid config");
                let mut trace = Trace::new();
                simulation.run_with(&mut trace).expect("queue large enough");
                trace.len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, full_day_bench);
criterion_main!(benches);
