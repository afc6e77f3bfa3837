use crate::error::Result;
use crate::statistics::SimulationReport;
use crate::{Simulation, SimulationConfig};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Runs `replications` independent simulations of the same configuration.
///
/// Each replication gets a fresh Simulation; the only thing they share is the
/// random source, which is drawn from in sequence. Seed `rng` to make the
/// whole experiment reproducible.
pub fn replicate<R: Rng + ?Sized>(
    config: &SimulationConfig,
    replications: usize,
    rng: &mut R,
) -> Result<Vec<SimulationReport>> {
    let mut reports = Vec::with_capacity(replications);

    for replication in 1..=replications {
        let mut simulation = Simulation::new(config.clone(), &mut *rng)?;
        let report = simulation.run()?;
        info!("Replication #{}: {:?}", replication, report);
        reports.push(report);
    }

    Ok(reports)
}

/// Means over a set of replications, in unscaled seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    pub replications: usize,
    pub mean_total_customers: f64,
    pub mean_customers_served: f64,
    pub mean_max_wait_seconds: f64,
    pub mean_max_queue_length: f64,
    pub mean_total_idle_time_seconds: f64,
}

impl ReplicationSummary {
    /// Averages the reports. `None` when there is nothing to average.
    pub fn from_reports(reports: &[SimulationReport]) -> Option<ReplicationSummary> {
        if reports.is_empty() {
            return None;
        }

        let n = reports.len() as f64;
        let mean = |f: fn(&SimulationReport) -> f64| reports.iter().map(f).sum::<f64>() / n;

        Some(ReplicationSummary {
            replications: reports.len(),
            mean_total_customers: mean(|r| r.total_customers as f64),
            mean_customers_served: mean(|r| r.customers_served as f64),
            mean_max_wait_seconds: mean(|r| r.max_wait_seconds as f64),
            mean_max_queue_length: mean(|r| r.max_queue_length as f64),
            mean_total_idle_time_seconds: mean(|r| r.total_idle_time_seconds as f64),
        })
    }
}
