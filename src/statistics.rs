use crate::DiscreteTime;
use serde::{Deserialize, Serialize};

/// Running measurements, updated by the Simulation as events are processed.
///
/// Every field only ever grows over a run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Longest checkout queue seen so far.
    pub max_queue_length: usize,
    /// Longest time any served customer waited between joining the queue and
    /// reaching the till.
    pub max_wait: DiscreteTime,
    /// Seconds the till sat free with nobody waiting.
    pub total_idle_time: DiscreteTime,
    /// Customers whose service has started. Counted at service start.
    pub customers_served: usize,
    /// Customers turned away by a full queue under `OverflowPolicy::Discard`.
    pub customers_dropped: usize,
    /// Sum of all waits, for the average.
    pub total_wait: DiscreteTime,
    /// Sum of all service times started.
    pub total_busy_time: DiscreteTime,
}

impl Statistics {
    /// Records the queue length after someone joined. Returns true on a new
    /// maximum.
    pub fn record_queue_length(&mut self, length: usize) -> bool {
        if length > self.max_queue_length {
            self.max_queue_length = length;
            return true;
        }

        false
    }

    /// Records a service start. Returns true when `wait` is a new maximum.
    pub fn record_service(&mut self, wait: DiscreteTime, service_time: DiscreteTime) -> bool {
        self.customers_served += 1;
        self.total_wait += wait;
        self.total_busy_time += service_time;

        if wait > self.max_wait {
            self.max_wait = wait;
            return true;
        }

        false
    }

    pub fn accrue_idle(&mut self, duration: DiscreteTime) {
        self.total_idle_time += duration;
    }

    pub fn record_drop(&mut self) {
        self.customers_dropped += 1;
    }

    /// Mean wait of served customers, 0 when nobody was served.
    pub fn average_wait(&self) -> f64 {
        if self.customers_served == 0 {
            return 0.0;
        }

        self.total_wait as f64 / self.customers_served as f64
    }
}

/// The result record of one replication, in unscaled simulated seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub total_customers: usize,
    pub customers_served: usize,
    pub customers_dropped: usize,
    pub max_queue_length: usize,
    pub max_wait_seconds: DiscreteTime,
    pub total_idle_time_seconds: DiscreteTime,
    pub average_wait_seconds: f64,
}

impl SimulationReport {
    pub fn new(total_customers: usize, statistics: &Statistics) -> SimulationReport {
        SimulationReport {
            total_customers,
            customers_served: statistics.customers_served,
            customers_dropped: statistics.customers_dropped,
            max_queue_length: statistics.max_queue_length,
            max_wait_seconds: statistics.max_wait,
            total_idle_time_seconds: statistics.total_idle_time,
            average_wait_seconds: statistics.average_wait(),
        }
    }

    /// Times divided by `time_scale`, for presentation only.
    pub fn scaled(&self, time_scale: u32) -> ScaledReport {
        let scale = f64::from(time_scale.max(1));
        ScaledReport {
            total_customers: self.total_customers,
            customers_served: self.customers_served,
            max_queue_length: self.max_queue_length,
            max_wait: self.max_wait_seconds as f64 / scale,
            total_idle_time: self.total_idle_time_seconds as f64 / scale,
        }
    }
}

/// A `SimulationReport` with its times in display units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScaledReport {
    pub total_customers: usize,
    pub customers_served: usize,
    pub max_queue_length: usize,
    pub max_wait: f64,
    pub total_idle_time: f64,
}
