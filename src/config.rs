use crate::error::{Result, SimulationError};
use crate::DiscreteTime;
use serde::{Deserialize, Serialize};

/// Seconds in one hour of store operation.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// What the Simulation does when a customer finishes shopping and the checkout
/// queue is already at capacity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Abort the run with `SimulationError::QueueOverflow`.
    #[default]
    Fail,
    /// Drop the customer: they keep their queue start time, are never served,
    /// and are counted in `customers_dropped`.
    Discard,
}

/// The parameters of one replication of the checkout simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Widens the random ranges of both the inter-arrival gap and the
    /// shopping duration.
    pub student_number: u32,
    /// How long the store is open. Customers arriving after closing are never
    /// generated, and events after closing are never processed.
    pub operating_hours: f64,
    /// Display-only divisor for rendered times. The engine never reads it.
    pub time_scale: u32,
    /// Maximum number of customers waiting at the till.
    pub queue_capacity: usize,
    /// See `OverflowPolicy`.
    pub overflow_policy: OverflowPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            student_number: 15,
            operating_hours: 8.0,
            time_scale: 100,
            queue_capacity: 1000,
            overflow_policy: OverflowPolicy::Fail,
        }
    }
}

impl SimulationConfig {
    /// Rejects configurations the engine cannot run meaningfully.
    pub fn validate(&self) -> Result<()> {
        if !self.operating_hours.is_finite() || self.operating_hours <= 0.0 {
            return Err(SimulationError::InvalidOperatingHours(
                self.operating_hours,
            ));
        }

        if self.time_scale == 0 {
            return Err(SimulationError::InvalidTimeScale);
        }

        if self.queue_capacity == 0 {
            return Err(SimulationError::InvalidQueueCapacity);
        }

        Ok(())
    }

    /// The last whole second at which the store is still open.
    ///
    /// Every event time is a whole number of seconds, so for any event time
    /// `t`, `t > operating_hours * 3600` holds exactly when `t > closing_time()`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn closing_time(&self) -> DiscreteTime {
        (self.operating_hours * SECONDS_PER_HOUR).floor().max(0.0) as DiscreteTime
    }
}
