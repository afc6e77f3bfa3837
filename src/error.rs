use crate::{customer::CustomerId, DiscreteTime};
use thiserror::Error;

/// Everything that can go wrong while configuring or running a Simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The store must be open for a positive, finite number of hours.
    #[error("operating hours must be positive and finite, got {0}")]
    InvalidOperatingHours(f64),

    /// The display divisor cannot be zero.
    #[error("time scale must be at least 1")]
    InvalidTimeScale,

    /// A queue that can hold nobody would drop every customer.
    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,

    /// A hand-built roster whose arrivals are not strictly increasing.
    #[error("customer #{customer} arrives at t={arrival_time}s, not after the previous arrival at t={previous_arrival}s")]
    UnorderedRoster {
        customer: CustomerId,
        arrival_time: DiscreteTime,
        previous_arrival: DiscreteTime,
    },

    /// A customer finished shopping while the checkout queue was full and the
    /// overflow policy is `OverflowPolicy::Fail`.
    #[error("checkout queue full (capacity {capacity}) when customer #{customer} finished shopping at t={time}s")]
    QueueOverflow {
        customer: CustomerId,
        time: DiscreteTime,
        capacity: usize,
    },

    /// A random distribution could not be built from the configured ranges.
    #[error("invalid sampling range: {0}")]
    Sampling(#[from] rand::distr::uniform::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
