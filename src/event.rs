use crate::customer::Customer;
use crate::DiscreteTime;
use serde::{Deserialize, Serialize};

/// What happens to a customer at a scheduled moment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// The customer walks into the store.
    Arrival,
    /// The customer is done browsing and heads for the till.
    EndOfShopping,
}

/// A scheduled happening. `customer` indexes the Simulation's customer roster.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub time: DiscreteTime,
    pub kind: EventKind,
    pub customer: usize,
}

/// Builds the full, time-ordered event list for a run.
///
/// Every customer contributes an `Arrival` and an `EndOfShopping`, pushed in
/// roster order. The sort is stable, so events sharing a timestamp keep that
/// order: a customer's own arrival comes before their end of shopping, and
/// lower customer ids come first.
pub fn build_timeline(customers: &[Customer]) -> Vec<Event> {
    let mut events = Vec::with_capacity(customers.len() * 2);
    for (customer, c) in customers.iter().enumerate() {
        events.push(Event {
            time: c.arrival_time,
            kind: EventKind::Arrival,
            customer,
        });
        events.push(Event {
            time: c.finish_shopping_time,
            kind: EventKind::EndOfShopping,
            customer,
        });
    }

    events.sort_by_key(|e| e.time);
    events
}
