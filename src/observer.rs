use crate::customer::CustomerId;
use crate::DiscreteTime;
use serde::{Deserialize, Serialize};

/// A state change reported by the Simulation while it runs.
///
/// Times are unscaled simulated seconds. Rendering them is up to whoever
/// consumes the notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// A customer walked into the store.
    Arrived {
        time: DiscreteTime,
        customer: CustomerId,
        shopping_duration: u64,
        checkout_duration: f64,
    },
    /// A customer finished shopping and joined the checkout queue.
    JoinedQueue {
        time: DiscreteTime,
        customer: CustomerId,
        arrival_time: DiscreteTime,
        shopping_duration: u64,
        checkout_duration: f64,
        queue_length: usize,
        total_idle_time: DiscreteTime,
    },
    /// The queue is longer than it has ever been in this run.
    NewMaxQueueLength { time: DiscreteTime, length: usize },
    /// A customer found the queue full and was turned away.
    CustomerDropped {
        time: DiscreteTime,
        customer: CustomerId,
    },
    /// A customer reached the till.
    ServiceStarted {
        time: DiscreteTime,
        customer: CustomerId,
        wait: DiscreteTime,
        checkout_duration: f64,
        finish_time: DiscreteTime,
        queue_length: usize,
        total_idle_time: DiscreteTime,
    },
    /// Someone waited longer than anyone before them in this run.
    NewMaxWait { time: DiscreteTime, wait: DiscreteTime },
    /// The till will stand idle until the next event.
    IdleAccrued {
        time: DiscreteTime,
        duration: DiscreteTime,
        total_idle_time: DiscreteTime,
    },
}

impl Notification {
    pub fn time(&self) -> DiscreteTime {
        match self {
            Notification::Arrived { time, .. }
            | Notification::JoinedQueue { time, .. }
            | Notification::NewMaxQueueLength { time, .. }
            | Notification::CustomerDropped { time, .. }
            | Notification::ServiceStarted { time, .. }
            | Notification::NewMaxWait { time, .. }
            | Notification::IdleAccrued { time, .. } => *time,
        }
    }
}

/// Receives notifications from a running Simulation.
pub trait SimulationObserver {
    fn notify(&mut self, notification: &Notification);
}

/// Discards every notification.
impl SimulationObserver for () {
    fn notify(&mut self, _notification: &Notification) {}
}

impl<F> SimulationObserver for F
where
    F: FnMut(&Notification),
{
    fn notify(&mut self, notification: &Notification) {
        self(notification);
    }
}

/// Collects every notification of a run, in order.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    pub notifications: Vec<Notification>,
}

impl Trace {
    pub fn new() -> Trace {
        Trace::default()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }
}

impl SimulationObserver for Trace {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_keeps_order() {
        let mut trace = Trace::new();
        trace.notify(&Notification::NewMaxQueueLength { time: 5, length: 1 });
        trace.notify(&Notification::NewMaxWait { time: 9, wait: 3 });
        assert_eq!(trace.len(), 2);
        assert_eq!(
            trace.iter().map(Notification::time).collect::<Vec<_>>(),
            vec![5, 9]
        );
    }

    #[test]
    fn closures_observe() {
        let mut seen = 0;
        {
            let mut counter = |_: &Notification| seen += 1;
            counter.notify(&Notification::NewMaxWait { time: 1, wait: 1 });
            counter.notify(&Notification::NewMaxWait { time: 2, wait: 2 });
        }
        assert_eq!(seen, 2);
    }
}
