use crate::DiscreteTime;

/// The single till. It keeps no reference to the customer it serves; it only
/// knows when it will be free again.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CheckoutServer {
    /// End of the service in progress, or of the last one.
    busy_until: DiscreteTime,
}

impl CheckoutServer {
    pub fn new() -> CheckoutServer {
        CheckoutServer::default()
    }

    /// Idle once simulated time has reached the end of the last service.
    pub fn is_idle(&self, now: DiscreteTime) -> bool {
        now >= self.busy_until
    }

    /// Occupies the till from `now` for `service_time` seconds and returns
    /// the moment it frees up.
    pub fn start_service(&mut self, now: DiscreteTime, service_time: DiscreteTime) -> DiscreteTime {
        self.busy_until = now + service_time;
        self.busy_until
    }

    pub fn busy_until(&self) -> DiscreteTime {
        self.busy_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_busy_idle() {
        let mut server = CheckoutServer::new();
        assert!(server.is_idle(0));
        assert_eq!(server.start_service(70, 21), 91);
        assert!(!server.is_idle(70));
        assert!(!server.is_idle(90));
        assert!(server.is_idle(91));
        assert_eq!(server.busy_until(), 91);
    }
}
