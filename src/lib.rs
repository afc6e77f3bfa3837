pub mod config;
pub mod customer;
pub mod error;
pub mod event;
pub mod experiment;
pub mod observer;
pub mod queue;
pub mod server;
pub mod statistics;

pub use config::{OverflowPolicy, SimulationConfig};
pub use customer::{Customer, CustomerGenerator, CustomerId};
pub use error::{Result, SimulationError};
pub use event::{build_timeline, Event, EventKind};
pub use observer::{Notification, SimulationObserver, Trace};
pub use queue::FifoQueue;
pub use server::CheckoutServer;
pub use statistics::{ScaledReport, SimulationReport, Statistics};

use log::{debug, info, warn};
use rand::Rng;

/// Simulated time, in whole seconds since the store opened.
pub type DiscreteTime = u64;

/// The current state of a Simulation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SimulationState {
    /// The Simulation has only been constructed.
    Constructed,
    /// The Simulation is actively simulating.
    Running,
    /// The Simulation ran out of events or passed closing time.
    Completed,
    /// The Simulation stopped on an error, e.g. a queue overflow.
    Failed,
}

/// A Simulation holds all the state of one replication of the checkout.
///
/// A Simulation is an engine that jumps from one scheduled event to the next.
/// Customers arrive, browse, and then queue at a single till that serves one
/// customer at a time. After every event, the till picks up the next customer
/// if it is free; if it is free and nobody is waiting, the gap until the next
/// event is booked as idle time.
///
/// The queue, the till, the shoppers still browsing and the statistics all
/// belong to the Simulation and are built fresh for every run.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// The parameters this run was built from.
    config: SimulationConfig,
    /// Events after this second are never processed.
    closing_time: DiscreteTime,
    /// Every customer of the run, in generation order.
    customers: Vec<Customer>,
    /// Two events per customer, sorted by time.
    timeline: Vec<Event>,
    /// Index of the next unprocessed event in `timeline`.
    cursor: usize,
    /// The current discrete time of the Simulation.
    time: DiscreteTime,
    /// Roster indices of customers waiting at the till.
    queue: FifoQueue<usize>,
    /// The single till.
    server: CheckoutServer,
    /// Roster indices of customers still browsing, in arrival order.
    in_shop: Vec<usize>,
    /// Running measurements of the run so far.
    statistics: Statistics,
    /// The state of the Simulation.
    state: SimulationState,
}

impl Simulation {
    /// Validates `config` and draws this run's customers from `rng`.
    pub fn new<R: Rng + ?Sized>(config: SimulationConfig, rng: &mut R) -> Result<Simulation> {
        config.validate()?;
        let customers =
            CustomerGenerator::new(config.student_number)?.generate(config.closing_time(), rng);
        Ok(Simulation::build(config, customers))
    }

    /// Builds a Simulation over a fixed set of customers, e.g. a recorded or
    /// hand-written scenario. Arrivals must be strictly increasing, as the
    /// generator produces them.
    pub fn from_customers(config: SimulationConfig, customers: Vec<Customer>) -> Result<Simulation> {
        config.validate()?;
        if let Some(pair) = customers
            .windows(2)
            .find(|pair| pair[1].arrival_time <= pair[0].arrival_time)
        {
            return Err(SimulationError::UnorderedRoster {
                customer: pair[1].id,
                arrival_time: pair[1].arrival_time,
                previous_arrival: pair[0].arrival_time,
            });
        }
        Ok(Simulation::build(config, customers))
    }

    /// Lays out the timeline and an empty store for `customers`.
    fn build(config: SimulationConfig, customers: Vec<Customer>) -> Simulation {
        let timeline = build_timeline(&customers);
        Simulation {
            closing_time: config.closing_time(),
            queue: FifoQueue::new(config.queue_capacity),
            server: CheckoutServer::new(),
            in_shop: Vec::with_capacity(customers.len()),
            statistics: Statistics::default(),
            state: SimulationState::Constructed,
            cursor: 0,
            time: 0,
            customers,
            timeline,
            config,
        }
    }

    /// Runs the simulation to completion and returns its result record.
    pub fn run(&mut self) -> Result<SimulationReport> {
        self.run_with(&mut ())
    }

    /// Runs the simulation to completion, reporting every state change to
    /// `observer`.
    pub fn run_with<O>(&mut self, observer: &mut O) -> Result<SimulationReport>
    where
        O: SimulationObserver + ?Sized,
    {
        info!(
            "Starting simulation: {} customers, {} events, closing at {}s",
            self.customers.len(),
            self.timeline.len(),
            self.closing_time
        );

        while self.step(observer)? {}

        let report = self.report();
        info!("Finished simulation at {}s: {:?}", self.time, report);
        Ok(report)
    }

    /// Processes the next event. Returns `Ok(false)` once the timeline is
    /// exhausted or the next event falls after closing time.
    pub fn step<O>(&mut self, observer: &mut O) -> Result<bool>
    where
        O: SimulationObserver + ?Sized,
    {
        match self.state {
            SimulationState::Completed | SimulationState::Failed => return Ok(false),
            SimulationState::Constructed => self.state = SimulationState::Running,
            SimulationState::Running => {}
        }

        let Some(event) = self.timeline.get(self.cursor).copied() else {
            self.state = SimulationState::Completed;
            return Ok(false);
        };

        if event.time > self.closing_time {
            debug!("Next event at {}s is after closing; stopping.", event.time);
            self.state = SimulationState::Completed;
            return Ok(false);
        }

        self.time = event.time;
        debug!("t={}s: {:?} for roster #{}", self.time, event.kind, event.customer);

        match event.kind {
            EventKind::Arrival => self.admit(event.customer, observer),
            EventKind::EndOfShopping => {
                if let Err(err) = self.send_ready_customers_to_checkout(observer) {
                    self.state = SimulationState::Failed;
                    return Err(err);
                }
            }
        }
        self.cursor += 1;

        self.serve_next_customer(observer);
        self.accrue_idle_time(observer);

        Ok(true)
    }

    /// Puts an arriving customer among the shoppers still browsing.
    fn admit<O>(&mut self, index: usize, observer: &mut O)
    where
        O: SimulationObserver + ?Sized,
    {
        self.in_shop.push(index);

        let customer = &self.customers[index];
        observer.notify(&Notification::Arrived {
            time: self.time,
            customer: customer.id,
            shopping_duration: customer.shopping_duration,
            checkout_duration: customer.checkout_duration,
        });
    }

    /// Moves every browsing customer whose shopping is done into the checkout
    /// queue, in arrival order.
    fn send_ready_customers_to_checkout<O>(&mut self, observer: &mut O) -> Result<()>
    where
        O: SimulationObserver + ?Sized,
    {
        let now = self.time;
        let customers = &self.customers;
        let (ready, browsing): (Vec<usize>, Vec<usize>) = self
            .in_shop
            .iter()
            .copied()
            .partition(|&index| customers[index].is_ready_for_checkout(now));
        self.in_shop = browsing;

        for index in ready {
            let customer = &mut self.customers[index];
            customer.queue_start_time = Some(now);
            let (id, arrival_time) = (customer.id, customer.arrival_time);
            let (shopping_duration, checkout_duration) =
                (customer.shopping_duration, customer.checkout_duration);

            if self.queue.enqueue(index).is_err() {
                match self.config.overflow_policy {
                    OverflowPolicy::Fail => {
                        return Err(SimulationError::QueueOverflow {
                            customer: id,
                            time: now,
                            capacity: self.queue.capacity(),
                        });
                    }
                    OverflowPolicy::Discard => {
                        warn!("Checkout queue full at {}s; customer #{} dropped.", now, id);
                        self.statistics.record_drop();
                        observer.notify(&Notification::CustomerDropped {
                            time: now,
                            customer: id,
                        });
                        continue;
                    }
                }
            }

            let queue_length = self.queue.len();
            debug!("Customer #{} joined the queue (length {}).", id, queue_length);
            observer.notify(&Notification::JoinedQueue {
                time: now,
                customer: id,
                arrival_time,
                shopping_duration,
                checkout_duration,
                queue_length,
                total_idle_time: self.statistics.total_idle_time,
            });

            if self.statistics.record_queue_length(queue_length) {
                observer.notify(&Notification::NewMaxQueueLength {
                    time: now,
                    length: queue_length,
                });
            }
        }

        Ok(())
    }

    /// Starts serving the head of the queue if the till is free.
    fn serve_next_customer<O>(&mut self, observer: &mut O)
    where
        O: SimulationObserver + ?Sized,
    {
        let now = self.time;
        if !self.server.is_idle(now) {
            return;
        }

        let Some(index) = self.queue.dequeue() else {
            return;
        };

        let customer = &mut self.customers[index];
        let wait = customer
            .queue_start_time
            .map_or(0, |queued| now.saturating_sub(queued));
        let service_time = customer.checkout_service_time();
        let finish_time = self.server.start_service(now, service_time);
        customer.checkout_finish_time = Some(finish_time);
        let (id, checkout_duration) = (customer.id, customer.checkout_duration);

        let new_max_wait = self.statistics.record_service(wait, service_time);
        debug!(
            "Customer #{} at the till after waiting {}s; till busy until {}s.",
            id, wait, finish_time
        );
        observer.notify(&Notification::ServiceStarted {
            time: now,
            customer: id,
            wait,
            checkout_duration,
            finish_time,
            queue_length: self.queue.len(),
            total_idle_time: self.statistics.total_idle_time,
        });

        if new_max_wait {
            observer.notify(&Notification::NewMaxWait { time: now, wait });
        }
    }

    /// Books idle time when the till is free and nobody waits: the gap up to
    /// the next strictly later event. Nothing is booked after the last event.
    fn accrue_idle_time<O>(&mut self, observer: &mut O)
    where
        O: SimulationObserver + ?Sized,
    {
        let now = self.time;
        if !self.server.is_idle(now) || !self.queue.is_empty() {
            return;
        }

        let next_event_time = self.timeline[self.cursor..]
            .iter()
            .map(|e| e.time)
            .find(|&t| t > now);

        if let Some(next) = next_event_time {
            let duration = next - now;
            self.statistics.accrue_idle(duration);
            observer.notify(&Notification::IdleAccrued {
                time: now,
                duration,
                total_idle_time: self.statistics.total_idle_time,
            });
        }
    }

    /// The result record as of now.
    pub fn report(&self) -> SimulationReport {
        SimulationReport::new(self.customers.len(), &self.statistics)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The current discrete time of the Simulation.
    pub fn time(&self) -> DiscreteTime {
        self.time
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn timeline(&self) -> &[Event] {
        &self.timeline
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn server(&self) -> &CheckoutServer {
        &self.server
    }
}
