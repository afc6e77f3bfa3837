use crate::error::Result;
use crate::DiscreteTime;
use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

/// Customers are numbered from 1 in the order they were generated.
pub type CustomerId = usize;

/// Minimum seconds between two consecutive arrivals.
const MIN_ARRIVAL_GAP: u64 = 5;
/// Upper bound of the random part of the arrival gap, before the student number.
const ARRIVAL_GAP_SPREAD: u64 = 25;
/// Minimum minutes spent shopping.
const MIN_SHOPPING_MINUTES: u64 = 1;
/// Upper bound of the random part of the shopping time, before the student number.
const SHOPPING_SPREAD: u64 = 10;

/// One shopper's full lifecycle, from walking in to reaching the till.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Seconds since the store opened.
    pub arrival_time: DiscreteTime,
    /// Whole minutes spent browsing.
    pub shopping_duration: u64,
    /// Minutes of service at the till, derived from the shopping duration.
    pub checkout_duration: f64,
    /// `arrival_time + shopping_duration * 60`.
    pub finish_shopping_time: DiscreteTime,
    /// When the customer joined the checkout queue.
    pub queue_start_time: Option<DiscreteTime>,
    /// When the customer's service will end. Set at the moment service starts.
    pub checkout_finish_time: Option<DiscreteTime>,
}

impl Customer {
    pub fn new(id: CustomerId, arrival_time: DiscreteTime, shopping_duration: u64) -> Customer {
        Customer {
            id,
            arrival_time,
            shopping_duration,
            checkout_duration: 0.3 + shopping_duration as f64 / 20.0,
            finish_shopping_time: arrival_time + shopping_duration * 60,
            queue_start_time: None,
            checkout_finish_time: None,
        }
    }

    /// The checkout duration in whole seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn checkout_service_time(&self) -> DiscreteTime {
        (self.checkout_duration * 60.0).round().max(0.0) as DiscreteTime
    }

    /// Whether the customer may still join the checkout queue at `now`.
    pub fn is_ready_for_checkout(&self, now: DiscreteTime) -> bool {
        self.finish_shopping_time <= now
            && self.queue_start_time.is_none()
            && self.checkout_finish_time.is_none()
    }
}

/// Draws customers for one replication.
///
/// The two ranges widen with the student number, so different students get
/// differently loaded stores from the same rules.
#[derive(Clone, Debug)]
pub struct CustomerGenerator {
    /// Random part of the seconds between two arrivals.
    arrival_gap: Uniform<u64>,
    /// Random part of the minutes spent browsing.
    shopping_minutes: Uniform<u64>,
}

impl CustomerGenerator {
    pub fn new(student_number: u32) -> Result<CustomerGenerator> {
        let student_number = u64::from(student_number);
        Ok(CustomerGenerator {
            arrival_gap: Uniform::new_inclusive(0, ARRIVAL_GAP_SPREAD + student_number)?,
            shopping_minutes: Uniform::new_inclusive(0, SHOPPING_SPREAD + student_number)?,
        })
    }

    /// Generates customers until the next candidate would arrive after
    /// `closing_time`. That candidate is discarded.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        closing_time: DiscreteTime,
        rng: &mut R,
    ) -> Vec<Customer> {
        let mut customers = vec![];
        let mut previous_arrival = 0;

        loop {
            let arrival_time = previous_arrival + MIN_ARRIVAL_GAP + self.arrival_gap.sample(rng);
            if arrival_time > closing_time {
                break;
            }

            let shopping_duration = MIN_SHOPPING_MINUTES + self.shopping_minutes.sample(rng);
            customers.push(Customer::new(
                customers.len() + 1,
                arrival_time,
                shopping_duration,
            ));
            previous_arrival = arrival_time;
        }

        debug!(
            "Generated {} customers before closing at {}s",
            customers.len(),
            closing_time
        );
        customers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn derived_fields() {
        let customer = Customer::new(1, 10, 1);
        assert_eq!(customer.finish_shopping_time, 70);
        assert!((customer.checkout_duration - 0.35).abs() < 1e-9);
        assert_eq!(customer.checkout_service_time(), 21);
        assert_eq!(customer.queue_start_time, None);
        assert_eq!(customer.checkout_finish_time, None);
    }

    #[test]
    fn service_time_is_exact_for_every_shopping_duration() {
        for minutes in 1..=200 {
            let customer = Customer::new(1, 0, minutes);
            assert_eq!(customer.checkout_service_time(), 18 + 3 * minutes);
        }
    }

    #[test]
    fn ready_for_checkout_only_once_shopping_is_done() {
        let mut customer = Customer::new(1, 10, 2);
        assert!(!customer.is_ready_for_checkout(129));
        assert!(customer.is_ready_for_checkout(130));
        customer.queue_start_time = Some(130);
        assert!(!customer.is_ready_for_checkout(500));
    }

    #[test]
    fn generated_arrivals_are_strictly_increasing() {
        let mut rng = StdRng::seed_from_u64(7);
        for student_number in [0, 2, 15, 40] {
            let generator = CustomerGenerator::new(student_number).unwrap();
            let customers = generator.generate(8 * 3600, &mut rng);
            assert!(!customers.is_empty());

            let mut previous = 0;
            for (i, customer) in customers.iter().enumerate() {
                assert_eq!(customer.id, i + 1);
                let gap = customer.arrival_time - previous;
                assert!(gap >= 5 && gap <= 30 + u64::from(student_number));
                assert!(customer.shopping_duration >= 1);
                assert!(customer.shopping_duration <= 11 + u64::from(student_number));
                assert_eq!(
                    customer.finish_shopping_time,
                    customer.arrival_time + customer.shopping_duration * 60
                );
                previous = customer.arrival_time;
            }
        }
    }

    #[test]
    fn nobody_arrives_after_closing() {
        let generator = CustomerGenerator::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let customers = generator.generate(600, &mut rng);
        assert!(customers.iter().all(|c| c.arrival_time <= 600));
    }

    #[test]
    fn closing_before_the_minimum_gap_yields_no_customers() {
        let generator = CustomerGenerator::new(0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generator.generate(4, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_customers() {
        let generator = CustomerGenerator::new(2).unwrap();
        let a = generator.generate(3600, &mut StdRng::seed_from_u64(99));
        let b = generator.generate(3600, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
