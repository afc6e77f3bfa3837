use checkout_sim::experiment::ReplicationSummary;
use checkout_sim::{Notification, Simulation, SimulationConfig, SimulationReport, Trace};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

/// Student number used to parameterize the random ranges.
const STUDENT_NUMBER: u32 = 2;
/// How many independent runs make up one experiment.
const REPLICATIONS: usize = 5;

/// A full-width separator line.
fn rule() -> String {
    "=".repeat(100)
}

/// Renders one notification the way it goes into a run's log file. Times are
/// divided by `time_scale`; nothing else depends on it.
fn render(notification: &Notification, time_scale: f64) -> String {
    let at = |t: u64| t as f64 / time_scale;
    match notification {
        Notification::Arrived {
            time,
            customer,
            shopping_duration,
            checkout_duration,
        } => format!(
            "\n[T={:7.2}s] ARRIVAL of customer #{customer}\n  Arrived: {:.2}s | Shopping: {shopping_duration}min | Checkout: {checkout_duration:.2}min",
            at(*time),
            at(*time),
        ),
        Notification::JoinedQueue {
            time,
            customer,
            arrival_time,
            shopping_duration,
            checkout_duration,
            queue_length,
            total_idle_time,
        } => format!(
            "\n[T={:7.2}s] QUEUE ENTRY of customer #{customer}\n  Arrived in store: {:.2}s | Shopping: {shopping_duration}min | Checkout: {checkout_duration:.2}min\n  *** Queue length: {queue_length} | Till idle: {total_idle_time}s ***",
            at(*time),
            at(*arrival_time),
        ),
        Notification::NewMaxQueueLength { length, .. } => {
            format!("  !!! NEW MAXIMUM QUEUE LENGTH: {length}")
        }
        Notification::CustomerDropped { time, customer } => format!(
            "\n[T={:7.2}s] QUEUE FULL, customer #{customer} turned away",
            at(*time)
        ),
        Notification::ServiceStarted {
            time,
            customer,
            wait,
            checkout_duration,
            queue_length,
            total_idle_time,
            ..
        } => format!(
            "\n[T={:7.2}s] PAYMENT of customer #{customer}\n  Waited in queue: {:.2}s | Checkout: {checkout_duration:.2}min\n  *** Queue length: {queue_length} | Till idle: {total_idle_time}s ***",
            at(*time),
            at(*wait),
        ),
        Notification::NewMaxWait { wait, .. } => {
            format!("  !!! NEW MAXIMUM QUEUE WAIT: {:.2}s", at(*wait))
        }
        Notification::IdleAccrued {
            time,
            duration,
            total_idle_time,
        } => format!(
            "[T={:7.2}s] till idle for {duration}s (total {total_idle_time}s)",
            at(*time)
        ),
    }
}

/// The whole log file of one run: header, every notification, final statistics.
fn render_run(config: &SimulationConfig, trace: &Trace, report: &SimulationReport) -> String {
    let scale = f64::from(config.time_scale);
    let scaled = report.scaled(config.time_scale);
    let mut lines = vec![
        rule(),
        "STORE CHECKOUT SIMULATION".to_string(),
        format!("Student number: {}", config.student_number),
        format!(
            "Operating hours: {} ({}s)",
            config.operating_hours,
            config.closing_time()
        ),
        format!("Time scale: {}x", config.time_scale),
        rule(),
        format!("\nGenerated customers: {}", report.total_customers),
    ];

    lines.extend(trace.iter().map(|n| render(n, scale)));

    lines.extend([
        format!("\n{}", rule()),
        "END OF SIMULATION - FINAL STATISTICS".to_string(),
        rule(),
        format!("Customers in store: {}", scaled.total_customers),
        format!("Customers served: {}", scaled.customers_served),
        format!("Maximum queue length: {}", scaled.max_queue_length),
        format!("Maximum queue wait: {:.2}s", scaled.max_wait),
        format!("Total till idle time: {:.2}s", scaled.total_idle_time),
        rule(),
    ]);
    lines.join("\n")
}

/// Runs the replications, writes their logs and prints the summary table.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = match std::env::args().nth(1) {
        Some(seed) => StdRng::seed_from_u64(seed.parse()?),
        None => StdRng::from_os_rng(),
    };

    let config = SimulationConfig {
        student_number: STUDENT_NUMBER,
        ..Default::default()
    };

    println!("{}", rule());
    println!("STORE SIMULATION WITH A FIFO CHECKOUT QUEUE");
    println!("{}", rule());
    println!("Student number: {}", config.student_number);
    println!(
        "Simulated time: {} hours (sped up {}x)",
        config.operating_hours, config.time_scale
    );
    println!("Runs: {REPLICATIONS}");

    let mut reports = Vec::with_capacity(REPLICATIONS);
    for run in 1..=REPLICATIONS {
        println!("\n{}", "*".repeat(100));
        println!("SPUSTENIE #{run}");
        println!("{}", "*".repeat(100));

        let mut simulation = Simulation::new(config.clone(), &mut rng)?;
        let mut trace = Trace::new();
        let report = simulation.run_with(&mut trace)?;

        let log_file = format!("simulation_run_{run}.log");
        fs::write(&log_file, render_run(&config, &trace, &report))?;
        info!("Run #{run}: {} notifications", trace.len());
        println!("Logs written to: {log_file}");

        reports.push(report);
    }

    println!("\n{}", rule());
    println!("RESULTS OF ALL {REPLICATIONS} RUNS");
    println!("{}", rule());
    println!(
        "{:<12} {:<15} {:<18} {:<18} {:<15}",
        "Run", "Customers", "Max wait(s)", "Max queue", "Idle(s)"
    );
    println!("{}", "-".repeat(100));
    for (i, report) in reports.iter().enumerate() {
        let scaled = report.scaled(config.time_scale);
        println!(
            "Run {:<8} {:<15} {:<18.2} {:<18} {:<15.2}",
            i + 1,
            scaled.total_customers,
            scaled.max_wait,
            scaled.max_queue_length,
            scaled.total_idle_time
        );
    }

    if let Some(summary) = ReplicationSummary::from_reports(&reports) {
        let scale = f64::from(config.time_scale);
        println!("{}", "-".repeat(100));
        println!(
            "{:<12} {:<15.2} {:<18.2} {:<18.2} {:<15.2}",
            "AVERAGE",
            summary.mean_total_customers,
            summary.mean_max_wait_seconds / scale,
            summary.mean_max_queue_length,
            summary.mean_total_idle_time_seconds / scale
        );
    }
    println!("{}", rule());

    Ok(())
}
