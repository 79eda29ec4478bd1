//! Benchmark for a single day's solve.
//!
//! Run with: cargo run --release --bin bench

use std::time::Instant;

use shift_scheduler_core::config::SolverConfig;
use shift_scheduler_core::demo_data::{self, DemoData};
use shift_scheduler_core::instance::build_instance;
use shift_scheduler_core::memory_store::InMemoryStore;
use shift_scheduler_core::model::{solve_day, SolveOutcome};

#[tokio::main]
async fn main() {
    let dataset = demo_data::generate(DemoData::Large);
    let anchor_date = dataset.anchor_date;
    let n_staff = dataset.staff.len();
    let store = InMemoryStore::new(dataset.staff, dataset.availability, dataset.overrides, dataset.weekday_templates);
    let config = SolverConfig::default();

    println!("Benchmark: single-day solve");
    println!("  Staff: {n_staff}");
    println!("  Date: {anchor_date}");
    println!();

    let instance = build_instance(&store, anchor_date, &config).await.expect("assembling instance");

    let start = Instant::now();
    let outcome = solve_day(&instance, &config);
    let elapsed = start.elapsed();

    match outcome {
        Ok(SolveOutcome::Optimal(assignment)) => {
            println!("Solved to optimality in {elapsed:.2?}");
            println!("  Total assigned slots: {}", assignment.assigned.iter().flatten().filter(|&&a| a).count());
        }
        Ok(SolveOutcome::Feasible(assignment)) => {
            println!("Hit the time limit with a feasible incumbent in {elapsed:.2?}");
            println!("  Total assigned slots: {}", assignment.assigned.iter().flatten().filter(|&&a| a).count());
        }
        Err(err) => {
            println!("Solve failed after {elapsed:.2?}: {err}");
        }
    }
}
