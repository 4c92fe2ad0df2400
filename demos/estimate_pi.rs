// Estimate π by dropping needles on a ruled floor (Buffon, 1777).
//
// A needle of length L dropped on lines D apart (L <= D) crosses a line with
// probability
//
//          2L              2L    # dropped
//  p  =  ------   =>  π ~= --- × -----------
//          πD               D    # crossing
//
// The renderer below stands in for a plot: it prints a progress line every
// few steps, the way an animation would redraw its title.
use buffon::prelude::*;
use std::f64::consts::PI;

struct Progress {
    every: usize,
    steps: usize,
}

impl Renderer for Progress {
    fn render(&mut self, batch: &BatchResult, snapshot: &Snapshot) {
        self.steps += 1;
        if self.steps % self.every == 0 {
            let (crossing, missing) = batch.split();
            println!(
                "{} (last batch: {} crossing, {} missing)",
                snapshot,
                crossing.len(),
                missing.len()
            );
        }
    }
}

fn main() {
    let config = SimConfig {
        sample_budget: 100_000,
        batch_size: 500,
        ..SimConfig::default()
    };

    let mut sim = match Simulation::new(config, rand::thread_rng()) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let lines: Vec<f64> = sim.lines().positions_within(&sim.config().field).collect();
    println!("{} lines on the field at y = {:?}", lines.len(), lines);

    let mut progress = Progress { every: 20, steps: 0 };
    let snapshot = sim.run_with(&mut progress);

    println!(
        "p: {:.5} (expected {:.5}), π_est: {}, π_true: {:.5}, absolute error: {:?}",
        snapshot.ratio().unwrap_or(f64::NAN),
        snapshot.theoretical_ratio(),
        snapshot.pi(),
        PI,
        snapshot.abs_error()
    );
}
