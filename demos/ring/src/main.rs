//! ring — two-lane circular road demo for the nasch traffic model.
//!
//! Simulates a 300-cell ring road with a fast left lane and a slow right
//! lane at 10% occupancy, writing the velocity grid and per-step summaries
//! as CSV.  Feed `velocity_grid.csv` to any plotting tool to render the
//! classic time-vs-position traffic heatmap.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use nasch_core::{LaneConfig, SimConfig};
use nasch_engine::Simulation;
use nasch_output::{CsvWriter, GridOutputObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROAD_LENGTH: usize = 300;
const STEPS:       u64   = 100;
const SEED:        u64   = 42;
const DALLY_P:     f64   = 0.2;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== ring — two-lane nasch traffic model ===");
    println!("Cells: {ROAD_LENGTH}  |  Steps: {STEPS}  |  Dally p: {DALLY_P}  |  Seed: {SEED}");
    println!();

    // 1. Configure: fast left lane (limit 7), slow right lane (limit 5).
    let config = SimConfig {
        road_length: ROAD_LENGTH,
        lanes: vec![
            LaneConfig { occupancy_percent: 10.0, max_velocity: 7 },
            LaneConfig { occupancy_percent: 10.0, max_velocity: 5 },
        ],
        total_steps:       STEPS,
        dally_probability: DALLY_P,
        seed:              SEED,
        impulse:           None,
    };

    // 2. Build the simulation.
    let mut sim = Simulation::new(config.clone())?;
    let vehicles = sim.road().vehicle_count();
    println!("Placed {vehicles} vehicles across {} lanes", config.lanes.len());

    // 3. Set up CSV output.
    std::fs::create_dir_all("output/ring")?;
    let writer = CsvWriter::new(Path::new("output/ring"), ROAD_LENGTH)?;
    let mut obs = GridOutputObserver::new(writer);

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  output/ring/velocity_grid.csv  : {} rows", STEPS * 2);
    println!("  output/ring/step_summaries.csv : {STEPS} rows");
    println!();

    // 6. Final state, per lane.
    let snapshot = sim.snapshot();
    println!("{:<8} {:<10} {:<14}", "Lane", "Vehicles", "Mean velocity");
    println!("{}", "-".repeat(34));
    for (lane, row) in ["left", "right"].iter().zip(&snapshot.lanes) {
        let velocities: Vec<i64> = row.iter().copied().filter(|&v| v >= 0).collect();
        let mean = if velocities.is_empty() {
            0.0
        } else {
            velocities.iter().sum::<i64>() as f64 / velocities.len() as f64
        };
        println!("{:<8} {:<10} {:<14.2}", lane, velocities.len(), mean);
    }

    Ok(())
}
