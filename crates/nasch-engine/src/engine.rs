//! The `Simulation` struct and its step loop.

use log::{debug, trace};

use nasch_core::{
    Cell, Lane, ModelError, ModelResult, Road, SimConfig, SimRng,
    config::vehicle_target,
};

use crate::gap::{Direction, scan};
use crate::lane_change::can_change_lanes;
use crate::observer::StepObserver;
use crate::rules;
use crate::snapshot::{Snapshot, SnapshotRecorder};

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Per-step counters returned by [`Simulation::step`] and reported to
/// observers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StepDiagnostics {
    /// Lane changes committed this step.
    pub lane_changes: usize,
    /// Vehicles that lost a velocity unit to the dally draw this step.
    pub dallied: usize,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The transition engine: owns the road state, the seeded random source, and
/// the step counter, and drives the snapshot-then-commit phase sequence.
///
/// The engine exclusively owns its [`Road`] between steps; a step is atomic
/// to the caller.  Identical configuration and seed reproduce identical runs.
pub struct Simulation {
    config: SimConfig,
    road: Road,
    rng: SimRng,
    /// Steps completed so far; the next `step()` executes this index.
    steps_completed: u64,
    /// Vehicle count fixed at initialization; conservation is checked
    /// against it at every step boundary.
    vehicle_count: usize,
}

impl Simulation {
    // ── Construction ──────────────────────────────────────────────────────

    /// Validate `config`, then build a road with each lane's target vehicle
    /// count placed at distinct uniform-random cells with uniform random
    /// initial velocities in `[0, max_velocity]`.
    pub fn new(config: SimConfig) -> ModelResult<Self> {
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let mut lanes = Vec::with_capacity(config.lanes.len());
        for lane_cfg in &config.lanes {
            let mut lane = Lane::empty(config.road_length, lane_cfg.max_velocity);
            let count = vehicle_target(lane_cfg.occupancy_percent, config.road_length);
            for index in rng.sample_indices(config.road_length, count) {
                let v = rng.gen_range(0..=lane_cfg.max_velocity);
                lane.set(index as i64, Cell::Occupied(v));
            }
            lanes.push(lane);
        }

        let road = build_road(lanes)?;
        Ok(Self::assemble(config, road, rng))
    }

    /// Build a simulation over a hand-constructed road (fixtures, regression
    /// vectors).  The road must agree with `config` on lane count, length,
    /// and speed limits, and must already satisfy the velocity bounds.
    pub fn with_road(config: SimConfig, road: Road) -> ModelResult<Self> {
        config.validate()?;
        if road.lanes().len() != config.lanes.len() {
            return Err(ModelError::Precondition("road lane count does not match configuration"));
        }
        if road.road_length() != config.road_length {
            return Err(ModelError::Precondition("road length does not match configuration"));
        }
        for (lane, lane_cfg) in road.lanes().iter().zip(&config.lanes) {
            if lane.max_velocity() != lane_cfg.max_velocity {
                return Err(ModelError::Precondition("lane speed limit does not match configuration"));
            }
        }
        road.check_invariants(road.vehicle_count(), 0)?;

        let rng = SimRng::new(config.seed);
        Ok(Self::assemble(config, road, rng))
    }

    fn assemble(config: SimConfig, road: Road, rng: SimRng) -> Self {
        let vehicle_count = road.vehicle_count();
        Self {
            config,
            road,
            rng,
            steps_completed: 0,
            vehicle_count,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn road(&self) -> &Road {
        &self.road
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn steps_completed(&self) -> u64 {
        self.steps_completed
    }

    /// Velocity grid of the current state (`-1` for empty cells).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.road, self.steps_completed)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current position to `config.total_steps`, invoking
    /// observer hooks at every step boundary.
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) -> ModelResult<()> {
        while self.steps_completed < self.config.total_steps {
            let step = self.steps_completed;
            observer.on_step_start(step);
            let diag = self.step()?;
            observer.on_step_end(step, &self.road, &diag);
        }
        observer.on_run_end(self.steps_completed);
        Ok(())
    }

    /// Run to completion and return the recorded snapshot sequence, one
    /// entry per step.
    pub fn run_collect(&mut self) -> ModelResult<Vec<Snapshot>> {
        let mut recorder = SnapshotRecorder::new();
        self.run(&mut recorder)?;
        Ok(recorder.into_snapshots())
    }

    // ── One step ──────────────────────────────────────────────────────────

    /// Execute one timestep and return its diagnostics.
    ///
    /// Mutates the road in place.  Any returned error (a detected invariant
    /// violation) is fatal to the run; the state is never silently repaired.
    pub fn step(&mut self) -> ModelResult<StepDiagnostics> {
        let step = self.steps_completed;

        self.accelerate_all();

        // Frozen post-acceleration view.  Lane-change decisions and the
        // deceleration gaps both read from here, which is what makes the
        // per-vehicle updates order-independent.
        let frozen = self.road.clone();

        let lane_changes = if self.road.is_two_lane() {
            self.change_lanes(&frozen, step)?
        } else {
            0
        };
        let dallied = self.decelerate_and_dally(&frozen)?;
        self.move_all(step)?;
        self.apply_impulse(step);

        self.road.check_invariants(self.vehicle_count, step)?;
        self.steps_completed += 1;

        debug!("step {step}: {lane_changes} lane changes, {dallied} dallied");
        Ok(StepDiagnostics { lane_changes, dallied })
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Phase ①: velocity-only writes; occupancy is untouched, so gap queries
    /// later in the step are unaffected by the in-place update.
    fn accelerate_all(&mut self) {
        for lane in self.road.lanes_mut() {
            let max = lane.max_velocity();
            for index in 0..lane.len() {
                if let Some(v) = lane.cell(index as i64).velocity() {
                    lane.set(index as i64, Cell::Occupied(rules::accelerate(v, max)));
                }
            }
        }
    }

    /// Phase ③: iterate the *snapshot's* occupied cells (left lane first,
    /// ascending index), so each vehicle is evaluated exactly once per step
    /// and a committed mover is never revisited in its destination lane.
    fn change_lanes(&mut self, frozen: &Road, step: u64) -> ModelResult<usize> {
        let mut committed = 0;
        for &id in frozen.lane_ids() {
            let src = frozen.lane(id)?;
            for (index, v) in src.vehicles() {
                // Trigger: the vehicle would otherwise have to decelerate.
                if v <= scan(src, index, Direction::Ahead) {
                    continue;
                }
                if can_change_lanes(frozen, id, index)? {
                    let other = id.opposite();
                    self.road.lane_mut(other)?.set(index as i64, Cell::Occupied(v));
                    self.road.lane_mut(id)?.set(index as i64, Cell::Empty);
                    committed += 1;
                    trace!("step {step}: lane change at cell {index}, {id} -> {other}");
                }
            }
        }
        Ok(committed)
    }

    /// Phase ④: live occupancy (post lane-change), gaps from the frozen
    /// snapshot of each vehicle's *current* lane.  Fixed iteration order
    /// keeps the dally RNG stream deterministic.
    fn decelerate_and_dally(&mut self, frozen: &Road) -> ModelResult<usize> {
        let p = self.config.dally_probability;
        let mut dallied = 0;
        for &id in self.road.lane_ids() {
            let frozen_lane = frozen.lane(id)?;
            let lane = self.road.lane_mut(id)?;
            for index in 0..lane.len() {
                if let Some(v) = lane.cell(index as i64).velocity() {
                    let forward_gap = scan(frozen_lane, index, Direction::Ahead);
                    let capped = rules::decelerate(v, forward_gap);
                    let final_v = rules::dally(capped, p, &mut self.rng);
                    if final_v < capped {
                        dallied += 1;
                    }
                    lane.set(index as i64, Cell::Occupied(final_v));
                }
            }
        }
        Ok(dallied)
    }

    /// Phase ⑤: per lane, destinations are computed from a pre-move copy and
    /// committed into a fresh buffer in a single pass — no vehicle can
    /// observe another's move, no source cell is overwritten mid-pass.  Two
    /// distinct vehicles claiming one destination cell means an upstream gap
    /// computation was wrong; that is surfaced, never patched over.
    fn move_all(&mut self, step: u64) -> ModelResult<()> {
        for &id in self.road.lane_ids() {
            let lane = self.road.lane_mut(id)?;
            let n = lane.len();
            let before = lane.cells().to_vec();
            let mut next = vec![Cell::Empty; n];
            for (index, cell) in before.iter().enumerate() {
                if let Some(v) = cell.velocity() {
                    let dest = (index + v) % n;
                    if next[dest].is_occupied() {
                        return Err(ModelError::DestinationCollision { step, lane: id, cell: dest });
                    }
                    next[dest] = Cell::Occupied(v);
                }
            }
            lane.replace_cells(next);
        }
        Ok(())
    }

    /// Phase ⑥: one-time boost, single-lane roads only (enforced at
    /// configuration time).
    fn apply_impulse(&mut self, step: u64) {
        let Some(impulse) = self.config.impulse else {
            return;
        };
        if impulse.at_step != step {
            return;
        }
        let lane = &mut self.road.lanes_mut()[0];
        let max = lane.max_velocity();
        for index in 0..lane.len() {
            if let Some(v) = lane.cell(index as i64).velocity() {
                lane.set(index as i64, Cell::Occupied(rules::impulse(v, impulse.boost, max)));
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_road(mut lanes: Vec<Lane>) -> ModelResult<Road> {
    match lanes.len() {
        1 => Road::single(lanes.remove(0)),
        2 => {
            let right = lanes.remove(1);
            let left = lanes.remove(0);
            Road::two_lane(left, right)
        }
        n => Err(ModelError::BadLaneCount(n)),
    }
}
