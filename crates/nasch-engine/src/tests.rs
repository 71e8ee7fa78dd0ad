//! Unit and regression tests for the transition engine.
//!
//! The lane-change and whole-step regression vectors are hand-checked fixed
//! configurations: every true/false outcome and every end-of-step grid below
//! was derived by applying the phase rules on paper.

use nasch_core::{Cell, Lane, Road, Velocity};

/// Lane of `length` cells with the given `(index, velocity)` vehicles.
fn lane_of(length: usize, max_velocity: Velocity, vehicles: &[(usize, Velocity)]) -> Lane {
    let mut lane = Lane::empty(length, max_velocity);
    for &(index, v) in vehicles {
        lane.set(index as i64, Cell::Occupied(v));
    }
    lane
}

/// Two-lane road from `(index, velocity)` lists, one per lane.
fn road_of(
    length: usize,
    max_velocities: [Velocity; 2],
    left: &[(usize, Velocity)],
    right: &[(usize, Velocity)],
) -> Road {
    Road::two_lane(
        lane_of(length, max_velocities[0], left),
        lane_of(length, max_velocities[1], right),
    )
    .unwrap()
}

#[cfg(test)]
mod gap {
    use super::{lane_of, road_of};
    use crate::gap::{Direction, gap, scan};
    use nasch_core::{LaneId, ModelError};

    #[test]
    fn ahead_in_same_lane_wraps_past_zero() {
        let road = road_of(5, [5, 7], &[(0, 0), (2, 0)], &[]);
        assert_eq!(gap(&road, 2, Direction::Ahead, LaneId::Left).unwrap(), 2);
    }

    #[test]
    fn behind_in_same_lane_wraps_past_zero() {
        let road = road_of(5, [5, 7], &[(2, 0), (4, 0)], &[]);
        assert_eq!(gap(&road, 2, Direction::Behind, LaneId::Left).unwrap(), 2);
    }

    #[test]
    fn ahead_in_other_lane() {
        let road = road_of(5, [5, 7], &[(2, 0)], &[(0, 0)]);
        assert_eq!(gap(&road, 2, Direction::Ahead, LaneId::Right).unwrap(), 2);
    }

    #[test]
    fn behind_in_other_lane() {
        let road = road_of(5, [5, 7], &[(2, 0)], &[(4, 0)]);
        assert_eq!(gap(&road, 2, Direction::Behind, LaneId::Right).unwrap(), 2);
    }

    #[test]
    fn adjacent_vehicle_gives_zero() {
        let lane = lane_of(5, 5, &[(1, 3), (2, 0)]);
        assert_eq!(scan(&lane, 1, Direction::Ahead), 0);
        assert_eq!(scan(&lane, 2, Direction::Behind), 0);
    }

    #[test]
    fn unobstructed_lane_saturates_at_road_length() {
        // Sole vehicle: a same-lane scan never sees the querying cell itself.
        let lane = lane_of(8, 5, &[(3, 2)]);
        assert_eq!(scan(&lane, 3, Direction::Ahead), 8);
        assert_eq!(scan(&lane, 3, Direction::Behind), 8);

        // Cross-lane query into a completely empty lane.
        let road = road_of(8, [5, 7], &[(3, 2)], &[]);
        assert_eq!(gap(&road, 3, Direction::Ahead, LaneId::Right).unwrap(), 8);
    }

    #[test]
    fn missing_lane_is_precondition_error() {
        let road = nasch_core::Road::single(lane_of(5, 5, &[(0, 1)])).unwrap();
        assert!(matches!(
            gap(&road, 0, Direction::Ahead, LaneId::Right),
            Err(ModelError::Precondition(_))
        ));
    }
}

#[cfg(test)]
mod rules {
    use crate::rules::{accelerate, dally, decelerate, impulse};
    use nasch_core::SimRng;

    #[test]
    fn accelerate_caps_at_limit() {
        assert_eq!(accelerate(0, 5), 1);
        assert_eq!(accelerate(4, 5), 5);
        assert_eq!(accelerate(5, 5), 5);
    }

    #[test]
    fn decelerate_is_monotonic() {
        assert_eq!(decelerate(5, 2), 2);
        assert_eq!(decelerate(2, 5), 2);
        assert_eq!(decelerate(0, 0), 0);
        for v in 0..=7 {
            for gap in 0..=7 {
                let out = decelerate(v, gap);
                assert!(out <= v && out <= gap);
            }
        }
    }

    #[test]
    fn dally_never_triggers_at_zero_probability() {
        let mut rng = SimRng::new(1);
        for v in 0..=5 {
            assert_eq!(dally(v, 0.0, &mut rng), v);
        }
    }

    #[test]
    fn dally_always_triggers_at_one_and_floors_at_zero() {
        let mut rng = SimRng::new(1);
        assert_eq!(dally(3, 1.0, &mut rng), 2);
        assert_eq!(dally(0, 1.0, &mut rng), 0);
    }

    #[test]
    fn dally_rate_converges_to_p() {
        let p = 0.3;
        let trials = 10_000;
        let mut rng = SimRng::new(42);
        let mut triggered = 0;
        for _ in 0..trials {
            if dally(5, p, &mut rng) == 4 {
                triggered += 1;
            }
        }
        let rate = triggered as f64 / trials as f64;
        assert!((rate - p).abs() < 0.03, "empirical dally rate {rate} too far from {p}");
    }

    #[test]
    fn impulse_caps_at_limit() {
        assert_eq!(impulse(2, 2, 7), 4);
        assert_eq!(impulse(6, 3, 7), 7);
    }
}

#[cfg(test)]
mod lane_change {
    use super::road_of;
    use crate::lane_change::can_change_lanes;
    use nasch_core::{LaneId, ModelError};

    // Condition 1: no rear-end collision if the vehicle ahead in the current
    // lane also changes lanes.  Road of 5 cells, evaluated vehicle at left:0
    // with v=2, vehicle directly ahead at left:1.

    #[test]
    fn blocked_when_front_vehicle_matches_speed() {
        let road = road_of(5, [5, 7], &[(0, 2), (1, 2)], &[]);
        assert!(!can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    #[test]
    fn blocked_when_front_vehicle_is_slower() {
        let road = road_of(5, [5, 7], &[(0, 2), (1, 0)], &[]);
        assert!(!can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    #[test]
    fn allowed_when_front_vehicle_is_faster() {
        let road = road_of(5, [5, 7], &[(0, 2), (1, 3)], &[]);
        assert!(can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    // Condition 2: enough clear road ahead in the destination lane.
    // Evaluated vehicle at right:0 with v=2, obstruction in the left lane.

    #[test]
    fn blocked_by_adjacent_leader_in_destination_lane() {
        let road = road_of(5, [5, 7], &[(1, 5)], &[(0, 2)]);
        assert!(!can_change_lanes(&road, LaneId::Right, 0).unwrap());
    }

    #[test]
    fn blocked_when_destination_gap_is_below_velocity() {
        let road = road_of(5, [5, 7], &[(2, 2)], &[(0, 2)]);
        assert!(!can_change_lanes(&road, LaneId::Right, 0).unwrap());
    }

    #[test]
    fn allowed_when_destination_gap_equals_velocity() {
        let road = road_of(5, [5, 7], &[(3, 0)], &[(0, 2)]);
        assert!(can_change_lanes(&road, LaneId::Right, 0).unwrap());
    }

    // Condition 3: the follower in the current lane stays clear should it
    // also switch.  Evaluated vehicle at right:0 with v=2, follower at
    // right:4 (directly behind under wraparound).

    #[test]
    fn blocked_by_fast_follower_in_current_lane() {
        let road = road_of(5, [5, 7], &[], &[(0, 2), (4, 4)]);
        assert!(!can_change_lanes(&road, LaneId::Right, 0).unwrap());
    }

    #[test]
    fn blocked_by_matching_follower_in_current_lane() {
        let road = road_of(5, [5, 7], &[], &[(0, 2), (4, 2)]);
        assert!(!can_change_lanes(&road, LaneId::Right, 0).unwrap());
    }

    #[test]
    fn allowed_past_slow_follower_in_current_lane() {
        let road = road_of(5, [5, 7], &[], &[(0, 2), (4, 1)]);
        assert!(can_change_lanes(&road, LaneId::Right, 0).unwrap());
    }

    // Condition 4: the follower in the destination lane stays clear.
    // Evaluated vehicle at left:0 with v=2, follower at right:4.

    #[test]
    fn blocked_by_fast_follower_in_destination_lane() {
        let road = road_of(5, [5, 7], &[(0, 2)], &[(4, 3)]);
        assert!(!can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    #[test]
    fn blocked_by_matching_follower_in_destination_lane() {
        let road = road_of(5, [5, 7], &[(0, 2)], &[(4, 2)]);
        assert!(!can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    #[test]
    fn allowed_past_slow_follower_in_destination_lane() {
        let road = road_of(5, [5, 7], &[(0, 2)], &[(4, 1)]);
        assert!(can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    // Guards.

    #[test]
    fn blocked_when_faster_than_destination_speed_limit() {
        let road = road_of(5, [7, 3], &[(0, 4)], &[(4, 1)]);
        assert!(!can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    #[test]
    fn blocked_by_laterally_adjacent_vehicle() {
        let road = road_of(5, [7, 7], &[(0, 4)], &[(0, 0), (4, 1)]);
        assert!(!can_change_lanes(&road, LaneId::Left, 0).unwrap());
    }

    #[test]
    fn empty_cell_is_precondition_error() {
        let road = road_of(5, [5, 7], &[(0, 2)], &[]);
        assert!(matches!(
            can_change_lanes(&road, LaneId::Left, 3),
            Err(ModelError::Precondition(_))
        ));
    }
}

#[cfg(test)]
mod engine {
    use super::{lane_of, road_of};
    use crate::engine::Simulation;
    use crate::observer::StepObserver;
    use nasch_core::{Impulse, LaneConfig, ModelError, Road, SimConfig};

    fn config(road_length: usize, max_velocities: &[usize], p: f64, total_steps: u64) -> SimConfig {
        SimConfig {
            road_length,
            lanes: max_velocities
                .iter()
                .map(|&max_velocity| LaneConfig { occupancy_percent: 0.0, max_velocity })
                .collect(),
            total_steps,
            dally_probability: p,
            seed: 42,
            impulse: None,
        }
    }

    /// Assert the road's occupied cells are exactly `expected`, per lane.
    fn assert_grid(road: &Road, expected: &[&[(usize, usize)]]) {
        assert_eq!(road.lanes().len(), expected.len());
        for (lane, want) in road.lanes().iter().zip(expected) {
            let got: Vec<_> = lane.vehicles().collect();
            assert_eq!(got, *want);
        }
    }

    // Whole-step regression vectors: two lanes, 10 cells, p = 0.  Each pair
    // of grids was worked through the phase rules by hand.

    #[test]
    fn step_vector_lane_change_from_left() {
        let road = road_of(10, [5, 7], &[(0, 2), (2, 1), (7, 3)], &[(2, 3), (3, 0), (5, 1)]);
        let mut sim = Simulation::with_road(config(10, &[5, 7], 0.0, 1), road).unwrap();
        sim.step().unwrap();
        assert_grid(sim.road(), &[
            &[(1, 1), (4, 2)],
            &[(1, 4), (2, 0), (4, 1), (7, 2)],
        ]);
    }

    #[test]
    fn step_vector_two_vehicles_change_together() {
        let road = road_of(10, [5, 6], &[(0, 1), (2, 2), (3, 3), (5, 0)], &[(9, 0)]);
        let mut sim = Simulation::with_road(config(10, &[5, 6], 0.0, 1), road).unwrap();
        sim.step().unwrap();
        assert_grid(sim.road(), &[
            &[(4, 1), (6, 1)],
            &[(0, 1), (2, 2), (5, 3)],
        ]);
    }

    #[test]
    fn step_vector_speed_limit_guard_blocks_changes() {
        let road = road_of(10, [6, 5], &[(0, 1), (2, 5), (3, 5), (5, 0)], &[(9, 0)]);
        let mut sim = Simulation::with_road(config(10, &[6, 5], 0.0, 1), road).unwrap();
        sim.step().unwrap();
        assert_grid(sim.road(), &[
            &[(2, 0), (4, 1), (6, 1)],
            &[(0, 1), (2, 2)],
        ]);
    }

    #[test]
    fn step_vector_front_condition_blocks_right_lane_change() {
        let road = road_of(10, [6, 5], &[(1, 2), (4, 2)], &[(0, 0), (6, 3)]);
        let mut sim = Simulation::with_road(config(10, &[6, 5], 0.0, 1), road).unwrap();
        sim.step().unwrap();
        assert_grid(sim.road(), &[
            &[(7, 3)],
            &[(1, 1), (4, 3), (9, 3)],
        ]);
    }

    #[test]
    fn step_vector_congested_left_lane() {
        let road = road_of(
            10,
            [6, 5],
            &[(1, 1), (3, 0), (5, 0), (6, 2), (7, 5)],
            &[(0, 1)],
        );
        let mut sim = Simulation::with_road(config(10, &[6, 5], 0.0, 1), road).unwrap();
        sim.step().unwrap();
        assert_grid(sim.road(), &[
            &[(0, 3), (2, 1), (4, 1)],
            &[(2, 2), (6, 1), (9, 3)],
        ]);
    }

    // Single-lane behavior.

    #[test]
    fn single_lane_deterministic_scenario() {
        let road = Road::single(lane_of(5, 5, &[(0, 0), (2, 0)])).unwrap();
        let mut sim = Simulation::with_road(config(5, &[5], 0.0, 1), road).unwrap();
        let diag = sim.step().unwrap();
        assert_eq!(diag.lane_changes, 0);
        assert_eq!(diag.dallied, 0);
        assert_grid(sim.road(), &[&[(1, 1), (3, 1)]]);
    }

    #[test]
    fn single_vehicle_wraps_around() {
        let road = Road::single(lane_of(5, 5, &[(4, 2)])).unwrap();
        let mut sim = Simulation::with_road(config(5, &[5], 0.0, 1), road).unwrap();
        sim.step().unwrap();
        // Accelerates to 3, unobstructed, moves to (4 + 3) mod 5.
        assert_grid(sim.road(), &[&[(2, 3)]]);
    }

    #[test]
    fn impulse_fires_once_at_configured_step() {
        let road = Road::single(lane_of(10, 5, &[(0, 0)])).unwrap();
        let mut cfg = config(10, &[5], 0.0, 3);
        cfg.impulse = Some(Impulse { at_step: 1, boost: 3 });
        let mut sim = Simulation::with_road(cfg, road).unwrap();

        sim.step().unwrap();
        assert_grid(sim.road(), &[&[(1, 1)]]);
        // Step 1: accelerate to 2, move to 3, then boost to 5.
        sim.step().unwrap();
        assert_grid(sim.road(), &[&[(3, 5)]]);
        // Step 2: already at the limit, no further boost.
        sim.step().unwrap();
        assert_grid(sim.road(), &[&[(8, 5)]]);
    }

    // Construction and validation.

    #[test]
    fn new_places_target_counts_per_lane() {
        let cfg = SimConfig {
            road_length: 100,
            lanes: vec![
                LaneConfig { occupancy_percent: 20.0, max_velocity: 5 },
                LaneConfig { occupancy_percent: 50.0, max_velocity: 7 },
            ],
            total_steps: 10,
            dally_probability: 0.0,
            seed: 7,
            impulse: None,
        };
        let sim = Simulation::new(cfg).unwrap();
        let lanes = sim.road().lanes();
        assert_eq!(lanes[0].occupied_count(), 20);
        assert_eq!(lanes[1].occupied_count(), 50);
        for lane in lanes {
            for (_, v) in lane.vehicles() {
                assert!(v <= lane.max_velocity());
            }
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut cfg = config(10, &[5], 0.0, 1);
        cfg.lanes[0].occupancy_percent = 150.0;
        assert!(matches!(
            Simulation::new(cfg),
            Err(ModelError::OccupancyOutOfRange(_))
        ));
    }

    #[test]
    fn with_road_rejects_mismatched_geometry() {
        let road = Road::single(lane_of(5, 5, &[(0, 0)])).unwrap();
        assert!(matches!(
            Simulation::with_road(config(10, &[5], 0.0, 1), road),
            Err(ModelError::Precondition(_))
        ));

        let road = Road::single(lane_of(10, 7, &[(0, 0)])).unwrap();
        assert!(matches!(
            Simulation::with_road(config(10, &[5], 0.0, 1), road),
            Err(ModelError::Precondition(_))
        ));
    }

    // Run-level properties.

    #[test]
    fn identical_seeds_reproduce_identical_runs() {
        let cfg = SimConfig {
            road_length: 60,
            lanes: vec![
                LaneConfig { occupancy_percent: 25.0, max_velocity: 5 },
                LaneConfig { occupancy_percent: 25.0, max_velocity: 7 },
            ],
            total_steps: 50,
            dally_probability: 0.5,
            seed: 1234,
            impulse: None,
        };
        let a = Simulation::new(cfg.clone()).unwrap().run_collect().unwrap();
        let b = Simulation::new(cfg).unwrap().run_collect().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn snapshots_record_every_step() {
        let cfg = SimConfig {
            road_length: 30,
            lanes: vec![LaneConfig { occupancy_percent: 20.0, max_velocity: 5 }],
            total_steps: 10,
            dally_probability: 0.2,
            seed: 5,
            impulse: None,
        };
        let snapshots = Simulation::new(cfg).unwrap().run_collect().unwrap();
        assert_eq!(snapshots.len(), 10);
        for (i, snap) in snapshots.iter().enumerate() {
            assert_eq!(snap.step, i as u64);
            assert_eq!(snap.lanes.len(), 1);
            assert_eq!(snap.lanes[0].len(), 30);
        }
    }

    /// Counts vehicles at every step boundary; the engine's own invariant
    /// check would abort the run first, so this is belt and braces.
    struct ConservationCheck {
        expected: usize,
        steps_seen: u64,
    }

    impl StepObserver for ConservationCheck {
        fn on_step_end(&mut self, _step: u64, road: &Road, _diag: &crate::StepDiagnostics) {
            assert_eq!(road.vehicle_count(), self.expected);
            for lane in road.lanes() {
                for (_, v) in lane.vehicles() {
                    assert!(v <= lane.max_velocity());
                }
            }
            self.steps_seen += 1;
        }
    }

    #[test]
    fn stochastic_two_lane_run_conserves_vehicles() {
        let cfg = SimConfig {
            road_length: 50,
            lanes: vec![
                LaneConfig { occupancy_percent: 30.0, max_velocity: 7 },
                LaneConfig { occupancy_percent: 30.0, max_velocity: 5 },
            ],
            total_steps: 100,
            dally_probability: 0.5,
            seed: 99,
            impulse: None,
        };
        let mut sim = Simulation::new(cfg).unwrap();
        let expected = sim.road().vehicle_count();
        assert_eq!(expected, 30);
        let mut check = ConservationCheck { expected, steps_seen: 0 };
        sim.run(&mut check).unwrap();
        assert_eq!(check.steps_seen, 100);
    }
}
