//! Empirical slide frequency and slide edge behaviour

mod common;

use slipgrid::grid::{Action, Cell, DEFAULT_SLIDE_PROBABILITY};

use common::{open_env, rng};

const TRIALS: usize = 100_000;

#[test]
fn slide_frequency_matches_probability() {
    let env = open_env(9, 9, true);
    let center = Cell::new(4, 4);
    let mut rng = rng(1234);

    let mut slid = 0;
    for trial in 0..TRIALS {
        let action = Action::ALL[trial % 4];
        let next = env.step(center, action, &mut rng);
        match center.manhattan(next) {
            1 => {}
            2 => slid += 1,
            other => panic!("moved {other} cells with {action}"),
        }
    }

    let rate = slid as f64 / TRIALS as f64;
    assert!(
        (rate - DEFAULT_SLIDE_PROBABILITY).abs() < 0.02,
        "observed slide rate {rate}"
    );
}

#[test]
fn no_slides_when_disabled() {
    let env = open_env(9, 9, false).with_slide_probability(1.0);
    let center = Cell::new(4, 4);
    let mut rng = rng(5);
    for action in Action::ALL.into_iter().cycle().take(1000) {
        assert_eq!(center.manhattan(env.step(center, action, &mut rng)), 1);
    }
}

#[test]
fn slide_stops_at_the_edge() {
    let env = open_env(5, 5, true).with_slide_probability(1.0);
    let mut rng = rng(0);
    // One cell from the edge: the second sub-step would leave the grid.
    assert_eq!(env.step(Cell::new(3, 2), Action::Down, &mut rng), Cell::new(4, 2));
    assert_eq!(env.step(Cell::new(2, 1), Action::Left, &mut rng), Cell::new(2, 0));
    // Two cells from the edge: both sub-steps apply.
    assert_eq!(env.step(Cell::new(2, 2), Action::Up, &mut rng), Cell::new(0, 2));
}

#[test]
fn slides_pass_over_hazards() {
    let level = common::layout(1, 4, (0, 0), (0, 3), &[(0, 1)]);
    let env = slipgrid::grid::GridEnvironment::new(&level, true).with_slide_probability(1.0);
    let mut rng = rng(0);
    let next = env.step(Cell::new(0, 0), Action::Right, &mut rng);
    assert_eq!(next, Cell::new(0, 2));
    assert_eq!(env.reward(next), -2.0);
}
