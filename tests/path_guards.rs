//! Greedy walks stop on cycles and step limits instead of looping

mod common;

use slipgrid::{
    grid::{Action, Cell, GridEnvironment},
    q_learning::{PathEnd, QTable, default_step_limit, extract_path},
};

use common::{layout, rng};

#[test]
fn untrained_table_ends_in_a_cycle() {
    // Every value is zero, so the first valid action wins: down from the
    // corner, then straight back up.
    let level = layout(3, 3, (0, 0), (2, 2), &[]);
    let env = GridEnvironment::new(&level, false);
    let table = QTable::new();

    let path = extract_path(&table, &env, level.start(), 100, &mut rng(0)).unwrap();
    assert_eq!(path.end, PathEnd::Cycle);
    assert_eq!(path.actions, vec![Action::Down, Action::Up]);
    assert!(table.is_empty());
}

#[test]
fn ping_pong_values_are_caught() {
    let level = layout(2, 2, (0, 0), (1, 1), &[]);
    let env = GridEnvironment::new(&level, false);
    let mut table = QTable::new();
    table.set(Cell::new(0, 0), Action::Right, 1.0);
    table.set(Cell::new(0, 1), Action::Left, 1.0);

    let path = extract_path(&table, &env, level.start(), 100, &mut rng(0)).unwrap();
    assert_eq!(path.end, PathEnd::Cycle);
    assert_eq!(path.to_string(), "R L");
}

#[test]
fn sliding_walks_are_bounded_by_the_step_limit() {
    let level = layout(2, 2, (0, 0), (1, 1), &[]);
    let env = GridEnvironment::new(&level, true).with_slide_probability(0.0);
    let mut table = QTable::new();
    table.set(Cell::new(0, 0), Action::Right, 1.0);
    table.set(Cell::new(0, 1), Action::Left, 1.0);

    let limit = default_step_limit(&env);
    assert_eq!(limit, 16);
    let path = extract_path(&table, &env, level.start(), limit, &mut rng(0)).unwrap();
    assert_eq!(path.end, PathEnd::StepLimit);
    assert_eq!(path.len(), limit);
}

#[test]
fn greedy_walk_continues_through_a_hazard() {
    let level = layout(1, 4, (0, 0), (0, 3), &[(0, 1)]);
    let env = GridEnvironment::new(&level, false);
    let mut table = QTable::new();
    for col in 0..3 {
        table.set(Cell::new(0, col), Action::Right, 5.0);
    }

    let path = extract_path(&table, &env, level.start(), 10, &mut rng(0)).unwrap();
    assert_eq!(path.to_string(), "R R R");
    assert_eq!(path.end, PathEnd::ReachedGoal);
    assert!(path.visited().any(|cell| env.is_hazard(cell)));
}
