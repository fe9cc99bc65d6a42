//! Greedy paths after training on small open and hazardous grids

mod common;

use slipgrid::{
    grid::{Action, Cell},
    q_learning::PathEnd,
};

use common::{layout, seeded_session};

#[test]
fn open_grid_path_is_shortest() {
    let level = layout(4, 4, (0, 0), (3, 3), &[]);
    let mut session = seeded_session(level, false, 42);
    let result = session.train(1000).unwrap();
    assert_eq!(result.goals, 1000);

    let path = session.extract_path().unwrap();
    assert_eq!(path.end, PathEnd::ReachedGoal, "path: {path}");
    assert_eq!(path.len(), 6, "path: {path}");
    assert!(
        path.actions
            .iter()
            .all(|&a| a == Action::Down || a == Action::Right),
        "path: {path}"
    );
    assert_eq!(path.final_cell(), Cell::new(3, 3));
}

#[test]
fn values_grow_towards_the_goal() {
    let level = layout(4, 4, (0, 0), (3, 3), &[]);
    let mut session = seeded_session(level, false, 7);
    session.train(1000).unwrap();

    let values = session.dump_values();
    let near = values.get(Cell::new(3, 2)).and_then(|e| e.value()).unwrap();
    let far = values.get(Cell::new(0, 0)).and_then(|e| e.value()).unwrap();
    assert!(near > far, "near {near} should exceed far {far}");
    assert!(near > 50.0);
}

#[test]
fn extraction_does_not_touch_the_table() {
    let level = layout(4, 4, (0, 0), (3, 3), &[(1, 1)]);
    let mut session = seeded_session(level, false, 3);
    session.train(200).unwrap();

    let before = session.dump_values();
    let size = session.agent().q_table().len();
    session.extract_path().unwrap();
    session.extract_path().unwrap();
    assert_eq!(session.dump_values(), before);
    assert_eq!(session.agent().q_table().len(), size);
}

#[test]
fn goal_adjacent_start_takes_one_move() {
    let level = layout(1, 2, (0, 0), (0, 1), &[]);
    let mut session = seeded_session(level, false, 1);
    session.train(50).unwrap();

    let path = session.extract_path().unwrap();
    assert_eq!(path.actions, vec![Action::Right]);
    assert!(path.reached_goal());
}
