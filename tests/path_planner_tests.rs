//! Path planning tests

mod common;

use grid_traffic::simulation::{
    parse_layout, transition_allowed, Coord, Direction, EntryPoints, GlyphDictionary, GridWorld,
    Occupant, PathPlanner, SimConfig, SimError, SimWorld, DEMO_DICTIONARY, DEMO_LAYOUT,
};

fn demo_grid() -> GridWorld {
    let dictionary = GlyphDictionary::from_json(DEMO_DICTIONARY).unwrap();
    parse_layout(DEMO_LAYOUT, &dictionary).unwrap()
}

#[test]
fn test_straight_road_path_matches_manhattan_distance() {
    let grid = common::road_row_grid();
    let mut planner = PathPlanner::new(&grid);
    let start = Coord::new(0, 0);
    let goal = Coord::new(3, 0);

    let path = planner.plan(start, goal).unwrap();

    assert_eq!(
        path,
        vec![Coord::new(1, 0), Coord::new(2, 0), Coord::new(3, 0)]
    );
    assert_eq!(path.len() as u32, start.manhattan(&goal));
}

#[test]
fn test_demo_paths_respect_direction_constraints() {
    let grid = demo_grid();
    let mut planner = PathPlanner::new(&grid);
    let entries = EntryPoints::Corners.resolve(grid.width(), grid.height());
    let destinations = grid.destinations();
    assert_eq!(destinations.len(), 4);

    for &start in &entries {
        for &goal in &destinations {
            let path = planner.plan(start, goal).unwrap();
            assert!(!path.is_empty(), "no path from {} to {}", start, goal);
            assert_eq!(path.last(), Some(&goal));

            let mut from = start;
            for &to in &path {
                assert!(from.is_adjacent(&to), "{} -> {} is not a single step", from, to);
                assert!(transition_allowed(&grid, from, to));
                if let Some(direction) = grid.road_at(from) {
                    assert!(direction.permits(from, to));
                }
                assert!(!grid.has_obstacle(to));
                assert!(to == goal || !grid.has_destination(to));
                from = to;
            }
        }
    }
}

#[test]
fn test_unreachable_goal_returns_empty_path() {
    let mut grid = GridWorld::new(3, 1).unwrap();
    grid.place(Occupant::Road(Direction::Left), Coord::new(0, 0))
        .unwrap();
    grid.place(Occupant::Destination, Coord::new(2, 0)).unwrap();

    let mut planner = PathPlanner::new(&grid);
    assert!(planner
        .plan(Coord::new(0, 0), Coord::new(2, 0))
        .unwrap()
        .is_empty());
}

#[test]
fn test_start_equal_to_goal_returns_empty_path() {
    let grid = common::road_row_grid();
    let mut planner = PathPlanner::new(&grid);
    assert!(planner
        .plan(Coord::new(3, 0), Coord::new(3, 0))
        .unwrap()
        .is_empty());
}

#[test]
fn test_out_of_bounds_endpoints_are_rejected() {
    let grid = common::road_row_grid();
    let mut planner = PathPlanner::new(&grid);
    assert!(matches!(
        planner.plan(Coord::new(0, 0), Coord::new(4, 0)),
        Err(SimError::OutOfBounds(_))
    ));
    assert!(matches!(
        planner.plan(Coord::new(-1, 0), Coord::new(3, 0)),
        Err(SimError::OutOfBounds(_))
    ));
}

#[test]
fn test_foreign_destinations_are_never_entered() {
    let mut grid = GridWorld::new(3, 1).unwrap();
    grid.place(Occupant::Road(Direction::Right), Coord::new(0, 0))
        .unwrap();
    grid.place(Occupant::Destination, Coord::new(1, 0)).unwrap();
    grid.place(Occupant::Destination, Coord::new(2, 0)).unwrap();

    let mut planner = PathPlanner::new(&grid);
    assert_eq!(
        planner.plan(Coord::new(0, 0), Coord::new(1, 0)).unwrap(),
        vec![Coord::new(1, 0)]
    );
    // The only route to (2,0) runs through someone else's destination
    assert!(planner
        .plan(Coord::new(0, 0), Coord::new(2, 0))
        .unwrap()
        .is_empty());
}

#[test]
fn test_arrival_road_direction_is_also_checked() {
    let mut grid = GridWorld::new(2, 1).unwrap();
    grid.place(Occupant::Road(Direction::Right), Coord::new(0, 0))
        .unwrap();
    grid.place(Occupant::Road(Direction::Left), Coord::new(1, 0))
        .unwrap();

    assert!(!transition_allowed(&grid, Coord::new(0, 0), Coord::new(1, 0)));

    let mut planner = PathPlanner::new(&grid);
    assert!(planner
        .plan(Coord::new(0, 0), Coord::new(1, 0))
        .unwrap()
        .is_empty());
}

#[test]
fn test_cell_without_road_allows_all_neighbors() {
    let mut grid = GridWorld::new(3, 3).unwrap();
    grid.place(Occupant::Destination, Coord::new(2, 2)).unwrap();

    let planner = PathPlanner::new(&grid);
    assert_eq!(planner.successors(Coord::new(1, 1)).len(), 8);

    let mut planner = planner;
    let path = planner.plan(Coord::new(0, 0), Coord::new(2, 2)).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.last(), Some(&Coord::new(2, 2)));
}

#[test]
fn test_transition_count_tracks_obstacles() {
    let mut grid = GridWorld::new(3, 3).unwrap();
    // 4 corners with 3 neighbors, 4 edge cells with 5, the center with 8
    assert_eq!(PathPlanner::new(&grid).transition_count(), 40);

    grid.place(Occupant::Obstacle, Coord::new(1, 1)).unwrap();
    // Every move into the center is gone; moves out of it stay
    assert_eq!(PathPlanner::new(&grid).transition_count(), 32);
}

#[test]
fn test_road_direction_limits_successors() {
    let mut grid = GridWorld::new(3, 3).unwrap();
    let center = Coord::new(1, 1);
    grid.place(Occupant::Road(Direction::Up), center).unwrap();

    let planner = PathPlanner::new(&grid);
    let successors = planner.successors(center);
    assert_eq!(successors.len(), 3);
    assert!(successors.iter().all(|c| c.y == 2));
}

#[test]
fn test_planning_is_deterministic() {
    let grid = demo_grid();
    let start = Coord::new(0, 0);
    let goal = Coord::new(8, 1);

    let first = PathPlanner::new(&grid).plan(start, goal).unwrap();
    let second = PathPlanner::new(&grid).plan(start, goal).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_layout_changes_invalidate_cached_paths() {
    let mut grid = GridWorld::new(3, 1).unwrap();
    grid.place(Occupant::Destination, Coord::new(2, 0)).unwrap();
    let config = SimConfig::default().with_entries(Vec::new());
    let mut world = SimWorld::new(grid, config).unwrap();

    let start = Coord::new(0, 0);
    let goal = Coord::new(2, 0);
    assert_eq!(
        world.plan(start, goal).unwrap(),
        vec![Coord::new(1, 0), goal]
    );

    world.place(Occupant::Obstacle, Coord::new(1, 0)).unwrap();
    assert!(world.plan(start, goal).unwrap().is_empty());

    world.remove(&Occupant::Obstacle, Coord::new(1, 0)).unwrap();
    assert_eq!(
        world.plan(start, goal).unwrap(),
        vec![Coord::new(1, 0), goal]
    );
}
