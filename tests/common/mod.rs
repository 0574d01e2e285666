#![allow(dead_code)]

use grid_traffic::simulation::{
    Coord, Direction, GridWorld, Occupant, SequentialActivation, SimConfig, SimTrafficLight,
    SimWorld,
};

/// 4x4 grid: a Right road along y=0 ending in a destination at (3,0), everything
/// else blocked.
pub fn road_row_grid() -> GridWorld {
    let mut grid = GridWorld::new(4, 4).expect("valid dimensions");
    for x in 0..4 {
        grid.place(Occupant::Road(Direction::Right), Coord::new(x, 0))
            .expect("in bounds");
        for y in 1..4 {
            grid.place(Occupant::Obstacle, Coord::new(x, y))
                .expect("in bounds");
        }
    }
    grid.place(Occupant::Destination, Coord::new(3, 0))
        .expect("in bounds");
    grid
}

/// Same as [`road_row_grid`] with a traffic light on (2,0)
pub fn road_row_grid_with_light(green: bool, period: u64) -> GridWorld {
    let mut grid = road_row_grid();
    let light = SimTrafficLight::new(green, period).expect("valid period");
    grid.place(Occupant::TrafficLight(light), Coord::new(2, 0))
        .expect("in bounds");
    grid
}

/// Single entry at (0,0), deterministic ordering
pub fn scenario_config() -> SimConfig {
    SimConfig::default()
        .with_seed(7)
        .with_entries(vec![Coord::new(0, 0)])
}

pub fn scenario_world(grid: GridWorld) -> SimWorld {
    SimWorld::new(grid, scenario_config())
        .expect("world builds")
        .with_activation(SequentialActivation)
}

/// Panics if two vehicles share a cell
pub fn assert_no_shared_cells(world: &SimWorld) {
    let mut positions: Vec<Coord> = world.vehicles().map(|v| v.position).collect();
    let total = positions.len();
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), total, "two vehicles share a cell");
}
