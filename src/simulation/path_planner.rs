//! Direction-constrained A* over the grid
//!
//! The grid is turned into a directed graph with one node per cell and one edge per
//! legal transition. Only roads, obstacles and destinations change that graph, so it
//! is built once and reused for every vehicle.

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::{EdgeFiltered, EdgeRef};
use std::collections::HashMap;

use super::error::{SimError, SimResult};
use super::grid::GridWorld;
use super::types::Coord;

/// Whether a vehicle may step from `from` into the adjacent cell `to`.
///
/// Both the departure road and, when present, the arrival road must permit the move.
/// Destinations are not considered here since that depends on the vehicle's goal.
pub fn transition_allowed(grid: &GridWorld, from: Coord, to: Coord) -> bool {
    if grid.has_obstacle(to) {
        return false;
    }
    let departure_ok = grid
        .road_at(from)
        .map_or(true, |direction| direction.permits(from, to));
    let arrival_ok = grid
        .road_at(to)
        .map_or(true, |direction| direction.permits(from, to));
    departure_ok && arrival_ok
}

/// Cached transition graph for path planning
pub struct PathPlanner {
    /// One node per cell, indexed `y * width + x`
    graph: DiGraph<Coord, ()>,

    width: i32,
    height: i32,

    /// Cells holding a destination, indexed like the graph nodes
    destination_cells: Vec<bool>,

    /// Cached path results
    path_cache: HashMap<Coord, HashMap<Coord, Vec<Coord>>>,
}

impl PathPlanner {
    pub fn new(grid: &GridWorld) -> Self {
        let width = grid.width();
        let height = grid.height();
        let mut graph = DiGraph::with_capacity(grid.cell_count(), 0);
        let mut destination_cells = Vec::with_capacity(grid.cell_count());

        for y in 0..height {
            for x in 0..width {
                let coord = Coord::new(x, y);
                graph.add_node(coord);
                destination_cells.push(grid.has_destination(coord));
            }
        }

        let mut planner = Self {
            graph,
            width,
            height,
            destination_cells,
            path_cache: HashMap::new(),
        };

        for y in 0..height {
            for x in 0..width {
                let from = Coord::new(x, y);
                for to in grid.neighbors(from) {
                    if transition_allowed(grid, from, to) {
                        let (a, b) = (planner.node(from), planner.node(to));
                        planner.graph.add_edge(a, b, ());
                    }
                }
            }
        }

        planner
    }

    fn node(&self, coord: Coord) -> NodeIndex {
        NodeIndex::new((coord.y * self.width + coord.x) as usize)
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Number of legal transitions in the graph
    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Cells reachable in one step from `coord`, ignoring destinations
    pub fn successors(&self, coord: Coord) -> Vec<Coord> {
        if !self.in_bounds(coord) {
            return Vec::new();
        }
        self.graph
            .neighbors(self.node(coord))
            .map(|node| self.graph[node])
            .collect()
    }

    /// Plan a route from `start` to `goal`.
    ///
    /// The result excludes `start` and ends with `goal`. An empty route means the goal
    /// is unreachable (or already reached); callers treat it as "no path", not an error.
    pub fn plan(&mut self, start: Coord, goal: Coord) -> SimResult<Vec<Coord>> {
        for coord in [start, goal] {
            if !self.in_bounds(coord) {
                return Err(SimError::OutOfBounds(coord));
            }
        }
        if start == goal {
            return Ok(Vec::new());
        }

        // Check cache first
        if let Some(path) = self.path_cache.get(&start).and_then(|paths| paths.get(&goal)) {
            return Ok(path.clone());
        }

        let start_node = self.node(start);
        let goal_node = self.node(goal);

        // Another vehicle's destination is never entered
        let filtered = EdgeFiltered::from_fn(&self.graph, |edge: EdgeReference<'_, ()>| {
            let target = edge.target();
            target == goal_node || !self.destination_cells[target.index()]
        });

        let path: Vec<Coord> = astar(
            &filtered,
            start_node,
            |node| node == goal_node,
            |_| 1u32,
            |node| self.graph[node].manhattan(&goal),
        )
        .map(|(_, nodes)| nodes.into_iter().skip(1).map(|n| self.graph[n]).collect())
        .unwrap_or_default();

        self.path_cache
            .entry(start)
            .or_default()
            .insert(goal, path.clone());

        Ok(path)
    }
}
