//! Main simulation world that ties everything together
//!
//! `SimWorld` owns the grid, the vehicle table, the step counter and every random
//! source. One call to [`SimWorld::step`] runs the fixed phase order: traffic
//! lights, then vehicles in a fresh activation order, then spawning.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

use super::activation::{ActivationOrder, ShuffledActivation};
use super::config::SimConfig;
use super::error::{SimError, SimResult};
use super::grid::{GridWorld, Occupant};
use super::path_planner::PathPlanner;
use super::spawner::{self, SpawnController, SpawnReport};
use super::types::{Coord, SimId, VehicleId};
use super::vehicle::{SimVehicle, VehicleUpdateResult};

/// Per-step outcome counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Value of the step counter after this step
    pub step: u64,
    /// Vehicles removed on arrival during this step
    pub arrived: usize,
    pub total_arrived: u64,
    pub advanced: usize,
    pub held: usize,
    pub idle: usize,
    /// Vehicles created by the spawn wave at the end of this step
    pub spawned: usize,
}

/// The main simulation world
pub struct SimWorld {
    grid: GridWorld,

    /// Active vehicles, keyed by id so iteration order is stable
    vehicles: BTreeMap<VehicleId, SimVehicle>,

    /// Transition graph, rebuilt lazily after the road layout changes
    planner: Option<PathPlanner>,

    spawner: SpawnController,

    /// Per-step vehicle ordering
    activation: Box<dyn ActivationOrder>,

    /// Destination choice
    rng: StdRng,

    /// Next ID to assign
    next_id: usize,

    step_count: u64,
    total_arrived: u64,
    total_spawned: u64,
}

impl SimWorld {
    /// Create a world over a fully laid out grid and run the initial spawn wave
    pub fn new(grid: GridWorld, config: SimConfig) -> SimResult<Self> {
        let entries = config.entry_points.resolve(grid.width(), grid.height());
        if let Some(bad) = entries.iter().find(|entry| !grid.in_bounds(**entry)) {
            return Err(SimError::Configuration(format!(
                "entry point {} lies outside the {}x{} grid",
                bad,
                grid.width(),
                grid.height()
            )));
        }
        if let Some(blocked) = entries.iter().find(|entry| grid.has_obstacle(**entry)) {
            return Err(SimError::Configuration(format!(
                "entry point {} is blocked by an obstacle",
                blocked
            )));
        }
        let spawner = SpawnController::new(entries, config.spawn_interval)?;

        let (rng, activation) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                ShuffledActivation::with_seed(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_os_rng(), ShuffledActivation::new()),
        };

        let mut world = Self {
            planner: Some(PathPlanner::new(&grid)),
            grid,
            vehicles: BTreeMap::new(),
            spawner,
            activation: Box::new(activation),
            rng,
            next_id: 0,
            step_count: 0,
            total_arrived: 0,
            total_spawned: 0,
        };

        info!(
            "Created {}x{} world with {} entry points and {} destinations",
            world.grid.width(),
            world.grid.height(),
            world.spawner.entries().len(),
            world.grid.destinations().len()
        );

        world.spawn_wave();
        Ok(world)
    }

    /// Replace the activation order, e.g. with a deterministic one for tests
    pub fn with_activation(mut self, activation: impl ActivationOrder + 'static) -> Self {
        self.activation = Box::new(activation);
        self
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn total_arrived(&self) -> u64 {
        self.total_arrived
    }

    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    pub fn spawner(&self) -> &SpawnController {
        &self.spawner
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.get(&id)
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &SimVehicle> {
        self.vehicles.values()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Place a layout occupant after construction. Vehicles must come from spawning.
    pub fn place(&mut self, occupant: Occupant, coord: Coord) -> SimResult<()> {
        if let Occupant::Vehicle(id) = occupant {
            return Err(SimError::Configuration(format!(
                "{} cannot be placed directly; vehicles are created by spawning",
                id
            )));
        }
        let invalidates = occupant.shapes_paths();
        self.grid.place(occupant, coord)?;
        if invalidates {
            self.planner = None;
        }
        Ok(())
    }

    /// Remove a layout occupant. Vehicles leave the grid only by arriving.
    pub fn remove(&mut self, occupant: &Occupant, coord: Coord) -> SimResult<()> {
        if let Occupant::Vehicle(id) = occupant {
            return Err(SimError::Configuration(format!(
                "{} cannot be removed directly",
                id
            )));
        }
        self.grid.remove(occupant, coord)?;
        if occupant.shapes_paths() {
            self.planner = None;
        }
        Ok(())
    }

    /// Plan a route on the current layout
    pub fn plan(&mut self, start: Coord, goal: Coord) -> SimResult<Vec<Coord>> {
        let grid = &self.grid;
        self.planner
            .get_or_insert_with(|| PathPlanner::new(grid))
            .plan(start, goal)
    }

    /// Create one vehicle at `entry`
    pub fn spawn_vehicle_at(&mut self, entry: Coord) -> SimResult<VehicleId> {
        let id = VehicleId(SimId(self.next_id));
        let grid = &self.grid;
        let planner = self.planner.get_or_insert_with(|| PathPlanner::new(grid));
        let vehicle = spawner::spawn_vehicle(
            id,
            entry,
            self.step_count,
            &mut self.grid,
            planner,
            &mut self.rng,
        )?;

        self.next_sim_id();
        self.total_spawned += 1;
        self.vehicles.insert(id, vehicle);
        Ok(id)
    }

    /// Attempt one vehicle per entry coordinate
    pub fn spawn_wave(&mut self) -> SpawnReport {
        let mut report = SpawnReport::default();

        for entry in self.spawner.entries().to_vec() {
            match self.spawn_vehicle_at(entry) {
                Ok(id) => {
                    if let Some(vehicle) = self.vehicles.get(&id).filter(|v| v.is_idle()) {
                        let unreachable = SimError::UnreachableGoal {
                            vehicle: id,
                            start: entry,
                            goal: vehicle.destination(),
                        };
                        warn!("{}; vehicle stays idle", unreachable);
                        report.idle.push(id);
                    }
                    report.spawned.push(id);
                }
                Err(e @ SimError::OccupiedSpawn(_)) => {
                    debug!("Skipping spawn: {}", e);
                    report.skipped.push(e);
                }
                Err(e) => {
                    warn!("Failed to spawn vehicle at {}: {}", entry, e);
                    report.skipped.push(e);
                }
            }
        }

        report
    }

    /// Update all traffic lights against the shared step counter
    fn update_traffic_lights(&mut self) {
        let step_count = self.step_count;
        for light in self.grid.traffic_lights_mut() {
            light.advance(step_count);
        }
    }

    /// Resolve every active vehicle once, in this step's activation order
    fn update_vehicles(&mut self, report: &mut StepReport) {
        let mut order: Vec<VehicleId> = self.vehicles.keys().copied().collect();
        self.activation.arrange(&mut order);

        for id in order {
            let Some(vehicle) = self.vehicles.get_mut(&id) else {
                continue;
            };

            match vehicle.update(&mut self.grid) {
                Ok(VehicleUpdateResult::Arrived) => {
                    self.vehicles.remove(&id);
                    self.total_arrived += 1;
                    report.arrived += 1;
                    debug!("{} arrived at its destination", id);
                }
                Ok(VehicleUpdateResult::Advanced(_)) => report.advanced += 1,
                Ok(VehicleUpdateResult::Held(_)) => report.held += 1,
                Ok(VehicleUpdateResult::Idle) => report.idle += 1,
                Err(e) => {
                    // Contained: the vehicle keeps its state and retries next step
                    warn!("{} could not move: {}", id, e);
                    report.held += 1;
                }
            }
        }
    }

    /// Main simulation step
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();

        self.update_traffic_lights();
        self.update_vehicles(&mut report);

        self.step_count += 1;

        if self.spawner.is_due(self.step_count) {
            report.spawned = self.spawn_wave().spawned.len();
        }

        report.step = self.step_count;
        report.total_arrived = self.total_arrived;
        report
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Traffic Simulation Summary ===");
        println!("Step: {}", self.step_count);
        println!("Grid: {}x{}", self.grid.width(), self.grid.height());
        println!(
            "Vehicles: {} active, {} spawned, {} arrived",
            self.vehicles.len(),
            self.total_spawned,
            self.total_arrived
        );

        let lights: Vec<_> = self.grid.traffic_lights().collect();
        let green = lights.iter().filter(|(_, light)| light.is_green()).count();
        println!("Traffic lights: {} green / {} total", green, lights.len());
        println!();

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in self.vehicles.values() {
                println!(
                    "  {}: position={}, destination={}, path_remaining={}{}",
                    vehicle.id,
                    vehicle.position,
                    vehicle.destination(),
                    vehicle.path.len(),
                    if vehicle.is_idle() { " (idle)" } else { "" }
                );
            }
        }
    }

    /// Draw the grid in the terminal, top row first
    pub fn draw_map(&self) {
        println!("\n=== World Map ===");
        println!("Legend: C=Vehicle, #=Obstacle, D=Destination, R/G=Light, arrows=Road");
        println!();
        for y in (0..self.grid.height()).rev() {
            let line: String = (0..self.grid.width())
                .map(|x| cell_glyph(self.grid.occupants_at(Coord::new(x, y))))
                .collect();
            println!("{}", line);
        }
        println!();
    }
}

/// Pick the most relevant occupant to draw
fn cell_glyph(occupants: &[Occupant]) -> char {
    let rank = |occupant: &Occupant| match occupant {
        Occupant::Vehicle(_) => 0,
        Occupant::TrafficLight(_) => 1,
        Occupant::Obstacle => 2,
        Occupant::Destination => 3,
        Occupant::Road(_) => 4,
    };

    match occupants.iter().min_by_key(|o| rank(o)) {
        Some(Occupant::Vehicle(_)) => 'C',
        Some(Occupant::TrafficLight(light)) => {
            if light.is_green() {
                'G'
            } else {
                'R'
            }
        }
        Some(Occupant::Obstacle) => '#',
        Some(Occupant::Destination) => 'D',
        Some(Occupant::Road(direction)) => direction.glyph(),
        None => ' ',
    }
}
