//! Vehicle spawning for the traffic simulation
//!
//! Vehicles appear at fixed entry coordinates, pick a random destination and plan
//! their route exactly once.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::error::{SimError, SimResult};
use super::grid::{GridWorld, Occupant};
use super::path_planner::PathPlanner;
use super::types::{Coord, VehicleId};
use super::vehicle::SimVehicle;

/// Where and how often vehicles are created
#[derive(Debug, Clone)]
pub struct SpawnController {
    entries: Vec<Coord>,
    interval: u64,
}

impl SpawnController {
    pub fn new(entries: Vec<Coord>, interval: u64) -> SimResult<Self> {
        if interval == 0 {
            return Err(SimError::Configuration(
                "spawn interval must be at least 1".to_string(),
            ));
        }
        Ok(Self { entries, interval })
    }

    pub fn entries(&self) -> &[Coord] {
        &self.entries
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Whether a spawn wave runs once the counter has reached `step_count`
    pub fn is_due(&self, step_count: u64) -> bool {
        step_count % self.interval == 0
    }
}

/// Outcome of one spawn wave
#[derive(Debug, Default)]
pub struct SpawnReport {
    pub spawned: Vec<VehicleId>,
    /// Spawned vehicles that have no route to their destination
    pub idle: Vec<VehicleId>,
    /// Entries that produced no vehicle, with the reason
    pub skipped: Vec<SimError>,
}

/// Create a vehicle at `entry` and place it on the grid
///
/// # Arguments
/// * `id` - The pre-generated vehicle ID
/// * `entry` - Cell the vehicle starts in
/// * `step_count` - Current value of the global step counter
/// * `grid` - Grid to place the vehicle on
/// * `planner` - Planner used once for the vehicle's route
/// * `rng` - Source for the destination choice
pub fn spawn_vehicle<R: Rng + ?Sized>(
    id: VehicleId,
    entry: Coord,
    step_count: u64,
    grid: &mut GridWorld,
    planner: &mut PathPlanner,
    rng: &mut R,
) -> SimResult<SimVehicle> {
    if !grid.in_bounds(entry) {
        return Err(SimError::OutOfBounds(entry));
    }
    if grid.has_obstacle(entry) {
        return Err(SimError::BlockedSpawn(entry));
    }
    if grid.vehicle_at(entry).is_some() {
        return Err(SimError::OccupiedSpawn(entry));
    }

    let destinations = grid.destinations();
    let destination = *destinations.choose(rng).ok_or(SimError::NoDestinations)?;

    let path = planner.plan(entry, destination)?;
    grid.place(Occupant::Vehicle(id), entry)?;

    debug!(
        "Spawned {} at {} heading to {} ({} cells)",
        id,
        entry,
        destination,
        path.len()
    );

    Ok(SimVehicle::new(id, entry, destination, path, step_count))
}
