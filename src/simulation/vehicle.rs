//! Vehicle movement logic for the traffic simulation
//!
//! Each step a vehicle either advances one cell along its path, holds, or arrives.

use std::collections::VecDeque;

use super::error::SimResult;
use super::grid::{GridWorld, Occupant};
use super::types::{Coord, VehicleId};

/// Why a vehicle did not move this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    RedLight,
    Occupied,
}

/// Result of a vehicle update indicating what action should be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    Advanced(Coord),
    Held(HoldReason),
    /// Vehicle reached its destination and has left the grid
    Arrived,
    /// No route to the destination; the vehicle stays put
    Idle,
}

/// A vehicle in the traffic simulation
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub position: Coord,
    /// Remaining cells, head first, ending at the destination
    pub path: VecDeque<Coord>,
    destination: Coord,
    /// Step count at which the vehicle was created
    pub spawned_at: u64,
}

impl SimVehicle {
    pub fn new(
        id: VehicleId,
        position: Coord,
        destination: Coord,
        path: Vec<Coord>,
        spawned_at: u64,
    ) -> Self {
        Self {
            id,
            position,
            path: path.into(),
            destination,
            spawned_at,
        }
    }

    /// Destination assigned at creation
    pub fn destination(&self) -> Coord {
        self.destination
    }

    pub fn has_arrived(&self) -> bool {
        self.path.is_empty() && self.position == self.destination
    }

    /// Empty path but not on the destination: the goal was unreachable
    pub fn is_idle(&self) -> bool {
        self.path.is_empty() && self.position != self.destination
    }

    /// Resolve this vehicle's move for the current step.
    ///
    /// Reads the grid as it stands now, so moves made earlier in the same step are
    /// visible. On arrival the vehicle is removed from the grid; the caller drops it
    /// from its vehicle table.
    pub fn update(&mut self, grid: &mut GridWorld) -> SimResult<VehicleUpdateResult> {
        let marker = Occupant::Vehicle(self.id);

        let Some(&next) = self.path.front() else {
            if self.position != self.destination {
                return Ok(VehicleUpdateResult::Idle);
            }
            grid.remove(&marker, self.position)?;
            return Ok(VehicleUpdateResult::Arrived);
        };

        if grid.has_red_light(next) {
            return Ok(VehicleUpdateResult::Held(HoldReason::RedLight));
        }

        if grid.vehicle_at(next).is_some() {
            return Ok(VehicleUpdateResult::Held(HoldReason::Occupied));
        }

        grid.move_occupant(&marker, self.position, next)?;
        self.path.pop_front();
        self.position = next;

        Ok(VehicleUpdateResult::Advanced(next))
    }
}
