use thiserror::Error;

use super::types::{Coord, VehicleId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No path for {vehicle} from {start} to {goal}")]
    UnreachableGoal {
        vehicle: VehicleId,
        start: Coord,
        goal: Coord,
    },

    #[error("Entry {0} is occupied by a vehicle")]
    OccupiedSpawn(Coord),

    #[error("Entry {0} is blocked by an obstacle")]
    BlockedSpawn(Coord),

    #[error("No destinations available to assign")]
    NoDestinations,

    #[error("Coordinate {0} is outside the grid")]
    OutOfBounds(Coord),

    #[error("Occupant not found at {coord}")]
    OccupantMissing { coord: Coord },

    #[error("Simulation has not been initialized")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dictionary parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Construction errors abort world creation; everything else is contained
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimError::Configuration(_) | SimError::Io(_) | SimError::Json(_)
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
