//! Read-only views of the world for an external renderer

use serde::Serialize;

use super::grid::Occupant;
use super::types::SNAPSHOT_ELEVATION;
use super::world::SimWorld;

/// Which kind of agent a snapshot lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Vehicles,
    Obstacles,
    Destinations,
    TrafficLights,
}

/// Position of one agent. `x` is the grid column, `z` the grid y, `y` a fixed elevation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSnapshot {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Traffic lights only: `true` when green
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldDimensions {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub total_arrived: u64,
}

impl SimWorld {
    pub fn dimensions(&self) -> WorldDimensions {
        WorldDimensions {
            width: self.grid().width(),
            height: self.grid().height(),
        }
    }

    /// List every agent of `kind`, column by column
    pub fn snapshot(&self, kind: AgentKind) -> Vec<AgentSnapshot> {
        let grid = self.grid();
        let mut agents = Vec::new();

        for (coord, occupants) in grid.cells() {
            let layout_index = grid.layout_index(coord);
            for occupant in occupants {
                let entry = match (kind, occupant) {
                    (AgentKind::Vehicles, Occupant::Vehicle(id)) => Some((id.to_string(), None)),
                    (AgentKind::Obstacles, Occupant::Obstacle) => {
                        Some((format!("ob_{}", layout_index), None))
                    }
                    (AgentKind::Destinations, Occupant::Destination) => {
                        Some((format!("d_{}", layout_index), None))
                    }
                    (AgentKind::TrafficLights, Occupant::TrafficLight(light)) => {
                        Some((format!("tl_{}", layout_index), Some(light.is_green())))
                    }
                    _ => None,
                };

                if let Some((id, state)) = entry {
                    agents.push(AgentSnapshot {
                        id,
                        x: coord.x,
                        y: SNAPSHOT_ELEVATION,
                        z: coord.y,
                        state,
                    });
                }
            }
        }

        agents
    }
}
