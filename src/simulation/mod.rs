//! Grid traffic simulation module
//!
//! This module contains the simulation engine: the occupancy grid, direction-aware
//! path planning, per-step movement resolution, traffic lights and vehicle spawning.
//! It runs without any rendering or transport layer.

mod activation;
mod config;
mod control;
mod error;
mod grid;
mod layout;
mod path_planner;
mod snapshot;
mod spawner;
mod traffic_light;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
pub use activation::{ActivationOrder, SequentialActivation, ShuffledActivation};
pub use config::{EntryPoints, SimConfig};
pub use control::{LayoutSource, SimulationControl};
pub use error::{SimError, SimResult};
pub use grid::{GridWorld, Occupant};
pub use layout::{parse_layout, Glyph, GlyphDictionary, DEMO_DICTIONARY, DEMO_LAYOUT};
pub use path_planner::{transition_allowed, PathPlanner};
pub use snapshot::{AgentKind, AgentSnapshot, StepSummary, WorldDimensions};
pub use spawner::{spawn_vehicle, SpawnController, SpawnReport};
pub use traffic_light::SimTrafficLight;
pub use types::{Coord, Direction, SimId, VehicleId, SNAPSHOT_ELEVATION, SPAWN_INTERVAL};
pub use vehicle::{HoldReason, SimVehicle, VehicleUpdateResult};
pub use world::{SimWorld, StepReport};
