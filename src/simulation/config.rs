//! Simulation settings

use super::types::{Coord, SPAWN_INTERVAL};

/// Where vehicles enter the grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryPoints {
    /// The four corners of the grid
    #[default]
    Corners,
    At(Vec<Coord>),
}

impl EntryPoints {
    /// Resolve to concrete coordinates for a grid of the given size
    pub fn resolve(&self, width: i32, height: i32) -> Vec<Coord> {
        match self {
            EntryPoints::Corners => {
                let corners = [
                    Coord::new(0, 0),
                    Coord::new(width - 1, 0),
                    Coord::new(0, height - 1),
                    Coord::new(width - 1, height - 1),
                ];
                // A one-cell-wide grid has coinciding corners
                let mut unique = Vec::with_capacity(corners.len());
                for corner in corners {
                    if !unique.contains(&corner) {
                        unique.push(corner);
                    }
                }
                unique
            }
            EntryPoints::At(entries) => entries.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Steps between spawn waves
    pub spawn_interval: u64,
    pub entry_points: EntryPoints,
    /// Seed for destination choice and activation order; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            entry_points: EntryPoints::Corners,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_entries(mut self, entries: Vec<Coord>) -> Self {
        self.entry_points = EntryPoints::At(entries);
        self
    }

    pub fn with_spawn_interval(mut self, spawn_interval: u64) -> Self {
        self.spawn_interval = spawn_interval;
        self
    }
}
