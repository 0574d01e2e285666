//! Core types for the traffic simulation
//!
//! Coordinates, identifiers and road directions shared by every component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{SimError, SimResult};

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub SimId);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car_{}", self.0 .0)
    }
}

/// A grid coordinate. `y` grows upward, so row 0 of a text layout is `y = height - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether `other` is one of the 8 cells surrounding this one
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Allowed direction of travel out of a road cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Vertical,
    Horizontal,
    Any,
}

impl Direction {
    /// Check whether moving from `from` to `to` is allowed by this direction
    pub fn permits(self, from: Coord, to: Coord) -> bool {
        match self {
            Direction::Left => to.x < from.x,
            Direction::Right => to.x > from.x,
            Direction::Up => to.y > from.y,
            Direction::Down => to.y < from.y,
            Direction::Vertical => to.x == from.x,
            Direction::Horizontal => to.y == from.y,
            Direction::Any => true,
        }
    }

    /// Glyph used when drawing the map
    pub fn glyph(self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Right => '>',
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Vertical => '|',
            Direction::Horizontal => '-',
            Direction::Any => '+',
        }
    }
}

impl FromStr for Direction {
    type Err = SimError;

    fn from_str(name: &str) -> SimResult<Self> {
        match name {
            "Left" => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            "Up" => Ok(Direction::Up),
            "Down" => Ok(Direction::Down),
            "Vertical" => Ok(Direction::Vertical),
            "Horizontal" => Ok(Direction::Horizontal),
            "Any" => Ok(Direction::Any),
            other => Err(SimError::Configuration(format!(
                "unknown road direction '{}'",
                other
            ))),
        }
    }
}

/// Number of steps between two spawn waves
pub const SPAWN_INTERVAL: u64 = 10;

/// Elevation reported for every agent in snapshots
pub const SNAPSHOT_ELEVATION: i32 = 1;
