//! Grid occupancy index
//!
//! Bounded, non-wrapping grid where every cell holds a list of occupants.

use super::error::{SimError, SimResult};
use super::traffic_light::SimTrafficLight;
use super::types::{Coord, Direction, VehicleId};

/// Anything that can sit in a grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    Road(Direction),
    TrafficLight(SimTrafficLight),
    Destination,
    Obstacle,
    /// Vehicle state lives in the world's vehicle table
    Vehicle(VehicleId),
}

impl Occupant {
    /// Whether this occupant changes which transitions the planner may use
    pub fn shapes_paths(&self) -> bool {
        matches!(
            self,
            Occupant::Road(_) | Occupant::Destination | Occupant::Obstacle
        )
    }
}

/// Spatial index over a `width` x `height` grid
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: i32,
    height: i32,
    cells: Vec<Vec<Occupant>>,
}

impl GridWorld {
    pub fn new(width: i32, height: i32) -> SimResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SimError::Configuration(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let cell_count = width.checked_mul(height).ok_or_else(|| {
            SimError::Configuration(format!("grid of {}x{} cells is too large", width, height))
        })?;
        Ok(Self {
            width,
            height,
            cells: vec![Vec::new(); cell_count as usize],
        })
    }

    /// Number of cells, `width * height`
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> SimResult<usize> {
        if !self.in_bounds(coord) {
            return Err(SimError::OutOfBounds(coord));
        }
        Ok((coord.y * self.width + coord.x) as usize)
    }

    /// Occupants of a cell; outside the grid this is always empty
    pub fn occupants_at(&self, coord: Coord) -> &[Occupant] {
        match self.index(coord) {
            Ok(index) => &self.cells[index],
            Err(_) => &[],
        }
    }

    pub fn place(&mut self, occupant: Occupant, coord: Coord) -> SimResult<()> {
        let index = self.index(coord)?;
        self.cells[index].push(occupant);
        Ok(())
    }

    /// Remove one matching occupant from a cell
    pub fn remove(&mut self, occupant: &Occupant, coord: Coord) -> SimResult<()> {
        let index = self.index(coord)?;
        let cell = &mut self.cells[index];
        let position = cell
            .iter()
            .position(|o| o == occupant)
            .ok_or(SimError::OccupantMissing { coord })?;
        cell.remove(position);
        Ok(())
    }

    /// Move an occupant between cells. Does not check whether `to` is free.
    pub fn move_occupant(&mut self, occupant: &Occupant, from: Coord, to: Coord) -> SimResult<()> {
        let to_index = self.index(to)?;
        self.remove(occupant, from)?;
        self.cells[to_index].push(occupant.clone());
        Ok(())
    }

    /// The 8 surrounding cells that lie inside the grid
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| Coord::new(coord.x + dx, coord.y + dy))
            .filter(move |c| self.in_bounds(*c))
    }

    pub fn road_at(&self, coord: Coord) -> Option<Direction> {
        self.occupants_at(coord).iter().find_map(|o| match o {
            Occupant::Road(direction) => Some(*direction),
            _ => None,
        })
    }

    pub fn has_obstacle(&self, coord: Coord) -> bool {
        self.occupants_at(coord)
            .iter()
            .any(|o| matches!(o, Occupant::Obstacle))
    }

    pub fn has_destination(&self, coord: Coord) -> bool {
        self.occupants_at(coord)
            .iter()
            .any(|o| matches!(o, Occupant::Destination))
    }

    pub fn vehicle_at(&self, coord: Coord) -> Option<VehicleId> {
        self.occupants_at(coord).iter().find_map(|o| match o {
            Occupant::Vehicle(id) => Some(*id),
            _ => None,
        })
    }

    pub fn has_red_light(&self, coord: Coord) -> bool {
        self.occupants_at(coord)
            .iter()
            .any(|o| matches!(o, Occupant::TrafficLight(light) if light.is_red()))
    }

    /// Iterate cells column by column (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &[Occupant])> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..self.height).map(move |y| Coord::new(x, y)))
            .map(move |coord| (coord, self.occupants_at(coord)))
    }

    /// All destination cells in column-major order
    pub fn destinations(&self) -> Vec<Coord> {
        self.cells()
            .filter(|(_, occupants)| occupants.iter().any(|o| matches!(o, Occupant::Destination)))
            .map(|(coord, _)| coord)
            .collect()
    }

    pub fn traffic_lights(&self) -> impl Iterator<Item = (Coord, &SimTrafficLight)> + '_ {
        self.cells().flat_map(|(coord, occupants)| {
            occupants.iter().filter_map(move |o| match o {
                Occupant::TrafficLight(light) => Some((coord, light)),
                _ => None,
            })
        })
    }

    pub fn traffic_lights_mut(&mut self) -> impl Iterator<Item = &mut SimTrafficLight> + '_ {
        self.cells.iter_mut().flatten().filter_map(|o| match o {
            Occupant::TrafficLight(light) => Some(light),
            _ => None,
        })
    }

    /// Cell index in the text layout this grid was built from (row 0 on top)
    pub fn layout_index(&self, coord: Coord) -> i32 {
        (self.height - 1 - coord.y) * self.width + coord.x
    }
}
