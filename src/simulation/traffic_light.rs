//! Traffic light logic for the traffic simulation
//!
//! Every light toggles against the world's shared step counter, so lights with the
//! same period never drift out of phase.

use serde::Serialize;

use super::error::{SimError, SimResult};

/// A traffic light occupying one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimTrafficLight {
    /// `true` while vehicles may enter the cell
    green: bool,
    /// Steps per half-cycle, never zero
    period: u64,
    /// State at world construction
    initial_green: bool,
}

impl SimTrafficLight {
    pub fn new(green: bool, period: u64) -> SimResult<Self> {
        if period == 0 {
            return Err(SimError::Configuration(
                "traffic light period must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            green,
            period,
            initial_green: green,
        })
    }

    /// Advance the light for the step numbered `step_count` (before the counter is incremented).
    /// Returns true if the light flipped.
    pub fn advance(&mut self, step_count: u64) -> bool {
        if step_count % self.period == 0 {
            self.green = !self.green;
            true
        } else {
            false
        }
    }

    /// State after `steps` completed steps, derived without replaying them
    pub fn state_after(&self, steps: u64) -> bool {
        if steps == 0 {
            return self.initial_green;
        }
        // Flips happen on step counts 0, P, 2P, ... strictly below `steps`
        let flips = (steps - 1) / self.period + 1;
        self.initial_green ^ (flips % 2 == 1)
    }

    pub fn is_green(&self) -> bool {
        self.green
    }

    pub fn is_red(&self) -> bool {
        !self.green
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn initial_green(&self) -> bool {
        self.initial_green
    }
}
