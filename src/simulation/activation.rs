//! Per-step vehicle activation order

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::types::VehicleId;

/// Decides the order in which vehicles get to move during one step
pub trait ActivationOrder {
    /// Reorder `vehicles` in place for the coming step
    fn arrange(&mut self, vehicles: &mut [VehicleId]);
}

/// Fresh uniform random permutation every step
pub struct ShuffledActivation {
    rng: StdRng,
}

impl ShuffledActivation {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a shuffler with a seeded RNG for reproducible simulations
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ShuffledActivation {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivationOrder for ShuffledActivation {
    fn arrange(&mut self, vehicles: &mut [VehicleId]) {
        vehicles.shuffle(&mut self.rng);
    }
}

/// Ascending vehicle id, oldest vehicle first
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialActivation;

impl ActivationOrder for SequentialActivation {
    fn arrange(&mut self, vehicles: &mut [VehicleId]) {
        vehicles.sort();
    }
}
