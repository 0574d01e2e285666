//! Grid Traffic Simulation Library
//!
//! A discrete-step, grid-based traffic simulation that can run headless or behind
//! an external front end.

pub mod simulation;
