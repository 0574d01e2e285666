//! Control surface for an external front end
//!
//! Mirrors the operations a network layer exposes: build the world, advance one step,
//! and list agents. Transport and request parsing live outside this crate.

use log::info;
use std::path::PathBuf;

use super::config::SimConfig;
use super::error::{SimError, SimResult};
use super::layout::{DEMO_DICTIONARY, DEMO_LAYOUT};
use super::snapshot::{AgentKind, AgentSnapshot, StepSummary, WorldDimensions};
use super::world::SimWorld;

/// Where `initialize` reads the layout from
#[derive(Debug, Clone)]
pub enum LayoutSource {
    Text { layout: String, dictionary: String },
    Files { layout: PathBuf, dictionary: PathBuf },
}

impl LayoutSource {
    pub fn demo() -> Self {
        LayoutSource::Text {
            layout: DEMO_LAYOUT.to_string(),
            dictionary: DEMO_DICTIONARY.to_string(),
        }
    }

    pub fn build(&self, config: SimConfig) -> SimResult<SimWorld> {
        match self {
            LayoutSource::Text { layout, dictionary } => {
                SimWorld::from_layout(layout, dictionary, config)
            }
            LayoutSource::Files { layout, dictionary } => {
                SimWorld::from_files(layout, dictionary, config)
            }
        }
    }
}

pub struct SimulationControl {
    source: LayoutSource,
    config: SimConfig,
    world: Option<SimWorld>,
}

impl SimulationControl {
    pub fn new(source: LayoutSource, config: SimConfig) -> Self {
        Self {
            source,
            config,
            world: None,
        }
    }

    /// Build a fresh world, replacing any previous one
    pub fn initialize(&mut self) -> SimResult<WorldDimensions> {
        let world = self.source.build(self.config.clone())?;
        let dimensions = world.dimensions();
        info!(
            "Simulation initialized ({}x{})",
            dimensions.width, dimensions.height
        );
        self.world = Some(world);
        Ok(dimensions)
    }

    pub fn step(&mut self) -> SimResult<StepSummary> {
        let world = self.world.as_mut().ok_or(SimError::NotInitialized)?;
        let report = world.step();
        Ok(StepSummary {
            total_arrived: report.total_arrived,
        })
    }

    pub fn snapshot(&self, kind: AgentKind) -> SimResult<Vec<AgentSnapshot>> {
        let world = self.world.as_ref().ok_or(SimError::NotInitialized)?;
        Ok(world.snapshot(kind))
    }

    pub fn world(&self) -> Option<&SimWorld> {
        self.world.as_ref()
    }
}
