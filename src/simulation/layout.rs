//! Text layout loading
//!
//! A layout is a rectangular character grid, one glyph per cell, row 0 on top. A glyph
//! dictionary (JSON) says what each glyph means. Glyphs the dictionary does not know
//! leave their cell empty.

use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::SimConfig;
use super::error::{SimError, SimResult};
use super::grid::{GridWorld, Occupant};
use super::traffic_light::SimTrafficLight;
use super::types::{Coord, Direction};
use super::world::SimWorld;

/// Meaning of one layout glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    Road(Direction),
    Light { period: u64, green: bool },
    Obstacle,
    Destination,
}

#[derive(Deserialize)]
struct RawLight {
    period: u64,
    #[serde(default)]
    green: bool,
}

/// Accepted JSON forms for a dictionary value
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGlyph {
    /// Legacy form: light period, phase taken from the glyph's case
    Period(u64),
    /// Legacy form: direction name, or "Obstacle" / "Destination"
    Named(String),
    Road { road: Direction },
    Light { light: RawLight },
}

impl RawGlyph {
    fn into_glyph(self, symbol: char) -> SimResult<Glyph> {
        let glyph = match self {
            // Uppercase light glyphs start red
            RawGlyph::Period(period) => Glyph::Light {
                period,
                green: !symbol.is_uppercase(),
            },
            RawGlyph::Named(name) => match name.as_str() {
                "Obstacle" | "obstacle" => Glyph::Obstacle,
                "Destination" | "destination" => Glyph::Destination,
                direction => Glyph::Road(direction.parse()?),
            },
            RawGlyph::Road { road } => Glyph::Road(road),
            RawGlyph::Light { light } => Glyph::Light {
                period: light.period,
                green: light.green,
            },
        };

        if let Glyph::Light { period: 0, .. } = glyph {
            return Err(SimError::Configuration(format!(
                "light glyph '{}' has a zero period",
                symbol
            )));
        }
        Ok(glyph)
    }
}

/// Glyph-to-meaning table
#[derive(Debug, Clone, Default)]
pub struct GlyphDictionary {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        let raw: HashMap<String, RawGlyph> = serde_json::from_str(json)?;
        let mut dictionary = Self::new();

        for (key, value) in raw {
            let mut chars = key.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(symbol), None) => symbol,
                _ => {
                    return Err(SimError::Configuration(format!(
                        "dictionary key '{}' must be a single character",
                        key
                    )))
                }
            };
            dictionary.insert(symbol, value.into_glyph(symbol)?);
        }

        Ok(dictionary)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn insert(&mut self, symbol: char, glyph: Glyph) {
        self.glyphs.insert(symbol, glyph);
    }

    pub fn get(&self, symbol: char) -> Option<&Glyph> {
        self.glyphs.get(&symbol)
    }
}

/// Build a grid from layout text. Row 0 of the text becomes `y = height - 1`.
pub fn parse_layout(text: &str, dictionary: &GlyphDictionary) -> SimResult<GridWorld> {
    let mut rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.chars().collect())
        .collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if height == 0 || width == 0 {
        return Err(SimError::Configuration("layout is empty".to_string()));
    }
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(SimError::Configuration(format!(
            "layout row {} has {} cells, expected {}",
            index,
            row.len(),
            width
        )));
    }

    let (width, height) = (width as i32, height as i32);
    let mut grid = GridWorld::new(width, height)?;

    for (row_index, row) in rows.iter().enumerate() {
        for (column, symbol) in row.iter().enumerate() {
            let coord = Coord::new(column as i32, height - 1 - row_index as i32);
            let occupant = match dictionary.get(*symbol) {
                Some(Glyph::Road(direction)) => Occupant::Road(*direction),
                Some(Glyph::Light { period, green }) => {
                    Occupant::TrafficLight(SimTrafficLight::new(*green, *period)?)
                }
                Some(Glyph::Obstacle) => Occupant::Obstacle,
                Some(Glyph::Destination) => Occupant::Destination,
                None => continue,
            };
            grid.place(occupant, coord)?;
        }
    }

    Ok(grid)
}

/// Legacy-format dictionary for the built-in demo city
pub const DEMO_DICTIONARY: &str = r##"{
    ">": "Right",
    "<": "Left",
    "^": "Up",
    "v": "Down",
    "S": 7,
    "s": 5,
    "#": "Obstacle",
    "D": "Destination"
}"##;

/// A one-way ring road around a block with four destinations
pub const DEMO_LAYOUT: &str = "\
>>>>S>>>>v
^D######Dv
^########v
s########S
^########v
^D######Dv
^<<<<S<<<<
";

impl SimWorld {
    /// Create a world from layout text and a JSON glyph dictionary
    pub fn from_layout(layout: &str, dictionary_json: &str, config: SimConfig) -> SimResult<Self> {
        let dictionary = GlyphDictionary::from_json(dictionary_json)?;
        let grid = parse_layout(layout, &dictionary)?;
        SimWorld::new(grid, config)
    }

    /// Create a world from a layout file and a dictionary file
    pub fn from_files(
        layout_path: impl AsRef<Path>,
        dictionary_path: impl AsRef<Path>,
        config: SimConfig,
    ) -> SimResult<Self> {
        let layout_path = layout_path.as_ref();
        info!("Loading layout from {}", layout_path.display());
        let layout = fs::read_to_string(layout_path)?;
        let dictionary = fs::read_to_string(dictionary_path)?;
        Self::from_layout(&layout, &dictionary, config)
    }

    /// Create the built-in demo city
    pub fn create_demo_world() -> SimResult<Self> {
        Self::from_layout(DEMO_LAYOUT, DEMO_DICTIONARY, SimConfig::default())
    }

    /// Create the demo city with a seeded RNG for reproducible simulations
    pub fn create_demo_world_with_seed(seed: u64) -> SimResult<Self> {
        Self::from_layout(DEMO_LAYOUT, DEMO_DICTIONARY, SimConfig::default().with_seed(seed))
    }
}
