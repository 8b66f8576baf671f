//! Compass heading → cardinal direction, for orienting the array.

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CardinalDirection {
    const POINTS: [CardinalDirection; 8] = [
        CardinalDirection::North,
        CardinalDirection::NorthEast,
        CardinalDirection::East,
        CardinalDirection::SouthEast,
        CardinalDirection::South,
        CardinalDirection::SouthWest,
        CardinalDirection::West,
        CardinalDirection::NorthWest,
    ];

    /// Nearest of the eight compass points; 0° is north, clockwise.
    pub fn from_heading(heading_deg: f64) -> Result<Self, EngineError> {
        if !heading_deg.is_finite() {
            return Err(EngineError::invalid_input(
                "heading_deg",
                format!("{heading_deg} is not a finite number"),
            ));
        }
        let normalized = heading_deg.rem_euclid(360.0);
        let index = (normalized / 45.0).round() as usize % 8;
        Ok(Self::POINTS[index])
    }

    pub fn short(&self) -> &'static str {
        match self {
            CardinalDirection::North => "N",
            CardinalDirection::NorthEast => "NE",
            CardinalDirection::East => "E",
            CardinalDirection::SouthEast => "SE",
            CardinalDirection::South => "S",
            CardinalDirection::SouthWest => "SW",
            CardinalDirection::West => "W",
            CardinalDirection::NorthWest => "NW",
        }
    }

    pub fn full(&self) -> &'static str {
        match self {
            CardinalDirection::North => "North",
            CardinalDirection::NorthEast => "Northeast",
            CardinalDirection::East => "East",
            CardinalDirection::SouthEast => "Southeast",
            CardinalDirection::South => "South",
            CardinalDirection::SouthWest => "Southwest",
            CardinalDirection::West => "West",
            CardinalDirection::NorthWest => "Northwest",
        }
    }
}
