use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod generator;
pub mod hint;
pub mod level;
pub mod level_service;
pub mod map;
pub mod program;
pub mod progress;
pub mod rng;
pub mod settings;
pub mod simulator;
pub mod solver;
pub mod sound;
pub mod text;
pub mod theme;
pub mod tutorial;

/// Identifier of a level: 0 is the tutorial, 1..=100 are generated, anything
/// larger is an ad hoc (custom or AI-produced) level.
pub type LevelId = u64;

/// Opaque identity of a command block inside a program.
pub type BlockId = usize;

/// Represents a 2D grid cell. The origin is the top-left corner, `x` grows to
/// the right and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Returns manhattan distance between two positions
    pub fn manhattan(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Applies a signed offset, returning `None` if either axis would go
    /// below zero. Upper bounds are the caller's concern.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Checks if the position lies inside a square grid of the given size.
    #[inline]
    pub fn within(&self, grid_size: usize) -> bool {
        self.x < grid_size && self.y < grid_size
    }
}

/// Orientation the agent faces after a move. Purely informational: every
/// command is absolute, so facing never changes which moves are legal.
///
/// Serialized by name. Older saves store the index 0..=3 (North, East,
/// South, West), which is also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredDirection")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDirection {
    Index(u8),
    Name(String),
}

impl TryFrom<StoredDirection> for Direction {
    type Error = String;

    fn try_from(stored: StoredDirection) -> Result<Self, Self::Error> {
        match stored {
            StoredDirection::Index(0) => Ok(Direction::North),
            StoredDirection::Index(1) => Ok(Direction::East),
            StoredDirection::Index(2) => Ok(Direction::South),
            StoredDirection::Index(3) => Ok(Direction::West),
            StoredDirection::Index(index) => Err(format!("direction index {index} is not 0..=3")),
            StoredDirection::Name(name) => match name.as_str() {
                "North" => Ok(Direction::North),
                "East" => Ok(Direction::East),
                "South" => Ok(Direction::South),
                "West" => Ok(Direction::West),
                _ => Err(format!("unknown direction '{name}'")),
            },
        }
    }
}

impl Direction {
    /// Faces along the dominant axis from `from` toward `to`. Ties favour the
    /// horizontal axis.
    pub fn toward(from: Position, to: Position) -> Direction {
        let dx = to.x as isize - from.x as isize;
        let dy = to.y as isize - from.y as isize;
        if dx.abs() >= dy.abs() {
            if dx > 0 { Direction::East } else { Direction::West }
        } else if dy > 0 {
            Direction::South
        } else {
            Direction::North
        }
    }

    /// Unit step for this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Kinds of obstacle a cell can hold. Every kind blocks a walk or a jump
/// landing on its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleType {
    #[default]
    Rock,
    Water,
    Mud,
    Wall,
    Fire,
    Forest,
}

/// Display language. Only text depends on it, never geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Km,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Km => "km",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "km" | "khmer" => Some(Language::Km),
            "en" | "english" => Some(Language::En),
            _ => None,
        }
    }

    /// The other supported language.
    pub fn toggled(&self) -> Language {
        match self {
            Language::Km => Language::En,
            Language::En => Language::Km,
        }
    }
}
