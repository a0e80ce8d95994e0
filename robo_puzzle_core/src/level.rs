use serde::{Deserialize, Serialize};

use crate::{
    Direction, Language, LevelId, ObstacleType, Position, map::Grid, simulator::CommandType,
    solver, text,
};

/// Grid sizes produced by the generator.
pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 8;
/// Largest grid accepted for custom levels.
pub const MAX_CUSTOM_GRID_SIZE: usize = 12;

/// Represents errors found while building or validating a level that did not
/// come from the generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("Grid size {0} is outside 2..={MAX_CUSTOM_GRID_SIZE}")]
    GridSizeOutOfRange(usize),
    #[error("Start and goal are both at {0:?}")]
    StartEqualsGoal(Position),
    #[error("{what} at {position:?} lies outside the grid")]
    OutOfBounds {
        what: &'static str,
        position: Position,
    },
    #[error("Obstacle at {0:?} covers the start or the goal")]
    ObstacleOnEndpoint(Position),
    #[error("Two obstacles share the cell {0:?}")]
    DuplicateObstacle(Position),
    #[error("The goal cannot be reached with walk and jump moves")]
    Unsolvable,
    #[error("Map string is empty")]
    EmptyMap,
    #[error("Inconsistent width at row {row}: expected {expected}, found {found}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Map is {width}x{height} but levels must be square")]
    NotSquare { width: usize, height: usize },
    #[error("Unknown map code '{code}' at ({x}, {y})")]
    UnknownCode { code: String, x: usize, y: usize },
    #[error("Multiple start positions ('ST') found")]
    DuplicateStart,
    #[error("Multiple goal positions ('GL') found")]
    DuplicateGoal,
    #[error("No start position ('ST') found in map")]
    MissingStart,
    #[error("No goal position ('GL') found in map")]
    MissingGoal,
}

/// An impassable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(flatten)]
    pub position: Position,
    /// Older saves list bare coordinates, which read as rocks.
    #[serde(rename = "type", default)]
    pub kind: ObstacleType,
    /// Tooltip text, in the level's language.
    #[serde(default)]
    pub description: String,
}

impl Obstacle {
    pub fn new(position: Position, kind: ObstacleType, description: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            description: description.into(),
        }
    }

    /// An obstacle described in `language`.
    pub fn localized(position: Position, kind: ObstacleType, language: Language) -> Self {
        Self::new(position, kind, text::obstacle_name(kind, language))
    }
}

/// What the player must do to leave a tutorial step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorialTrigger {
    None,
    AddBlock,
    ClickRun,
    Win,
}

/// One scripted step of the onboarding level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub message: String,
    pub trigger: TutorialTrigger,
    /// Block the player must add, when the trigger is `AddBlock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_block: Option<CommandType>,
    /// Opaque id of the UI element to highlight.
    #[serde(
        default,
        alias = "highlightElementId",
        skip_serializing_if = "Option::is_none"
    )]
    pub highlight: Option<String>,
}

/// A playable puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub id: LevelId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub grid_size: usize,
    pub start: Position,
    pub start_direction: Direction,
    pub goal: Position,
    pub obstacles: Vec<Obstacle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_steps: Option<Vec<TutorialStep>>,
}

impl LevelConfig {
    /// A custom level facing the goal, with no display text beyond a generic
    /// name.
    pub fn ad_hoc(
        id: LevelId,
        grid_size: usize,
        start: Position,
        goal: Position,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        LevelConfig {
            id,
            name: text::custom_level_name(Language::En).to_string(),
            description: String::new(),
            grid_size,
            start,
            start_direction: Direction::toward(start, goal),
            goal,
            obstacles,
            tutorial_steps: None,
        }
    }

    pub fn is_tutorial(&self) -> bool {
        self.tutorial_steps.is_some()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.within(self.grid_size)
    }

    pub fn obstacle_at(&self, position: Position) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.position == position)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.obstacle_at(position).is_some()
    }

    /// Manhattan distance from start to goal, the par command count.
    pub fn min_distance(&self) -> usize {
        self.start.manhattan(&self.goal)
    }

    /// Obstacle kinds laid out on the grid, for rendering and search.
    pub fn obstacle_grid(&self) -> Grid<Option<ObstacleType>> {
        Grid::from_generator(self.grid_size, |cell| {
            self.obstacle_at(cell).map(|obstacle| obstacle.kind)
        })
    }

    /// Checks the level invariants: square grid of sane size, distinct
    /// in-bounds endpoints, unique obstacles off the endpoints, and at least
    /// one walk/jump route to the goal.
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(2..=MAX_CUSTOM_GRID_SIZE).contains(&self.grid_size) {
            return Err(LevelError::GridSizeOutOfRange(self.grid_size));
        }
        if !self.contains(self.start) {
            return Err(LevelError::OutOfBounds {
                what: "Start",
                position: self.start,
            });
        }
        if !self.contains(self.goal) {
            return Err(LevelError::OutOfBounds {
                what: "Goal",
                position: self.goal,
            });
        }
        if self.start == self.goal {
            return Err(LevelError::StartEqualsGoal(self.start));
        }

        let mut seen: Grid<bool> = Grid::new(self.grid_size);
        for obstacle in &self.obstacles {
            let position = obstacle.position;
            if !self.contains(position) {
                return Err(LevelError::OutOfBounds {
                    what: "Obstacle",
                    position,
                });
            }
            if position == self.start || position == self.goal {
                return Err(LevelError::ObstacleOnEndpoint(position));
            }
            if seen[position] {
                return Err(LevelError::DuplicateObstacle(position));
            }
            seen[position] = true;
        }

        if !solver::is_level_solvable(self) {
            return Err(LevelError::Unsolvable);
        }
        Ok(())
    }
}

/// Builds a custom level from a whitespace-separated token map.
///
/// Codes: `..` floor, `ST` start, `GL` goal, `RK` rock, `WA` water, `MD` mud,
/// `WL` wall, `FI` fire, `FO` forest. The start faces the goal. The result is
/// validated before it is returned.
pub fn parse_level(id: LevelId, map: &str, language: Language) -> Result<LevelConfig, LevelError> {
    let lines: Vec<&str> = map.trim().lines().collect();
    if lines.is_empty() {
        return Err(LevelError::EmptyMap);
    }

    let height = lines.len();
    let mut width = 0;
    let mut rows: Vec<Vec<&str>> = Vec::with_capacity(height);
    for (y, line) in lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if y == 0 {
            width = tokens.len();
        } else if tokens.len() != width {
            return Err(LevelError::InconsistentWidth {
                row: y,
                expected: width,
                found: tokens.len(),
            });
        }
        rows.push(tokens);
    }
    if width != height {
        return Err(LevelError::NotSquare { width, height });
    }

    let mut start = None;
    let mut goal = None;
    let mut obstacles = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        for (x, token) in row.iter().enumerate() {
            let position = Position { x, y };
            let kind = match *token {
                ".." => None,
                "ST" => {
                    if start.replace(position).is_some() {
                        return Err(LevelError::DuplicateStart);
                    }
                    None
                }
                "GL" => {
                    if goal.replace(position).is_some() {
                        return Err(LevelError::DuplicateGoal);
                    }
                    None
                }
                "RK" => Some(ObstacleType::Rock),
                "WA" => Some(ObstacleType::Water),
                "MD" => Some(ObstacleType::Mud),
                "WL" => Some(ObstacleType::Wall),
                "FI" => Some(ObstacleType::Fire),
                "FO" => Some(ObstacleType::Forest),
                unknown => {
                    return Err(LevelError::UnknownCode {
                        code: unknown.to_string(),
                        x,
                        y,
                    });
                }
            };
            if let Some(kind) = kind {
                obstacles.push(Obstacle::localized(position, kind, language));
            }
        }
    }

    let start = start.ok_or(LevelError::MissingStart)?;
    let goal = goal.ok_or(LevelError::MissingGoal)?;

    let mut level = LevelConfig::ad_hoc(id, width, start, goal, obstacles);
    level.name = text::custom_level_name(language).to_string();
    level.validate()?;
    Ok(level)
}
