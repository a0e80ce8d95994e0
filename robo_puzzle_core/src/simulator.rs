use serde::{Deserialize, Serialize};

use crate::{Direction, ObstacleType, Position, level::LevelConfig, sound::SoundEvent};

/// A single instruction in the player's program. All moves are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    Up,
    Down,
    Left,
    Right,
    JumpUp,
    JumpDown,
    JumpLeft,
    JumpRight,
}

impl CommandType {
    pub const ALL: [CommandType; 8] = [
        CommandType::Up,
        CommandType::Down,
        CommandType::Left,
        CommandType::Right,
        CommandType::JumpUp,
        CommandType::JumpDown,
        CommandType::JumpLeft,
        CommandType::JumpRight,
    ];

    /// Direction faced after executing the command.
    pub fn direction(&self) -> Direction {
        match self {
            CommandType::Up | CommandType::JumpUp => Direction::North,
            CommandType::Down | CommandType::JumpDown => Direction::South,
            CommandType::Left | CommandType::JumpLeft => Direction::West,
            CommandType::Right | CommandType::JumpRight => Direction::East,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            CommandType::JumpUp
                | CommandType::JumpDown
                | CommandType::JumpLeft
                | CommandType::JumpRight
        )
    }

    /// Signed displacement: one cell for a walk, two for a jump.
    pub fn delta(&self) -> (isize, isize) {
        let (dx, dy) = self.direction().delta();
        let reach = if self.is_jump() { 2 } else { 1 };
        (dx * reach, dy * reach)
    }

    pub fn walk(direction: Direction) -> CommandType {
        match direction {
            Direction::North => CommandType::Up,
            Direction::South => CommandType::Down,
            Direction::West => CommandType::Left,
            Direction::East => CommandType::Right,
        }
    }

    pub fn jump(direction: Direction) -> CommandType {
        match direction {
            Direction::North => CommandType::JumpUp,
            Direction::South => CommandType::JumpDown,
            Direction::West => CommandType::JumpLeft,
            Direction::East => CommandType::JumpRight,
        }
    }

    /// Inverse of [`CommandType::delta`].
    pub fn from_delta(dx: isize, dy: isize) -> Option<CommandType> {
        CommandType::ALL
            .into_iter()
            .find(|command| command.delta() == (dx, dy))
    }
}

/// State of the run after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Running,
    Crashed,
    Goal,
    Bounds,
}

/// One discrete state of a run, for the renderer to animate between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    pub position: Position,
    pub direction: Direction,
    /// Index of the command that produced this step; `None` for the initial
    /// state.
    pub command_index: Option<usize>,
    /// The command that produced this step.
    pub command: Option<CommandType>,
    pub status: StepStatus,
}

impl SimulationStep {
    pub fn is_terminal(&self) -> bool {
        self.status != StepStatus::Running
    }

    /// The named audio cue for this step, if any.
    pub fn sound(&self) -> Option<SoundEvent> {
        match self.status {
            StepStatus::Goal => Some(SoundEvent::Win),
            StepStatus::Crashed | StepStatus::Bounds => Some(SoundEvent::Crash),
            StepStatus::Running => self.command.map(|command| {
                if command.is_jump() {
                    SoundEvent::Jump
                } else {
                    SoundEvent::Move
                }
            }),
        }
    }
}

/// Replays `commands` against `level`.
///
/// The returned list always starts with the initial state and stops at the
/// first non-running step. A jump only checks its landing cell. On a crash the
/// agent is shown on the obstacle cell; on a bounds violation it stays put.
/// Exhausting the commands while still running away from the goal is the
/// "incomplete" outcome, see [`classify`].
pub fn simulate<I>(level: &LevelConfig, commands: I) -> Vec<SimulationStep>
where
    I: IntoIterator<Item = CommandType>,
{
    let mut position = level.start;
    let mut direction = level.start_direction;
    let mut steps = vec![SimulationStep {
        position,
        direction,
        command_index: None,
        command: None,
        status: StepStatus::Running,
    }];

    for (index, command) in commands.into_iter().enumerate() {
        direction = command.direction();
        let (dx, dy) = command.delta();

        let status = match position
            .offset(dx, dy)
            .filter(|next| next.within(level.grid_size))
        {
            None => StepStatus::Bounds,
            Some(next) if level.is_blocked(next) => {
                position = next;
                StepStatus::Crashed
            }
            Some(next) => {
                position = next;
                StepStatus::Running
            }
        };

        steps.push(SimulationStep {
            position,
            direction,
            command_index: Some(index),
            command: Some(command),
            status,
        });

        if status != StepStatus::Running {
            break;
        }
    }

    if let Some(last) = steps.last_mut() {
        if last.status == StepStatus::Running && last.position == level.goal {
            last.status = StepStatus::Goal;
        }
    }

    steps
}

/// Caller-side classification of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Goal { commands_used: usize },
    Crashed { at: Position, obstacle: ObstacleType },
    OutOfBounds { at: Position },
    Incomplete { at: Position },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Goal { .. })
    }

    pub fn sound(&self) -> SoundEvent {
        match self {
            RunOutcome::Goal { .. } => SoundEvent::Win,
            RunOutcome::Crashed { .. } | RunOutcome::OutOfBounds { .. } => SoundEvent::Crash,
            RunOutcome::Incomplete { .. } => SoundEvent::Remove,
        }
    }
}

/// Turns a step list from [`simulate`] into a terminal outcome.
pub fn classify(level: &LevelConfig, steps: &[SimulationStep]) -> RunOutcome {
    let Some(last) = steps.last() else {
        return RunOutcome::Incomplete { at: level.start };
    };
    let commands_used = last.command_index.map_or(0, |index| index + 1);
    match last.status {
        StepStatus::Goal => RunOutcome::Goal { commands_used },
        StepStatus::Bounds => RunOutcome::OutOfBounds { at: last.position },
        StepStatus::Crashed => RunOutcome::Crashed {
            at: last.position,
            obstacle: level
                .obstacle_at(last.position)
                .map_or(ObstacleType::Rock, |obstacle| obstacle.kind),
        },
        StepStatus::Running => RunOutcome::Incomplete { at: last.position },
    }
}

/// Stars earned for finishing `level` with `command_count` commands.
///
/// The manhattan distance between start and goal is the par: at most par
/// earns 3 stars, up to par + 3 earns 2, anything longer earns 1.
pub fn calculate_stars(level: &LevelConfig, command_count: usize) -> u8 {
    let min_distance = level.min_distance();
    if command_count <= min_distance {
        3
    } else if command_count <= min_distance + 3 {
        2
    } else {
        1
    }
}

/// Everything the presentation layer needs after pressing "run".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub steps: Vec<SimulationStep>,
    pub outcome: RunOutcome,
    /// Stars for the whole program, only when the goal was reached.
    pub stars: Option<u8>,
}

/// Simulates, classifies and scores `commands` in one go. Stars are scored on
/// the full program length, as the player submitted it.
pub fn run(level: &LevelConfig, commands: &[CommandType]) -> RunReport {
    let steps = simulate(level, commands.iter().copied());
    let outcome = classify(level, &steps);
    let stars = outcome
        .is_success()
        .then(|| calculate_stars(level, commands.len()));
    RunReport {
        steps,
        outcome,
        stars,
    }
}
