//! The hand-authored onboarding level and the state machine that walks a
//! player through it.

use crate::{
    Direction, Language, ObstacleType, Position,
    level::{LevelConfig, Obstacle, TutorialStep, TutorialTrigger},
    simulator::CommandType,
    text::{self, TutorialLine},
};

/// Level id reserved for the tutorial.
pub const TUTORIAL_ID: u64 = 0;

fn step(
    line: TutorialLine,
    trigger: TutorialTrigger,
    required_block: Option<CommandType>,
    highlight: &str,
    language: Language,
) -> TutorialStep {
    TutorialStep {
        message: text::tutorial_line(line, language).to_string(),
        trigger,
        required_block,
        highlight: Some(highlight.to_string()),
    }
}

/// The tutorial: a 5x5 grid with one rock between the agent and the flag.
///
/// The scripted program is Right, JumpRight, Up, Up followed by a run.
pub fn tutorial_level(language: Language) -> LevelConfig {
    use TutorialTrigger::{AddBlock, ClickRun};

    let steps = vec![
        step(TutorialLine::WalkRight, AddBlock, Some(CommandType::Right), "btn-right", language),
        step(
            TutorialLine::JumpRight,
            AddBlock,
            Some(CommandType::JumpRight),
            "btn-jump-right",
            language,
        ),
        step(TutorialLine::WalkUp, AddBlock, Some(CommandType::Up), "btn-up", language),
        step(TutorialLine::WalkUpAgain, AddBlock, Some(CommandType::Up), "btn-up", language),
        step(TutorialLine::PressRun, ClickRun, None, "btn-run", language),
    ];

    LevelConfig {
        id: TUTORIAL_ID,
        name: text::tutorial_name(language).to_string(),
        description: text::tutorial_welcome(language).to_string(),
        grid_size: 5,
        start: Position::new(0, 2),
        start_direction: Direction::East,
        goal: Position::new(3, 0),
        obstacles: vec![Obstacle::localized(
            Position::new(2, 2),
            ObstacleType::Rock,
            language,
        )],
        tutorial_steps: Some(steps),
    }
}

/// Something the player did that a tutorial step may be waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialEvent {
    BlockAdded(CommandType),
    RunClicked,
    Won,
    /// Dismissed a step that waits for nothing.
    Acknowledged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialState {
    /// Waiting on the step at this index.
    Step(usize),
    Completed,
}

/// Result of feeding an event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced(TutorialState),
    /// The current step waits for a different action. The caller should undo
    /// or refuse what the player just did.
    Rejected,
    /// The event has no bearing on the tutorial.
    Ignored,
}

/// Steps through a scripted tutorial one trigger at a time.
#[derive(Debug, Clone)]
pub struct TutorialMachine {
    steps: Vec<TutorialStep>,
    state: TutorialState,
}

impl TutorialMachine {
    pub fn new(steps: Vec<TutorialStep>) -> Self {
        let state = if steps.is_empty() {
            TutorialState::Completed
        } else {
            TutorialState::Step(0)
        };
        TutorialMachine { steps, state }
    }

    /// `None` unless the level carries tutorial steps.
    pub fn from_level(level: &LevelConfig) -> Option<Self> {
        level.tutorial_steps.clone().map(Self::new)
    }

    pub fn state(&self) -> TutorialState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == TutorialState::Completed
    }

    pub fn current_step(&self) -> Option<&TutorialStep> {
        match self.state {
            TutorialState::Step(index) => self.steps.get(index),
            TutorialState::Completed => None,
        }
    }

    /// Message to show right now; the completion line once finished.
    pub fn message(&self, language: Language) -> &str {
        match self.current_step() {
            Some(step) => &step.message,
            None => text::tutorial_line(TutorialLine::Completed, language),
        }
    }

    /// Whether adding `command` would satisfy the current step.
    pub fn accepts_block(&self, command: CommandType) -> bool {
        self.current_step().is_some_and(|step| {
            step.trigger == TutorialTrigger::AddBlock
                && step.required_block.is_none_or(|required| required == command)
        })
    }

    pub fn handle(&mut self, event: TutorialEvent) -> Transition {
        let Some(step) = self.current_step() else {
            return Transition::Ignored;
        };

        let satisfied = match (step.trigger, event) {
            (TutorialTrigger::AddBlock, TutorialEvent::BlockAdded(command)) => {
                step.required_block.is_none_or(|required| required == command)
            }
            (TutorialTrigger::ClickRun, TutorialEvent::RunClicked)
            | (TutorialTrigger::Win, TutorialEvent::Won)
            | (TutorialTrigger::None, TutorialEvent::Acknowledged) => true,
            // Blocks and runs are the player's only actions: off-script ones
            // are refused, anything else is noise.
            (_, TutorialEvent::BlockAdded(_) | TutorialEvent::RunClicked) => false,
            (_, TutorialEvent::Won | TutorialEvent::Acknowledged) => return Transition::Ignored,
        };

        if !satisfied {
            return Transition::Rejected;
        }
        self.advance();
        Transition::Advanced(self.state)
    }

    fn advance(&mut self) {
        self.state = match self.state {
            TutorialState::Step(index) if index + 1 < self.steps.len() => {
                TutorialState::Step(index + 1)
            }
            _ => TutorialState::Completed,
        };
        log::debug!("tutorial moved to {:?}", self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{self, RunOutcome};
    use CommandType::*;

    #[test]
    fn tutorial_level_is_valid() {
        let level = tutorial_level(Language::En);
        assert_eq!(level.id, 0);
        assert!(level.is_tutorial());
        assert_eq!(level.validate(), Ok(()));
        assert_eq!(level.tutorial_steps.as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn scripted_program_wins_with_three_stars() {
        let level = tutorial_level(Language::Km);
        let script: Vec<_> = level
            .tutorial_steps
            .iter()
            .flatten()
            .filter_map(|step| step.required_block)
            .collect();
        assert_eq!(script, vec![Right, JumpRight, Up, Up]);

        let report = simulator::run(&level, &script);
        assert_eq!(report.outcome, RunOutcome::Goal { commands_used: 4 });
        assert_eq!(report.stars, Some(3));
    }

    #[test]
    fn machine_follows_the_script() {
        let level = tutorial_level(Language::En);
        let mut machine = TutorialMachine::from_level(&level).unwrap();
        assert_eq!(machine.state(), TutorialState::Step(0));
        assert_eq!(
            machine.current_step().and_then(|s| s.highlight.as_deref()),
            Some("btn-right")
        );

        assert_eq!(machine.handle(TutorialEvent::BlockAdded(Up)), Transition::Rejected);
        assert_eq!(machine.handle(TutorialEvent::RunClicked), Transition::Rejected);
        assert_eq!(machine.handle(TutorialEvent::Won), Transition::Ignored);
        assert_eq!(machine.state(), TutorialState::Step(0));

        assert!(machine.accepts_block(Right));
        assert_eq!(
            machine.handle(TutorialEvent::BlockAdded(Right)),
            Transition::Advanced(TutorialState::Step(1))
        );
        for command in [JumpRight, Up, Up] {
            assert!(matches!(
                machine.handle(TutorialEvent::BlockAdded(command)),
                Transition::Advanced(_)
            ));
        }
        assert_eq!(machine.state(), TutorialState::Step(4));
        assert!(!machine.accepts_block(Up));

        assert_eq!(
            machine.handle(TutorialEvent::RunClicked),
            Transition::Advanced(TutorialState::Completed)
        );
        assert!(machine.is_completed());
        assert_eq!(machine.handle(TutorialEvent::RunClicked), Transition::Ignored);
        assert_eq!(
            machine.message(Language::En),
            text::tutorial_line(TutorialLine::Completed, Language::En)
        );
    }

    #[test]
    fn acknowledge_and_win_triggers() {
        let steps = vec![
            TutorialStep {
                message: "hi".into(),
                trigger: TutorialTrigger::None,
                required_block: None,
                highlight: None,
            },
            TutorialStep {
                message: "win".into(),
                trigger: TutorialTrigger::Win,
                required_block: None,
                highlight: None,
            },
        ];
        let mut machine = TutorialMachine::new(steps);
        assert_eq!(machine.handle(TutorialEvent::Won), Transition::Ignored);
        assert_eq!(
            machine.handle(TutorialEvent::Acknowledged),
            Transition::Advanced(TutorialState::Step(1))
        );
        assert_eq!(machine.handle(TutorialEvent::BlockAdded(Down)), Transition::Rejected);
        assert_eq!(
            machine.handle(TutorialEvent::Won),
            Transition::Advanced(TutorialState::Completed)
        );
    }

    #[test]
    fn regular_levels_have_no_machine() {
        let level = LevelConfig::ad_hoc(3, 5, Position::new(0, 0), Position::new(4, 4), vec![]);
        assert!(TutorialMachine::from_level(&level).is_none());
        assert!(TutorialMachine::new(Vec::new()).is_completed());
    }
}
