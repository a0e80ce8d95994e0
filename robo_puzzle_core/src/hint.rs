//! Hints for a stuck player.
//!
//! A hint comes from a [`HintService`], which may be remote and may fail.
//! [`hint_or_fallback`] turns any failure into a friendly line so the caller
//! never has to handle it. [`SolverHints`] is a local service built on the
//! simulator and the BFS planner.

use crate::{
    Language,
    level::LevelConfig,
    simulator::{self, CommandType, RunOutcome},
    solver, text,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HintError {
    #[error("No hint could be produced")]
    Unavailable,
    #[error("Hint service failed: {0}")]
    Service(String),
}

/// Produces one short hint for the current program.
pub trait HintService {
    fn hint(
        &self,
        level: &LevelConfig,
        program: &[CommandType],
        language: Language,
    ) -> Result<String, HintError>;
}

/// Everything a text-generating hint backend needs to know.
#[derive(Debug, Clone, Copy)]
pub struct HintRequest<'a> {
    pub level: &'a LevelConfig,
    pub program: &'a [CommandType],
    pub language: Language,
}

impl HintRequest<'_> {
    fn language_name(&self) -> &'static str {
        match self.language {
            Language::En => "English",
            Language::Km => "Khmer (Cambodian)",
        }
    }

    /// Builds the request text: the board, the current program, and what kind
    /// of answer is wanted.
    pub fn prompt(&self) -> String {
        let level = self.level;
        let obstacles = serde_json::to_string(&level.obstacles).unwrap_or_else(|_| "[]".into());
        let program = serde_json::to_string(self.program).unwrap_or_else(|_| "[]".into());
        format!(
            "You are a helpful coding tutor for a child aged 7-10.
Language: {language}.

The child is playing a grid-based coding game.
Grid Size: {size}x{size}.
Start: ({sx}, {sy}) facing {facing:?}.
Goal: ({gx}, {gy}).
Obstacles: {obstacles}.

Available Commands:
- WALK: UP, DOWN, LEFT, RIGHT
- JUMP (Moves 2 steps): JUMP_UP, JUMP_DOWN, JUMP_LEFT, JUMP_RIGHT

Current Code Sequence: {program}.

Analyze if the current code will reach the goal.
If it is wrong, give a gentle, encouraging hint on what to fix.
Do not give the exact solution, just a hint.
Keep it short (1-2 sentences).",
            language = self.language_name(),
            size = level.grid_size,
            sx = level.start.x,
            sy = level.start.y,
            facing = level.start_direction,
            gx = level.goal.x,
            gy = level.goal.y,
        )
    }
}

/// Local hints: finds where the program goes wrong, or which move to make
/// next.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolverHints;

impl HintService for SolverHints {
    fn hint(
        &self,
        level: &LevelConfig,
        program: &[CommandType],
        language: Language,
    ) -> Result<String, HintError> {
        let steps = simulator::simulate(level, program.iter().copied());
        match simulator::classify(level, &steps) {
            RunOutcome::Goal { .. } => Ok(text::hint_already_solved(language).to_string()),
            RunOutcome::Crashed { .. } | RunOutcome::OutOfBounds { .. } => {
                let failing = steps
                    .last()
                    .and_then(|step| step.command_index)
                    .ok_or(HintError::Unavailable)?;
                Ok(text::hint_remove_from(failing + 1, language))
            }
            RunOutcome::Incomplete { at } => {
                let next = solver::shortest_solution_from(level, at)
                    .and_then(|plan| plan.first().copied())
                    .ok_or(HintError::Unavailable)?;
                Ok(text::hint_try(next, language))
            }
        }
    }
}

/// Asks `service` for a hint, substituting a localized apology on failure.
pub fn hint_or_fallback<S: HintService + ?Sized>(
    service: &S,
    level: &LevelConfig,
    program: &[CommandType],
    language: Language,
) -> String {
    log::trace!(
        "Hint request: {}",
        HintRequest {
            level,
            program,
            language
        }
        .prompt()
    );
    match service.hint(level, program, language) {
        Ok(hint) if !hint.trim().is_empty() => hint,
        Ok(_) => text::hint_unavailable(language).to_string(),
        Err(err) => {
            log::warn!("Hint for level {} failed: {err}", level.id);
            text::hint_unavailable(language).to_string()
        }
    }
}
