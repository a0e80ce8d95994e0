//! Fresh custom levels on request.
//!
//! A [`LevelService`] may be remote and may hand back anything, so every
//! level it returns is checked, given a caller-chosen id and stored through
//! [`Progress::add_custom_level`] before it is played. [`GeneratedLevels`]
//! is the local service: it takes a generated level from the band matching
//! the difficulty and turns or mirrors the board.

use std::{cell::Cell, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{
    Direction, Language, LevelId, Position,
    generator::{self, LEVEL_COUNT},
    level::{LevelConfig, LevelError, Obstacle},
    progress::Progress,
    rng::Lcg,
    text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Generated levels of comparable difficulty.
    pub fn levels(self) -> RangeInclusive<u32> {
        match self {
            Difficulty::Easy => 1..=30,
            Difficulty::Medium => 31..=70,
            Difficulty::Hard => 71..=LEVEL_COUNT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LevelServiceError {
    #[error("Level service failed: {0}")]
    Service(String),
    #[error("Level service answered with malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Id {0} belongs to a built-in level")]
    ReservedId(LevelId),
    #[error("Level cannot be played: {0}")]
    Invalid(#[from] LevelError),
}

/// Produces one new level of the requested difficulty.
pub trait LevelService {
    fn generate(
        &self,
        difficulty: Difficulty,
        language: Language,
    ) -> Result<LevelConfig, LevelServiceError>;
}

/// What a text-generating level backend is asked for.
#[derive(Debug, Clone, Copy)]
pub struct LevelRequest {
    pub difficulty: Difficulty,
    pub language: Language,
}

impl LevelRequest {
    pub fn prompt(&self) -> String {
        let language = match self.language {
            Language::En => "English",
            Language::Km => "Khmer",
        };
        format!(
            "Create a JSON object for a grid-based robot coding puzzle level.
Difficulty: {difficulty}.
Grid Size: between 5 and 8.

Schema:
{{
  \"name\": \"Level Name in {language}\",
  \"gridSize\": integer,
  \"start\": {{\"x\": int, \"y\": int}},
  \"startDirection\": 0 (North), 1 (East), 2 (South), or 3 (West),
  \"goal\": {{\"x\": int, \"y\": int}},
  \"obstacles\": [{{\"x\": int, \"y\": int}}, ...],
  \"description\": \"Short description in {language}\"
}}

Ensure the path is solvable.",
            difficulty = self.difficulty.as_str(),
        )
    }
}

/// Reads a backend answer shaped like [`LevelRequest::prompt`] asks for. The
/// answer carries no id, so `id` is filled in.
pub fn level_from_json(json: &str, id: LevelId) -> Result<LevelConfig, LevelServiceError> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("id".into(), id.into());
    }
    Ok(serde_json::from_value(value)?)
}

/// Asks `service` for a level, then checks, ids and stores it. A board that
/// is already saved keeps its earlier id instead of being stored twice.
pub fn request_level<S: LevelService + ?Sized>(
    service: &S,
    difficulty: Difficulty,
    language: Language,
    id: LevelId,
    progress: &mut Progress,
) -> Result<LevelConfig, LevelServiceError> {
    if id <= u64::from(LEVEL_COUNT) {
        return Err(LevelServiceError::ReservedId(id));
    }
    log::trace!("Level request: {}", LevelRequest { difficulty, language }.prompt());

    let mut level = service.generate(difficulty, language)?;
    level.id = id;
    level.tutorial_steps = None;
    level.validate()?;

    if let Some(saved) = progress.find_custom_level(&level) {
        log::debug!("Level service repeated saved level {}", saved.id);
        return Ok(saved.clone());
    }
    progress.add_custom_level(level.clone())?;
    log::info!(
        "Added {} custom level {} ({}x{}, {} obstacles)",
        difficulty.as_str(),
        level.id,
        level.grid_size,
        level.grid_size,
        level.obstacles.len()
    );
    Ok(level)
}

/// Like [`request_level`], but any failure becomes a localized apology for
/// the status line.
pub fn level_or_fallback<S: LevelService + ?Sized>(
    service: &S,
    difficulty: Difficulty,
    language: Language,
    id: LevelId,
    progress: &mut Progress,
) -> Result<LevelConfig, &'static str> {
    request_level(service, difficulty, language, id, progress).map_err(|err| {
        log::warn!("Could not add a {} level: {err}", difficulty.as_str());
        text::level_generation_failed(language)
    })
}

/// Local levels built from the deterministic generator.
#[derive(Debug)]
pub struct GeneratedLevels {
    state: Cell<u64>,
}

impl GeneratedLevels {
    pub fn new(seed: u64) -> Self {
        GeneratedLevels {
            state: Cell::new(Lcg::new(seed).state()),
        }
    }
}

impl LevelService for GeneratedLevels {
    fn generate(
        &self,
        difficulty: Difficulty,
        language: Language,
    ) -> Result<LevelConfig, LevelServiceError> {
        let mut rng = Lcg::new(self.state.get());
        let band = difficulty.levels();
        let index = rng.range(*band.start() as usize, *band.end() as usize) as u32;
        let flip_x = rng.coin();
        let flip_y = rng.coin();
        let transpose = rng.coin();
        self.state.set(rng.state());

        let base = generator::generate_level(index, language);
        let last = base.grid_size - 1;
        let turn = |p: Position| {
            let x = if flip_x { last - p.x } else { p.x };
            let y = if flip_y { last - p.y } else { p.y };
            if transpose { Position::new(y, x) } else { Position::new(x, y) }
        };

        let start = turn(base.start);
        let goal = turn(base.goal);
        log::debug!(
            "Built {} level from level {index} (flip x {flip_x}, flip y {flip_y}, transpose {transpose})",
            difficulty.as_str()
        );
        Ok(LevelConfig {
            id: base.id,
            name: text::custom_level_name(language).to_string(),
            description: base.description,
            grid_size: base.grid_size,
            start,
            start_direction: Direction::toward(start, goal),
            goal,
            obstacles: base
                .obstacles
                .into_iter()
                .map(|o| Obstacle {
                    position: turn(o.position),
                    ..o
                })
                .collect(),
            tutorial_steps: None,
        })
    }
}
