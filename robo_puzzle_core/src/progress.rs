//! Stars earned per level, persisted as JSON.

use std::{collections::BTreeMap, fs, io, path::Path};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    LevelId,
    generator::LEVEL_COUNT,
    level::{LevelConfig, LevelError},
    tutorial::TUTORIAL_ID,
};

/// Failure to read or write a JSON file on disk.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Reads `path`, falling back to `T::default()` when it is missing or broken.
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match read_json(path) {
        Ok(value) => {
            log::info!("Loaded {what} from {}", path.display());
            value
        }
        Err(PersistError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("No {what} at {}, using defaults", path.display());
            T::default()
        }
        Err(err) => {
            log::warn!("Could not load {what} from {}: {err}; using defaults", path.display());
            T::default()
        }
    }
}

/// On-disk shape, including the older list of completed ids.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProgress {
    #[serde(default)]
    level_progress: Option<BTreeMap<LevelId, u8>>,
    #[serde(default)]
    completed_level_ids: Option<Vec<LevelId>>,
    #[serde(default)]
    custom_levels: Vec<serde_json::Value>,
}

impl From<StoredProgress> for Progress {
    fn from(stored: StoredProgress) -> Self {
        let level_progress = match (stored.level_progress, stored.completed_level_ids) {
            (Some(stars), _) => stars,
            (None, Some(completed)) => {
                log::info!("Migrating {} completed levels to star progress", completed.len());
                completed.into_iter().map(|id| (id, 1)).collect()
            }
            (None, None) => BTreeMap::new(),
        };
        let custom_levels = stored
            .custom_levels
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<LevelConfig>(entry) {
                Ok(level) => Some(level),
                Err(err) => {
                    log::warn!("Skipping unreadable custom level: {err}");
                    None
                }
            })
            .collect();
        Progress {
            level_progress,
            custom_levels,
        }
    }
}

/// Best star rating per level plus saved custom levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredProgress")]
pub struct Progress {
    level_progress: BTreeMap<LevelId, u8>,
    custom_levels: Vec<LevelConfig>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished run. Keeps the best rating and returns whether it
    /// improved. The tutorial is never recorded.
    pub fn record(&mut self, id: LevelId, stars: u8) -> bool {
        if id == TUTORIAL_ID || stars == 0 {
            return false;
        }
        let stars = stars.min(3);
        let best = self.level_progress.entry(id).or_insert(0);
        if stars > *best {
            *best = stars;
            true
        } else {
            false
        }
    }

    /// Best rating for a level, 0 if never finished.
    pub fn stars(&self, id: LevelId) -> u8 {
        self.level_progress.get(&id).copied().unwrap_or(0)
    }

    pub fn total_stars(&self) -> u32 {
        self.level_progress.values().map(|s| u32::from(*s)).sum()
    }

    pub fn completed(&self) -> usize {
        self.level_progress.values().filter(|s| **s > 0).count()
    }

    /// The tutorial, level 1 and ad hoc levels are always open; any other
    /// generated level opens once its predecessor has at least one star.
    pub fn is_unlocked(&self, id: LevelId) -> bool {
        match id {
            0 | 1 => true,
            id if id > u64::from(LEVEL_COUNT) => true,
            id => self.stars(id - 1) > 0,
        }
    }

    /// The level a "continue" button should open: one past the highest
    /// completed level, or that level itself when it is the last.
    pub fn next_playable(&self, max_level: LevelId) -> LevelId {
        let highest = self
            .level_progress
            .iter()
            .filter(|(id, stars)| (1..=max_level).contains(*id) && **stars > 0)
            .map(|(id, _)| *id)
            .max();
        match highest {
            Some(id) if id < max_level => id + 1,
            Some(id) => id,
            None => 1,
        }
    }

    pub fn custom_levels(&self) -> &[LevelConfig] {
        &self.custom_levels
    }

    /// Stores a custom level after checking it can be played.
    pub fn add_custom_level(&mut self, level: LevelConfig) -> Result<(), LevelError> {
        level.validate()?;
        self.custom_levels.retain(|existing| existing.id != level.id);
        self.custom_levels.push(level);
        Ok(())
    }

    /// A saved custom level with the same board as `level`, whatever its id
    /// and display text.
    pub fn find_custom_level(&self, level: &LevelConfig) -> Option<&LevelConfig> {
        self.custom_levels.iter().find(|existing| same_board(existing, level))
    }

    /// Forgets every rating and custom level.
    pub fn reset(&mut self) {
        self.level_progress.clear();
        self.custom_levels.clear();
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads progress from `path`, starting fresh when missing or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        load_or_default(path.as_ref(), "progress")
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        write_json(path.as_ref(), self)?;
        log::debug!("Progress saved ({} levels)", self.level_progress.len());
        Ok(())
    }
}

fn same_board(a: &LevelConfig, b: &LevelConfig) -> bool {
    let cells = |level: &LevelConfig| {
        let mut cells: Vec<_> = level.obstacles.iter().map(|o| (o.position, o.kind)).collect();
        cells.sort_by_key(|(position, _)| *position);
        cells
    };
    a.grid_size == b.grid_size
        && a.start == b.start
        && a.goal == b.goal
        && a.start_direction == b.start_direction
        && cells(a) == cells(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, ObstacleType, Position, level::Obstacle};

    #[test]
    fn keeps_the_best_rating() {
        let mut progress = Progress::new();
        assert!(progress.record(3, 2));
        assert!(!progress.record(3, 1));
        assert_eq!(progress.stars(3), 2);
        assert!(progress.record(3, 3));
        assert_eq!(progress.stars(3), 3);
        assert!(!progress.record(0, 3));
        assert_eq!(progress.stars(0), 0);
        assert_eq!(progress.total_stars(), 3);
    }

    #[test]
    fn unlocking_follows_the_previous_level() {
        let mut progress = Progress::new();
        assert!(progress.is_unlocked(0));
        assert!(progress.is_unlocked(1));
        assert!(!progress.is_unlocked(2));
        progress.record(1, 1);
        assert!(progress.is_unlocked(2));
        assert!(!progress.is_unlocked(3));
        assert!(progress.is_unlocked(1_700_000_000_000));
    }

    #[test]
    fn next_playable_level() {
        let mut progress = Progress::new();
        assert_eq!(progress.next_playable(100), 1);
        progress.record(1, 3);
        progress.record(2, 1);
        assert_eq!(progress.next_playable(100), 3);
        progress.record(100, 2);
        assert_eq!(progress.next_playable(100), 100);
    }

    #[test]
    fn legacy_completed_ids_become_one_star() {
        let progress = Progress::from_json(r#"{"completedLevelIds":[1,2,5]}"#).unwrap();
        assert_eq!(progress.stars(1), 1);
        assert_eq!(progress.stars(5), 1);
        assert_eq!(progress.total_stars(), 3);

        let both = Progress::from_json(r#"{"levelProgress":{"1":3},"completedLevelIds":[1,2]}"#)
            .unwrap();
        assert_eq!(both.stars(1), 3);
        assert_eq!(both.stars(2), 0);
    }

    #[test]
    fn json_round_trip_uses_camel_case() {
        let mut progress = Progress::new();
        progress.record(4, 2);
        let json = progress.to_json().unwrap();
        assert!(json.contains("levelProgress"));
        assert!(json.contains("customLevels"));
        assert_eq!(Progress::from_json(&json).unwrap(), progress);
    }

    #[test]
    fn custom_levels_must_validate() {
        let mut progress = Progress::new();
        let bad = LevelConfig::ad_hoc(9_000, 5, Position::new(0, 0), Position::new(0, 0), vec![]);
        assert!(progress.add_custom_level(bad).is_err());
        let good = LevelConfig::ad_hoc(9_000, 5, Position::new(0, 0), Position::new(4, 0), vec![]);
        progress.add_custom_level(good.clone()).unwrap();
        progress.add_custom_level(good).unwrap();
        assert_eq!(progress.custom_levels().len(), 1);

        progress.reset();
        assert!(progress.custom_levels().is_empty());
    }

    #[test]
    fn reads_older_saves_with_custom_levels() {
        let json = r#"{
            "levelProgress": {"1": 3, "2": 2},
            "customLevels": [{
                "id": 1712000000000,
                "name": "Rocky Road",
                "description": "Jump over the rock",
                "gridSize": 5,
                "start": {"x": 0, "y": 2},
                "startDirection": 1,
                "goal": {"x": 4, "y": 2},
                "obstacles": [{"x": 2, "y": 2}]
            }]
        }"#;
        let progress = Progress::from_json(json).unwrap();
        assert_eq!(progress.total_stars(), 5);
        let custom = &progress.custom_levels()[0];
        assert_eq!(custom.start_direction, Direction::East);
        assert_eq!(custom.obstacles[0].kind, ObstacleType::Rock);
        assert_eq!(custom.validate(), Ok(()));
    }

    #[test]
    fn unreadable_custom_level_is_skipped() {
        let json = r#"{
            "levelProgress": {"1": 2},
            "customLevels": [
                {"id": 7, "gridSize": 5},
                {"id": 8, "gridSize": 5, "start": {"x": 0, "y": 0}, "startDirection": "East",
                 "goal": {"x": 4, "y": 0}, "obstacles": []}
            ]
        }"#;
        let progress = Progress::from_json(json).unwrap();
        assert_eq!(progress.stars(1), 2);
        let ids: Vec<_> = progress.custom_levels().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![8]);
    }

    #[test]
    fn finds_a_custom_level_by_its_board() {
        let rock = |x, y| Obstacle::new(Position::new(x, y), ObstacleType::Rock, "Rock");
        let mut progress = Progress::new();
        let saved = LevelConfig::ad_hoc(
            1_000,
            5,
            Position::new(0, 0),
            Position::new(4, 0),
            vec![rock(2, 0), rock(1, 1)],
        );
        progress.add_custom_level(saved).unwrap();

        let mut reloaded = LevelConfig::ad_hoc(
            2_000,
            5,
            Position::new(0, 0),
            Position::new(4, 0),
            vec![rock(1, 1), rock(2, 0)],
        );
        reloaded.name = "Renamed".into();
        assert_eq!(progress.find_custom_level(&reloaded).map(|l| l.id), Some(1_000));

        reloaded.obstacles.pop();
        assert!(progress.find_custom_level(&reloaded).is_none());
    }

    #[test]
    fn load_and_save_files() {
        let dir = std::env::temp_dir().join(format!("robo_puzzle_progress_{}", std::process::id()));
        let path = dir.join("progress.json");
        assert_eq!(Progress::load(&path), Progress::new());

        let mut progress = Progress::new();
        progress.record(1, 3);
        progress.save(&path).unwrap();
        assert_eq!(Progress::load(&path), progress);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Progress::load(&path), Progress::new());
        let _ = fs::remove_dir_all(&dir);
    }
}
