use std::collections::HashMap;

use crate::{
    Language, LevelId,
    generator::{self, LEVEL_COUNT},
    level::LevelConfig,
    tutorial::{self, TUTORIAL_ID},
};

/// Lazily generated levels, cached per index and language.
#[derive(Debug, Default)]
pub struct LevelCatalog {
    levels: HashMap<(u32, Language), LevelConfig>,
    tutorials: HashMap<Language, LevelConfig>,
}

impl LevelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tutorial(&mut self, language: Language) -> &LevelConfig {
        self.tutorials
            .entry(language)
            .or_insert_with(|| tutorial::tutorial_level(language))
    }

    /// Generated level `index`, clamped into 1..=100.
    pub fn level(&mut self, index: u32, language: Language) -> &LevelConfig {
        let index = index.clamp(1, LEVEL_COUNT);
        self.levels
            .entry((index, language))
            .or_insert_with(|| generator::generate_level(index, language))
    }

    /// The tutorial or a generated level. `None` for ids it does not own.
    pub fn get(&mut self, id: LevelId, language: Language) -> Option<&LevelConfig> {
        match id {
            TUTORIAL_ID => Some(self.tutorial(language)),
            id if id <= u64::from(LEVEL_COUNT) => Some(self.level(id as u32, language)),
            _ => None,
        }
    }

    /// Every generated level in order.
    pub fn all(&mut self, language: Language) -> Vec<&LevelConfig> {
        for index in 1..=LEVEL_COUNT {
            self.level(index, language);
        }
        (1..=LEVEL_COUNT)
            .filter_map(|index| self.levels.get(&(index, language)))
            .collect()
    }

    pub fn cached(&self) -> usize {
        self.levels.len()
    }

    /// Level that follows `current`: the tutorial leads to level 1 and the
    /// last generated level leads nowhere.
    pub fn next_level_id(current: LevelId) -> Option<LevelId> {
        match current {
            TUTORIAL_ID => Some(1),
            id if id < u64::from(LEVEL_COUNT) => Some(id + 1),
            _ => None,
        }
    }
}
