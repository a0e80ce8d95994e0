use serde::{Deserialize, Serialize};

use crate::{Language, ObstacleType, rng::Lcg, text};

/// Visual grouping of generated levels, one per band of 20 indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Forest,
    Water,
    Dungeon,
    Fire,
    Mix,
}

const FOREST_PALETTE: [ObstacleType; 2] = [ObstacleType::Rock, ObstacleType::Forest];
const MIX_PALETTE: [ObstacleType; 5] = [
    ObstacleType::Rock,
    ObstacleType::Water,
    ObstacleType::Wall,
    ObstacleType::Fire,
    ObstacleType::Mud,
];

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Forest,
        Theme::Water,
        Theme::Dungeon,
        Theme::Fire,
        Theme::Mix,
    ];

    /// Theme for a generated level index.
    pub fn for_level(index: u32) -> Theme {
        match index {
            0..=20 => Theme::Forest,
            21..=40 => Theme::Water,
            41..=60 => Theme::Dungeon,
            61..=80 => Theme::Fire,
            _ => Theme::Mix,
        }
    }

    /// Inclusive band of level indices using this theme.
    pub fn level_range(&self) -> (u32, u32) {
        match self {
            Theme::Forest => (1, 20),
            Theme::Water => (21, 40),
            Theme::Dungeon => (41, 60),
            Theme::Fire => (61, 80),
            Theme::Mix => (81, 100),
        }
    }

    /// Heading for this band on a level-select screen.
    pub fn group_name(&self, language: Language) -> &'static str {
        text::theme_group_name(*self, language)
    }

    /// Draws the obstacle type for one filler cell. Forest and mix themes
    /// consume one RNG draw, the others none.
    pub fn pick_obstacle(&self, rng: &mut Lcg) -> ObstacleType {
        match self {
            Theme::Forest => rng
                .pick(&FOREST_PALETTE)
                .copied()
                .unwrap_or(ObstacleType::Rock),
            Theme::Water => ObstacleType::Water,
            Theme::Dungeon => ObstacleType::Wall,
            Theme::Fire => ObstacleType::Fire,
            Theme::Mix => rng.pick(&MIX_PALETTE).copied().unwrap_or(ObstacleType::Rock),
        }
    }

    /// Overrides a drawn type for an obstacle placed on the solution path,
    /// which the player must jump over.
    pub fn jump_obstacle(&self, drawn: ObstacleType) -> ObstacleType {
        match self {
            Theme::Forest => ObstacleType::Rock,
            Theme::Dungeon => ObstacleType::Mud,
            Theme::Water | Theme::Fire | Theme::Mix => drawn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(Theme::for_level(1), Theme::Forest);
        assert_eq!(Theme::for_level(20), Theme::Forest);
        assert_eq!(Theme::for_level(21), Theme::Water);
        assert_eq!(Theme::for_level(60), Theme::Dungeon);
        assert_eq!(Theme::for_level(61), Theme::Fire);
        assert_eq!(Theme::for_level(81), Theme::Mix);
        assert_eq!(Theme::for_level(100), Theme::Mix);
        for theme in Theme::ALL {
            let (lo, hi) = theme.level_range();
            assert_eq!(Theme::for_level(lo), theme);
            assert_eq!(Theme::for_level(hi), theme);
        }
    }

    #[test]
    fn fixed_palettes_do_not_draw() {
        let mut rng = Lcg::new(3);
        assert_eq!(Theme::Water.pick_obstacle(&mut rng), ObstacleType::Water);
        assert_eq!(Theme::Dungeon.pick_obstacle(&mut rng), ObstacleType::Wall);
        assert_eq!(Theme::Fire.pick_obstacle(&mut rng), ObstacleType::Fire);
        assert_eq!(rng.state(), 3);

        let forest = Theme::Forest.pick_obstacle(&mut rng);
        assert!(matches!(forest, ObstacleType::Rock | ObstacleType::Forest));
        assert_ne!(rng.state(), 3);
    }

    #[test]
    fn group_names_are_localized() {
        assert_eq!(Theme::Fire.group_name(Language::En), "Volcano Dash");
        assert_ne!(Theme::Fire.group_name(Language::Km), "Volcano Dash");
    }

    #[test]
    fn jump_overrides() {
        assert_eq!(Theme::Forest.jump_obstacle(ObstacleType::Forest), ObstacleType::Rock);
        assert_eq!(Theme::Dungeon.jump_obstacle(ObstacleType::Wall), ObstacleType::Mud);
        assert_eq!(Theme::Water.jump_obstacle(ObstacleType::Water), ObstacleType::Water);
        assert_eq!(Theme::Mix.jump_obstacle(ObstacleType::Fire), ObstacleType::Fire);
    }
}
