use robo_puzzle_core::{
    Language, ObstacleType, Position,
    catalog::LevelCatalog,
    generator::{LEVEL_COUNT, generate_level, grid_size_for},
    level::MAX_GRID_SIZE,
    simulator::{self, RunOutcome, StepStatus},
    solver,
};

#[test]
fn every_level_is_valid_and_solvable() {
    for index in 1..=LEVEL_COUNT {
        let level = generate_level(index, Language::En);
        assert_eq!(level.id, u64::from(index));
        assert!(
            (5..=MAX_GRID_SIZE).contains(&level.grid_size),
            "level {index}: grid {}",
            level.grid_size
        );
        assert_eq!(level.validate(), Ok(()), "level {index}");
        assert!(level.tutorial_steps.is_none());
    }
}

#[test]
fn grid_size_never_shrinks() {
    let sizes: Vec<_> = (1..=LEVEL_COUNT)
        .map(|index| generate_level(index, Language::Km).grid_size)
        .collect();
    assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
    for (offset, size) in sizes.iter().enumerate() {
        assert_eq!(*size, grid_size_for(offset as u32 + 1));
    }
}

#[test]
fn shortest_solutions_reach_the_goal() {
    for index in 1..=LEVEL_COUNT {
        let level = generate_level(index, Language::En);
        let program = solver::shortest_solution(&level)
            .unwrap_or_else(|| panic!("level {index} has no solution"));

        let report = simulator::run(&level, &program);
        assert_eq!(
            report.outcome,
            RunOutcome::Goal {
                commands_used: program.len()
            },
            "level {index}"
        );
        assert!(report.stars.is_some_and(|stars| stars >= 1));
        assert_eq!(report.steps.last().map(|s| s.status), Some(StepStatus::Goal));
    }
}

#[test]
fn geometry_does_not_depend_on_language() {
    for index in 1..=LEVEL_COUNT {
        let en = generate_level(index, Language::En);
        let km = generate_level(index, Language::Km);
        assert_eq!(en.grid_size, km.grid_size);
        assert_eq!(en.start, km.start);
        assert_eq!(en.start_direction, km.start_direction);
        assert_eq!(en.goal, km.goal);
        let cells = |level: &robo_puzzle_core::level::LevelConfig| -> Vec<(Position, ObstacleType)> {
            level.obstacles.iter().map(|o| (o.position, o.kind)).collect()
        };
        assert_eq!(cells(&en), cells(&km), "level {index}");
    }
}

#[test]
fn generation_is_repeatable() {
    let mut catalog = LevelCatalog::new();
    for index in [1, 17, 50, 99] {
        assert_eq!(*catalog.level(index, Language::En), generate_level(index, Language::En));
    }
}

#[test]
fn first_level_layout_is_pinned() {
    let level = generate_level(1, Language::En);
    assert_eq!(level.grid_size, 5);
    assert_eq!(level.start, Position::new(0, 3));
    assert_eq!(level.goal, Position::new(4, 3));
    let obstacles: Vec<_> = level.obstacles.iter().map(|o| (o.position, o.kind)).collect();
    assert_eq!(
        obstacles,
        vec![
            (Position::new(1, 1), ObstacleType::Forest),
            (Position::new(1, 2), ObstacleType::Rock),
            (Position::new(2, 2), ObstacleType::Forest),
        ]
    );
    assert_eq!(level.obstacles[1].description, "Rock");
}

#[test]
fn themes_pick_their_obstacles() {
    for index in 41..=60 {
        let level = generate_level(index, Language::En);
        assert!(
            level
                .obstacles
                .iter()
                .all(|o| matches!(o.kind, ObstacleType::Wall | ObstacleType::Mud)),
            "dungeon level {index}"
        );
    }
    for index in 61..=80 {
        let level = generate_level(index, Language::En);
        assert!(level.obstacles.iter().all(|o| o.kind == ObstacleType::Fire));
    }
}
