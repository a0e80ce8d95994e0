use robo_puzzle_core::{
    Language,
    catalog::LevelCatalog,
    hint::{SolverHints, hint_or_fallback},
    level_service::{Difficulty, GeneratedLevels, level_or_fallback},
    program::Program,
    progress::Progress,
    simulator::{self, CommandType::*},
    solver,
    sound::{MuteGate, RecordingSink, SoundEvent, SoundSink},
    tutorial::{Transition, TutorialEvent, TutorialMachine},
};

#[test]
fn tutorial_played_through_the_editor() {
    let mut catalog = LevelCatalog::new();
    let level = catalog.tutorial(Language::En).clone();
    let mut machine = TutorialMachine::from_level(&level).expect("tutorial steps");
    let mut program = Program::default();
    let mut sounds = MuteGate::new(RecordingSink::default(), false);

    // an off-script block is refused before it reaches the program
    assert!(!machine.accepts_block(Up));
    assert_eq!(machine.handle(TutorialEvent::BlockAdded(Up)), Transition::Rejected);

    for command in [Right, JumpRight, Up, Up] {
        assert!(machine.accepts_block(command));
        program.add(command).unwrap();
        sounds.play(SoundEvent::Add);
        assert!(matches!(
            machine.handle(TutorialEvent::BlockAdded(command)),
            Transition::Advanced(_)
        ));
    }
    assert!(matches!(machine.handle(TutorialEvent::RunClicked), Transition::Advanced(_)));
    assert!(machine.is_completed());

    let report = simulator::run(&level, &program.commands());
    for step in &report.steps {
        if let Some(event) = step.sound() {
            sounds.play(event);
        }
    }
    assert!(report.outcome.is_success());

    let mut progress = Progress::new();
    assert!(!progress.record(level.id, report.stars.unwrap_or(0)));
    assert_eq!(progress.total_stars(), 0);

    assert_eq!(
        sounds.into_inner().events,
        vec![
            SoundEvent::Add,
            SoundEvent::Add,
            SoundEvent::Add,
            SoundEvent::Add,
            SoundEvent::Move,
            SoundEvent::Jump,
            SoundEvent::Move,
            SoundEvent::Win,
        ]
    );
}

#[test]
fn winning_unlocks_the_next_level() {
    let mut catalog = LevelCatalog::new();
    let mut progress = Progress::new();

    for id in 1..=3u32 {
        assert!(progress.is_unlocked(u64::from(id)));
        let level = catalog.level(id, Language::Km).clone();
        let solution = solver::shortest_solution(&level).unwrap();
        let report = simulator::run(&level, &solution);
        let stars = report.stars.unwrap();
        assert!(progress.record(level.id, stars));
    }
    assert!(progress.is_unlocked(4));
    assert!(!progress.is_unlocked(5));
    assert_eq!(progress.next_playable(100), 4);
    assert_eq!(LevelCatalog::next_level_id(3), Some(4));
}

#[test]
fn hints_walk_a_player_to_the_goal() {
    let mut catalog = LevelCatalog::new();
    let level = catalog.level(27, Language::En).clone();
    let mut program = Program::new(40);

    for _ in 0..40 {
        let report = simulator::run(&level, &program.commands());
        if report.outcome.is_success() {
            break;
        }
        let hint = hint_or_fallback(&SolverHints, &level, &program.commands(), Language::En);
        let next = simulator::CommandType::ALL
            .into_iter()
            .find(|command| {
                hint == format!(
                    "Try {} next.",
                    robo_puzzle_core::text::command_label(*command, Language::En)
                )
            })
            .unwrap_or_else(|| panic!("unexpected hint {hint:?}"));
        program.add(next).unwrap();
    }
    assert!(simulator::run(&level, &program.commands()).outcome.is_success());
}

#[test]
fn bundled_map_is_playable() {
    let map = include_str!("../../maps/custom01.txt");
    let level = robo_puzzle_core::level::parse_level(1_700_000_000_000, map, Language::En).unwrap();
    assert_eq!(level.grid_size, 6);
    let solution = solver::shortest_solution(&level).unwrap();
    assert!(simulator::run(&level, &solution).outcome.is_success());

    let mut progress = Progress::new();
    progress.add_custom_level(level).unwrap();
    assert_eq!(progress.custom_levels().len(), 1);

    // loading the same map again finds the saved copy
    let again = robo_puzzle_core::level::parse_level(1_700_000_000_999, map, Language::Km).unwrap();
    assert_eq!(progress.find_custom_level(&again).map(|l| l.id), Some(1_700_000_000_000));
}

#[test]
fn new_custom_level_survives_a_save() {
    let service = GeneratedLevels::new(2024);
    let mut progress = Progress::new();
    let level = level_or_fallback(&service, Difficulty::Medium, Language::En, 1_800_000_000_000, &mut progress)
        .unwrap();
    assert!(progress.is_unlocked(level.id));

    let solution = solver::shortest_solution(&level).unwrap();
    let report = simulator::run(&level, &solution);
    assert!(report.outcome.is_success());
    progress.record(level.id, report.stars.unwrap());

    let reloaded = Progress::from_json(&progress.to_json().unwrap()).unwrap();
    assert_eq!(reloaded, progress);
    assert!(reloaded.stars(level.id) >= 1);
}
