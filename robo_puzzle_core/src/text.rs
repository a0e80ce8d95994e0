//! Localized display text.
//!
//! Every lookup is an exhaustive `match`, so adding an obstacle, theme or
//! command without translating it fails to compile.

use crate::{Language, ObstacleType, simulator::CommandType, simulator::RunOutcome, theme::Theme};

pub fn obstacle_name(kind: ObstacleType, language: Language) -> &'static str {
    match (kind, language) {
        (ObstacleType::Rock, Language::En) => "Rock",
        (ObstacleType::Rock, Language::Km) => "ថ្ម",
        (ObstacleType::Water, Language::En) => "Water",
        (ObstacleType::Water, Language::Km) => "ទឹក",
        (ObstacleType::Mud, Language::En) => "Mud",
        (ObstacleType::Mud, Language::Km) => "ភក់",
        (ObstacleType::Wall, Language::En) => "Wall",
        (ObstacleType::Wall, Language::Km) => "ជញ្ជាំង",
        (ObstacleType::Fire, Language::En) => "Fire",
        (ObstacleType::Fire, Language::Km) => "ភ្លើង",
        (ObstacleType::Forest, Language::En) => "Forest",
        (ObstacleType::Forest, Language::Km) => "ព្រៃ",
    }
}

/// Flavour line shown under a generated level's name.
pub fn theme_description(theme: Theme, language: Language) -> &'static str {
    match (theme, language) {
        (Theme::Forest, Language::En) => "Walk through the forest",
        (Theme::Forest, Language::Km) => "ដើរឆ្លងកាត់ព្រៃ",
        (Theme::Water, Language::En) => "Jump over water",
        (Theme::Water, Language::Km) => "លោតរំលងទឹក",
        (Theme::Dungeon, Language::En) => "Dungeon maze",
        (Theme::Dungeon, Language::Km) => "ប្រយ័ត្នជញ្ជាំងនិងភក់",
        (Theme::Fire, Language::En) => "Volcano danger!",
        (Theme::Fire, Language::Km) => "គ្រោះថ្នាក់! ភ្នំភ្លើង",
        (Theme::Mix, Language::En) => "Final Challenge",
        (Theme::Mix, Language::Km) => "ការប្រកួតចុងក្រោយ",
    }
}

/// Heading for a band of levels on the level-select screen.
pub fn theme_group_name(theme: Theme, language: Language) -> &'static str {
    match (theme, language) {
        (Theme::Forest, Language::En) => "Forest Pattern",
        (Theme::Forest, Language::Km) => "ព្រៃឈើ (Forest)",
        (Theme::Water, Language::En) => "Water Crossing",
        (Theme::Water, Language::Km) => "ទឹក (Water)",
        (Theme::Dungeon, Language::En) => "Dungeon Maze",
        (Theme::Dungeon, Language::Km) => "គុកងងឹត (Dungeon)",
        (Theme::Fire, Language::En) => "Volcano Dash",
        (Theme::Fire, Language::Km) => "ភ្នំភ្លើង (Volcano)",
        (Theme::Mix, Language::En) => "Master Challenge",
        (Theme::Mix, Language::Km) => "ចម្រុះ (Mix)",
    }
}

pub fn level_name(index: u32, language: Language) -> String {
    match language {
        Language::En => format!("LEVEL {index}"),
        Language::Km => format!("កម្រិត {index}"),
    }
}

pub fn custom_level_name(language: Language) -> &'static str {
    match language {
        Language::En => "CUSTOM",
        Language::Km => "វិញ្ញាសាពិសេស",
    }
}

pub fn tutorial_name(language: Language) -> &'static str {
    match language {
        Language::En => "Training (Tutorial)",
        Language::Km => "ការហ្វឹកហាត់ (Tutorial)",
    }
}

pub fn tutorial_welcome(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Hi! I'm Robo. Help me reach the flag by adding commands! \
             Walk moves 1 cell. Jump moves 2 cells over obstacles."
        }
        Language::Km => "សួស្តី! ខ្ញុំឈ្មោះ រ៉ូបូ។ តោះរៀនលេងទាំងអស់គ្នា!",
    }
}

/// Scripted tutorial lines, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialLine {
    WalkRight,
    JumpRight,
    WalkUp,
    WalkUpAgain,
    PressRun,
    Completed,
}

pub fn tutorial_line(line: TutorialLine, language: Language) -> &'static str {
    match (line, language) {
        (TutorialLine::WalkRight, Language::En) => {
            "Press Walk Right. This moves me 1 cell to the right."
        }
        (TutorialLine::WalkRight, Language::Km) => "ចុច 'ដើរទៅស្តាំ' ដើម្បីទៅជិតថ្ម។",
        (TutorialLine::JumpRight, Language::En) => {
            "A rock is blocking the way! Press Jump Right. This jumps over 2 cells."
        }
        (TutorialLine::JumpRight, Language::Km) => "មានថ្ម! ចុច 'លោតទៅស្តាំ' ដើម្បីរំលងវា។",
        (TutorialLine::WalkUp, Language::En) => "Great jump! Now press Walk Up toward the flag.",
        (TutorialLine::WalkUp, Language::Km) => "ឆ្លងផុតហើយ! ចុច 'ដើរទៅលើ' ដើម្បីទៅរកទង់ជាតិ។",
        (TutorialLine::WalkUpAgain, Language::En) => {
            "Almost there! Press Walk Up one more time to reach the flag."
        }
        (TutorialLine::WalkUpAgain, Language::Km) => "ជិតដល់ហើយ! ចុច 'ដើរទៅលើ' ម្តងទៀត។",
        (TutorialLine::PressRun, Language::En) => {
            "Your program is ready! Press Run to watch me follow your commands!"
        }
        (TutorialLine::PressRun, Language::Km) => "រួចរាល់! ចុច 'ដំណើរការ' ដើម្បីមើលខ្ញុំដើរ។",
        (TutorialLine::Completed, Language::En) => {
            "Amazing! You just programmed a robot! Now try the real levels!"
        }
        (TutorialLine::Completed, Language::Km) => "អស្ចារ្យ! អ្នកពូកែណាស់។",
    }
}

pub fn command_label(command: CommandType, language: Language) -> &'static str {
    match (command, language) {
        (CommandType::Up, Language::En) => "Walk Up",
        (CommandType::Up, Language::Km) => "ដើរទៅលើ",
        (CommandType::Down, Language::En) => "Walk Down",
        (CommandType::Down, Language::Km) => "ដើរទៅក្រោម",
        (CommandType::Left, Language::En) => "Walk Left",
        (CommandType::Left, Language::Km) => "ដើរទៅឆ្វេង",
        (CommandType::Right, Language::En) => "Walk Right",
        (CommandType::Right, Language::Km) => "ដើរទៅស្តាំ",
        (CommandType::JumpUp, Language::En) => "Jump Up",
        (CommandType::JumpUp, Language::Km) => "លោតទៅលើ",
        (CommandType::JumpDown, Language::En) => "Jump Down",
        (CommandType::JumpDown, Language::Km) => "លោតទៅក្រោម",
        (CommandType::JumpLeft, Language::En) => "Jump Left",
        (CommandType::JumpLeft, Language::Km) => "លោតទៅឆ្វេង",
        (CommandType::JumpRight, Language::En) => "Jump Right",
        (CommandType::JumpRight, Language::Km) => "លោតទៅស្តាំ",
    }
}

/// Headline for the result of a run.
pub fn outcome_title(outcome: &RunOutcome, language: Language) -> String {
    match (outcome, language) {
        (RunOutcome::Goal { .. }, Language::En) => "Success!".to_string(),
        (RunOutcome::Goal { .. }, Language::Km) => "ជោគជ័យ!".to_string(),
        (RunOutcome::Crashed { obstacle, .. }, Language::En) => {
            format!("Oh no! Crashed into {}!", obstacle_name(*obstacle, language))
        }
        (RunOutcome::Crashed { obstacle, .. }, Language::Km) => {
            format!("អូ! បុក{}ហើយ!", obstacle_name(*obstacle, language))
        }
        (RunOutcome::OutOfBounds { .. }, Language::En) => "Out of bounds!".to_string(),
        (RunOutcome::OutOfBounds { .. }, Language::Km) => "ចេញក្រៅផ្លូវហើយ!".to_string(),
        (RunOutcome::Incomplete { .. }, Language::En) => "Not at goal yet!".to_string(),
        (RunOutcome::Incomplete { .. }, Language::Km) => "មិនទាន់ដល់គោលដៅទេ!".to_string(),
    }
}

/// Encouraging follow-up line for the result of a run.
pub fn outcome_hint(outcome: &RunOutcome, language: Language) -> &'static str {
    match (outcome, language) {
        (RunOutcome::Goal { .. }, Language::En) => "You completed this level successfully!",
        (RunOutcome::Goal { .. }, Language::Km) => "អ្នកបានបញ្ចប់កម្រិតនេះដោយជោគជ័យ!",
        (RunOutcome::Crashed { .. }, Language::En) => {
            "Try adding a jump command to leap over obstacles!"
        }
        (RunOutcome::Crashed { .. }, Language::Km) => "សាកល្បងបន្ថែមបញ្ជាលោត ដើម្បីរំលងឧបសគ្គ!",
        (RunOutcome::OutOfBounds { .. }, Language::En) => {
            "Check your path - the robot needs to stay on the grid!"
        }
        (RunOutcome::OutOfBounds { .. }, Language::Km) => "ពិនិត្យមើលផ្លូវរបស់អ្នក មនុស្សយន្តត្រូវដើរក្នុងតារាង!",
        (RunOutcome::Incomplete { .. }, Language::En) => {
            "Almost there! Add more commands to reach the goal!"
        }
        (RunOutcome::Incomplete { .. }, Language::Km) => "ជិតដល់ហើយ! បន្ថែមបញ្ជាទៀតដើម្បីទៅដល់គោលដៅ!",
    }
}

/// Suggests the next command to try.
pub fn hint_try(command: CommandType, language: Language) -> String {
    match language {
        Language::En => format!("Try {} next.", command_label(command, language)),
        Language::Km => format!("សាកល្បង '{}'។", command_label(command, language)),
    }
}

/// Shown when a hint cannot be produced.
pub fn hint_unavailable(language: Language) -> &'static str {
    match language {
        Language::En => "No hint available right now, please try again.",
        Language::Km => "មិនអាចទទួលបានជំនួយទេ សូមព្យាយាមម្តងទៀត។",
    }
}

/// Shown when the program already solves the level.
pub fn hint_already_solved(language: Language) -> &'static str {
    match language {
        Language::En => "Your program already reaches the goal. Press Run!",
        Language::Km => "កម្មវិធីរបស់អ្នកទៅដល់គោលដៅហើយ។ ចុច 'ដំណើរការ'!",
    }
}

/// Reminds the player to remove commands after a failing point.
pub fn hint_remove_from(position: usize, language: Language) -> String {
    match language {
        Language::En => format!("Command {position} goes wrong. Remove it and try again."),
        Language::Km => format!("បញ្ជាទី {position} មានបញ្ហា។ សូមលុបវាហើយព្យាយាមម្តងទៀត។"),
    }
}

/// Refusal when the next level still needs a star on this one.
pub fn level_locked(language: Language) -> &'static str {
    match language {
        Language::En => "Finish this level to unlock the next one.",
        Language::Km => "សូមបញ្ចប់កម្រិតនេះដើម្បីបើកកម្រិតបន្ទាប់។",
    }
}

pub fn last_level(language: Language) -> &'static str {
    match language {
        Language::En => "This is the last level.",
        Language::Km => "នេះជាកម្រិតចុងក្រោយហើយ។",
    }
}

/// Status line when the progress file could not be written.
pub fn progress_not_saved(reason: &str, language: Language) -> String {
    match language {
        Language::En => format!("Progress not saved: {reason}"),
        Language::Km => format!("មិនអាចរក្សាទុកវឌ្ឍនភាពបានទេ: {reason}"),
    }
}

/// Shown when a new level could not be generated.
pub fn level_generation_failed(language: Language) -> &'static str {
    match language {
        Language::En => "Sorry, could not generate a level right now. Please try again.",
        Language::Km => "សូមអភ័យទោស មិនអាចបង្កើតវិញ្ញាសាថ្មីបានទេ។ សូមព្យាយាមម្តងទៀត។",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn crash_title_names_the_obstacle() {
        let outcome = RunOutcome::Crashed {
            at: Position::new(1, 0),
            obstacle: ObstacleType::Fire,
        };
        assert_eq!(outcome_title(&outcome, Language::En), "Oh no! Crashed into Fire!");
        assert!(outcome_title(&outcome, Language::Km).contains("ភ្លើង"));
    }

    #[test]
    fn level_names() {
        assert_eq!(level_name(7, Language::En), "LEVEL 7");
        assert_eq!(level_name(7, Language::Km), "កម្រិត 7");
    }

    #[test]
    fn every_command_has_both_labels() {
        for command in CommandType::ALL {
            assert!(!command_label(command, Language::En).is_empty());
            assert!(!command_label(command, Language::Km).is_empty());
        }
    }

    #[test]
    fn status_lines_are_translated() {
        assert_eq!(level_locked(Language::En), "Finish this level to unlock the next one.");
        assert_eq!(last_level(Language::En), "This is the last level.");
        assert_ne!(level_locked(Language::Km), level_locked(Language::En));
        assert_ne!(last_level(Language::Km), last_level(Language::En));
        assert_eq!(
            progress_not_saved("disk full", Language::En),
            "Progress not saved: disk full"
        );
        assert!(progress_not_saved("disk full", Language::Km).ends_with("disk full"));
        assert!(!progress_not_saved("disk full", Language::Km).starts_with("Progress"));
    }
}
