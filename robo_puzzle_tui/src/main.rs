use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use ratatui::{
    crossterm::{
        self,
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
            KeyEventKind, KeyModifiers,
        },
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
use robo_puzzle_core::{
    Direction, Language, LevelId, ObstacleType, Position,
    catalog::LevelCatalog,
    generator::LEVEL_COUNT,
    hint::{SolverHints, hint_or_fallback},
    level::{LevelConfig, Obstacle, parse_level},
    level_service::{Difficulty, GeneratedLevels, level_or_fallback},
    program::{Program, ProgramError},
    progress::Progress,
    settings::Settings,
    simulator::{self, CommandType, RunOutcome, RunReport, StepStatus},
    solver,
    sound::{MuteGate, SoundEvent, SoundSink},
    text,
    tutorial::{Transition, TutorialEvent, TutorialMachine},
};
use std::{
    fs::File,
    io::{self, Stdout},
    path::{Path, PathBuf},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Level to open, 0 is the tutorial
    #[arg(short, long, value_name = "ID")]
    level: Option<LevelId>,
    /// Custom map file to play instead of a generated level
    #[arg(short, long, value_name = "MAP_FILE")]
    map: Option<PathBuf>,
    /// Display language (en or km)
    #[arg(long, value_parser = parse_language)]
    language: Option<Language>,
    /// Where stars are saved
    #[arg(long, value_name = "PATH", default_value = "progress.json")]
    progress: PathBuf,
    /// Where preferences are saved
    #[arg(long, value_name = "PATH", default_value = "settings.json")]
    settings: PathBuf,
    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Start with sound cues silenced
    #[arg(long)]
    muted: bool,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("unknown language '{code}', use en or km"))
}

/// Sends sound cues to the log; a terminal has no audio.
struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, event: SoundEvent) {
        log::debug!("sound: {}", event.name());
    }
}

/// A run being revealed one step per tick.
struct Playback {
    report: RunReport,
    shown: usize,
}

struct App {
    catalog: LevelCatalog,
    level: LevelConfig,
    program: Program,
    tutorial: Option<TutorialMachine>,
    /// Run currently animating.
    playback: Option<Playback>,
    /// Last finished run, cleared by the next edit.
    finished: Option<RunReport>,
    /// One-off line under the board: hints, solutions, refusals.
    notice: Option<String>,
    progress: Progress,
    progress_path: PathBuf,
    settings: Settings,
    settings_path: PathBuf,
    sounds: MuteGate<LogSink>,
    /// Source of fresh custom levels.
    levels: GeneratedLevels,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl App {
    fn new(
        level: LevelConfig,
        settings: Settings,
        settings_path: PathBuf,
        progress: Progress,
        progress_path: PathBuf,
    ) -> Self {
        let sounds = MuteGate::new(LogSink, settings.muted);
        let mut app = App {
            catalog: LevelCatalog::new(),
            program: Program::new(settings.max_commands()),
            tutorial: None,
            level: level.clone(),
            playback: None,
            finished: None,
            notice: None,
            progress,
            progress_path,
            settings,
            settings_path,
            sounds,
            levels: GeneratedLevels::new(unique_id()),
            should_quit: false,
        };
        app.open(level);
        app
    }

    fn language(&self) -> Language {
        self.settings.language
    }

    fn is_running(&self) -> bool {
        self.playback.is_some()
    }

    fn open(&mut self, level: LevelConfig) {
        log::info!("Opening level {} ({})", level.id, level.name);
        self.tutorial = TutorialMachine::from_level(&level);
        self.level = level;
        self.program = Program::new(self.settings.max_commands());
        self.playback = None;
        self.finished = None;
        self.notice = None;
    }

    fn open_id(&mut self, id: LevelId) {
        let language = self.language();
        let level = self.catalog.get(id, language).cloned();
        match level {
            Some(level) => self.open(level),
            None => log::warn!("No level with id {id}"),
        }
    }

    fn next_level(&mut self) {
        match LevelCatalog::next_level_id(self.level.id) {
            Some(id) if self.progress.is_unlocked(id) => self.open_id(id),
            Some(_) => self.refuse(text::level_locked(self.language())),
            None => self.refuse(text::last_level(self.language())),
        }
    }

    fn random_level(&mut self) {
        let id = rand::rng().random_range(1..=LEVEL_COUNT);
        self.open_id(u64::from(id));
    }

    /// Builds a new custom level and opens it.
    fn new_level(&mut self) {
        let language = self.language();
        let id = fresh_id(&self.progress);
        match level_or_fallback(&self.levels, Difficulty::default(), language, id, &mut self.progress) {
            Ok(level) => {
                self.save_progress();
                self.open(level);
                self.sounds.play(SoundEvent::Click);
            }
            Err(apology) => self.refuse(apology),
        }
    }

    fn refuse(&mut self, notice: &str) {
        self.sounds.play(SoundEvent::Remove);
        self.notice = Some(notice.to_string());
    }

    fn after_edit(&mut self, sound: SoundEvent) {
        self.finished = None;
        self.notice = None;
        self.sounds.play(sound);
    }

    fn add(&mut self, command: CommandType) {
        if let Some(machine) = self.tutorial.as_mut() {
            if !machine.is_completed() {
                if machine.handle(TutorialEvent::BlockAdded(command)) == Transition::Rejected {
                    let hint = machine.message(self.settings.language).to_string();
                    self.refuse(&hint);
                    return;
                }
            }
        }
        match self.program.add(command) {
            Ok(_) => self.after_edit(SoundEvent::Add),
            Err(err @ ProgramError::Full { .. }) => self.refuse(&err.to_string()),
            Err(err) => log::error!("Could not add {command:?}: {err}"),
        }
    }

    /// Removal and history are locked while the tutorial script runs.
    fn edit_locked(&self) -> bool {
        self.tutorial.as_ref().is_some_and(|m| !m.is_completed())
    }

    fn remove_last(&mut self) {
        if self.edit_locked() {
            return;
        }
        if self.program.pop().is_some() {
            self.after_edit(SoundEvent::Remove);
        }
    }

    fn undo(&mut self) {
        if !self.edit_locked() && self.program.undo() {
            self.after_edit(SoundEvent::Undo);
        }
    }

    fn redo(&mut self) {
        if !self.edit_locked() && self.program.redo() {
            self.after_edit(SoundEvent::Undo);
        }
    }

    fn clear(&mut self) {
        if !self.edit_locked() && !self.program.is_empty() {
            self.program.clear();
            self.after_edit(SoundEvent::Clear);
        }
    }

    fn start_run(&mut self) {
        if self.program.is_empty() {
            return;
        }
        let language = self.language();
        if let Some(machine) = self.tutorial.as_mut() {
            if !machine.is_completed()
                && machine.handle(TutorialEvent::RunClicked) == Transition::Rejected
            {
                let hint = machine.message(language).to_string();
                self.refuse(&hint);
                return;
            }
        }
        let report = simulator::run(&self.level, &self.program.commands());
        log::debug!("Run on level {}: {:?}", self.level.id, report.outcome);
        self.sounds.play(SoundEvent::Run);
        self.finished = None;
        self.notice = None;
        self.playback = Some(Playback { report, shown: 0 });
    }

    /// Handles one step of the animation.
    fn tick(&mut self) {
        let Some(playback) = self.playback.as_mut() else {
            return;
        };
        if playback.shown + 1 < playback.report.steps.len() {
            playback.shown += 1;
            if let Some(event) = playback.report.steps[playback.shown].sound() {
                self.sounds.play(event);
            }
            return;
        }
        if let Some(playback) = self.playback.take() {
            self.finish_run(playback.report);
        }
    }

    fn finish_run(&mut self, report: RunReport) {
        // wins and crashes already sounded on their final step
        if let RunOutcome::Incomplete { .. } = report.outcome {
            self.sounds.play(report.outcome.sound());
        }
        if let Some(stars) = report.stars {
            if let Some(machine) = self.tutorial.as_mut() {
                machine.handle(TutorialEvent::Won);
            }
            if self.progress.record(self.level.id, stars) {
                self.save_progress();
            }
        }
        self.finished = Some(report);
    }

    fn show_solution(&mut self) {
        let language = self.language();
        self.notice = Some(match solver::shortest_solution(&self.level) {
            Some(plan) => plan
                .iter()
                .map(|command| text::command_label(*command, language))
                .collect::<Vec<_>>()
                .join(", "),
            None => text::hint_unavailable(language).to_string(),
        });
        self.sounds.play(SoundEvent::Click);
    }

    fn show_hint(&mut self) {
        let language = self.language();
        let hint = hint_or_fallback(&SolverHints, &self.level, &self.program.commands(), language);
        self.notice = Some(hint);
        self.sounds.play(SoundEvent::Click);
    }

    fn toggle_language(&mut self) {
        self.settings.language = self.language().toggled();
        let language = self.language();
        let level = match self.level.id {
            id if id <= u64::from(LEVEL_COUNT) => self.catalog.get(id, language).cloned(),
            _ => None,
        };
        match level {
            Some(level) => {
                // keep the program, only the text changes
                self.tutorial = TutorialMachine::from_level(&level).map(|mut machine| {
                    if let Some(current) = &self.tutorial {
                        replay_tutorial(&mut machine, current, &self.program);
                    }
                    machine
                });
                self.level = level;
            }
            None => {
                self.level.name = text::custom_level_name(language).to_string();
                for obstacle in &mut self.level.obstacles {
                    *obstacle = Obstacle::localized(obstacle.position, obstacle.kind, language);
                }
            }
        }
        self.save_settings();
    }

    fn toggle_mute(&mut self) {
        self.settings.muted = self.sounds.toggle();
        self.save_settings();
    }

    fn save_progress(&mut self) {
        if let Err(err) = self.progress.save(&self.progress_path) {
            log::error!("Could not save progress: {err}");
            self.notice = Some(text::progress_not_saved(&err.to_string(), self.language()));
        }
    }

    fn save_settings(&mut self) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            log::error!("Could not save settings: {err}");
        }
    }

    /// Sets the quit flag.
    fn quit(&mut self) {
        self.should_quit = true;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.quit();
            return;
        }
        // the board is frozen while a run plays out
        if self.is_running() {
            return;
        }
        let arrow = |direction| {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                CommandType::jump(direction)
            } else {
                CommandType::walk(direction)
            }
        };
        match key.code {
            KeyCode::Up => self.add(arrow(Direction::North)),
            KeyCode::Down => self.add(arrow(Direction::South)),
            KeyCode::Left => self.add(arrow(Direction::West)),
            KeyCode::Right => self.add(arrow(Direction::East)),
            KeyCode::Char('w') => self.add(CommandType::jump(Direction::North)),
            KeyCode::Char('s') => self.add(CommandType::jump(Direction::South)),
            KeyCode::Char('a') => self.add(CommandType::jump(Direction::West)),
            KeyCode::Char('d') => self.add(CommandType::jump(Direction::East)),
            KeyCode::Backspace => self.remove_last(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('r') => self.redo(),
            KeyCode::Char('c') => self.clear(),
            KeyCode::Enter => self.start_run(),
            KeyCode::Char('n') => self.next_level(),
            KeyCode::Char('h') => self.show_solution(),
            KeyCode::Char('t') => self.show_hint(),
            KeyCode::Char('x') => self.random_level(),
            KeyCode::Char('g') => self.new_level(),
            KeyCode::Char('l') => self.toggle_language(),
            KeyCode::Char('m') => self.toggle_mute(),
            _ => {}
        }
    }

    /// Where the agent is drawn and how it looks.
    fn agent(&self) -> (Position, Direction, StepStatus) {
        let step = match (&self.playback, &self.finished) {
            (Some(playback), _) => playback.report.steps.get(playback.shown),
            (None, Some(report)) => report.steps.last(),
            (None, None) => None,
        };
        match step {
            Some(step) => (step.position, step.direction, step.status),
            None => (self.level.start, self.level.start_direction, StepStatus::Running),
        }
    }

    /// Index of the block the animation is executing.
    fn active_block(&self) -> Option<usize> {
        let playback = self.playback.as_ref()?;
        playback.report.steps.get(playback.shown)?.command_index
    }
}

/// Feeds the blocks already placed into a fresh tutorial machine, so a
/// language switch keeps the player's place in the script.
fn replay_tutorial(machine: &mut TutorialMachine, current: &TutorialMachine, program: &Program) {
    for command in program.commands() {
        machine.handle(TutorialEvent::BlockAdded(command));
    }
    if current.is_completed() {
        machine.handle(TutorialEvent::RunClicked);
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // raw mode owns the terminal, so logs only go to a file
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Could not create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn unique_id() -> LevelId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as LevelId)
        .unwrap_or(u64::from(LEVEL_COUNT) + 1)
}

/// An id above every built-in and saved level.
fn fresh_id(progress: &Progress) -> LevelId {
    let newest = progress.custom_levels().iter().map(|level| level.id).max();
    unique_id().max(newest.map_or(0, |id| id + 1))
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut settings = Settings::load(&args.settings);
    if let Some(language) = args.language {
        settings.language = language;
    }
    settings.muted |= args.muted;
    let mut progress = Progress::load(&args.progress);

    let level = match (&args.map, args.level) {
        (Some(map_file), _) => {
            let map = std::fs::read_to_string(map_file)
                .with_context(|| format!("Could not read map file {}", map_file.display()))?;
            let mut level = parse_level(fresh_id(&progress), &map, settings.language)
                .with_context(|| format!("Invalid map file {}", map_file.display()))?;
            match progress.find_custom_level(&level) {
                Some(saved) => {
                    log::info!("Map {} is saved as level {}", map_file.display(), saved.id);
                    level.id = saved.id;
                }
                None => {
                    progress.add_custom_level(level.clone())?;
                    if let Err(err) = progress.save(&args.progress) {
                        log::error!("Could not save progress: {err}");
                    }
                }
            }
            level
        }
        (None, Some(id)) => {
            let level = LevelCatalog::new().get(id, settings.language).cloned();
            level.with_context(|| format!("No level with id {id}, choose 0..={LEVEL_COUNT}"))?
        }
        (None, None) if progress.completed() == 0 => {
            robo_puzzle_core::tutorial::tutorial_level(settings.language)
        }
        (None, None) => {
            let id = progress.next_playable(u64::from(LEVEL_COUNT));
            LevelCatalog::new()
                .get(id, settings.language)
                .cloned()
                .context("Next level missing from the catalog")?
        }
    };

    // Set up the terminal
    let mut terminal = setup_terminal()?;

    // Create the application state
    let mut app = App::new(level, settings, args.settings, progress, args.progress);

    // Run the main application loop
    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal state
    restore_terminal(&mut terminal)?;

    result
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?; // Put terminal in raw mode
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into) // Map io::Error to anyhow::Error
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.settings.step_interval();

        // Draw the UI
        terminal.draw(|f| ui(f, app))?;

        // Calculate timeout for event polling
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        // Poll for events (keyboard, mouse, etc.)
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Advance the animation if enough time has passed
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        // Exit loop if requested
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Renders the user interface.
fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::vertical([
        Constraint::Length(3), // Level title
        Constraint::Min(10),   // Board and program
        Constraint::Length(5), // Tutorial, outcome, notices
        Constraint::Length(2), // Help
    ])
    .split(frame.area());

    render_title(frame, main_layout[0], app);

    let board_layout = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_layout[1]);
    render_map(frame, board_layout[0], app);
    render_program(frame, board_layout[1], app);

    render_status(frame, main_layout[2], app);

    let help_text = Paragraph::new(
        "arrows walk | shift+arrows or w/a/s/d jump | Enter run | Backspace remove | u/r undo/redo | c clear\n\
         n next | x random | g new level | h solution | t hint | l language | m mute | q quit",
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help_text, main_layout[3]);
}

fn star_line(stars: u8) -> Span<'static> {
    let filled = usize::from(stars.min(3));
    Span::styled(
        format!("{}{}", "★".repeat(filled), "☆".repeat(3 - filled)),
        Style::default().fg(Color::Yellow),
    )
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let level = &app.level;
    let mut spans = vec![
        Span::styled(level.name.clone(), Style::default().bold()),
        Span::raw("  "),
        Span::raw(level.description.clone()),
    ];
    if level.id != 0 {
        spans.push(Span::raw("  "));
        spans.push(star_line(app.progress.stars(level.id)));
    }
    let title = format!(
        "Robo Puzzle [{}{}] total ★ {}",
        app.language().code(),
        if app.sounds.is_muted() { ", muted" } else { "" },
        app.progress.total_stars()
    );
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn obstacle_span(kind: ObstacleType) -> Span<'static> {
    let (glyph, color) = match kind {
        ObstacleType::Rock => ("R ", Color::Gray),
        ObstacleType::Water => ("~ ", Color::Blue),
        ObstacleType::Mud => ("% ", Color::Rgb(139, 90, 43)),
        ObstacleType::Wall => ("# ", Color::DarkGray),
        ObstacleType::Fire => ("^ ", Color::Red),
        ObstacleType::Forest => ("♣ ", Color::Green),
    };
    Span::styled(glyph, Style::default().fg(color))
}

fn agent_span(direction: Direction, status: StepStatus) -> Span<'static> {
    let glyph = match direction {
        Direction::North => "▲ ",
        Direction::East => "▶ ",
        Direction::South => "▼ ",
        Direction::West => "◀ ",
    };
    let color = match status {
        StepStatus::Running => Color::Cyan,
        StepStatus::Goal => Color::Green,
        StepStatus::Crashed | StepStatus::Bounds => Color::Red,
    };
    Span::styled(glyph, Style::default().fg(color).bold())
}

/// Renders the level grid onto the frame.
fn render_map(frame: &mut Frame, area: Rect, app: &App) {
    let level = &app.level;
    let obstacles = level.obstacle_grid();
    let (agent_position, agent_direction, agent_status) = app.agent();

    let lines: Vec<Line> = obstacles
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    let position = Position { x, y };
                    if position == agent_position {
                        agent_span(agent_direction, agent_status)
                    } else if position == level.goal {
                        Span::styled("⚑ ", Style::default().fg(Color::Green).bold())
                    } else if let Some(kind) = cell {
                        obstacle_span(*kind)
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let map_paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!("{0}x{0}", level.grid_size))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);

    frame.render_widget(map_paragraph, area);
}

/// Renders the command blocks with the executing one highlighted.
fn render_program(frame: &mut Frame, area: Rect, app: &App) {
    let language = app.language();
    let active = app.active_block();
    let items: Vec<ListItem> = app
        .program
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let style = if Some(index) == active {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if block.kind.is_jump() {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(
                format!("{:2}. {}", index + 1, text::command_label(block.kind, language)),
                style,
            ))
        })
        .collect();

    let title = format!("Program ({}/{})", app.program.len(), app.program.limit());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let language = app.language();
    let mut lines: Vec<Line> = Vec::new();

    if let Some(machine) = &app.tutorial {
        let mut spans = vec![Span::styled(
            machine.message(language).to_string(),
            Style::default().fg(Color::Cyan),
        )];
        if let Some(highlight) = machine.current_step().and_then(|s| s.highlight.as_deref()) {
            spans.push(Span::styled(
                format!("  [{highlight}]"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    if let Some(report) = &app.finished {
        let color = match report.outcome {
            RunOutcome::Goal { .. } => Color::Green,
            RunOutcome::Incomplete { .. } => Color::Yellow,
            RunOutcome::Crashed { .. } | RunOutcome::OutOfBounds { .. } => Color::Red,
        };
        let mut spans = vec![Span::styled(
            text::outcome_title(&report.outcome, language),
            Style::default().fg(color).bold(),
        )];
        if let Some(stars) = report.stars {
            spans.push(Span::raw(" "));
            spans.push(star_line(stars));
        }
        lines.push(Line::from(spans));
        lines.push(Line::raw(text::outcome_hint(&report.outcome, language)));
    }

    if let Some(notice) = &app.notice {
        lines.push(Line::styled(notice.clone(), Style::default().italic()));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
