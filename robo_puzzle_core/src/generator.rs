//! Deterministic procedural levels.
//!
//! Every generated level is a pure function of its index: the RNG is seeded
//! from the index alone, so geometry is identical across languages and
//! reloads. The language only selects display text.
//!
//! Generation runs in a fixed order, and the order of RNG draws is part of
//! the layout contract:
//!
//! 1. grid size and difficulty from the index,
//! 2. start and goal cells,
//! 3. a carved solution path,
//! 4. themed filler obstacles off the path,
//! 5. obstacles on straight path segments that force a jump,
//! 6. a solvability repair pass.

use crate::{
    Direction, Language, Position,
    level::{LevelConfig, MAX_GRID_SIZE, MIN_GRID_SIZE, Obstacle},
    map::Grid,
    rng::Lcg,
    solver, text,
    theme::Theme,
};

/// Number of generated levels.
pub const LEVEL_COUNT: u32 = 100;

/// Upper bound on carving steps.
const CARVE_ITERATIONS: usize = 500;
const PERIMETER_ATTEMPTS: usize = 10;
const SCATTER_ATTEMPTS: usize = 20;
/// Levels up to this index keep the left-to-right introductory layout.
const INTRO_LEVELS: u32 = 5;
/// Levels above this index get forced jumps.
const JUMP_LEVELS_AFTER: u32 = 10;

/// Grid edge length for a level: 5 for 1..=15, growing by one every 15
/// levels, capped at 8.
pub fn grid_size_for(index: u32) -> usize {
    let band = (index.saturating_sub(1) / 15) as usize;
    (MIN_GRID_SIZE + band).min(MAX_GRID_SIZE)
}

/// Normalized 0..=1 difficulty.
pub fn difficulty_for(index: u32) -> f64 {
    (f64::from(index) / f64::from(LEVEL_COUNT)).min(1.0)
}

/// One point on the grid's outer ring.
fn perimeter_point(size: usize, rng: &mut Lcg) -> Position {
    let last = size - 1;
    if rng.coin() {
        let x = if rng.coin() { 0 } else { last };
        let y = rng.range(0, last);
        Position { x, y }
    } else {
        let x = rng.range(0, last);
        let y = if rng.coin() { 0 } else { last };
        Position { x, y }
    }
}

fn random_cell(size: usize, rng: &mut Lcg) -> Position {
    let x = rng.range(0, size - 1);
    let y = rng.range(0, size - 1);
    Position { x, y }
}

/// Chooses start and goal. Introductory levels run left edge to right edge;
/// later levels rotate through five layouts keyed by `index % 5`.
fn place_endpoints(index: u32, size: usize, rng: &mut Lcg) -> (Position, Position) {
    let last = size - 1;

    if index <= INTRO_LEVELS {
        let start = Position::new(0, rng.range(0, last));
        let goal = Position::new(last, rng.range(0, last));
        return (start, goal);
    }

    let (start, mut goal) = match index % 5 {
        // opposite corners
        0 => {
            let corners = [
                Position::new(0, 0),
                Position::new(last, 0),
                Position::new(0, last),
                Position::new(last, last),
            ];
            let pick = rng.range(0, 3);
            (corners[pick], corners[3 - pick])
        }
        // top edge to bottom edge, either way round
        1 => {
            let top_to_bottom = rng.coin();
            let (from_y, to_y) = if top_to_bottom { (0, last) } else { (last, 0) };
            let start = Position::new(rng.range(0, last), from_y);
            let goal = Position::new(rng.range(0, last), to_y);
            (start, goal)
        }
        // left edge to right edge, either way round
        2 => {
            let left_to_right = rng.coin();
            let (from_x, to_x) = if left_to_right { (0, last) } else { (last, 0) };
            let start = Position::new(from_x, rng.range(0, last));
            let goal = Position::new(to_x, rng.range(0, last));
            (start, goal)
        }
        // two perimeter points at least half the grid apart
        3 => {
            let start = perimeter_point(size, rng);
            let mut goal = perimeter_point(size, rng);
            let mut attempts = 1;
            while (start.manhattan(&goal) as f64) < size as f64 / 2.0
                && attempts < PERIMETER_ATTEMPTS
            {
                goal = perimeter_point(size, rng);
                attempts += 1;
            }
            (start, goal)
        }
        // two free points almost a grid width apart
        _ => {
            let mut start = random_cell(size, rng);
            let mut goal = random_cell(size, rng);
            let mut attempts = 1;
            while start.manhattan(&goal) < size - 1 && attempts < SCATTER_ATTEMPTS {
                start = random_cell(size, rng);
                goal = random_cell(size, rng);
                attempts += 1;
            }
            (start, goal)
        }
    };

    // Retries can run out on a coincident pair; send the goal to the far corner.
    if goal == start {
        goal = Position::new(
            if start.x < size / 2 { last } else { 0 },
            if start.y < size / 2 { last } else { 0 },
        );
    }
    (start, goal)
}

/// Axis-aligned route: all of x first, then all of y.
fn l_path(start: Position, goal: Position) -> Vec<Position> {
    let mut path = vec![start];
    let mut current = start;
    while current.x != goal.x {
        current.x = if current.x < goal.x { current.x + 1 } else { current.x - 1 };
        path.push(current);
    }
    while current.y != goal.y {
        current.y = if current.y < goal.y { current.y + 1 } else { current.y - 1 };
        path.push(current);
    }
    path
}

/// Carves a non-repeating chain of orthogonally adjacent cells from `start`
/// to `goal`.
///
/// The walk is greedy with jitter. Until the path reaches its target length
/// it favours cells farther from the goal so the route winds; after that it
/// heads for the goal. A dead end, or running out of iterations, falls back to
/// [`l_path`].
pub fn carve_path(
    start: Position,
    goal: Position,
    size: usize,
    difficulty: f64,
    rng: &mut Lcg,
) -> Vec<Position> {
    let target_length = (start.manhattan(&goal) as f64 * (1.0 + difficulty * 0.8)).floor() as usize;

    let mut visited: Grid<bool> = Grid::new(size);
    let mut path = vec![start];
    visited[start] = true;
    let mut current = start;

    let mut iterations = 0;
    while current != goal && iterations < CARVE_ITERATIONS {
        iterations += 1;

        let candidates = [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter_map(|(dx, dy)| current.offset(dx, dy))
            .filter(|next| next.within(size) && !visited[*next]);

        let winding = path.len() < target_length;
        let mut best: Option<(f64, Position)> = None;
        for candidate in candidates {
            let distance = candidate.manhattan(&goal) as f64;
            let score = if winding {
                distance * -0.5 + (rng.next() - 0.5) * 2.0
            } else {
                distance + (rng.next() - 0.5) * 0.5
            };
            if best.is_none_or(|(lowest, _)| score < lowest) {
                best = Some((score, candidate));
            }
        }

        let Some((_, next)) = best else {
            break;
        };
        visited[next] = true;
        path.push(next);
        current = next;
    }

    if current != goal {
        log::trace!("carving from {start:?} to {goal:?} hit a dead end, using an L path");
        return l_path(start, goal);
    }
    path
}

/// Whether `middle` sits exactly between `before` and `after` on a straight
/// two-cell line.
fn is_straight_pair(before: Position, after: Position) -> bool {
    (before.x == after.x && before.y.abs_diff(after.y) == 2)
        || (before.y == after.y && before.x.abs_diff(after.x) == 2)
}

/// Accumulates obstacles while keeping the endpoints free and cells unique.
struct ObstacleLayer<'a> {
    theme: Theme,
    language: Language,
    start: Position,
    goal: Position,
    occupied: Grid<bool>,
    obstacles: Vec<Obstacle>,
    rng: &'a mut Lcg,
}

impl ObstacleLayer<'_> {
    /// Places a themed obstacle. Rejected cells consume no RNG draws.
    fn place(&mut self, position: Position, jumpable: bool) {
        if position == self.start || position == self.goal || self.occupied[position] {
            return;
        }
        let mut kind = self.theme.pick_obstacle(self.rng);
        if jumpable {
            kind = self.theme.jump_obstacle(kind);
        }
        self.occupied[position] = true;
        self.obstacles
            .push(Obstacle::localized(position, kind, self.language));
    }
}

/// Generates level `index` (1..=100) with text in `language`.
///
/// Indices outside that range are clamped. The result always satisfies the
/// level invariants and can always be solved with walks and jumps.
pub fn generate_level(index: u32, language: Language) -> LevelConfig {
    let clamped = index.clamp(1, LEVEL_COUNT);
    if clamped != index {
        log::warn!("level index {index} outside 1..={LEVEL_COUNT}, using {clamped}");
    }
    let index = clamped;

    let mut rng = Lcg::for_level(index);
    let size = grid_size_for(index);
    let difficulty = difficulty_for(index);
    let theme = Theme::for_level(index);

    let (start, goal) = place_endpoints(index, size, &mut rng);
    let start_direction = Direction::toward(start, goal);

    let path = carve_path(start, goal, size, difficulty, &mut rng);
    let on_path = Grid::from_generator(size, |cell| path.contains(&cell));

    let mut layer = ObstacleLayer {
        theme,
        language,
        start,
        goal,
        occupied: Grid::new(size),
        obstacles: Vec::new(),
        rng: &mut rng,
    };

    // Fill corridors
    let density = 0.2 + difficulty * 0.6;
    for y in 0..size {
        for x in 0..size {
            let cell = Position { x, y };
            if !on_path[cell] && layer.rng.bool(density) {
                layer.place(cell, false);
            }
        }
    }

    // Add jumps
    if index > JUMP_LEVELS_AFTER {
        let jump_chance = 0.3 + difficulty * 0.3;
        for window in path.windows(3) {
            if is_straight_pair(window[0], window[2]) && layer.rng.bool(jump_chance) {
                layer.place(window[1], true);
            }
        }
    }

    let placed = layer.obstacles;
    let obstacles = solver::repair(size, start, goal, &placed, &path);
    if obstacles.len() < placed.len() {
        log::debug!(
            "level {index}: repair removed {} of {} obstacles",
            placed.len() - obstacles.len(),
            placed.len()
        );
    }
    if obstacles.is_empty() && !placed.is_empty() {
        log::warn!("level {index}: repair removed every obstacle");
    }
    log::debug!(
        "level {index}: {size}x{size} {theme:?}, start {start:?} goal {goal:?}, path {} cells, {} obstacles",
        path.len(),
        obstacles.len()
    );

    LevelConfig {
        id: u64::from(index),
        name: text::level_name(index, language),
        description: text::theme_description(theme, language).to_string(),
        grid_size: size,
        start,
        start_direction,
        goal,
        obstacles,
        tutorial_steps: None,
    }
}
