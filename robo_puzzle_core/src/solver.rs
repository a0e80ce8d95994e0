use std::collections::VecDeque;

use crate::{Position, level::LevelConfig, level::Obstacle, map::Grid, simulator::CommandType};

/// Marks every in-bounds obstacle cell.
fn blocked_cells(grid_size: usize, obstacles: &[Obstacle]) -> Grid<bool> {
    let mut blocked = Grid::new(grid_size);
    for obstacle in obstacles {
        if let Some(cell) = blocked.get_mut(obstacle.position) {
            *cell = true;
        }
    }
    blocked
}

/// Gets the legal moves from a position: the four walks and the four jumps,
/// each landing in bounds on a free cell. A jump's middle cell is ignored.
fn moves_from(
    position: Position,
    blocked: &Grid<bool>,
) -> impl Iterator<Item = (CommandType, Position)> + '_ {
    CommandType::ALL.into_iter().filter_map(move |command| {
        let (dx, dy) = command.delta();
        let next = position.offset(dx, dy)?;
        match blocked.get(next) {
            Some(false) => Some((command, next)),
            _ => None,
        }
    })
}

/// Breadth-first search from `from`, returning for each reached cell the
/// cell it was reached from and the move used. `None` if `goal` is never
/// reached.
fn search(
    from: Position,
    goal: Position,
    blocked: &Grid<bool>,
) -> Option<Grid<Option<(Position, CommandType)>>> {
    let mut came_from: Grid<Option<(Position, CommandType)>> = Grid::new(blocked.size());
    let mut visited: Grid<bool> = Grid::new(blocked.size());
    let mut frontier = VecDeque::new();

    if !blocked.contains(from) {
        return None;
    }
    visited[from] = true;
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            return Some(came_from);
        }
        for (command, next) in moves_from(current, blocked) {
            if visited[next] {
                continue;
            }
            visited[next] = true;
            came_from[next] = Some((current, command));
            frontier.push_back(next);
        }
    }
    None
}

/// Whether `goal` can be reached from `start` with walks and jumps around
/// `obstacles`.
pub fn is_solvable(
    grid_size: usize,
    start: Position,
    goal: Position,
    obstacles: &[Obstacle],
) -> bool {
    search(start, goal, &blocked_cells(grid_size, obstacles)).is_some()
}

pub fn is_level_solvable(level: &LevelConfig) -> bool {
    is_solvable(level.grid_size, level.start, level.goal, &level.obstacles)
}

/// A program with the fewest possible commands from `from` to the goal of
/// `level`.
pub fn shortest_solution_from(level: &LevelConfig, from: Position) -> Option<Vec<CommandType>> {
    let blocked = blocked_cells(level.grid_size, &level.obstacles);
    let came_from = search(from, level.goal, &blocked)?;

    // Reconstruct path
    let mut commands = Vec::new();
    let mut current = level.goal;
    while current != from {
        let (previous, command) = came_from[current]?;
        commands.push(command);
        current = previous;
    }
    commands.reverse();
    Some(commands)
}

/// A program with the fewest possible commands that solves `level`.
pub fn shortest_solution(level: &LevelConfig) -> Option<Vec<CommandType>> {
    shortest_solution_from(level, level.start)
}

/// Smallest manhattan distance from `position` to any cell of `path`.
fn distance_to_path(position: Position, path: &[Position]) -> usize {
    path.iter()
        .map(|cell| cell.manhattan(&position))
        .min()
        .unwrap_or(usize::MAX)
}

/// Makes a level solvable by dropping obstacles.
///
/// Returns `obstacles` unchanged when the goal is already reachable.
/// Otherwise obstacles are ranked by their distance to `path` (stable, so
/// equal distances keep their placement order) and removed nearest first
/// until the goal is reachable. Worst case the result is empty.
pub fn repair(
    grid_size: usize,
    start: Position,
    goal: Position,
    obstacles: &[Obstacle],
    path: &[Position],
) -> Vec<Obstacle> {
    if is_solvable(grid_size, start, goal, obstacles) {
        return obstacles.to_vec();
    }

    let mut ranked = obstacles.to_vec();
    ranked.sort_by_key(|obstacle| distance_to_path(obstacle.position, path));

    let mut removed = 0;
    while removed < ranked.len() && !is_solvable(grid_size, start, goal, &ranked[removed..]) {
        removed += 1;
    }
    ranked.split_off(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObstacleType, simulator};
    use CommandType::*;

    fn rock(x: usize, y: usize) -> Obstacle {
        Obstacle::new(Position::new(x, y), ObstacleType::Rock, "Rock")
    }

    #[test]
    fn jumps_over_a_single_wall() {
        // a full column of rocks can be jumped across
        let obstacles: Vec<_> = (0..5).map(|y| rock(2, y)).collect();
        assert!(is_solvable(5, Position::new(0, 0), Position::new(4, 0), &obstacles));
    }

    #[test]
    fn double_wall_is_unsolvable() {
        let obstacles: Vec<_> = (0..5).flat_map(|y| [rock(2, y), rock(3, y)]).collect();
        assert!(!is_solvable(5, Position::new(0, 0), Position::new(4, 0), &obstacles));
    }

    #[test]
    fn shortest_solution_prefers_jumps() {
        let level = LevelConfig::ad_hoc(7, 5, Position::new(0, 0), Position::new(4, 0), vec![]);
        assert_eq!(shortest_solution(&level), Some(vec![JumpRight, JumpRight]));
    }

    #[test]
    fn shortest_solution_replays_to_the_goal() {
        let level = LevelConfig::ad_hoc(
            7,
            5,
            Position::new(0, 2),
            Position::new(4, 2),
            vec![rock(2, 2), rock(4, 1), rock(3, 3)],
        );
        let program = shortest_solution(&level).unwrap();
        let steps = simulator::simulate(&level, program.iter().copied());
        assert_eq!(steps.last().unwrap().status, simulator::StepStatus::Goal);
    }

    #[test]
    fn no_solution_through_a_double_wall() {
        let obstacles: Vec<_> = (0..4).flat_map(|y| [rock(1, y), rock(2, y)]).collect();
        let level = LevelConfig::ad_hoc(7, 4, Position::new(0, 0), Position::new(3, 3), obstacles);
        assert_eq!(shortest_solution(&level), None);
    }

    #[test]
    fn repair_keeps_solvable_sets() {
        let obstacles = vec![rock(1, 1), rock(3, 3)];
        let repaired = repair(5, Position::new(0, 0), Position::new(4, 4), &obstacles, &[]);
        assert_eq!(repaired, obstacles);
    }

    #[test]
    fn repair_removes_nearest_obstacles_first() {
        let start = Position::new(0, 0);
        let goal = Position::new(4, 0);
        let path: Vec<_> = (0..5).map(|x| Position::new(x, 0)).collect();
        // two full columns plus a far decoration that must survive
        let mut obstacles: Vec<_> = (0..4).flat_map(|y| [rock(2, y + 1), rock(3, y + 1)]).collect();
        obstacles.push(rock(2, 0));
        obstacles.push(rock(3, 0));
        let repaired = repair(5, start, goal, &obstacles, &path);

        assert!(is_solvable(5, start, goal, &repaired));
        assert!(repaired.len() < obstacles.len());
        // the on-path cells go first
        assert!(!repaired.iter().any(|o| o.position == Position::new(2, 0)));
        assert!(repaired.iter().any(|o| o.position == Position::new(3, 4)));
    }
}
