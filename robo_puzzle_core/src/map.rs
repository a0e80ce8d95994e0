use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::Position;

/// A square 2D grid stored row-major in a flat vector.
///
/// Levels are always square, so a single `size` describes both axes. Cells
/// are addressed with [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a new `size` x `size` grid filled with default values.
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn new(size: usize) -> Self
    where
        T: Default + Clone,
    {
        let len = size.checked_mul(size).expect("Grid size overflow");
        Grid {
            size,
            cells: vec![T::default(); len],
        }
    }

    /// Creates a new grid filled by a generator function called once per cell
    /// in row-major order.
    pub fn from_generator<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        let len = size.checked_mul(size).expect("Grid size overflow");
        let mut cells = Vec::with_capacity(len);
        for y in 0..size {
            for x in 0..size {
                cells.push(f(Position { x, y }));
            }
        }
        Grid { size, cells }
    }

    /// Returns the edge length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index_of(&self, position: Position) -> Option<usize> {
        if position.within(self.size) {
            Some(position.y * self.size + position.x)
        } else {
            None
        }
    }

    /// Checks if the given position is within the grid boundaries.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.within(self.size)
    }

    /// Gets a reference to the cell at `position`, or `None` when out of bounds.
    pub fn get(&self, position: Position) -> Option<&T> {
        self.index_of(position).map(|index| &self.cells[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        let index = self.index_of(position)?;
        self.cells.get_mut(index)
    }

    /// Returns an iterator that yields `(Position, &T)` for each cell.
    pub fn enumerate(&self) -> impl Iterator<Item = (Position, &T)> {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            (
                Position {
                    x: index % size,
                    y: index / size,
                },
                cell,
            )
        })
    }

    /// Iterates over the grid one row at a time, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size.max(1))
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, position: Position) -> &Self::Output {
        match self.index_of(position) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size {}",
                position.x, position.y, self.size
            ),
        }
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        let size = self.size;
        match self.index_of(position) {
            Some(idx) => &mut self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size {}",
                position.x, position.y, size
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read_within_bounds() {
        let mut grid: Grid<bool> = Grid::new(3);
        *grid.get_mut(Position::new(2, 1)).unwrap() = true;
        assert_eq!(grid.get(Position::new(2, 1)), Some(&true));
        assert!(grid[Position::new(2, 1)]);
        assert!(!grid[Position::new(1, 2)]);
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut grid: Grid<u8> = Grid::new(2);
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert_eq!(grid.get_mut(Position::new(0, 5)), None);
        assert!(!grid.contains(Position::new(0, 2)));
    }

    #[test]
    fn enumerate_is_row_major() {
        let grid = Grid::from_generator(2, |p| p.x + 10 * p.y);
        let cells: Vec<_> = grid.enumerate().map(|(p, v)| (p, *v)).collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), 0),
                (Position::new(1, 0), 1),
                (Position::new(0, 1), 10),
                (Position::new(1, 1), 11),
            ]
        );
        assert_eq!(grid.rows().count(), 2);
    }
}
