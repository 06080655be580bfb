use crate::error::PathError;
use crate::grid::{Direction, Grid, Position};
use crate::rng::Draws;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ordered cells of one walk, start cell first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    pub fn starting_at(start: Position) -> Self {
        Path { cells: vec![start] }
    }

    pub fn from_cells(cells: Vec<Position>) -> Self {
        Path { cells }
    }

    pub fn coords(&self) -> &[Position] {
        &self.cells
    }

    /// Step count, start cell included
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Check that the path could have been produced by a walk on `grid`:
    /// non-empty, inside the grid, single orthogonal steps, no cell twice.
    pub fn check(&self, grid: &Grid) -> Result<(), PathError> {
        if self.cells.is_empty() {
            return Err(PathError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.cells.len());
        for (i, &pos) in self.cells.iter().enumerate() {
            if !grid.in_bounds(pos) {
                return Err(PathError::OutOfBounds(pos));
            }
            if !seen.insert(pos) {
                return Err(PathError::Repeated(pos));
            }
            if i > 0 && self.cells[i - 1].manhattan(&pos) != 1 {
                return Err(PathError::NotAdjacent {
                    from: self.cells[i - 1],
                    to: pos,
                });
            }
        }
        Ok(())
    }

    fn push(&mut self, pos: Position) {
        self.cells.push(pos);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .cells
            .iter()
            .map(|p| format!("({},{})", p.x, p.y))
            .collect();
        write!(f, "{}", parts.join(" -> "))
    }
}

/// Take one step from `current`.
///
/// `directions` must be the non-empty result of
/// [`Grid::available_directions`] for `current`. One of them is drawn
/// uniformly, the neighbor is marked occupied and appended to `path`.
pub fn step<R: Draws + ?Sized>(
    grid: &mut Grid,
    current: Position,
    directions: &[Direction],
    path: &mut Path,
    rng: &mut R,
) -> Position {
    let direction = directions[rng.below(directions.len())];
    let next = current.offset(direction);
    grid.mark_occupied(next);
    path.push(next);
    next
}

/// Walk from `start` until the current cell has no free in-bounds neighbor.
///
/// The start cell's occupancy flag is never set; it is kept out of the
/// candidate directions instead so the path still never revisits it.
/// Occupancy is not reset here.
pub fn walk_from<R: Draws + ?Sized>(grid: &mut Grid, start: Position, rng: &mut R) -> Path {
    let mut path = Path::starting_at(start);
    let mut current = start;
    loop {
        let mut directions = grid.available_directions(current);
        directions.retain(|&d| current.offset(d) != start);
        if directions.is_empty() {
            return path;
        }
        current = step(grid, current, &directions, &mut path, rng);
    }
}
