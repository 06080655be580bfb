use serde::{Deserialize, Serialize};

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Neighbor one step away in `direction` (may lie outside the grid)
    pub fn offset(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Step directions. "Up" decreases y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed order used when listing available directions
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Cumulative visits by accepted walks
    pub weight: u64,
    /// Entered by a step of the walk being built
    pub occupied: bool,
}

/// Square N×N grid of cells.
/// Cells are stored row-major with x outer and y inner, which is also the
/// scan order of the weighted start draw and of the weight file.
#[derive(Clone, Debug)]
pub struct Grid {
    pub size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with zero weights and nothing occupied
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        let n = self.size as i32;
        pos.x >= 0 && pos.x < n && pos.y >= 0 && pos.y < n
    }

    /// Convert (x, y) coordinates to cell index. Caller checks bounds.
    pub fn get_id(&self, pos: Position) -> usize {
        pos.x as usize * self.size + pos.y as usize
    }

    /// Convert cell index to (x, y) coordinates
    pub fn get_coords(&self, id: usize) -> Position {
        Position::new((id / self.size) as i32, (id % self.size) as i32)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if self.in_bounds(pos) {
            Some(&self.cells[self.get_id(pos)])
        } else {
            None
        }
    }

    /// Clear the transient occupancy flag on every cell
    pub fn reset_occupancy(&mut self) {
        for cell in &mut self.cells {
            cell.occupied = false;
        }
    }

    /// Sum of all cell weights, recomputed from scratch
    pub fn total_weight(&self) -> u64 {
        self.cells.iter().map(|c| c.weight).sum()
    }

    /// Directions whose neighbor is inside the grid and not occupied, in
    /// up, down, left, right order. No wraparound.
    pub fn available_directions(&self, pos: Position) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| {
                self.cell(pos.offset(d))
                    .map(|c| !c.occupied)
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell(pos).map(|c| c.occupied).unwrap_or(false)
    }

    /// Set the occupancy flag. Out-of-bounds positions are ignored.
    pub fn mark_occupied(&mut self, pos: Position) {
        if self.in_bounds(pos) {
            let id = self.get_id(pos);
            self.cells[id].occupied = true;
        }
    }

    /// Increment the weight of each listed cell by one
    pub fn add_weight<'a>(&mut self, coords: impl IntoIterator<Item = &'a Position>) {
        for &pos in coords {
            if self.in_bounds(pos) {
                let id = self.get_id(pos);
                self.cells[id].weight += 1;
            }
        }
    }

    /// Overwrite a cell's weight. Used when loading a saved weight grid.
    pub fn set_weight(&mut self, pos: Position, weight: u64) {
        if self.in_bounds(pos) {
            let id = self.get_id(pos);
            self.cells[id].weight = weight;
        }
    }

    pub fn weight(&self, pos: Position) -> u64 {
        self.cell(pos).map(|c| c.weight).unwrap_or(0)
    }

    /// All cells with their positions, x outer, y inner
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(id, cell)| (self.get_coords(id), cell))
    }

    pub fn max_weight(&self) -> u64 {
        self.cells.iter().map(|c| c.weight).max().unwrap_or(0)
    }

    /// Number of cells visited by at least one accepted walk
    pub fn visited_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.weight > 0).count()
    }
}
