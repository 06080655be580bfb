#![allow(dead_code)]

use std::collections::HashSet;
use walkgrid::{Config, Grid, Path, Position};

/// Config for a small grid with the given thresholds
pub fn small_config(size: usize, min_length: usize, quota: usize) -> Config {
    let mut config = Config::default();
    config.grid.size = size;
    config.walk.min_length = min_length;
    config.walk.quota = quota;
    config.rng.seed = Some(0x5EED);
    config
}

/// Panic if any cell appears twice in the path
pub fn assert_self_avoiding(path: &Path) {
    let mut seen = HashSet::new();
    for pos in path.coords() {
        assert!(seen.insert(*pos), "cell ({}, {}) repeats in {}", pos.x, pos.y, path);
    }
}

/// Panic if two consecutive cells are not orthogonal neighbors
pub fn assert_adjacent_steps(path: &Path) {
    for pair in path.coords().windows(2) {
        assert_eq!(
            pair[0].manhattan(&pair[1]),
            1,
            "({}, {}) -> ({}, {}) is not a single step",
            pair[0].x,
            pair[0].y,
            pair[1].x,
            pair[1].y
        );
    }
}

pub fn assert_inside(grid: &Grid, path: &Path) {
    for pos in path.coords() {
        assert!(grid.in_bounds(*pos), "({}, {}) outside grid", pos.x, pos.y);
    }
}

/// (position, weight) for every cell with weight
pub fn nonzero_weights(grid: &Grid) -> Vec<(Position, u64)> {
    grid.iter()
        .filter(|(_, c)| c.weight > 0)
        .map(|(p, c)| (p, c.weight))
        .collect()
}

/// Grid picture of a path for failure messages
pub fn visualize_path(grid: &Grid, path: &Path) -> String {
    let mut result = String::new();
    for y in 0..grid.size as i32 {
        for x in 0..grid.size as i32 {
            let pos = Position::new(x, y);
            let symbol = if Some(pos) == path.start() {
                'S'
            } else if Some(pos) == path.end() {
                'E'
            } else if path.coords().contains(&pos) {
                '*'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}
