use crate::grid::{Grid, Position};
use crate::rng::Draws;
use tracing::trace;

/// Pick the start cell for a walk attempt.
///
/// Both uniform coordinates are drawn first, every time. When `total_weight`
/// is positive a third draw `r` in `[0, total_weight)` is scanned over the
/// cells in x-outer, y-inner order, subtracting each weight and stopping at
/// the first cell where the remainder is `<= 0`. A draw of 0 therefore lands
/// on the first cell even if its weight is 0. If the scan never stops the
/// uniform coordinates are used.
pub fn select_start<R: Draws + ?Sized>(grid: &Grid, total_weight: u64, rng: &mut R) -> Position {
    let uniform = Position::new(rng.below(grid.size) as i32, rng.below(grid.size) as i32);

    if total_weight > 0 {
        let mut remainder = rng.below(total_weight as usize) as i64;
        for (pos, cell) in grid.iter() {
            remainder -= cell.weight as i64;
            if remainder <= 0 {
                trace!(x = pos.x, y = pos.y, total_weight, "weighted start");
                return pos;
            }
        }
    }

    trace!(x = uniform.x, y = uniform.y, "uniform start");
    uniform
}
