use crate::grid::Grid;
use crate::walk::Path;

/// Credit every cell of an accepted walk, start cell included, with one unit of weight.
pub fn apply(grid: &mut Grid, path: &Path) {
    grid.add_weight(path.coords());
}
