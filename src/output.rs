use crate::error::OutputError;
use crate::grid::{Grid, Position};
use crate::walk::Path as WalkPath;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Receives accepted walks and the final weight grid.
pub trait WalkSink {
    /// Called once per accepted walk; `index` is 1-based
    fn accept_walk(&mut self, index: usize, path: &WalkPath) -> Result<(), OutputError>;

    /// Called once when the run ends
    fn persist_weights(&mut self, grid: &Grid) -> Result<(), OutputError>;
}

/// Run identifier: current UNIX time in seconds
pub fn run_id_now() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Write `x,y` per step, CRLF terminated
pub fn write_walk<W: Write>(out: &mut W, path: &WalkPath) -> std::io::Result<()> {
    for pos in path.coords() {
        write!(out, "{},{}\r\n", pos.x, pos.y)?;
    }
    Ok(())
}

/// Write `x y weight` per cell, x outer, y inner, CRLF terminated
pub fn write_weights<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    for (pos, cell) in grid.iter() {
        write!(out, "{} {} {}\r\n", pos.x, pos.y, cell.weight)?;
    }
    Ok(())
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<(), OutputError> {
    let to_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    body(&mut writer).map_err(to_error)?;
    writer.flush().map_err(to_error)
}

/// Writes one file per accepted walk plus the weight file into `<data_dir>/<run_id>`.
pub struct FileSink {
    run_id: String,
    run_dir: PathBuf,
}

impl FileSink {
    /// Create the run directory. A failure (including an existing directory)
    /// is logged and the sink is returned anyway.
    pub fn create(data_dir: impl AsRef<Path>, run_id: &str) -> Self {
        let sink = FileSink {
            run_id: run_id.to_string(),
            run_dir: data_dir.as_ref().join(run_id),
        };
        if let Err(e) = sink.create_run_dir() {
            warn!(error = %e, "continuing without a fresh run directory");
        }
        sink
    }

    fn create_run_dir(&self) -> Result<(), OutputError> {
        let to_error = |source| OutputError::CreateDir {
            path: self.run_dir.clone(),
            source,
        };
        if let Some(parent) = self.run_dir.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        fs::create_dir(&self.run_dir).map_err(to_error)
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn walk_file(&self, index: usize) -> PathBuf {
        self.run_dir.join(format!("{}.txt", index))
    }

    pub fn weight_file(&self) -> PathBuf {
        self.run_dir.join(format!("{}.txt", self.run_id))
    }
}

impl WalkSink for FileSink {
    fn accept_walk(&mut self, index: usize, path: &WalkPath) -> Result<(), OutputError> {
        let file = self.walk_file(index);
        write_file(&file, |w| write_walk(w, path))?;
        debug!(file = %file.display(), "wrote walk");
        Ok(())
    }

    fn persist_weights(&mut self, grid: &Grid) -> Result<(), OutputError> {
        let file = self.weight_file();
        write_file(&file, |w| write_weights(w, grid))?;
        debug!(file = %file.display(), "wrote weight grid");
        Ok(())
    }
}

/// Keeps accepted walks and the final weights in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub walks: Vec<(usize, WalkPath)>,
    pub weights: Option<Grid>,
}

impl WalkSink for MemorySink {
    fn accept_walk(&mut self, index: usize, path: &WalkPath) -> Result<(), OutputError> {
        self.walks.push((index, path.clone()));
        Ok(())
    }

    fn persist_weights(&mut self, grid: &Grid) -> Result<(), OutputError> {
        self.weights = Some(grid.clone());
        Ok(())
    }
}

/// Load a weight file back into a grid. The grid size is the square root of
/// the line count.
pub fn read_weight_file(path: impl AsRef<Path>) -> Result<Grid, OutputError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| OutputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |line: usize, reason: String| OutputError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut entries = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(parse_error(i + 1, format!("expected 3 fields, found {}", fields.len())));
        }
        let x: i32 = fields[0]
            .parse()
            .map_err(|e| parse_error(i + 1, format!("bad x: {}", e)))?;
        let y: i32 = fields[1]
            .parse()
            .map_err(|e| parse_error(i + 1, format!("bad y: {}", e)))?;
        let weight: u64 = fields[2]
            .parse()
            .map_err(|e| parse_error(i + 1, format!("bad weight: {}", e)))?;
        entries.push((i + 1, Position::new(x, y), weight));
    }

    let size = (entries.len() as f64).sqrt() as usize;
    if size * size != entries.len() {
        return Err(parse_error(
            entries.len(),
            format!("{} cells do not form a square grid", entries.len()),
        ));
    }

    let mut grid = Grid::new(size);
    for (line, pos, weight) in entries {
        if !grid.in_bounds(pos) {
            return Err(parse_error(line, format!("({}, {}) outside {}x{} grid", pos.x, pos.y, size, size)));
        }
        grid.set_weight(pos, weight);
    }
    Ok(grid)
}

const SHADES: &[u8] = b" .:-=+*#%@";

/// ASCII heat map of the weights, one text row per y, shaded relative to the heaviest cell
pub fn heat_map(grid: &Grid) -> String {
    let max = grid.max_weight();
    let mut out = String::with_capacity(grid.size * (grid.size + 1));
    for y in 0..grid.size as i32 {
        for x in 0..grid.size as i32 {
            let weight = grid.weight(Position::new(x, y));
            let shade = if max == 0 || weight == 0 {
                0
            } else {
                // any visit gets at least the lightest mark
                (1 + (weight * (SHADES.len() as u64 - 2)) / max) as usize
            };
            out.push(SHADES[shade] as char);
        }
        out.push('\n');
    }
    out
}
