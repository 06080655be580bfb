use crate::driver::Phase;
use crate::grid::Position;
use std::path::PathBuf;

/// Problems with the run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures of the file-writing collaborators. None of these stop a run.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create run directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed weight file {path} at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to serialize run log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a path is not a well-formed walk on a given grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path has no cells")]
    Empty,

    #[error("cell ({}, {}) lies outside the grid", .0.x, .0.y)]
    OutOfBounds(Position),

    #[error("({}, {}) -> ({}, {}) is not a single step", .from.x, .from.y, .to.x, .to.y)]
    NotAdjacent { from: Position, to: Position },

    #[error("cell ({}, {}) is visited twice", .0.x, .0.y)]
    Repeated(Position),
}

/// Refusals of [`crate::Simulation::submit`]. A refused path has no effect on the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("cannot submit a walk while the driver is in {phase:?}")]
    NotBetweenAttempts { phase: Phase },

    #[error("quota of {quota} accepted walks already reached")]
    QuotaReached { quota: usize },

    #[error("invalid walk: {0}")]
    InvalidPath(#[from] PathError),
}
