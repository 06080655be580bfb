pub mod config;
pub mod driver;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod grid;
pub mod logging;
pub mod output;
pub mod rng;
pub mod run_log;
pub mod selector;
pub mod walk;

pub use config::Config;
pub use driver::{Phase, RunSummary, Simulation};
pub use error::{ConfigError, OutputError, PathError, SubmitError};
pub use filter::{AcceptanceFilter, Rejection, Verdict};
pub use grid::{Direction, Grid, Position};
pub use output::{FileSink, MemorySink, WalkSink};
pub use rng::{Draws, ScriptedDraws};
pub use walk::Path;
