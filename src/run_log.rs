use crate::error::OutputError;
use crate::filter::Rejection;
use crate::grid::Position;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Things that happen during a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    /// A finished walk was discarded
    AttemptRejected { attempt: u64, length: usize, reason: Rejection },
    /// A walk was accepted as number `index` (1-based)
    WalkAccepted { index: usize, attempt: u64, length: usize, start: Position },
    /// The final weight grid was handed to the output collaborator
    WeightsPersisted { total_weight: u64 },
    /// The attempt cap stopped the run before the quota
    GuardTripped { attempts: u64 },
}

/// Logged event with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub event: RunEvent,
}

/// Run event log
pub struct RunLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    pub fn new() -> Self {
        RunLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    pub fn log(&mut self, event: RunEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent { timestamp_ms, event });
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut accepted = 0usize;
        let mut accepted_steps = 0usize;
        let mut too_short = 0usize;
        let mut duplicates = 0usize;
        let mut guard = None;

        for logged in &self.events {
            match &logged.event {
                RunEvent::WalkAccepted { length, .. } => {
                    accepted += 1;
                    accepted_steps += length;
                }
                RunEvent::AttemptRejected { reason: Rejection::TooShort, .. } => too_short += 1,
                RunEvent::AttemptRejected { reason: Rejection::Duplicate, .. } => duplicates += 1,
                RunEvent::GuardTripped { attempts } => guard = Some(*attempts),
                RunEvent::WeightsPersisted { .. } => {}
            }
        }

        let duration = self.events.last().map(|e| e.timestamp_ms).unwrap_or(0);
        let mean_length = if accepted > 0 {
            accepted_steps as f64 / accepted as f64
        } else {
            0.0
        };

        let mut text = format!(
            "Run Duration: {}ms\n\
             Accepted Walks: {} (mean length {:.1})\n\
             Rejected Attempts: {} too short, {} duplicate",
            duration, accepted, mean_length, too_short, duplicates
        );
        if let Some(attempts) = guard {
            text.push_str(&format!("\nStopped by attempt cap after {} attempts", attempts));
        }
        text
    }
}
