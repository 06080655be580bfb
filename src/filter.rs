use crate::walk::Path;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Why a finished walk was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    TooShort,
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Length threshold plus exact duplicate rejection against every accepted walk.
#[derive(Debug, Clone)]
pub struct AcceptanceFilter {
    min_length: usize,
    accepted: Vec<Path>,
    index: HashSet<Path>,
}

impl AcceptanceFilter {
    pub fn new(min_length: usize) -> Self {
        AcceptanceFilter {
            min_length,
            accepted: Vec::new(),
            index: HashSet::new(),
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Judge a finished walk. Has no side effects.
    pub fn evaluate(&self, path: &Path) -> Verdict {
        if path.len() < self.min_length {
            Verdict::Rejected(Rejection::TooShort)
        } else if self.index.contains(path) {
            Verdict::Rejected(Rejection::Duplicate)
        } else {
            Verdict::Accepted
        }
    }

    /// Add an accepted walk to the set. Returns `false` if it was already there.
    pub fn record(&mut self, path: Path) -> bool {
        if !self.index.insert(path.clone()) {
            return false;
        }
        self.accepted.push(path);
        true
    }

    /// Accepted walks in acceptance order
    pub fn accepted(&self) -> &[Path] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}
