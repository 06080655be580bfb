use crate::config::Config;
use crate::error::{ConfigError, SubmitError};
use crate::feedback;
use crate::filter::{AcceptanceFilter, Rejection, Verdict};
use crate::grid::{Grid, Position};
use crate::output::WalkSink;
use crate::rng::Draws;
use crate::run_log::{RunEvent, RunLog};
use crate::selector::select_start;
use crate::walk::{walk_from, Path};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Driver states. One call to [`Simulation::advance`] performs one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ResetGrid,
    ComputeWeight,
    SelectStart,
    Stepping,
    Evaluate,
    Accept,
    Reject,
    PersistWeights,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub accepted: usize,
    pub attempts: u64,
    pub rejected_short: u64,
    pub rejected_duplicate: u64,
    pub total_weight: u64,
    pub quota_reached: bool,
    pub output_failures: usize,
}

/// Seed from config, or a fresh one from entropy. The seed is returned so it can be logged.
pub fn seeded_rng(config: &Config) -> (SmallRng, u64) {
    let seed = config.rng.seed.unwrap_or_else(rand::random);
    (SmallRng::seed_from_u64(seed), seed)
}

/// Sequential walk generation with weight feedback.
pub struct Simulation<R: Draws = SmallRng> {
    config: Config,
    grid: Grid,
    filter: AcceptanceFilter,
    rng: R,
    phase: Phase,
    total_weight: u64,
    start: Position,
    pending: Option<Path>,
    last_verdict: Option<Verdict>,
    summary: RunSummary,
    log: RunLog,
}

impl Simulation<SmallRng> {
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let (rng, seed) = seeded_rng(&config);
        info!(seed, "seeded walk generator");
        Simulation::new(config, rng)
    }
}

impl<R: Draws> Simulation<R> {
    /// Fails if the config does not pass [`Config::validate`]
    pub fn new(config: Config, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Simulation {
            grid: Grid::new(config.grid.size),
            filter: AcceptanceFilter::new(config.walk.min_length),
            config,
            rng,
            phase: Phase::ResetGrid,
            total_weight: 0,
            start: Position::new(0, 0),
            pending: None,
            last_verdict: None,
            summary: RunSummary::default(),
            log: RunLog::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every accepted walk, in acceptance order
    pub fn accepted(&self) -> &[Path] {
        self.filter.accepted()
    }

    pub fn accepted_count(&self) -> usize {
        self.filter.len()
    }

    pub fn attempts(&self) -> u64 {
        self.summary.attempts
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            accepted: self.filter.len(),
            total_weight: self.grid.total_weight(),
            quota_reached: self.filter.len() >= self.config.walk.quota,
            ..self.summary.clone()
        }
    }

    /// Perform one state transition and return the new phase
    pub fn advance<S: WalkSink + ?Sized>(&mut self, sink: &mut S) -> Phase {
        self.phase = match self.phase {
            Phase::ResetGrid => self.reset_grid(),
            Phase::ComputeWeight => {
                self.total_weight = self.grid.total_weight();
                Phase::SelectStart
            }
            Phase::SelectStart => {
                self.start = select_start(&self.grid, self.total_weight, &mut self.rng);
                Phase::Stepping
            }
            Phase::Stepping => {
                self.pending = Some(walk_from(&mut self.grid, self.start, &mut self.rng));
                Phase::Evaluate
            }
            Phase::Evaluate => self.evaluate(),
            Phase::Accept => {
                self.accept(sink);
                Phase::ResetGrid
            }
            Phase::Reject => {
                self.reject();
                Phase::ResetGrid
            }
            Phase::PersistWeights => {
                self.persist(sink);
                Phase::Done
            }
            Phase::Done => Phase::Done,
        };
        self.phase
    }

    /// Run until the quota is met (or the attempt cap trips) and the weights are persisted
    pub fn run<S: WalkSink + ?Sized>(&mut self, sink: &mut S) -> RunSummary {
        info!(
            size = self.config.grid.size,
            quota = self.config.walk.quota,
            min_length = self.config.walk.min_length,
            "starting walk generation"
        );
        while self.advance(sink) != Phase::Done {}
        let summary = self.summary();
        info!(
            accepted = summary.accepted,
            attempts = summary.attempts,
            total_weight = summary.total_weight,
            quota_reached = summary.quota_reached,
            "walk generation finished"
        );
        summary
    }

    /// Run a single attempt from reset to accept/reject.
    /// Returns `None` once the run has moved on to persisting weights.
    pub fn run_attempt<S: WalkSink + ?Sized>(&mut self, sink: &mut S) -> Option<Verdict> {
        self.last_verdict = None;
        loop {
            if matches!(self.phase, Phase::PersistWeights | Phase::Done) {
                return None;
            }
            if self.advance(sink) == Phase::ResetGrid {
                return self.last_verdict;
            }
        }
    }

    /// Evaluate a walk built outside the driver and accept or reject it as
    /// if it had been generated. Counts as an attempt.
    ///
    /// Refused without side effects unless the driver is between attempts,
    /// the quota is still open and the path is a self-avoiding walk of
    /// single steps inside the grid.
    pub fn submit<S: WalkSink + ?Sized>(
        &mut self,
        path: Path,
        sink: &mut S,
    ) -> Result<Verdict, SubmitError> {
        if self.phase != Phase::ResetGrid {
            return Err(SubmitError::NotBetweenAttempts { phase: self.phase });
        }
        if self.filter.len() >= self.config.walk.quota {
            return Err(SubmitError::QuotaReached {
                quota: self.config.walk.quota,
            });
        }
        path.check(&self.grid)?;

        self.summary.attempts += 1;
        self.pending = Some(path);
        self.phase = Phase::Evaluate;
        self.last_verdict = None;
        self.advance(sink);
        self.advance(sink);
        Ok(self.last_verdict.unwrap_or(Verdict::Rejected(Rejection::TooShort)))
    }

    fn reset_grid(&mut self) -> Phase {
        if self.filter.len() >= self.config.walk.quota {
            return Phase::PersistWeights;
        }
        if let Some(limit) = self.config.attempt_limit() {
            if self.summary.attempts >= limit {
                warn!(
                    attempts = self.summary.attempts,
                    accepted = self.filter.len(),
                    "attempt cap reached before quota"
                );
                self.log.log(RunEvent::GuardTripped { attempts: self.summary.attempts });
                return Phase::PersistWeights;
            }
        }
        self.grid.reset_occupancy();
        self.summary.attempts += 1;
        Phase::ComputeWeight
    }

    fn evaluate(&mut self) -> Phase {
        let verdict = match &self.pending {
            Some(path) => self.filter.evaluate(path),
            None => Verdict::Rejected(Rejection::TooShort),
        };
        self.last_verdict = Some(verdict);
        match verdict {
            Verdict::Accepted => Phase::Accept,
            Verdict::Rejected(_) => Phase::Reject,
        }
    }

    fn accept<S: WalkSink + ?Sized>(&mut self, sink: &mut S) {
        let Some(path) = self.pending.take() else {
            return;
        };
        feedback::apply(&mut self.grid, &path);
        let index = self.filter.len() + 1;
        let length = path.len();
        let start = path.start().unwrap_or(self.start);

        info!(index, length, x = start.x, y = start.y, "accepted walk");
        self.log.log(RunEvent::WalkAccepted {
            index,
            attempt: self.summary.attempts,
            length,
            start,
        });

        if let Err(e) = sink.accept_walk(index, &path) {
            warn!(index, error = %e, "failed to persist walk");
            self.summary.output_failures += 1;
        }
        self.filter.record(path);
    }

    fn reject(&mut self) {
        let Some(path) = self.pending.take() else {
            return;
        };
        let reason = match self.last_verdict {
            Some(Verdict::Rejected(reason)) => reason,
            _ => Rejection::TooShort,
        };
        match reason {
            Rejection::TooShort => self.summary.rejected_short += 1,
            Rejection::Duplicate => self.summary.rejected_duplicate += 1,
        }
        debug!(attempt = self.summary.attempts, length = path.len(), ?reason, "rejected walk");
        self.log.log(RunEvent::AttemptRejected {
            attempt: self.summary.attempts,
            length: path.len(),
            reason,
        });
    }

    fn persist<S: WalkSink + ?Sized>(&mut self, sink: &mut S) {
        let total_weight = self.grid.total_weight();
        if let Err(e) = sink.persist_weights(&self.grid) {
            warn!(error = %e, "failed to persist weight grid");
            self.summary.output_failures += 1;
        }
        self.log.log(RunEvent::WeightsPersisted { total_weight });
    }
}
