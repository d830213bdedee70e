//! Run sessions: configuration, lifecycle, and the cooperative driver
//!
//! A [`Session`] owns everything one visualization run needs: the resolved
//! [`RunConfig`], the initial working state built from it, and (while a run
//! is active) the engine plus its pace dial and cancel token. The UI never
//! talks to the engine directly; it calls [`Session::advance`] on every
//! poll tick and the session decides, from the pace, whether the moment
//! for the next event has arrived.
//!
//! Restart determinism: the initial state is rebuilt from the same seed on
//! [`Session::reset`], so cancel-then-restart replays the identical run.

use std::time::Instant;

use crate::buffer::linear::LinearBuffer;
use crate::buffer::tree::TreePool;
use crate::buffer::{clamp_size, StateKind, WorkingState};
use crate::engine::errors::{ConfigError, EngineError};
use crate::engine::{CancelToken, PaceControl, StepEngine};
use crate::program::Algorithm;
use crate::step::{RunOutcome, StepEvent};

/// Inter-event delay used when none is requested.
pub const DEFAULT_PACE_MS: u64 = 200;

/// Everything needed to (re)build one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub algorithm: Algorithm,
    /// Requested buffer size; clamped on build. Ignored when `values` is
    /// set or the algorithm runs over a tree.
    pub size: usize,
    /// Explicit values, already parsed and capped.
    pub values: Option<Vec<u32>>,
    pub pace_ms: u64,
    /// Search target; defaults to the middle element when absent.
    pub target: Option<u32>,
    pub seed: u64,
}

impl RunConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        RunConfig {
            algorithm,
            size: 30,
            values: None,
            pace_ms: DEFAULT_PACE_MS,
            target: None,
            seed: 0,
        }
    }

    /// Build the initial working state this configuration describes.
    ///
    /// Seed 0 keeps the classic default tree; any other seed grows a
    /// random one, which is what regeneration relies on.
    fn build_state(&self) -> WorkingState {
        match self.algorithm.state_kind() {
            StateKind::Tree if self.seed == 0 => WorkingState::Tree(TreePool::sample()),
            StateKind::Tree => WorkingState::Tree(TreePool::random(self.seed)),
            StateKind::Linear => {
                let buf = match &self.values {
                    Some(values) => {
                        let mut values = values.clone();
                        if self.algorithm.needs_sorted() {
                            values.sort_unstable();
                        }
                        LinearBuffer::from_values(values)
                    }
                    None if self.algorithm.needs_sorted() => {
                        LinearBuffer::random_sorted(clamp_size(self.size), self.seed)
                    }
                    None => LinearBuffer::random(clamp_size(self.size), self.seed),
                };
                WorkingState::Linear(buf)
            }
        }
    }

    /// The search target: explicit, or the middle element so demo runs
    /// always find something.
    fn resolve_target(&self, state: &WorkingState) -> Option<u32> {
        if !self.algorithm.needs_target() {
            return None;
        }
        if self.target.is_some() {
            return self.target;
        }
        let buf = state.as_linear()?;
        buf.get(buf.len() / 2)
    }
}

/// One visualization run and its surrounding lifecycle.
pub struct Session {
    config: RunConfig,
    initial: WorkingState,
    engine: Option<StepEngine>,
    pace: PaceControl,
    cancel: CancelToken,
    target: Option<u32>,
    trace: Vec<StepEvent>,
    outcome: Option<RunOutcome>,
    defect: Option<EngineError>,
    last_step_time: Instant,
}

impl Session {
    pub fn new(config: RunConfig) -> Self {
        let initial = config.build_state();
        let pace = PaceControl::new(config.pace_ms);
        Session {
            config,
            initial,
            engine: None,
            pace,
            cancel: CancelToken::new(),
            target: None,
            trace: Vec::new(),
            outcome: None,
            defect: None,
            last_step_time: Instant::now(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Replace the algorithm. Refused while a run is active.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), ConfigError> {
        if self.is_running() {
            return Err(ConfigError::RunActive);
        }
        self.config.algorithm = algorithm;
        // Custom values make no sense across a structure change.
        if algorithm.state_kind() == StateKind::Tree {
            self.config.values = None;
        }
        self.reset();
        Ok(())
    }

    pub fn pace(&self) -> &PaceControl {
        &self.pace
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_some()
    }

    pub fn trace(&self) -> &[StepEvent] {
        &self.trace
    }

    pub fn last_event(&self) -> Option<&StepEvent> {
        self.trace.last()
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    pub fn defect(&self) -> Option<&EngineError> {
        self.defect.as_ref()
    }

    /// The search target the current or next run will look for.
    pub fn target(&self) -> Option<u32> {
        self.target.or_else(|| self.config.resolve_target(&self.initial))
    }

    /// The state to render: live engine state while running, otherwise the
    /// final state of the last run, otherwise the untouched initial state.
    pub fn state(&self) -> &WorkingState {
        if let Some(engine) = &self.engine {
            return engine.state();
        }
        if let Some(outcome) = &self.outcome {
            return &outcome.snapshot().state;
        }
        &self.initial
    }

    /// Events emitted so far in the current or last run.
    pub fn steps(&self) -> usize {
        self.trace.len()
    }

    /// Begin a run over the current initial state.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        if self.is_running() {
            return Err(ConfigError::RunActive);
        }
        let target = self.config.resolve_target(&self.initial);
        let program = self.config.algorithm.program(target);
        self.engine = Some(StepEngine::new(program, self.initial.clone()));
        self.cancel = CancelToken::new();
        self.target = target;
        self.trace.clear();
        self.outcome = None;
        self.defect = None;
        self.last_step_time = Instant::now();
        log::debug!("run started: {}", self.config.algorithm);
        Ok(())
    }

    /// Advance at most one event, if the pace interval has elapsed.
    ///
    /// Call freely from the poll loop; this is a no-op while idle or while
    /// the interval is still pending. Defects end the run and are kept for
    /// display.
    pub fn advance(&mut self) {
        if self.cancel.is_cancelled() {
            self.finish_cancelled();
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let pace_ms = self.pace.get();
        if self.last_step_time.elapsed().as_millis() < u128::from(pace_ms) {
            return;
        }
        match engine.step() {
            Ok(event) => {
                let done = event.is_done();
                self.trace.push(event);
                self.last_step_time = Instant::now();
                if done {
                    if let Some(engine) = self.engine.take() {
                        self.outcome = Some(RunOutcome::Completed(engine.snapshot()));
                    }
                }
            }
            Err(err) => {
                log::warn!("run aborted: {}", err);
                if let Some(engine) = self.engine.take() {
                    self.outcome = Some(RunOutcome::Cancelled(engine.snapshot()));
                }
                self.defect = Some(err);
            }
        }
    }

    /// Request cancellation; honored at the next advance.
    pub fn request_cancel(&mut self) {
        if self.is_running() {
            self.cancel.cancel();
        }
    }

    fn finish_cancelled(&mut self) {
        if let Some(engine) = self.engine.take() {
            log::debug!("run cancelled after {} events", engine.steps());
            self.outcome = Some(RunOutcome::Cancelled(engine.snapshot()));
        }
    }

    /// Bump the seed and rebuild, giving a fresh random buffer or tree.
    pub fn regenerate(&mut self) -> Result<(), ConfigError> {
        if self.is_running() {
            return Err(ConfigError::RunActive);
        }
        self.config.seed = self.config.seed.wrapping_add(1);
        self.config.values = None;
        self.reset();
        Ok(())
    }

    /// Drop any finished run and rebuild the initial state from the same
    /// configuration and seed.
    pub fn reset(&mut self) {
        if self.is_running() {
            self.request_cancel();
            self.finish_cancelled();
        }
        self.cancel = CancelToken::new();
        self.initial = self.config.build_state();
        self.trace.clear();
        self.outcome = None;
        self.defect = None;
        self.target = None;
    }

    /// Run the whole thing to completion in one blocking call, pacing and
    /// cancellation included. Used by the non-interactive path and tests.
    pub fn run_to_end(&mut self) -> Result<RunOutcome, EngineError> {
        let target = self.config.resolve_target(&self.initial);
        let program = self.config.algorithm.program(target);
        let engine = StepEngine::new(program, self.initial.clone());
        self.target = target;
        self.outcome = None;
        self.defect = None;
        let pace = self.pace.clone();
        let cancel = self.cancel.clone();
        let mut trace = Vec::new();
        let outcome = engine.run(&pace, &cancel, |event, _| trace.push(event.clone()))?;
        self.trace = trace;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
