//! The step engine: validation choke point, pacing, cancellation
//!
//! Every operation a program requests passes through [`StepEngine::step`],
//! the single place where operations are validated against the working
//! state and applied. Programs themselves never mutate anything, so the
//! step contract is enforced in one spot regardless of which algorithm is
//! running.
//!
//! [`StepEngine::run`] drives a run to completion on the calling thread,
//! sleeping between events according to a shared [`PaceControl`] and
//! honoring a shared [`CancelToken`] at event boundaries. The interactive
//! UI instead keeps the engine and pulls one step per timer tick, which
//! needs no sleeping at all.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crate::buffer::linear::LinearBuffer;
use crate::buffer::{StateKind, WorkingState};
use crate::program::Program;
use crate::step::{RunOutcome, Snapshot, StepEvent, StepOp};

use super::errors::EngineError;

/// Upper bound on the inter-event delay.
pub const MAX_PACE_MS: u64 = 1000;

/// Shared, live-adjustable inter-event delay in milliseconds.
///
/// Clones hand the same dial to the engine and to whoever is tuning it;
/// the engine re-reads the dial before every wait, so adjustments take
/// effect at the next event boundary. Zero disables the delay entirely.
#[derive(Clone, Debug)]
pub struct PaceControl(Rc<Cell<u64>>);

impl PaceControl {
    pub fn new(ms: u64) -> Self {
        PaceControl(Rc::new(Cell::new(ms.min(MAX_PACE_MS))))
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms.min(MAX_PACE_MS));
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

/// Shared cancellation flag, checked by the engine at event boundaries.
///
/// Setting it never interrupts an in-flight operation: the engine finishes
/// applying the current op, then observes the flag before pulling the next
/// one, so the working state is always left at a clean boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Executes one program against one working state, one operation at a time.
pub struct StepEngine {
    program: Box<dyn Program>,
    state: WorkingState,
    steps: usize,
    finished: bool,
    result: Option<usize>,
}

impl StepEngine {
    pub fn new(program: Box<dyn Program>, state: WorkingState) -> Self {
        StepEngine {
            program,
            state,
            steps: 0,
            finished: false,
            result: None,
        }
    }

    pub fn state(&self) -> &WorkingState {
        &self.state
    }

    /// Events emitted so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// True once the `Done` event has been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The index reported by `Done`, for searches.
    pub fn result(&self) -> Option<usize> {
        self.result
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            step: self.steps,
        }
    }

    /// Pull one operation from the program, validate it, apply it, and
    /// return the emitted event.
    ///
    /// An `Err` other than [`EngineError::RunFinished`] is a defect: the
    /// state is unchanged by the offending operation and the engine must
    /// not be stepped again.
    pub fn step(&mut self) -> Result<StepEvent, EngineError> {
        if self.finished {
            return Err(EngineError::RunFinished);
        }
        let op = self.program.next_op(&self.state)?;
        let event = self.apply(op)?;
        self.steps += 1;
        Ok(event)
    }

    fn apply(&mut self, op: StepOp) -> Result<StepEvent, EngineError> {
        match op {
            StepOp::Compare { i, j } => {
                self.check_index(&op, i)?;
                self.check_index(&op, j)?;
                Ok(StepEvent::Compare { i, j })
            }
            StepOp::Swap { i, j } => {
                self.check_index(&op, i)?;
                self.check_index(&op, j)?;
                let buf = self.linear_mut()?;
                buf.swap(i, j);
                Ok(StepEvent::Swap { i, j })
            }
            StepOp::Overwrite { i, value } => {
                self.check_index(&op, i)?;
                let buf = self.linear_mut()?;
                buf.overwrite(i, value);
                Ok(StepEvent::Overwrite { i, value })
            }
            StepOp::Narrow { lo, hi, mid } => {
                self.check_index(&op, lo)?;
                self.check_index(&op, hi)?;
                self.check_index(&op, mid)?;
                Ok(StepEvent::RangeNarrow { lo, hi, mid })
            }
            StepOp::Visit { node } => {
                let kind = self.state.kind();
                let pool = self.state.as_tree_mut().ok_or(EngineError::WrongState {
                    expected: StateKind::Tree,
                    got: kind,
                })?;
                let label = match pool.label(node) {
                    Some(l) => l.to_string(),
                    None => {
                        return Err(EngineError::UnknownNode { op, node });
                    }
                };
                if !pool.visit(node) {
                    return Err(EngineError::DoubleVisit { op, node });
                }
                Ok(StepEvent::Visit { label })
            }
            StepOp::Settle { ref indices } => {
                for &index in indices {
                    self.check_index(&op, index)?;
                }
                let indices = indices.clone();
                let buf = self.linear_mut()?;
                for &index in &indices {
                    if !buf.settle(index) {
                        return Err(EngineError::DoubleSettle { op, index });
                    }
                }
                Ok(StepEvent::SettleRange { indices })
            }
            StepOp::Finish { result } => {
                self.finished = true;
                self.result = result;
                Ok(StepEvent::Done { result })
            }
        }
    }

    fn check_index(&self, op: &StepOp, index: usize) -> Result<(), EngineError> {
        let len = self
            .state
            .as_linear()
            .ok_or(EngineError::WrongState {
                expected: StateKind::Linear,
                got: self.state.kind(),
            })?
            .len();
        if index >= len {
            return Err(EngineError::OutOfBounds {
                op: op.clone(),
                index,
                len,
            });
        }
        Ok(())
    }

    fn linear_mut(&mut self) -> Result<&mut LinearBuffer, EngineError> {
        let kind = self.state.kind();
        self.state.as_linear_mut().ok_or(EngineError::WrongState {
            expected: StateKind::Linear,
            got: kind,
        })
    }

    /// Drive the run to completion on the calling thread.
    ///
    /// Each event is delivered synchronously together with a snapshot of
    /// the state it produced. Between events the engine sleeps for the
    /// current pace (re-read each time, so live adjustments apply). The
    /// token is checked before each op and again after each sleep; when
    /// set, the run stops at that boundary and the partial state is
    /// returned as `Cancelled`.
    pub fn run(
        mut self,
        pace: &PaceControl,
        cancel: &CancelToken,
        mut on_event: impl FnMut(&StepEvent, &Snapshot),
    ) -> Result<RunOutcome, EngineError> {
        loop {
            if cancel.is_cancelled() {
                return Ok(RunOutcome::Cancelled(self.snapshot()));
            }
            let event = self.step()?;
            let done = event.is_done();
            on_event(&event, &self.snapshot());
            if done {
                return Ok(RunOutcome::Completed(self.snapshot()));
            }
            let ms = pace.get();
            if ms > 0 {
                thread::sleep(Duration::from_millis(ms));
                if cancel.is_cancelled() {
                    return Ok(RunOutcome::Cancelled(self.snapshot()));
                }
            }
        }
    }
}
