//! Step operations, observable events, snapshots, and run outcomes
//!
//! A program never touches the working state itself: it *requests* one
//! [`StepOp`] at a time, the engine applies the mutation and emits the
//! matching [`StepEvent`] together with an immutable [`Snapshot`]. The event
//! is the unit of observability; the snapshot is what the view renders.

use crate::buffer::tree::NodeId;
use crate::buffer::WorkingState;
use std::fmt;

/// One elementary operation a program asks the engine to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOp {
    /// Compare positions `i` and `j`. No state change. Searches compare an
    /// external target against one cell and use `i == j`.
    Compare { i: usize, j: usize },
    /// Exchange two buffer positions (`i == j` is a permitted no-op).
    Swap { i: usize, j: usize },
    /// Store `value` directly at position `i`.
    Overwrite { i: usize, value: u32 },
    /// Binary-search window for the current probe; `lo <= mid <= hi`.
    Narrow { lo: usize, hi: usize, mid: usize },
    /// Reach a tree node.
    Visit { node: NodeId },
    /// Mark positions as being in final sorted place.
    Settle { indices: Vec<usize> },
    /// Terminal operation; `result` carries the found index for searches.
    Finish { result: Option<usize> },
}

impl fmt::Display for StepOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOp::Compare { i, j } => write!(f, "compare({}, {})", i, j),
            StepOp::Swap { i, j } => write!(f, "swap({}, {})", i, j),
            StepOp::Overwrite { i, value } => write!(f, "overwrite({}, {})", i, value),
            StepOp::Narrow { lo, hi, mid } => write!(f, "narrow([{}, {}], mid {})", lo, hi, mid),
            StepOp::Visit { node } => write!(f, "visit({})", node),
            StepOp::Settle { indices } => write!(f, "settle({:?})", indices),
            StepOp::Finish { result: Some(k) } => write!(f, "finish(found {})", k),
            StepOp::Finish { result: None } => write!(f, "finish"),
        }
    }
}

/// An immutable, tagged description of one applied operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// Operands being compared; no state change.
    Compare { i: usize, j: usize },
    /// Two buffer positions were exchanged.
    Swap { i: usize, j: usize },
    /// A position was set directly.
    Overwrite { i: usize, value: u32 },
    /// The binary-search window for the probe at `mid`.
    RangeNarrow { lo: usize, hi: usize, mid: usize },
    /// A tree node was reached.
    Visit { label: String },
    /// These positions are now in final sorted place.
    SettleRange { indices: Vec<usize> },
    /// Terminal event, emitted exactly once per run.
    Done { result: Option<usize> },
}

impl StepEvent {
    pub fn is_done(&self) -> bool {
        matches!(self, StepEvent::Done { .. })
    }

    /// Buffer positions this event highlights, for rendering.
    pub fn operands(&self) -> Vec<usize> {
        match self {
            StepEvent::Compare { i, j } if i == j => vec![*i],
            StepEvent::Compare { i, j } => vec![*i, *j],
            StepEvent::Swap { i, j } => vec![*i, *j],
            StepEvent::Overwrite { i, .. } => vec![*i],
            StepEvent::RangeNarrow { mid, .. } => vec![*mid],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::Compare { i, j } if i == j => write!(f, "compare [{}]", i),
            StepEvent::Compare { i, j } => write!(f, "compare [{}] <> [{}]", i, j),
            StepEvent::Swap { i, j } => write!(f, "swap [{}] <-> [{}]", i, j),
            StepEvent::Overwrite { i, value } => write!(f, "write [{}] = {}", i, value),
            StepEvent::RangeNarrow { lo, hi, mid } => {
                write!(f, "window [{}, {}] mid {}", lo, hi, mid)
            }
            StepEvent::Visit { label } => write!(f, "visit {}", label),
            StepEvent::SettleRange { indices } if indices.len() == 1 => {
                write!(f, "settled [{}]", indices[0])
            }
            StepEvent::SettleRange { indices } => write!(f, "settled {} positions", indices.len()),
            StepEvent::Done { result: Some(k) } => write!(f, "done: found at [{}]", k),
            StepEvent::Done { result: None } => write!(f, "done"),
        }
    }
}

/// Immutable copy of the working state at the moment an event was emitted.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: WorkingState,
    /// How many events had been emitted when the snapshot was taken.
    pub step: usize,
}

/// How a run ended. Cancellation is a first-class outcome, not an error.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The program ran to its `Done` event.
    Completed(Snapshot),
    /// Cancellation was honored at a suspension boundary.
    Cancelled(Snapshot),
}

impl RunOutcome {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            RunOutcome::Completed(s) | RunOutcome::Cancelled(s) => s,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}
