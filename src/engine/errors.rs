//! Error types for configuration and step execution
//!
//! Two families, matching the failure taxonomy of the run contract:
//!
//! - [`ConfigError`]: precondition violations detected synchronously before
//!   any mutation (unknown algorithm key, empty value list, run already
//!   active). Never partially applied.
//! - [`EngineError`]: stepping a finished run (a caller precondition), or a
//!   *defect* — a program requesting an operation that breaks the step
//!   contract. Defects are fatal, never retried, and carry the offending
//!   operation for diagnosis; they indicate a bug in a program, not bad
//!   input.
//!
//! Cancellation is neither: it is a first-class
//! [`RunOutcome`](crate::step::RunOutcome) variant.

use crate::buffer::tree::NodeId;
use crate::buffer::StateKind;
use crate::step::StepOp;
use std::fmt;

/// Precondition violations raised before a run mutates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The algorithm key is not one of the closed identifier set.
    UnknownAlgorithm { key: String },

    /// A custom value list had no parseable entries.
    NoValues,

    /// A run is already active on this working state.
    RunActive,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownAlgorithm { key } => {
                write!(f, "Unknown algorithm '{}'", key)
            }
            ConfigError::NoValues => {
                write!(f, "No numeric values remained after parsing the value list")
            }
            ConfigError::RunActive => {
                write!(f, "A run is already active; cancel or let it finish first")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failures surfaced by the step engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Stepping an engine whose run already emitted `Done`.
    RunFinished,

    /// An operation referenced a position outside the buffer.
    OutOfBounds {
        op: StepOp,
        index: usize,
        len: usize,
    },

    /// An operation referenced a node the arena does not hold (or a
    /// detached one).
    UnknownNode { op: StepOp, node: NodeId },

    /// A position was settled twice in one run.
    DoubleSettle { op: StepOp, index: usize },

    /// A node was visited twice in one run.
    DoubleVisit { op: StepOp, node: NodeId },

    /// A program was driven against the wrong kind of working state.
    WrongState { expected: StateKind, got: StateKind },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::RunFinished => {
                write!(f, "The run has already finished")
            }
            EngineError::OutOfBounds { op, index, len } => {
                write!(
                    f,
                    "Defect in {}: index {} out of bounds for length {}",
                    op, index, len
                )
            }
            EngineError::UnknownNode { op, node } => {
                write!(f, "Defect in {}: node {} is not in the arena", op, node)
            }
            EngineError::DoubleSettle { op, index } => {
                write!(f, "Defect in {}: position {} settled twice", op, index)
            }
            EngineError::DoubleVisit { op, node } => {
                write!(f, "Defect in {}: node {} visited twice", op, node)
            }
            EngineError::WrongState { expected, got } => {
                write!(
                    f,
                    "Defect: program expects a {}, but the run holds a {}",
                    expected, got
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}
