//! Step-execution engine
//!
//! This module provides the scheduler that turns an algorithm program into a
//! watchable run:
//! - [`runner`]: [`StepEngine`] plus the pace and cancel knobs
//! - [`errors`]: precondition and defect error types
//!
//! # Execution Model
//!
//! The engine repeatedly pulls one operation request out of the program,
//! validates and applies it at a single choke point, and emits the matching
//! event with an immutable snapshot. Between events it waits for the
//! configured pace and polls the cancel token; control returns to the host
//! loop during each wait, which is the only moment new speed/cancel input is
//! observed and the view repainted.
//!
//! Programs are explicit state machines, so "suspending inside recursion"
//! costs nothing here: the engine's loop never re-enters itself, and a
//! cancelled run simply stops pulling operations — the program's pending
//! work-stack frames never resume.
//!
//! [`StepEngine`]: runner::StepEngine

pub mod errors;
pub mod runner;

pub use runner::{CancelToken, PaceControl, StepEngine, MAX_PACE_MS};
