//! # Introduction
//!
//! algotty animates classic algorithms in the terminal: six sorts, two
//! searches, and four tree traversals, each executed one elementary
//! operation at a time with a typed event emitted per step. The run is
//! paced by a live-adjustable delay and can be cancelled cleanly between
//! any two events.
//!
//! ## Execution pipeline
//!
//! ```text
//! RunConfig → WorkingState → Program → StepEngine → StepEvents → TUI
//! ```
//!
//! 1. [`buffer`] — the two working structures: a flat value buffer with
//!    settled-position tracking, and an arena-backed binary tree.
//! 2. [`program`] — the algorithms as resumable state machines; each call
//!    yields one [`step::StepOp`].
//! 3. [`engine`] — validates and applies operations, emits
//!    [`step::StepEvent`]s, and owns pacing and cancellation.
//! 4. [`session`] — configuration and run lifecycle; what the UI drives.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.

pub mod buffer;
pub mod engine;
pub mod program;
pub mod session;
pub mod step;
pub mod ui;
