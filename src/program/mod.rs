//! Algorithm programs
//!
//! This module provides the ten algorithm implementations:
//! - [`sort`]: bubble, insertion, selection
//! - [`partition`]: quicksort (Lomuto)
//! - [`merge`]: mergesort
//! - [`heap`]: heapsort
//! - [`search`]: linear and binary search
//! - [`traversal`]: BFS and the three DFS orders
//!
//! # Execution Model
//!
//! A program is a pure, resumable description of an algorithm: it owns its
//! loop counters and an explicit work stack, reads (never writes) the
//! working state to make decisions, and hands the engine exactly one
//! [`StepOp`](crate::step::StepOp) per [`Program::next_op`] call, ending
//! with `Finish`. Timing and cancellation are entirely the engine's job;
//! a cancelled run simply stops asking for operations, so the program's
//! pending frames unwind by never resuming.

pub mod heap;
pub mod merge;
pub mod partition;
pub mod search;
pub mod sort;
pub mod traversal;

use crate::buffer::linear::LinearBuffer;
use crate::buffer::tree::TreePool;
use crate::buffer::{StateKind, WorkingState};
use crate::engine::errors::{ConfigError, EngineError};
use crate::step::StepOp;
use std::fmt;

/// A resumable sequence of elementary operations over a working state.
pub trait Program {
    /// Produce the next operation given the current state.
    ///
    /// Called again only after the previous operation has been applied, so
    /// reads through `state` always see the effects of every earlier op.
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError>;
}

/// View the state as a linear buffer, or report the defect.
pub(crate) fn linear_view(state: &WorkingState) -> Result<&LinearBuffer, EngineError> {
    state.as_linear().ok_or(EngineError::WrongState {
        expected: StateKind::Linear,
        got: state.kind(),
    })
}

/// View the state as a tree arena, or report the defect.
pub(crate) fn tree_view(state: &WorkingState) -> Result<&TreePool, EngineError> {
    state.as_tree().ok_or(EngineError::WrongState {
        expected: StateKind::Tree,
        got: state.kind(),
    })
}

/// The closed set of algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    Quick,
    Merge,
    Heap,
    Linear,
    Binary,
    Bfs,
    DfsPreorder,
    DfsInorder,
    DfsPostorder,
}

/// Every algorithm, in catalog order (the UI cycles through this).
pub const ALL_ALGORITHMS: [Algorithm; 12] = [
    Algorithm::Bubble,
    Algorithm::Insertion,
    Algorithm::Selection,
    Algorithm::Quick,
    Algorithm::Merge,
    Algorithm::Heap,
    Algorithm::Linear,
    Algorithm::Binary,
    Algorithm::Bfs,
    Algorithm::DfsPreorder,
    Algorithm::DfsInorder,
    Algorithm::DfsPostorder,
];

impl Algorithm {
    /// Parse a catalog key (case-insensitive).
    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        match key.to_ascii_lowercase().as_str() {
            "bubble" => Ok(Algorithm::Bubble),
            "insertion" => Ok(Algorithm::Insertion),
            "selection" => Ok(Algorithm::Selection),
            "quick" => Ok(Algorithm::Quick),
            "merge" => Ok(Algorithm::Merge),
            "heap" => Ok(Algorithm::Heap),
            "linear" => Ok(Algorithm::Linear),
            "binary" => Ok(Algorithm::Binary),
            "bfs" => Ok(Algorithm::Bfs),
            "preorder" => Ok(Algorithm::DfsPreorder),
            "inorder" => Ok(Algorithm::DfsInorder),
            "postorder" => Ok(Algorithm::DfsPostorder),
            _ => Err(ConfigError::UnknownAlgorithm {
                key: key.to_string(),
            }),
        }
    }

    /// The catalog key this algorithm parses from.
    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Linear => "linear",
            Algorithm::Binary => "binary",
            Algorithm::Bfs => "bfs",
            Algorithm::DfsPreorder => "preorder",
            Algorithm::DfsInorder => "inorder",
            Algorithm::DfsPostorder => "postorder",
        }
    }

    /// Human-readable name for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Linear => "Linear Search",
            Algorithm::Binary => "Binary Search",
            Algorithm::Bfs => "BFS Traversal",
            Algorithm::DfsPreorder => "DFS Pre-order",
            Algorithm::DfsInorder => "DFS In-order",
            Algorithm::DfsPostorder => "DFS Post-order",
        }
    }

    /// Asymptotic complexity, shown alongside the name.
    pub fn complexity(&self) -> &'static str {
        match self {
            Algorithm::Bubble | Algorithm::Insertion | Algorithm::Selection => "O(n^2)",
            Algorithm::Quick | Algorithm::Merge | Algorithm::Heap => "O(n log n)",
            Algorithm::Linear => "O(n)",
            Algorithm::Binary => "O(log n)",
            Algorithm::Bfs
            | Algorithm::DfsPreorder
            | Algorithm::DfsInorder
            | Algorithm::DfsPostorder => "O(n)",
        }
    }

    /// Which kind of working state this algorithm runs over.
    pub fn state_kind(&self) -> StateKind {
        match self {
            Algorithm::Bfs
            | Algorithm::DfsPreorder
            | Algorithm::DfsInorder
            | Algorithm::DfsPostorder => StateKind::Tree,
            _ => StateKind::Linear,
        }
    }

    /// True for the searches, which need a target value.
    pub fn needs_target(&self) -> bool {
        matches!(self, Algorithm::Linear | Algorithm::Binary)
    }

    /// True for binary search, which requires a pre-sorted buffer. The
    /// engine does not validate sortedness; running on an unsorted buffer
    /// gives a defined-but-meaningless result.
    pub fn needs_sorted(&self) -> bool {
        matches!(self, Algorithm::Binary)
    }

    /// Build a fresh program for one run. `target` is only read by the
    /// searches.
    pub fn program(&self, target: Option<u32>) -> Box<dyn Program> {
        match self {
            Algorithm::Bubble => Box::new(sort::BubbleSort::new()),
            Algorithm::Insertion => Box::new(sort::InsertionSort::new()),
            Algorithm::Selection => Box::new(sort::SelectionSort::new()),
            Algorithm::Quick => Box::new(partition::QuickSort::new()),
            Algorithm::Merge => Box::new(merge::MergeSort::new()),
            Algorithm::Heap => Box::new(heap::HeapSort::new()),
            Algorithm::Linear => Box::new(search::LinearSearch::new(target.unwrap_or_default())),
            Algorithm::Binary => Box::new(search::BinarySearch::new(target.unwrap_or_default())),
            Algorithm::Bfs => Box::new(traversal::Bfs::new()),
            Algorithm::DfsPreorder => Box::new(traversal::Dfs::new(traversal::DfsOrder::Pre)),
            Algorithm::DfsInorder => Box::new(traversal::Dfs::new(traversal::DfsOrder::In)),
            Algorithm::DfsPostorder => Box::new(traversal::Dfs::new(traversal::DfsOrder::Post)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for algo in ALL_ALGORITHMS {
            assert_eq!(Algorithm::from_key(algo.key()).unwrap(), algo);
        }
    }

    #[test]
    fn test_from_key_case_insensitive() {
        assert_eq!(Algorithm::from_key("BFS").unwrap(), Algorithm::Bfs);
        assert_eq!(Algorithm::from_key("Bubble").unwrap(), Algorithm::Bubble);
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            Algorithm::from_key("bogo"),
            Err(ConfigError::UnknownAlgorithm { .. })
        ));
    }
}
