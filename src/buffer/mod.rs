//! Working-state data model
//!
//! This module provides the mutable buffers an algorithm run operates over:
//! - [`linear`]: [`LinearBuffer`], a fixed-length sequence of values with
//!   settled-position tracking
//! - [`tree`]: [`TreePool`], an arena-backed binary tree with visit tracking
//!
//! # Ownership Discipline
//!
//! A [`WorkingState`] is created by the session (random fill or user-supplied
//! values/tree shape) before a run starts. For the run's duration it is
//! mutated exclusively by the step engine; everything else sees read-only
//! snapshots. Once the run completes or is cancelled the session regains it.
//!
//! [`LinearBuffer`]: linear::LinearBuffer
//! [`TreePool`]: tree::TreePool

pub mod linear;
pub mod tree;

use linear::LinearBuffer;
use tree::TreePool;

/// Smallest buffer size the UI will configure.
pub const MIN_BUFFER_SIZE: usize = 10;
/// Largest buffer size the UI will configure.
pub const MAX_BUFFER_SIZE: usize = 100;
/// Cap on user-supplied literal values.
pub const MAX_CUSTOM_VALUES: usize = 15;
/// Smallest value produced by random fill.
pub const MIN_VALUE: u32 = 10;
/// Largest value produced by random fill.
pub const MAX_VALUE: u32 = 309;

/// Which kind of buffer a program expects to run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Linear,
    Tree,
}

impl std::fmt::Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKind::Linear => write!(f, "linear buffer"),
            StateKind::Tree => write!(f, "binary tree"),
        }
    }
}

/// The mutable buffer one algorithm run operates over.
#[derive(Debug, Clone)]
pub enum WorkingState {
    Linear(LinearBuffer),
    Tree(TreePool),
}

impl WorkingState {
    pub fn kind(&self) -> StateKind {
        match self {
            WorkingState::Linear(_) => StateKind::Linear,
            WorkingState::Tree(_) => StateKind::Tree,
        }
    }

    pub fn as_linear(&self) -> Option<&LinearBuffer> {
        match self {
            WorkingState::Linear(buf) => Some(buf),
            WorkingState::Tree(_) => None,
        }
    }

    pub fn as_linear_mut(&mut self) -> Option<&mut LinearBuffer> {
        match self {
            WorkingState::Linear(buf) => Some(buf),
            WorkingState::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreePool> {
        match self {
            WorkingState::Tree(pool) => Some(pool),
            WorkingState::Linear(_) => None,
        }
    }

    pub fn as_tree_mut(&mut self) -> Option<&mut TreePool> {
        match self {
            WorkingState::Tree(pool) => Some(pool),
            WorkingState::Linear(_) => None,
        }
    }
}

/// Clamp a requested buffer size into the supported range.
pub fn clamp_size(requested: usize) -> usize {
    requested.clamp(MIN_BUFFER_SIZE, MAX_BUFFER_SIZE)
}

/// Parse a comma-separated value list, dropping non-numeric tokens and
/// capping the result at [`MAX_CUSTOM_VALUES`] entries.
///
/// Returns `None` when nothing parseable remains.
pub fn parse_values(input: &str) -> Option<Vec<u32>> {
    let values: Vec<u32> = input
        .split(',')
        .filter_map(|tok| tok.trim().parse::<u32>().ok())
        .take(MAX_CUSTOM_VALUES)
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_size() {
        assert_eq!(clamp_size(3), MIN_BUFFER_SIZE);
        assert_eq!(clamp_size(50), 50);
        assert_eq!(clamp_size(5000), MAX_BUFFER_SIZE);
    }

    #[test]
    fn test_parse_values_drops_garbage() {
        let values = parse_values("64, 34, banana, 25, -7, 12").unwrap();
        assert_eq!(values, vec![64, 34, 25, 12]);
    }

    #[test]
    fn test_parse_values_caps_at_fifteen() {
        let input = (0..40).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        let values = parse_values(&input).unwrap();
        assert_eq!(values.len(), MAX_CUSTOM_VALUES);
    }

    #[test]
    fn test_parse_values_empty() {
        assert!(parse_values("").is_none());
        assert!(parse_values("a, b, c").is_none());
    }
}
