//! Arena-backed binary tree
//!
//! This module provides the working state for traversals:
//! - [`TreePool`]: arena storage, nodes addressed by [`NodeId`]
//! - [`TreeNode`]: label plus optional left/right child links
//!
//! Edit operations mutate parent/child links directly under the same
//! single-writer discipline as the rest of the working state; there is no
//! structural cloning. Nodes are only ever attached fresh, so the tree is
//! acyclic and every node has exactly one parent by construction. Detached
//! subtrees stay in the arena as tombstones: unreachable, never reused, and
//! their ids stay stable for anything still pointing at them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// Handle to a node in a [`TreePool`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child slot of a parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A single tree node: a label and optional child links.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub label: String,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    detached: bool,
}

/// The binary tree arena.
#[derive(Debug, Clone, Default)]
pub struct TreePool {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    visited: FxHashSet<NodeId>,
    visit_order: Vec<NodeId>,
}

impl TreePool {
    /// Create a pool whose root carries the given label.
    pub fn with_root(label: impl Into<String>) -> Self {
        let mut pool = TreePool::default();
        let root = pool.alloc(label.into());
        pool.root = Some(root);
        pool
    }

    /// The original visualizer's default tree: `A(B(D,E), C(F,G(H,_)))`.
    pub fn sample() -> Self {
        let mut pool = TreePool::default();
        let root = pool.alloc("A".to_string());
        pool.root = Some(root);
        let b = pool.alloc("B".to_string());
        let c = pool.alloc("C".to_string());
        let d = pool.alloc("D".to_string());
        let e = pool.alloc("E".to_string());
        let f = pool.alloc("F".to_string());
        let g = pool.alloc("G".to_string());
        let h = pool.alloc("H".to_string());
        pool.nodes[root.0].left = Some(b);
        pool.nodes[root.0].right = Some(c);
        pool.nodes[b.0].left = Some(d);
        pool.nodes[b.0].right = Some(e);
        pool.nodes[c.0].left = Some(f);
        pool.nodes[c.0].right = Some(g);
        pool.nodes[g.0].left = Some(h);
        pool
    }

    /// Generate a random tree with single-letter labels, at most 4 levels
    /// deep. Falls back to a lone root when the coin flips produce nothing.
    pub fn random(seed: u64) -> Self {
        const MAX_DEPTH: usize = 4;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = TreePool::default();
        let mut counter = 0u8;

        fn grow(
            pool: &mut TreePool,
            rng: &mut StdRng,
            counter: &mut u8,
            depth: usize,
        ) -> Option<NodeId> {
            if depth >= MAX_DEPTH || *counter >= 26 || rng.gen::<f64>() < 0.3 {
                return None;
            }
            let label = ((b'A' + *counter) as char).to_string();
            *counter += 1;
            let id = pool.alloc(label);
            if rng.gen::<f64>() > 0.4 {
                let left = grow(pool, rng, counter, depth + 1);
                pool.nodes[id.0].left = left;
            }
            if rng.gen::<f64>() > 0.4 {
                let right = grow(pool, rng, counter, depth + 1);
                pool.nodes[id.0].right = right;
            }
            Some(id)
        }

        pool.root = grow(&mut pool, &mut rng, &mut counter, 0);
        if pool.root.is_none() {
            return TreePool::with_root("A");
        }
        pool
    }

    fn alloc(&mut self, label: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            label,
            left: None,
            right: None,
            detached: false,
        });
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0).filter(|n| !n.detached)
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.label.as_str())
    }

    /// Attach a fresh node under `parent` on the given side. Returns `None`
    /// when the parent is unknown/detached or the slot is already taken.
    pub fn attach(&mut self, parent: NodeId, side: Side, label: impl Into<String>) -> Option<NodeId> {
        match (side, self.get(parent)?) {
            (Side::Left, n) if n.left.is_some() => return None,
            (Side::Right, n) if n.right.is_some() => return None,
            _ => {}
        }
        let child = self.alloc(label.into());
        let parent_node = &mut self.nodes[parent.0];
        match side {
            Side::Left => parent_node.left = Some(child),
            Side::Right => parent_node.right = Some(child),
        }
        Some(child)
    }

    /// Detach the subtree rooted at `id`, tombstoning every node in it.
    /// Removing the root leaves an empty tree.
    pub fn remove_subtree(&mut self, id: NodeId) {
        if self.get(id).is_none() {
            return;
        }

        // Unlink from the parent, if any.
        if self.root == Some(id) {
            self.root = None;
        } else {
            for node in self.nodes.iter_mut().filter(|n| !n.detached) {
                if node.left == Some(id) {
                    node.left = None;
                    break;
                }
                if node.right == Some(id) {
                    node.right = None;
                    break;
                }
            }
        }

        // Tombstone the whole subtree.
        let mut pending = vec![id];
        while let Some(cur) = pending.pop() {
            let node = &mut self.nodes[cur.0];
            if node.detached {
                continue;
            }
            node.detached = true;
            if let Some(l) = node.left {
                pending.push(l);
            }
            if let Some(r) = node.right {
                pending.push(r);
            }
        }
    }

    /// Mark a node as visited. Returns false if it already was, or if the
    /// node is unknown/detached.
    pub(crate) fn visit(&mut self, id: NodeId) -> bool {
        if self.get(id).is_none() || !self.visited.insert(id) {
            return false;
        }
        self.visit_order.push(id);
        true
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    /// Nodes in the order they were visited during the current run.
    pub fn visit_order(&self) -> &[NodeId] {
        &self.visit_order
    }

    /// Visit labels in order, for display and assertions.
    pub fn visited_labels(&self) -> Vec<String> {
        self.visit_order
            .iter()
            .filter_map(|&id| self.label(id).map(str::to_string))
            .collect()
    }

    /// Number of nodes reachable from the root.
    pub fn reachable_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            if let Some(node) = self.get(id) {
                count += 1;
                pending.extend(node.left);
                pending.extend(node.right);
            }
        }
        count
    }

    /// Nodes grouped by depth level, left to right (for rendering).
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = Vec::new();
        let mut current: Vec<NodeId> = self.root.into_iter().collect();
        while !current.is_empty() {
            let mut next = Vec::new();
            for &id in &current {
                if let Some(node) = self.get(id) {
                    next.extend(node.left);
                    next.extend(node.right);
                }
            }
            levels.push(current);
            current = next;
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tree_shape() {
        let pool = TreePool::sample();
        assert_eq!(pool.reachable_count(), 8);
        let root = pool.root().expect("sample tree has a root");
        assert_eq!(pool.label(root), Some("A"));
    }

    #[test]
    fn test_attach_refuses_occupied_slot() {
        let mut pool = TreePool::with_root("A");
        let root = pool.root().unwrap();
        assert!(pool.attach(root, Side::Left, "B").is_some());
        assert!(pool.attach(root, Side::Left, "X").is_none());
    }

    #[test]
    fn test_remove_subtree_tombstones() {
        let mut pool = TreePool::sample();
        let root = pool.root().unwrap();
        let b = pool.get(root).unwrap().left.expect("A has a left child");
        pool.remove_subtree(b);

        // B, D, E gone; A, C, F, G, H remain.
        assert_eq!(pool.reachable_count(), 5);
        assert!(pool.get(b).is_none());
        assert!(pool.get(root).unwrap().left.is_none());
    }

    #[test]
    fn test_visit_once() {
        let mut pool = TreePool::with_root("A");
        let root = pool.root().unwrap();
        assert!(pool.visit(root));
        assert!(!pool.visit(root));
        assert_eq!(pool.visited_labels(), vec!["A".to_string()]);
    }

    #[test]
    fn test_random_tree_deterministic() {
        let a = TreePool::random(11);
        let b = TreePool::random(11);
        assert_eq!(a.reachable_count(), b.reachable_count());
        assert!(a.reachable_count() >= 1);
    }
}
