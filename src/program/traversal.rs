//! Tree traversal programs
//!
//! Breadth-first keeps an explicit queue; depth-first keeps an explicit
//! stack of visit tasks, with the three classic orders expressed as the
//! order tasks for a node and its children are pushed. Both emit one visit
//! per reachable node and finish with no result index.

use std::collections::VecDeque;

use crate::buffer::tree::{NodeId, TreePool};
use crate::buffer::WorkingState;
use crate::engine::errors::EngineError;
use crate::step::StepOp;

use super::{tree_view, Program};

pub struct Bfs {
    queue: VecDeque<NodeId>,
    started: bool,
    finished: bool,
}

impl Bfs {
    pub fn new() -> Self {
        Bfs {
            queue: VecDeque::new(),
            started: false,
            finished: false,
        }
    }
}

impl Default for Bfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for Bfs {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let pool = tree_view(state)?;

        if !self.started {
            self.started = true;
            if let Some(root) = pool.root() {
                self.queue.push_back(root);
            }
        }

        if let Some(node) = self.queue.pop_front() {
            if let Some(n) = pool.get(node) {
                if let Some(left) = n.left {
                    self.queue.push_back(left);
                }
                if let Some(right) = n.right {
                    self.queue.push_back(right);
                }
            }
            return Ok(StepOp::Visit { node });
        }

        if self.finished {
            return Err(EngineError::RunFinished);
        }
        self.finished = true;
        Ok(StepOp::Finish { result: None })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DfsOrder {
    Pre,
    In,
    Post,
}

/// A pending piece of depth-first work: either expand a subtree or emit
/// the visit for a node whose expansion already ran.
enum Task {
    Enter(NodeId),
    Emit(NodeId),
}

pub struct Dfs {
    order: DfsOrder,
    stack: Vec<Task>,
    started: bool,
    finished: bool,
}

impl Dfs {
    pub fn new(order: DfsOrder) -> Self {
        Dfs {
            order,
            stack: Vec::new(),
            started: false,
            finished: false,
        }
    }

    fn expand(&mut self, node: NodeId, pool: &TreePool) {
        let (left, right) = match pool.get(node) {
            Some(n) => (n.left, n.right),
            None => (None, None),
        };
        // Pushed in reverse so the stack pops in traversal order.
        match self.order {
            DfsOrder::Pre => {
                if let Some(r) = right {
                    self.stack.push(Task::Enter(r));
                }
                if let Some(l) = left {
                    self.stack.push(Task::Enter(l));
                }
                self.stack.push(Task::Emit(node));
            }
            DfsOrder::In => {
                if let Some(r) = right {
                    self.stack.push(Task::Enter(r));
                }
                self.stack.push(Task::Emit(node));
                if let Some(l) = left {
                    self.stack.push(Task::Enter(l));
                }
            }
            DfsOrder::Post => {
                self.stack.push(Task::Emit(node));
                if let Some(r) = right {
                    self.stack.push(Task::Enter(r));
                }
                if let Some(l) = left {
                    self.stack.push(Task::Enter(l));
                }
            }
        }
    }
}

impl Program for Dfs {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let pool = tree_view(state)?;

        if !self.started {
            self.started = true;
            if let Some(root) = pool.root() {
                self.stack.push(Task::Enter(root));
            }
        }

        while let Some(task) = self.stack.pop() {
            match task {
                Task::Enter(node) => self.expand(node, pool),
                Task::Emit(node) => return Ok(StepOp::Visit { node }),
            }
        }

        if self.finished {
            return Err(EngineError::RunFinished);
        }
        self.finished = true;
        Ok(StepOp::Finish { result: None })
    }
}
