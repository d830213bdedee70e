//! In-place heapsort
//!
//! Two stages share one sift-down sub-machine: build the max-heap from the
//! last parent down to the root, then repeatedly swap the root to the end
//! of the shrinking heap, settle it, and restore the heap property. The
//! right child is compared only when a left comparison happened first, and
//! it displaces the left candidate only when strictly greater.

use crate::buffer::linear::LinearBuffer;
use crate::buffer::WorkingState;
use crate::engine::errors::EngineError;
use crate::step::StepOp;

use super::{linear_view, Program};

pub struct HeapSort {
    i: usize,
    end: usize,
    sift: Option<Sift>,
    phase: HeapPhase,
}

enum HeapPhase {
    Init,
    Build,
    ExtractSwap,
    ExtractSettle,
    ExtractSift,
    SettleRoot,
    Finish,
    Done,
}

/// Sift-down of `node` within `heap[..m]`. `best` tracks the largest of
/// the node and its compared children.
struct Sift {
    node: usize,
    m: usize,
    best: usize,
    stage: SiftStage,
}

enum SiftStage {
    Descend,
    CmpLeft,
    CmpRight,
    Resolve,
}

impl HeapSort {
    pub fn new() -> Self {
        HeapSort {
            i: 0,
            end: 0,
            sift: None,
            phase: HeapPhase::Init,
        }
    }

    fn start_sift(&mut self, node: usize, m: usize) {
        self.sift = Some(Sift {
            node,
            m,
            best: node,
            stage: SiftStage::Descend,
        });
    }

    /// Runs the sift sub-machine one step. Returns an op to emit, or
    /// `None` once the sift has finished and cleared itself.
    fn sift_step(&mut self, buf: &LinearBuffer) -> Option<StepOp> {
        loop {
            let sift = self.sift.as_mut()?;
            match sift.stage {
                SiftStage::Descend => {
                    if 2 * sift.node + 1 >= sift.m {
                        self.sift = None;
                        return None;
                    }
                    sift.best = sift.node;
                    sift.stage = SiftStage::CmpLeft;
                    return Some(StepOp::Compare {
                        i: sift.node,
                        j: 2 * sift.node + 1,
                    });
                }
                SiftStage::CmpLeft => {
                    let left = 2 * sift.node + 1;
                    let bigger = buf
                        .get(left)
                        .zip(buf.get(sift.best))
                        .is_some_and(|(l, b)| l > b);
                    if bigger {
                        sift.best = left;
                    }
                    let right = 2 * sift.node + 2;
                    if right < sift.m {
                        sift.stage = SiftStage::CmpRight;
                        return Some(StepOp::Compare {
                            i: sift.node,
                            j: right,
                        });
                    }
                    sift.stage = SiftStage::Resolve;
                }
                SiftStage::CmpRight => {
                    let right = 2 * sift.node + 2;
                    let bigger = buf
                        .get(right)
                        .zip(buf.get(sift.best))
                        .is_some_and(|(r, b)| r > b);
                    if bigger {
                        sift.best = right;
                    }
                    sift.stage = SiftStage::Resolve;
                }
                SiftStage::Resolve => {
                    if sift.best == sift.node {
                        self.sift = None;
                        return None;
                    }
                    let (i, j) = (sift.node, sift.best);
                    sift.node = sift.best;
                    sift.stage = SiftStage::Descend;
                    return Some(StepOp::Swap { i, j });
                }
            }
        }
    }
}

impl Default for HeapSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for HeapSort {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                HeapPhase::Init => {
                    self.phase = match n {
                        0 => HeapPhase::Finish,
                        1 => HeapPhase::SettleRoot,
                        _ => {
                            self.i = n / 2;
                            self.end = n;
                            HeapPhase::Build
                        }
                    };
                }
                HeapPhase::Build => {
                    if let Some(op) = self.sift_step(buf) {
                        return Ok(op);
                    }
                    if self.i == 0 {
                        self.phase = HeapPhase::ExtractSwap;
                    } else {
                        self.i -= 1;
                        self.start_sift(self.i, n);
                    }
                }
                HeapPhase::ExtractSwap => {
                    if self.end <= 1 {
                        self.phase = HeapPhase::SettleRoot;
                        continue;
                    }
                    self.end -= 1;
                    self.phase = HeapPhase::ExtractSettle;
                    return Ok(StepOp::Swap {
                        i: 0,
                        j: self.end,
                    });
                }
                HeapPhase::ExtractSettle => {
                    self.start_sift(0, self.end);
                    self.phase = HeapPhase::ExtractSift;
                    return Ok(StepOp::Settle {
                        indices: vec![self.end],
                    });
                }
                HeapPhase::ExtractSift => {
                    if let Some(op) = self.sift_step(buf) {
                        return Ok(op);
                    }
                    self.phase = HeapPhase::ExtractSwap;
                }
                HeapPhase::SettleRoot => {
                    self.phase = HeapPhase::Finish;
                    return Ok(StepOp::Settle { indices: vec![0] });
                }
                HeapPhase::Done => return Err(EngineError::RunFinished),
                HeapPhase::Finish => {
                    self.phase = HeapPhase::Done;
                    return Ok(StepOp::Finish { result: None });
                }
            }
        }
    }
}
