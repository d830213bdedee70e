//! Iterative top-down merge sort
//!
//! Recursion is made explicit with a frame stack: a `Split` frame re-pushes
//! itself as a `Merge` frame under its two halves, so halves are fully
//! sorted before their parent merges them. Merging copies the range into a
//! scratch buffer and writes each chosen element back with an overwrite;
//! ties prefer the left run, which keeps the sort stable. Nothing is final
//! until the topmost merge completes, so the whole buffer settles at once.

use crate::buffer::WorkingState;
use crate::engine::errors::EngineError;
use crate::step::StepOp;

use super::{linear_view, Program};

pub struct MergeSort {
    frames: Vec<Frame>,
    run: Option<MergeRun>,
    phase: MergePhase,
}

enum MergePhase {
    Init,
    PopFrame,
    Merging,
    SettleAll,
    Finish,
    Done,
}

enum Frame {
    Split { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// One in-flight merge of `scratch[..left.len()]` and the rest back into
/// `[lo, hi]`. `i`/`j` index the two runs inside `scratch`, `k` is the
/// write cursor in the buffer.
struct MergeRun {
    lo: usize,
    split: usize,
    scratch: Vec<u32>,
    i: usize,
    j: usize,
    k: usize,
    stage: RunStage,
}

enum RunStage {
    Compare,
    Decide,
    Drain,
}

impl MergeSort {
    pub fn new() -> Self {
        MergeSort {
            frames: Vec::new(),
            run: None,
            phase: MergePhase::Init,
        }
    }
}

impl Default for MergeSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for MergeSort {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                MergePhase::Init => {
                    self.phase = match n {
                        0 => MergePhase::Finish,
                        1 => MergePhase::SettleAll,
                        _ => {
                            self.frames.push(Frame::Split { lo: 0, hi: n - 1 });
                            MergePhase::PopFrame
                        }
                    };
                }
                MergePhase::PopFrame => {
                    let Some(frame) = self.frames.pop() else {
                        self.phase = MergePhase::SettleAll;
                        continue;
                    };
                    match frame {
                        Frame::Split { lo, hi } => {
                            if lo < hi {
                                let mid = lo + (hi - lo) / 2;
                                self.frames.push(Frame::Merge { lo, mid, hi });
                                self.frames.push(Frame::Split { lo: mid + 1, hi });
                                self.frames.push(Frame::Split { lo, hi: mid });
                            }
                        }
                        Frame::Merge { lo, mid, hi } => {
                            let scratch: Vec<u32> =
                                (lo..=hi).filter_map(|idx| buf.get(idx)).collect();
                            self.run = Some(MergeRun {
                                lo,
                                split: mid + 1 - lo,
                                scratch,
                                i: 0,
                                j: mid + 1 - lo,
                                k: lo,
                                stage: RunStage::Compare,
                            });
                            self.phase = MergePhase::Merging;
                        }
                    }
                }
                MergePhase::Merging => {
                    let Some(run) = self.run.as_mut() else {
                        self.phase = MergePhase::PopFrame;
                        continue;
                    };
                    let left_done = run.i >= run.split;
                    let right_done = run.j >= run.scratch.len();
                    match run.stage {
                        RunStage::Compare if left_done && right_done => {
                            self.run = None;
                            self.phase = MergePhase::PopFrame;
                        }
                        RunStage::Compare if left_done || right_done => {
                            run.stage = RunStage::Drain;
                        }
                        RunStage::Compare => {
                            run.stage = RunStage::Decide;
                            // Operand positions are where the candidates
                            // originally sat, offset into the live buffer.
                            return Ok(StepOp::Compare {
                                i: run.lo + run.i,
                                j: run.lo + run.j,
                            });
                        }
                        RunStage::Decide => {
                            let value = if run.scratch[run.i] <= run.scratch[run.j] {
                                let v = run.scratch[run.i];
                                run.i += 1;
                                v
                            } else {
                                let v = run.scratch[run.j];
                                run.j += 1;
                                v
                            };
                            let slot = run.k;
                            run.k += 1;
                            run.stage = RunStage::Compare;
                            return Ok(StepOp::Overwrite { i: slot, value });
                        }
                        RunStage::Drain => {
                            let cursor = if run.i < run.split {
                                &mut run.i
                            } else {
                                &mut run.j
                            };
                            let value = run.scratch[*cursor];
                            *cursor += 1;
                            let slot = run.k;
                            run.k += 1;
                            let exhausted =
                                run.i >= run.split && run.j >= run.scratch.len();
                            if exhausted {
                                self.run = None;
                                self.phase = MergePhase::PopFrame;
                            }
                            return Ok(StepOp::Overwrite { i: slot, value });
                        }
                    }
                }
                MergePhase::SettleAll => {
                    self.phase = MergePhase::Finish;
                    return Ok(StepOp::Settle {
                        indices: (0..n).collect(),
                    });
                }
                MergePhase::Finish => {
                    self.phase = MergePhase::Done;
                    return Ok(StepOp::Finish { result: None });
                }
                MergePhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}
