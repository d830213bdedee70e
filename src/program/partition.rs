//! Iterative quicksort over an explicit range stack
//!
//! Lomuto partition with the last element as pivot. Each partition settles
//! its pivot's final slot; ranges that shrink to a single element settle on
//! pop. Sub-ranges are pushed right-then-left so the left side is processed
//! first, matching the recursion order.

use crate::buffer::WorkingState;
use crate::engine::errors::EngineError;
use crate::step::StepOp;

use super::{linear_view, Program};

pub struct QuickSort {
    ranges: Vec<(usize, usize)>,
    part: Option<Partition>,
    phase: QuickPhase,
}

enum QuickPhase {
    Init,
    PopRange,
    Partition,
    Finish,
    Done,
}

/// In-flight Lomuto partition of `[lo, hi]` with pivot at `hi`.
/// `count` is how many elements landed below the pivot so far, so the
/// pivot's final slot is `lo + count`.
struct Partition {
    lo: usize,
    hi: usize,
    count: usize,
    j: usize,
    stage: PartStage,
}

enum PartStage {
    Compare,
    Decide,
    Close,
    SettlePivot,
}

impl QuickSort {
    pub fn new() -> Self {
        QuickSort {
            ranges: Vec::new(),
            part: None,
            phase: QuickPhase::Init,
        }
    }
}

impl Default for QuickSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for QuickSort {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                QuickPhase::Init => {
                    if n > 0 {
                        self.ranges.push((0, n - 1));
                    }
                    self.phase = QuickPhase::PopRange;
                }
                QuickPhase::PopRange => {
                    let Some((lo, hi)) = self.ranges.pop() else {
                        self.phase = QuickPhase::Finish;
                        continue;
                    };
                    if lo == hi {
                        return Ok(StepOp::Settle { indices: vec![lo] });
                    }
                    self.part = Some(Partition {
                        lo,
                        hi,
                        count: 0,
                        j: lo,
                        stage: PartStage::Compare,
                    });
                    self.phase = QuickPhase::Partition;
                }
                QuickPhase::Partition => {
                    let Some(part) = self.part.as_mut() else {
                        self.phase = QuickPhase::PopRange;
                        continue;
                    };
                    match part.stage {
                        PartStage::Compare => {
                            part.stage = PartStage::Decide;
                            return Ok(StepOp::Compare {
                                i: part.j,
                                j: part.hi,
                            });
                        }
                        PartStage::Decide => {
                            let below = buf
                                .get(part.j)
                                .zip(buf.get(part.hi))
                                .is_some_and(|(v, pivot)| v < pivot);
                            let slot = part.lo + part.count;
                            let j = part.j;
                            part.j += 1;
                            if below {
                                part.count += 1;
                            }
                            part.stage = if part.j >= part.hi {
                                PartStage::Close
                            } else {
                                PartStage::Compare
                            };
                            if below {
                                return Ok(StepOp::Swap { i: slot, j });
                            }
                        }
                        PartStage::Close => {
                            let p = part.lo + part.count;
                            let hi = part.hi;
                            part.stage = PartStage::SettlePivot;
                            return Ok(StepOp::Swap { i: p, j: hi });
                        }
                        PartStage::SettlePivot => {
                            let p = part.lo + part.count;
                            let (lo, hi) = (part.lo, part.hi);
                            self.part = None;
                            self.phase = QuickPhase::PopRange;
                            if p < hi {
                                self.ranges.push((p + 1, hi));
                            }
                            if p > lo {
                                self.ranges.push((lo, p - 1));
                            }
                            return Ok(StepOp::Settle { indices: vec![p] });
                        }
                    }
                }
                QuickPhase::Finish => {
                    self.phase = QuickPhase::Done;
                    return Ok(StepOp::Finish { result: None });
                }
                QuickPhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}
