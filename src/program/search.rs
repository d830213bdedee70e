//! Linear and binary search programs
//!
//! Probing a single position is reported as a comparison of that position
//! with itself, so the search programs fit the same event vocabulary as
//! the sorts. Binary search assumes the buffer is sorted; it narrows with
//! an explicit range operation before each probe and finishes with the
//! found index, or `None` once the range is exhausted.

use crate::buffer::WorkingState;
use crate::engine::errors::EngineError;
use crate::step::StepOp;

use super::{linear_view, Program};

pub struct LinearSearch {
    target: u32,
    idx: usize,
    phase: LinearPhase,
}

enum LinearPhase {
    Probe,
    Decide,
    Finish(Option<usize>),
    Done,
}

impl LinearSearch {
    pub fn new(target: u32) -> Self {
        LinearSearch {
            target,
            idx: 0,
            phase: LinearPhase::Probe,
        }
    }
}

impl Program for LinearSearch {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                LinearPhase::Probe => {
                    if self.idx >= n {
                        self.phase = LinearPhase::Finish(None);
                        continue;
                    }
                    self.phase = LinearPhase::Decide;
                    return Ok(StepOp::Compare {
                        i: self.idx,
                        j: self.idx,
                    });
                }
                LinearPhase::Decide => {
                    if buf.get(self.idx) == Some(self.target) {
                        self.phase = LinearPhase::Finish(Some(self.idx));
                    } else {
                        self.idx += 1;
                        self.phase = LinearPhase::Probe;
                    }
                }
                LinearPhase::Finish(result) => {
                    self.phase = LinearPhase::Done;
                    return Ok(StepOp::Finish { result });
                }
                LinearPhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}

/// Halving search over a sorted buffer. Sortedness is the caller's
/// responsibility; an unsorted buffer yields a well-formed but meaningless
/// run.
pub struct BinarySearch {
    target: u32,
    lo: usize,
    hi: usize,
    mid: usize,
    phase: BinaryPhase,
}

enum BinaryPhase {
    Init,
    Narrow,
    Probe,
    Decide,
    Finish(Option<usize>),
    Done,
}

impl BinarySearch {
    pub fn new(target: u32) -> Self {
        BinarySearch {
            target,
            lo: 0,
            hi: 0,
            mid: 0,
            phase: BinaryPhase::Init,
        }
    }
}

impl Program for BinarySearch {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                BinaryPhase::Init => {
                    if n == 0 {
                        self.phase = BinaryPhase::Finish(None);
                    } else {
                        self.lo = 0;
                        self.hi = n - 1;
                        self.phase = BinaryPhase::Narrow;
                    }
                }
                BinaryPhase::Narrow => {
                    self.mid = self.lo + (self.hi - self.lo) / 2;
                    self.phase = BinaryPhase::Probe;
                    return Ok(StepOp::Narrow {
                        lo: self.lo,
                        hi: self.hi,
                        mid: self.mid,
                    });
                }
                BinaryPhase::Probe => {
                    self.phase = BinaryPhase::Decide;
                    return Ok(StepOp::Compare {
                        i: self.mid,
                        j: self.mid,
                    });
                }
                BinaryPhase::Decide => {
                    let Some(value) = buf.get(self.mid) else {
                        self.phase = BinaryPhase::Finish(None);
                        continue;
                    };
                    if value == self.target {
                        self.phase = BinaryPhase::Finish(Some(self.mid));
                    } else if value < self.target {
                        // Unsigned indices: an exhausted upper half shows
                        // up as mid already sitting at hi.
                        if self.mid == self.hi {
                            self.phase = BinaryPhase::Finish(None);
                        } else {
                            self.lo = self.mid + 1;
                            self.phase = BinaryPhase::Narrow;
                        }
                    } else if self.mid == self.lo {
                        self.phase = BinaryPhase::Finish(None);
                    } else {
                        self.hi = self.mid - 1;
                        self.phase = BinaryPhase::Narrow;
                    }
                }
                BinaryPhase::Finish(result) => {
                    self.phase = BinaryPhase::Done;
                    return Ok(StepOp::Finish { result });
                }
                BinaryPhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}
