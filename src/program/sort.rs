//! Bubble, insertion, and selection sort programs
//!
//! Each is a small phase machine: phases that emit an operation return it
//! directly, decision phases read the buffer and fall through in a loop
//! until the next emittable operation is found.
//!
//! Settle policies: bubble and selection have genuine finality per outer
//! pass and settle incrementally; insertion has none before completion and
//! settles everything in one final range.

use crate::buffer::WorkingState;
use crate::engine::errors::EngineError;
use crate::step::StepOp;

use super::{linear_view, Program};

/// Adjacent-swap bubble sort. Settles index `n-1-i` after each outer pass.
pub struct BubbleSort {
    i: usize,
    j: usize,
    phase: BubblePhase,
}

enum BubblePhase {
    Init,
    Compare,
    Decide,
    SettlePass,
    Finish,
    Done,
}

impl BubbleSort {
    pub fn new() -> Self {
        BubbleSort {
            i: 0,
            j: 0,
            phase: BubblePhase::Init,
        }
    }
}

impl Default for BubbleSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for BubbleSort {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                BubblePhase::Init => {
                    if n == 0 {
                        self.phase = BubblePhase::Finish;
                    } else {
                        self.i = 0;
                        self.j = 0;
                        self.phase = if n - 1 - self.i == 0 {
                            BubblePhase::SettlePass
                        } else {
                            BubblePhase::Compare
                        };
                    }
                }
                BubblePhase::Compare => {
                    self.phase = BubblePhase::Decide;
                    return Ok(StepOp::Compare {
                        i: self.j,
                        j: self.j + 1,
                    });
                }
                BubblePhase::Decide => {
                    let j = self.j;
                    let out_of_order = buf.get(j).zip(buf.get(j + 1)).is_some_and(|(a, b)| a > b);
                    self.j += 1;
                    self.phase = if self.j >= n - 1 - self.i {
                        BubblePhase::SettlePass
                    } else {
                        BubblePhase::Compare
                    };
                    if out_of_order {
                        return Ok(StepOp::Swap { i: j, j: j + 1 });
                    }
                }
                BubblePhase::SettlePass => {
                    let settled = n - 1 - self.i;
                    self.i += 1;
                    if self.i >= n {
                        self.phase = BubblePhase::Finish;
                    } else {
                        self.j = 0;
                        self.phase = if n - 1 - self.i == 0 {
                            BubblePhase::SettlePass
                        } else {
                            BubblePhase::Compare
                        };
                    }
                    return Ok(StepOp::Settle {
                        indices: vec![settled],
                    });
                }
                BubblePhase::Finish => {
                    self.phase = BubblePhase::Done;
                    return Ok(StepOp::Finish { result: None });
                }
                BubblePhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}

/// Insertion sort: shift on strict `>` only, so equal elements never move.
/// The held key is written back on every placement, shifted or not.
pub struct InsertionSort {
    i: usize,
    j: usize,
    key: u32,
    phase: InsertPhase,
}

enum InsertPhase {
    Init,
    TakeKey,
    Compare,
    Decide,
    Place,
    SettleAll,
    Finish,
    Done,
}

impl InsertionSort {
    pub fn new() -> Self {
        InsertionSort {
            i: 1,
            j: 0,
            key: 0,
            phase: InsertPhase::Init,
        }
    }
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for InsertionSort {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                InsertPhase::Init => {
                    self.phase = match n {
                        0 => InsertPhase::Finish,
                        1 => InsertPhase::SettleAll,
                        _ => {
                            self.i = 1;
                            InsertPhase::TakeKey
                        }
                    };
                }
                InsertPhase::TakeKey => {
                    self.key = buf.get(self.i).unwrap_or_default();
                    self.j = self.i;
                    self.phase = InsertPhase::Compare;
                }
                InsertPhase::Compare => {
                    self.phase = InsertPhase::Decide;
                    return Ok(StepOp::Compare {
                        i: self.j - 1,
                        j: self.j,
                    });
                }
                InsertPhase::Decide => {
                    let left = buf.get(self.j - 1).unwrap_or_default();
                    if left > self.key {
                        let slot = self.j;
                        self.j -= 1;
                        self.phase = if self.j > 0 {
                            InsertPhase::Compare
                        } else {
                            InsertPhase::Place
                        };
                        return Ok(StepOp::Overwrite {
                            i: slot,
                            value: left,
                        });
                    }
                    self.phase = InsertPhase::Place;
                }
                InsertPhase::Place => {
                    let slot = self.j;
                    let value = self.key;
                    self.i += 1;
                    self.phase = if self.i >= n {
                        InsertPhase::SettleAll
                    } else {
                        InsertPhase::TakeKey
                    };
                    return Ok(StepOp::Overwrite { i: slot, value });
                }
                InsertPhase::SettleAll => {
                    self.phase = InsertPhase::Finish;
                    return Ok(StepOp::Settle {
                        indices: (0..n).collect(),
                    });
                }
                InsertPhase::Finish => {
                    self.phase = InsertPhase::Done;
                    return Ok(StepOp::Finish { result: None });
                }
                InsertPhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}

/// Selection sort: the first minimum wins ties, and a pass swaps only when
/// the minimum moved. Settles index `i` after each pass.
pub struct SelectionSort {
    i: usize,
    j: usize,
    min: usize,
    phase: SelectPhase,
}

enum SelectPhase {
    Init,
    Compare,
    Decide,
    EndPass,
    Settle,
    Finish,
    Done,
}

impl SelectionSort {
    pub fn new() -> Self {
        SelectionSort {
            i: 0,
            j: 0,
            min: 0,
            phase: SelectPhase::Init,
        }
    }
}

impl Default for SelectionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for SelectionSort {
    fn next_op(&mut self, state: &WorkingState) -> Result<StepOp, EngineError> {
        let buf = linear_view(state)?;
        let n = buf.len();

        loop {
            match self.phase {
                SelectPhase::Init => {
                    if n == 0 {
                        self.phase = SelectPhase::Finish;
                    } else {
                        self.i = 0;
                        self.min = 0;
                        self.j = 1;
                        self.phase = if n == 1 {
                            SelectPhase::EndPass
                        } else {
                            SelectPhase::Compare
                        };
                    }
                }
                SelectPhase::Compare => {
                    self.phase = SelectPhase::Decide;
                    return Ok(StepOp::Compare {
                        i: self.min,
                        j: self.j,
                    });
                }
                SelectPhase::Decide => {
                    let candidate = buf.get(self.j).unwrap_or_default();
                    let current = buf.get(self.min).unwrap_or_default();
                    if candidate < current {
                        self.min = self.j;
                    }
                    self.j += 1;
                    self.phase = if self.j >= n {
                        SelectPhase::EndPass
                    } else {
                        SelectPhase::Compare
                    };
                }
                SelectPhase::EndPass => {
                    self.phase = SelectPhase::Settle;
                    if self.min != self.i {
                        return Ok(StepOp::Swap {
                            i: self.i,
                            j: self.min,
                        });
                    }
                }
                SelectPhase::Settle => {
                    let settled = self.i;
                    self.i += 1;
                    if self.i >= n {
                        self.phase = SelectPhase::Finish;
                    } else {
                        self.min = self.i;
                        self.j = self.i + 1;
                        self.phase = if self.j >= n {
                            SelectPhase::EndPass
                        } else {
                            SelectPhase::Compare
                        };
                    }
                    return Ok(StepOp::Settle {
                        indices: vec![settled],
                    });
                }
                SelectPhase::Finish => {
                    self.phase = SelectPhase::Done;
                    return Ok(StepOp::Finish { result: None });
                }
                SelectPhase::Done => return Err(EngineError::RunFinished),
            }
        }
    }
}
