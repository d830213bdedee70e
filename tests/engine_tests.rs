// Integration tests for the step engine: pacing, cancellation, defects,
// and the session lifecycle around them

use algotty::buffer::linear::LinearBuffer;
use algotty::buffer::WorkingState;
use algotty::engine::errors::EngineError;
use algotty::engine::{CancelToken, PaceControl, StepEngine, MAX_PACE_MS};
use algotty::program::{Algorithm, Program};
use algotty::session::{RunConfig, Session};
use algotty::step::{RunOutcome, StepEvent, StepOp};

fn engine_for(algorithm: Algorithm, values: Vec<u32>) -> StepEngine {
    let state = WorkingState::Linear(LinearBuffer::from_values(values));
    StepEngine::new(algorithm.program(None), state)
}

fn full_trace(algorithm: Algorithm, values: Vec<u32>) -> Vec<StepEvent> {
    let engine = engine_for(algorithm, values);
    let pace = PaceControl::new(0);
    let cancel = CancelToken::new();
    let mut events = Vec::new();
    let mut last_step = 0;
    let outcome = engine
        .run(&pace, &cancel, |e, snapshot| {
            // Snapshots count up by one per delivered event
            assert_eq!(snapshot.step, last_step + 1);
            last_step = snapshot.step;
            events.push(e.clone());
        })
        .expect("run failed");
    assert!(outcome.is_completed());
    events
}

#[test]
fn test_cancellation_stops_at_every_boundary() {
    // A cancel requested after the k-th event must stop the run at exactly
    // k events, with the value multiset intact and no Done emitted.
    let values = vec![8, 3, 9, 1, 6, 2];
    let total = full_trace(Algorithm::Quick, values.clone()).len();
    assert!(total > 2);

    let mut expected = values.clone();
    expected.sort_unstable();

    for k in 1..total {
        let engine = engine_for(Algorithm::Quick, values.clone());
        let pace = PaceControl::new(0);
        let cancel = CancelToken::new();
        let stopper = cancel.clone();

        let mut events = Vec::new();
        let outcome = engine
            .run(&pace, &cancel, |e, _| {
                events.push(e.clone());
                if events.len() == k {
                    stopper.cancel();
                }
            })
            .expect("run failed");

        assert!(!outcome.is_completed(), "cancel at {} was ignored", k);
        assert_eq!(events.len(), k);
        assert!(!events.iter().any(|e| e.is_done()));

        let snapshot = outcome.snapshot();
        assert_eq!(snapshot.step, k);
        let mut leftover = snapshot
            .state
            .as_linear()
            .expect("linear state")
            .values()
            .to_vec();
        leftover.sort_unstable();
        assert_eq!(leftover, expected, "values lost at cancel point {}", k);
    }
}

#[test]
fn test_cancel_before_the_first_step() {
    let engine = engine_for(Algorithm::Bubble, vec![3, 1, 2]);
    let pace = PaceControl::new(0);
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut events = Vec::new();
    let outcome = engine
        .run(&pace, &cancel, |e, _| events.push(e.clone()))
        .expect("run failed");
    assert!(matches!(outcome, RunOutcome::Cancelled(_)));
    assert!(events.is_empty());
}

#[test]
fn test_stepping_past_done_is_an_error() {
    let mut engine = engine_for(Algorithm::Linear, vec![5]);
    // No target: probes everything, then Done
    loop {
        if engine.step().expect("step failed").is_done() {
            break;
        }
    }
    assert!(engine.is_finished());
    assert!(matches!(engine.step(), Err(EngineError::RunFinished)));
}

#[test]
fn test_pace_is_clamped() {
    let pace = PaceControl::new(5000);
    assert_eq!(pace.get(), MAX_PACE_MS);
    pace.set(250);
    assert_eq!(pace.get(), 250);
    pace.set(u64::MAX);
    assert_eq!(pace.get(), MAX_PACE_MS);
}

#[test]
fn test_pace_dial_is_shared_between_clones() {
    let pace = PaceControl::new(100);
    let dial = pace.clone();
    dial.set(300);
    assert_eq!(pace.get(), 300);
}

// A deliberately broken program, for exercising the defect paths.
struct RogueProgram {
    ops: Vec<StepOp>,
    next: usize,
}

impl RogueProgram {
    fn new(ops: Vec<StepOp>) -> Self {
        RogueProgram { ops, next: 0 }
    }
}

impl Program for RogueProgram {
    fn next_op(&mut self, _state: &WorkingState) -> Result<StepOp, EngineError> {
        let op = self.ops.get(self.next).cloned();
        self.next += 1;
        op.ok_or(EngineError::RunFinished)
    }
}

fn rogue_engine(ops: Vec<StepOp>) -> StepEngine {
    let state = WorkingState::Linear(LinearBuffer::from_values(vec![4, 7, 1]));
    StepEngine::new(Box::new(RogueProgram::new(ops)), state)
}

#[test]
fn test_out_of_bounds_is_rejected_and_applies_nothing() {
    let mut engine = rogue_engine(vec![StepOp::Swap { i: 0, j: 3 }]);
    let err = engine.step().expect_err("bounds check missing");
    assert!(matches!(err, EngineError::OutOfBounds { index: 3, len: 3, .. }));
    // The swap must not have been half-applied
    let buf = engine.state().as_linear().expect("linear state");
    assert_eq!(buf.values(), &[4, 7, 1]);
}

#[test]
fn test_double_settle_is_rejected() {
    let mut engine = rogue_engine(vec![
        StepOp::Settle { indices: vec![1] },
        StepOp::Settle { indices: vec![1] },
    ]);
    engine.step().expect("first settle is fine");
    let err = engine.step().expect_err("double settle missed");
    assert!(matches!(err, EngineError::DoubleSettle { index: 1, .. }));
}

#[test]
fn test_visit_on_a_linear_buffer_is_a_wrong_state_defect() {
    use algotty::buffer::tree::NodeId;
    let mut engine = rogue_engine(vec![StepOp::Visit { node: NodeId(0) }]);
    let err = engine.step().expect_err("state kind check missing");
    assert!(matches!(err, EngineError::WrongState { .. }));
}

#[test]
fn test_session_restart_replays_the_same_run() {
    let mut config = RunConfig::new(Algorithm::Heap);
    config.size = 25;
    config.seed = 42;
    config.pace_ms = 0;

    let mut session = Session::new(config);
    let first = session.run_to_end().expect("first run failed");
    let first_trace = session.trace().to_vec();
    assert!(first.is_completed());

    session.reset();
    assert!(session.trace().is_empty());

    let second = session.run_to_end().expect("second run failed");
    assert!(second.is_completed());
    assert_eq!(session.trace(), first_trace.as_slice());
}

#[test]
fn test_session_picks_a_findable_default_target() {
    let mut config = RunConfig::new(Algorithm::Binary);
    config.size = 40;
    config.seed = 11;
    config.pace_ms = 0;

    let mut session = Session::new(config);
    let outcome = session.run_to_end().expect("run failed");
    let RunOutcome::Completed(snapshot) = outcome else {
        panic!("run did not complete");
    };
    let found = match session.trace().last() {
        Some(StepEvent::Done { result }) => *result,
        other => panic!("expected Done, got {:?}", other),
    };
    let idx = found.expect("default target must be present");
    let buf = snapshot.state.as_linear().expect("linear state");
    assert_eq!(buf.get(idx), session.target());
}

#[test]
fn test_session_refuses_reconfiguration_mid_run() {
    let mut config = RunConfig::new(Algorithm::Bubble);
    config.size = 10;
    config.seed = 1;
    config.pace_ms = 0;

    let mut session = Session::new(config);
    session.start().expect("start failed");
    assert!(session.is_running());
    assert!(session.set_algorithm(Algorithm::Merge).is_err());
    assert!(session.start().is_err());

    session.request_cancel();
    session.advance();
    assert!(!session.is_running());
    assert!(matches!(session.outcome(), Some(RunOutcome::Cancelled(_))));
}

#[test]
fn test_session_cancel_then_reset_restores_the_initial_values() {
    let mut config = RunConfig::new(Algorithm::Selection);
    config.size = 20;
    config.seed = 5;
    config.pace_ms = 0;

    let mut session = Session::new(config);
    let before = session
        .state()
        .as_linear()
        .expect("linear state")
        .values()
        .to_vec();

    session.start().expect("start failed");
    for _ in 0..15 {
        session.advance();
    }
    session.request_cancel();
    session.advance();
    assert!(!session.is_running());

    session.reset();
    let after = session
        .state()
        .as_linear()
        .expect("linear state")
        .values()
        .to_vec();
    assert_eq!(before, after);
}
