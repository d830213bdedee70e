// Integration tests for the linear and binary search programs

use algotty::buffer::linear::LinearBuffer;
use algotty::buffer::WorkingState;
use algotty::engine::StepEngine;
use algotty::program::Algorithm;
use algotty::step::StepEvent;

fn run_search(algorithm: Algorithm, values: Vec<u32>, target: u32) -> Vec<StepEvent> {
    let n = values.len();
    let state = WorkingState::Linear(LinearBuffer::from_values(values));
    let mut engine = StepEngine::new(algorithm.program(Some(target)), state);

    let mut events = Vec::new();
    for _ in 0..(4 * n + 10) {
        let event = engine.step().expect("step failed");
        let done = event.is_done();
        events.push(event);
        if done {
            break;
        }
    }
    assert!(events.last().is_some_and(|e| e.is_done()));
    events
}

fn result_of(events: &[StepEvent]) -> Option<usize> {
    match events.last() {
        Some(StepEvent::Done { result }) => *result,
        other => panic!("expected Done, got {:?}", other),
    }
}

#[test]
fn test_linear_search_probes_left_to_right() {
    let events = run_search(Algorithm::Linear, vec![5, 3, 8, 1, 9], 8);
    assert_eq!(
        events,
        vec![
            StepEvent::Compare { i: 0, j: 0 },
            StepEvent::Compare { i: 1, j: 1 },
            StepEvent::Compare { i: 2, j: 2 },
            StepEvent::Done { result: Some(2) },
        ]
    );
}

#[test]
fn test_linear_search_misses_after_probing_everything() {
    let values = vec![5, 3, 8, 1, 9];
    let events = run_search(Algorithm::Linear, values.clone(), 4);
    assert_eq!(result_of(&events), None);
    let probes = events
        .iter()
        .filter(|e| matches!(e, StepEvent::Compare { .. }))
        .count();
    assert_eq!(probes, values.len());
}

#[test]
fn test_linear_search_finds_the_first_duplicate() {
    let events = run_search(Algorithm::Linear, vec![2, 9, 9, 9], 9);
    assert_eq!(result_of(&events), Some(1));
}

#[test]
fn test_linear_search_on_empty_buffer() {
    let events = run_search(Algorithm::Linear, vec![], 1);
    assert_eq!(events, vec![StepEvent::Done { result: None }]);
}

#[test]
fn test_binary_search_finds_every_element() {
    let values: Vec<u32> = vec![2, 5, 9, 14, 21, 30, 44, 61, 80];
    for (idx, &target) in values.iter().enumerate() {
        let events = run_search(Algorithm::Binary, values.clone(), target);
        assert_eq!(result_of(&events), Some(idx), "failed to find {}", target);
    }
}

#[test]
fn test_binary_search_misses_cleanly() {
    let values: Vec<u32> = vec![2, 5, 9, 14, 21, 30, 44, 61, 80];
    for target in [0, 3, 22, 81] {
        let events = run_search(Algorithm::Binary, values.clone(), target);
        assert_eq!(result_of(&events), None, "falsely found {}", target);
    }
}

#[test]
fn test_binary_search_windows_narrow_monotonically() {
    let values: Vec<u32> = (0..50).map(|i| i * 3).collect();
    let events = run_search(Algorithm::Binary, values, 93);

    let mut windows = Vec::new();
    for event in &events {
        match event {
            StepEvent::RangeNarrow { lo, hi, mid } => {
                assert!(lo <= mid && mid <= hi);
                windows.push((*lo, *hi));
            }
            // Every probe lands on the mid of the latest window
            StepEvent::Compare { i, j } => {
                assert_eq!(i, j);
            }
            _ => {}
        }
    }
    assert!(!windows.is_empty());
    for pair in windows.windows(2) {
        let (prev_lo, prev_hi) = pair[0];
        let (lo, hi) = pair[1];
        assert!(lo >= prev_lo && hi <= prev_hi);
        assert!(hi - lo < prev_hi - prev_lo, "window did not shrink");
    }
}

#[test]
fn test_binary_search_probe_count_is_logarithmic() {
    let values: Vec<u32> = (0..64).map(|i| i * 2).collect();
    let events = run_search(Algorithm::Binary, values, 1);
    let probes = events
        .iter()
        .filter(|e| matches!(e, StepEvent::Compare { .. }))
        .count();
    assert!(probes <= 7, "{} probes for 64 elements", probes);
}

#[test]
fn test_binary_search_on_single_element() {
    assert_eq!(result_of(&run_search(Algorithm::Binary, vec![7], 7)), Some(0));
    assert_eq!(result_of(&run_search(Algorithm::Binary, vec![7], 8)), None);
    assert_eq!(result_of(&run_search(Algorithm::Binary, vec![7], 6)), None);
}

#[test]
fn test_searches_never_mutate_the_buffer() {
    let values = vec![1, 4, 6, 9, 12];
    for (algorithm, target) in [(Algorithm::Linear, 9), (Algorithm::Binary, 3)] {
        let state = WorkingState::Linear(LinearBuffer::from_values(values.clone()));
        let mut engine = StepEngine::new(algorithm.program(Some(target)), state);
        loop {
            let event = engine.step().expect("step failed");
            if event.is_done() {
                break;
            }
        }
        let buf = engine.state().as_linear().expect("linear state");
        assert_eq!(buf.values(), values.as_slice());
        assert_eq!(buf.settled_count(), 0);
    }
}
