// Integration tests for the six sorting programs

use algotty::buffer::linear::LinearBuffer;
use algotty::buffer::WorkingState;
use algotty::engine::StepEngine;
use algotty::program::Algorithm;
use algotty::step::StepEvent;

/// Drive a run to its Done event, returning the trace and the final state.
fn run_sort(algorithm: Algorithm, values: Vec<u32>) -> (Vec<StepEvent>, LinearBuffer) {
    let n = values.len();
    let state = WorkingState::Linear(LinearBuffer::from_values(values));
    let mut engine = StepEngine::new(algorithm.program(None), state);

    let mut events = Vec::new();
    // Generous cap so a stuck program fails the test instead of hanging
    let cap = 20 * n * n + 100;
    for _ in 0..cap {
        let event = engine.step().expect("step failed");
        let done = event.is_done();
        events.push(event);
        if done {
            break;
        }
    }
    assert!(
        events.last().is_some_and(|e| e.is_done()),
        "{} did not finish within {} steps",
        algorithm,
        cap
    );
    let buf = engine
        .state()
        .as_linear()
        .expect("sort state is linear")
        .clone();
    (events, buf)
}

fn sorted_copy(mut values: Vec<u32>) -> Vec<u32> {
    values.sort_unstable();
    values
}

const SORTS: [Algorithm; 6] = [
    Algorithm::Bubble,
    Algorithm::Insertion,
    Algorithm::Selection,
    Algorithm::Quick,
    Algorithm::Merge,
    Algorithm::Heap,
];

#[test]
fn test_all_sorts_sort_and_settle() {
    let inputs: Vec<Vec<u32>> = vec![
        vec![],
        vec![42],
        vec![5, 3],
        vec![3, 5],
        vec![9, 8, 7, 6, 5, 4, 3, 2, 1],
        vec![1, 2, 3, 4, 5],
        vec![5, 1, 4, 2, 8, 5, 0, 9, 5],
        vec![7, 7, 7, 7],
        LinearBuffer::random(50, 7).values().to_vec(),
        LinearBuffer::random(200, 13).values().to_vec(),
    ];

    for algorithm in SORTS {
        for input in &inputs {
            let expected = sorted_copy(input.clone());
            let (events, buf) = run_sort(algorithm, input.clone());

            assert_eq!(
                buf.values(),
                expected.as_slice(),
                "{} failed on {:?}",
                algorithm,
                input
            );
            assert!(
                buf.fully_settled(),
                "{} left unsettled positions on {:?}",
                algorithm,
                input
            );
            assert!(
                matches!(events.last(), Some(StepEvent::Done { result: None })),
                "{} reported a result index",
                algorithm
            );
        }
    }
}

#[test]
fn test_done_is_emitted_exactly_once() {
    for algorithm in SORTS {
        let (events, _) = run_sort(algorithm, vec![4, 2, 7, 1, 3]);
        let done_count = events.iter().filter(|e| e.is_done()).count();
        assert_eq!(done_count, 1, "{} emitted Done {} times", algorithm, done_count);
    }
}

#[test]
fn test_swaps_preserve_the_multiset() {
    // Replay the trace against a plain vector and check it tracks the
    // engine's buffer exactly.
    let input = vec![9, 1, 8, 2, 7, 3, 6, 4, 5];
    for algorithm in SORTS {
        let (events, buf) = run_sort(algorithm, input.clone());
        let mut shadow = input.clone();
        for event in &events {
            match event {
                StepEvent::Swap { i, j } => shadow.swap(*i, *j),
                StepEvent::Overwrite { i, value } => shadow[*i] = *value,
                _ => {}
            }
        }
        assert_eq!(shadow.as_slice(), buf.values(), "{} trace diverged", algorithm);
        assert_eq!(
            sorted_copy(shadow),
            sorted_copy(input.clone()),
            "{} lost or invented values",
            algorithm
        );
    }
}

#[test]
fn test_identical_input_gives_identical_trace() {
    for algorithm in SORTS {
        let values = LinearBuffer::random(30, 99).values().to_vec();
        let (first, _) = run_sort(algorithm, values.clone());
        let (second, _) = run_sort(algorithm, values);
        assert_eq!(first, second, "{} is not deterministic", algorithm);
    }
}

#[test]
fn test_bubble_settles_from_the_back() {
    let (events, _) = run_sort(Algorithm::Bubble, vec![3, 1, 2]);
    let settled: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            StepEvent::SettleRange { indices } => Some(indices.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(settled, vec![2, 1, 0]);
}

#[test]
fn test_insertion_settles_once_at_the_end() {
    let (events, _) = run_sort(Algorithm::Insertion, vec![4, 3, 2, 1]);
    let settles: Vec<&StepEvent> = events
        .iter()
        .filter(|e| matches!(e, StepEvent::SettleRange { .. }))
        .collect();
    assert_eq!(settles.len(), 1);
    assert!(matches!(
        settles[0],
        StepEvent::SettleRange { indices } if indices.as_slice() == [0, 1, 2, 3]
    ));
}

#[test]
fn test_merge_keeps_the_left_run_on_ties() {
    // With all-equal values a left-biased merge never emits a swap and
    // writes each slot back unchanged.
    let (events, buf) = run_sort(Algorithm::Merge, vec![6, 6, 6, 6]);
    assert_eq!(buf.values(), &[6, 6, 6, 6]);
    for event in &events {
        if let StepEvent::Overwrite { value, .. } = event {
            assert_eq!(*value, 6);
        }
    }
}
