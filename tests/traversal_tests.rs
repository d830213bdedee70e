// Integration tests for the four tree traversal programs

use algotty::buffer::tree::TreePool;
use algotty::buffer::WorkingState;
use algotty::engine::StepEngine;
use algotty::program::Algorithm;
use algotty::step::StepEvent;

/// Run a traversal over the given pool, returning visited labels in order
/// plus the final pool state.
fn run_traversal(algorithm: Algorithm, pool: TreePool) -> (Vec<String>, TreePool) {
    let state = WorkingState::Tree(pool);
    let mut engine = StepEngine::new(algorithm.program(None), state);

    let mut labels = Vec::new();
    for _ in 0..1000 {
        let event = engine.step().expect("step failed");
        match event {
            StepEvent::Visit { label } => labels.push(label),
            StepEvent::Done { result } => {
                assert_eq!(result, None, "{} reported a result index", algorithm);
                let pool = engine
                    .state()
                    .as_tree()
                    .expect("traversal state is a tree")
                    .clone();
                return (labels, pool);
            }
            other => panic!("{} emitted unexpected event {:?}", algorithm, other),
        }
    }
    panic!("{} did not finish", algorithm);
}

fn labels_of(labels: &[String]) -> Vec<&str> {
    labels.iter().map(|s| s.as_str()).collect()
}

#[test]
fn test_bfs_visits_level_by_level() {
    let (labels, _) = run_traversal(Algorithm::Bfs, TreePool::sample());
    assert_eq!(labels_of(&labels), ["A", "B", "C", "D", "E", "F", "G", "H"]);
}

#[test]
fn test_preorder_visits_parent_first() {
    let (labels, _) = run_traversal(Algorithm::DfsPreorder, TreePool::sample());
    assert_eq!(labels_of(&labels), ["A", "B", "D", "E", "C", "F", "G", "H"]);
}

#[test]
fn test_inorder_visits_left_parent_right() {
    let (labels, _) = run_traversal(Algorithm::DfsInorder, TreePool::sample());
    assert_eq!(labels_of(&labels), ["D", "B", "E", "A", "F", "C", "H", "G"]);
}

#[test]
fn test_postorder_visits_children_first() {
    let (labels, _) = run_traversal(Algorithm::DfsPostorder, TreePool::sample());
    assert_eq!(labels_of(&labels), ["D", "E", "B", "F", "H", "G", "C", "A"]);
}

#[test]
fn test_every_traversal_covers_the_whole_tree_once() {
    let traversals = [
        Algorithm::Bfs,
        Algorithm::DfsPreorder,
        Algorithm::DfsInorder,
        Algorithm::DfsPostorder,
    ];
    for algorithm in traversals {
        for seed in [0, 1, 17, 99] {
            let pool = TreePool::random(seed);
            let expected = pool.reachable_count();
            let (labels, final_pool) = run_traversal(algorithm, pool);

            assert_eq!(
                labels.len(),
                expected,
                "{} (seed {}) missed or repeated nodes",
                algorithm,
                seed
            );
            // The engine rejects double visits, so surviving the run means
            // each node was visited at most once; the count above pins it
            // to exactly once.
            assert_eq!(final_pool.visit_order().len(), expected);
        }
    }
}

#[test]
fn test_traversal_on_a_lone_root() {
    let pool = TreePool::with_root("A");
    let (labels, _) = run_traversal(Algorithm::DfsInorder, pool);
    assert_eq!(labels_of(&labels), ["A"]);
}

#[test]
fn test_traversal_skips_removed_subtrees() {
    let mut pool = TreePool::sample();
    let root = pool.root().expect("sample has a root");
    let left = pool.get(root).expect("root exists").left.expect("has left");
    pool.remove_subtree(left);

    let before = pool.reachable_count();
    let (labels, _) = run_traversal(Algorithm::Bfs, pool);
    assert_eq!(labels.len(), before);
    assert_eq!(labels_of(&labels), ["A", "C", "F", "G", "H"]);
}

#[test]
fn test_bfs_orders_match_pool_visit_order() {
    let (labels, pool) = run_traversal(Algorithm::Bfs, TreePool::sample());
    assert_eq!(pool.visited_labels(), labels);
}
