//! Minimax with alpha-beta pruning over a materialized game tree
//!
//! `evaluate` walks the tree depth-first in a chosen child order, writes the
//! computed value into every visited internal node, and flags every skipped
//! subtree through `mark_pruned`. Leaves are read, never written.
//!
//! alpha/beta travel by value on every call, so separate runs never share
//! bounds. The two traversal orders mutate the tree they are given and must
//! each own their own copy; `evaluate_both` clones the input and runs them
//! on Rayon's pool.
//!
//! Precondition: every leaf carries a value. A leaf without one is a
//! malformed tree and panics; no validation pass is made.

use crate::node::{Node, NodeId, Player};
use std::fmt;

/// Child visitation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Children as stored (left to right)
    Forward,
    /// Children reversed (right to left)
    Reverse,
}

impl Order {
    pub const ALL: [Order; 2] = [Order::Forward, Order::Reverse];

    pub fn label(self) -> &'static str {
        match self {
            Order::Forward => "left to right",
            Order::Reverse => "right to left",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hooks into the search. Every method defaults to a no-op.
pub trait SearchObserver {
    /// Called on entry to every visited node, leaves included.
    fn visit(&mut self, _node: &Node) {}

    /// Called after a node updates its bound for the child just evaluated.
    fn bound(&mut self, _id: NodeId, _player: Player, _alpha: f64, _beta: f64) {}

    /// Called when a cutoff skipped `skipped` remaining children of `id`.
    fn cutoff(&mut self, _id: NodeId, _skipped: usize) {}
}

impl SearchObserver for () {}

/// Counters collected over one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered by the recursion, leaves included
    pub visited: usize,
    /// Leaves among `visited`
    pub leaves_visited: usize,
    /// Loops terminated early with at least one child left
    pub cutoffs: usize,
    /// Subtrees handed to `mark_pruned`
    pub pruned_subtrees: usize,
}

impl SearchObserver for SearchStats {
    fn visit(&mut self, node: &Node) {
        self.visited += 1;
        if node.is_leaf() {
            self.leaves_visited += 1;
        }
    }

    fn cutoff(&mut self, _id: NodeId, skipped: usize) {
        self.cutoffs += 1;
        self.pruned_subtrees += skipped;
    }
}

/// One bound update at an internal node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundUpdate {
    pub id: NodeId,
    pub player: Player,
    pub alpha: f64,
    pub beta: f64,
}

/// Full record of a search: visit order and every bound update
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    pub visited: Vec<NodeId>,
    pub bounds: Vec<BoundUpdate>,
    pub cutoffs: Vec<(NodeId, usize)>,
}

impl SearchTrace {
    /// Bound updates made at `id`, in order
    pub fn bounds_at(&self, id: NodeId) -> impl Iterator<Item = &BoundUpdate> {
        self.bounds.iter().filter(move |b| b.id == id)
    }
}

impl SearchObserver for SearchTrace {
    fn visit(&mut self, node: &Node) {
        self.visited.push(node.id);
    }

    fn bound(&mut self, id: NodeId, player: Player, alpha: f64, beta: f64) {
        self.bounds.push(BoundUpdate { id, player, alpha, beta });
    }

    fn cutoff(&mut self, id: NodeId, skipped: usize) {
        self.cutoffs.push((id, skipped));
    }
}

/// Flag `node` and its whole subtree as pruned.
pub fn mark_pruned(node: &mut Node) {
    node.pruned = true;
    for child in &mut node.children {
        mark_pruned(child);
    }
}

/// Alpha-beta value of `node` within `(alpha, beta)`, visiting children in `order`.
///
/// Stores the result in every visited internal node and flags skipped
/// subtrees. Call with `f64::NEG_INFINITY` / `f64::INFINITY` at the root.
pub fn evaluate(node: &mut Node, alpha: f64, beta: f64, order: Order) -> f64 {
    evaluate_observed(node, alpha, beta, order, &mut ())
}

/// `evaluate` over the full window
pub fn solve(node: &mut Node, order: Order) -> f64 {
    evaluate(node, f64::NEG_INFINITY, f64::INFINITY, order)
}

/// `evaluate`, reporting visits, bound updates and cutoffs to `observer`.
pub fn evaluate_observed<O: SearchObserver>(
    node: &mut Node,
    alpha: f64,
    beta: f64,
    order: Order,
    observer: &mut O,
) -> f64 {
    observer.visit(node);
    if node.is_leaf() {
        return node.value.expect("leaf node without a value");
    }

    let (id, player) = (node.id, node.player);
    let value = match order {
        Order::Forward => {
            search_children(node.children.iter_mut(), id, player, alpha, beta, order, observer)
        }
        Order::Reverse => {
            search_children(node.children.iter_mut().rev(), id, player, alpha, beta, order, observer)
        }
    };
    node.value = Some(value);
    value
}

/// Child loop shared by both orders. `children` yields in visitation order;
/// whatever it still holds at a cutoff is pruned.
fn search_children<'a, I, O>(
    mut children: I,
    id: NodeId,
    player: Player,
    mut alpha: f64,
    mut beta: f64,
    order: Order,
    observer: &mut O,
) -> f64
where
    I: Iterator<Item = &'a mut Node>,
    O: SearchObserver,
{
    let mut value = player.worst();
    while let Some(child) = children.next() {
        let child_value = evaluate_observed(child, alpha, beta, order, observer);
        value = player.best(value, child_value);
        match player {
            Player::Max => alpha = alpha.max(value),
            Player::Min => beta = beta.min(value),
        }
        observer.bound(id, player, alpha, beta);

        if alpha >= beta {
            let mut skipped = 0;
            for sibling in children {
                mark_pruned(sibling);
                skipped += 1;
            }
            if skipped > 0 {
                log::trace!(
                    "{} node {}: cutoff at alpha={} beta={}, pruned {} subtree(s)",
                    player, id, alpha, beta, skipped
                );
                observer.cutoff(id, skipped);
            }
            return value;
        }
    }
    value
}

/// Result of one full-window search over an owned tree
#[derive(Debug, Clone)]
pub struct Outcome {
    pub order: Order,
    /// Minimax value at the root
    pub value: f64,
    pub stats: SearchStats,
    /// The annotated tree
    pub tree: Node,
}

impl Outcome {
    /// Ids of every pruned node, in pre-order
    pub fn pruned_ids(&self) -> Vec<NodeId> {
        self.tree.pruned_ids()
    }
}

/// Search `tree` over the full window, taking ownership of it.
pub fn run(mut tree: Node, order: Order) -> Outcome {
    let mut stats = SearchStats::default();
    let value = evaluate_observed(&mut tree, f64::NEG_INFINITY, f64::INFINITY, order, &mut stats);
    log::debug!(
        "{}: value={} visited={} cutoffs={} pruned_subtrees={}",
        order, value, stats.visited, stats.cutoffs, stats.pruned_subtrees
    );
    Outcome { order, value, stats, tree }
}

/// Run forward and reverse searches on two independent copies of `root`.
///
/// The copies share nothing, so the two searches run concurrently.
pub fn evaluate_both(root: &Node) -> (Outcome, Outcome) {
    rayon::join(
        || run(root.clone(), Order::Forward),
        || run(root.clone(), Order::Reverse),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimax::minimax;
    use crate::test_tree::{
        build_complete_tree, build_lcg_tree, build_leaf_tree, build_order_sensitive_tree,
        build_pair_tree, build_scenario_tree,
    };
    use std::collections::HashSet;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-10, "{} != {}", a, b);
    }

    fn traced(tree: &mut Node, order: Order) -> (f64, SearchTrace) {
        let mut trace = SearchTrace::default();
        let value = evaluate_observed(tree, f64::NEG_INFINITY, f64::INFINITY, order, &mut trace);
        (value, trace)
    }

    #[test]
    fn test_leaf_root() {
        let mut tree = build_leaf_tree();
        let value = solve(&mut tree, Order::Forward);
        assert_close(value, 42.0);
        assert_eq!(tree, build_leaf_tree());
        assert!(!tree.pruned);
    }

    #[test]
    fn test_pair_tree_no_pruning() {
        for order in Order::ALL {
            let mut tree = build_pair_tree();
            assert_close(solve(&mut tree, order), 5.0);
            assert_eq!(tree.value, Some(5.0));
            assert!(tree.pruned_ids().is_empty(), "{}", order);
        }
    }

    #[test]
    fn test_scenario_forward() {
        let mut tree = build_scenario_tree();
        let (value, trace) = traced(&mut tree, Order::Forward);

        assert_close(value, 3.0);
        assert_eq!(tree.value, Some(3.0));
        assert_eq!(tree.children[0].value, Some(3.0));
        // second MIN child stops after its first leaf
        assert_eq!(tree.children[1].value, Some(2.0));
        assert_eq!(tree.pruned_ids(), vec![6]);
        assert_eq!(trace.visited, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(trace.cutoffs, vec![(4, 1)]);
    }

    #[test]
    fn test_scenario_reverse() {
        let mut tree = build_scenario_tree();
        let (value, trace) = traced(&mut tree, Order::Reverse);

        assert_close(value, 3.0);
        assert!(tree.pruned_ids().is_empty());
        assert_eq!(trace.visited, vec![0, 4, 6, 5, 1, 3, 2]);
        // stored order is untouched
        let ids: Vec<NodeId> = tree.children.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_order_sensitive_prune_sets() {
        let mut forward = build_order_sensitive_tree();
        let mut reverse = forward.clone();

        assert_close(solve(&mut forward, Order::Forward), 6.0);
        assert_close(solve(&mut reverse, Order::Reverse), 6.0);
        assert_eq!(forward.pruned_ids(), vec![7, 12, 13, 14]);
        assert_eq!(reverse.pruned_ids(), vec![10]);
    }

    #[test]
    fn test_cutting_child_is_not_pruned() {
        let mut tree = build_order_sensitive_tree();
        let (_, trace) = traced(&mut tree, Order::Forward);
        // node 9 caused the cutoff at node 8; node 6 caused it at node 5
        assert!(trace.cutoffs.contains(&(8, 1)));
        assert!(trace.cutoffs.contains(&(5, 1)));
        assert!(!tree.find(9).map_or(true, |n| n.pruned));
        assert!(!tree.find(6).map_or(true, |n| n.pruned));
    }

    #[test]
    fn test_cutoff_on_equality() {
        // MAX root over MIN[4, 6] and MIN[4, 1]: after the second MIN's first
        // leaf, alpha == beta == 4 and the 1.0 leaf is pruned.
        let mut tree = build_complete_tree(2, 2, Player::Max, &[4.0, 6.0, 4.0, 1.0]);
        assert_close(solve(&mut tree, Order::Forward), 4.0);
        assert_eq!(tree.pruned_ids(), vec![6]);
    }

    #[test]
    fn test_cutoff_on_last_child_prunes_nothing() {
        let mut tree = build_complete_tree(2, 2, Player::Max, &[5.0, 6.0, 9.0, 1.0]);
        let mut stats = SearchStats::default();
        let value = evaluate_observed(&mut tree, f64::NEG_INFINITY, f64::INFINITY, Order::Forward, &mut stats);
        assert_close(value, 5.0);
        assert!(tree.pruned_ids().is_empty());
        assert_eq!(stats.cutoffs, 0);
        assert_eq!(stats.visited, 7);
    }

    #[test]
    fn test_min_root() {
        let leaves = [3.0, 5.0, 2.0, 9.0];
        for order in Order::ALL {
            let mut tree = build_complete_tree(2, 2, Player::Min, &leaves);
            let expected = minimax(&tree);
            assert_close(solve(&mut tree, order), expected);
        }
    }

    #[test]
    fn test_narrow_window_cuts_at_root() {
        // alpha starts above every leaf, so each MIN child stops after one leaf
        let mut tree = build_scenario_tree();
        let value = evaluate(&mut tree, 10.0, 20.0, Order::Forward);
        assert_close(value, 3.0);
        assert_eq!(tree.children[0].value, Some(3.0));
        assert_eq!(tree.children[1].value, Some(2.0));
        assert_eq!(tree.pruned_ids(), vec![3, 6]);
    }

    #[test]
    fn test_mark_pruned_covers_subtree() {
        let mut tree = build_order_sensitive_tree();
        mark_pruned(&mut tree.children[1]);
        assert_eq!(tree.pruned_ids(), vec![8, 9, 10, 11, 12, 13, 14]);
        assert!(!tree.pruned);
    }

    #[test]
    fn test_mark_pruned_leaf() {
        let mut leaf = build_leaf_tree();
        mark_pruned(&mut leaf);
        assert!(leaf.pruned);
        assert_eq!(leaf.value, Some(42.0));
    }

    #[test]
    fn test_matches_minimax_on_lcg_trees() {
        for seed in 0..20 {
            let base = build_lcg_tree(3, 4, seed);
            let expected = minimax(&base);
            for order in Order::ALL {
                let mut tree = base.clone();
                assert_close(solve(&mut tree, order), expected);
            }
        }
    }

    #[test]
    fn test_pruned_iff_not_visited() {
        for seed in 0..10 {
            for order in Order::ALL {
                let mut tree = build_lcg_tree(3, 4, seed);
                let (_, trace) = traced(&mut tree, order);
                let visited: HashSet<NodeId> = trace.visited.iter().copied().collect();
                assert_eq!(visited.len(), trace.visited.len(), "node visited twice");
                for node in tree.preorder() {
                    assert_eq!(node.pruned, !visited.contains(&node.id), "node {}", node.id);
                }
            }
        }
    }

    #[test]
    fn test_pruning_propagates_to_descendants() {
        for seed in 0..10 {
            let mut tree = build_lcg_tree(4, 3, seed);
            solve(&mut tree, Order::Forward);
            for node in tree.preorder().filter(|n| n.pruned) {
                assert!(node.preorder().all(|d| d.pruned), "node {} has unpruned descendant", node.id);
            }
        }
    }

    #[test]
    fn test_bounds_are_monotonic() {
        for seed in 0..10 {
            for order in Order::ALL {
                let mut tree = build_lcg_tree(3, 4, seed);
                let (_, trace) = traced(&mut tree, order);
                for node in tree.preorder().filter(|n| !n.is_leaf()) {
                    let updates: Vec<&BoundUpdate> = trace.bounds_at(node.id).collect();
                    for pair in updates.windows(2) {
                        match node.player {
                            Player::Max => assert!(pair[1].alpha >= pair[0].alpha),
                            Player::Min => assert!(pair[1].beta <= pair[0].beta),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_leaves_are_invariant() {
        let base = build_lcg_tree(3, 4, 3);
        let mut tree = base.clone();
        solve(&mut tree, Order::Reverse);
        let before: Vec<Option<f64>> = base.leaves().map(|n| n.value).collect();
        let after: Vec<Option<f64>> = tree.leaves().map(|n| n.value).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        for order in Order::ALL {
            let mut tree = build_lcg_tree(3, 3, 11);
            let first = solve(&mut tree, order);
            let snapshot = tree.clone();
            let second = solve(&mut tree, order);
            assert_eq!(first.to_bits(), second.to_bits());
            assert_eq!(tree, snapshot);
        }
    }

    #[test]
    fn test_pruned_flags_survive_another_run() {
        let mut tree = build_order_sensitive_tree();
        solve(&mut tree, Order::Forward);
        let first = tree.pruned_ids();
        solve(&mut tree, Order::Reverse);
        let after = tree.pruned_ids();
        assert!(first.iter().all(|id| after.contains(id)), "{:?} lost from {:?}", first, after);
        assert!(after.contains(&10));
    }

    #[test]
    fn test_stats_account_for_every_node() {
        let mut tree = build_lcg_tree(3, 4, 5);
        let total = tree.node_count();
        let mut stats = SearchStats::default();
        evaluate_observed(&mut tree, f64::NEG_INFINITY, f64::INFINITY, Order::Forward, &mut stats);
        assert_eq!(stats.visited + tree.pruned_ids().len(), total);
        assert!(stats.leaves_visited <= 81);
    }

    #[test]
    fn test_evaluate_both() {
        let root = build_order_sensitive_tree();
        let (forward, reverse) = evaluate_both(&root);

        assert_eq!(forward.order, Order::Forward);
        assert_eq!(reverse.order, Order::Reverse);
        assert_close(forward.value, reverse.value);
        assert_eq!(forward.pruned_ids(), vec![7, 12, 13, 14]);
        assert_eq!(reverse.pruned_ids(), vec![10]);
        assert_eq!(forward.stats.visited, root.node_count() - 4);
        // input is left untouched
        assert!(root.value.is_none());
        assert!(root.pruned_ids().is_empty());
    }

    #[test]
    #[should_panic(expected = "leaf node without a value")]
    fn test_leaf_without_value_panics() {
        let mut tree = Node::internal(0, Player::Max);
        tree.add_child(Node::internal(1, Player::Min));
        solve(&mut tree, Order::Forward);
    }
}
