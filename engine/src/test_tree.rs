//! Hand-built trees for evaluator validation and benchmarks
//!
//! Leaf values are fixed so expected minimax values and prune sets can be
//! worked out by hand. Ids are assigned in pre-order, the same way the
//! generator assigns them.
//!
//! Scenario tree (depth 2, branching 2, MAX root):
//!   0: MAX
//!   1:   MIN
//!   2:     Leaf  3.0
//!   3:     Leaf  5.0
//!   4:   MIN
//!   5:     Leaf  2.0
//!   6:     Leaf  9.0   pruned left-to-right, visited right-to-left
//!
//! Order-sensitive tree (depth 3, branching 2, MAX root):
//!   0: MAX
//!   1:   MIN
//!   2:     MAX         [3: 5.0, 4: 6.0]
//!   5:     MAX         [6: 7.0, 7: 4.0]
//!   8:   MIN
//!   9:     MAX         [10: 3.0, 11: 2.0]
//!   12:    MAX         [13: 0.0, 14: 1.0]
//!
//!   forward prunes {7, 12, 13, 14}, reverse prunes {10}, both yield 6.0

use crate::node::{Node, NodeId, Player};

/// Build a complete tree of `branching` and `depth` whose leaves, read left to
/// right, carry `leaves`. Panics if `leaves.len() != branching^depth`.
pub fn build_complete_tree(branching: usize, depth: usize, root: Player, leaves: &[f64]) -> Node {
    let expected = branching.pow(depth as u32);
    assert_eq!(leaves.len(), expected, "need {} leaf values", expected);

    let mut next_id: NodeId = 0;
    let mut values = leaves.iter().copied();
    build_subtree(branching, depth, root, &mut next_id, &mut values)
}

fn build_subtree(
    branching: usize,
    remaining: usize,
    player: Player,
    next_id: &mut NodeId,
    values: &mut impl Iterator<Item = f64>,
) -> Node {
    let id = *next_id;
    *next_id += 1;

    if remaining == 0 {
        let value = values.next().expect("leaf count checked by caller");
        return Node::leaf(id, player, value);
    }

    let mut node = Node::internal(id, player);
    for _ in 0..branching {
        node.add_child(build_subtree(branching, remaining - 1, player.opponent(), next_id, values));
    }
    node
}

/// Depth 0: the root is a leaf worth 42.0
pub fn build_leaf_tree() -> Node {
    Node::leaf(0, Player::Max, 42.0)
}

/// Depth 1, branching 2, MAX root over `[3.0, 5.0]`
pub fn build_pair_tree() -> Node {
    build_complete_tree(2, 1, Player::Max, &[3.0, 5.0])
}

/// Depth 2, branching 2, MAX root over `[[3, 5], [2, 9]]`
pub fn build_scenario_tree() -> Node {
    build_complete_tree(2, 2, Player::Max, &[3.0, 5.0, 2.0, 9.0])
}

/// Depth 3 tree where forward and reverse traversal prune disjoint sets
pub fn build_order_sensitive_tree() -> Node {
    build_complete_tree(2, 3, Player::Max, &[5.0, 6.0, 7.0, 4.0, 3.0, 2.0, 0.0, 1.0])
}

/// Deterministic pseudo-random complete tree for benchmarks.
/// Leaf values are drawn from a simple LCG in `[0, 100)`.
pub fn build_lcg_tree(branching: usize, depth: usize, seed: u64) -> Node {
    let count = branching.pow(depth as u32);
    let mut state = seed;
    let leaves: Vec<f64> = (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 10_000) as f64 / 100.0
        })
        .collect();
    build_complete_tree(branching, depth, Player::Max, &leaves)
}
