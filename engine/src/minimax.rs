//! Full minimax without pruning
//!
//! Reference evaluator: visits every node and never mutates the tree.

use crate::node::Node;

/// Minimax value of `node`, visiting every descendant.
///
/// Panics if a leaf carries no value.
pub fn minimax(node: &Node) -> f64 {
    if node.is_leaf() {
        return node.value.expect("leaf node without a value");
    }
    node.children
        .iter()
        .map(minimax)
        .fold(node.player.worst(), |acc, v| node.player.best(acc, v))
}
