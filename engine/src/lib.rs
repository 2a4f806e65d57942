//! abprune Engine - Game tree types and alpha-beta evaluation
//!
//! This crate contains the node definitions, the alpha-beta evaluator with
//! its pruned-subtree marker, an unpruned minimax reference, and a set of
//! hand-built trees for validation.
//!
//! Tree generation and printing live in `abprune-tree`.

pub mod alphabeta;
pub mod minimax;
pub mod node;
pub mod test_tree;

pub use alphabeta::{evaluate, evaluate_both, mark_pruned, solve, Order, Outcome, SearchStats};
pub use node::{Node, NodeId, Player};
