//! Node definitions for the game tree
//!
//! A tree is a single owned `Node` holding its children inline. Structure
//! (`id`, `player`, `children`, leaf values) is fixed at construction; the
//! evaluator only ever touches internal-node values and the prune flags.

use std::fmt;

/// Node ID type (pre-order generation index)
pub type NodeId = u32;

/// Player to move at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Maximizing player
    Max,
    /// Minimizing player
    Min,
}

impl Player {
    /// Get the opponent of this player
    pub fn opponent(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }

    /// Starting value of the running best at a node of this player
    /// (-inf for MAX, +inf for MIN).
    pub fn worst(self) -> f64 {
        match self {
            Player::Max => f64::NEG_INFINITY,
            Player::Min => f64::INFINITY,
        }
    }

    /// Pick the better of two values from this player's point of view.
    pub fn best(self, a: f64, b: f64) -> f64 {
        match self {
            Player::Max => a.max(b),
            Player::Min => a.min(b),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::Max => "MAX",
            Player::Min => "MIN",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents one position in the game tree
///
/// Fields are plain and public so printers and tests can read the annotated
/// tree after evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier, increasing in pre-order
    pub id: NodeId,
    /// Leaf payload, or the computed minimax value of an evaluated internal node
    pub value: Option<f64>,
    /// Ordered children (empty for leaves)
    pub children: Vec<Node>,
    /// Player to move
    pub player: Player,
    /// Set once this subtree was skipped by a cutoff
    pub pruned: bool,
}

impl Node {
    /// Create a leaf carrying `value`
    pub fn leaf(id: NodeId, player: Player, value: f64) -> Self {
        Node {
            id,
            value: Some(value),
            children: Vec::new(),
            player,
            pruned: false,
        }
    }

    /// Create an internal node with no children and no value yet
    pub fn internal(id: NodeId, player: Player) -> Self {
        Node {
            id,
            value: None,
            children: Vec::new(),
            player,
            pruned: false,
        }
    }

    /// Append a child. The child must belong to the opposing player.
    pub fn add_child(&mut self, child: Node) {
        debug_assert_eq!(child.player, self.player.opponent(), "players must alternate by depth");
        self.children.push(child);
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if this is a maximizing node
    pub fn is_max(&self) -> bool {
        self.player == Player::Max
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Edges on the longest path from this node down to a leaf
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order iterator over this subtree
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Leaves of this subtree, left to right
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.preorder().filter(|n| n.is_leaf())
    }

    /// Find a node by id
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.preorder().find(|n| n.id == id)
    }

    /// Ids of every pruned node, in pre-order
    pub fn pruned_ids(&self) -> Vec<NodeId> {
        self.preorder().filter(|n| n.pruned).map(|n| n.id).collect()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            match self.value {
                Some(v) => write!(f, "Leaf({}: {})", self.id, v),
                None => write!(f, "Leaf({}: -)", self.id),
            }
        } else {
            write!(f, "{} node({}: {} children)", self.player, self.id, self.children.len())
        }
    }
}

/// Depth-first pre-order traversal over borrowed nodes
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
